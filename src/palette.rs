//! Colours chosen for the rendered cross-section.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 24-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Pure black.
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Part of the drawing a [`Command::SetColor`](crate::Command::SetColor) applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTarget {
    /// Window background.
    Background,
    /// Conduit wall outline.
    Conduit,
    /// Outer cable sheath.
    Sheath,
    /// Insulation around each core.
    CoreInsulation,
    /// Metallic conductor inside each core.
    Conductor,
}

/// Current colour for every [`ColorTarget`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Window background.
    pub background: Rgb,
    /// Conduit wall outline.
    pub conduit: Rgb,
    /// Outer cable sheath.
    pub sheath: Rgb,
    /// Insulation around each core.
    pub core_insulation: Rgb,
    /// Metallic conductor inside each core.
    pub conductor: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            conduit: Rgb::BLACK,
            sheath: Rgb(255, 165, 0),
            core_insulation: Rgb::WHITE,
            conductor: Rgb(184, 115, 51),
        }
    }
}

impl Palette {
    /// Colour currently assigned to `target`.
    #[must_use]
    pub fn get(&self, target: ColorTarget) -> Rgb {
        match target {
            ColorTarget::Background => self.background,
            ColorTarget::Conduit => self.conduit,
            ColorTarget::Sheath => self.sheath,
            ColorTarget::CoreInsulation => self.core_insulation,
            ColorTarget::Conductor => self.conductor,
        }
    }

    /// Assign `color` to `target` and return the colour it replaced.
    pub fn set(&mut self, target: ColorTarget, color: Rgb) -> Rgb {
        let slot = match target {
            ColorTarget::Background => &mut self.background,
            ColorTarget::Conduit => &mut self.conduit,
            ColorTarget::Sheath => &mut self.sheath,
            ColorTarget::CoreInsulation => &mut self.core_insulation,
            ColorTarget::Conductor => &mut self.conductor,
        };
        std::mem::replace(slot, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_returns_previous_colour() {
        let mut palette = Palette::default();
        let previous = palette.set(ColorTarget::Sheath, Rgb(10, 20, 30));
        assert_eq!(previous, Rgb(255, 165, 0));
        assert_eq!(palette.get(ColorTarget::Sheath), Rgb(10, 20, 30));
        assert_eq!(palette.get(ColorTarget::Background), Rgb::WHITE);
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(Rgb(184, 115, 51).to_string(), "#b87333");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let palette: Palette =
            serde_json::from_str(r#"{"background": [0, 0, 0]}"#).expect("valid json");
        assert_eq!(palette.background, Rgb::BLACK);
        assert_eq!(palette.conductor, Palette::default().conductor);
    }
}
