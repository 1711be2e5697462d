//! The circular conduit that bounds the cable cross-section.

use uom::si::{
    area::square_millimeter,
    f64::{Area, Length},
    length::millimeter,
};

use crate::errors::ConduitError;
use crate::geometry::Point;

/// Clearance kept between a freshly spawned cable and the conduit wall, in millimetres.
pub const SPAWN_PADDING_MM: f64 = 10.0;

/// Circular conduit centred on the origin of the cross-section.
///
/// The radius is always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conduit {
    /// Internal radius.
    radius: Length,
}

impl Conduit {
    /// Create a conduit with the supplied internal radius.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError::InvalidConduit`] when `radius` is not strictly positive.
    pub fn new(radius: Length) -> Result<Self, ConduitError> {
        let radius_mm = radius.get::<millimeter>();
        if !radius_mm.is_finite() || radius_mm <= 0.0 {
            return Err(ConduitError::InvalidConduit { radius_mm });
        }
        Ok(Self { radius })
    }

    /// Create a conduit from an internal radius in millimetres.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError::InvalidConduit`] when `radius_mm` is not strictly positive.
    ///
    /// # Examples
    /// ```
    /// use conduitfill::Conduit;
    ///
    /// let conduit = Conduit::from_radius_mm(50.0).expect("positive radius");
    /// assert!((conduit.area_mm2() - 7_853.98).abs() < 0.01);
    /// assert!(Conduit::from_radius_mm(0.0).is_err());
    /// ```
    pub fn from_radius_mm(radius_mm: f64) -> Result<Self, ConduitError> {
        Self::new(Length::new::<millimeter>(radius_mm))
    }

    /// Create a conduit from an internal diameter in millimetres.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError::InvalidConduit`] when `diameter_mm` is not strictly positive.
    pub fn from_diameter_mm(diameter_mm: f64) -> Result<Self, ConduitError> {
        Self::from_radius_mm(diameter_mm / 2.0)
    }

    /// Internal radius.
    #[must_use]
    pub fn radius(&self) -> Length {
        self.radius
    }

    /// Internal radius in millimetres.
    #[must_use]
    pub fn radius_mm(&self) -> f64 {
        self.radius.get::<millimeter>()
    }

    /// Internal diameter in millimetres.
    #[must_use]
    pub fn diameter_mm(&self) -> f64 {
        2.0 * self.radius_mm()
    }

    /// Internal cross-sectional area.
    #[must_use]
    pub fn area(&self) -> Area {
        self.radius * self.radius * std::f64::consts::PI
    }

    /// Internal cross-sectional area in square millimetres.
    #[must_use]
    pub fn area_mm2(&self) -> f64 {
        self.area().get::<square_millimeter>()
    }

    /// Replace the internal radius.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError::InvalidConduit`] and leaves the conduit untouched when
    /// `radius_mm` is not strictly positive.
    pub fn resize_mm(&mut self, radius_mm: f64) -> Result<(), ConduitError> {
        *self = Self::from_radius_mm(radius_mm)?;
        Ok(())
    }

    /// Whether a circle of `radius_mm` centred at `center` lies inside the wall,
    /// allowing `tolerance_mm` of penetration.
    #[must_use]
    pub fn contains_circle(&self, center: Point, radius_mm: f64, tolerance_mm: f64) -> bool {
        center.distance_to(Point::default()) + radius_mm <= self.radius_mm() + tolerance_mm
    }

    /// Horizontal band near the top of the conduit where a cable of `cable_radius_mm`
    /// can be spawned without touching the wall.
    ///
    /// The vertical axis points down, so the top of the conduit is at `-radius`.
    #[must_use]
    pub fn spawn_window(&self, cable_radius_mm: f64) -> SpawnWindow {
        let radius = self.radius_mm();
        let y = -radius + cable_radius_mm + SPAWN_PADDING_MM;
        // Centres must stay within radius - cable_radius of the conduit centre.
        let reach = radius - cable_radius_mm;
        let half_width_mm = if reach > 0.0 && reach * reach >= y * y {
            (reach * reach - y * y).sqrt()
        } else {
            0.0
        };
        SpawnWindow { y_mm: y, half_width_mm }
    }
}

/// Horizontal spawn band returned by [`Conduit::spawn_window`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnWindow {
    /// Vertical position of the band relative to the conduit centre.
    pub y_mm: f64,
    /// Half of the usable horizontal width, measured from the centre line.
    pub half_width_mm: f64,
}

impl SpawnWindow {
    /// Point in the band at `fraction` of the half width; `-1.0` is the left edge, `1.0`
    /// the right edge. Out-of-range fractions are clamped.
    #[must_use]
    pub fn point_at(&self, fraction: f64) -> Point {
        Point::new(fraction.clamp(-1.0, 1.0) * self.half_width_mm, self.y_mm)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;

    #[test]
    fn non_positive_radius_is_rejected() {
        for radius_mm in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Conduit::from_radius_mm(radius_mm),
                Err(ConduitError::InvalidConduit { .. })
            ));
        }
    }

    #[test]
    fn failed_resize_keeps_previous_radius() {
        let mut conduit = Conduit::from_radius_mm(50.0).expect("valid radius");
        let error = conduit.resize_mm(-1.0).expect_err("negative radius rejected");
        assert_eq!(error, ConduitError::InvalidConduit { radius_mm: -1.0 });
        assert_relative_eq!(conduit.radius_mm(), 50.0);

        conduit.resize_mm(25.0).expect("positive radius accepted");
        assert_relative_eq!(conduit.diameter_mm(), 50.0);
    }

    #[test]
    fn diameter_constructor_halves() {
        let conduit = Conduit::from_diameter_mm(100.0).expect("valid diameter");
        assert_relative_eq!(conduit.radius_mm(), 50.0);
        assert_relative_eq!(conduit.area_mm2(), std::f64::consts::PI * 2_500.0, epsilon = 1.0e-9);
    }

    #[test]
    fn containment_respects_tolerance() {
        let conduit = Conduit::from_radius_mm(100.0).expect("valid radius");
        assert!(conduit.contains_circle(point(0.0, 80.0), 20.0, 0.0));
        assert!(!conduit.contains_circle(point(0.0, 81.0), 20.0, 0.0));
        assert!(conduit.contains_circle(point(0.0, 81.0), 20.0, 1.5));
    }

    #[test]
    fn spawn_window_sits_below_the_top_wall() {
        let conduit = Conduit::from_radius_mm(300.0).expect("valid radius");
        let window = conduit.spawn_window(35.0);
        assert_relative_eq!(window.y_mm, -255.0);
        let expected = (265.0_f64.powi(2) - 255.0_f64.powi(2)).sqrt();
        assert_relative_eq!(window.half_width_mm, expected, epsilon = 1.0e-9);
        let right = window.point_at(3.0);
        assert_relative_eq!(right.x, expected, epsilon = 1.0e-9);
        assert!(conduit.contains_circle(right, 35.0, 1.0e-9));
    }

    #[test]
    fn spawn_window_collapses_for_oversized_cables() {
        let conduit = Conduit::from_radius_mm(50.0).expect("valid radius");
        assert_relative_eq!(conduit.spawn_window(80.0).half_width_mm, 0.0);
    }
}
