//! Cable identities, variants and their fixed cross-sections.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::{circle_area, polar_ring, Point};

/// Identifier handed out by the [`CableRegistry`](crate::CableRegistry).
///
/// Identifiers increase monotonically, so ordering by id is creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CableId(u64);

impl CableId {
    /// Wrap a raw identifier value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cable variants differing in their number of cores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CableType {
    /// One core at the centre of the sheath.
    #[serde(rename = "single")]
    Single,
    /// Three cores in a trefoil arrangement.
    #[serde(rename = "three")]
    ThreeCore,
    /// Four cores in a quad arrangement.
    #[serde(rename = "four")]
    FourCore,
}

impl CableType {
    /// Every supported variant, in catalog order.
    pub const ALL: [CableType; 3] = [CableType::Single, CableType::ThreeCore, CableType::FourCore];

    /// Number of cores inside the sheath.
    #[must_use]
    pub const fn core_count(self) -> usize {
        match self {
            CableType::Single => 1,
            CableType::ThreeCore => 3,
            CableType::FourCore => 4,
        }
    }

    /// Short lowercase name used in configuration files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CableType::Single => "single",
            CableType::ThreeCore => "three",
            CableType::FourCore => "four",
        }
    }

    /// Distance from the cable centre to each core centre for cores of `core_radius`.
    #[must_use]
    pub fn core_center_distance(self, core_radius: f64) -> f64 {
        match self {
            CableType::Single => 0.0,
            CableType::ThreeCore => 2.0 * core_radius / 3.0_f64.sqrt(),
            CableType::FourCore => std::f64::consts::SQRT_2 * core_radius,
        }
    }

    /// Core centres relative to the cable centre, before any body rotation.
    ///
    /// Trefoil cores sit at 0, 120 and 240 degrees; quad cores sit on the four axes.
    #[must_use]
    pub fn core_offsets(self, core_radius: f64) -> Vec<Point> {
        let distance = self.core_center_distance(core_radius);
        match self {
            CableType::Single => vec![Point::default()],
            CableType::ThreeCore => polar_ring(3, distance, 0.0),
            CableType::FourCore => polar_ring(4, distance, -std::f64::consts::FRAC_PI_2),
        }
    }
}

impl fmt::Display for CableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CableType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "single" | "1" => Ok(CableType::Single),
            "three" | "three-core" | "3" => Ok(CableType::ThreeCore),
            "four" | "four-core" | "4" => Ok(CableType::FourCore),
            other => Err(format!(
                "unknown cable type `{other}` (expected single, three or four)"
            )),
        }
    }
}

/// Core, sheath and clearance dimensions used to derive outer diameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoreGeometry {
    /// Radius of a single core in millimetres.
    pub core_radius_mm: f64,
    /// Thickness of the outer sheath in millimetres.
    pub sheath_thickness_mm: f64,
    /// Clearance kept around the sheath in millimetres.
    pub margin_mm: f64,
}

impl Default for CoreGeometry {
    fn default() -> Self {
        Self {
            core_radius_mm: 30.0,
            sheath_thickness_mm: 3.0,
            margin_mm: 2.0,
        }
    }
}

impl CoreGeometry {
    /// Radius of the bounding circle a cable of `cable_type` occupies.
    #[must_use]
    pub fn effective_radius(&self, cable_type: CableType) -> f64 {
        cable_type.core_center_distance(self.core_radius_mm)
            + self.core_radius_mm
            + self.sheath_thickness_mm
            + self.margin_mm
    }
}

/// Fixed outer diameter for each cable variant, in millimetres.
///
/// A cable's cross-sectional area is the area of its outer bounding circle, so
/// multi-core cables count the gaps between their cores as occupied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CableCatalog {
    /// Outer diameter of a single-core cable.
    pub single_mm: f64,
    /// Outer diameter of a three-core cable.
    pub three_core_mm: f64,
    /// Outer diameter of a four-core cable.
    pub four_core_mm: f64,
}

impl Default for CableCatalog {
    fn default() -> Self {
        Self::from_core_geometry(&CoreGeometry::default())
    }
}

impl CableCatalog {
    /// Build a catalog where every variant has the same outer diameter.
    #[must_use]
    pub const fn uniform(diameter_mm: f64) -> Self {
        Self {
            single_mm: diameter_mm,
            three_core_mm: diameter_mm,
            four_core_mm: diameter_mm,
        }
    }

    /// Derive outer diameters from core, sheath and margin dimensions.
    ///
    /// # Examples
    /// ```
    /// use conduitfill::{CableCatalog, CableType, CoreGeometry};
    ///
    /// let catalog = CableCatalog::from_core_geometry(&CoreGeometry::default());
    /// assert_eq!(catalog.diameter_mm(CableType::Single), 70.0);
    /// ```
    #[must_use]
    pub fn from_core_geometry(geometry: &CoreGeometry) -> Self {
        Self {
            single_mm: 2.0 * geometry.effective_radius(CableType::Single),
            three_core_mm: 2.0 * geometry.effective_radius(CableType::ThreeCore),
            four_core_mm: 2.0 * geometry.effective_radius(CableType::FourCore),
        }
    }

    /// Replace the diameter of one variant.
    #[must_use]
    pub fn with_diameter(mut self, cable_type: CableType, diameter_mm: f64) -> Self {
        match cable_type {
            CableType::Single => self.single_mm = diameter_mm,
            CableType::ThreeCore => self.three_core_mm = diameter_mm,
            CableType::FourCore => self.four_core_mm = diameter_mm,
        }
        self
    }

    /// Outer diameter of `cable_type`.
    #[must_use]
    pub fn diameter_mm(&self, cable_type: CableType) -> f64 {
        match cable_type {
            CableType::Single => self.single_mm,
            CableType::ThreeCore => self.three_core_mm,
            CableType::FourCore => self.four_core_mm,
        }
    }

    /// Cross-sectional area of `cable_type` in square millimetres.
    #[must_use]
    pub fn area_mm2(&self, cable_type: CableType) -> f64 {
        circle_area(self.diameter_mm(cable_type) / 2.0)
    }
}

/// A cable tracked by the registry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cable {
    /// Identifier assigned at creation.
    pub(crate) id: CableId,
    /// Variant of the cable.
    pub(crate) cable_type: CableType,
    /// Outer diameter fixed at creation from the catalog.
    pub(crate) outer_diameter_mm: f64,
    /// Centre of the cable, owned by the simulation.
    pub(crate) position: Point,
    /// Body rotation in radians, owned by the simulation.
    pub(crate) angle: f64,
}

impl Cable {
    /// Identifier of the cable.
    #[must_use]
    pub fn id(&self) -> CableId {
        self.id
    }

    /// Variant of the cable.
    #[must_use]
    pub fn cable_type(&self) -> CableType {
        self.cable_type
    }

    /// Last reported centre position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Last reported body rotation in radians.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Outer diameter in millimetres.
    #[must_use]
    pub fn outer_diameter_mm(&self) -> f64 {
        self.outer_diameter_mm
    }

    /// Outer radius in millimetres.
    #[must_use]
    pub fn outer_radius_mm(&self) -> f64 {
        self.outer_diameter_mm / 2.0
    }

    /// Cross-sectional area in square millimetres.
    #[must_use]
    pub fn area_mm2(&self) -> f64 {
        circle_area(self.outer_radius_mm())
    }

    /// Absolute core centres for cores of `core_radius`, rotated with the body.
    #[must_use]
    pub fn core_positions(&self, core_radius: f64) -> Vec<Point> {
        self.cable_type
            .core_offsets(core_radius)
            .into_iter()
            .map(|offset| self.position.offset_rotated(offset, self.angle))
            .collect()
    }
}
