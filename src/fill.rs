//! Conduit fill computed from the registry and the conduit.

use serde::{Deserialize, Serialize};
use uom::si::{
    area::square_millimeter,
    f64::{Area, Ratio},
    ratio::percent,
};

use crate::cable::Cable;
use crate::conduit::Conduit;
use crate::errors::ConduitError;
use crate::registry::CableRegistry;

/// Cable and conduit areas together with the resulting fill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillResult {
    /// Sum of the cable cross-sections in square millimetres.
    pub total_cable_area_mm2: f64,
    /// Internal cross-section of the conduit in square millimetres.
    pub conduit_area_mm2: f64,
    /// `total / conduit * 100`.
    pub fill_percent: f64,
    /// Number of cables that contributed to the total.
    pub cable_count: usize,
}

impl FillResult {
    /// Total cable area as a typed quantity.
    #[must_use]
    pub fn total_cable_area(&self) -> Area {
        Area::new::<square_millimeter>(self.total_cable_area_mm2)
    }

    /// Conduit area as a typed quantity.
    #[must_use]
    pub fn conduit_area(&self) -> Area {
        Area::new::<square_millimeter>(self.conduit_area_mm2)
    }

    /// Fill as a typed ratio.
    #[must_use]
    pub fn fill(&self) -> Ratio {
        Ratio::new::<percent>(self.fill_percent)
    }

    /// Conduit area left unoccupied, never below zero.
    #[must_use]
    pub fn free_area_mm2(&self) -> f64 {
        (self.conduit_area_mm2 - self.total_cable_area_mm2).max(0.0)
    }
}

/// Compute the fill of `conduit` by every cable in `registry`.
///
/// An empty registry yields a fill of zero.
///
/// # Errors
///
/// Returns [`ConduitError::InvalidConduit`] when the conduit area is not strictly positive.
///
/// # Examples
/// ```
/// use conduitfill::{compute, point, CableCatalog, CableRegistry, CableType, Conduit};
///
/// let mut registry = CableRegistry::new(CableCatalog::uniform(20.0));
/// registry.add(CableType::Single, point(0.0, 0.0));
/// let conduit = Conduit::from_radius_mm(20.0).expect("valid radius");
/// let fill = compute(&registry, &conduit).expect("valid conduit");
/// assert!((fill.fill_percent - 25.0).abs() < 1.0e-9);
/// ```
pub fn compute(registry: &CableRegistry, conduit: &Conduit) -> Result<FillResult, ConduitError> {
    compute_for(registry.iter(), conduit)
}

/// Compute the fill of `conduit` by an arbitrary collection of cables.
///
/// # Errors
///
/// Returns [`ConduitError::InvalidConduit`] when the conduit area is not strictly positive.
pub fn compute_for<'a, I>(cables: I, conduit: &Conduit) -> Result<FillResult, ConduitError>
where
    I: IntoIterator<Item = &'a Cable>,
{
    let conduit_area_mm2 = conduit.area_mm2();
    if !conduit_area_mm2.is_finite() || conduit_area_mm2 <= 0.0 {
        return Err(ConduitError::InvalidConduit {
            radius_mm: conduit.radius_mm(),
        });
    }
    let (total_cable_area_mm2, cable_count) = cables
        .into_iter()
        .fold((0.0, 0), |(area, count), cable| (area + cable.area_mm2(), count + 1));
    Ok(FillResult {
        total_cable_area_mm2,
        conduit_area_mm2,
        fill_percent: total_cable_area_mm2 / conduit_area_mm2 * 100.0,
        cable_count,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::cable::{CableCatalog, CableType};
    use crate::geometry::point;

    #[test]
    fn empty_registry_has_zero_fill() {
        let registry = CableRegistry::default();
        let conduit = Conduit::from_radius_mm(50.0).expect("valid radius");
        let fill = compute(&registry, &conduit).expect("valid conduit");
        assert_eq!(fill.fill_percent, 0.0);
        assert_eq!(fill.cable_count, 0);
        assert_relative_eq!(fill.free_area_mm2(), conduit.area_mm2());
    }

    #[test]
    fn mixed_cables_sum_their_areas() {
        let catalog = CableCatalog::uniform(10.0).with_diameter(CableType::ThreeCore, 20.0);
        let mut registry = CableRegistry::new(catalog);
        registry.add(CableType::Single, point(0.0, 0.0));
        registry.add(CableType::ThreeCore, point(0.0, 0.0));
        let conduit = Conduit::from_radius_mm(50.0).expect("valid radius");

        let fill = compute(&registry, &conduit).expect("valid conduit");
        let expected_area = std::f64::consts::PI * (25.0 + 100.0);
        assert_relative_eq!(fill.total_cable_area_mm2, expected_area, epsilon = 1.0e-9);
        assert_relative_eq!(fill.fill_percent, 125.0 / 2_500.0 * 100.0, epsilon = 1.0e-9);
        assert_eq!(fill.cable_count, 2);
    }

    #[test]
    fn typed_accessors_agree_with_raw_fields() {
        let fill = FillResult {
            total_cable_area_mm2: 1_500.0,
            conduit_area_mm2: 7_500.0,
            fill_percent: 20.0,
            cable_count: 3,
        };
        assert_relative_eq!(fill.fill().value, 0.2, epsilon = 1.0e-12);
        assert_relative_eq!(
            fill.total_cable_area().get::<square_millimeter>(),
            1_500.0,
            epsilon = 1.0e-9
        );
        assert_relative_eq!(fill.conduit_area().value, 7.5e-3, epsilon = 1.0e-12);
    }
}
