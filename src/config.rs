//! Externally supplied settings for a conduit session.
//!
//! Every field has a default, so a JSON file only needs to name the values it
//! overrides:
//!
//! ```
//! use conduitfill::SimulatorConfig;
//!
//! let config = SimulatorConfig::from_json_str(r#"{"default_radius_mm": 120.0}"#)
//!     .expect("valid configuration");
//! assert_eq!(config.default_radius_mm, 120.0);
//! assert_eq!(config.radius_bounds_mm.max_mm, 500.0);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cable::{CableCatalog, CableType};
use crate::compliance::{ComplianceEvaluator, ThresholdPolicy};
use crate::errors::{ConduitError, ConfigError};
use crate::palette::Palette;

/// Inclusive range of accepted conduit radii.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RadiusBounds {
    /// Smallest accepted radius in millimetres.
    pub min_mm: f64,
    /// Largest accepted radius in millimetres.
    pub max_mm: f64,
}

impl Default for RadiusBounds {
    fn default() -> Self {
        Self {
            min_mm: 50.0,
            max_mm: 500.0,
        }
    }
}

impl RadiusBounds {
    /// Check that `radius_mm` is positive and inside the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConduitError::InvalidConduit`] for non-positive radii and
    /// [`ConduitError::RadiusOutOfRange`] for radii outside the bounds.
    pub fn check(&self, radius_mm: f64) -> Result<(), ConduitError> {
        if !radius_mm.is_finite() || radius_mm <= 0.0 {
            return Err(ConduitError::InvalidConduit { radius_mm });
        }
        if radius_mm < self.min_mm || radius_mm > self.max_mm {
            return Err(ConduitError::RadiusOutOfRange {
                radius_mm,
                min_mm: self.min_mm,
                max_mm: self.max_mm,
            });
        }
        Ok(())
    }
}

/// Settings for a [`Session`](crate::Session).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Conduit radius at start-up and after a reset.
    pub default_radius_mm: f64,
    /// Radii accepted by resize commands.
    pub radius_bounds_mm: RadiusBounds,
    /// Rule selecting the maximum fill.
    pub threshold: ThresholdPolicy,
    /// Optional warning band below the limit, in percentage points.
    pub warning_band_percent: Option<f64>,
    /// Outer diameter of each cable variant.
    pub catalog: CableCatalog,
    /// Initial drawing colours.
    pub palette: Palette,
    /// Overlap or wall penetration tolerated by packing inspection, in millimetres.
    pub packing_tolerance_mm: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            default_radius_mm: 300.0,
            radius_bounds_mm: RadiusBounds::default(),
            threshold: ThresholdPolicy::default(),
            warning_band_percent: None,
            catalog: CableCatalog::default(),
            palette: Palette::default(),
            packing_tolerance_mm: 0.5,
        }
    }
}

impl SimulatorConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`]
    /// when a value fails [`SimulatorConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the errors of
    /// [`SimulatorConfig::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialise the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if serialisation fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set the start-up radius.
    #[must_use]
    pub fn with_default_radius(mut self, radius_mm: f64) -> Self {
        self.default_radius_mm = radius_mm;
        self
    }

    /// Set the accepted radius range.
    #[must_use]
    pub fn with_radius_bounds(mut self, min_mm: f64, max_mm: f64) -> Self {
        self.radius_bounds_mm = RadiusBounds { min_mm, max_mm };
        self
    }

    /// Set the threshold rule.
    #[must_use]
    pub fn with_threshold(mut self, threshold: ThresholdPolicy) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the warning band below the limit.
    #[must_use]
    pub fn with_warning_band(mut self, band_percent: f64) -> Self {
        self.warning_band_percent = Some(band_percent);
        self
    }

    /// Set the cable catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: CableCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Evaluator built from the threshold and warning band.
    #[must_use]
    pub fn evaluator(&self) -> ComplianceEvaluator {
        let evaluator = ComplianceEvaluator::new(self.threshold);
        match self.warning_band_percent {
            Some(band) => evaluator.with_warning_band(band),
            None => evaluator,
        }
    }

    /// Check that every value is physically meaningful.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bounds = self.radius_bounds_mm;
        if !(bounds.min_mm.is_finite() && bounds.min_mm > 0.0) {
            return Err(invalid(format!(
                "minimum radius must be positive (received {})",
                bounds.min_mm
            )));
        }
        if !(bounds.max_mm.is_finite() && bounds.max_mm >= bounds.min_mm) {
            return Err(invalid(format!(
                "maximum radius {} must not be below minimum radius {}",
                bounds.max_mm, bounds.min_mm
            )));
        }
        bounds
            .check(self.default_radius_mm)
            .map_err(|error| invalid(format!("default radius: {error}")))?;
        for limit in self.threshold.limits() {
            if !(limit.is_finite() && limit > 0.0 && limit <= 100.0) {
                return Err(invalid(format!(
                    "fill limits must lie in (0, 100] percent (received {limit})"
                )));
            }
        }
        if let Some(band) = self.warning_band_percent {
            if !(band.is_finite() && band >= 0.0) {
                return Err(invalid(format!(
                    "warning band must be non-negative (received {band})"
                )));
            }
        }
        for cable_type in CableType::ALL {
            let diameter = self.catalog.diameter_mm(cable_type);
            if !(diameter.is_finite() && diameter > 0.0) {
                return Err(invalid(format!(
                    "{cable_type} cable diameter must be positive (received {diameter})"
                )));
            }
        }
        if !(self.packing_tolerance_mm.is_finite() && self.packing_tolerance_mm >= 0.0) {
            return Err(invalid(format!(
                "packing tolerance must be non-negative (received {})",
                self.packing_tolerance_mm
            )));
        }
        Ok(())
    }
}

/// Shorthand for [`ConfigError::Invalid`].
fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}
