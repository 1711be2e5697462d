//! Error types produced while editing a conduit layout or evaluating its fill.

use thiserror::Error;

/// Error returned when a conduit radius is rejected.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ConduitError {
    /// Returned when the radius is zero, negative or not finite.
    #[error("conduit radius must be positive (received {radius_mm} mm)")]
    InvalidConduit {
        /// Rejected radius in millimetres.
        radius_mm: f64,
    },
    /// Returned when a resize falls outside the configured radius bounds.
    #[error("conduit radius {radius_mm} mm is outside the allowed range {min_mm}..={max_mm} mm")]
    RadiusOutOfRange {
        /// Requested radius in millimetres.
        radius_mm: f64,
        /// Smallest accepted radius in millimetres.
        min_mm: f64,
        /// Largest accepted radius in millimetres.
        max_mm: f64,
    },
}

/// Error returned when a fill result cannot be judged for compliance.
///
/// # Examples
///
/// ```
/// use conduitfill::{ComplianceError, FillResult, ThresholdPolicy};
///
/// let malformed = FillResult {
///     total_cable_area_mm2: -1.0,
///     conduit_area_mm2: 100.0,
///     fill_percent: -1.0,
///     cable_count: 1,
/// };
/// let error = ThresholdPolicy::default()
///     .evaluate(&malformed)
///     .expect_err("negative area is rejected");
/// assert!(matches!(error, ComplianceError::InvalidInput(_)));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ComplianceError {
    /// Returned when the fill result carries negative or non-finite values.
    #[error("invalid fill result: {0}")]
    InvalidInput(String),
}

/// Error returned when a configuration cannot be loaded or fails validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the configuration is not valid JSON for [`SimulatorConfig`](crate::SimulatorConfig).
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when a parsed value is not physically meaningful.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Error returned by a [`Session`](crate::Session) command or query.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SessionError {
    /// Returned when a resize command carries an unusable radius.
    #[error(transparent)]
    Conduit(#[from] ConduitError),
    /// Returned when the current fill cannot be judged.
    #[error(transparent)]
    Compliance(#[from] ComplianceError),
}
