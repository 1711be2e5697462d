//! Compliance of a conduit fill against a maximum fill limit.

use serde::{Deserialize, Serialize};

use crate::errors::ComplianceError;
use crate::fill::FillResult;

/// Canonical maximum fill for three or more cables, in percent.
pub const DEFAULT_MAX_FILL_PERCENT: f64 = 40.0;

/// Outcome of a compliance check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compliance {
    /// Fill is at or below the limit.
    Compliant,
    /// Fill is at or below the limit but inside the configured warning band.
    Warning,
    /// Fill exceeds the limit.
    NonCompliant,
}

impl Compliance {
    /// Whether the fill is at or below the limit.
    #[must_use]
    pub const fn is_within_limit(self) -> bool {
        matches!(self, Compliance::Compliant | Compliance::Warning)
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Compliance::Compliant => "Compliant",
            Compliance::Warning => "Compliant (near limit)",
            Compliance::NonCompliant => "Non-Compliant",
        }
    }
}

/// Rule used to pick the maximum allowed fill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdPolicy {
    /// One limit regardless of how many cables share the conduit.
    Fixed {
        /// Maximum fill in percent.
        max_fill_percent: f64,
    },
    /// Limit depending on the number of cables, as in simplified AS/NZS 3000 tables.
    ///
    /// An empty conduit is limited to 100 %.
    ByCableCount {
        /// Maximum fill for a single cable, in percent.
        one: f64,
        /// Maximum fill for two cables, in percent.
        two: f64,
        /// Maximum fill for three or more cables, in percent.
        three_or_more: f64,
    },
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        ThresholdPolicy::Fixed {
            max_fill_percent: DEFAULT_MAX_FILL_PERCENT,
        }
    }
}

impl ThresholdPolicy {
    /// Simplified AS/NZS 3000 limits: 53 % for one cable, 31 % for two, 40 % beyond.
    #[must_use]
    pub const fn as_nzs_3000() -> Self {
        ThresholdPolicy::ByCableCount {
            one: 53.0,
            two: 31.0,
            three_or_more: 40.0,
        }
    }

    /// Maximum allowed fill in percent for `cable_count` cables.
    #[must_use]
    pub fn limit_percent(&self, cable_count: usize) -> f64 {
        match *self {
            ThresholdPolicy::Fixed { max_fill_percent } => max_fill_percent,
            ThresholdPolicy::ByCableCount {
                one,
                two,
                three_or_more,
            } => match cable_count {
                0 => 100.0,
                1 => one,
                2 => two,
                _ => three_or_more,
            },
        }
    }

    /// Every limit this policy can return, used for validation.
    pub(crate) fn limits(&self) -> Vec<f64> {
        match *self {
            ThresholdPolicy::Fixed { max_fill_percent } => vec![max_fill_percent],
            ThresholdPolicy::ByCableCount {
                one,
                two,
                three_or_more,
            } => vec![one, two, three_or_more],
        }
    }

    /// Judge `fill` against this policy without a warning band.
    ///
    /// # Errors
    ///
    /// Returns [`ComplianceError::InvalidInput`] when `fill` carries negative or
    /// non-finite values.
    pub fn evaluate(&self, fill: &FillResult) -> Result<ComplianceVerdict, ComplianceError> {
        ComplianceEvaluator::new(*self).evaluate(fill)
    }
}

/// Verdict for one fill result.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplianceVerdict {
    /// Pass, warning or fail.
    pub status: Compliance,
    /// Fill that was judged, in percent.
    pub fill_percent: f64,
    /// Limit that applied, in percent.
    pub limit_percent: f64,
    /// `limit - fill` in percentage points; negative when over the limit.
    pub margin_percent: f64,
}

/// Applies a [`ThresholdPolicy`] and an optional warning band to fill results.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ComplianceEvaluator {
    /// Rule selecting the limit.
    policy: ThresholdPolicy,
    /// Width of the warning band below the limit, in percentage points.
    warning_band_percent: Option<f64>,
}

impl ComplianceEvaluator {
    /// Create an evaluator without a warning band.
    #[must_use]
    pub const fn new(policy: ThresholdPolicy) -> Self {
        Self {
            policy,
            warning_band_percent: None,
        }
    }

    /// Flag compliant fills within `band_percent` of the limit as [`Compliance::Warning`].
    #[must_use]
    pub fn with_warning_band(mut self, band_percent: f64) -> Self {
        self.warning_band_percent = Some(band_percent);
        self
    }

    /// Policy in use.
    #[must_use]
    pub const fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    /// Judge `fill` against the limit for its cable count.
    ///
    /// # Errors
    ///
    /// Returns [`ComplianceError::InvalidInput`] when `fill` carries negative or
    /// non-finite values.
    ///
    /// # Examples
    /// ```
    /// use conduitfill::{Compliance, ComplianceEvaluator, FillResult, ThresholdPolicy};
    ///
    /// let fill = FillResult {
    ///     total_cable_area_mm2: 3_500.0,
    ///     conduit_area_mm2: 7_853.98,
    ///     fill_percent: 44.56,
    ///     cable_count: 7,
    /// };
    /// let verdict = ComplianceEvaluator::new(ThresholdPolicy::default())
    ///     .evaluate(&fill)
    ///     .expect("well formed fill");
    /// assert_eq!(verdict.status, Compliance::NonCompliant);
    /// assert!(verdict.margin_percent < 0.0);
    /// ```
    pub fn evaluate(&self, fill: &FillResult) -> Result<ComplianceVerdict, ComplianceError> {
        validate_fill(fill)?;
        let limit_percent = self.policy.limit_percent(fill.cable_count);
        let margin_percent = limit_percent - fill.fill_percent;
        let status = if fill.fill_percent > limit_percent {
            Compliance::NonCompliant
        } else if self
            .warning_band_percent
            .map_or(false, |band| margin_percent < band)
        {
            Compliance::Warning
        } else {
            Compliance::Compliant
        };
        Ok(ComplianceVerdict {
            status,
            fill_percent: fill.fill_percent,
            limit_percent,
            margin_percent,
        })
    }
}

/// Reject fill results that no computation could have produced.
fn validate_fill(fill: &FillResult) -> Result<(), ComplianceError> {
    let checks = [
        ("total cable area", fill.total_cable_area_mm2),
        ("fill percentage", fill.fill_percent),
    ];
    for (name, value) in checks {
        if !value.is_finite() || value < 0.0 {
            return Err(ComplianceError::InvalidInput(format!(
                "{name} must be a non-negative number (received {value})"
            )));
        }
    }
    if !fill.conduit_area_mm2.is_finite() || fill.conduit_area_mm2 <= 0.0 {
        return Err(ComplianceError::InvalidInput(format!(
            "conduit area must be positive (received {})",
            fill.conduit_area_mm2
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn fill(fill_percent: f64, cable_count: usize) -> FillResult {
        FillResult {
            total_cable_area_mm2: fill_percent * 10.0,
            conduit_area_mm2: 1_000.0,
            fill_percent,
            cable_count,
        }
    }

    #[test]
    fn limit_is_inclusive() {
        let verdict = ThresholdPolicy::default()
            .evaluate(&fill(40.0, 5))
            .expect("valid fill");
        assert_eq!(verdict.status, Compliance::Compliant);
        assert_relative_eq!(verdict.margin_percent, 0.0);

        let verdict = ThresholdPolicy::default()
            .evaluate(&fill(40.01, 5))
            .expect("valid fill");
        assert_eq!(verdict.status, Compliance::NonCompliant);
        assert!(!verdict.status.is_within_limit());
    }

    #[test]
    fn by_cable_count_limits() {
        let policy = ThresholdPolicy::as_nzs_3000();
        assert_relative_eq!(policy.limit_percent(0), 100.0);
        assert_relative_eq!(policy.limit_percent(1), 53.0);
        assert_relative_eq!(policy.limit_percent(2), 31.0);
        assert_relative_eq!(policy.limit_percent(3), 40.0);
        assert_relative_eq!(policy.limit_percent(12), 40.0);

        let one = policy.evaluate(&fill(50.0, 1)).expect("valid fill");
        let two = policy.evaluate(&fill(35.0, 2)).expect("valid fill");
        assert_eq!(one.status, Compliance::Compliant);
        assert_eq!(two.status, Compliance::NonCompliant);
    }

    #[test]
    fn warning_band_flags_near_limit_fills() {
        let evaluator = ComplianceEvaluator::new(ThresholdPolicy::default()).with_warning_band(5.0);
        let near = evaluator.evaluate(&fill(37.5, 3)).expect("valid fill");
        let far = evaluator.evaluate(&fill(20.0, 3)).expect("valid fill");
        let over = evaluator.evaluate(&fill(45.0, 3)).expect("valid fill");
        assert_eq!(near.status, Compliance::Warning);
        assert!(near.status.is_within_limit());
        assert_eq!(far.status, Compliance::Compliant);
        assert_eq!(over.status, Compliance::NonCompliant);
    }

    #[test]
    fn malformed_fill_is_rejected() {
        let evaluator = ComplianceEvaluator::default();
        let mut negative = fill(10.0, 1);
        negative.total_cable_area_mm2 = -1.0;
        let mut not_a_number = fill(10.0, 1);
        not_a_number.fill_percent = f64::NAN;
        let mut empty_conduit = fill(10.0, 1);
        empty_conduit.conduit_area_mm2 = 0.0;

        for malformed in [negative, not_a_number, empty_conduit] {
            assert!(matches!(
                evaluator.evaluate(&malformed),
                Err(ComplianceError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn policy_parses_from_tagged_json() {
        let policy: ThresholdPolicy = serde_json::from_str(
            r#"{"kind": "by_cable_count", "one": 53.0, "two": 31.0, "three_or_more": 40.0}"#,
        )
        .expect("valid json");
        assert_eq!(policy, ThresholdPolicy::as_nzs_3000());
    }
}
