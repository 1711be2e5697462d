//! Human readable and JSON summaries of a session.

use std::fmt::Write;

use serde::Serialize;

use crate::cable::CableType;
use crate::compliance::ComplianceVerdict;
use crate::errors::SessionError;
use crate::fill::FillResult;
use crate::packing::PackingReport;
use crate::session::Session;

/// How many cables of one variant are in the conduit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TypeCount {
    /// Cable variant.
    pub cable_type: CableType,
    /// Number of active cables of this variant.
    pub count: usize,
    /// Outer diameter of this variant in millimetres.
    pub diameter_mm: f64,
}

/// Everything the report prints, collected from one session snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Internal conduit radius in millimetres.
    pub conduit_radius_mm: f64,
    /// Cable counts per variant, in catalog order.
    pub cables: Vec<TypeCount>,
    /// Areas and fill.
    pub fill: FillResult,
    /// Compliance of the fill.
    pub verdict: ComplianceVerdict,
    /// Layout inspection.
    pub packing: PackingReport,
}

impl Summary {
    /// Collect a summary of the current session state.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Session::compliance_verdict`].
    pub fn from_session(session: &Session) -> Result<Self, SessionError> {
        let registry = session.registry();
        let cables = CableType::ALL
            .iter()
            .map(|&cable_type| TypeCount {
                cable_type,
                count: registry
                    .iter()
                    .filter(|cable| cable.cable_type() == cable_type)
                    .count(),
                diameter_mm: registry.catalog().diameter_mm(cable_type),
            })
            .collect();
        Ok(Self {
            conduit_radius_mm: session.conduit().radius_mm(),
            cables,
            fill: session.fill_result()?,
            verdict: session.compliance_verdict()?,
            packing: session.packing_report(),
        })
    }
}

/// Render a textual report of `summary`.
#[must_use]
pub fn render_summary(summary: &Summary) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Conduit fill (radius = {:.1} mm, diameter = {:.1} mm)",
        summary.conduit_radius_mm,
        2.0 * summary.conduit_radius_mm
    )
    .expect("writing to string cannot fail");

    for entry in summary.cables.iter().filter(|entry| entry.count > 0) {
        writeln!(
            &mut output,
            "  {:>2} x {} cable ({:.1} mm)",
            entry.count, entry.cable_type, entry.diameter_mm
        )
        .expect("writing to string cannot fail");
    }

    let fill = &summary.fill;
    writeln!(
        &mut output,
        "Cable area: {:.1} mm^2 of {:.1} mm^2 ({} cable(s))",
        fill.total_cable_area_mm2, fill.conduit_area_mm2, fill.cable_count
    )
    .expect("writing to string cannot fail");

    let verdict = &summary.verdict;
    writeln!(
        &mut output,
        "Fill: {:.2}% (limit {:.1}%, margin {:+.2} points): {}",
        verdict.fill_percent,
        verdict.limit_percent,
        verdict.margin_percent,
        verdict.status.label()
    )
    .expect("writing to string cannot fail");

    let packing = &summary.packing;
    if packing.is_physical() {
        writeln!(
            &mut output,
            "Layout: {} bundle(s), no overlaps",
            packing.bundles.len()
        )
        .expect("writing to string cannot fail");
    } else {
        writeln!(
            &mut output,
            "Layout: {} overlap(s), {} cable(s) outside the wall",
            packing.overlaps.len(),
            packing.outside.len()
        )
        .expect("writing to string cannot fail");
    }

    output
}
