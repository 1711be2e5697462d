//! Geometric inspection of settled cable positions.
//!
//! The fill percentage only looks at areas. This module checks the layout reported
//! by the simulation: cables poking through the conduit wall, cables overlapping
//! each other, and how the cables group into touching bundles.

use std::collections::HashSet;

use log::warn;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Dfs;
use serde::Serialize;

use crate::cable::{Cable, CableId};
use crate::conduit::Conduit;
use crate::registry::CableRegistry;

/// Two cables whose sheaths intersect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Overlap {
    /// Lower identifier of the pair.
    pub first: CableId,
    /// Higher identifier of the pair.
    pub second: CableId,
    /// How far the sheaths penetrate each other, in millimetres.
    pub depth_mm: f64,
}

/// Result of [`inspect`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PackingReport {
    /// Cables extending past the conduit wall, in id order.
    pub outside: Vec<CableId>,
    /// Intersecting pairs, ordered by the first and then the second id.
    pub overlaps: Vec<Overlap>,
    /// Groups of cables connected through contacts, each group in id order.
    pub bundles: Vec<Vec<CableId>>,
}

impl PackingReport {
    /// Whether no cable is outside the wall and no pair overlaps.
    #[must_use]
    pub fn is_physical(&self) -> bool {
        self.outside.is_empty() && self.overlaps.is_empty()
    }
}

/// Inspect the layout of every cable in `registry` inside `conduit`.
///
/// Two cables are in contact when the gap between their sheaths is at most
/// `tolerance_mm`, and overlap when they penetrate by more than `tolerance_mm`.
#[must_use]
pub fn inspect(registry: &CableRegistry, conduit: &Conduit, tolerance_mm: f64) -> PackingReport {
    let cables: Vec<&Cable> = registry.iter().collect();
    let mut graph: UnGraph<CableId, f64> = UnGraph::with_capacity(cables.len(), cables.len());
    let nodes: Vec<NodeIndex> = cables.iter().map(|cable| graph.add_node(cable.id())).collect();

    let outside: Vec<CableId> = cables
        .iter()
        .filter(|cable| {
            !conduit.contains_circle(cable.position(), cable.outer_radius_mm(), tolerance_mm)
        })
        .map(|cable| cable.id())
        .collect();

    let mut overlaps = Vec::new();
    for (i, first) in cables.iter().enumerate() {
        for (j, second) in cables.iter().enumerate().skip(i + 1) {
            let reach = first.outer_radius_mm() + second.outer_radius_mm();
            let gap = first.position().distance_to(second.position()) - reach;
            if gap <= tolerance_mm {
                graph.add_edge(nodes[i], nodes[j], gap);
            }
            if -gap > tolerance_mm {
                overlaps.push(Overlap {
                    first: first.id(),
                    second: second.id(),
                    depth_mm: -gap,
                });
            }
        }
    }

    if !overlaps.is_empty() || !outside.is_empty() {
        warn!(
            "non-physical packing: {} overlap(s), {} cable(s) outside the wall",
            overlaps.len(),
            outside.len()
        );
    }

    PackingReport {
        outside,
        overlaps,
        bundles: bundles(&graph, &nodes),
    }
}

/// Connected components of the contact graph, visited in node order.
fn bundles(graph: &UnGraph<CableId, f64>, nodes: &[NodeIndex]) -> Vec<Vec<CableId>> {
    let mut seen = HashSet::new();
    let mut groups = Vec::new();
    for &start in nodes {
        if seen.contains(&start) {
            continue;
        }
        let mut group = Vec::new();
        let mut dfs = Dfs::new(graph, start);
        while let Some(node) = dfs.next(graph) {
            seen.insert(node);
            group.push(graph[node]);
        }
        group.sort_unstable();
        groups.push(group);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cable::{CableCatalog, CableType};
    use crate::geometry::point;

    fn registry_with(positions: &[(f64, f64)]) -> (CableRegistry, Vec<CableId>) {
        let mut registry = CableRegistry::new(CableCatalog::uniform(20.0));
        let ids = positions
            .iter()
            .map(|&(x, y)| registry.add(CableType::Single, point(x, y)))
            .collect();
        (registry, ids)
    }

    #[test]
    fn touching_cables_form_one_bundle() {
        let (registry, ids) = registry_with(&[(0.0, 80.0), (20.0, 80.0), (-20.0, 80.0)]);
        let conduit = Conduit::from_radius_mm(100.0).expect("valid radius");
        let report = inspect(&registry, &conduit, 0.1);
        assert!(report.is_physical());
        assert_eq!(report.bundles.len(), 1);
        assert_eq!(report.bundles[0], ids);
    }

    #[test]
    fn separated_cables_form_separate_bundles() {
        let (registry, ids) = registry_with(&[(-50.0, 0.0), (50.0, 0.0)]);
        let conduit = Conduit::from_radius_mm(100.0).expect("valid radius");
        let report = inspect(&registry, &conduit, 0.1);
        assert_eq!(report.bundles, vec![vec![ids[0]], vec![ids[1]]]);
    }

    #[test]
    fn overlaps_and_wall_penetration_are_reported() {
        let (registry, ids) = registry_with(&[(0.0, 0.0), (5.0, 0.0), (0.0, 95.0)]);
        let conduit = Conduit::from_radius_mm(100.0).expect("valid radius");
        let report = inspect(&registry, &conduit, 0.1);
        assert!(!report.is_physical());
        assert_eq!(report.outside, vec![ids[2]]);
        assert_eq!(report.overlaps.len(), 1);
        let overlap = report.overlaps[0];
        assert_eq!((overlap.first, overlap.second), (ids[0], ids[1]));
        assert!((overlap.depth_mm - 15.0).abs() < 1.0e-9);
    }

    #[test]
    fn empty_registry_is_physical() {
        let registry = CableRegistry::default();
        let conduit = Conduit::from_radius_mm(100.0).expect("valid radius");
        let report = inspect(&registry, &conduit, 0.0);
        assert!(report.is_physical());
        assert!(report.bundles.is_empty());
    }
}
