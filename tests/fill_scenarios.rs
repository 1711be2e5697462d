#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use conduitfill::{
    compute, compute_for, point, CableCatalog, CableId, CableRegistry, CableType, Command,
    Compliance, Conduit, NullWorld, Session, SimulatorConfig, ThresholdPolicy, INITIAL_CABLE_ID,
};

/// Diameter of a cable whose cross-section is 500 mm^2.
fn diameter_for_500_mm2() -> f64 {
    2.0 * (500.0 / std::f64::consts::PI).sqrt()
}

fn registry_with_singles(count: usize) -> CableRegistry {
    let mut registry = CableRegistry::new(CableCatalog::uniform(diameter_for_500_mm2()));
    for idx in 0..count {
        registry.add(CableType::Single, point(idx as f64, 0.0));
    }
    registry
}

fn conduit(radius_mm: f64) -> Conduit {
    Conduit::from_radius_mm(radius_mm).expect("positive radius")
}

#[test]
fn add_then_remove_restores_snapshot() {
    let mut registry = registry_with_singles(2);
    let before = registry.list();

    let added = vec![
        registry.add(CableType::ThreeCore, point(1.0, 1.0)),
        registry.add(CableType::FourCore, point(2.0, 2.0)),
    ];
    assert_eq!(registry.len(), 4);
    assert_eq!(registry.remove(added.clone()), added);
    assert_eq!(registry.list(), before);
}

#[test]
fn clear_restarts_identifiers() {
    let mut registry = registry_with_singles(5);
    registry.clear();
    assert!(registry.list().is_empty());
    assert_eq!(
        registry.add(CableType::Single, point(0.0, 0.0)),
        CableId::new(INITIAL_CABLE_ID)
    );
}

#[test]
fn fill_ignores_cable_order() {
    let catalog = CableCatalog::uniform(12.0)
        .with_diameter(CableType::ThreeCore, 31.0)
        .with_diameter(CableType::FourCore, 47.0);
    let mut registry = CableRegistry::new(catalog);
    for cable_type in [
        CableType::FourCore,
        CableType::Single,
        CableType::ThreeCore,
        CableType::Single,
        CableType::FourCore,
    ] {
        registry.add(cable_type, point(0.0, 0.0));
    }
    let conduit = conduit(80.0);
    let forward = compute(&registry, &conduit).expect("valid conduit");

    let cables = registry.list();
    let reversed = compute_for(cables.iter().rev(), &conduit).expect("valid conduit");
    assert_relative_eq!(forward.fill_percent, reversed.fill_percent, epsilon = 1.0e-12);
    assert_eq!(forward.cable_count, reversed.cable_count);
}

#[test]
fn empty_conduit_is_compliant() {
    let fill = compute(&CableRegistry::default(), &conduit(50.0)).expect("valid conduit");
    assert_eq!(fill.fill_percent, 0.0);
    let verdict = ThresholdPolicy::default().evaluate(&fill).expect("valid fill");
    assert_eq!(verdict.status, Compliance::Compliant);
    assert_relative_eq!(verdict.margin_percent, 40.0);

    let by_count = ThresholdPolicy::as_nzs_3000().evaluate(&fill).expect("valid fill");
    assert_eq!(by_count.status, Compliance::Compliant);
}

#[test]
fn three_cables_fill_about_nineteen_percent() {
    let conduit = conduit(50.0);
    assert_relative_eq!(conduit.area_mm2(), 7_853.98, epsilon = 0.01);

    let fill = compute(&registry_with_singles(3), &conduit).expect("valid conduit");
    assert_relative_eq!(fill.total_cable_area_mm2, 1_500.0, epsilon = 1.0e-9);
    assert_relative_eq!(fill.fill_percent, 19.1, epsilon = 0.01);

    let verdict = ThresholdPolicy::default().evaluate(&fill).expect("valid fill");
    assert_eq!(verdict.status, Compliance::Compliant);
    assert!(verdict.margin_percent > 20.0);
}

#[test]
fn seven_cables_exceed_forty_percent() {
    let fill = compute(&registry_with_singles(7), &conduit(50.0)).expect("valid conduit");
    assert_relative_eq!(fill.total_cable_area_mm2, 3_500.0, epsilon = 1.0e-9);
    assert_relative_eq!(fill.fill_percent, 44.56, epsilon = 0.01);

    let verdict = ThresholdPolicy::default().evaluate(&fill).expect("valid fill");
    assert_eq!(verdict.status, Compliance::NonCompliant);
    assert_relative_eq!(verdict.margin_percent, 40.0 - fill.fill_percent);
}

#[test]
fn shrinking_the_conduit_raises_the_fill() {
    let mut session = Session::new(
        SimulatorConfig::default()
            .with_default_radius(50.0)
            .with_radius_bounds(10.0, 500.0)
            .with_catalog(CableCatalog::uniform(diameter_for_500_mm2())),
    )
    .expect("valid configuration");
    for _ in 0..3 {
        session
            .apply(
                Command::SpawnCable {
                    cable_type: CableType::Single,
                    position: point(0.0, 0.0),
                },
                &mut NullWorld,
            )
            .expect("spawn succeeds");
    }
    let wide = session.fill_result().expect("fill available");
    session
        .apply(Command::ResizeConduit { radius_mm: 25.0 }, &mut NullWorld)
        .expect("resize succeeds");
    let narrow = session.fill_result().expect("fill available");

    assert!(narrow.fill_percent > wide.fill_percent);
    // Halving the radius quarters the area.
    assert_relative_eq!(narrow.fill_percent, 4.0 * wide.fill_percent, epsilon = 1.0e-9);
    assert_eq!(
        session.compliance_verdict().expect("verdict available").status,
        Compliance::NonCompliant
    );
}

#[test]
fn removing_unknown_cable_is_a_no_op() {
    let mut registry = registry_with_singles(3);
    let before = registry.list();
    assert!(registry.remove([CableId::new(1_000)]).is_empty());
    assert_eq!(registry.list(), before);
}
