use conduitfill::{point, CableCatalog, CableRegistry, CableType, Conduit, ThresholdPolicy};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let conduit = Conduit::from_diameter_mm(100.0)?;
    let mut registry = CableRegistry::new(CableCatalog::uniform(40.0));
    let policy = ThresholdPolicy::as_nzs_3000();

    // The allowed fill changes as the second and third cables go in
    for _ in 0..3 {
        registry.add(CableType::Single, point(0.0, 0.0));
        let fill = conduitfill::compute(&registry, &conduit)?;
        let verdict = policy.evaluate(&fill)?;
        println!(
            "{} cable(s): fill {:.1}% against {:.0}% -> {}",
            fill.cable_count,
            verdict.fill_percent,
            verdict.limit_percent,
            verdict.status.label()
        );
    }

    Ok(())
}
