use conduitfill::{
    render_summary, CableType, Command, NullWorld, Session, SimulatorConfig, Summary, WorldEvent,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Start from the default 300 mm conduit and catalog
    let mut session = Session::new(SimulatorConfig::default())?;
    let mut world = NullWorld;

    // Spawn a mix of cables across the top of the conduit
    let cables = [
        (CableType::Single, -1.0),
        (CableType::ThreeCore, 0.0),
        (CableType::FourCore, 1.0),
    ];
    for (cable_type, fraction) in cables {
        let position = session.spawn_point(cable_type, fraction);
        session.apply(
            Command::SpawnCable {
                cable_type,
                position,
            },
            &mut world,
        )?;
    }

    // Pretend the physics engine let them fall to the bottom of the conduit
    let resting = session
        .list_cables()
        .into_iter()
        .map(|cable| {
            let reach = session.conduit().radius_mm() - cable.outer_radius_mm();
            let x = cable.position().x;
            let y = (reach * reach - x * x).max(0.0).sqrt();
            WorldEvent::CableSettled {
                id: cable.id(),
                position: conduitfill::point(x, y),
                angle: 0.0,
            }
        })
        .collect::<Vec<_>>();
    for event in resting {
        session.handle(event);
    }

    // Print the fill, the verdict and the layout check
    print!("{}", render_summary(&Summary::from_session(&session)?));

    Ok(())
}
