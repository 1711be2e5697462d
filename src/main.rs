use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use conduitfill::{render_summary, CableType, Command, NullWorld, Session, SimulatorConfig, Summary};

/// Compute the fill and compliance of a conduit holding the listed cables.
#[derive(Parser, Debug)]
#[command(name = "conduitfill", version, about)]
struct Args {
    /// JSON configuration file; defaults are used for any missing field.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Internal conduit radius in millimetres.
    #[arg(long, conflicts_with = "diameter")]
    radius: Option<f64>,
    /// Internal conduit diameter in millimetres.
    #[arg(long)]
    diameter: Option<f64>,
    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,
    /// Cables to place in the conduit (single, three or four).
    #[arg(value_name = "CABLE")]
    cables: Vec<CableType>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };
    let mut session = Session::new(config)?;
    let mut world = NullWorld;

    if let Some(radius_mm) = args.radius {
        session.apply(Command::ResizeConduit { radius_mm }, &mut world)?;
    }
    if let Some(diameter_mm) = args.diameter {
        session.apply(Command::ResizeConduitDiameter { diameter_mm }, &mut world)?;
    }

    // Without a physics engine the cables are spread across the spawn band so the
    // layout report is not dominated by stacked duplicates.
    let count = args.cables.len();
    for (idx, &cable_type) in args.cables.iter().enumerate() {
        let fraction = if count > 1 {
            -1.0 + 2.0 * idx as f64 / (count - 1) as f64
        } else {
            0.0
        };
        let position = session.spawn_point(cable_type, fraction);
        session.apply(
            Command::SpawnCable {
                cable_type,
                position,
            },
            &mut world,
        )?;
    }

    let summary = Summary::from_session(&session)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_summary(&summary));
    }

    Ok(())
}
