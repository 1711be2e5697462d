#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod cable;
pub mod compliance;
pub mod conduit;
pub mod config;
pub mod errors;
pub mod fill;
pub mod geometry;
pub mod packing;
pub mod palette;
pub mod registry;
pub mod report;
pub mod session;

pub use cable::{Cable, CableCatalog, CableId, CableType, CoreGeometry};
pub use compliance::{
    Compliance, ComplianceEvaluator, ComplianceVerdict, ThresholdPolicy, DEFAULT_MAX_FILL_PERCENT,
};
pub use conduit::{Conduit, SpawnWindow};
pub use config::{RadiusBounds, SimulatorConfig};
pub use errors::{ComplianceError, ConduitError, ConfigError, SessionError};
pub use fill::{compute, compute_for, FillResult};
pub use geometry::{circle_area, point, Point};
pub use packing::{inspect, Overlap, PackingReport};
pub use palette::{ColorTarget, Palette, Rgb};
pub use registry::{CableRegistry, INITIAL_CABLE_ID};
pub use report::{render_summary, Summary, TypeCount};
pub use session::{Command, CommandOutcome, NullWorld, Session, World, WorldEvent};
