//! Control-thread state: the registry, the conduit and the commands that mutate them.
//!
//! A [`Session`] is owned by a single control thread. The presentation layer sends
//! [`Command`]s and reads queries; the physics layer reports [`WorldEvent`]s and
//! receives calls through the [`World`] trait. Every command takes effect before
//! it returns, so the next query always sees the new state.

use std::collections::BTreeSet;

use log::{debug, warn};

use crate::cable::{Cable, CableId, CableType};
use crate::compliance::{ComplianceEvaluator, ComplianceVerdict};
use crate::conduit::Conduit;
use crate::config::SimulatorConfig;
use crate::errors::{ConfigError, SessionError};
use crate::fill::{compute, FillResult};
use crate::geometry::Point;
use crate::packing::{inspect, PackingReport};
use crate::palette::{ColorTarget, Palette, Rgb};
use crate::registry::CableRegistry;

/// Physics world that owns the bodies for each cable.
///
/// Implementations must not call back into the [`Session`] from these methods.
pub trait World {
    /// Create a body for a newly registered cable.
    fn spawn_in_world(&mut self, cable: &Cable);
    /// Destroy the body of a cable that left the registry.
    fn remove_from_world(&mut self, id: CableId);
    /// Rebuild the conduit wall at a new radius.
    fn resize_boundary(&mut self, radius_mm: f64);
}

/// [`World`] that ignores every call, for sessions without a physics engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullWorld;

impl World for NullWorld {
    fn spawn_in_world(&mut self, _cable: &Cable) {}

    fn remove_from_world(&mut self, _id: CableId) {}

    fn resize_boundary(&mut self, _radius_mm: f64) {}
}

/// User command issued by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Add a cable of the given type at a position.
    SpawnCable {
        /// Variant to spawn.
        cable_type: CableType,
        /// Initial centre.
        position: Point,
    },
    /// Remove the listed cables; unknown identifiers are ignored.
    RemoveCables(BTreeSet<CableId>),
    /// Remove every cable and restart identifier allocation.
    ResetView,
    /// Change the conduit radius.
    ResizeConduit {
        /// New internal radius in millimetres.
        radius_mm: f64,
    },
    /// Change the conduit diameter.
    ResizeConduitDiameter {
        /// New internal diameter in millimetres.
        diameter_mm: f64,
    },
    /// Change one drawing colour.
    SetColor {
        /// Part of the drawing to recolour.
        target: ColorTarget,
        /// New colour.
        color: Rgb,
    },
}

/// What a successfully applied [`Command`] changed.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// A cable was added with this identifier.
    Spawned(CableId),
    /// These cables were removed, in id order.
    Removed(Vec<CableId>),
    /// The registry was emptied; this many cables were removed.
    Reset {
        /// Number of cables removed.
        removed: usize,
    },
    /// The conduit now has this radius.
    Resized {
        /// New internal radius in millimetres.
        radius_mm: f64,
    },
    /// A colour was replaced.
    Recolored {
        /// Colour that was replaced.
        previous: Rgb,
    },
}

/// Notification from the physics world.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WorldEvent {
    /// A cable body came to rest.
    CableSettled {
        /// Cable that moved.
        id: CableId,
        /// New centre.
        position: Point,
        /// New body rotation in radians.
        angle: f64,
    },
    /// A cable body left the world on its own, for example by falling out of bounds.
    CableRemovedFromWorld(CableId),
}

/// Registry, conduit and colours owned by the control thread.
#[derive(Clone, Debug)]
pub struct Session {
    /// Settings the session was built from.
    config: SimulatorConfig,
    /// Active cables.
    registry: CableRegistry,
    /// Current conduit.
    conduit: Conduit,
    /// Current drawing colours.
    palette: Palette,
    /// Evaluator derived from the configuration.
    evaluator: ComplianceEvaluator,
}

impl Session {
    /// Create an empty session from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `config` fails validation.
    ///
    /// # Examples
    /// ```
    /// use conduitfill::{Command, CableType, NullWorld, Session, SimulatorConfig, point};
    ///
    /// let mut session = Session::new(SimulatorConfig::default()).expect("valid config");
    /// session
    ///     .apply(
    ///         Command::SpawnCable { cable_type: CableType::Single, position: point(0.0, 0.0) },
    ///         &mut NullWorld,
    ///     )
    ///     .expect("spawn succeeds");
    /// assert_eq!(session.list_cables().len(), 1);
    /// ```
    pub fn new(config: SimulatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let conduit = Conduit::from_radius_mm(config.default_radius_mm)
            .map_err(|error| ConfigError::Invalid(error.to_string()))?;
        Ok(Self {
            registry: CableRegistry::new(config.catalog),
            conduit,
            palette: config.palette,
            evaluator: config.evaluator(),
            config,
        })
    }

    /// Configuration the session was built from.
    #[must_use]
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Active cables.
    #[must_use]
    pub fn registry(&self) -> &CableRegistry {
        &self.registry
    }

    /// Current conduit.
    #[must_use]
    pub fn conduit(&self) -> &Conduit {
        &self.conduit
    }

    /// Current drawing colours.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Apply a user command and forward the resulting changes to `world`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Conduit`] when a resize names a radius that is not
    /// positive or lies outside the configured bounds; the session is unchanged.
    pub fn apply<W: World>(
        &mut self,
        command: Command,
        world: &mut W,
    ) -> Result<CommandOutcome, SessionError> {
        match command {
            Command::SpawnCable {
                cable_type,
                position,
            } => {
                let id = self.registry.add(cable_type, position);
                if let Some(cable) = self.registry.get(id) {
                    world.spawn_in_world(cable);
                }
                Ok(CommandOutcome::Spawned(id))
            }
            Command::RemoveCables(ids) => {
                let removed = self.registry.remove(ids);
                for &id in &removed {
                    world.remove_from_world(id);
                }
                Ok(CommandOutcome::Removed(removed))
            }
            Command::ResetView => {
                let ids = self.registry.ids();
                for &id in &ids {
                    world.remove_from_world(id);
                }
                self.registry.clear();
                Ok(CommandOutcome::Reset {
                    removed: ids.len(),
                })
            }
            Command::ResizeConduit { radius_mm } => self.resize(radius_mm, world),
            Command::ResizeConduitDiameter { diameter_mm } => self.resize(diameter_mm / 2.0, world),
            Command::SetColor { target, color } => {
                let previous = self.palette.set(target, color);
                debug!("{target:?} colour changed from {previous} to {color}");
                Ok(CommandOutcome::Recolored { previous })
            }
        }
    }

    /// Validate and apply a new conduit radius.
    fn resize<W: World>(
        &mut self,
        radius_mm: f64,
        world: &mut W,
    ) -> Result<CommandOutcome, SessionError> {
        self.config.radius_bounds_mm.check(radius_mm)?;
        self.conduit.resize_mm(radius_mm)?;
        debug!("conduit resized to {radius_mm:.1} mm radius");
        world.resize_boundary(radius_mm);
        Ok(CommandOutcome::Resized { radius_mm })
    }

    /// Consume a notification from the physics world.
    ///
    /// Returns `false` when the event names a cable that is no longer registered.
    pub fn handle(&mut self, event: WorldEvent) -> bool {
        match event {
            WorldEvent::CableSettled {
                id,
                position,
                angle,
            } => self.registry.settle(id, position, angle),
            WorldEvent::CableRemovedFromWorld(id) => {
                let removed = !self.registry.remove([id]).is_empty();
                if !removed {
                    warn!("world removed unknown cable {id}");
                }
                removed
            }
        }
    }

    /// Snapshot of the active cables in creation order.
    #[must_use]
    pub fn list_cables(&self) -> Vec<Cable> {
        self.registry.list()
    }

    /// Fill of the current conduit by the current cables.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Conduit`] if the conduit area is not positive.
    pub fn fill_result(&self) -> Result<FillResult, SessionError> {
        Ok(compute(&self.registry, &self.conduit)?)
    }

    /// Compliance of the current fill.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Session::fill_result`] and [`SessionError::Compliance`]
    /// when the fill cannot be judged.
    pub fn compliance_verdict(&self) -> Result<ComplianceVerdict, SessionError> {
        let fill = self.fill_result()?;
        Ok(self.evaluator.evaluate(&fill)?)
    }

    /// Geometric inspection of the settled layout.
    #[must_use]
    pub fn packing_report(&self) -> PackingReport {
        inspect(
            &self.registry,
            &self.conduit,
            self.config.packing_tolerance_mm,
        )
    }

    /// Position inside the spawn band for a new cable of `cable_type`.
    ///
    /// `fraction` runs from `-1.0` at the left edge of the band to `1.0` at the right edge.
    #[must_use]
    pub fn spawn_point(&self, cable_type: CableType, fraction: f64) -> Point {
        let radius = self.registry.catalog().diameter_mm(cable_type) / 2.0;
        self.conduit.spawn_window(radius).point_at(fraction)
    }
}
