//! Ordered store of the cables currently inside the conduit.

use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::cable::{Cable, CableCatalog, CableId, CableType};
use crate::geometry::Point;

/// First identifier handed out by a fresh or cleared registry.
pub const INITIAL_CABLE_ID: u64 = 1;

/// Set of active cables keyed by identifier.
///
/// Identifiers are allocated monotonically and never reused until [`CableRegistry::clear`]
/// resets the counter, so iteration order is insertion order.
#[derive(Clone, Debug)]
pub struct CableRegistry {
    /// Active cables in creation order.
    cables: BTreeMap<CableId, Cable>,
    /// Identifier for the next spawned cable.
    next_id: u64,
    /// Outer diameters assigned to new cables.
    catalog: CableCatalog,
}

impl Default for CableRegistry {
    fn default() -> Self {
        Self::new(CableCatalog::default())
    }
}

impl CableRegistry {
    /// Create an empty registry that sizes new cables from `catalog`.
    ///
    /// # Examples
    /// ```
    /// use conduitfill::{point, CableCatalog, CableRegistry, CableType};
    ///
    /// let mut registry = CableRegistry::new(CableCatalog::uniform(20.0));
    /// let id = registry.add(CableType::Single, point(0.0, 0.0));
    /// assert_eq!(id.value(), 1);
    /// assert_eq!(registry.len(), 1);
    /// ```
    #[must_use]
    pub fn new(catalog: CableCatalog) -> Self {
        Self {
            cables: BTreeMap::new(),
            next_id: INITIAL_CABLE_ID,
            catalog,
        }
    }

    /// Catalog used to size new cables.
    #[must_use]
    pub fn catalog(&self) -> &CableCatalog {
        &self.catalog
    }

    /// Number of active cables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cables.len()
    }

    /// Whether the registry holds no cables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cables.is_empty()
    }

    /// Whether `id` refers to an active cable.
    #[must_use]
    pub fn contains(&self, id: CableId) -> bool {
        self.cables.contains_key(&id)
    }

    /// Look up an active cable.
    #[must_use]
    pub fn get(&self, id: CableId) -> Option<&Cable> {
        self.cables.get(&id)
    }

    /// Add a cable of `cable_type` centred at `position` and return its identifier.
    pub fn add(&mut self, cable_type: CableType, position: Point) -> CableId {
        let id = CableId::new(self.next_id);
        self.next_id += 1;
        let cable = Cable {
            id,
            cable_type,
            outer_diameter_mm: self.catalog.diameter_mm(cable_type),
            position,
            angle: 0.0,
        };
        debug!(
            "added {cable_type} cable {id} ({:.1} mm) at ({:.1}, {:.1})",
            cable.outer_diameter_mm, position.x, position.y
        );
        self.cables.insert(id, cable);
        id
    }

    /// Remove every listed cable and return the ones that were present, in id order.
    ///
    /// Identifiers that are not active are ignored.
    pub fn remove<I>(&mut self, ids: I) -> Vec<CableId>
    where
        I: IntoIterator<Item = CableId>,
    {
        let mut removed: Vec<CableId> = ids
            .into_iter()
            .filter(|id| self.cables.remove(id).is_some())
            .collect();
        removed.sort_unstable();
        if !removed.is_empty() {
            debug!("removed {} cable(s): {removed:?}", removed.len());
        }
        removed
    }

    /// Remove every cable and restart identifier allocation at [`INITIAL_CABLE_ID`].
    pub fn clear(&mut self) {
        debug!("cleared {} cable(s)", self.cables.len());
        self.cables.clear();
        self.next_id = INITIAL_CABLE_ID;
    }

    /// Record a position and rotation reported by the simulation.
    ///
    /// Returns `false` when `id` is not active.
    pub fn settle(&mut self, id: CableId, position: Point, angle: f64) -> bool {
        match self.cables.get_mut(&id) {
            Some(cable) => {
                trace!("cable {id} settled at ({:.1}, {:.1})", position.x, position.y);
                cable.position = position;
                cable.angle = angle;
                true
            }
            None => {
                warn!("settle event for unknown cable {id}");
                false
            }
        }
    }

    /// Iterate over the active cables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Cable> + '_ {
        self.cables.values()
    }

    /// Snapshot of the active cables in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Cable> {
        self.cables.values().cloned().collect()
    }

    /// Identifiers of the active cables in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<CableId> {
        self.cables.keys().copied().collect()
    }
}
