use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::catalog::{Catalog, KindId, UnknownKind};
use crate::footprint::{Anchor, Footprint, Rotation};
use crate::grid::{Cell, Grid};
use crate::registry::{CenterRegistry, PlacedObject};

/// Why a footprint could not be committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("cell ({x}, {y}) is already occupied by {occupant}")]
    Overlap { x: i32, y: i32, occupant: KindId },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error(transparent)]
    UnknownKind(#[from] UnknownKind),
    #[error("cannot place here: {0}")]
    Rejected(Rejection),
}

/// An editing session: catalog, occupancy grid and registry of placed objects.
///
/// All mutation goes through [`Layout::try_place`] and [`Layout::delete`], which
/// keep the grid and the registry consistent: every registry entry's footprint
/// is marked on the grid, and every marked cell belongs to a registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    catalog: Catalog,
    grid: Grid,
    registry: CenterRegistry,
}

impl Layout {
    /// Creates an empty `rows × cols` layout.
    pub fn new(catalog: Catalog, rows: usize, cols: usize) -> Self {
        Layout {
            catalog,
            grid: Grid::new(rows, cols),
            registry: CenterRegistry::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn registry(&self) -> &CenterRegistry {
        &self.registry
    }

    /// Checks whether `kind` fits at `anchor` without changing anything.
    ///
    /// Cells covered by the object already anchored at `anchor` count as free,
    /// since [`Layout::try_place`] vacates it first.
    pub fn can_place(
        &self,
        anchor: Anchor,
        kind: &str,
        rotation: Rotation,
    ) -> Result<Footprint, PlacementError> {
        let footprint = self.catalog.footprint(kind, rotation, anchor)?;
        let replaced = self
            .registry
            .get(anchor)
            .and_then(|p| p.footprint(&self.catalog).ok());
        self.validate(footprint, replaced)
            .map_err(PlacementError::Rejected)?;
        Ok(footprint)
    }

    /// Places `kind` centered on `anchor`.
    ///
    /// An object already anchored at `anchor` is vacated and dropped before the
    /// new footprint is validated, and stays gone if validation fails. Apart
    /// from that, a rejected placement leaves the layout untouched.
    #[instrument(skip(self), fields(x = anchor.x, y = anchor.y))]
    pub fn try_place(
        &mut self,
        anchor: Anchor,
        kind: &str,
        rotation: Rotation,
    ) -> Result<PlacedObject, PlacementError> {
        let (footprint, elevation) = match self.catalog.get(kind) {
            Some(k) => (k.footprint(rotation, anchor), k.elevation),
            None => {
                debug!("unknown kind, nothing placed");
                return Err(UnknownKind(kind.to_string()).into());
            }
        };

        if let Some(previous) = self.vacate(anchor) {
            debug!(previous = %previous.kind, "replacing object at anchor");
        }

        if let Err(rejection) = self.validate(footprint, None) {
            debug!(%rejection, "placement rejected");
            return Err(PlacementError::Rejected(rejection));
        }

        for (x, y) in footprint.cells() {
            // In bounds: checked by validate
            let _ = self.grid.set(x, y, kind, rotation);
        }

        let placed = PlacedObject {
            kind: kind.to_string(),
            anchor,
            elevation,
            rotation,
        };
        self.registry.upsert(placed.clone());
        debug!(cells = footprint.area(), "placed");
        Ok(placed)
    }

    /// The object whose footprint contains `(x, y)`.
    pub fn select(&self, x: i32, y: i32) -> Option<&PlacedObject> {
        self.registry.find_by_hit(&self.catalog, x, y)
    }

    /// Removes the object anchored at `anchor` and clears its footprint.
    #[instrument(skip(self), fields(x = anchor.x, y = anchor.y))]
    pub fn delete(&mut self, anchor: Anchor) -> Option<PlacedObject> {
        let removed = self.vacate(anchor);
        match &removed {
            Some(placed) => debug!(kind = %placed.kind, "deleted"),
            None => debug!("no object at anchor"),
        }
        removed
    }

    /// Removes the object whose footprint contains `(x, y)`.
    pub fn delete_at(&mut self, x: i32, y: i32) -> Option<PlacedObject> {
        let anchor = self.select(x, y)?.anchor;
        self.delete(anchor)
    }

    /// Clears the footprint of the object at `anchor`, then drops its entry.
    fn vacate(&mut self, anchor: Anchor) -> Option<PlacedObject> {
        let placed = self.registry.get(anchor)?;
        match placed.footprint(&self.catalog) {
            Ok(footprint) => {
                for (x, y) in footprint.cells() {
                    // Cells outside the grid are skipped
                    let _ = self.grid.clear(x, y);
                }
            }
            Err(err) => {
                warn!(%err, "placed object has no footprint, clearing anchor only");
                let _ = self.grid.clear(anchor.x, anchor.y);
            }
        }
        self.registry.remove(anchor)
    }

    /// Scans every cell of `footprint`, ignoring cells inside `ignore`.
    fn validate(&self, footprint: Footprint, ignore: Option<Footprint>) -> Result<(), Rejection> {
        for (x, y) in footprint.cells() {
            match self.grid.get(x, y) {
                None => return Err(Rejection::OutOfBounds { x, y }),
                Some(Cell::Occupied { kind, .. })
                    if !ignore.is_some_and(|f| f.contains(x, y)) =>
                {
                    return Err(Rejection::Overlap {
                        x,
                        y,
                        occupant: kind.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}
