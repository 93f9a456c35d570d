//! ParkCraft is a grid layout engine for placing attractions in a park.
//!
//! Core concepts:
//! - **ObjectKind**: a placeable kind with a base size, elevation and export file-id
//! - **Footprint**: the rectangle of cells a kind covers around its anchor at a given rotation
//! - **Grid**: fixed-size occupancy cells, the ground truth for "is this cell free"
//! - **CenterRegistry**: placed objects keyed by their anchor cell
//! - **Layout**: owns the catalog, grid and registry; places, selects and deletes objects
//!
//! # Example
//!
//! ```
//! use parkcraft_core::{Anchor, Catalog, Layout, Rotation};
//!
//! let mut layout = Layout::new(Catalog::builtin(), 11, 18);
//!
//! // A 3x9 ferris wheel centered on (5, 5)
//! layout
//!     .try_place(Anchor::new(5, 5), "ferriswheel", Rotation::Deg0)
//!     .unwrap();
//! assert!(!layout.grid().is_empty(4, 1));
//! assert!(!layout.grid().is_empty(6, 9));
//!
//! // Any cell of the footprint selects the object
//! let hit = layout.select(6, 9).unwrap();
//! assert_eq!(hit.anchor, Anchor::new(5, 5));
//!
//! // Overlapping placements are rejected
//! assert!(layout
//!     .try_place(Anchor::new(7, 5), "coffeecup", Rotation::Deg0)
//!     .is_err());
//! ```
//!
//! # Export
//!
//! [`export::render`] writes one `file_id,x,-y,z,rotation` line per placed object,
//! followed by a `# random_empty_cells` section sampled from the free cells.
//! Saving goes through an [`ExportTarget`], so a failed or cancelled save never
//! touches the layout.

mod catalog;
pub mod export;
mod footprint;
mod grid;
mod layout;
mod registry;
mod target;

pub use catalog::{Catalog, CatalogError, KindId, ObjectKind, UnknownKind};
pub use export::{ExportOptions, export_to};
pub use footprint::{Anchor, Footprint, InvalidRotation, Rotation};
pub use grid::{Cell, DEFAULT_COLS, DEFAULT_ROWS, Grid, GridError};
pub use layout::{Layout, PlacementError, Rejection};
pub use registry::{CenterRegistry, PlacedObject};
pub use target::{ExportTarget, FileTarget, MemoryTarget, SaveReceipt, TargetError};
