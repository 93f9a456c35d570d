//! Text export for the 3-D authoring tool.
//!
//! ```text
//! <file-id>,<x>,<-y>,<z>,<rotation>
//! ...
//! # random_empty_cells
//! empty,<x>,<-y>,0,0
//! ...
//! ```
//!
//! The Y axis is negated for the target's coordinate convention.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use crate::grid::Grid;
use crate::layout::Layout;
use crate::target::{ExportTarget, SaveReceipt};

pub const EMPTY_CELLS_HEADER: &str = "# random_empty_cells";
pub const EMPTY_FILE_ID: &str = "empty";
/// Written in place of the file-id of a kind missing from the catalog.
pub const UNKNOWN_FILE_ID: &str = "unknown";
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Export options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Maximum number of empty cells to sample.
    pub sample_size: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// Renders placed objects, in registry order, followed by sampled empty cells.
pub fn render<R: Rng + ?Sized>(layout: &Layout, options: &ExportOptions, rng: &mut R) -> String {
    let mut lines = Vec::with_capacity(layout.registry().len() + options.sample_size + 1);

    for placed in layout.registry() {
        let file_id = layout
            .catalog()
            .file_id(&placed.kind)
            .unwrap_or(UNKNOWN_FILE_ID);
        lines.push(format!(
            "{},{},{},{},{}",
            file_id, placed.anchor.x, -placed.anchor.y, placed.elevation, placed.rotation
        ));
    }

    lines.push(EMPTY_CELLS_HEADER.to_string());

    for (x, y) in sample_empty_cells(layout.grid(), options.sample_size, rng) {
        lines.push(format!("{EMPTY_FILE_ID},{x},{},0,0", -y));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Picks up to `count` distinct empty cells uniformly at random.
///
/// Shuffles every empty cell and keeps the prefix, so each cell is equally
/// likely to be chosen. With fewer than `count` empty cells all are returned.
pub fn sample_empty_cells<R: Rng + ?Sized>(
    grid: &Grid,
    count: usize,
    rng: &mut R,
) -> Vec<(i32, i32)> {
    let mut cells: Vec<_> = grid.empty_cells().collect();
    cells.shuffle(rng);
    cells.truncate(count);
    cells
}

/// Renders `layout` and saves it to `target`.
///
/// The layout is only borrowed, so a failed or cancelled save leaves it as it was.
#[instrument(skip_all, fields(objects = layout.registry().len()))]
pub fn export_to<T, R>(
    layout: &Layout,
    options: &ExportOptions,
    rng: &mut R,
    target: &mut T,
) -> Result<SaveReceipt, T::Error>
where
    T: ExportTarget + ?Sized,
    R: Rng + ?Sized,
{
    let contents = render(layout, options, rng);
    let receipt = target.save(&contents)?;
    debug!(bytes = receipt.bytes, path = ?receipt.path, "export saved");
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ObjectKind};
    use crate::footprint::{Anchor, Rotation};
    use crate::target::MemoryTarget;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn object_records_negate_y() {
        let catalog = Catalog::new([
            ObjectKind::new("tower", 1, 1)
                .with_elevation(2)
                .with_file_id("tower_mesh"),
        ])
        .unwrap();
        let mut layout = Layout::new(catalog, 3, 3);
        layout
            .try_place(Anchor::new(1, 2), "tower", Rotation::Deg270)
            .unwrap();
        layout
            .try_place(Anchor::new(0, 0), "tower", Rotation::Deg0)
            .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let out = render(&layout, &ExportOptions { sample_size: 0 }, &mut rng);
        assert_eq!(
            out,
            "tower_mesh,1,-2,2,270\ntower_mesh,0,0,2,0\n# random_empty_cells\n"
        );
    }

    #[test]
    fn empty_layout_exports_only_samples() {
        let layout = Layout::new(Catalog::builtin(), 11, 18);
        let mut rng = StdRng::seed_from_u64(1);
        let out = render(&layout, &ExportOptions::default(), &mut rng);

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], EMPTY_CELLS_HEADER);
        assert_eq!(lines.len(), 11);
        for line in &lines[1..] {
            let fields: Vec<_> = line.split(',').collect();
            assert_eq!(fields.len(), 5);
            assert_eq!(fields[0], "empty");
            let x: i32 = fields[1].parse().unwrap();
            let y: i32 = fields[2].parse().unwrap();
            assert!((0..18).contains(&x));
            assert!((-10..=0).contains(&y));
            assert_eq!(&fields[3..], &["0", "0"]);
        }
    }

    #[test]
    fn sample_takes_all_when_few_cells_are_free() {
        let mut layout = Layout::new(Catalog::builtin(), 3, 3);
        layout
            .try_place(Anchor::new(1, 1), "freefall", Rotation::Deg0)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let mut cells = sample_empty_cells(layout.grid(), 10, &mut rng);
        cells.sort();
        assert_eq!(
            cells,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn sampling_is_deterministic_per_seed() {
        let grid = Grid::new(11, 18);
        let a = sample_empty_cells(&grid, 10, &mut StdRng::seed_from_u64(42));
        let b = sample_empty_cells(&grid, 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn export_to_saves_rendered_text() {
        let mut layout = Layout::new(Catalog::builtin(), 11, 18);
        layout
            .try_place(Anchor::new(5, 5), "coffeecup", Rotation::Deg90)
            .unwrap();
        let mut target = MemoryTarget::new();

        let receipt = export_to(
            &layout,
            &ExportOptions::default(),
            &mut StdRng::seed_from_u64(9),
            &mut target,
        )
        .unwrap();

        let saved = target.latest().unwrap();
        assert_eq!(receipt.bytes, saved.len());
        assert!(saved.starts_with("coffeecup,5,-5,0,90\n# random_empty_cells\n"));
        assert_eq!(
            saved,
            render(
                &layout,
                &ExportOptions::default(),
                &mut StdRng::seed_from_u64(9)
            )
        );
    }
}
