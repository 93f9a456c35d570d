use thiserror::Error;

use crate::catalog::KindId;
use crate::footprint::Rotation;

pub const DEFAULT_ROWS: usize = 11;
pub const DEFAULT_COLS: usize = 18;

/// Occupancy of a single grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied { kind: KindId, rotation: Rotation },
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn kind(&self) -> Option<&str> {
        match self {
            Cell::Empty => None,
            Cell::Occupied { kind, .. } => Some(kind),
        }
    }

    pub fn rotation(&self) -> Option<Rotation> {
        match self {
            Cell::Empty => None,
            Cell::Occupied { rotation, .. } => Some(*rotation),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        rows: usize,
        cols: usize,
    },
}

/// Fixed-size occupancy grid addressed by `(x, y)`, `x` being the column.
///
/// The grid only checks bounds. Overlap rules belong to [`crate::Layout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows
    }

    fn index(&self, x: i32, y: i32) -> Result<usize, GridError> {
        if self.is_in_bounds(x, y) {
            Ok(y as usize * self.cols + x as usize)
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index(x, y).ok().map(|i| &self.cells[i])
    }

    /// True when `(x, y)` is inside the grid and unoccupied.
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Cell::is_empty)
    }

    pub fn set(
        &mut self,
        x: i32,
        y: i32,
        kind: impl Into<KindId>,
        rotation: Rotation,
    ) -> Result<(), GridError> {
        let i = self.index(x, y)?;
        self.cells[i] = Cell::Occupied {
            kind: kind.into(),
            rotation,
        };
        Ok(())
    }

    pub fn clear(&mut self, x: i32, y: i32) -> Result<(), GridError> {
        let i = self.index(x, y)?;
        self.cells[i] = Cell::Empty;
        Ok(())
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.rows {
            return None;
        }
        let start = y * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(move |(i, _)| ((i % cols) as i32, (i / cols) as i32))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}
