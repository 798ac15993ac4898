//! Rectangular grids addressed by (row, col).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A grid coordinate. Row 0 is the top row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Signed row/col distance from `self` to `other`.
    #[must_use]
    pub fn delta(self, other: Cell) -> (i32, i32) {
        (
            other.row as i32 - self.row as i32,
            other.col as i32 - self.col as i32,
        )
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row-major grid of cells.
///
/// ```
/// use kreeda::board::{Cell, Grid};
///
/// let grid = Grid::new(3, 3, 0u8);
/// assert_eq!(grid.orthogonal_neighbors(Cell::new(1, 1)).len(), 4);
/// assert_eq!(grid.orthogonal_neighbors(Cell::new(0, 0)).len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// Create a grid from a per-cell factory.
    pub fn from_fn(rows: usize, cols: usize, mut factory: impl FnMut(Cell) -> T) -> Self {
        let cells = (0..rows * cols)
            .map(|i| factory(Cell::new(i / cols, i % cols)))
            .collect();
        Self { rows, cols, cells }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    #[must_use]
    pub fn get(&self, cell: Cell) -> Option<&T> {
        if self.contains(cell) {
            self.cells.get(cell.row * self.cols + cell.col)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut T> {
        if self.contains(cell) {
            self.cells.get_mut(cell.row * self.cols + cell.col)
        } else {
            None
        }
    }

    /// Overwrite a cell, returning the previous value.
    ///
    /// Returns `None` without writing when the cell is out of bounds.
    pub fn replace(&mut self, cell: Cell, value: T) -> Option<T> {
        self.get_mut(cell).map(|slot| std::mem::replace(slot, value))
    }

    /// Step from `cell` by a signed offset, if the result stays on the grid.
    #[must_use]
    pub fn offset(&self, cell: Cell, d_row: i32, d_col: i32) -> Option<Cell> {
        let row = cell.row as i64 + i64::from(d_row);
        let col = cell.col as i64 + i64::from(d_col);
        if row < 0 || col < 0 {
            return None;
        }
        let target = Cell::new(row as usize, col as usize);
        self.contains(target).then_some(target)
    }

    /// In-bounds up/down/left/right neighbours.
    #[must_use]
    pub fn orthogonal_neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(|(dr, dc)| self.offset(cell, dr, dc))
            .collect()
    }

    /// The cell itself plus its orthogonal neighbours.
    #[must_use]
    pub fn plus_stamp(&self, cell: Cell) -> SmallVec<[Cell; 5]> {
        let mut stamp = SmallVec::new();
        if self.contains(cell) {
            stamp.push(cell);
            stamp.extend(self.orthogonal_neighbors(cell));
        }
        stamp
    }

    /// All coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows * self.cols).map(move |i| Cell::new(i / self.cols, i % self.cols))
    }

    /// (coordinate, value) pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (Cell::new(i / cols, i % cols), v))
    }
}
