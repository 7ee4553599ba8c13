//! Rectangular field of cells and Moore-neighborhood indexing.

use crate::strategy::Strategy;
use std::fmt;

/// Neighbor offsets `(d_row, d_col)` in scan order, self excluded.
///
/// The order is observable: strategy replacement keeps the first of several
/// equally-scored neighbors.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A single lattice site
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub strategy: Strategy,
    /// Total payoff from the last scoring pass; 0 until scored
    pub score: f64,
}

impl Cell {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy, score: 0.0 }
    }
}

/// Errors raised when building a field from raw rows
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("field must have at least one row and one column")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Fixed-size grid of cells, stored row-major.
///
/// Dimensions never change after construction and are always at least 1x1.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Field {
    /// Build a field from rows of strategies; all scores start at 0
    pub fn from_rows(rows: Vec<Vec<Strategy>>) -> Result<Self, FieldError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if n_rows == 0 || n_cols == 0 {
            return Err(FieldError::Empty);
        }

        let mut cells = Vec::with_capacity(n_rows * n_cols);
        for (row, strategies) in rows.into_iter().enumerate() {
            if strategies.len() != n_cols {
                return Err(FieldError::Ragged {
                    row,
                    expected: n_cols,
                    found: strategies.len(),
                });
            }
            cells.extend(strategies.into_iter().map(Cell::new));
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            cells,
        })
    }

    /// Field of the given size with every cell set to `strategy`
    pub fn filled(rows: usize, cols: usize, strategy: Strategy) -> Result<Self, FieldError> {
        if rows == 0 || cols == 0 {
            return Err(FieldError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::new(strategy); rows * cols],
        })
    }

    /// New field with this one's dimensions, one fresh cell per position
    pub(crate) fn map_cells<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Cell,
    {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..self.rows {
            for col in 0..self.cols {
                cells.push(f(row, col));
            }
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the signed coordinate lies inside the field
    #[inline]
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) outside {}x{} field",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Cell at a position, if inside the field
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    #[inline]
    fn cell(&self, row: usize, col: usize) -> &Cell {
        match self.get(row, col) {
            Some(cell) => cell,
            None => panic!(
                "cell ({}, {}) outside {}x{} field",
                row, col, self.rows, self.cols
            ),
        }
    }

    /// Strategy at a position. Panics when out of bounds.
    #[inline]
    pub fn strategy(&self, row: usize, col: usize) -> Strategy {
        self.cell(row, col).strategy
    }

    /// Score at a position. Panics when out of bounds.
    #[inline]
    pub fn score(&self, row: usize, col: usize) -> f64 {
        self.cell(row, col).score
    }

    #[inline]
    pub fn set_score(&mut self, row: usize, col: usize, score: f64) {
        let idx = self.index(row, col);
        self.cells[idx].score = score;
    }

    #[inline]
    pub fn set_strategy(&mut self, row: usize, col: usize, strategy: Strategy) {
        let idx = self.index(row, col);
        self.cells[idx].strategy = strategy;
    }

    /// In-bounds neighbors of `(row, col)` in scan order, self excluded
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        MOORE_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let r = row as isize + dr;
            let c = col as isize + dc;
            self.contains(r, c).then(|| (r as usize, c as usize))
        })
    }

    /// Number of in-bounds cells in the Moore neighborhood, self included
    pub fn neighborhood_size(&self, row: usize, col: usize) -> usize {
        1 + self.neighbors(row, col).count()
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Strategy layout as nested rows
    pub fn strategies(&self) -> Vec<Vec<Strategy>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.strategy).collect())
            .collect()
    }

    /// Count cells playing `strategy`
    pub fn count(&self, strategy: Strategy) -> usize {
        self.cells.iter().filter(|c| c.strategy == strategy).count()
    }

    /// True if both fields have the same dimensions and strategies (scores ignored)
    pub fn same_layout(&self, other: &Field) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.strategy == b.strategy)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                write!(f, "{}", cell.strategy)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
