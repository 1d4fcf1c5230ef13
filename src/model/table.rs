//! Table grid types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Largest number of positions [`TableGrid::to_matrix`] will allocate.
pub const MAX_MATRIX_CELLS: usize = 1_000_000;

/// A sparse table grid as reported by the conversion engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    /// Cells in the grid (one entry per merged cell)
    #[serde(default)]
    pub cells: Vec<GridCell>,
}

impl TableGrid {
    /// Create a new empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from cells.
    pub fn from_cells(cells: Vec<GridCell>) -> Self {
        Self { cells }
    }

    /// Add a cell to the grid.
    pub fn add_cell(&mut self, cell: GridCell) {
        self.cells.push(cell);
    }

    /// Builder form of [`TableGrid::add_cell`].
    pub fn with_cell(mut self, cell: GridCell) -> Self {
        self.add_cell(cell);
        self
    }

    /// Number of rows covered by the grid.
    pub fn row_count(&self) -> usize {
        self.cells.iter().map(|c| c.row_end).max().unwrap_or(0)
    }

    /// Number of columns covered by the grid.
    pub fn column_count(&self) -> usize {
        self.cells.iter().map(|c| c.col_end).max().unwrap_or(0)
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check if any cell spans multiple rows or columns.
    pub fn has_merged_cells(&self) -> bool {
        self.cells.iter().any(GridCell::is_merged)
    }

    /// Cells grouped by starting row, each row sorted by starting column.
    pub fn rows(&self) -> BTreeMap<usize, Vec<&GridCell>> {
        let mut rows: BTreeMap<usize, Vec<&GridCell>> = BTreeMap::new();
        for cell in &self.cells {
            rows.entry(cell.row_start).or_default().push(cell);
        }
        for cells in rows.values_mut() {
            cells.sort_by_key(|c| c.col_start);
        }
        rows
    }

    /// Dense `row_count x column_count` text matrix.
    ///
    /// Spanned cells repeat their text over every position they cover;
    /// positions no cell covers are empty strings. Grids covering more than
    /// [`MAX_MATRIX_CELLS`] positions produce an empty matrix.
    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        let (rows, cols) = (self.row_count(), self.column_count());
        match rows.checked_mul(cols) {
            Some(size) if size <= MAX_MATRIX_CELLS => {}
            _ => {
                log::warn!(
                    "Table grid of {} x {} exceeds {} positions, skipping matrix",
                    rows,
                    cols,
                    MAX_MATRIX_CELLS
                );
                return Vec::new();
            }
        }

        let mut matrix = vec![vec![String::new(); cols]; rows];
        for cell in &self.cells {
            for row in matrix.iter_mut().take(cell.row_end).skip(cell.row_start) {
                for slot in row.iter_mut().take(cell.col_end).skip(cell.col_start) {
                    *slot = cell.text.clone();
                }
            }
        }
        matrix
    }
}

/// A table cell with end-exclusive row and column spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    /// First row covered
    pub row_start: usize,
    /// One past the last row covered
    pub row_end: usize,
    /// First column covered
    pub col_start: usize,
    /// One past the last column covered
    pub col_end: usize,
    /// Cell text
    #[serde(default)]
    pub text: String,
}

impl GridCell {
    /// Create a single-slot cell at `(row, col)`.
    pub fn new(row: usize, col: usize, text: impl Into<String>) -> Self {
        Self {
            row_start: row,
            row_end: row.saturating_add(1),
            col_start: col,
            col_end: col.saturating_add(1),
            text: text.into(),
        }
    }

    /// Set the number of rows spanned and return self.
    pub fn rowspan(mut self, span: usize) -> Self {
        self.row_end = self.row_start.saturating_add(span.max(1));
        self
    }

    /// Set the number of columns spanned and return self.
    pub fn colspan(mut self, span: usize) -> Self {
        self.col_end = self.col_start.saturating_add(span.max(1));
        self
    }

    /// Number of rows this cell spans.
    pub fn row_span(&self) -> usize {
        self.row_end.saturating_sub(self.row_start).max(1)
    }

    /// Number of columns this cell spans.
    pub fn col_span(&self) -> usize {
        self.col_end.saturating_sub(self.col_start).max(1)
    }

    /// Check if this cell spans multiple rows or columns.
    pub fn is_merged(&self) -> bool {
        self.row_span() > 1 || self.col_span() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> TableGrid {
        TableGrid::new()
            .with_cell(GridCell::new(1, 1, "D"))
            .with_cell(GridCell::new(0, 1, "B"))
            .with_cell(GridCell::new(1, 0, "C"))
            .with_cell(GridCell::new(0, 0, "A"))
    }

    #[test]
    fn test_grid_counts() {
        let grid = two_by_two();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 2);
        assert!(!grid.has_merged_cells());

        let empty = TableGrid::new();
        assert!(empty.is_empty());
        assert_eq!(empty.row_count(), 0);
        assert!(empty.to_matrix().is_empty());
    }

    #[test]
    fn test_rows_sorted() {
        let grid = two_by_two();
        let rows = grid.rows();
        let first: Vec<&str> = rows[&0].iter().map(|c| c.text.as_str()).collect();
        let second: Vec<&str> = rows[&1].iter().map(|c| c.text.as_str()).collect();
        assert_eq!(first, vec!["A", "B"]);
        assert_eq!(second, vec!["C", "D"]);
    }

    #[test]
    fn test_matrix_with_spans_and_gaps() {
        let grid = TableGrid::new()
            .with_cell(GridCell::new(0, 0, "Header").colspan(2))
            .with_cell(GridCell::new(1, 0, "left"))
            .with_cell(GridCell::new(2, 1, "corner"));

        assert!(grid.has_merged_cells());
        assert_eq!(
            grid.to_matrix(),
            vec![
                vec!["Header".to_string(), "Header".to_string()],
                vec!["left".to_string(), String::new()],
                vec![String::new(), "corner".to_string()],
            ]
        );
    }

    #[test]
    fn test_oversized_grid_has_no_matrix() {
        let far = TableGrid::new().with_cell(GridCell::new(4_000_000_000, 4_000_000_000, "x"));
        assert!(far.to_matrix().is_empty());

        let wide = TableGrid::new().with_cell(GridCell::new(0, 0, "x").colspan(MAX_MATRIX_CELLS + 1));
        assert_eq!(wide.row_count(), 1);
        assert!(wide.to_matrix().is_empty());

        let edge = TableGrid::new().with_cell(GridCell::new(usize::MAX, 0, "x").rowspan(2));
        assert_eq!(edge.row_count(), usize::MAX);
        assert!(edge.to_matrix().is_empty());
    }
}
