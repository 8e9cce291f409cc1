//! Incidence grid for exact cover search.
//!
//! Rows and columns are stable integer indices. The incidence itself never
//! changes; what the search mutates is which rows and columns are still
//! *uncovered*, kept as bitsets, plus a per-column count of uncovered rows.
//! A column's candidate set is therefore "the rows listed for that column
//! whose bit is still set".
//!
//! Every removal is appended to an undo journal. [`Grid::cover_row`] returns a
//! [`Checkpoint`] and [`Grid::undo`] replays the journal backwards down to
//! it, so after `undo` the grid is identical (field for field) to what it
//! was before the matching `cover_row`.

use bitvec::prelude::*;

/// Grid implementation backing the [`Solver`](crate::Solver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    column_rows: Vec<Vec<usize>>,
    row_columns: Vec<Vec<usize>>,

    uncovered_columns: BitVec,
    uncovered_rows: BitVec,
    column_sizes: Vec<usize>,

    journal: Vec<Edit>,
}

/// A single reversible removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Column(usize),
    Row(usize),
}

/// Position in the undo journal to roll back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl Checkpoint {
    /// The state of a freshly built grid.
    pub const ROOT: Checkpoint = Checkpoint(0);
}

impl Grid {
    /// Create a new grid with a specified number of rows and columns, and the
    /// given `(row, column)` coordinates filled.
    ///
    /// Rows and columns are 0 indexed.
    pub fn new(
        num_rows: usize,
        num_columns: usize,
        filled_coordinates: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut column_rows = vec![Vec::new(); num_columns];
        let mut row_columns = vec![Vec::new(); num_rows];

        for (row, column) in filled_coordinates {
            assert!(
                row < num_rows && column < num_columns,
                "Coordinate ({row}, {column}) is outside a {num_rows}x{num_columns} grid"
            );
            column_rows[column].push(row);
            row_columns[row].push(column);
        }

        for rows in &mut column_rows {
            rows.sort_unstable();
            rows.dedup();
        }
        for columns in &mut row_columns {
            columns.sort_unstable();
            columns.dedup();
        }

        let column_sizes = column_rows.iter().map(Vec::len).collect();

        Grid {
            column_rows,
            row_columns,
            uncovered_columns: bitvec![1; num_columns],
            uncovered_rows: bitvec![1; num_rows],
            column_sizes,
            journal: Vec::new(),
        }
    }

    /// Total number of rows, covered or not.
    pub fn num_rows(&self) -> usize {
        self.row_columns.len()
    }

    /// Total number of columns, covered or not.
    pub fn num_columns(&self) -> usize {
        self.column_rows.len()
    }

    /// Return an iterator over the columns that still need to be covered, in
    /// increasing index order.
    pub fn uncovered_columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.uncovered_columns.iter_ones()
    }

    /// Return the number of uncovered rows in this column.
    pub fn column_size(&self, column: usize) -> usize {
        self.column_sizes[column]
    }

    /// Return a snapshot of the uncovered rows in this column.
    ///
    /// The snapshot is owned so the caller can keep iterating it while the
    /// grid is covered and uncovered underneath.
    pub fn uncovered_rows_in_column(&self, column: usize) -> Vec<usize> {
        self.column_rows[column]
            .iter()
            .copied()
            .filter(|&row| self.uncovered_rows[row])
            .collect()
    }

    /// Select `row`: cover each of its columns and remove every row that
    /// shares any of them.
    ///
    /// # Panics
    ///
    /// Panics if `row` was already removed by an earlier cover.
    pub fn cover_row(&mut self, row: usize) -> Checkpoint {
        assert!(self.uncovered_rows[row], "Row {row} is already covered");
        let checkpoint = Checkpoint(self.journal.len());

        for column_idx in 0..self.row_columns[row].len() {
            let column = self.row_columns[row][column_idx];

            // An uncovered row cannot touch a covered column
            debug_assert!(self.uncovered_columns[column]);
            self.uncovered_columns.set(column, false);
            self.journal.push(Edit::Column(column));

            for row_idx in 0..self.column_rows[column].len() {
                let other = self.column_rows[column][row_idx];
                if !self.uncovered_rows[other] {
                    continue;
                }

                self.uncovered_rows.set(other, false);
                for &touched in &self.row_columns[other] {
                    self.column_sizes[touched] -= 1;
                }
                self.journal.push(Edit::Row(other));
            }
        }

        checkpoint
    }

    /// Roll back every cover performed since `checkpoint` was taken.
    ///
    /// # Panics
    ///
    /// Panics if the journal is already shorter than the checkpoint, which
    /// means covers and undos were not properly nested.
    pub fn undo(&mut self, checkpoint: Checkpoint) {
        assert!(
            checkpoint.0 <= self.journal.len(),
            "mismatched number of cover & undo"
        );

        while self.journal.len() > checkpoint.0 {
            match self.journal.pop() {
                Some(Edit::Row(row)) => {
                    self.uncovered_rows.set(row, true);
                    for &touched in &self.row_columns[row] {
                        self.column_sizes[touched] += 1;
                    }
                }
                Some(Edit::Column(column)) => {
                    self.uncovered_columns.set(column, true);
                }
                None => break,
            }
        }
    }
}
