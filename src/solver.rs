use crate::{
    grid::{Checkpoint, Grid},
    ExactCover,
};
use rustc_hash::FxHashMap;
use std::time::Instant;

/// Result of one exact cover search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A set of possibilities satisfying every constraint exactly once was
    /// found.
    Covered,
    /// The search was exhaustive and no exact cover exists.
    Infeasible,
    /// The deadline passed before the search could finish. Nothing is known
    /// about whether a cover exists.
    TimedOut,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of recursive search calls entered.
    pub calls: u64,
    /// Number of rows selected (covered) during the search.
    pub covers: u64,
}

/// Solver that searches for the first solution of an exact cover problem
/// before a deadline.
///
/// The solver owns all of its mutable search state. Nothing is shared
/// between two solvers, so independent problems may be solved on different
/// threads.
#[derive(Debug)]
pub struct Solver<'e, E: ExactCover> {
    problem: &'e E,
    deadline: Instant,

    // Values used to track the state of solving
    grid: Grid,
    partial_solution: Vec<usize>,
    outcome: Option<Outcome>,
    stats: SearchStats,
}

impl<'e, E> Solver<'e, E>
where
    E: ExactCover,
{
    /// Create a new `Solver` with the given instance of an exact cover
    /// problem.
    ///
    /// Constraints returned by [`ExactCover::satisfied_constraints`] that are
    /// not listed in [`ExactCover::constraints`] are ignored.
    pub fn new(problem: &'e E, deadline: Instant) -> Self {
        Self {
            problem,
            deadline,
            grid: Self::populate_grid(problem),
            partial_solution: Vec::new(),
            outcome: None,
            stats: SearchStats::default(),
        }
    }

    fn populate_grid(problem: &E) -> Grid {
        let columns: FxHashMap<&E::Constraint, usize> = problem
            .constraints()
            .iter()
            .enumerate()
            .map(|(column, cons)| (cons, column))
            .collect();

        let coordinates: Vec<(usize, usize)> = problem
            .possibilities()
            .iter()
            .enumerate()
            .flat_map(|(row, poss)| {
                problem
                    .satisfied_constraints(poss)
                    .into_iter()
                    .filter_map(|cons| columns.get(&cons).map(|&column| (row, column)))
                    .collect::<Vec<_>>()
            })
            .collect();

        Grid::new(
            problem.possibilities().len(),
            problem.constraints().len(),
            coordinates,
        )
    }

    /// Reset all solver state except for the problem and the deadline.
    pub fn reset(&mut self) {
        self.grid.undo(Checkpoint::ROOT);
        self.partial_solution.clear();
        self.outcome = None;
        self.stats = SearchStats::default();
    }

    /// Number of rows (possibilities) in the search grid.
    pub fn num_rows(&self) -> usize {
        self.grid.num_rows()
    }

    /// Number of columns (constraints) in the search grid.
    pub fn num_columns(&self) -> usize {
        self.grid.num_columns()
    }

    /// Counters from the last search.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search for the first exact cover.
    ///
    /// Every run starts from the fresh grid, so calling `solve` twice gives
    /// the same outcome as long as the deadline has not passed in between.
    pub fn solve(&mut self) -> Outcome {
        if self.outcome.is_some() {
            self.reset();
        }

        // If any constraint has no possibility at all there is nothing to
        // search
        let outcome = if self
            .grid
            .uncovered_columns()
            .any(|column| self.grid.column_size(column) == 0)
        {
            Outcome::Infeasible
        } else {
            self.search()
        };

        log::trace!(
            "Search finished with {:?} after {} calls and {} covers.",
            outcome,
            self.stats.calls,
            self.stats.covers
        );

        self.outcome = Some(outcome);
        outcome
    }

    /// Return the possibilities making up the cover found by the last call to
    /// [`Solver::solve`], or `None` if it did not return [`Outcome::Covered`].
    pub fn solution(&self) -> Option<Vec<&'e E::Possibility>> {
        if self.outcome != Some(Outcome::Covered) {
            return None;
        }

        let possibilities = self.problem.possibilities();
        Some(
            self.partial_solution
                .iter()
                .map(|&row| &possibilities[row])
                .collect(),
        )
    }

    fn search(&mut self) -> Outcome {
        self.stats.calls += 1;

        if Instant::now() >= self.deadline {
            return Outcome::TimedOut;
        }

        let Some((column, size)) = self.choose_column() else {
            return Outcome::Covered;
        };
        if size == 0 {
            // If there exists a constraint with no viable rows, then this
            // particular branch does not contain any solutions
            return Outcome::Infeasible;
        }

        for row in self.grid.uncovered_rows_in_column(column) {
            let checkpoint = self.grid.cover_row(row);
            self.stats.covers += 1;
            self.partial_solution.push(row);

            match self.search() {
                Outcome::Infeasible => {}
                // Leave the grid as is, the whole search is over
                outcome @ (Outcome::Covered | Outcome::TimedOut) => return outcome,
            }

            self.partial_solution.pop();
            self.grid.undo(checkpoint);
        }

        Outcome::Infeasible
    }

    /// Select the uncovered column with the fewest uncovered rows, preferring
    /// the lowest column index on ties.
    ///
    /// Returns `None` when every column is covered.
    fn choose_column(&self) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;

        for column in self.grid.uncovered_columns() {
            let size = self.grid.column_size(column);
            if size == 0 {
                return Some((column, 0));
            }
            if best.map_or(true, |(_, best_size)| size < best_size) {
                best = Some((column, size));
            }
        }

        best
    }
}
