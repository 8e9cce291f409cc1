#![deny(missing_docs)]

//! Decide whether a set of [polyomino](https://en.wikipedia.org/wiki/Polyomino)
//! pieces can exactly tile a rectangular region.
//!
//! Each region is reduced to an [exact cover](https://en.wikipedia.org/wiki/Exact_cover)
//! problem: one column per region cell, one column per required piece
//! instance, and one row per legal placement of an instance. The rows are
//! searched with [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X)
//! under a hard deadline, so every region ends up [`Tiled`], [`NotTileable`]
//! or [`TimeoutUnknown`].
//!
//! [`Tiled`]: region::Classification::Tiled
//! [`NotTileable`]: region::Classification::NotTileable
//! [`TimeoutUnknown`]: region::Classification::TimeoutUnknown

pub mod config;
pub mod error;
pub(crate) mod grid;
pub mod parse;
pub mod polyomino;
pub mod region;
pub mod shape;
pub(crate) mod solver;

pub use config::{RetryPolicy, SolveConfig};
pub use error::{ParseError, ValidationError};
pub use region::{Catalog, Classification, Orchestrator, Region, RegionReport, Summary};
pub use shape::Shape;
pub use solver::{Outcome, SearchStats, Solver};

use std::time::Instant;

/// An instance of an exact cover problem.
///
/// Every constraint is primary: a solution must satisfy each one exactly
/// once.
pub trait ExactCover {
    /// The type of values that are elements of a solution to the exact cover
    /// problem.
    type Possibility: core::fmt::Debug;

    /// The type of value that are constraints on a given instance of an exact
    /// cover problem.
    type Constraint: core::fmt::Debug + Eq + core::hash::Hash;

    /// Return every `Constraint` the given `Possibility` satisfies.
    fn satisfied_constraints(&self, poss: &Self::Possibility) -> Vec<Self::Constraint>;

    /// Return a list of possibilities for this instance of the problem.
    fn possibilities(&self) -> &[Self::Possibility];

    /// Return a list of constraints that must be satisfied for this instance of
    /// the problem.
    fn constraints(&self) -> &[Self::Constraint];

    /// Return a solver that searches for one solution to this instance, giving
    /// up once `deadline` has passed.
    fn solver(&self, deadline: Instant) -> Solver<'_, Self>
    where
        Self: Sized,
    {
        Solver::new(self, deadline)
    }
}

impl<E> ExactCover for &E
where
    E: ExactCover,
{
    type Constraint = E::Constraint;
    type Possibility = E::Possibility;

    fn satisfied_constraints(&self, poss: &Self::Possibility) -> Vec<Self::Constraint> {
        <E as ExactCover>::satisfied_constraints(self, poss)
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        <E as ExactCover>::possibilities(self)
    }

    fn constraints(&self) -> &[Self::Constraint] {
        <E as ExactCover>::constraints(self)
    }
}
