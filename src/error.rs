//! Errors raised while validating or parsing a shape catalog.
//!
//! None of these come out of the search itself: a catalog and its regions are
//! checked before any placement is generated, and the engine only ever
//! returns an [`Outcome`](crate::Outcome).

use std::num::ParseIntError;

use thiserror::Error;

/// Catalog, region, or configuration data that cannot be solved at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A region was declared with a width of zero.
    #[error("region width must be positive")]
    ZeroWidth,
    /// A region was declared with a height of zero.
    #[error("region height must be positive")]
    ZeroHeight,
    /// A region requires instances of a shape the catalog does not contain.
    #[error("shape {0} is not present in the catalog")]
    UnknownShape(usize),
    /// A shape was declared without any filled cells.
    #[error("shape {0} has no filled cells")]
    EmptyShape(usize),
    /// Two shapes were declared with the same identifier.
    #[error("shape {0} is declared more than once")]
    DuplicateShape(usize),
    /// The per-region time budget was zero.
    #[error("time budget must be positive")]
    ZeroBudget,
    /// The retry policy allows no attempt at all.
    #[error("retry policy must allow at least one attempt")]
    ZeroAttempts,
    /// The retry policy would never grow the budget.
    #[error("retry growth factor must be at least 1")]
    ZeroGrowth,
}

/// Failure to read a textual shape catalog.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A shape header was not of the form `<id>:`.
    #[error("line {line}: expected shape header '<id>:', got '{text}'")]
    ShapeHeader {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// A shape row contained something other than `#` or `.`.
    #[error("line {line}, column {column}: unexpected character '{found}' in shape")]
    ShapeRow {
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        column: usize,
        /// The offending character.
        found: char,
    },
    /// A region line was not of the form `<W>x<H>: <count>...`.
    #[error("line {line}: expected region '<width>x<height>: <counts>', got '{text}'")]
    Region {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        text: String,
    },
    /// An integer field could not be parsed.
    #[error("line {line}: invalid number")]
    Number {
        /// 1-based line number.
        line: usize,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The catalog parsed but describes something unsolvable.
    #[error("invalid catalog")]
    Validation(#[from] ValidationError),
}
