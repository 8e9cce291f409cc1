//! Shapes and their rotation/reflection variants.
//!
//! A shape is an arbitrary, non-empty set of unit cells on the integer
//! plane. It does not need to be contiguous. Before a shape is placed into a
//! region it is expanded into its [orientations](Shape::orientations): every
//! distinct footprint reachable by the 8 combinations of
//! {identity, horizontal reflection} × {0°, 90°, 180°, 270° rotation}.

use crate::error::ValidationError;

/// An `(x, y)` cell position. `x` grows to the right and `y` grows downwards.
pub type Cell = (i32, i32);

/// The 8 symmetries of the square, as maps on cell positions.
///
/// The first four are the rotations by 0°, 90°, 180° and 270°, the last four
/// are the same rotations applied after reflecting across the vertical axis.
pub const TRANSFORMS: [fn(Cell) -> Cell; 8] = [
    |(x, y)| (x, y),
    |(x, y)| (-y, x),
    |(x, y)| (-x, -y),
    |(x, y)| (y, -x),
    // reflected
    |(x, y)| (-x, y),
    |(x, y)| (-y, -x),
    |(x, y)| (x, -y),
    |(x, y)| (y, x),
];

/// A set of cells translated so that its minimum `x` and minimum `y` are both
/// 0, stored in sorted order.
///
/// Two footprints compare equal exactly when they describe the same cells up
/// to translation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Footprint {
    cells: Vec<Cell>,
}

impl Footprint {
    /// Normalize a set of cells into a footprint. Repeated cells are merged.
    ///
    /// # Panics
    ///
    /// Panics if `cells` is empty.
    pub fn normalize(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut cells: Vec<Cell> = cells.into_iter().collect();
        assert!(!cells.is_empty(), "Footprint cannot be empty.");

        let min_x = cells.iter().map(|(x, _)| *x).min().unwrap_or(0);
        let min_y = cells.iter().map(|(_, y)| *y).min().unwrap_or(0);

        for (x, y) in &mut cells {
            *x -= min_x;
            *y -= min_y;
        }

        cells.sort_unstable();
        cells.dedup();

        Footprint { cells }
    }

    /// The normalized cells, in sorted order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, footprints are never empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Width of the bounding box.
    pub fn width(&self) -> usize {
        self.cells
            .iter()
            .map(|(x, _)| *x as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Height of the bounding box.
    pub fn height(&self) -> usize {
        self.cells
            .iter()
            .map(|(_, y)| *y as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Apply one of the [`TRANSFORMS`] and renormalize.
    pub fn transform(&self, transform: fn(Cell) -> Cell) -> Self {
        Footprint::normalize(self.cells.iter().map(|&cell| transform(cell)))
    }
}

/// Return every distinct footprint reachable from `footprint` by rotation and
/// reflection.
///
/// Symmetric footprints yield fewer than 8 results, a square yields exactly 1.
/// The result is sorted, so the output does not depend on which of the
/// equivalent footprints was passed in.
pub fn orientations(footprint: &Footprint) -> Vec<Footprint> {
    let mut orientations: Vec<Footprint> = TRANSFORMS
        .iter()
        .map(|&transform| footprint.transform(transform))
        .collect();

    orientations.sort();
    orientations.dedup();
    orientations
}

/// A catalog shape: an identifier, its base footprint and the orientations
/// derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    id: usize,
    footprint: Footprint,
    orientations: Vec<Footprint>,
}

impl Shape {
    /// Create a shape from its filled cells.
    ///
    /// Fails with [`ValidationError::EmptyShape`] when no cell is given.
    pub fn new(id: usize, cells: impl IntoIterator<Item = Cell>) -> Result<Self, ValidationError> {
        let cells: Vec<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(ValidationError::EmptyShape(id));
        }

        let footprint = Footprint::normalize(cells);
        let orientations = orientations(&footprint);

        Ok(Shape {
            id,
            footprint,
            orientations,
        })
    }

    /// Create a shape from rows of `#` (filled) and any other character
    /// (empty). Row `y`, column `x` becomes cell `(x, y)`.
    pub fn from_rows<'a>(
        id: usize,
        rows: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ValidationError> {
        let cells = rows.into_iter().enumerate().flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .filter(|(_, c)| *c == '#')
                .map(move |(x, _)| (x as i32, y as i32))
        });

        Shape::new(id, cells)
    }

    /// Catalog identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The normalized footprint the shape was declared with.
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Number of cells one instance of this shape covers.
    pub fn area(&self) -> usize {
        self.footprint.len()
    }

    /// Distinct rotation/reflection variants of the shape.
    pub fn orientations(&self) -> &[Footprint] {
        &self.orientations
    }
}
