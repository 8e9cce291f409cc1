//! A [polyomino tiling puzzle](https://en.wikipedia.org/wiki/Polyomino#Tiling_with_polyominoes)
//! over a rectangular region, where a fixed number of instances of each
//! shape must be placed without overlaps or gaps.
//!
//! Every instance is tracked separately: two copies of the same shape are two
//! [`Constraint::Instance`] columns, each of which must be used exactly once.

use crate::{
    shape::{Cell, Footprint, Shape},
    ExactCover,
};
use rustc_hash::FxHashSet;

/// One required copy of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceInstance {
    /// Catalog identifier of the shape.
    pub shape: usize,
    /// Index of this copy, in `0..count`.
    pub instance: usize,
}

/// A condition that must be satisfied in order to solve a tiling puzzle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constraint {
    /// The piece instance must be placed exactly once.
    Instance(PieceInstance),
    /// The region cell at `(x, y)` must be covered exactly once.
    Cell {
        /// Column of the cell, in `0..width`.
        x: usize,
        /// Row of the cell, in `0..height`.
        y: usize,
    },
}

impl Constraint {
    /// Return an iterator over all `Constraint`s for a region of the given
    /// size and list of piece instances. Instance constraints come first.
    pub fn all<'a>(
        width: usize,
        height: usize,
        instances: &'a [PieceInstance],
    ) -> impl Iterator<Item = Constraint> + 'a {
        let instance_it = instances.iter().copied().map(Constraint::Instance);
        let cell_it =
            (0..height).flat_map(move |y| (0..width).map(move |x| Constraint::Cell { x, y }));

        instance_it.chain(cell_it)
    }
}

/// A concrete placement of one piece instance in the region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Possibility {
    /// The piece instance being placed.
    pub piece: PieceInstance,
    /// Index into the shape's orientation list.
    pub orientation: usize,
    /// Absolute `(x, y)` region cells occupied by the piece.
    pub occupied_cells: Vec<(usize, usize)>,
}

impl Possibility {
    /// Check if this possibility satisfies a given constraint.
    pub fn satisfies(&self, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Instance(piece) => self.piece == *piece,
            Constraint::Cell { x, y } => self.occupied_cells.contains(&(*x, *y)),
        }
    }

    /// Return an iterator over all `Constraint`s that are satisfied by this
    /// `Possibility`.
    pub fn satisfied_constraints(&self) -> impl Iterator<Item = Constraint> + '_ {
        let instance_constraint = Constraint::Instance(self.piece);
        let cell_constraints = self
            .occupied_cells
            .iter()
            .map(|&(x, y)| Constraint::Cell { x, y });
        std::iter::once(instance_constraint).chain(cell_constraints)
    }
}

/// Instance of the tiling puzzle for one region.
#[derive(Debug)]
pub struct RegionTiling {
    /// The list of possible placements of piece instances in the region.
    pub possibilities: Vec<Possibility>,
    /// The list of constraints that must be satisfied.
    pub constraints: Vec<Constraint>,
    /// Every required piece instance, in declaration order.
    pub instances: Vec<PieceInstance>,
    /// Width of the region.
    pub width: usize,
    /// Height of the region.
    pub height: usize,
}

impl RegionTiling {
    /// Create the tiling puzzle for a `width` × `height` region that must hold
    /// `count` instances of each listed shape.
    ///
    /// Every placement is generated regardless of overlap; resolving overlaps
    /// is the solver's job. A shape too large for the region in every
    /// orientation simply contributes no possibilities.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new<'s>(
        width: usize,
        height: usize,
        pieces: impl IntoIterator<Item = (&'s Shape, usize)>,
    ) -> Self {
        assert!(
            width > 0 && height > 0,
            "Region dimensions must be positive."
        );

        let mut instances = Vec::new();
        let mut possibilities = Vec::new();

        for (shape, count) in pieces {
            for instance in 0..count {
                let piece = PieceInstance {
                    shape: shape.id(),
                    instance,
                };
                instances.push(piece);

                for (orientation_idx, orientation) in shape.orientations().iter().enumerate() {
                    possibilities.extend(
                        Self::translations(orientation, width, height).map(|occupied_cells| {
                            Possibility {
                                piece,
                                orientation: orientation_idx,
                                occupied_cells,
                            }
                        }),
                    );
                }
            }
        }

        let constraints = Constraint::all(width, height, &instances).collect();

        Self {
            possibilities,
            constraints,
            instances,
            width,
            height,
        }
    }

    /// Every way to translate `orientation` so that its bounding box lies
    /// inside the region, as lists of absolute cells.
    fn translations(
        orientation: &Footprint,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = Vec<(usize, usize)>> + '_ {
        let (shape_width, shape_height) = (orientation.width(), orientation.height());
        // If the orientation is larger than the region, there is no offset
        let (x_offsets, y_offsets) = if shape_width > width || shape_height > height {
            (0, 0)
        } else {
            (width - shape_width + 1, height - shape_height + 1)
        };

        (0..x_offsets).flat_map(move |offset_x| {
            (0..y_offsets).map(move |offset_y| {
                orientation
                    .cells()
                    .iter()
                    .map(|&(x, y): &Cell| (offset_x + x as usize, offset_y + y as usize))
                    .collect()
            })
        })
    }

    /// Return the instances that have no possible placement at all.
    pub fn unplaceable_instances(&self) -> Vec<PieceInstance> {
        let placed: FxHashSet<PieceInstance> =
            self.possibilities.iter().map(|poss| poss.piece).collect();

        self.instances
            .iter()
            .copied()
            .filter(|piece| !placed.contains(piece))
            .collect()
    }

    /// Render a solution as one line per region row, using a distinct symbol
    /// per placed instance and `.` for uncovered cells.
    pub fn render<'a>(&self, solution: impl IntoIterator<Item = &'a Possibility>) -> String {
        const SYMBOLS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

        let mut canvas = vec![b'.'; self.width * self.height];
        for (idx, poss) in solution.into_iter().enumerate() {
            let symbol = SYMBOLS[idx % SYMBOLS.len()];
            for &(x, y) in &poss.occupied_cells {
                canvas[y * self.width + x] = symbol;
            }
        }

        let mut output = String::with_capacity((self.width + 1) * self.height);
        for row in canvas.chunks(self.width) {
            output.extend(row.iter().map(|&b| b as char));
            output.push('\n');
        }
        output
    }
}

impl ExactCover for RegionTiling {
    type Constraint = Constraint;
    type Possibility = Possibility;

    fn satisfied_constraints(&self, poss: &Self::Possibility) -> Vec<Self::Constraint> {
        poss.satisfied_constraints().collect()
    }

    fn possibilities(&self) -> &[Self::Possibility] {
        &self.possibilities
    }

    fn constraints(&self) -> &[Self::Constraint] {
        &self.constraints
    }
}
