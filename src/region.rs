//! Regions, the shape catalog, and classification of regions into
//! [`Classification::Tiled`], [`Classification::NotTileable`] or
//! [`Classification::TimeoutUnknown`].
//!
//! The catalog is read-only once built and is shared by every region. All
//! mutable search state lives in the [`Solver`](crate::Solver) created for a
//! single attempt on a single region and is dropped right after.

use std::{
    collections::BTreeMap,
    fmt,
    time::{Duration, Instant},
};

use crate::{
    config::SolveConfig, error::ValidationError, polyomino::RegionTiling, shape::Shape,
    ExactCover, Outcome,
};

/// Deadline used when `now + budget` cannot be represented.
const FAR_FUTURE: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// The set of shapes regions can refer to, keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    shapes: BTreeMap<usize, Shape>,
}

impl Catalog {
    /// Build a catalog, rejecting repeated identifiers.
    pub fn new(shapes: impl IntoIterator<Item = Shape>) -> Result<Self, ValidationError> {
        let mut catalog = BTreeMap::new();
        for shape in shapes {
            let id = shape.id();
            if catalog.insert(id, shape).is_some() {
                return Err(ValidationError::DuplicateShape(id));
            }
        }

        Ok(Catalog { shapes: catalog })
    }

    /// Look up a shape by identifier.
    pub fn get(&self, id: usize) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Iterate over the shapes in identifier order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Return true if the catalog holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Pair every shape a region requires with its count.
    ///
    /// Fails if the region refers to a shape this catalog does not hold.
    pub fn pieces<'c>(
        &'c self,
        region: &Region,
    ) -> Result<Vec<(&'c Shape, usize)>, ValidationError> {
        region
            .counts()
            .map(|(id, count)| {
                self.get(id)
                    .map(|shape| (shape, count))
                    .ok_or(ValidationError::UnknownShape(id))
            })
            .collect()
    }

    /// Check that a region only refers to shapes in this catalog.
    pub fn validate_region(&self, region: &Region) -> Result<(), ValidationError> {
        self.pieces(region).map(|_| ())
    }

    /// Total number of cells the region's required pieces cover.
    pub fn required_area(&self, region: &Region) -> Result<usize, ValidationError> {
        Ok(self
            .pieces(region)?
            .into_iter()
            .map(|(shape, count)| shape.area() * count)
            .sum())
    }
}

/// A rectangular region and the number of instances of each shape it must
/// hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    counts: BTreeMap<usize, usize>,
}

impl Region {
    /// Create a region from its dimensions and `(shape id, count)` pairs.
    ///
    /// Shapes that are not listed, or listed with a count of 0, are not
    /// required. Repeated shape ids add up.
    pub fn new(
        width: usize,
        height: usize,
        counts: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, ValidationError> {
        if width == 0 {
            return Err(ValidationError::ZeroWidth);
        }
        if height == 0 {
            return Err(ValidationError::ZeroHeight);
        }

        let mut required = BTreeMap::new();
        for (id, count) in counts {
            if count > 0 {
                *required.entry(id).or_insert(0) += count;
            }
        }

        Ok(Region {
            width,
            height,
            counts: required,
        })
    }

    /// Width of the region.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the region.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the region.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Number of required instances of a shape.
    pub fn count(&self, shape: usize) -> usize {
        self.counts.get(&shape).copied().unwrap_or(0)
    }

    /// Iterate over `(shape id, count)` for every required shape, in
    /// identifier order.
    pub fn counts(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&id, &count)| (id, count))
    }
}

/// Why a region was classified as not tileable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The pieces need more cells than the region has.
    AreaExceeded,
    /// Some piece instance does not fit the region in any orientation.
    NoPlacement,
    /// An exhaustive search found no exact cover.
    NoCover,
}

/// Final verdict for a region.
///
/// `TimeoutUnknown` means the search was cut off, never that the region is
/// known to be untileable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The pieces exactly tile the region.
    Tiled,
    /// The pieces provably cannot exactly tile the region.
    NotTileable(Reason),
    /// The search did not finish within its budget.
    TimeoutUnknown,
}

impl Classification {
    /// Return true for [`Classification::Tiled`].
    pub fn is_tiled(&self) -> bool {
        matches!(self, Classification::Tiled)
    }
}

impl From<Outcome> for Classification {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Covered => Classification::Tiled,
            Outcome::Infeasible => Classification::NotTileable(Reason::NoCover),
            Outcome::TimedOut => Classification::TimeoutUnknown,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Tiled => f.write_str("tiled"),
            Classification::NotTileable(Reason::AreaExceeded) => {
                f.write_str("not tileable (area exceeded)")
            }
            Classification::NotTileable(Reason::NoPlacement) => {
                f.write_str("not tileable (instance without placement)")
            }
            Classification::NotTileable(Reason::NoCover) => {
                f.write_str("not tileable (proved by search)")
            }
            Classification::TimeoutUnknown => f.write_str("timeout"),
        }
    }
}

/// Classification of one region plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionReport {
    /// Position of the region in its input list.
    pub index: usize,
    /// Width of the region.
    pub width: usize,
    /// Height of the region.
    pub height: usize,
    /// The verdict.
    pub classification: Classification,
    /// Wall-clock time spent on the region, including placement generation.
    pub elapsed: Duration,
    /// Number of placement rows generated; 0 if the area check rejected the
    /// region first.
    pub rows: usize,
    /// Number of exact cover columns; 0 if the area check rejected the
    /// region first.
    pub columns: usize,
    /// Number of search attempts made; 0 if the search was never started.
    pub attempts: u32,
    /// Rendering of the tiling found, for tiled regions.
    pub tiling: Option<String>,
}

/// Counts over a batch of region reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Number of regions.
    pub total: usize,
    /// Number of regions passing the area check.
    pub area_feasible: usize,
    /// Number of regions classified [`Classification::Tiled`].
    pub tiled: usize,
    /// Number of regions classified [`Classification::NotTileable`].
    pub not_tileable: usize,
    /// Number of regions classified [`Classification::TimeoutUnknown`].
    pub timed_out: usize,
}

impl Summary {
    /// Add one report to the counts.
    pub fn record(&mut self, report: &RegionReport) {
        self.total += 1;
        match report.classification {
            Classification::Tiled => self.tiled += 1,
            Classification::NotTileable(_) => self.not_tileable += 1,
            Classification::TimeoutUnknown => self.timed_out += 1,
        }
        if report.classification != Classification::NotTileable(Reason::AreaExceeded) {
            self.area_feasible += 1;
        }
    }
}

impl<'r> FromIterator<&'r RegionReport> for Summary {
    fn from_iter<I: IntoIterator<Item = &'r RegionReport>>(iter: I) -> Self {
        let mut summary = Summary::default();
        for report in iter {
            summary.record(report);
        }
        summary
    }
}

/// Runs the classification pipeline for regions against one catalog.
#[derive(Debug, Clone, Copy)]
pub struct Orchestrator<'c> {
    catalog: &'c Catalog,
    config: SolveConfig,
}

impl<'c> Orchestrator<'c> {
    /// Create an orchestrator, rejecting unusable configurations.
    pub fn new(catalog: &'c Catalog, config: SolveConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Orchestrator { catalog, config })
    }

    /// The catalog regions are checked against.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// The active configuration.
    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Classify every region in order.
    ///
    /// All regions are validated before the first one is searched, so a
    /// malformed region late in the list fails the whole batch up front.
    pub fn classify_all(
        &self,
        regions: &[Region],
    ) -> Result<(Vec<RegionReport>, Summary), ValidationError> {
        for region in regions {
            self.catalog.validate_region(region)?;
        }

        let reports = regions
            .iter()
            .enumerate()
            .map(|(index, region)| self.classify(index, region))
            .collect::<Result<Vec<_>, _>>()?;
        let summary = reports.iter().collect();

        Ok((reports, summary))
    }

    /// Classify a single region.
    pub fn classify(&self, index: usize, region: &Region) -> Result<RegionReport, ValidationError> {
        let start = Instant::now();
        let pieces = self.catalog.pieces(region)?;

        let mut report = RegionReport {
            index,
            width: region.width(),
            height: region.height(),
            classification: Classification::TimeoutUnknown,
            elapsed: Duration::ZERO,
            rows: 0,
            columns: 0,
            attempts: 0,
            tiling: None,
        };

        let required_area: usize = pieces.iter().map(|(shape, count)| shape.area() * count).sum();
        if required_area > region.area() {
            log::debug!(
                "Region {} needs {} cells but only has {}.",
                index,
                required_area,
                region.area()
            );
            report.classification = Classification::NotTileable(Reason::AreaExceeded);
            return Ok(self.finish(report, start));
        }

        let tiling = RegionTiling::new(region.width(), region.height(), pieces);
        report.rows = tiling.possibilities().len();
        report.columns = tiling.constraints().len();

        let unplaceable = tiling.unplaceable_instances();
        if let Some(piece) = unplaceable.first() {
            log::debug!(
                "Region {}: shape {} does not fit in any orientation.",
                index,
                piece.shape
            );
            report.classification = Classification::NotTileable(Reason::NoPlacement);
            return Ok(self.finish(report, start));
        }

        log::debug!(
            "Region {}: {} placement rows, {} columns.",
            index,
            report.rows,
            report.columns
        );

        let retry = self.config.retry;
        for attempt in 1..=retry.max_attempts {
            let budget = retry.budget_for(attempt, self.config.time_budget);
            let now = Instant::now();
            let deadline = now
                .checked_add(budget)
                .unwrap_or_else(|| now + FAR_FUTURE);

            let mut solver = tiling.solver(deadline);
            let outcome = solver.solve();
            report.attempts = attempt;
            report.classification = outcome.into();

            if outcome == Outcome::Covered {
                report.tiling = solver.solution().map(|solution| tiling.render(solution));
            }
            if outcome != Outcome::TimedOut {
                break;
            }
            if attempt < retry.max_attempts {
                log::info!(
                    "Region {} timed out after {:?}, retrying with {:?}.",
                    index,
                    budget,
                    retry.budget_for(attempt + 1, self.config.time_budget)
                );
            }
        }

        Ok(self.finish(report, start))
    }

    fn finish(&self, mut report: RegionReport, start: Instant) -> RegionReport {
        report.elapsed = start.elapsed();
        log::info!(
            "Region {} ({}x{}): {} in {:.2?}.",
            report.index,
            report.width,
            report.height,
            report.classification,
            report.elapsed
        );
        report
    }
}
