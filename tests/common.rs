use polytile::{
    polyomino::{Constraint, Possibility, RegionTiling},
    Catalog, Shape, SolveConfig,
};
use std::{collections::HashMap, path::PathBuf, time::Duration};

/// Install the test logger, ignoring the error if another test already did.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a shape from rows of `#` and `.`.
///
/// # Panics
///  - If no row contains a `#`.
#[allow(dead_code)]
pub fn shape(id: usize, rows: &[&str]) -> Shape {
    Shape::from_rows(id, rows.iter().copied()).unwrap()
}

/// Catalog with a few small shapes used across the integration tests.
///
/// | id | shape            | cells |
/// |----|------------------|-------|
/// | 0  | 2x2 square       | 4     |
/// | 1  | 1x4 line         | 4     |
/// | 2  | S tetromino      | 4     |
/// | 3  | L tetromino      | 4     |
/// | 4  | 1x2 domino       | 2     |
#[allow(dead_code)]
pub fn tetromino_catalog() -> Catalog {
    Catalog::new([
        shape(0, &["##", "##"]),
        shape(1, &["####"]),
        shape(2, &[".##", "##."]),
        shape(3, &["#.", "#.", "##"]),
        shape(4, &["##"]),
    ])
    .unwrap()
}

/// A configuration with a budget large enough that small regions never time
/// out.
#[allow(dead_code)]
pub fn generous_config() -> SolveConfig {
    SolveConfig::with_time_budget(Duration::from_secs(60))
}

/// Path to a file under `tests/data`.
#[allow(dead_code)]
pub fn data_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path.push(name);
    path
}

/// Check that `solution` is a genuine exact cover of `tiling`: every listed
/// constraint is satisfied by exactly one chosen possibility.
///
/// # Panics
///  - If some constraint is satisfied zero times or more than once.
#[allow(dead_code)]
pub fn assert_exact_cover(tiling: &RegionTiling, solution: &[&Possibility]) {
    let mut hits: HashMap<Constraint, usize> = HashMap::new();
    for poss in solution {
        for cons in poss.satisfied_constraints() {
            *hits.entry(cons).or_insert(0) += 1;
        }
    }

    for cons in &tiling.constraints {
        let count = hits.get(cons).copied().unwrap_or(0);
        assert_eq!(
            count, 1,
            "Constraint [{:?}] satisfied {} times by solution [{:?}]",
            cons, count, solution
        );
    }
    assert_eq!(hits.len(), tiling.constraints.len());
}
