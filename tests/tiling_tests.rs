mod common;

use common::{assert_exact_cover, generous_config, init_logging, tetromino_catalog};
use polytile::{
    polyomino::RegionTiling,
    region::Reason,
    Classification, ExactCover, Orchestrator, Outcome, Region,
};
use std::time::{Duration, Instant};

fn classify(width: usize, height: usize, counts: &[(usize, usize)]) -> polytile::RegionReport {
    init_logging();

    let catalog = tetromino_catalog();
    let orchestrator = Orchestrator::new(&catalog, generous_config()).unwrap();
    let region = Region::new(width, height, counts.iter().copied()).unwrap();

    orchestrator.classify(0, &region).unwrap()
}

/// Solve the region directly and check the returned cover cell by cell.
fn solve_and_verify(width: usize, height: usize, counts: &[(usize, usize)]) {
    let catalog = tetromino_catalog();
    let region = Region::new(width, height, counts.iter().copied()).unwrap();
    let tiling = RegionTiling::new(width, height, catalog.pieces(&region).unwrap());

    let mut solver = tiling.solver(Instant::now() + Duration::from_secs(60));
    assert_eq!(solver.solve(), Outcome::Covered);

    let solution = solver.solution().unwrap();
    log::debug!("Found tiling:\n{}", tiling.render(solution.iter().copied()));
    assert_exact_cover(&tiling, &solution);
}

#[test]
fn single_square_fills_region() {
    let report = classify(2, 2, &[(0, 1)]);

    assert_eq!(report.classification, Classification::Tiled);
    assert_eq!(report.tiling.as_deref(), Some("AA\nAA\n"));
}

#[test]
fn oversubscribed_region_never_reaches_the_engine() {
    let report = classify(2, 2, &[(0, 2)]);

    assert_eq!(
        report.classification,
        Classification::NotTileable(Reason::AreaExceeded)
    );
    assert_eq!(report.rows, 0);
    assert_eq!(report.columns, 0);
    assert_eq!(report.attempts, 0);
}

#[test]
fn skew_tetrominoes_cannot_fill_square() {
    let report = classify(4, 4, &[(2, 4)]);

    assert_eq!(
        report.classification,
        Classification::NotTileable(Reason::NoCover)
    );
    assert_eq!(report.columns, 4 + 16);
}

#[test]
fn lines_fill_square() {
    let report = classify(4, 4, &[(1, 4)]);
    assert_eq!(report.classification, Classification::Tiled);

    solve_and_verify(4, 4, &[(1, 4)]);
}

#[test]
fn l_tetrominoes_fill_square() {
    let report = classify(4, 4, &[(3, 4)]);
    assert_eq!(report.classification, Classification::Tiled);

    solve_and_verify(4, 4, &[(3, 4)]);
}

#[test]
fn mixed_pieces_fill_region() {
    // squares stacked on the left, two vertical lines on the right
    let report = classify(4, 4, &[(0, 2), (1, 2)]);
    assert_eq!(report.classification, Classification::Tiled);

    solve_and_verify(4, 4, &[(0, 2), (1, 2)]);
    solve_and_verify(4, 3, &[(3, 2), (4, 2)]);
}

#[test]
fn piece_too_long_for_region() {
    let report = classify(3, 3, &[(1, 1)]);

    assert_eq!(
        report.classification,
        Classification::NotTileable(Reason::NoPlacement)
    );
    assert!(report.columns > 0);
}

#[test]
fn every_cell_must_be_covered() {
    // 8 of 9 cells fit, but a gap is not allowed
    let report = classify(3, 3, &[(4, 4)]);

    assert_eq!(
        report.classification,
        Classification::NotTileable(Reason::NoCover)
    );
}

#[test]
fn region_without_pieces_is_not_tiled() {
    let report = classify(2, 2, &[]);

    assert_eq!(
        report.classification,
        Classification::NotTileable(Reason::NoCover)
    );
    assert_eq!(report.rows, 0);
    assert_eq!(report.columns, 4);
}

#[test]
fn classification_is_deterministic() {
    let counts = [(0, 1), (3, 2), (4, 2)];
    let first = classify(4, 4, &counts);
    let second = classify(4, 4, &counts);

    assert_eq!(first.classification, second.classification);
    assert_eq!(first.tiling, second.tiling);
    assert_eq!(first.rows, second.rows);
}
