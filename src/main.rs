//! Polyomino region tiler
//!
//! Reads a shape catalog and a list of regions, then reports for every region
//! whether the required pieces exactly tile it, provably cannot, or could not
//! be decided within the time budget.

use std::{
    error::Error as _,
    fmt::Write as _,
    fs, io,
    path::PathBuf,
    process::ExitCode,
    time::{Duration, TryFromFloatSecsError},
};

use clap::Parser;
use polytile::{
    parse::parse_catalog,
    region::{Classification, Reason},
    Orchestrator, ParseError, RegionReport, RetryPolicy, SolveConfig, Summary, ValidationError,
};
use thiserror::Error;

/// Decide which regions can be exactly tiled by their pieces.
#[derive(Parser)]
#[command(name = "polytile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog and region file.
    #[arg(default_value = "input.txt")]
    input: PathBuf,
    /// Search budget per region, in seconds.
    #[arg(long, default_value_t = 8.0)]
    timeout: f64,
    /// Extra attempts for regions that time out.
    #[arg(long, default_value_t = 0)]
    retries: u32,
    /// Factor the budget grows by on every extra attempt.
    #[arg(long, default_value_t = 2)]
    growth: u32,
    /// Write one line per region to this file.
    #[arg(long)]
    results: Option<PathBuf>,
    /// Print the tiling found for every tiled region.
    #[arg(long)]
    show: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid timeout")]
    Timeout(#[from] TryFromFloatSecsError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let mut message = err.to_string();
            let mut source = err.source();
            while let Some(cause) = source {
                let _ = write!(message, ": {}", cause);
                source = cause.source();
            }
            log::error!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Summary, CliError> {
    let input = fs::read_to_string(&cli.input).map_err(|source| CliError::Read {
        path: cli.input.clone(),
        source,
    })?;
    let (catalog, regions) = parse_catalog(&input)?;

    let config = SolveConfig::with_time_budget(Duration::try_from_secs_f64(cli.timeout)?).retry(
        RetryPolicy {
            max_attempts: cli.retries.saturating_add(1),
            growth: cli.growth,
        },
    );
    let orchestrator = Orchestrator::new(&catalog, config)?;
    let (reports, summary) = orchestrator.classify_all(&regions)?;

    if cli.show {
        for report in reports.iter().filter(|report| report.classification.is_tiled()) {
            if let Some(tiling) = &report.tiling {
                println!("Region {} ({}x{}):", report.index, report.width, report.height);
                print!("{}", tiling);
            }
        }
    }

    println!("Total regions: {}", summary.total);
    println!("Area-feasible: {}", summary.area_feasible);
    println!("Tileable: {}", summary.tiled);
    if summary.timed_out > 0 {
        println!("Undecided (timeout): {}", summary.timed_out);
    }

    if let Some(path) = &cli.results {
        fs::write(path, results_file(&reports, &summary, cli.timeout)).map_err(|source| {
            CliError::Write {
                path: path.clone(),
                source,
            }
        })?;
        log::info!("Wrote results to {}", path.display());
    }

    Ok(summary)
}

fn results_file(reports: &[RegionReport], summary: &Summary, timeout: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total regions: {}", summary.total);
    let _ = writeln!(out, "Area-feasible: {}", summary.area_feasible);
    let _ = writeln!(
        out,
        "Tileable within timeout per-region ({}s): {}",
        timeout, summary.tiled
    );

    for report in reports {
        let (label, note) = match report.classification {
            Classification::Tiled => (
                "tiled",
                format!("time={:.2}s", report.elapsed.as_secs_f64()),
            ),
            Classification::NotTileable(reason) => (
                "not_tileable",
                match reason {
                    Reason::AreaExceeded => "area_exceeded",
                    Reason::NoPlacement => "instance_no_placement",
                    Reason::NoCover => "proved_not_tileable",
                }
                .to_string(),
            ),
            Classification::TimeoutUnknown => ("timeout", format!("attempts={}", report.attempts)),
        };
        let _ = writeln!(out, "{}\t{}\t{}", report.index, label, note);
    }

    out
}
