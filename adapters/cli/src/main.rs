#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the Floorplan build engine from plan files.

mod plan;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use floorplan_core::{BuildIntent, BuildResult, OperationResult};
use floorplan_system_builder::{BuildManager, BuildPreview};
use floorplan_world::{query, Grid};
use log::LevelFilter;

use crate::plan::BuildPlan;

/// Applies or previews TOML build plans against an empty map.
#[derive(Debug, Parser)]
#[command(name = "floorplan", version, about)]
struct Cli {
    /// Log verbosity; overrides `RUST_LOG` when given.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Apply every intent of the plan and print the resulting map.
    Apply {
        /// Path to the TOML build plan.
        plan: PathBuf,
    },
    /// Apply all but the last intent, then preview the last one.
    Preview {
        /// Path to the TOML build plan.
        plan: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Entry point for the Floorplan command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.mode {
        Mode::Apply { plan } => run_apply(&load_intents(&plan)?),
        Mode::Preview { plan } => run_preview(&load_intents(&plan)?),
    }

    Ok(())
}

fn init_logging(level: Option<LogLevel>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        let _ = builder.filter_level(level.into());
    }
    builder.init();
}

fn load_intents(path: &Path) -> Result<Vec<BuildIntent>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read build plan {}", path.display()))?;
    let plan = BuildPlan::from_toml(&contents)
        .with_context(|| format!("failed to parse build plan {}", path.display()))?;
    let intents = plan
        .into_intents()
        .with_context(|| format!("invalid build plan {}", path.display()))?;
    log::info!("loaded {} intents from {}", intents.len(), path.display());
    Ok(intents)
}

fn run_apply(intents: &[BuildIntent]) {
    let (grid, results) = apply_plan(intents);
    for result in &results {
        print_result(result);
    }
    print_grid(&grid);
}

fn run_preview(intents: &[BuildIntent]) {
    let Some((last, preview)) = preview_plan(intents) else {
        return;
    };
    println!(
        "preview: {} of {} cells would change",
        preview.placeable_cells().len(),
        last.cells().len()
    );
    print_result(&preview.into_result());
}

/// Applies every intent in order to a fresh grid.
fn apply_plan(intents: &[BuildIntent]) -> (Grid, Vec<BuildResult>) {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let results = intents
        .iter()
        .map(|intent| manager.apply_build_operations(&mut grid, intent))
        .collect();
    (grid, results)
}

/// Applies all but the last intent, then previews the last one.
fn preview_plan(intents: &[BuildIntent]) -> Option<(&BuildIntent, BuildPreview)> {
    let (last, earlier) = intents.split_last()?;
    let (grid, _) = apply_plan(earlier);
    let preview = BuildManager::new().preview_build_operations(&grid, last);
    Some((last, preview))
}

fn print_result(result: &BuildResult) {
    let intent = result.intent();
    println!("{:?} on {} cells", intent.action(), intent.cells().len());
    for entry in result.results() {
        println!("  {}", describe(entry));
    }

    let summary = result.summary();
    println!(
        "  placed {}, replaced {}, removed {}, skipped {}, failed {}",
        summary.placed, summary.replaced, summary.removed, summary.skipped, summary.failed
    );
}

fn describe(result: &OperationResult) -> String {
    let cell = result
        .cell()
        .map_or_else(|| String::from("(unknown)"), |cell| cell.to_string());
    if result.is_success() {
        format!("{cell} {:?}", result.outcome())
    } else {
        format!("{cell} {:?}: {:?}", result.outcome(), result.reason())
    }
}

fn print_grid(grid: &Grid) {
    println!(
        "map holds {} cells, {} occupied",
        grid.cell_count(),
        query::occupied_cells(grid).len()
    );
    for cell in grid.cells() {
        let floor = cell.floor().map_or_else(|| "-".to_owned(), |f| f.to_string());
        let structure = cell
            .structure()
            .map_or_else(|| "-".to_owned(), |s| s.to_string());
        let furniture = cell
            .furniture()
            .map_or_else(|| "-".to_owned(), |f| f.to_string());
        println!(
            "  {} floor={floor} structure={structure} furniture={furniture}",
            cell.coord()
        );
    }
}
