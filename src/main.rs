mod app;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use idv_geometry::config::GeometryConfig;

/// IDV geometry - bounding boxes and draw order for spherical volume data
#[derive(Parser, Debug)]
#[command(name = "idv-geometry", version, about)]
struct Cli {
    /// JSON config file (missing fields keep their defaults)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Angle tolerance in radians for pole, equator and axis detection
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tile a spherical shell and compute cartesian bounding boxes
    Bboxes(app::BboxesArgs),
    /// Sort random points along a ray
    Sort(app::SortArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let result = run(&cli);
    if let Err(e) = &result {
        log::error!("{}", e);
    }
    result
}

fn run(cli: &Cli) -> app::AppResult {
    let mut config = match &cli.config {
        Some(path) => GeometryConfig::load(path)?,
        None => GeometryConfig::default(),
    };
    if let Some(tolerance) = cli.tolerance {
        if !(tolerance >= 0.0) {
            return Err(format!("tolerance must be non-negative, got {}", tolerance).into());
        }
        config.bounds.angle_tolerance = tolerance;
    }

    match &cli.command {
        Command::Bboxes(args) => app::run_bboxes(args, &config),
        Command::Sort(args) => app::run_sort(args, &config),
    }
}
