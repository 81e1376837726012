use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use city_roads::city::{self, CityMap};
use city_roads::json;

#[derive(Parser)]
#[command(name = "city_roads")]
#[command(about = "Procedural city road network generator and viewer")]
struct Cli {
    /// Preview width in characters
    #[arg(long, default_value = "120", global = true)]
    width: usize,

    /// Preview height in characters
    #[arg(long, default_value = "40", global = true)]
    height: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a city from a seed and preview it
    Generate { seed: u64 },

    /// Generate a city from a seed and write it as JSON
    Export { seed: u64, path: PathBuf },

    /// Load a city from JSON and preview it
    Load { path: PathBuf },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,city_roads=info"),
    )
    .init();

    // Usage errors exit with 1, not clap's default of 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate { seed } => {
            let map = city::generate(seed)
                .with_context(|| format!("failed to generate city for seed {}", seed))?;
            show(&map, cli.width, cli.height);
        }
        Command::Export { seed, path } => {
            let map = city::generate(seed)
                .with_context(|| format!("failed to generate city for seed {}", seed))?;
            json::save_to_path(&map, &path)
                .with_context(|| format!("failed to write json to {}", path.display()))?;
        }
        Command::Load { path } => {
            let mut map = CityMap::new();
            json::load_from_path(&path, &mut map)
                .with_context(|| format!("failed to load json from {}", path.display()))?;
            show(&map, cli.width, cli.height);
        }
    }
    Ok(())
}

/// Log a summary and print the text preview
fn show(map: &CityMap, width: usize, height: usize) {
    let bounds = city::compute_bounds(map);
    info!("Segments: {}", map.len());
    info!("Total road length: {:.1} m", map.total_length());
    info!("Junctions: {}", city::RoadGraph::from_city_map(map).node_count());
    info!(
        "Bounds: ({:.1}, {:.1}) - ({:.1}, {:.1})",
        bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
    );
    print!("{}", city::render_preview(map, width, height));
}
