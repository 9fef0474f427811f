//! Command line front end for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_engine::{
    config::{CliOverrides, Settings},
    game_of_life::{create_example_seeds, grid_to_seed_string, load_seed_from_file, save_seed_to_file},
    run_simulation,
    simulation::StopReason,
    utils::{GridRenderer, Tone},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Conway's Game of Life on a fixed-size grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate a seed in the terminal
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed file (overrides config)
        #[arg(short, long)]
        seed: Option<PathBuf>,

        /// Stop after this many generations (overrides config)
        #[arg(short = 'g', long)]
        max_generations: Option<u64>,

        /// Pause between generations in milliseconds (overrides config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Stop once the pattern dies out, freezes or repeats
        #[arg(long)]
        stop_on_stable: bool,

        /// Compute generations on all cores
        #[arg(long)]
        parallel: bool,

        /// Write a run report to this file (overrides config)
        #[arg(short, long)]
        report: Option<PathBuf>,
    },

    /// Step a seed forward without display and print or save the result
    Advance {
        /// Seed file
        #[arg(short, long)]
        seed: PathBuf,

        /// Number of generations to step
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Output seed file; prints to stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a seed with coordinates and statistics
    Show {
        /// Seed file
        #[arg(short, long)]
        seed: PathBuf,
    },

    /// Create example configuration and seed files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Overwrite existing configuration and seed files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", Tone::Error.paint(&format!("Error: {e:#}")));
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            config, seed, max_generations, interval_ms, stop_on_stable, parallel, report
        } => {
            let overrides = CliOverrides {
                seed_file: seed,
                max_generations,
                interval_ms,
                stop_on_stable,
                parallel,
                report_file: report,
            };
            run_command(config, overrides)
        }
        Commands::Advance { seed, generations, output } => {
            advance_command(seed, generations, output)
        }
        Commands::Show { seed } => {
            show_command(seed)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        warn!("Config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    info!(
        seed = %settings.input.seed_file.display(),
        max_generations = ?settings.simulation.max_generations,
        interval_ms = settings.simulation.interval_ms,
        "Loaded configuration"
    );

    let stdout = std::io::stdout();
    let report = run_simulation(&settings, &mut stdout.lock())?;

    let summary = match report.stop_reason {
        StopReason::MaxGenerations => format!("Reached generation {}", report.generations),
        StopReason::Stable { outcome } => format!("Settled at generation {}: {:?}", report.generations, outcome),
    };
    println!("{}", Tone::Success.paint(&summary));

    if let Some(path) = settings.output.report_file {
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

fn advance_command(seed_path: PathBuf, generations: u64, output: Option<PathBuf>) -> Result<()> {
    let mut grid = load_seed_from_file(&seed_path)?.grid;

    let start = Instant::now();
    for _ in 0..generations {
        grid.step();
    }
    info!(generations, elapsed_ms = start.elapsed().as_millis() as u64, "Advanced seed");

    match output {
        Some(path) => {
            save_seed_to_file(&grid, &path)?;
            println!("{}", Tone::Success.paint(&format!(
                "Generation {} saved to {}", grid.generation(), path.display()
            )));
        }
        None => print!("{}", grid_to_seed_string(&grid)),
    }

    Ok(())
}

fn show_command(seed_path: PathBuf) -> Result<()> {
    let load = load_seed_from_file(&seed_path)?;
    let grid = &load.grid;

    println!("Seed Grid ({}x{}):", grid.width(), grid.height());
    println!("{}", GridRenderer { alive: '#', dead: '.' }.render_with_coords(grid));

    println!("Grid Statistics:");
    println!("  Living cells: {}", grid.living_count());
    println!("  Density: {:.1}%", (grid.living_count() as f64 / (grid.width() * grid.height()) as f64) * 100.0);

    if !load.rejected.is_empty() {
        println!("{}", Tone::Warning.paint(&format!("{} seed line(s) rejected:", load.rejected.len())));
        for rejection in &load.rejected {
            println!("  {}", rejection);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    let seed_dir = directory.join("input/seeds");

    for dir in [&config_dir, &seed_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    println!("{}", Tone::Info.paint(&format!("Setting up in {}", directory.display())));

    let default_path = config_dir.join("default.yaml");
    write_config_unless_exists(&Settings::default(), &default_path, force)
        .context("Failed to create default configuration")?;

    let written = create_example_seeds(&seed_dir, force)
        .context("Failed to create example seeds")?;
    for seed in ["glider.txt", "blinker.txt", "block.txt", "beacon.txt"] {
        let path = seed_dir.join(seed);
        report_written(&path, written.contains(&path));
    }

    let examples_dir = config_dir.join("examples");

    // Short, fast blinker run that stops once it starts repeating
    let mut blinker = Settings::default();
    blinker.input.seed_file = PathBuf::from("input/seeds/blinker.txt");
    blinker.simulation.interval_ms = 250;
    blinker.simulation.stop_on_stable = true;
    write_config_unless_exists(&blinker, &examples_dir.join("blinker.yaml"), force)?;

    let mut glider = Settings::default();
    glider.input.seed_file = PathBuf::from("input/seeds/glider.txt");
    glider.simulation.max_generations = Some(40);
    glider.simulation.stop_on_stable = true;
    glider.output.report_file = Some(PathBuf::from("output/glider_report.json"));
    write_config_unless_exists(&glider, &examples_dir.join("glider.yaml"), force)?;

    println!("\n{}", Tone::Success.paint("Setup complete!"));
    println!("Run: cargo run -- run --config config/examples/blinker.yaml");

    Ok(())
}

fn write_config_unless_exists(settings: &Settings, path: &PathBuf, force: bool) -> Result<()> {
    let write = force || !path.exists();
    if write {
        settings.to_file(path)?;
    }
    report_written(path, write);
    Ok(())
}

fn report_written(path: &Path, written: bool) {
    if written {
        println!("Created: {}", path.display());
    } else {
        println!("Skipped: {} (already exists)", path.display());
    }
}
