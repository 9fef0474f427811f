//! Conway's Game of Life on a fixed-size grid
//!
//! The [`game_of_life`] module holds the grid engine. Seed loading, rendering
//! and the run loop sit around it in [`game_of_life::io`], [`utils`] and
//! [`simulation`].

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Cell, Grid, GridError};
pub use simulation::{RunReport, Simulation};

use anyhow::{Context, Result};
use std::io::Write;

/// Load the configured seed and run it to completion, writing frames to `out`
pub fn run_simulation<W: Write>(settings: &Settings, out: &mut W) -> Result<RunReport> {
    let load = game_of_life::load_seed_from_file(&settings.input.seed_file)?;

    let mut simulation = Simulation::new(
        load.grid,
        settings.simulation.clone(),
        utils::GridRenderer::from(&settings.display),
        settings.display.clear_screen,
    );
    let report = simulation.run(out)?;

    if let Some(ref path) = settings.output.report_file {
        report
            .save_to_file(path, settings.output.format)
            .context("Failed to save run report")?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::simulation::StopReason;
    use tempfile::tempdir;

    #[test]
    fn test_run_simulation_from_settings() {
        let temp_dir = tempdir().unwrap();
        let seed = temp_dir.path().join("seed.txt");
        // The last line is off the grid and gets skipped
        std::fs::write(&seed, "4\n4\n1 1\n2 1\n1 2\n2 2\n7 7\n").unwrap();

        let mut settings = Settings::default();
        settings.input.seed_file = seed;
        settings.simulation.interval_ms = 0;
        settings.simulation.max_generations = Some(3);
        settings.display.clear_screen = false;
        settings.output.report_file = Some(temp_dir.path().join("report.yaml"));
        settings.output.format = OutputFormat::Yaml;

        let mut out = Vec::new();
        let report = run_simulation(&settings, &mut out).unwrap();

        assert_eq!(report.generations, 3);
        assert_eq!(report.stop_reason, StopReason::MaxGenerations);
        assert_eq!(report.living_cells, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
        assert!(temp_dir.path().join("report.yaml").exists());
        assert!(String::from_utf8(out).unwrap().contains("Generation: 3"));
    }

    #[test]
    fn test_invalid_seed_aborts_before_running() {
        let temp_dir = tempdir().unwrap();
        let seed = temp_dir.path().join("seed.txt");
        std::fs::write(&seed, "0\n4\n").unwrap();

        let mut settings = Settings::default();
        settings.input.seed_file = seed;

        let mut out = Vec::new();
        let err = run_simulation(&settings, &mut out).unwrap_err();
        assert!(err.chain().any(|cause| cause.downcast_ref::<GridError>().is_some()));
        assert!(out.is_empty());
    }
}
