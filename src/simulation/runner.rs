//! The print-step-pause loop that drives a grid

use super::observer::{Outcome, StabilityObserver};
use crate::config::{OutputFormat, SimulationConfig};
use crate::game_of_life::Grid;
use crate::utils::{GridRenderer, CLEAR_SCREEN};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    MaxGenerations,
    Stable { outcome: Outcome },
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub generations: u64,
    pub stop_reason: StopReason,
    pub width: usize,
    pub height: usize,
    pub living_count: usize,
    pub living_cells: Vec<(usize, usize)>,
    pub elapsed_ms: u64,
}

impl RunReport {
    pub fn to_string_as(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self).context("Failed to serialize report as JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(self).context("Failed to serialize report as YAML"),
        }
    }

    /// Save the report, creating parent directories as needed
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, self.to_string_as(format)?)
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }
}

/// Owns a grid and runs it generation by generation
pub struct Simulation {
    grid: Grid,
    config: SimulationConfig,
    renderer: GridRenderer,
    clear_screen: bool,
    observer: StabilityObserver,
}

impl Simulation {
    pub fn new(grid: Grid, config: SimulationConfig, renderer: GridRenderer, clear_screen: bool) -> Self {
        let observer = StabilityObserver::new(config.cycle_window);
        Self {
            grid,
            config,
            renderer,
            clear_screen,
            observer,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn step(&mut self) {
        if self.config.parallel {
            self.grid.step_parallel();
        } else {
            self.grid.step();
        }
    }

    fn check_stop(&mut self) -> Option<StopReason> {
        // Feed the observer every generation so its history stays contiguous
        let outcome = self.observer.observe(&self.grid);

        if self.config.stop_on_stable {
            if let Some(outcome) = outcome {
                return Some(StopReason::Stable { outcome });
            }
        }

        self.config
            .max_generations
            .filter(|&max| self.grid.generation() >= max)
            .map(|_| StopReason::MaxGenerations)
    }

    /// Run until a stop condition holds, writing each frame to `out`.
    ///
    /// Every iteration renders the grid, steps it, prints the generation
    /// counter and pauses. The final state is rendered before returning.
    /// Without `max_generations` or `stop_on_stable` this never returns.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunReport> {
        let start = Instant::now();
        let interval = Duration::from_millis(self.config.interval_ms);

        info!(
            width = self.grid.width(),
            height = self.grid.height(),
            living = self.grid.living_count(),
            "Starting simulation"
        );

        self.observer.reset();
        let mut stop = self.check_stop();

        let stop_reason = loop {
            if self.clear_screen {
                write!(out, "{CLEAR_SCREEN}")?;
            }
            write!(out, "{}", self.renderer.render(&self.grid))?;

            if let Some(reason) = stop {
                break reason;
            }

            self.step();
            writeln!(out, "Generation: {}", self.grid.generation())?;
            out.flush()?;
            debug!(generation = self.grid.generation(), living = self.grid.living_count(), "Stepped");

            stop = self.check_stop();
            if stop.is_none() && !interval.is_zero() {
                std::thread::sleep(interval);
            }
        };
        out.flush()?;

        info!(generation = self.grid.generation(), ?stop_reason, "Simulation stopped");

        Ok(RunReport {
            generations: self.grid.generation(),
            stop_reason,
            width: self.grid.width(),
            height: self.grid.height(),
            living_count: self.grid.living_count(),
            living_cells: self.grid.living_cells(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        })
    }
}
