//! Configuration settings for the Game of Life simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Stop after this many generations; run forever when unset
    pub max_generations: Option<u64>,
    /// Pause between generations
    pub interval_ms: u64,
    /// Stop once the grid dies out, freezes, or starts repeating
    pub stop_on_stable: bool,
    /// How many past generations to compare against when looking for cycles
    pub cycle_window: usize,
    /// Compute each step on the rayon thread pool
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub seed_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub alive_char: char,
    pub dead_char: char,
    pub clear_screen: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub report_file: Option<PathBuf>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                max_generations: None,
                interval_ms: 1000,
                stop_on_stable: false,
                cycle_window: 8,
                parallel: false,
            },
            input: InputConfig {
                seed_file: PathBuf::from("input/seeds/glider.txt"),
            },
            display: DisplayConfig {
                alive_char: '#',
                dead_char: ' ',
                clear_screen: true,
            },
            output: OutputConfig {
                report_file: None,
                format: OutputFormat::Json,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.simulation.max_generations == Some(0) {
            anyhow::bail!("Maximum generations must be positive");
        }

        if self.simulation.stop_on_stable && self.simulation.cycle_window == 0 {
            anyhow::bail!("Cycle window must be positive when stopping on stable patterns");
        }

        if self.display.alive_char == self.display.dead_char {
            anyhow::bail!("Alive and dead display characters must differ");
        }

        if !self.input.seed_file.exists() {
            anyhow::bail!("Seed file does not exist: {}", self.input.seed_file.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref seed_file) = cli_overrides.seed_file {
            self.input.seed_file = seed_file.clone();
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            self.simulation.max_generations = Some(max_generations);
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.simulation.interval_ms = interval_ms;
        }
        if cli_overrides.stop_on_stable {
            self.simulation.stop_on_stable = true;
        }
        if cli_overrides.parallel {
            self.simulation.parallel = true;
        }
        if let Some(ref report_file) = cli_overrides.report_file {
            self.output.report_file = Some(report_file.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub seed_file: Option<PathBuf>,
    pub max_generations: Option<u64>,
    pub interval_ms: Option<u64>,
    pub stop_on_stable: bool,
    pub parallel: bool,
    pub report_file: Option<PathBuf>,
}
