//! Configuration management for the Game of Life simulator

pub mod settings;

pub use settings::{
    Settings, SimulationConfig, InputConfig, DisplayConfig, OutputConfig, OutputFormat, CliOverrides
};
