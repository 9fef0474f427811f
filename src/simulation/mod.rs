//! Driving a grid over time: pacing, rendering and stop conditions

pub mod observer;
pub mod runner;

pub use observer::{Outcome, StabilityObserver};
pub use runner::{RunReport, Simulation, StopReason};
