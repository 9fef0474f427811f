//! Output helpers

pub mod display;

pub use display::{GridRenderer, Tone, CLEAR_SCREEN};
