//! Game of Life core functionality

pub mod error;
pub mod grid;
pub mod rules;
pub mod io;

pub use error::GridError;
pub use grid::{Cell, Grid};
pub use rules::LifeRules;
pub use io::{
    create_example_seeds, grid_to_seed_string, load_seed_from_file, parse_seed, save_seed_to_file,
    Seed, SeedLoad, SeedRejection,
};
