//! Colony grid, update rule and loaders

pub mod grid;
pub mod boundary;
pub mod rules;
pub mod engine;
pub mod io;

pub use grid::{Age, Grid};
pub use rules::AgeRule;
pub use engine::{LifeEngine, StepReport};
pub use io::{
    load_grid_from_file, parse_setup, save_grid_to_file, generate_random_grid,
    create_example_colonies, LoadError,
};
