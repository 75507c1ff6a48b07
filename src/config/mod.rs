//! Configuration management for the life colony simulator

pub mod settings;

pub use settings::{
    Settings, SimulationConfig, SeedConfig, PacingConfig, OutputConfig,
    BoundaryMode, SimulationSpeed, SeedSource, OutputStyle, CliOverrides,
    DEFAULT_MAX_AGE, DEFAULT_RANDOM_ROWS, DEFAULT_RANDOM_COLS,
};
