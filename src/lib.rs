//! Life Colony
//!
//! Conway's Game of Life on a finite grid where every cell carries an age,
//! with plateau, donut and mirror handling of the grid edges.

pub mod config;
pub mod life;
pub mod render;
pub mod simulation;
pub mod utils;

pub use config::{BoundaryMode, Settings, SimulationSpeed};
pub use life::{Grid, LifeEngine};
pub use simulation::{RunOutcome, Simulation, StopReason};

use anyhow::{Context, Result};
use crate::config::{SeedConfig, SeedSource};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build the starting colony described by the seed settings
pub fn seed_colony(seed: &SeedConfig) -> Result<Grid> {
    match seed.source {
        SeedSource::File => life::load_grid_from_file(&seed.setup_file)
            .with_context(|| format!("Failed to load colony from {}", seed.setup_file.display())),
        SeedSource::Random => {
            let grid = match seed.rng_seed {
                Some(value) => life::generate_random_grid(
                    seed.rows,
                    seed.cols,
                    seed.seed_max_age,
                    &mut StdRng::seed_from_u64(value),
                ),
                None => life::generate_random_grid(
                    seed.rows,
                    seed.cols,
                    seed.seed_max_age,
                    &mut rand::rng(),
                ),
            };
            Ok(grid)
        }
    }
}

/// Engine configured from the simulation settings
pub fn engine_for(settings: &Settings) -> LifeEngine {
    LifeEngine::new(settings.simulation.boundary_mode, settings.simulation.max_age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_seed_from_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bar.txt");
        std::fs::write(&path, "# bar\n3\n3\n---\nXXX\n---\n").unwrap();

        let mut settings = Settings::default();
        settings.seed.source = SeedSource::File;
        settings.seed.setup_file = path;

        let grid = seed_colony(&settings.seed).unwrap();
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.living_count(), 3);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut settings = Settings::default();
        settings.seed.rows = 12;
        settings.seed.cols = 20;
        settings.seed.rng_seed = Some(1234);

        let a = seed_colony(&settings.seed).unwrap();
        let b = seed_colony(&settings.seed).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.rows, 12);
        assert_eq!(a.cols, 20);
    }

    #[test]
    fn test_missing_setup_file() {
        let mut settings = Settings::default();
        settings.seed.source = SeedSource::File;
        settings.seed.setup_file = "no/such/colony.txt".into();
        assert!(seed_colony(&settings.seed).is_err());
    }

    #[test]
    fn test_engine_for_settings() {
        let mut settings = Settings::default();
        settings.simulation.boundary_mode = BoundaryMode::Donut;
        settings.simulation.max_age = 5;
        let engine = engine_for(&settings);
        assert_eq!(engine.mode(), BoundaryMode::Donut);
        assert_eq!(engine.max_age(), 5);
    }
}
