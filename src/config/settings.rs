//! Configuration settings for the life colony simulator

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::life::Age;

/// Default saturation ceiling for cell ages
pub const DEFAULT_MAX_AGE: Age = 12;
/// Default dimensions of a randomly seeded colony
pub const DEFAULT_RANDOM_ROWS: usize = 70;
pub const DEFAULT_RANDOM_COLS: usize = 90;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub seed: SeedConfig,
    pub pacing: PacingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub boundary_mode: BoundaryMode,
    pub speed: SimulationSpeed,
    pub max_age: Age,
    #[serde(default)]
    pub max_generations: Option<usize>,
}

/// How edge cells count neighbors that fall off the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Off-grid neighbors are absent
    Plateau,
    /// The grid wraps around like a torus
    Donut,
    /// Off-grid lookups clamp back onto the nearest edge
    Mirror,
}

/// Pacing of the simulation loop. Menu choices 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationSpeed {
    Ludicrous,
    Fast,
    Tortoise,
    /// One generation per RETURN key press
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub source: SeedSource,
    pub setup_file: PathBuf,
    pub rows: usize,
    pub cols: usize,
    pub seed_max_age: Age,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedSource {
    File,
    Random,
}

/// Inter-frame delays for the timed speeds, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PacingConfig {
    pub fast_ms: u64,
    pub tortoise_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub style: OutputStyle,
    pub color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStyle {
    Visual,
    Ages,
    Quiet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                boundary_mode: BoundaryMode::Plateau,
                speed: SimulationSpeed::Fast,
                max_age: DEFAULT_MAX_AGE,
                max_generations: None,
            },
            seed: SeedConfig {
                source: SeedSource::Random,
                setup_file: PathBuf::from("colonies/glider.txt"),
                rows: DEFAULT_RANDOM_ROWS,
                cols: DEFAULT_RANDOM_COLS,
                seed_max_age: DEFAULT_MAX_AGE,
                rng_seed: None,
            },
            pacing: PacingConfig {
                fast_ms: 100,
                tortoise_ms: 500,
            },
            output: OutputConfig {
                style: OutputStyle::Visual,
                color: true,
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
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

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
        if self.simulation.max_age == 0 {
            anyhow::bail!("Maximum cell age must be positive");
        }

        if self.simulation.max_generations == Some(0) {
            anyhow::bail!("Generation limit must be positive when set");
        }

        if self.seed.seed_max_age == 0 || self.seed.seed_max_age > self.simulation.max_age {
            anyhow::bail!(
                "Seed age ceiling {} must be between 1 and the maximum age {}",
                self.seed.seed_max_age,
                self.simulation.max_age
            );
        }

        match self.seed.source {
            SeedSource::Random => {
                if self.seed.rows == 0 || self.seed.cols == 0 {
                    anyhow::bail!(
                        "Random colony dimensions must be positive, got {}x{}",
                        self.seed.rows,
                        self.seed.cols
                    );
                }
            }
            SeedSource::File => {
                if !self.seed.setup_file.exists() {
                    anyhow::bail!("Setup file does not exist: {}", self.seed.setup_file.display());
                }
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref setup_file) = cli_overrides.setup_file {
            self.seed.source = SeedSource::File;
            self.seed.setup_file = setup_file.clone();
        }
        if cli_overrides.random {
            self.seed.source = SeedSource::Random;
        }
        if let Some(mode) = cli_overrides.boundary_mode {
            self.simulation.boundary_mode = mode;
        }
        if let Some(speed) = cli_overrides.speed {
            self.simulation.speed = speed;
        }
        if let Some(max_generations) = cli_overrides.max_generations {
            self.simulation.max_generations = Some(max_generations);
        }
        if let Some(rng_seed) = cli_overrides.rng_seed {
            self.seed.rng_seed = Some(rng_seed);
        }
        if let Some(style) = cli_overrides.style {
            self.output.style = style;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub setup_file: Option<PathBuf>,
    pub random: bool,
    pub boundary_mode: Option<BoundaryMode>,
    pub speed: Option<SimulationSpeed>,
    pub max_generations: Option<usize>,
    pub rng_seed: Option<u64>,
    pub style: Option<OutputStyle>,
}

impl BoundaryMode {
    pub const ALL: [BoundaryMode; 3] = [BoundaryMode::Plateau, BoundaryMode::Donut, BoundaryMode::Mirror];

    pub fn description(self) -> &'static str {
        match self {
            BoundaryMode::Plateau => "cells on edges just have fewer neighbors",
            BoundaryMode::Donut => "cells on edges wrap around to find neighbors",
            BoundaryMode::Mirror => "cells on edges reflect back to find neighbors",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryMode::Plateau => "plateau",
            BoundaryMode::Donut => "donut",
            BoundaryMode::Mirror => "mirror",
        };
        f.write_str(name)
    }
}

impl FromStr for BoundaryMode {
    type Err = String;

    /// Accepts full names or the menu letters `P`, `D`, `M`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "plateau" => Ok(BoundaryMode::Plateau),
            "d" | "donut" => Ok(BoundaryMode::Donut),
            "m" | "mirror" => Ok(BoundaryMode::Mirror),
            other => Err(format!(
                "unknown boundary mode '{}', expected plateau, donut or mirror",
                other
            )),
        }
    }
}

impl SimulationSpeed {
    /// Delay between generations, `None` for manual stepping
    pub fn frame_delay(self, pacing: &PacingConfig) -> Option<Duration> {
        match self {
            SimulationSpeed::Ludicrous => Some(Duration::ZERO),
            SimulationSpeed::Fast => Some(Duration::from_millis(pacing.fast_ms)),
            SimulationSpeed::Tortoise => Some(Duration::from_millis(pacing.tortoise_ms)),
            SimulationSpeed::Manual => None,
        }
    }
}

impl FromStr for SimulationSpeed {
    type Err = String;

    /// Accepts names or the menu numbers `1` through `4`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "ludicrous" => Ok(SimulationSpeed::Ludicrous),
            "2" | "fast" => Ok(SimulationSpeed::Fast),
            "3" | "tortoise" => Ok(SimulationSpeed::Tortoise),
            "4" | "manual" => Ok(SimulationSpeed::Manual),
            other => Err(format!(
                "unknown speed '{}', expected 1-4 or ludicrous, fast, tortoise, manual",
                other
            )),
        }
    }
}

impl FromStr for OutputStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visual" => Ok(OutputStyle::Visual),
            "ages" => Ok(OutputStyle::Ages),
            "quiet" => Ok(OutputStyle::Quiet),
            other => Err(format!("unknown output style '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.simulation.max_age, 12);
        assert_eq!(settings.seed.rows, 70);
        assert_eq!(settings.seed.cols, 90);
    }

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/life.yaml");

        let mut settings = Settings::default();
        settings.simulation.boundary_mode = BoundaryMode::Mirror;
        settings.simulation.max_generations = Some(40);
        settings.seed.rng_seed = Some(7);
        settings.to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("boundary_mode: mirror"));

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.boundary_mode, BoundaryMode::Mirror);
        assert_eq!(loaded.simulation.max_generations, Some(40));
        assert_eq!(loaded.seed.rng_seed, Some(7));
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.simulation.max_age = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.seed_max_age = 20;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.rows = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.source = SeedSource::File;
        settings.seed.setup_file = PathBuf::from("does/not/exist.txt");
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            setup_file: Some(PathBuf::from("fish.txt")),
            boundary_mode: Some(BoundaryMode::Donut),
            speed: Some(SimulationSpeed::Manual),
            max_generations: Some(5),
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.seed.source, SeedSource::File);
        assert_eq!(settings.seed.setup_file, PathBuf::from("fish.txt"));
        assert_eq!(settings.simulation.boundary_mode, BoundaryMode::Donut);
        assert_eq!(settings.simulation.speed, SimulationSpeed::Manual);
        assert_eq!(settings.simulation.max_generations, Some(5));
    }

    #[test]
    fn test_parse_menu_choices() {
        assert_eq!("P".parse::<BoundaryMode>().unwrap(), BoundaryMode::Plateau);
        assert_eq!("donut".parse::<BoundaryMode>().unwrap(), BoundaryMode::Donut);
        assert_eq!(" m ".parse::<BoundaryMode>().unwrap(), BoundaryMode::Mirror);
        assert!("x".parse::<BoundaryMode>().is_err());

        assert_eq!("1".parse::<SimulationSpeed>().unwrap(), SimulationSpeed::Ludicrous);
        assert_eq!("4".parse::<SimulationSpeed>().unwrap(), SimulationSpeed::Manual);
        assert!("5".parse::<SimulationSpeed>().is_err());
    }

    #[test]
    fn test_frame_delays() {
        let pacing = Settings::default().pacing;
        assert_eq!(SimulationSpeed::Ludicrous.frame_delay(&pacing), Some(Duration::ZERO));
        assert_eq!(SimulationSpeed::Fast.frame_delay(&pacing), Some(Duration::from_millis(100)));
        assert_eq!(SimulationSpeed::Tortoise.frame_delay(&pacing), Some(Duration::from_millis(500)));
        assert_eq!(SimulationSpeed::Manual.frame_delay(&pacing), None);
    }
}
