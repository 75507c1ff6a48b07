//! Command line front end for the life colony simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_colony::{
    config::{BoundaryMode, CliOverrides, OutputStyle, Settings, SimulationSpeed},
    engine_for,
    life::{create_example_colonies, load_grid_from_file, LifeEngine},
    render::TerminalRenderer,
    seed_colony,
    simulation::Session,
    utils::{ColorOutput, GridFormatter},
    Simulation,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_colony")]
#[command(about = "Game of Life with ageing cells and configurable grid edges")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Setup file to start from (overrides config)
        #[arg(short, long, conflicts_with = "random")]
        file: Option<PathBuf>,

        /// Seed the colony randomly (overrides config)
        #[arg(short, long)]
        random: bool,

        /// Boundary mode: plateau, donut or mirror (P/D/M)
        #[arg(short, long)]
        mode: Option<BoundaryMode>,

        /// Speed: 1 ludicrous, 2 fast, 3 tortoise, 4 manual
        #[arg(short, long)]
        speed: Option<SimulationSpeed>,

        /// Stop after this many generations
        #[arg(short = 'g', long)]
        max_generations: Option<usize>,

        /// Seed for the random colony generator
        #[arg(long)]
        seed: Option<u64>,

        /// Output style: visual, ages or quiet
        #[arg(long)]
        style: Option<OutputStyle>,

        /// Write a JSON run summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Menu-driven session that asks for a colony, mode and speed, then offers another run
    Interactive {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create a default configuration and sample colonies
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Show a colony with its statistics and neighbor counts
    Inspect {
        /// Setup file to inspect
        #[arg(short, long)]
        file: PathBuf,

        /// Boundary mode used for neighbor counts
        #[arg(short, long, default_value = "plateau")]
        mode: BoundaryMode,

        /// Maximum cell age
        #[arg(long, default_value_t = life_colony::config::DEFAULT_MAX_AGE)]
        max_age: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            file,
            random,
            mode,
            speed,
            max_generations,
            seed,
            style,
            summary,
            verbose,
        } => {
            init_tracing(verbose);
            let overrides = CliOverrides {
                setup_file: file,
                random,
                boundary_mode: mode,
                speed,
                max_generations,
                rng_seed: seed,
                style,
            };
            run_command(config, overrides, summary, verbose)
        }
        Commands::Interactive { config, verbose } => {
            init_tracing(verbose);
            interactive_command(config)
        }
        Commands::Setup { directory, force } => {
            init_tracing(false);
            setup_command(directory, force)
        }
        Commands::Inspect { file, mode, max_age } => {
            init_tracing(false);
            inspect_command(file, mode, max_age)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// First Ctrl-C ends the current run cleanly, a second one exits immediately
fn install_stop_handler() -> Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let handler_flag = stop.clone();
    ctrlc::set_handler(move || {
        if handler_flag.swap(true, Ordering::SeqCst) {
            std::process::exit(130);
        }
    })
    .context("Failed to install Ctrl-C handler")?;
    Ok(stop)
}

fn terminal_renderer(settings: &Settings) -> TerminalRenderer<std::io::Stdout> {
    TerminalRenderer::new(
        std::io::stdout(),
        settings.output.style,
        settings.simulation.max_age,
    )
    .with_color(settings.output.color && ColorOutput::supports_color())
    .with_clear(
        settings.simulation.speed != SimulationSpeed::Manual
            && settings.output.style == OutputStyle::Visual,
    )
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn welcome() {
    println!("{}", ColorOutput::info("Welcome to Life, a simulation of the lifecycle of a bacteria colony."));
    println!("Cells live and die by the following rules:");
    println!("\tA cell with 1 or fewer neighbors dies of loneliness");
    println!("\tLocations with 2 neighbors remain stable");
    println!("\tLocations with 3 neighbors will spontaneously create life");
    println!("\tLocations with 4 or more neighbors die of overcrowding");
    println!("New cells are dark and lighten as they age.");
    println!();
}

fn run_command(
    config_path: PathBuf,
    overrides: CliOverrides,
    summary_path: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!(
            "  Boundary mode: {} ({})",
            settings.simulation.boundary_mode,
            settings.simulation.boundary_mode.description()
        );
        println!("  Speed: {:?}", settings.simulation.speed);
        println!("  Max age: {}", settings.simulation.max_age);
        println!("  Seed source: {:?}", settings.seed.source);
        println!();
    }

    welcome();

    let grid = seed_colony(&settings.seed)?;
    let speed = settings.simulation.speed;
    if speed != SimulationSpeed::Manual {
        println!("Press Ctrl-C to end the simulation.");
    }
    let stop = install_stop_handler()?;

    let mut simulation = Simulation::new(
        grid,
        engine_for(&settings),
        terminal_renderer(&settings),
        settings.pacing.clone(),
    )
    .with_generation_limit(settings.simulation.max_generations)
    .with_stop_flag(stop);

    let start_time = Instant::now();
    let stdin = std::io::stdin();
    let outcome = simulation
        .run(speed, &mut stdin.lock(), &mut std::io::stdout())
        .context("Simulation failed")?;

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Finished after {} generation(s) in {:.3}s ({:?})",
            outcome.generations,
            start_time.elapsed().as_secs_f64(),
            outcome.stop_reason
        ))
    );
    println!("{}", GridFormatter::format_statistics(simulation.grid(), settings.simulation.max_age));

    if let Some(path) = summary_path {
        outcome.save_to_file(&path)?;
        println!("Run summary saved to {}", path.display());
    }

    Ok(())
}

fn interactive_command(config_path: PathBuf) -> Result<()> {
    let settings = load_settings(&config_path)?;
    settings.validate().context("Configuration validation failed")?;

    welcome();
    println!("Press Ctrl-C during a timed run to end it.");
    let stop = install_stop_handler()?;

    let stdin = std::io::stdin();
    let mut session = Session::new(&settings, stdin.lock(), std::io::stdout()).with_stop_flag(stop);
    let outcomes = session.run(terminal_renderer)?;

    for (i, outcome) in outcomes.iter().enumerate() {
        println!(
            "Run {}: {} generation(s), {} mode, {:?}",
            i + 1,
            outcome.generations,
            outcome.boundary_mode,
            outcome.stop_reason
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let colonies_dir = directory.join("colonies");

    for dir in [&config_dir, &colonies_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_colonies(&colonies_dir).context("Failed to create sample colonies")?;
    println!("Created sample colonies in: {}", colonies_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: life_colony run --file colonies/glider.txt --mode donut");

    Ok(())
}

fn inspect_command(file: PathBuf, mode: BoundaryMode, max_age: u32) -> Result<()> {
    let grid = load_grid_from_file(&file)
        .with_context(|| format!("Failed to load colony from {}", file.display()))?;
    let engine = LifeEngine::new(mode, max_age);

    println!("Colony ({}x{}):", grid.rows, grid.cols);
    println!("{}", GridFormatter::format_grid_compact(&grid));
    println!("Statistics:");
    println!("{}", GridFormatter::format_statistics(&grid, max_age));
    println!("Neighbor counts ({} mode):", mode);
    println!("{}", GridFormatter::format_neighbor_counts(&grid, &engine));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "life_colony", "run", "--mode", "D", "--speed", "4", "--max-generations", "10",
        ])
        .unwrap();

        match cli.command {
            Commands::Run { mode, speed, max_generations, .. } => {
                assert_eq!(mode, Some(BoundaryMode::Donut));
                assert_eq!(speed, Some(SimulationSpeed::Manual));
                assert_eq!(max_generations, Some(10));
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_parses_interactive() {
        let cli = Cli::try_parse_from(["life_colony", "interactive", "--config", "life.yaml"]).unwrap();
        match cli.command {
            Commands::Interactive { config, verbose } => {
                assert_eq!(config, PathBuf::from("life.yaml"));
                assert!(!verbose);
            }
            _ => panic!("expected interactive command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_mode() {
        assert!(Cli::try_parse_from(["life_colony", "run", "--mode", "torus"]).is_err());
        assert!(Cli::try_parse_from(["life_colony", "run", "--file", "a.txt", "--random"]).is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("colonies/glider.txt").exists());

        let settings = Settings::from_file(&temp_dir.path().join("config/default.yaml")).unwrap();
        assert_eq!(settings.simulation.max_age, 12);
    }

    #[test]
    fn test_inspect_command() {
        let temp_dir = tempdir().unwrap();
        create_example_colonies(temp_dir.path()).unwrap();
        inspect_command(temp_dir.path().join("block.txt"), BoundaryMode::Mirror, 12).unwrap();
        assert!(inspect_command(temp_dir.path().join("missing.txt"), BoundaryMode::Mirror, 12).is_err());
    }
}
