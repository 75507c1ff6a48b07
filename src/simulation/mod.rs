//! Simulation driver: pacing, stop conditions and run summaries

pub mod session;

pub use session::Session;

use crate::config::{BoundaryMode, PacingConfig, SimulationSpeed};
use crate::life::{Grid, LifeEngine};
use crate::render::Renderer;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Stabilized,
    UserQuit,
    GenerationLimit,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub generations: usize,
    pub stop_reason: StopReason,
    pub boundary_mode: BoundaryMode,
    pub rows: usize,
    pub cols: usize,
    pub final_living: usize,
    pub final_saturated: usize,
}

impl RunOutcome {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the summary as JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let json = self.to_json().context("Failed to serialize run summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write run summary: {}", path.display()))?;
        Ok(())
    }
}

/// Owns a colony for the duration of one run and drives it generation by generation
pub struct Simulation<R: Renderer> {
    grid: Grid,
    engine: LifeEngine,
    renderer: R,
    pacing: PacingConfig,
    max_generations: Option<usize>,
    stop: Arc<AtomicBool>,
    generation: usize,
}

impl<R: Renderer> Simulation<R> {
    pub fn new(grid: Grid, engine: LifeEngine, renderer: R, pacing: PacingConfig) -> Self {
        Self {
            grid,
            engine,
            renderer,
            pacing,
            max_generations: None,
            stop: Arc::new(AtomicBool::new(false)),
            generation: 0,
        }
    }

    /// Stop after this many generations even if the colony is still changing
    pub fn with_generation_limit(mut self, limit: Option<usize>) -> Self {
        self.max_generations = limit;
        self
    }

    /// Share a flag that ends the run as a user quit once it is set
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Run until the colony stabilizes, the user quits or the generation limit is hit.
    ///
    /// The stop flag is checked before every generation at every speed. In
    /// manual mode each generation also waits for a line on `input`. A line
    /// starting with `q` or end of input quits. Prompts go to `prompt`.
    pub fn run<I: BufRead, O: Write>(
        &mut self,
        speed: SimulationSpeed,
        input: &mut I,
        prompt: &mut O,
    ) -> Result<RunOutcome> {
        let delay = speed.frame_delay(&self.pacing);
        tracing::info!(
            mode = %self.engine.mode(),
            ?speed,
            rows = self.grid.rows,
            cols = self.grid.cols,
            living = self.grid.living_count(),
            "starting simulation"
        );

        self.renderer.draw(&self.grid, self.generation)?;

        let stop_reason = loop {
            if self.stop.load(Ordering::SeqCst) {
                break StopReason::UserQuit;
            }

            if let Some(limit) = self.max_generations {
                if self.generation >= limit {
                    break StopReason::GenerationLimit;
                }
            }

            if delay.is_none() {
                write!(prompt, "RETURN to continue (or \"quit\" to end simulation): ")?;
                prompt.flush()?;

                let mut line = String::new();
                let read = input.read_line(&mut line).context("Failed to read from input")?;
                if read == 0 || line.trim_start().to_ascii_lowercase().starts_with('q') {
                    break StopReason::UserQuit;
                }
            }

            let report = self.engine.step_with_report(&mut self.grid);
            self.generation += 1;
            tracing::debug!(
                generation = self.generation,
                births = report.births,
                deaths = report.deaths,
                living = report.living,
                saturated = report.saturated,
                "generation complete"
            );

            self.renderer.draw(&self.grid, self.generation)?;

            if report.stabilized {
                writeln!(prompt, "Colony stabilized.")?;
                break StopReason::Stabilized;
            }

            if let Some(delay) = delay {
                if !delay.is_zero() {
                    std::thread::sleep(delay);
                }
            }
        };

        tracing::info!(generations = self.generation, ?stop_reason, "simulation finished");

        Ok(RunOutcome {
            generations: self.generation,
            stop_reason,
            boundary_mode: self.engine.mode(),
            rows: self.grid.rows,
            cols: self.grid.cols,
            final_living: self.grid.living_count(),
            final_saturated: self.grid.saturated_count(self.engine.max_age()),
        })
    }
}
