//! Menu-driven session: pick a colony, a boundary mode and a speed, run, repeat

use super::{RunOutcome, Simulation};
use crate::config::{BoundaryMode, SeedSource, Settings, SimulationSpeed};
use crate::life::{load_grid_from_file, Grid};
use crate::render::Renderer;
use crate::utils::ColorOutput;
use crate::{engine_for, seed_colony};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const MODE_CHOICES: [&str; 3] = [
    "P = Plateau Mode (cells on edges just have fewer neighbors)",
    "D = Donut Mode (cells on edges wrap around to find neighbors)",
    "M = Mirror Mode (cells on edges reflect back to find neighbors)",
];

const SPEED_CHOICES: [&str; 4] = [
    "1 = Ludicrous Speed!",
    "2 = Ow, my eyes hurt. Kick it back a notch.",
    "3 = That \"tortoise\" setting on your lawn mower.",
    "4 = PowerPoint mode",
];

/// Prompts on `output`, reads answers from `input`, and runs one simulation per round
pub struct Session<'a, I: BufRead, O: Write> {
    settings: &'a Settings,
    input: I,
    output: O,
    stop: Arc<AtomicBool>,
}

impl<'a, I: BufRead, O: Write> Session<'a, I, O> {
    pub fn new(settings: &'a Settings, input: I, output: O) -> Self {
        Self {
            settings,
            input,
            output,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that interrupts the current run. It is cleared before each new run.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Run simulations until the user declines another one.
    ///
    /// `make_renderer` builds a fresh renderer for every run.
    pub fn run<R, F>(&mut self, mut make_renderer: F) -> Result<Vec<RunOutcome>>
    where
        R: Renderer,
        F: FnMut(&Settings) -> R,
    {
        let mut outcomes = Vec::new();

        loop {
            writeln!(
                self.output,
                "\nYou can start your colony from random cells or read from a prepared file."
            )?;
            let grid = if self.ask_yes_no("Do you have a starting file in mind? ")? {
                self.ask_for_file()?
            } else {
                writeln!(self.output, "Okay, I will seed your colony randomly.")?;
                let mut seed = self.settings.seed.clone();
                seed.source = SeedSource::Random;
                seed_colony(&seed)?
            };

            let mode: BoundaryMode = self.ask_choice(
                "You choose how cells on the edges will count their neighbors.",
                &MODE_CHOICES,
            )?;
            let speed: SimulationSpeed =
                self.ask_choice("You choose how fast to run the simulation.", &SPEED_CHOICES)?;

            let mut settings = self.settings.clone();
            settings.simulation.boundary_mode = mode;
            settings.simulation.speed = speed;

            self.stop.store(false, Ordering::SeqCst);
            let mut simulation = Simulation::new(
                grid,
                engine_for(&settings),
                make_renderer(&settings),
                settings.pacing.clone(),
            )
            .with_generation_limit(settings.simulation.max_generations)
            .with_stop_flag(self.stop.clone());

            writeln!(self.output)?;
            let outcome = simulation.run(speed, &mut self.input, &mut self.output)?;
            tracing::info!(run = outcomes.len() + 1, ?outcome.stop_reason, "session run finished");
            outcomes.push(outcome);

            if !self.ask_yes_no("\nWould you like to run another simulation? ")? {
                break;
            }
        }

        Ok(outcomes)
    }

    /// Read one line, `None` at end of input
    fn read_answer(&mut self) -> Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            Ok(None)
        } else {
            Ok(Some(line.trim().to_string()))
        }
    }

    /// Yes/no question. End of input counts as no.
    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        loop {
            write!(self.output, "{}", question)?;
            let answer = match self.read_answer()? {
                Some(answer) => answer.to_ascii_lowercase(),
                None => return Ok(false),
            };
            if answer.starts_with('y') {
                return Ok(true);
            }
            if answer.starts_with('n') {
                return Ok(false);
            }
            writeln!(self.output, "Please answer yes or no.")?;
        }
    }

    /// Keep asking for a filename until one loads
    fn ask_for_file(&mut self) -> Result<Grid> {
        loop {
            write!(self.output, "Please enter the filename: ")?;
            let filename = self
                .read_answer()?
                .context("Input closed while waiting for a filename")?;

            match load_grid_from_file(&filename) {
                Ok(grid) => return Ok(grid),
                Err(err) => {
                    tracing::debug!(%filename, %err, "setup file rejected");
                    writeln!(
                        self.output,
                        "{}",
                        ColorOutput::warning(&format!(
                            "Unable to open the file named {} ({}). Please try again.",
                            filename, err
                        ))
                    )?;
                }
            }
        }
    }

    /// Show a menu and re-prompt until the answer parses
    fn ask_choice<T: FromStr>(&mut self, message: &str, choices: &[&str]) -> Result<T> {
        writeln!(self.output, "\n{}", message)?;
        for choice in choices {
            writeln!(self.output, "    {}", choice)?;
        }

        let keys: Vec<&str> = choices.iter().filter_map(|c| c.get(..1)).collect();
        loop {
            write!(self.output, "Your choice: ")?;
            let answer = self
                .read_answer()?
                .context("Input closed while waiting for a menu choice")?;
            // Only the first character selects, as in "Plateau" or "p"
            if let Some(key) = answer.get(..1) {
                if keys.iter().any(|k| k.eq_ignore_ascii_case(key)) {
                    if let Ok(value) = key.parse::<T>() {
                        return Ok(value);
                    }
                }
            }
            writeln!(self.output, "Acceptable answers are {}!", keys.join(", "))?;
        }
    }
}
