//! Drawing colonies after each generation

use crate::config::OutputStyle;
use crate::life::{Age, Grid};
use crate::utils::GridFormatter;
use anyhow::{Context, Result};
use std::io::Write;

/// Clears the screen and homes the cursor
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Receives the full colony after every generation
pub trait Renderer {
    fn draw(&mut self, grid: &Grid, generation: usize) -> Result<()>;
}

/// Paints colonies onto a terminal or any other writer
pub struct TerminalRenderer<W: Write> {
    out: W,
    style: OutputStyle,
    max_age: Age,
    color: bool,
    clear_between_frames: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, style: OutputStyle, max_age: Age) -> Self {
        Self {
            out,
            style,
            max_age,
            color: false,
            clear_between_frames: false,
        }
    }

    /// Color live cells with ANSI grayscale by age
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Redraw in place instead of scrolling
    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear_between_frames = clear;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, grid: &Grid, generation: usize) -> Result<()> {
        let body = match self.style {
            OutputStyle::Quiet => return Ok(()),
            OutputStyle::Visual => GridFormatter::format_grid_shaded(grid, self.max_age, self.color),
            OutputStyle::Ages => GridFormatter::format_grid_ages(grid),
        };

        if self.clear_between_frames {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(
            self.out,
            "Generation {} ({} living)",
            generation,
            grid.living_count()
        )?;
        self.out.write_all(body.as_bytes())?;
        self.out.flush().context("Failed to flush renderer output")?;
        Ok(())
    }
}
