//! Display and output formatting utilities

use crate::life::{Age, Grid, LifeEngine};

/// Shade glyphs, newest cells first. Cells lighten as they age.
const SHADE_RAMP: [char; 4] = ['█', '▓', '▒', '░'];
/// ANSI 256-color grayscale range used for aged cells
const GRAY_DARK: u8 = 236;
const GRAY_LIGHT: u8 = 255;

/// Format colonies for display
pub struct GridFormatter;

impl GridFormatter {
    /// Shade index in `0..SHADE_RAMP.len()` for a live cell
    pub fn shade_index(age: Age, max_age: Age) -> usize {
        if max_age <= 1 {
            return 0;
        }
        let age = age.clamp(1, max_age);
        let steps = SHADE_RAMP.len() - 1;
        ((age - 1) as usize * steps + (max_age as usize - 2)) / (max_age - 1) as usize
    }

    /// Glyph for a cell of the given age, blank when dead
    pub fn shade_glyph(age: Age, max_age: Age) -> char {
        if age == 0 {
            ' '
        } else {
            SHADE_RAMP[Self::shade_index(age, max_age)]
        }
    }

    /// Grayscale color code for a live cell
    pub fn gray_level(age: Age, max_age: Age) -> u8 {
        if max_age <= 1 {
            return GRAY_LIGHT;
        }
        let age = age.clamp(1, max_age);
        let span = (GRAY_LIGHT - GRAY_DARK) as u32;
        GRAY_DARK + ((age - 1) * span / (max_age - 1)) as u8
    }

    /// Compact live/dead view
    pub fn format_grid_compact(grid: &Grid) -> String {
        grid.to_string()
    }

    /// One shaded glyph per cell, optionally colored by age
    pub fn format_grid_shaded(grid: &Grid, max_age: Age, color: bool) -> String {
        let mut output = String::with_capacity(grid.rows * (grid.cols + 1));
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let age = grid.get(row, col);
                let glyph = Self::shade_glyph(age, max_age);
                if color && age > 0 {
                    output.push_str(&format!(
                        "\x1b[38;5;{}m{}\x1b[0m",
                        Self::gray_level(age, max_age),
                        glyph
                    ));
                } else {
                    output.push(glyph);
                }
            }
            output.push('\n');
        }
        output
    }

    /// Numeric ages, dead cells shown as `.`
    pub fn format_grid_ages(grid: &Grid) -> String {
        let width = grid.max_cell_age().to_string().len().max(1);
        let mut output = String::new();
        for row in 0..grid.rows {
            let line: Vec<String> = (0..grid.cols)
                .map(|col| match grid.get(row, col) {
                    0 => format!("{:>width$}", ".", width = width),
                    age => format!("{:>width$}", age, width = width),
                })
                .collect();
            output.push_str(&line.join(" "));
            output.push('\n');
        }
        output
    }

    /// Neighbor counts for every cell under the engine's boundary mode
    pub fn format_neighbor_counts(grid: &Grid, engine: &LifeEngine) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..grid.cols {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for row in 0..grid.rows {
            output.push_str(&format!("{:2} ", row));
            for col in 0..grid.cols {
                let count = engine.count_neighbors(grid, row, col);
                output.push_str(&format!("{:2}", count));
            }
            output.push('\n');
        }

        output
    }

    /// Short statistics block
    pub fn format_statistics(grid: &Grid, max_age: Age) -> String {
        let total = grid.rows * grid.cols;
        let living = grid.living_count();
        let density = if total > 0 {
            living as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        let mut output = String::new();
        output.push_str(&format!("  Size: {}x{}\n", grid.rows, grid.cols));
        output.push_str(&format!("  Living cells: {}\n", living));
        output.push_str(&format!("  Density: {:.1}%\n", density));
        output.push_str(&format!("  Fully aged cells: {}\n", grid.saturated_count(max_age)));
        output.push_str(&format!("  Mean age: {:.2}\n", grid.mean_living_age()));
        output
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    pub fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
