//! Grid of cell ages

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Age of a single cell. `0` is dead, anything above is alive.
pub type Age = u32;

/// A dense, row-major colony of cell ages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<Age>,
}

impl Grid {
    /// Create a new all-dead grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Create a grid from nested rows of ages
    pub fn from_rows(rows: Vec<Vec<Age>>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        Ok(Self {
            rows: height,
            cols: width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Age at coordinates. Out of bounds reads as dead.
    pub fn get(&self, row: usize, col: usize) -> Age {
        if row < self.rows && col < self.cols {
            self.cells[self.index(row, col)]
        } else {
            0
        }
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col) > 0
    }

    /// Set the age at coordinates
    pub fn set(&mut self, row: usize, col: usize, age: Age) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} grid",
                row,
                col,
                self.rows,
                self.cols
            );
        }
        let idx = self.index(row, col);
        self.cells[idx] = age;
        Ok(())
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&age| age > 0).count()
    }

    /// Count cells that have reached `max_age`
    pub fn saturated_count(&self, max_age: Age) -> usize {
        self.cells.iter().filter(|&&age| age >= max_age).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&age| age == 0)
    }

    pub fn max_cell_age(&self) -> Age {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn mean_living_age(&self) -> f64 {
        let living = self.living_count();
        if living == 0 {
            return 0.0;
        }
        let total: u64 = self.cells.iter().map(|&age| age as u64).sum();
        total as f64 / living as f64
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let symbol = if self.is_alive(row, col) { '█' } else { '·' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.cols, 4);
        assert_eq!(grid.cells.len(), 12);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_grid_from_rows() {
        let grid = Grid::from_rows(vec![
            vec![1, 0, 3],
            vec![0, 12, 0],
        ])
        .unwrap();
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.get(0, 2), 3);
        assert_eq!(grid.get(1, 1), 12);
        assert_eq!(grid.living_count(), 3);
        assert_eq!(grid.saturated_count(12), 1);
        assert_eq!(grid.max_cell_age(), 12);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(Grid::from_rows(vec![vec![1, 0], vec![1]]).is_err());
        assert!(Grid::from_rows(vec![]).is_err());
        assert!(Grid::from_rows(vec![vec![]]).is_err());
    }

    #[test]
    fn test_set_and_bounds() {
        let mut grid = Grid::new(2, 2);
        grid.set(1, 0, 5).unwrap();
        assert_eq!(grid.get(1, 0), 5);
        assert!(grid.set(2, 0, 1).is_err());
        assert_eq!(grid.get(5, 5), 0);
    }

    #[test]
    fn test_mean_living_age() {
        let grid = Grid::from_rows(vec![vec![2, 0], vec![0, 4]]).unwrap();
        assert!((grid.mean_living_age() - 3.0).abs() < f64::EPSILON);
        assert_eq!(Grid::new(2, 2).mean_living_age(), 0.0);
    }
}
