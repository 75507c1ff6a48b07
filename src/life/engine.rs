//! Generation stepping and stabilization detection

use super::boundary::moore_offsets;
use super::rules::AgeRule;
use super::{Age, Grid};
use crate::config::BoundaryMode;
use serde::Serialize;

/// Advances a colony one generation at a time under a fixed boundary mode
#[derive(Debug, Clone, Copy)]
pub struct LifeEngine {
    mode: BoundaryMode,
    rule: AgeRule,
}

/// What happened during a single generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// No live cell is still below the saturation age
    pub stabilized: bool,
    pub births: usize,
    pub deaths: usize,
    pub living: usize,
    pub saturated: usize,
}

impl LifeEngine {
    pub fn new(mode: BoundaryMode, max_age: Age) -> Self {
        Self {
            mode,
            rule: AgeRule::new(max_age),
        }
    }

    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    pub fn max_age(&self) -> Age {
        self.rule.max_age()
    }

    /// Count occupied Moore neighbors of `(row, col)` in `snapshot`
    pub fn count_neighbors(&self, snapshot: &Grid, row: usize, col: usize) -> u8 {
        let mut count = 0;

        for offset in moore_offsets() {
            if let Some((r, c)) = self
                .mode
                .resolve_neighbor(row, col, offset, snapshot.rows, snapshot.cols)
            {
                if snapshot.cells[snapshot.index(r, c)] > 0 {
                    count += 1;
                }
            }
        }

        count
    }

    /// Advance `grid` by one generation. Returns whether the colony has stabilized.
    pub fn step(&self, grid: &mut Grid) -> bool {
        self.step_with_report(grid).stabilized
    }

    /// Advance `grid` by one generation and report what changed.
    ///
    /// Every neighbor count reads the pre-step snapshot, never a cell already
    /// written during this pass.
    pub fn step_with_report(&self, grid: &mut Grid) -> StepReport {
        let snapshot = grid.clone();
        let mut report = StepReport {
            stabilized: true,
            ..Default::default()
        };

        for row in 0..snapshot.rows {
            for col in 0..snapshot.cols {
                let idx = snapshot.index(row, col);
                let age = snapshot.cells[idx];
                let neighbors = self.count_neighbors(&snapshot, row, col);
                let next = self.rule.next_age(age, neighbors);
                grid.cells[idx] = next;

                match (age > 0, next > 0) {
                    (false, true) => report.births += 1,
                    (true, false) => report.deaths += 1,
                    _ => {}
                }
                if next > 0 {
                    report.living += 1;
                }
                if next >= self.rule.max_age() {
                    report.saturated += 1;
                }
                if self.rule.is_transitional(next) {
                    report.stabilized = false;
                }
            }
        }

        tracing::trace!(
            mode = %self.mode,
            births = report.births,
            deaths = report.deaths,
            living = report.living,
            stabilized = report.stabilized,
            "generation stepped"
        );

        report
    }
}
