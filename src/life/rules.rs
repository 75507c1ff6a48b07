//! Age transition rule for a single cell

use super::Age;

/// Maximum possible neighbor count in a Moore neighborhood
pub const MAX_NEIGHBORS: u8 = 8;

/// Ageing variant of Conway's rule. Two neighbors sustain a live cell,
/// three sustain or create one, anything else kills. Live cells gain one
/// year of age per generation until they saturate at `max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRule {
    max_age: Age,
}

impl AgeRule {
    pub fn new(max_age: Age) -> Self {
        Self { max_age }
    }

    pub fn max_age(&self) -> Age {
        self.max_age
    }

    /// Next age of a cell given its current age and neighbor count
    pub fn next_age(&self, age: Age, neighbors: u8) -> Age {
        match neighbors {
            2 if age > 0 && age < self.max_age => age + 1,
            2 => age,
            3 if age < self.max_age => age + 1,
            3 => age,
            _ => 0,
        }
    }

    /// A live cell that has not yet saturated is still changing
    pub fn is_transitional(&self, age: Age) -> bool {
        age > 0 && age < self.max_age
    }
}
