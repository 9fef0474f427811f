//! Stability detection by comparing successive snapshots

use crate::game_of_life::{Cell, Grid};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How a run settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// No living cells remain
    Extinct,
    /// The grid is identical to its predecessor
    FixedPoint,
    /// The grid repeats a state from `period` generations ago
    Oscillating { period: usize },
}

/// Watches a grid from the outside and reports when it stops changing.
///
/// Keeps at most `window` recent snapshots, so cycles longer than the window
/// go unnoticed.
#[derive(Debug, Clone)]
pub struct StabilityObserver {
    window: usize,
    history: VecDeque<Vec<Cell>>,
}

impl StabilityObserver {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            history: VecDeque::with_capacity(window),
        }
    }

    /// Record the grid's current state and report whether it has settled
    pub fn observe(&mut self, grid: &Grid) -> Option<Outcome> {
        if grid.is_empty() {
            return Some(Outcome::Extinct);
        }

        // history[0] is the previous generation
        if let Some(age) = self.history.iter().position(|past| past.as_slice() == grid.cells()) {
            return Some(match age + 1 {
                1 => Outcome::FixedPoint,
                period => Outcome::Oscillating { period },
            });
        }

        self.history.push_front(grid.cells().to_vec());
        self.history.truncate(self.window);
        None
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}
