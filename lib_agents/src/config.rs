//! Search configuration.

use std::time::Duration;

/// The UCT exploration constant, √2.
pub const EXPLORATION_CONSTANT: f64 = std::f64::consts::SQRT_2;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per search.
    pub iterations: usize,

    /// Weight of the exploration term in the UCT formula.
    pub exploration_constant: f64,

    /// Optional deadline for a search, checked between iterations.
    /// Whichever of this and `iterations` runs out first ends the search.
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 4000,
            exploration_constant: EXPLORATION_CONSTANT,
            time_limit: None,
        }
    }
}

impl MctsConfig {
    /// A fast config for tests.
    pub fn for_testing() -> Self {
        Self {
            iterations: 500,
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
