//! Search-tree storage for Monte Carlo tree search: an arena of nodes
//! addressed by generational ids, plus the per-node statistics the
//! search keeps.
pub mod dot_visualize;
pub mod monte_carlo_data;
pub mod tree;

pub use monte_carlo_data::{MctsData, MctsResult, MctsTree};
pub use tree::{NodeId, Tree};
