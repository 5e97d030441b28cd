//! Game-playing agents, chief among them a Monte Carlo Tree Search agent.

mod config;
mod mcts_agent;
mod random_agent;
pub mod util;

pub use config::{MctsConfig, EXPLORATION_CONSTANT};
pub use mcts_agent::tree_search::{find_best_move, search, uct, SearchResult};
pub use mcts_agent::MctsAgent;
pub use random_agent::RandomAgent;

use lib_boardgame::{GameError, GameState};
use lib_connect_four::{ConnectFourAction, ConnectFourState};

/// Searches `iterations` times from `state` with a freshly seeded rng
/// and returns the move the search settles on.
pub fn choose_move<TState>(state: &TState, iterations: usize) -> Result<TState::Move, GameError>
where
    TState: GameState,
{
    let config = MctsConfig::default().with_iterations(iterations);

    find_best_move(state, &config, &mut util::get_rng())
}

/// Like [`choose_move`], for a connect four board, answering with the column index.
pub fn choose_column(state: &ConnectFourState, iterations: usize) -> Result<usize, GameError> {
    choose_move(state, iterations).map(ConnectFourAction::column)
}
