use std::fmt;
use thiserror::Error;

pub mod game_runner;
pub mod test_impls;

pub use game_runner::{GameRunner, GeneralGameRunner};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayerColor {
    Black,
    White,
}

impl PlayerColor {
    pub fn opponent(self) -> Self {
        match self {
            PlayerColor::Black => PlayerColor::White,
            PlayerColor::White => PlayerColor::Black,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GameResult {
    Tie,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    /// The result of a finished game with the given winner (or a tie if there is none).
    pub fn from_winner(winner: Option<PlayerColor>) -> Self {
        match winner {
            Some(PlayerColor::Black) => GameResult::BlackWins,
            Some(PlayerColor::White) => GameResult::WhiteWins,
            None => GameResult::Tie,
        }
    }

    pub fn is_win_for_player(self, player_color: PlayerColor) -> bool {
        match self {
            GameResult::BlackWins => player_color == PlayerColor::Black,
            GameResult::WhiteWins => player_color == PlayerColor::White,
            _ => false,
        }
    }

    /// The reward this result is worth to the given player:
    /// 1.0 for a win, 0.5 for a tie, 0.0 for a loss.
    pub fn reward_for_player(self, player_color: PlayerColor) -> f64 {
        match self {
            GameResult::Tie => 0.5,
            r if r.is_win_for_player(player_color) => 1.0,
            _ => 0.0,
        }
    }
}

/// Everything that can go wrong when driving a game.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("illegal move {action}: {reason}")]
    IllegalMove { action: String, reason: String },

    #[error("no legal move available, the game is already over")]
    NoLegalMove,

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

/// Describes a move a player can make in a game.
/// I.e., in Connect Four, a move is dropping a piece into column 3.
pub trait GameMove: Copy + fmt::Debug + PartialEq {}

/// Describes a complete state of some Game,
/// such as the board position, the current player's turn,
/// or any other relevant info.
pub trait GameState: Clone {
    type Move: GameMove;

    /// Returns a human-friendly string for representing the state.
    fn human_friendly(&self) -> String;

    /// Returns a fresh, ready-to-play game state for this game.
    fn initial_state() -> Self;

    /// Returns the possible moves the current player can make, in a stable order.
    /// Computed fresh on every call.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Apply the given move (or 'action') to this state for the current player,
    /// mutating this state and advancing it to the resulting state.
    fn apply_move(&mut self, action: Self::Move) -> Result<(), GameError>;

    /// Returns the current player whose turn it currently is.
    fn current_player_turn(&self) -> PlayerColor;

    /// True if the game is over (i.e. the win condition has been met, or no further action is possible).
    fn is_game_over(&self) -> bool;

    /// The GameResult, or None if the game is not yet over.
    fn game_result(&self) -> Option<GameResult>;

    /// Given a legal move (or 'action'), return the resulting state of applying the action
    /// to this state (does not mutate this state).
    fn next_state(&self, action: Self::Move) -> Result<Self, GameError> {
        let mut cloned = self.clone();
        cloned.apply_move(action)?;

        Ok(cloned)
    }

    /// Apply the given moves (or 'actions') to this state, mutating it
    /// each time and advancing it through the chain of states.
    /// Implemented in terms of apply_move().
    fn apply_moves(&mut self, moves: impl IntoIterator<Item = Self::Move>) -> Result<(), GameError> {
        for m in moves {
            self.apply_move(m)?;
        }

        Ok(())
    }
}

/// A trait representing the functionality of a GameAgent.
/// Specifically, given a GameState, a GameAgent must be able to decide a GameMove.
pub trait GameAgent<TState: GameState> {
    fn player_color(&self) -> PlayerColor;

    fn pick_move(
        &self,
        state: &TState,
        legal_moves: &[TState::Move],
    ) -> Result<TState::Move, GameError>;
}
