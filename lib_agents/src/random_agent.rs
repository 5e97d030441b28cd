use crate::util::{get_rng, random_pick};
use lib_boardgame::{GameAgent, GameError, GameState, PlayerColor};
use rand_xorshift::XorShiftRng;
use std::cell::RefCell;

/// Plays a uniformly random legal move every turn.
pub struct RandomAgent {
    color: PlayerColor,
    rng: RefCell<XorShiftRng>,
}

impl RandomAgent {
    pub fn new(color: PlayerColor) -> Self {
        Self::with_rng(color, get_rng())
    }

    pub fn with_rng(color: PlayerColor, rng: XorShiftRng) -> Self {
        Self {
            color,
            rng: RefCell::new(rng),
        }
    }
}

impl<TState: GameState> GameAgent<TState> for RandomAgent {
    fn player_color(&self) -> PlayerColor {
        self.color
    }

    fn pick_move(
        &self,
        _state: &TState,
        legal_moves: &[TState::Move],
    ) -> Result<TState::Move, GameError> {
        random_pick(legal_moves, &mut *self.rng.borrow_mut())
            .copied()
            .ok_or(GameError::NoLegalMove)
    }
}
