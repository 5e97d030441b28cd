use crate::*;

/// How many stones are on the pile at the start of a game.
pub const INITIAL_STONES: u8 = 7;

/// A take-away game: players alternately remove one or two stones
/// from a single pile, and whoever takes the last stone wins.
/// Small enough to reason about exhaustively in tests.
#[derive(Clone, Debug, PartialEq)]
pub struct TakeAwayState {
    stones: u8,
    current_player_turn: PlayerColor,
    last_mover: Option<PlayerColor>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TakeAwayMove(pub u8);

impl GameMove for TakeAwayMove {}

impl TakeAwayState {
    pub fn with_stones(stones: u8, current_player_turn: PlayerColor) -> Self {
        Self {
            stones,
            current_player_turn,
            last_mover: None,
        }
    }

    pub fn stones(&self) -> u8 {
        self.stones
    }
}

impl GameState for TakeAwayState {
    type Move = TakeAwayMove;

    fn human_friendly(&self) -> String {
        format!("{} ({:?} to move)", "o".repeat(self.stones as usize), self.current_player_turn)
    }

    fn initial_state() -> Self {
        Self::with_stones(INITIAL_STONES, PlayerColor::Black)
    }

    fn legal_moves(&self) -> Vec<Self::Move> {
        (1..=2)
            .filter(|&n| n <= self.stones)
            .map(TakeAwayMove)
            .collect()
    }

    fn apply_move(&mut self, action: Self::Move) -> Result<(), GameError> {
        if action.0 == 0 || action.0 > 2 || action.0 > self.stones {
            return Err(GameError::IllegalMove {
                action: format!("take {}", action.0),
                reason: format!("{} stones remain", self.stones),
            });
        }

        self.stones -= action.0;
        self.last_mover = Some(self.current_player_turn);
        self.current_player_turn = self.current_player_turn.opponent();

        Ok(())
    }

    fn current_player_turn(&self) -> PlayerColor {
        self.current_player_turn
    }

    fn is_game_over(&self) -> bool {
        self.stones == 0
    }

    fn game_result(&self) -> Option<GameResult> {
        if !self.is_game_over() {
            return None;
        }

        Some(GameResult::from_winner(self.last_mover))
    }
}
