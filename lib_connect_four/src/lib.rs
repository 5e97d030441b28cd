pub mod connect_four_gamestate;

pub use connect_four_gamestate::{BoardPosition, ConnectFourAction, ConnectFourState, Winner};

use lib_boardgame::PlayerColor;

/// Number of columns on the board.
pub const COLS: usize = 6;

/// Number of rows on the board.  Row 0 is the bottom.
pub const ROWS: usize = 5;

/// How many pieces in a line it takes to win.
pub const RUN_LENGTH: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConnectFourPiece {
    Red,
    Yellow,
}

impl ConnectFourPiece {
    pub fn player_color(self) -> PlayerColor {
        match self {
            ConnectFourPiece::Red => PlayerColor::Black,
            ConnectFourPiece::Yellow => PlayerColor::White,
        }
    }

    pub fn for_player(player: PlayerColor) -> Self {
        match player {
            PlayerColor::Black => ConnectFourPiece::Red,
            PlayerColor::White => ConnectFourPiece::Yellow,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            ConnectFourPiece::Red => 'R',
            ConnectFourPiece::Yellow => 'Y',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_player_expects_round_trips_player_color() {
        for &player in &[PlayerColor::Black, PlayerColor::White] {
            assert_eq!(player, ConnectFourPiece::for_player(player).player_color());
        }
    }
}
