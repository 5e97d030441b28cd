use crate::{ConnectFourPiece, COLS, ROWS, RUN_LENGTH};
use lib_boardgame::{GameError, GameMove, GameResult, GameState, PlayerColor};
use std::fmt;

/// Cells addressed as `board[col][row]`, row 0 at the bottom.
pub type Board = [[Option<ConnectFourPiece>; ROWS]; COLS];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectFourState {
    board: Board,
    current_player_turn: PlayerColor,
}

/// Dropping a piece into a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectFourAction(usize);

impl GameMove for ConnectFourAction {}

impl ConnectFourAction {
    pub fn new(column: usize) -> Self {
        ConnectFourAction(column)
    }

    pub fn column(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConnectFourAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.0)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BoardPosition {
    pub col: usize,
    pub row: usize,
}

impl BoardPosition {
    pub fn new(col: usize, row: usize) -> Self {
        BoardPosition { col, row }
    }
}

/// A completed run of four: the winning piece plus the first and last
/// cell of the run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Winner {
    pub piece: ConnectFourPiece,
    pub start: BoardPosition,
    pub end: BoardPosition,
}

impl Default for ConnectFourState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectFourState {
    pub fn new() -> Self {
        Self {
            board: [[None; ROWS]; COLS],
            current_player_turn: PlayerColor::Black,
        }
    }

    /// Seeds a state from a raw grid, with `to_move` being the player whose turn it is.
    /// Fails if any column has an empty cell beneath an occupied one.
    pub fn from_grid(board: Board, to_move: PlayerColor) -> Result<Self, GameError> {
        for (col, cells) in board.iter().enumerate() {
            let height = cells.iter().take_while(|c| c.is_some()).count();

            if cells[height..].iter().any(Option::is_some) {
                return Err(GameError::InvalidBoard(format!(
                    "column {} has a piece floating above an empty cell",
                    col
                )));
            }
        }

        Ok(Self {
            board,
            current_player_turn: to_move,
        })
    }

    /// Read access to the raw grid.
    pub fn pieces(&self) -> &Board {
        &self.board
    }

    pub fn get_piece(&self, position: BoardPosition) -> Option<ConnectFourPiece> {
        self.board[position.col][position.row]
    }

    /// The lowest empty row of the column,
    /// or None if the column is full (or does not exist).
    pub fn next_available_row(&self, col: usize) -> Option<usize> {
        self.board.get(col)?.iter().position(Option::is_none)
    }

    pub fn is_legal_move(&self, col: usize) -> bool {
        self.next_available_row(col).is_some()
    }

    /// Drops `piece` into `col`, touching only the cell it lands in.
    /// Does not change whose turn it is.  Returns the row the piece landed on.
    pub fn place_piece(&mut self, col: usize, piece: ConnectFourPiece) -> Result<usize, GameError> {
        if col >= COLS {
            return Err(GameError::IllegalMove {
                action: ConnectFourAction(col).to_string(),
                reason: format!("the board only has {} columns", COLS),
            });
        }

        let row = self
            .next_available_row(col)
            .ok_or_else(|| GameError::IllegalMove {
                action: ConnectFourAction(col).to_string(),
                reason: "the column is full".to_string(),
            })?;

        self.board[col][row] = Some(piece);

        Ok(row)
    }

    /// Checks every column for four vertically consecutive equal pieces,
    /// then every row for four horizontally consecutive ones,
    /// lowest index first.  Diagonal runs do not count.
    pub fn evaluate_winner(&self) -> Option<Winner> {
        for col in 0..COLS {
            for row in 0..=(ROWS - RUN_LENGTH) {
                let run = (0..RUN_LENGTH).map(|i| BoardPosition::new(col, row + i));
                if let Some(winner) = self.run_winner(run) {
                    return Some(winner);
                }
            }
        }

        for row in 0..ROWS {
            for col in 0..=(COLS - RUN_LENGTH) {
                let run = (0..RUN_LENGTH).map(|i| BoardPosition::new(col + i, row));
                if let Some(winner) = self.run_winner(run) {
                    return Some(winner);
                }
            }
        }

        None
    }

    fn run_winner(&self, mut run: impl Iterator<Item = BoardPosition>) -> Option<Winner> {
        let start = run.next()?;
        let piece = self.get_piece(start)?;
        let mut end = start;

        for position in run {
            if self.get_piece(position) != Some(piece) {
                return None;
            }
            end = position;
        }

        Some(Winner { piece, start, end })
    }

    pub fn is_terminal(&self) -> bool {
        self.evaluate_winner().is_some() || !(0..COLS).any(|col| self.is_legal_move(col))
    }
}

impl fmt::Display for ConnectFourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.human_friendly())
    }
}

impl GameState for ConnectFourState {
    type Move = ConnectFourAction;

    fn human_friendly(&self) -> String {
        let mut result = String::with_capacity((COLS * 2 + 1) * (ROWS + 1));

        for row in (0..ROWS).rev() {
            for col in 0..COLS {
                let symbol = match self.board[col][row] {
                    None => '_',
                    Some(piece) => piece.symbol(),
                };

                result.push(symbol);

                if col != COLS - 1 {
                    result.push('|');
                }
            }

            result.push('\n');
        }

        for col in 0..COLS {
            result.push_str(&col.to_string());

            if col != COLS - 1 {
                result.push(' ');
            }
        }

        result.push('\n');

        result
    }

    fn initial_state() -> Self {
        Self::new()
    }

    /// Every column that still has room, in ascending order.
    fn legal_moves(&self) -> Vec<Self::Move> {
        (0..COLS)
            .filter(|&col| self.is_legal_move(col))
            .map(ConnectFourAction)
            .collect()
    }

    fn apply_move(&mut self, action: ConnectFourAction) -> Result<(), GameError> {
        let piece = ConnectFourPiece::for_player(self.current_player_turn);
        self.place_piece(action.column(), piece)?;

        self.current_player_turn = self.current_player_turn.opponent();

        Ok(())
    }

    fn current_player_turn(&self) -> PlayerColor {
        self.current_player_turn
    }

    fn is_game_over(&self) -> bool {
        self.is_terminal()
    }

    fn game_result(&self) -> Option<GameResult> {
        if !self.is_game_over() {
            return None;
        }

        let winner = self.evaluate_winner().map(|w| w.piece.player_color());

        Some(GameResult::from_winner(winner))
    }
}
