use crate::{GameAgent, GameError, GameResult, GameState, PlayerColor};
use log::info;

/// A trait that describes a game runner.
pub trait GameRunner<T: GameState> {
    fn play_to_end(
        black_agent: &dyn GameAgent<T>,
        white_agent: &dyn GameAgent<T>,
    ) -> Result<GameResult, GameError>;
}

/// A trivial, general-purpose implementation of a GameRunner.
/// Probably all you need to run most games.
pub struct GeneralGameRunner;

fn player_take_turn<S>(game_state: &S, agent: &dyn GameAgent<S>) -> Result<S::Move, GameError>
where
    S: GameState,
{
    let legal_moves = game_state.legal_moves();

    if legal_moves.is_empty() {
        return Err(GameError::NoLegalMove);
    }

    let selected_action = agent.pick_move(game_state, &legal_moves)?;

    if !legal_moves.contains(&selected_action) {
        return Err(GameError::IllegalMove {
            action: format!("{:?}", selected_action),
            reason: format!("agent {:?} picked a move outside the legal set", agent.player_color()),
        });
    }

    Ok(selected_action)
}

impl GeneralGameRunner {
    /// Plays the game forward from the given state until it is over.
    pub fn play_from<T: GameState>(
        mut game_state: T,
        black_agent: &dyn GameAgent<T>,
        white_agent: &dyn GameAgent<T>,
    ) -> Result<GameResult, GameError> {
        while !game_state.is_game_over() {
            info!("\n{}", game_state.human_friendly());
            let cur_player_color = game_state.current_player_turn();

            let agent_to_play = match cur_player_color {
                PlayerColor::Black => black_agent,
                PlayerColor::White => white_agent,
            };

            let selected_action = player_take_turn(&game_state, agent_to_play)?;

            info!(
                "Player {:?} picked move {:?}",
                cur_player_color, selected_action
            );

            game_state.apply_move(selected_action)?;
        }

        info!("\n{}", game_state.human_friendly());

        Ok(game_state
            .game_result()
            .expect("The game is over, so there must be a game result."))
    }
}

impl<T> GameRunner<T> for GeneralGameRunner
where
    T: GameState,
{
    fn play_to_end(
        black_agent: &dyn GameAgent<T>,
        white_agent: &dyn GameAgent<T>,
    ) -> Result<GameResult, GameError> {
        Self::play_from(T::initial_state(), black_agent, white_agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_impls::take_away::{TakeAwayMove, TakeAwayState};

    /// Always takes the most stones it legally can.
    struct GreedyAgent(PlayerColor);

    impl GameAgent<TakeAwayState> for GreedyAgent {
        fn player_color(&self) -> PlayerColor {
            self.0
        }

        fn pick_move(
            &self,
            _state: &TakeAwayState,
            legal_moves: &[TakeAwayMove],
        ) -> Result<TakeAwayMove, GameError> {
            legal_moves.last().copied().ok_or(GameError::NoLegalMove)
        }
    }

    struct CheatingAgent(PlayerColor);

    impl GameAgent<TakeAwayState> for CheatingAgent {
        fn player_color(&self) -> PlayerColor {
            self.0
        }

        fn pick_move(
            &self,
            _state: &TakeAwayState,
            _legal_moves: &[TakeAwayMove],
        ) -> Result<TakeAwayMove, GameError> {
            Ok(TakeAwayMove(5))
        }
    }

    #[test]
    fn play_to_end_expects_greedy_white_wins_from_seven() {
        // 7 -> 5 -> 3 -> 1 -> 0: white takes the final stone.
        let black = GreedyAgent(PlayerColor::Black);
        let white = GreedyAgent(PlayerColor::White);

        let result = <GeneralGameRunner as GameRunner<TakeAwayState>>::play_to_end(&black, &white)
            .expect("game must finish");

        assert_eq!(GameResult::WhiteWins, result);
    }

    #[test]
    fn play_from_expects_error_when_agent_picks_illegal_move() {
        let black = CheatingAgent(PlayerColor::Black);
        let white = GreedyAgent(PlayerColor::White);

        let result = GeneralGameRunner::play_from(TakeAwayState::initial_state(), &black, &white);

        match result {
            Err(GameError::IllegalMove { .. }) => {}
            other => panic!("expected an illegal move error, got {:?}", other),
        }
    }
}
