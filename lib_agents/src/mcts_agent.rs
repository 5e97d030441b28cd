pub mod tree_search;

use crate::config::MctsConfig;
use crate::util::get_rng;
use lib_boardgame::{GameAgent, GameError, GameState, PlayerColor};
use log::{debug, info};
use rand::Rng;
use rand_xorshift::XorShiftRng;
use std::cell::RefCell;

/// An agent that picks its moves with Monte Carlo Tree Search.
pub struct MctsAgent<R = XorShiftRng>
where
    R: Rng,
{
    color: PlayerColor,
    config: MctsConfig,
    rng: RefCell<R>,
}

impl MctsAgent {
    pub fn new(color: PlayerColor, config: MctsConfig) -> Self {
        Self::with_rng(color, config, get_rng())
    }
}

impl<R: Rng> MctsAgent<R> {
    pub fn with_rng(color: PlayerColor, config: MctsConfig, rng: R) -> Self {
        Self {
            color,
            config,
            rng: RefCell::new(rng),
        }
    }
}

impl<TState, R> GameAgent<TState> for MctsAgent<R>
where
    TState: GameState,
    R: Rng,
{
    fn player_color(&self) -> PlayerColor {
        self.color
    }

    fn pick_move(
        &self,
        state: &TState,
        _legal_moves: &[TState::Move],
    ) -> Result<TState::Move, GameError> {
        if state.current_player_turn() != self.color {
            return Err(GameError::IllegalMove {
                action: "search".to_string(),
                reason: format!(
                    "agent for {:?} asked to move on {:?}'s turn",
                    self.color,
                    state.current_player_turn()
                ),
            });
        }

        let result = tree_search::search(state, &self.config, &mut *self.rng.borrow_mut())?;

        for child in &result.children {
            debug!("{:?}", child);
        }

        let plays_per_sec = result.iterations as f64 / result.elapsed.as_secs_f64().max(1e-9);
        info!(
            "{} iterations, {} nodes, {:.0} iterations/sec",
            result.iterations, result.tree_size, plays_per_sec
        );

        if let Some(chosen) = result.children.iter().find(|r| r.action == result.action) {
            let white_share = match self.color {
                PlayerColor::White => chosen.mean_score(),
                PlayerColor::Black => 1.0 - chosen.mean_score(),
            };

            info!("{}", pretty_ratio_bar_text(20, white_share));
        }

        Ok(result.action)
    }
}

/// A bar such as `B [=======|             ] W`, with the divider placed
/// at `white_share` of the way from black's end to white's end.
fn pretty_ratio_bar_text(len_chars: usize, white_share: f64) -> String {
    let mut text_bar = String::with_capacity(len_chars + 7);

    text_bar.push_str("B [");

    let bar_len = ((white_share.max(0.0).min(1.0)) * len_chars as f64).round() as usize;
    let bar_txt = "=".repeat(bar_len);
    text_bar.push_str(&bar_txt);
    text_bar.push('|');

    let bar_empty = " ".repeat(len_chars - bar_len);
    text_bar.push_str(&bar_empty);

    text_bar.push_str("] W");

    text_bar
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::util::get_rng_deterministic;
    use lib_boardgame::{GameRunner, GeneralGameRunner};
    use lib_connect_four::{ConnectFourAction, ConnectFourState};

    #[test]
    fn pretty_ratio_bar_text_expects_divider_at_share() {
        assert_eq!("B [|    ] W", pretty_ratio_bar_text(4, 0.0));
        assert_eq!("B [==|  ] W", pretty_ratio_bar_text(4, 0.5));
        assert_eq!("B [====|] W", pretty_ratio_bar_text(4, 1.0));
    }

    #[test]
    fn tree_search_always_picks_winning_move() {
        let mut state = ConnectFourState::new();

        // Red stacks three in column 1 while yellow plays elsewhere.
        state
            .apply_moves(
                [1, 3, 1, 4, 1, 0]
                    .iter()
                    .map(|&col| ConnectFourAction::new(col)),
            )
            .expect("all moves are legal");

        assert_eq!(PlayerColor::Black, state.current_player_turn());

        let agent = MctsAgent::with_rng(
            PlayerColor::Black,
            MctsConfig::default().with_iterations(2000),
            get_rng_deterministic(),
        );
        let legal_moves = state.legal_moves();

        let chosen = agent
            .pick_move(&state, &legal_moves)
            .expect("game is live");

        assert_eq!(ConnectFourAction::new(1), chosen);
    }

    #[test]
    fn pick_move_expects_no_legal_move_on_finished_game() {
        let mut state = ConnectFourState::new();
        state
            .apply_moves(
                [0, 5, 0, 5, 0, 5, 0]
                    .iter()
                    .map(|&col| ConnectFourAction::new(col)),
            )
            .expect("all moves are legal");

        let agent = MctsAgent::new(PlayerColor::White, MctsConfig::for_testing());

        assert!(matches!(
            agent.pick_move(&state, &[]),
            Err(GameError::NoLegalMove)
        ));
    }

    #[test]
    fn pick_move_expects_error_on_opponents_turn() {
        let state = ConnectFourState::new();
        let agent = MctsAgent::with_rng(
            PlayerColor::White,
            MctsConfig::for_testing(),
            get_rng_deterministic(),
        );

        assert!(matches!(
            agent.pick_move(&state, &state.legal_moves()),
            Err(GameError::IllegalMove { .. })
        ));
    }

    #[test]
    fn play_to_end_expects_mcts_agents_finish_a_game() {
        let config = MctsConfig::default().with_iterations(50);
        let black = MctsAgent::with_rng(PlayerColor::Black, config.clone(), get_rng_deterministic());
        let white = MctsAgent::with_rng(PlayerColor::White, config, get_rng_deterministic());

        let result = <GeneralGameRunner as GameRunner<ConnectFourState>>::play_to_end(&black, &white);

        assert!(result.is_ok());
    }
}
