use anyhow::Result;
use clap::{Parser, ValueEnum};
use lib_agents::util::get_rng_seeded;
use lib_agents::{MctsAgent, MctsConfig, RandomAgent};
use lib_boardgame::{GameAgent, GameResult, GameRunner, GeneralGameRunner, PlayerColor};
use lib_connect_four::ConnectFourState;
use log::info;
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Mcts,
    Random,
}

/// Plays 6x5 connect four between two agents.
#[derive(Parser, Debug)]
#[command(name = "game_runner", version, about)]
struct Args {
    /// MCTS iterations per move.
    #[arg(long, default_value_t = 4000)]
    iterations: usize,

    /// Optional per-move deadline for MCTS, in milliseconds.
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Seed for reproducible games. Each agent derives its own stream from it.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = AgentKind::Mcts)]
    black: AgentKind,

    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    white: AgentKind,

    /// Number of games to play.
    #[arg(long, default_value_t = 1)]
    games: usize,
}

impl Args {
    fn mcts_config(&self) -> MctsConfig {
        let config = MctsConfig::default().with_iterations(self.iterations);

        match self.time_limit_ms {
            Some(ms) => config.with_time_limit(Duration::from_millis(ms)),
            None => config,
        }
    }

    fn make_agent(
        &self,
        kind: AgentKind,
        color: PlayerColor,
        game_index: usize,
    ) -> Box<dyn GameAgent<ConnectFourState>> {
        let seed = self.seed.map(|s| {
            let stream = game_index as u64 * 2 + (color == PlayerColor::White) as u64;
            s.wrapping_add(stream)
        });

        match (kind, seed) {
            (AgentKind::Mcts, Some(seed)) => Box::new(MctsAgent::with_rng(
                color,
                self.mcts_config(),
                get_rng_seeded(seed),
            )),
            (AgentKind::Mcts, None) => Box::new(MctsAgent::new(color, self.mcts_config())),
            (AgentKind::Random, Some(seed)) => {
                Box::new(RandomAgent::with_rng(color, get_rng_seeded(seed)))
            }
            (AgentKind::Random, None) => Box::new(RandomAgent::new(color)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("{:?}", args);

    let mut black_wins = 0;
    let mut white_wins = 0;
    let mut ties = 0;

    for game_index in 0..args.games {
        let black = args.make_agent(args.black, PlayerColor::Black, game_index);
        let white = args.make_agent(args.white, PlayerColor::White, game_index);

        let result = <GeneralGameRunner as GameRunner<ConnectFourState>>::play_to_end(
            black.as_ref(),
            white.as_ref(),
        )?;

        info!("Game {} result: {:?}", game_index + 1, result);

        match result {
            GameResult::BlackWins => black_wins += 1,
            GameResult::WhiteWins => white_wins += 1,
            GameResult::Tie => ties += 1,
        }
    }

    println!(
        "Black ({:?}) wins: {}  White ({:?}) wins: {}  Ties: {}",
        args.black, black_wins, args.white, white_wins, ties
    );

    Ok(())
}
