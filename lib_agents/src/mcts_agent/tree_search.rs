use crate::config::MctsConfig;
use crate::util;

use lib_boardgame::{GameError, GameState, PlayerColor};
use log::{debug, log_enabled, trace, Level};
use monte_carlo_tree::dot_visualize::to_dot;
use monte_carlo_tree::{MctsData, MctsResult, MctsTree, NodeId};
use rand::Rng;
use std::time::{Duration, Instant};

/// The outcome of one search from a root state.
pub struct SearchResult<TState: GameState> {
    /// The action the search settled on.
    pub action: TState::Move,

    /// Iterations actually run, which is fewer than configured
    /// when the time limit cut the search short.
    pub iterations: usize,

    /// Number of nodes in the tree when the search ended.
    pub tree_size: usize,

    /// Statistics for every action explored from the root, in expansion order.
    pub children: Vec<MctsResult<TState>>,

    pub elapsed: Duration,
}

/// The UCT value of a child: its mean score plus an exploration bonus
/// that shrinks as the child gets visited.  Unvisited children score infinity.
pub fn uct(parent_plays: usize, score: f64, plays: usize, exploration_constant: f64) -> f64 {
    if plays == 0 {
        return f64::INFINITY;
    }

    let plays = plays as f64;
    let parent_plays = parent_plays as f64;

    (score / plays) + exploration_constant * f64::sqrt(f64::ln(parent_plays) / plays)
}

/// The child with the highest UCT value, the first one on ties.
/// None for a leaf.
fn select_best_child<TState>(
    tree: &MctsTree<TState>,
    id: NodeId,
    exploration_constant: f64,
) -> Option<NodeId>
where
    TState: GameState,
{
    let parent_plays = tree.data(id).plays();
    let mut best: Option<(NodeId, f64)> = None;

    for &child in tree.children(id) {
        let data = tree.data(child);
        let value = uct(parent_plays, data.score(), data.plays(), exploration_constant);

        match best {
            Some((_, best_value)) if best_value >= value => {}
            _ => best = Some((child, value)),
        }
    }

    best.map(|(child, _)| child)
}

/// Descends by UCT from `root` through fully expanded nodes,
/// stopping at the first node that is terminal or still has untried actions.
fn select_to_leaf<TState>(
    tree: &MctsTree<TState>,
    root: NodeId,
    exploration_constant: f64,
) -> NodeId
where
    TState: GameState,
{
    let mut cur_node = root;

    loop {
        if tree.data(cur_node).state().is_game_over() || tree.has_untried_actions(cur_node) {
            return cur_node;
        }

        cur_node = select_best_child(tree, cur_node, exploration_constant).expect(
            "A node that is not terminal and has no untried actions must have children.",
        );
    }
}

/// Adds one child for a random untried action and returns it.
/// A terminal node is returned unchanged.
fn expand<TState, R>(tree: &mut MctsTree<TState>, id: NodeId, rng: &mut R) -> NodeId
where
    TState: GameState,
    R: Rng,
{
    let state = tree.data(id).state();

    if state.is_game_over() {
        return id;
    }

    let untried = tree.untried_actions(id);
    let action = util::random_choice(&untried, rng);

    let resulting_state = state
        .next_state(action)
        .expect("An untried action comes from the state's own legal moves.");

    tree.add_child(id, MctsData::new(resulting_state, Some(action)))
}

/// Plays uniformly random moves from the node's state until the game ends,
/// and returns the reward from `player_color`'s point of view.
fn simulate<TState, R>(
    tree: &MctsTree<TState>,
    id: NodeId,
    player_color: PlayerColor,
    rng: &mut R,
) -> f64
where
    TState: GameState,
    R: Rng,
{
    let mut state = tree.data(id).state().clone();

    while !state.is_game_over() {
        let legal_moves = state.legal_moves();
        let random_action = util::random_choice(&legal_moves, rng);

        state
            .apply_move(random_action)
            .expect("A move drawn from the legal moves must apply.");
    }

    state
        .game_result()
        .expect("There must be a game result, since the game is confirmed to be over.")
        .reward_for_player(player_color)
}

/// Adds one play to every node from `leaf` up to the root.
/// A node credits the reward when `player_color` made the move into it,
/// and the complementary reward otherwise.
fn backprop_sim_result<TState>(
    tree: &mut MctsTree<TState>,
    leaf: NodeId,
    reward: f64,
    player_color: PlayerColor,
) where
    TState: GameState,
{
    let path = tree.path_to_root(leaf).collect::<Vec<_>>();

    for node in path {
        let data = tree.data_mut(node);
        data.increment_plays();

        if data.player_just_moved() == player_color {
            data.add_score(reward);
        } else {
            data.add_score(1.0 - reward);
        }
    }
}

fn run_iteration<TState, R>(
    tree: &mut MctsTree<TState>,
    player_color: PlayerColor,
    exploration_constant: f64,
    rng: &mut R,
) where
    TState: GameState,
    R: Rng,
{
    // Select: travel down to a node worth growing, using the explore/exploit rules.
    let leaf = select_to_leaf(tree, tree.root(), exploration_constant);

    // Expand: one fresh child, unless the leaf ends the game.
    let sim_node = expand(tree, leaf, rng);

    let reward = simulate(tree, sim_node, player_color, rng);

    backprop_sim_result(tree, sim_node, reward, player_color);

    trace!(
        "Simulated from depth {} with reward {}",
        tree.depth(sim_node),
        reward
    );
}

/// Runs MCTS from `state` on behalf of the player whose turn it is.
///
/// The search stops after `config.iterations` iterations, or once
/// `config.time_limit` has elapsed, whichever comes first.  The action
/// chosen is the root child with the highest mean score.  If no child was
/// created at all, a random legal action is chosen instead.
///
/// Fails with `NoLegalMove` when the game is already over.
pub fn search<TState, R>(
    state: &TState,
    config: &MctsConfig,
    rng: &mut R,
) -> Result<SearchResult<TState>, GameError>
where
    TState: GameState,
    R: Rng,
{
    if state.is_game_over() {
        return Err(GameError::NoLegalMove);
    }

    let player_color = state.current_player_turn();
    let mut tree = MctsTree::new_root(MctsData::new(state.clone(), None));
    let root = tree.root();

    let now = Instant::now();
    let mut sim_count: usize = 0;

    while sim_count < config.iterations {
        if let Some(limit) = config.time_limit {
            if now.elapsed() >= limit {
                debug!("Time limit of {:?} reached after {} iterations", limit, sim_count);
                break;
            }
        }

        run_iteration(&mut tree, player_color, config.exploration_constant, rng);
        sim_count += 1;
    }

    let elapsed = now.elapsed();

    let action = match tree.best_child_by_score(root) {
        Some(best) => tree
            .data(best)
            .action()
            .expect("Every child node records the action that created it."),
        None => {
            debug!("No child was created, falling back to a random legal move");
            util::random_choice(&state.legal_moves(), rng)
        }
    };

    debug!(
        "Searched {} iterations in {:?}, tree has {} nodes",
        sim_count,
        elapsed,
        tree.len()
    );

    if log_enabled!(Level::Trace) {
        trace!("Search tree:\n{}", to_dot(&tree, 2));
    }

    Ok(SearchResult {
        action,
        iterations: sim_count,
        tree_size: tree.len(),
        children: tree.child_results(root),
        elapsed,
    })
}

/// The action a search from `state` settles on.
pub fn find_best_move<TState, R>(
    state: &TState,
    config: &MctsConfig,
    rng: &mut R,
) -> Result<TState::Move, GameError>
where
    TState: GameState,
    R: Rng,
{
    search(state, config, rng).map(|result| result.action)
}
