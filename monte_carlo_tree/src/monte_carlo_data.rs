use crate::tree::{NodeId, Tree};
use lib_boardgame::{GameState, PlayerColor};
use std::fmt;

/// A search tree whose nodes carry MCTS statistics.
pub type MctsTree<TState> = Tree<MctsData<TState>>;

/// Summary of one explored action, as seen from the node it was played from.
#[derive(Clone)]
pub struct MctsResult<TState: GameState> {
    pub action: TState::Move,
    pub plays: usize,
    pub score: f64,
}

impl<TState: GameState> MctsResult<TState> {
    pub fn mean_score(&self) -> f64 {
        mean(self.score, self.plays)
    }
}

impl<TState> fmt::Debug for MctsResult<TState>
where
    TState: GameState,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A: {:?} P: {:>8?} S: {:>10.1} ({:.3})",
            self.action,
            self.plays,
            self.score,
            self.mean_score(),
        )
    }
}

/// MCTS-related data that every Node will have.
///
/// The state records whose turn it is, so the player about to move at this
/// node is read from it; the player who made the move into this node is
/// always that player's opponent.
#[derive(Clone)]
pub struct MctsData<T>
where
    T: GameState,
{
    state: T,
    action: Option<T::Move>,
    plays: usize,
    score: f64,
}

impl<T> fmt::Debug for MctsData<T>
where
    T: GameState,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Action: {:?} Plays: {:?} Score: {:.2} ({:.3})",
            self.action,
            self.plays,
            self.score,
            self.mean_score()
        )
    }
}

impl<T> fmt::Display for MctsData<T>
where
    T: GameState,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Some(action) => write!(f, "{:?}\n{:.1}/{}", action, self.score, self.plays),
            None => write!(f, "root\n{:.1}/{}", self.score, self.plays),
        }
    }
}

impl<TState> From<&MctsData<TState>> for MctsResult<TState>
where
    TState: GameState,
{
    fn from(data: &MctsData<TState>) -> Self {
        Self {
            action: data
                .action()
                .expect("can't convert to MctsResult without an action"),
            plays: data.plays(),
            score: data.score(),
        }
    }
}

fn mean(score: f64, plays: usize) -> f64 {
    if plays == 0 {
        0.0
    } else {
        score / plays as f64
    }
}

impl<T> MctsData<T>
where
    T: GameState,
{
    pub fn new(state: T, action: Option<T::Move>) -> Self {
        Self {
            state,
            action,
            plays: 0,
            score: 0.0,
        }
    }

    // "Read" functions

    pub fn state(&self) -> &T {
        &self.state
    }

    /// The move that led here, or None for the root.
    pub fn action(&self) -> Option<T::Move> {
        self.action
    }

    pub fn plays(&self) -> usize {
        self.plays
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// score / plays, or 0 for a node that was never played.
    pub fn mean_score(&self) -> f64 {
        mean(self.score, self.plays)
    }

    pub fn player_to_move(&self) -> PlayerColor {
        self.state.current_player_turn()
    }

    pub fn player_just_moved(&self) -> PlayerColor {
        self.player_to_move().opponent()
    }

    // "Write" functions

    pub fn increment_plays(&mut self) {
        self.plays += 1;
    }

    pub fn add_score(&mut self, amount: f64) {
        self.score += amount;
    }
}

impl<TState: GameState> MctsTree<TState> {
    /// Legal actions from this node's state that have no child yet,
    /// in the state's legal-move order.
    pub fn untried_actions(&self, id: NodeId) -> Vec<TState::Move> {
        let tried = self
            .children(id)
            .iter()
            .filter_map(|&c| self.data(c).action())
            .collect::<Vec<_>>();

        self.data(id)
            .state()
            .legal_moves()
            .into_iter()
            .filter(|a| !tried.contains(a))
            .collect()
    }

    pub fn has_untried_actions(&self, id: NodeId) -> bool {
        !self.untried_actions(id).is_empty()
    }

    /// The child with the highest mean score (the first one on ties),
    /// or None for a leaf.
    pub fn best_child_by_score(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;

        for &child in self.children(id) {
            let mean = self.data(child).mean_score();

            match best {
                Some((_, best_mean)) if best_mean >= mean => {}
                _ => best = Some((child, mean)),
            }
        }

        best.map(|(child, _)| child)
    }

    /// One result per child of the node, in child order.
    pub fn child_results(&self, id: NodeId) -> Vec<MctsResult<TState>> {
        self.children(id)
            .iter()
            .map(|&c| self.data(c).into())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_connect_four::{ConnectFourAction, ConnectFourState};

    fn make_test_data() -> MctsData<ConnectFourState> {
        MctsData::new(ConnectFourState::new(), None)
    }

    fn child_data(
        tree: &MctsTree<ConnectFourState>,
        parent: NodeId,
        col: usize,
    ) -> MctsData<ConnectFourState> {
        let action = ConnectFourAction::new(col);
        let state = tree
            .data(parent)
            .state()
            .next_state(action)
            .expect("column has room");

        MctsData::new(state, Some(action))
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn mean_score_expects_zero_for_unplayed_node() {
        let data = make_test_data();

        assert_eq!(0, data.plays());
        assert_eq!(0.0, data.mean_score());
    }

    #[test]
    fn player_just_moved_expects_opponent_of_player_to_move() {
        let data = make_test_data();

        assert_eq!(PlayerColor::Black, data.player_to_move());
        assert_eq!(PlayerColor::White, data.player_just_moved());
    }

    #[test]
    fn untried_actions_expects_all_columns_on_fresh_root() {
        let tree = MctsTree::new_root(make_test_data());

        assert_eq!(6, tree.untried_actions(tree.root()).len());
        assert!(tree.has_untried_actions(tree.root()));
        assert!(tree.is_leaf(tree.root()));
    }

    #[test]
    fn untried_actions_expects_excludes_expanded_children() {
        let mut tree = MctsTree::new_root(make_test_data());
        let root = tree.root();

        for col in 0..5 {
            let data = child_data(&tree, root, col);
            tree.add_child(root, data);
        }

        assert_eq!(vec![ConnectFourAction::new(5)], tree.untried_actions(root));

        let data = child_data(&tree, root, 5);
        tree.add_child(root, data);

        assert!(!tree.has_untried_actions(root));
    }

    #[test]
    fn best_child_by_score_expects_highest_mean_not_highest_total() {
        let mut tree = MctsTree::new_root(make_test_data());
        let root = tree.root();

        let data = child_data(&tree, root, 0);
        let busy = tree.add_child(root, data);
        let data = child_data(&tree, root, 1);
        let efficient = tree.add_child(root, data);

        // busy: 6 / 10 = 0.6, efficient: 2 / 2 = 1.0
        for _ in 0..10 {
            tree.data_mut(busy).increment_plays();
        }
        tree.data_mut(busy).add_score(6.0);
        for _ in 0..2 {
            tree.data_mut(efficient).increment_plays();
        }
        tree.data_mut(efficient).add_score(2.0);

        assert_eq!(Some(efficient), tree.best_child_by_score(root));
    }

    #[test]
    fn best_child_by_score_expects_first_child_on_ties() {
        let mut tree = MctsTree::new_root(make_test_data());
        let root = tree.root();

        let data = child_data(&tree, root, 3);
        let first = tree.add_child(root, data);
        let data = child_data(&tree, root, 4);
        let _second = tree.add_child(root, data);

        assert_eq!(Some(first), tree.best_child_by_score(root));
    }

    #[test]
    fn best_child_by_score_expects_none_for_leaf() {
        let tree = MctsTree::new_root(make_test_data());

        assert_eq!(None, tree.best_child_by_score(tree.root()));
    }

    #[test]
    fn child_results_expects_one_per_child() {
        let mut tree = MctsTree::new_root(make_test_data());
        let root = tree.root();

        let data = child_data(&tree, root, 2);
        let child = tree.add_child(root, data);
        tree.data_mut(child).increment_plays();
        tree.data_mut(child).add_score(0.5);

        let results = tree.child_results(root);

        assert_eq!(1, results.len());
        assert_eq!(ConnectFourAction::new(2), results[0].action);
        assert_eq!(1, results[0].plays);
        assert!((results[0].mean_score() - 0.5).abs() < 1e-9);
    }
}
