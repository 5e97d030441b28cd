use crate::tree::{NodeId, Tree};
use std::fmt::Display;

/// Renders the tree in Graphviz DOT format, down to `max_depth` edges below the root.
/// Search logs this at trace level.
pub fn to_dot<T: Display>(tree: &Tree<T>, max_depth: usize) -> String {
    const HEADER: &str = "digraph mcts {\nratio = fill;\nnode [style=filled];\n";
    const FOOTER: &str = "}\n";

    let mut node_labels = String::new();
    let mut node_id_mappings = String::new();

    let mut node_queue = vec![(tree.root(), 0)];

    while let Some((cur, depth)) = node_queue.pop() {
        let node_label = format!(
            "{} [label = \"{}\"];\n",
            dot_id(cur),
            sanitize(tree.data(cur).to_string())
        );
        node_labels.push_str(&node_label);

        if depth == max_depth {
            continue;
        }

        for &child in tree.children(cur) {
            let node_id_mapping = format!("{} -> {};\n", dot_id(cur), dot_id(child));
            node_id_mappings.push_str(&node_id_mapping);

            node_queue.push((child, depth + 1));
        }
    }

    format!("{}{}{}{}", HEADER, node_labels, node_id_mappings, FOOTER)
}

fn dot_id(id: NodeId) -> String {
    format!("n{}_{}", id.index(), id.generation())
}

fn sanitize<T: AsRef<str>>(s: T) -> String {
    s.as_ref().replace('"', "\\\"").replace('\n', "\\n")
}
