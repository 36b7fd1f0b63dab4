//! Flattened tree for presentation adapters.
//!
//! Renderers never walk [`GameTree`] themselves. They receive plain node and
//! edge lists plus path membership, which also serializes straight to JSON.

use itertools::Itertools;
use serde::Serialize;

use crate::game_tree::{GameTree, Node, Payoff};
use crate::paths::PathColor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewNode {
    /// 1-based display number.
    pub id: usize,
    /// Acting player's name; `None` for leaves.
    pub player: Option<String>,
    pub depth: usize,
    pub terminal: bool,
    pub payoffs: Vec<Payoff>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEdge {
    pub from: usize,
    pub to: usize,
    /// Strategy index of the acting player at `from`.
    pub alternative: usize,
    /// One entry per path whose nodes include `to`. Empty for a plain edge.
    pub colors: Vec<PathColor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewPath {
    pub gain: Payoff,
    pub nodes: Vec<usize>,
    pub color: PathColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeView {
    pub players: Vec<String>,
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
    pub paths: Vec<ViewPath>,
}

impl TreeView {
    /// Flatten `tree` in node-id order. Edges are listed per parent in
    /// strategy order.
    pub fn from_tree(tree: &GameTree) -> Self {
        let nodes = tree
            .nodes()
            .iter()
            .map(|node| ViewNode {
                id: node.number(),
                player: (!node.is_terminal()).then(|| tree.player_name(node.id).to_string()),
                depth: node.depth,
                terminal: node.is_terminal(),
                payoffs: node.payoffs.clone(),
                label: node_label(tree, node),
            })
            .collect();

        let mut edges = Vec::new();
        for node in tree.nodes() {
            for (alternative, &child) in node.children.iter().enumerate() {
                let colors = tree
                    .paths()
                    .iter()
                    .filter(|p| p.contains(child))
                    .map(|p| p.color)
                    .collect();
                edges.push(ViewEdge {
                    from: node.number(),
                    to: tree.node(child).number(),
                    alternative,
                    colors,
                });
            }
        }

        let paths = tree
            .paths()
            .iter()
            .map(|p| ViewPath {
                gain: p.gain.clone(),
                nodes: p.nodes.iter().map(|&id| tree.node(id).number()).collect(),
                color: p.color,
            })
            .collect();

        TreeView {
            players: tree.players().iter().map(|p| p.name.clone()).collect(),
            nodes,
            edges,
            paths,
        }
    }

    pub fn node(&self, id: usize) -> Option<&ViewNode> {
        self.nodes.get(id.checked_sub(1)?)
    }

    /// Outgoing edges of `id`, in strategy order.
    pub fn children_of(&self, id: usize) -> impl Iterator<Item = &ViewEdge> {
        self.edges.iter().filter(move |e| e.from == id)
    }
}

/// `[1, 0]`
pub fn format_payoff(payoff: &[i64]) -> String {
    format!("[{}]", payoff.iter().join(", "))
}

/// `[[1, 0], [1, 1]]`
pub fn format_payoffs(payoffs: &[Payoff]) -> String {
    format!("[{}]", payoffs.iter().map(|p| format_payoff(p)).join(", "))
}

/// Two-line label: leaves show their number and payoff, decision nodes
/// prefix the acting player's name and show payoffs once propagated.
pub fn node_label(tree: &GameTree, node: &Node) -> String {
    if node.is_terminal() {
        format!("{}\n{}", node.number(), format_payoffs(&node.payoffs))
    } else if node.payoffs.is_empty() {
        format!("{}: {}", tree.player_name(node.id), node.number())
    } else {
        format!(
            "{}: {}\n{}",
            tree.player_name(node.id),
            node.number(),
            format_payoffs(&node.payoffs)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payoff_formatting_matches_list_notation() {
        assert_eq!(format_payoff(&[1, 0]), "[1, 0]");
        assert_eq!(format_payoffs(&[vec![1, 0], vec![1, 1]]), "[[1, 0], [1, 1]]");
        assert_eq!(format_payoffs(&[]), "[]");
    }
}
