//! Backward induction.
//!
//! Every decision node adopts the payoff sets of the children that are best
//! for its acting player. Ties are never broken: when several children reach
//! the best value, all of their vectors are pooled, in child order, without
//! deduplication. A child counts as best if any one of its vectors reaches
//! the best value, and then its whole set is adopted.

use crate::error::{TreeError, TreeResult};
use crate::game_tree::{GameTree, NodeId, Payoff};

/// Fill the payoff sets of the subtree rooted at `id`, children first.
///
/// Nodes that already hold payoffs are left untouched, so a second call is a
/// no-op.
pub fn propagate(tree: &mut GameTree, id: NodeId) -> TreeResult<()> {
    let node = tree.node(id);
    if !node.payoffs.is_empty() {
        return Ok(());
    }
    if node.children.is_empty() {
        return Err(TreeError::Inconsistent {
            node: node.number(),
            reason: "decision node without children".to_string(),
        });
    }

    let player = node.player;
    let children = node.children.clone();

    for &child in &children {
        if tree.node(child).payoffs.is_empty() {
            propagate(tree, child)?;
        }
    }

    let best = best_value(tree, id, player, &children)?;

    let mut adopted: Vec<Payoff> = Vec::new();
    for &child in &children {
        let payoffs = &tree.node(child).payoffs;
        if payoffs.iter().any(|v| v[player] == best) {
            adopted.extend(payoffs.iter().cloned());
        }
    }

    tree.node_mut(id).payoffs = adopted;
    Ok(())
}

/// Largest `player` component over every vector of every child.
fn best_value(
    tree: &GameTree,
    id: NodeId,
    player: usize,
    children: &[NodeId],
) -> TreeResult<i64> {
    let mut best: Option<i64> = None;
    for &child in children {
        for payoff in &tree.node(child).payoffs {
            let value = payoff.get(player).copied().ok_or_else(|| TreeError::Inconsistent {
                node: tree.node(child).number(),
                reason: format!(
                    "payoff has {} components, player {} needs component {}",
                    payoff.len(),
                    tree.players()[player].name,
                    player
                ),
            })?;
            best = Some(best.map_or(value, |b| b.max(value)));
        }
    }
    best.ok_or_else(|| TreeError::Inconsistent {
        node: tree.node(id).number(),
        reason: "children carry no payoffs".to_string(),
    })
}
