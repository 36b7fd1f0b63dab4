//! Equilibrium path recovery.
//!
//! Once the root holds its payoff set, every child of the root carrying one
//! of those vectors starts a path, which then follows every child that
//! carries the same vector down to a leaf.
//!
//! Several children of one node may carry the target vector. They are all
//! appended to the same path rather than forking new ones, so a path can
//! hold more than one node per depth. Callers that need strictly linear
//! paths must split them on depth themselves.

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::game_tree::{GameTree, NodeId, Payoff};

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Presentation tag attached to each path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathColor {
    Green,
    Yellow,
    Red,
    Blue,
    Pink,
    Orange,
    Magenta,
    Cyan,
}

impl PathColor {
    /// Assignment order.
    pub const PALETTE: [PathColor; 8] = [
        PathColor::Green,
        PathColor::Yellow,
        PathColor::Red,
        PathColor::Blue,
        PathColor::Pink,
        PathColor::Orange,
        PathColor::Magenta,
        PathColor::Cyan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PathColor::Green => "green",
            PathColor::Yellow => "yellow",
            PathColor::Red => "red",
            PathColor::Blue => "blue",
            PathColor::Pink => "pink",
            PathColor::Orange => "orange",
            PathColor::Magenta => "magenta",
            PathColor::Cyan => "cyan",
        }
    }
}

/// Round-robin over [`PathColor::PALETTE`].
#[derive(Debug, Default, Clone)]
pub struct ColorCycle {
    issued: usize,
}

impl ColorCycle {
    pub fn new() -> Self {
        ColorCycle::default()
    }

    pub fn next_color(&mut self) -> PathColor {
        let color = PathColor::PALETTE[self.issued % PathColor::PALETTE.len()];
        self.issued += 1;
        color
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    /// Root payoff vector this path realizes.
    pub gain: Payoff,
    /// Starts at a child of the root.
    pub nodes: Vec<NodeId>,
    pub color: PathColor,
}

impl Path {
    pub fn new(gain: Payoff, initial: NodeId, color: PathColor) -> Self {
        Path {
            gain,
            nodes: vec![initial],
            color,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Last node appended.
    pub fn tail(&self) -> NodeId {
        // Never empty: constructed with its initial node.
        self.nodes[self.nodes.len() - 1]
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Recover every path consistent with the root's propagated payoffs.
///
/// Fails with [`TreeError::NotSolved`] when the root has no payoffs yet.
pub fn extract_paths(tree: &GameTree) -> TreeResult<Vec<Path>> {
    let root = tree.root_node();
    if root.payoffs.is_empty() {
        return Err(TreeError::NotSolved);
    }

    let mut colors = ColorCycle::new();
    let mut paths = Vec::new();

    for &child in &root.children {
        for gain in &tree.node(child).payoffs {
            if !root.payoffs.contains(gain) {
                continue;
            }
            let mut path = Path::new(gain.clone(), child, colors.next_color());
            log::trace!(
                "path {} from node {} towards {:?}",
                path.color.as_str(),
                tree.node(child).number(),
                gain
            );
            extend(tree, &mut path, child);
            paths.push(path);
        }
    }

    Ok(paths)
}

fn extend(tree: &GameTree, path: &mut Path, from: NodeId) {
    let node = tree.node(from);
    if node.depth == tree.config().max_depth {
        return;
    }
    for &child in &node.children {
        for payoff in &tree.node(child).payoffs {
            if *payoff == path.gain {
                path.nodes.push(child);
                extend(tree, path, child);
            }
        }
    }
}
