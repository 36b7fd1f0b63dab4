//! Random extensive-form game tree.
//!
//! Nodes live in a flat arena owned by [`GameTree`]. A node's arena index is
//! its identity; the number shown to users is `index + 1`, so the root is
//! node 1 and ids follow creation (pre-order) order. Parent links are plain
//! indices and never own anything.
//!
//! Construction follows the round-robin turn order: player 0 acts at the
//! root, and every decision node creates one child per strategy of its
//! acting player, handing the turn to the next seat. From `pruning_depth`
//! on a fair coin decides whether a node becomes a leaf; at `max_depth`
//! every node is a leaf. Leaves carry one random payoff vector.

use rand::Rng;
use serde::Serialize;

use crate::config::TreeConfig;
use crate::error::{TreeError, TreeResult};
use crate::induction::propagate;
use crate::paths::{extract_paths, Path};
use crate::player::{next_player, players_from_config, Player};

/// Arena index of a node.
pub type NodeId = usize;

/// One integer payoff per component.
pub type Payoff = Vec<i64>;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    /// Seat of the player who chooses here. Leaves keep the seat the turn
    /// would have passed to.
    pub player: usize,
    /// Root = 1.
    pub depth: usize,
    pub parent: Option<NodeId>,
    /// One child per strategy of `player`, in strategy order.
    pub children: Vec<NodeId>,
    /// Leaf: the single generated vector. Decision node: empty until
    /// backward induction fills it.
    pub payoffs: Vec<Payoff>,
}

impl Node {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.children.is_empty()
    }

    /// 1-based display number.
    #[inline]
    pub fn number(&self) -> usize {
        self.id + 1
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GameTree {
    config: TreeConfig,
    players: Vec<Player>,
    nodes: Vec<Node>,
    root: NodeId,
    paths: Vec<Path>,
}

/// Headline numbers of a solved (or unsolved) tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    pub root_payoffs: Vec<Payoff>,
    pub paths: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub depth: usize,
}

impl GameTree {
    /// Validate `config` and grow a random tree from it.
    pub fn generate<R: Rng>(config: &TreeConfig, rng: &mut R) -> TreeResult<Self> {
        config.validate()?;
        let players = players_from_config(config);

        let mut builder = RandomBuilder {
            config,
            players: &players,
            nodes: Vec::new(),
            rng,
        };
        let root = builder.build(None, 0, 1);
        let nodes = builder.nodes;

        log::debug!(
            "generated tree: {} nodes, {} leaves (at most {} possible)",
            nodes.len(),
            nodes.iter().filter(|n| n.is_terminal()).count(),
            config.max_nodes(),
        );

        Ok(GameTree {
            config: config.clone(),
            players,
            nodes,
            root,
            paths: Vec::new(),
        })
    }

    /// Assemble a tree with a fixed shape and fixed leaf payoffs.
    ///
    /// The shape must obey the same rules a generated tree does: each
    /// decision node has exactly as many children as its acting player has
    /// strategies, each leaf vector is as long as the leaf player's strategy
    /// count with components inside the gain range, nothing is deeper than
    /// `max_depth`, and nothing shallower than `pruning_depth` is a leaf.
    pub fn from_shape(config: &TreeConfig, shape: &Shape) -> TreeResult<Self> {
        config.validate()?;
        let players = players_from_config(config);
        let mut nodes = Vec::new();
        let root = place_shape(config, &players, &mut nodes, shape, None, 0, 1)?;
        Ok(GameTree {
            config: config.clone(),
            players,
            nodes,
            root,
            paths: Vec::new(),
        })
    }

    /// Run backward induction from the root, then recover the equilibrium
    /// paths. Safe to call repeatedly: payoffs already propagated are kept
    /// and paths are rebuilt from scratch.
    pub fn solve(&mut self) -> TreeResult<&[Path]> {
        let root = self.root;
        propagate(self, root)?;
        self.paths = extract_paths(self)?;
        log::debug!(
            "solved tree: {} root payoff vector(s), {} path(s)",
            self.root_node().payoffs.len(),
            self.paths.len(),
        );
        Ok(&self.paths)
    }

    pub fn is_solved(&self) -> bool {
        !self.root_node().payoffs.is_empty()
    }

    pub fn summary(&self) -> Solution {
        Solution {
            root_payoffs: self.root_node().payoffs.clone(),
            paths: self.paths.len(),
            nodes: self.nodes.len(),
            leaves: self.leaves().count(),
            depth: self.depth_reached(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_terminal())
    }

    /// Depth of the deepest node.
    pub fn depth_reached(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn player_name(&self, id: NodeId) -> &str {
        &self.players[self.nodes[id].player].name
    }
}

// ---------------------------------------------------------------------------
// Random construction
// ---------------------------------------------------------------------------

struct RandomBuilder<'a, R: Rng> {
    config: &'a TreeConfig,
    players: &'a [Player],
    nodes: Vec<Node>,
    rng: &'a mut R,
}

impl<'a, R: Rng> RandomBuilder<'a, R> {
    fn build(&mut self, parent: Option<NodeId>, player: usize, depth: usize) -> NodeId {
        let id = self.nodes.len();
        let terminal = if depth == self.config.max_depth {
            true
        } else if depth >= self.config.pruning_depth {
            self.rng.gen_bool(0.5)
        } else {
            false
        };

        let payoffs = if terminal {
            let payoff: Payoff = (0..self.players[player].strategies)
                .map(|_| {
                    self.rng
                        .gen_range(self.config.lowest_gain..=self.config.highest_gain)
                })
                .collect();
            vec![payoff]
        } else {
            Vec::new()
        };

        self.nodes.push(Node {
            id,
            player,
            depth,
            parent,
            children: Vec::new(),
            payoffs,
        });

        if !terminal {
            let next = next_player(player, self.players.len());
            let children: Vec<NodeId> = (0..self.players[player].strategies)
                .map(|_| self.build(Some(id), next, depth + 1))
                .collect();
            self.nodes[id].children = children;
        }

        id
    }
}

// ---------------------------------------------------------------------------
// Fixed-shape construction
// ---------------------------------------------------------------------------

/// Explicit tree outline for [`GameTree::from_shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Leaf(Payoff),
    Decision(Vec<Shape>),
}

impl Shape {
    pub fn leaf(payoff: Payoff) -> Self {
        Shape::Leaf(payoff)
    }

    pub fn decision(children: Vec<Shape>) -> Self {
        Shape::Decision(children)
    }
}

fn place_shape(
    config: &TreeConfig,
    players: &[Player],
    nodes: &mut Vec<Node>,
    shape: &Shape,
    parent: Option<NodeId>,
    player: usize,
    depth: usize,
) -> TreeResult<NodeId> {
    let id = nodes.len();
    let strategies = players[player].strategies;
    let mismatch = |reason: String| TreeError::Inconsistent {
        node: id + 1,
        reason,
    };

    match shape {
        Shape::Leaf(payoff) => {
            if depth < config.pruning_depth {
                return Err(mismatch(format!(
                    "leaf at depth {} is above pruning depth {}",
                    depth, config.pruning_depth
                )));
            }
            if payoff.len() != strategies {
                return Err(mismatch(format!(
                    "payoff has {} components, player {} has {} strategies",
                    payoff.len(),
                    players[player].name,
                    strategies
                )));
            }
            if let Some(v) = payoff
                .iter()
                .find(|&&v| v < config.lowest_gain || v > config.highest_gain)
            {
                return Err(mismatch(format!(
                    "payoff {} outside [{}, {}]",
                    v, config.lowest_gain, config.highest_gain
                )));
            }
            nodes.push(Node {
                id,
                player,
                depth,
                parent,
                children: Vec::new(),
                payoffs: vec![payoff.clone()],
            });
        }
        Shape::Decision(children) => {
            if depth >= config.max_depth {
                return Err(mismatch(format!(
                    "decision node at depth {} reaches max depth {}",
                    depth, config.max_depth
                )));
            }
            if children.len() != strategies {
                return Err(mismatch(format!(
                    "{} children, player {} has {} strategies",
                    children.len(),
                    players[player].name,
                    strategies
                )));
            }
            nodes.push(Node {
                id,
                player,
                depth,
                parent,
                children: Vec::new(),
                payoffs: Vec::new(),
            });
            let next = next_player(player, players.len());
            let mut ids = Vec::with_capacity(children.len());
            for child in children {
                ids.push(place_shape(
                    config,
                    players,
                    nodes,
                    child,
                    Some(id),
                    next,
                    depth + 1,
                )?);
            }
            nodes[id].children = ids;
        }
    }

    Ok(id)
}
