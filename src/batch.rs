//! Batch sampling: generate and solve many independently seeded trees and
//! aggregate what backward induction found.
//!
//! Tree `i` is grown from `StdRng::seed_from_u64(base_seed + i)`, so results
//! do not depend on how rayon schedules the work.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::config::TreeConfig;
use crate::error::{TreeError, TreeResult};
use crate::game_tree::GameTree;

/// Per-tree figures collected by [`sample_trees`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    pub seed: u64,
    pub nodes: usize,
    pub leaves: usize,
    pub root_payoffs: usize,
    pub paths: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub trees: usize,
    pub mean_nodes: f64,
    pub mean_leaves: f64,
    pub mean_root_payoffs: f64,
    pub mean_paths: f64,
    /// Share of trees whose root kept more than one payoff vector.
    pub tied_fraction: f64,
    pub max_paths: usize,
}

impl BatchSummary {
    pub fn from_stats(stats: &[TreeStats]) -> Self {
        let n = stats.len();
        let mean = |f: fn(&TreeStats) -> usize| -> f64 {
            if n == 0 {
                0.0
            } else {
                stats.iter().map(f).sum::<usize>() as f64 / n as f64
            }
        };
        let tied = stats.iter().filter(|s| s.root_payoffs > 1).count();

        BatchSummary {
            trees: n,
            mean_nodes: mean(|s| s.nodes),
            mean_leaves: mean(|s| s.leaves),
            mean_root_payoffs: mean(|s| s.root_payoffs),
            mean_paths: mean(|s| s.paths),
            tied_fraction: if n == 0 { 0.0 } else { tied as f64 / n as f64 },
            max_paths: stats.iter().map(|s| s.paths).max().unwrap_or(0),
        }
    }
}

/// Generate and solve one tree from `seed`.
pub fn solve_seeded(config: &TreeConfig, seed: u64) -> TreeResult<TreeStats> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = GameTree::generate(config, &mut rng)?;
    tree.solve()?;
    let summary = tree.summary();
    Ok(TreeStats {
        seed,
        nodes: summary.nodes,
        leaves: summary.leaves,
        root_payoffs: summary.root_payoffs.len(),
        paths: summary.paths,
    })
}

/// Solve `count` trees in parallel. Stats come back in seed order.
pub fn sample_stats(config: &TreeConfig, count: usize, base_seed: u64) -> TreeResult<Vec<TreeStats>> {
    config.validate()?;
    if count == 0 {
        return Err(TreeError::InvalidConfig(
            "batch needs at least one tree".to_string(),
        ));
    }

    log::info!("sampling {} trees from seed {}", count, base_seed);
    (0..count)
        .into_par_iter()
        .map(|i| solve_seeded(config, base_seed.wrapping_add(i as u64)))
        .collect()
}

pub fn sample_trees(config: &TreeConfig, count: usize, base_seed: u64) -> TreeResult<BatchSummary> {
    let stats = sample_stats(config, count, base_seed)?;
    let summary = BatchSummary::from_stats(&stats);
    log::info!(
        "sampled {} trees: {:.2} paths on average, {:.1}% tied roots",
        summary.trees,
        summary.mean_paths,
        summary.tied_fraction * 100.0
    );
    Ok(summary)
}
