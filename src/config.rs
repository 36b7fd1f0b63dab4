//! Settings for random tree generation.
//!
//! A single structured object carries everything the builder needs. It can be
//! assembled in code, deserialized from JSON, or taken from [`Default`] (three
//! players with three strategies each, payoffs 0..=15, depth 5, pruning from
//! depth 3).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// Parameters of a random extensive-form game tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub number_of_players: usize,
    /// Strategy count per player, indexed by seat.
    pub players_strategies_numbers: Vec<usize>,
    pub lowest_gain: i64,
    pub highest_gain: i64,
    /// Nodes at this depth are always leaves. The root sits at depth 1.
    pub max_depth: usize,
    /// From this depth on, every node becomes a leaf on a fair coin flip.
    pub pruning_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            number_of_players: 3,
            players_strategies_numbers: vec![3, 3, 3],
            lowest_gain: 0,
            highest_gain: 15,
            max_depth: 5,
            pruning_depth: 3,
        }
    }
}

impl TreeConfig {
    pub fn new(
        players_strategies_numbers: Vec<usize>,
        lowest_gain: i64,
        highest_gain: i64,
        max_depth: usize,
        pruning_depth: usize,
    ) -> TreeResult<Self> {
        let config = TreeConfig {
            number_of_players: players_strategies_numbers.len(),
            players_strategies_numbers,
            lowest_gain,
            highest_gain,
            max_depth,
            pruning_depth,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every structural invariant. Building never starts on a config
    /// that fails here.
    pub fn validate(&self) -> TreeResult<()> {
        if self.number_of_players == 0 {
            return Err(TreeError::InvalidConfig(
                "number_of_players must be at least 1".to_string(),
            ));
        }
        if self.players_strategies_numbers.len() != self.number_of_players {
            return Err(TreeError::InvalidConfig(format!(
                "expected {} strategy counts, got {}",
                self.number_of_players,
                self.players_strategies_numbers.len()
            )));
        }
        if let Some(seat) = self.players_strategies_numbers.iter().position(|&s| s == 0) {
            return Err(TreeError::InvalidConfig(format!(
                "player {} has no strategies",
                seat
            )));
        }
        if self.lowest_gain > self.highest_gain {
            return Err(TreeError::InvalidConfig(format!(
                "lowest_gain {} exceeds highest_gain {}",
                self.lowest_gain, self.highest_gain
            )));
        }
        if self.max_depth == 0 {
            return Err(TreeError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.pruning_depth == 0 || self.pruning_depth > self.max_depth {
            return Err(TreeError::InvalidConfig(format!(
                "pruning_depth {} must lie in [1, {}]",
                self.pruning_depth, self.max_depth
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> TreeResult<Self> {
        let config: TreeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> TreeResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> TreeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Upper bound on the node count: a full tree where no coin flip prunes.
    pub fn max_nodes(&self) -> u128 {
        let n = self.number_of_players;
        let mut level: u128 = 1;
        let mut total: u128 = 1;
        for depth in 1..self.max_depth {
            let branching = self.players_strategies_numbers[(depth - 1) % n] as u128;
            level = level.saturating_mul(branching);
            total = total.saturating_add(level);
        }
        total
    }
}
