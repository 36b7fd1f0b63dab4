use serde::{Deserialize, Serialize};

use crate::config::TreeConfig;

/// A participant in the game. Players are named `A`, `B`, `C`, ... by seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Number of branches this player creates at a decision node.
    pub strategies: usize,
}

impl Player {
    pub fn new(name: impl Into<String>, strategies: usize) -> Self {
        Player {
            name: name.into(),
            strategies,
        }
    }
}

/// Seat name for a player index: 0 -> "A", 1 -> "B", ..., 25 -> "Z", 26 -> "A1".
pub fn seat_name(index: usize) -> String {
    let letter = (b'A' + (index % 26) as u8) as char;
    let lap = index / 26;
    if lap == 0 {
        letter.to_string()
    } else {
        format!("{}{}", letter, lap)
    }
}

/// Build the player registry described by a configuration.
///
/// Assumes the configuration has already been validated.
pub fn players_from_config(config: &TreeConfig) -> Vec<Player> {
    config
        .players_strategies_numbers
        .iter()
        .enumerate()
        .map(|(i, &strategies)| Player::new(seat_name(i), strategies))
        .collect()
}

/// Index of the player who acts after `current` in round-robin order.
#[inline]
pub fn next_player(current: usize, num_players: usize) -> usize {
    if current + 1 < num_players {
        current + 1
    } else {
        0
    }
}
