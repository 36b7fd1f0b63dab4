//! Random extensive-form game trees with perfect information, solved by
//! backward induction.
//!
//! ```no_run
//! use gametree_cli::config::TreeConfig;
//! use gametree_cli::game_tree::GameTree;
//! use rand::SeedableRng;
//!
//! let config = TreeConfig::default();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let mut tree = GameTree::generate(&config, &mut rng)?;
//! for path in tree.solve()? {
//!     println!("{:?} via {} nodes", path.gain, path.nodes.len());
//! }
//! # Ok::<(), gametree_cli::error::TreeError>(())
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod game_tree;
pub mod induction;
pub mod paths;
pub mod player;
pub mod view;
