use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::batch::sample_trees;
use crate::config::TreeConfig;
use crate::display::{batch_table, path_table, print_error, print_section, solution_table, to_dot, tree_outline};
use crate::error::TreeResult;
use crate::game_tree::GameTree;
use crate::view::TreeView;

#[derive(Parser)]
#[command(name = "gametree", version, about = "Random extensive-form game trees solved by backward induction.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Outline,
    Dot,
    Json,
}

/// Tree parameters. Flags override values read from `--config`.
#[derive(Args, Clone)]
struct TreeArgs {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Strategy count per player, comma-separated (e.g., 3,3,3)
    #[arg(long, value_delimiter = ',')]
    strategies: Option<Vec<usize>>,
    /// Lowest leaf payoff
    #[arg(long, allow_hyphen_values = true)]
    low: Option<i64>,
    /// Highest leaf payoff
    #[arg(long, allow_hyphen_values = true)]
    high: Option<i64>,
    /// Depth at which every node is a leaf (root = 1)
    #[arg(long)]
    max_depth: Option<usize>,
    /// Depth from which nodes may randomly become leaves
    #[arg(long)]
    pruning_depth: Option<usize>,
}

impl TreeArgs {
    fn resolve(&self) -> TreeResult<TreeConfig> {
        let mut config = match &self.config {
            Some(path) => TreeConfig::load(path)?,
            None => TreeConfig::default(),
        };
        if let Some(strategies) = &self.strategies {
            config.number_of_players = strategies.len();
            config.players_strategies_numbers = strategies.clone();
        }
        if let Some(low) = self.low {
            config.lowest_gain = low;
        }
        if let Some(high) = self.high {
            config.highest_gain = high;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(pruning_depth) = self.pruning_depth {
            config.pruning_depth = pruning_depth;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one tree, solve it and print it
    Solve {
        #[command(flatten)]
        tree: TreeArgs,
        /// RNG seed (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,
        /// Output format
        #[arg(short, long, default_value = "outline")]
        format: OutputFormat,
        /// Print the tree before backward induction as well
        #[arg(long)]
        unsolved: bool,
    },
    /// Solve many seeded trees and summarize
    Batch {
        #[command(flatten)]
        tree: TreeArgs,
        /// Number of trees
        #[arg(short = 'n', long, default_value = "1000")]
        count: usize,
        /// Seed of the first tree; tree i uses seed + i
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        tree: TreeArgs,
    },
}

pub fn run() {
    let cli = Cli::parse();
    dispatch(cli);
}

pub fn run_with_args(args: Vec<String>) {
    let cli = Cli::parse_from(args);
    dispatch(cli);
}

fn dispatch(cli: Cli) {
    let result = match cli.command {
        Commands::Solve {
            tree,
            seed,
            format,
            unsolved,
        } => cmd_solve(&tree, seed, format, unsolved),
        Commands::Batch { tree, count, seed } => cmd_batch(&tree, count, seed),
        Commands::Config { tree } => cmd_config(&tree),
    };

    if let Err(e) = result {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn cmd_solve(args: &TreeArgs, seed: Option<u64>, format: OutputFormat, unsolved: bool) -> TreeResult<()> {
    let config = args.resolve()?;
    let seed = seed.unwrap_or_else(rand::random);
    log::debug!("solving with seed {}", seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree = GameTree::generate(&config, &mut rng)?;

    if unsolved {
        emit(&TreeView::from_tree(&tree), format, "Tree")?;
    }

    tree.solve()?;
    let view = TreeView::from_tree(&tree);
    emit(&view, format, "Tree with paths")?;

    if let OutputFormat::Outline = format {
        print_section("Paths", &path_table(&view));
        print_section("Summary", &solution_table(&tree.summary()));
        println!();
        println!("  {} {}", "Seed:".dimmed(), seed);
    }
    Ok(())
}

fn emit(view: &TreeView, format: OutputFormat, title: &str) -> TreeResult<()> {
    match format {
        OutputFormat::Outline => print_section(title, &tree_outline(view)),
        OutputFormat::Dot => print!("{}", to_dot(view)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(view)?),
    }
    Ok(())
}

fn cmd_batch(args: &TreeArgs, count: usize, seed: u64) -> TreeResult<()> {
    let config = args.resolve()?;

    println!();
    println!(
        "  Solving {} trees ({} players, depth {}, pruning from {})...",
        count, config.number_of_players, config.max_depth, config.pruning_depth
    );

    let summary = sample_trees(&config, count, seed)?;
    println!();
    println!("{}", batch_table(&summary));
    Ok(())
}

fn cmd_config(args: &TreeArgs) -> TreeResult<()> {
    let config = args.resolve()?;
    println!("{}", config.to_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&["gametree", "config", "--strategies", "2,4", "--low", "-3", "--max-depth", "3", "--pruning-depth", "2"]);
        let Commands::Config { tree } = cli.command else {
            panic!("expected config subcommand");
        };
        let config = tree.resolve().unwrap();
        assert_eq!(config.number_of_players, 2);
        assert_eq!(config.players_strategies_numbers, vec![2, 4]);
        assert_eq!(config.lowest_gain, -3);
        assert_eq!(config.highest_gain, 15);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.pruning_depth, 2);
    }

    #[test]
    fn commands_run_end_to_end() {
        let args = |s: &str| s.split_whitespace().map(String::from).collect::<Vec<_>>();
        run_with_args(args("gametree config --strategies 2,2"));
        run_with_args(args("gametree solve --seed 1 --format dot --max-depth 3 --pruning-depth 2 --unsolved"));
        run_with_args(args("gametree solve --seed 2 --format json --strategies 2,2 --max-depth 3"));
        run_with_args(args("gametree batch -n 8 --seed 5 --max-depth 4"));
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = parse(&["gametree", "config", "--pruning-depth", "9"]);
        let Commands::Config { tree } = cli.command else {
            panic!("expected config subcommand");
        };
        assert!(tree.resolve().is_err());
    }
}
