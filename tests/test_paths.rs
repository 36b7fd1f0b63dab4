//! Tests for equilibrium path extraction.

use gametree_cli::config::TreeConfig;
use gametree_cli::error::TreeError;
use gametree_cli::game_tree::{GameTree, Shape};
use gametree_cli::paths::{extract_paths, PathColor};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn two_by_two(high: i64) -> TreeConfig {
    TreeConfig::new(vec![2, 2], 0, high, 3, 3).unwrap()
}

fn root_with(a: [[i64; 2]; 2], b: [[i64; 2]; 2]) -> Shape {
    Shape::decision(vec![
        Shape::decision(vec![Shape::leaf(a[0].to_vec()), Shape::leaf(a[1].to_vec())]),
        Shape::decision(vec![Shape::leaf(b[0].to_vec()), Shape::leaf(b[1].to_vec())]),
    ])
}

fn solved(config: &TreeConfig, shape: &Shape) -> GameTree {
    let mut tree = GameTree::from_shape(config, shape).unwrap();
    tree.solve().unwrap();
    tree
}

// Node ids in a full 2x2 tree of depth 3:
//   0 root, 1 A, 2-3 A's leaves, 4 B, 5-6 B's leaves.

// ---------------------------------------------------------------------------
// Fixed scenarios
// ---------------------------------------------------------------------------

#[test]
fn single_equilibrium_single_path() {
    let tree = solved(&two_by_two(1), &root_with([[0, 1], [1, 0]], [[1, 1], [0, 0]]));
    let paths = tree.paths();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].gain, vec![1, 1]);
    assert_eq!(paths[0].nodes, vec![4, 5]);
    assert_eq!(paths[0].color, PathColor::Green);
}

#[test]
fn tie_at_root_gives_one_path_per_child() {
    let tree = solved(&two_by_two(2), &root_with([[1, 2], [2, 0]], [[1, 1], [0, 0]]));
    let paths = tree.paths();
    assert_eq!(paths.len(), 2);

    assert_eq!(paths[0].gain, vec![1, 2]);
    assert_eq!(paths[0].nodes, vec![1, 2]);
    assert_eq!(paths[0].color, PathColor::Green);

    assert_eq!(paths[1].gain, vec![1, 1]);
    assert_eq!(paths[1].nodes, vec![4, 5]);
    assert_eq!(paths[1].color, PathColor::Yellow);
}

#[test]
fn whole_set_adoption_yields_a_path_per_vector() {
    let tree = solved(&two_by_two(3), &root_with([[3, 1], [0, 1]], [[2, 2], [1, 0]]));
    let paths = tree.paths();
    assert_eq!(paths.len(), 2);
    assert_eq!((paths[0].gain.clone(), paths[0].nodes.clone()), (vec![3, 1], vec![1, 2]));
    assert_eq!((paths[1].gain.clone(), paths[1].nodes.clone()), (vec![0, 1], vec![1, 3]));
}

#[test]
fn tied_siblings_join_the_same_path() {
    // One player, two strategies. Both of A's leaves carry [1, 0], so each
    // path through A absorbs both leaves rather than forking.
    let config = TreeConfig::new(vec![2], 0, 1, 3, 3).unwrap();
    let shape = Shape::decision(vec![
        Shape::decision(vec![Shape::leaf(vec![1, 0]), Shape::leaf(vec![1, 0])]),
        Shape::decision(vec![Shape::leaf(vec![0, 0]), Shape::leaf(vec![0, 1])]),
    ]);
    let tree = solved(&config, &shape);

    assert_eq!(tree.root_node().payoffs, vec![vec![1, 0], vec![1, 0]]);
    let paths = tree.paths();
    assert_eq!(paths.len(), 2);
    for path in paths {
        assert_eq!(path.gain, vec![1, 0]);
        assert_eq!(path.nodes, vec![1, 2, 3]);
    }
}

#[test]
fn path_stops_at_shallow_leaf() {
    let config = TreeConfig::new(vec![2, 2], 0, 9, 3, 2).unwrap();
    let shape = Shape::decision(vec![
        Shape::leaf(vec![4, 4]),
        Shape::decision(vec![Shape::leaf(vec![7, 1]), Shape::leaf(vec![2, 3])]),
    ]);
    let tree = solved(&config, &shape);
    assert_eq!(tree.paths().len(), 1);
    assert_eq!(tree.paths()[0].nodes, vec![1]);
    assert_eq!(tree.paths()[0].tail(), 1);
}

#[test]
fn lone_leaf_root_has_no_paths() {
    let config = TreeConfig::new(vec![2], 0, 3, 1, 1).unwrap();
    let tree = solved(&config, &Shape::leaf(vec![1, 2]));
    assert!(tree.paths().is_empty());
    assert!(tree.is_solved());
}

#[test]
fn extraction_requires_propagation() {
    let tree = GameTree::from_shape(&two_by_two(1), &root_with([[0, 1], [1, 0]], [[1, 1], [0, 0]])).unwrap();
    assert!(!tree.is_solved());
    assert!(matches!(extract_paths(&tree), Err(TreeError::NotSolved)));
}

#[test]
fn solving_twice_gives_same_paths() {
    let mut tree = GameTree::from_shape(&two_by_two(2), &root_with([[1, 2], [2, 0]], [[1, 1], [0, 0]])).unwrap();
    let first = tree.solve().unwrap().to_vec();
    let second = tree.solve().unwrap().to_vec();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Random trees
// ---------------------------------------------------------------------------

#[test]
fn paths_end_on_their_gain_and_root_holds_it() {
    let configs = [
        TreeConfig::default(),
        TreeConfig::new(vec![2, 2], 0, 1, 5, 2).unwrap(),
        TreeConfig::new(vec![4, 3], -5, 5, 4, 1).unwrap(),
    ];
    for config in &configs {
        for seed in 0..40 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut tree = GameTree::generate(config, &mut rng).unwrap();
            tree.solve().unwrap();
            let root = tree.root_node();

            if !root.is_terminal() {
                assert!(!tree.paths().is_empty(), "solved tree without paths (seed {})", seed);
            }

            for path in tree.paths() {
                assert!(root.payoffs.contains(&path.gain));

                let first = tree.node(path.nodes[0]);
                assert_eq!(first.parent, Some(tree.root()));

                let tail = tree.node(path.tail());
                assert!(tail.is_terminal(), "path ends at decision node {} (seed {})", tail.number(), seed);
                assert_eq!(tail.payoffs, vec![path.gain.clone()]);

                for &id in &path.nodes {
                    assert!(tree.node(id).payoffs.contains(&path.gain));
                }
            }
        }
    }
}

#[test]
fn colors_follow_palette_order() {
    let mut rng = StdRng::seed_from_u64(9);
    let config = TreeConfig::new(vec![3, 3], 0, 1, 4, 4).unwrap();
    let mut tree = GameTree::generate(&config, &mut rng).unwrap();
    tree.solve().unwrap();
    for (i, path) in tree.paths().iter().enumerate() {
        assert_eq!(path.color, PathColor::PALETTE[i % PathColor::PALETTE.len()]);
    }
}
