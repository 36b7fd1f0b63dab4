use colored::{Color, ColoredString, Colorize};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::batch::BatchSummary;
use crate::game_tree::Solution;
use crate::paths::PathColor;
use crate::view::{format_payoff, format_payoffs, TreeView, ViewEdge};

fn terminal_color(color: PathColor) -> Color {
    match color {
        PathColor::Green => Color::Green,
        PathColor::Yellow => Color::Yellow,
        PathColor::Red => Color::Red,
        PathColor::Blue => Color::Blue,
        PathColor::Pink => Color::TrueColor {
            r: 255,
            g: 105,
            b: 180,
        },
        PathColor::Orange => Color::TrueColor {
            r: 255,
            g: 165,
            b: 0,
        },
        PathColor::Magenta => Color::Magenta,
        PathColor::Cyan => Color::Cyan,
    }
}

pub fn paint(text: &str, color: PathColor) -> ColoredString {
    text.color(terminal_color(color))
}

// ---------------------------------------------------------------------------
// Outline
// ---------------------------------------------------------------------------

/// Indented text rendering of the tree. Edges on a path are drawn in the
/// path's color, once per path through them.
pub fn tree_outline(view: &TreeView) -> String {
    let mut out = String::new();
    if let Some(root) = view.nodes.first() {
        out.push_str(&node_line(view, root.id));
        out.push('\n');
        outline_children(view, root.id, "", &mut out);
    }
    out
}

fn node_line(view: &TreeView, id: usize) -> String {
    let Some(node) = view.node(id) else {
        return String::new();
    };
    let head = match &node.player {
        Some(name) => format!("{}: {}", name.bold(), node.id),
        None => format!("{}", node.id),
    };
    if node.payoffs.is_empty() {
        head
    } else {
        format!("{}  {}", head, format_payoffs(&node.payoffs).dimmed())
    }
}

fn outline_children(view: &TreeView, id: usize, indent: &str, out: &mut String) {
    let edges: Vec<&ViewEdge> = view.children_of(id).collect();
    for (i, edge) in edges.iter().enumerate() {
        let last = i + 1 == edges.len();
        let branch = if last { "└─" } else { "├─" };
        out.push_str(indent);
        out.push_str(&edge_marker(branch, edge));
        out.push(' ');
        out.push_str(&node_line(view, edge.to));
        out.push('\n');

        let deeper = format!("{}{}", indent, if last { "   " } else { "│  " });
        outline_children(view, edge.to, &deeper, out);
    }
}

fn edge_marker(branch: &str, edge: &ViewEdge) -> String {
    let label = format!("{}{}", branch, edge.alternative);
    if edge.colors.is_empty() {
        return label;
    }
    let painted: Vec<String> = edge
        .colors
        .iter()
        .map(|&c| paint(&label, c).bold().to_string())
        .collect();
    painted.join("")
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

pub fn path_table(view: &TreeView) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Path"),
        Cell::new("Color"),
        Cell::new("Gain").set_alignment(CellAlignment::Right),
        Cell::new("Nodes"),
    ]);

    for (i, path) in view.paths.iter().enumerate() {
        let nodes: Vec<String> = path.nodes.iter().map(|n| n.to_string()).collect();
        table.add_row(vec![
            Cell::new(format!("{}", i + 1)),
            Cell::new(paint(path.color.as_str(), path.color).bold().to_string()),
            Cell::new(format_payoff(&path.gain)).set_alignment(CellAlignment::Right),
            Cell::new(format!("1 → {}", nodes.join(" → "))),
        ]);
    }

    table.to_string()
}

pub fn solution_table(solution: &Solution) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);

    let rows = [
        ("Nodes", solution.nodes.to_string()),
        ("Leaves", solution.leaves.to_string()),
        ("Depth reached", solution.depth.to_string()),
        ("Root payoffs", format_payoffs(&solution.root_payoffs)),
        ("Paths", solution.paths.to_string()),
    ];
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric.bold().to_string()),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

pub fn batch_table(summary: &BatchSummary) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Right),
    ]);

    let rows = [
        ("Trees", summary.trees.to_string()),
        ("Mean nodes", format!("{:.2}", summary.mean_nodes)),
        ("Mean leaves", format!("{:.2}", summary.mean_leaves)),
        ("Mean root payoffs", format!("{:.2}", summary.mean_root_payoffs)),
        ("Mean paths", format!("{:.2}", summary.mean_paths)),
        ("Tied roots", format!("{:.1}%", summary.tied_fraction * 100.0)),
        ("Max paths", summary.max_paths.to_string()),
    ];
    for (metric, value) in rows {
        table.add_row(vec![
            Cell::new(metric.bold().to_string()),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

// ---------------------------------------------------------------------------
// Graphviz
// ---------------------------------------------------------------------------

fn dot_escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Graphviz `digraph` source. Plain edges carry only the strategy index;
/// path edges are emitted once per path, colored.
pub fn to_dot(view: &TreeView) -> String {
    let mut out = String::from("digraph Tree {\n");
    for node in &view.nodes {
        out.push_str(&format!(
            "    {} [label=\"{}\" color=black]\n",
            node.id,
            dot_escape(&node.label)
        ));
    }
    for edge in &view.edges {
        if edge.colors.is_empty() {
            out.push_str(&format!(
                "    {} -> {} [label={}]\n",
                edge.from, edge.to, edge.alternative
            ));
        }
        for color in &edge.colors {
            out.push_str(&format!(
                "    {} -> {} [label={} color={}]\n",
                edge.from,
                edge.to,
                edge.alternative,
                color.as_str()
            ));
        }
    }
    out.push_str("}\n");
    out
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("{}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
