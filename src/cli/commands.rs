use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::algorithms;
use crate::cli::args::{Cli, Commands, GraphCommands, TreeCommands};
use crate::cli::output;
use crate::graph::Graph;
use crate::ledger::Ledger;
use crate::tree::BinarySearchTree;

pub fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Tree { values, command } => execute_tree(values, command, cli.json),
        Commands::Graph {
            nodes,
            edges,
            undirected,
            command,
        } => execute_graph(nodes, edges, *undirected, command, cli.json),
    }
}

#[instrument(skip(command))]
fn execute_tree(values: &[i64], command: &TreeCommands, json: bool) -> Result<()> {
    debug!("building tree from {} values", values.len());
    let mut tree = BinarySearchTree::new();
    for &value in values {
        // Setup inserts; their ledgers are not part of the requested trace.
        tree.insert(value);
    }

    match command {
        TreeCommands::Insert { value } => {
            let ledger = tree.insert(*value);
            print_ledger(&format!("insert({value})"), &ledger, json)?;
        }
        TreeCommands::Search { value } => {
            let (ledger, found) = tree.search(*value);
            print_ledger(&format!("search({value})"), &ledger, json)?;
            match found {
                Some(id) => output::action("found", &id),
                None => output::action("result", &"not found"),
            }
        }
        TreeCommands::Delete { value } => {
            let (ledger, removed) = tree.delete(*value);
            print_ledger(&format!("delete({value})"), &ledger, json)?;
            output::action("removed", &removed);
        }
        TreeCommands::Traverse { order } => {
            let (ledger, visited) = tree.traverse((*order).into());
            print_ledger("traverse", &ledger, json)?;
            output::action("order", &visited.iter().join(", "));
        }
        TreeCommands::Info => {
            let info = tree.info();
            if json {
                output::info(&serde_json::to_string_pretty(&info)?);
            } else {
                output::header("Tree info");
                output::detail(&format!("height: {}", info.height));
                output::detail(&format!("nodes: {}", info.node_count));
                output::detail(&format!("valid BST: {}", info.is_valid_bst));
                if let Some(root) = &info.tree {
                    println!("{}", output::render_tree(root));
                }
            }
        }
    }
    Ok(())
}

#[instrument(skip(command))]
fn execute_graph(
    nodes: &[String],
    edges: &[String],
    undirected: bool,
    command: &GraphCommands,
    json: bool,
) -> Result<()> {
    let mut graph = Graph::new(!undirected);
    for node in nodes {
        graph
            .add_node(node)
            .with_context(|| format!("cannot add node {node}"))?;
    }
    for spec in edges {
        let (source, target, weight) = parse_edge_spec(spec)?;
        graph
            .add_edge(&source, &target, weight)
            .with_context(|| format!("cannot add edge {spec}"))?;
    }
    debug!(
        "graph built: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_list().len()
    );

    match command {
        GraphCommands::Bfs => {
            let (ledger, order) = algorithms::bfs(&graph)?;
            print_ledger("bfs", &ledger, json)?;
            output::action("order", &order.iter().join(" -> "));
        }
        GraphCommands::Dfs => {
            let (ledger, order) = algorithms::dfs(&graph)?;
            print_ledger("dfs", &ledger, json)?;
            output::action("order", &order.iter().join(" -> "));
        }
        GraphCommands::Dijkstra => {
            let (ledger, distances) = algorithms::dijkstra(&graph)?;
            print_ledger("dijkstra", &ledger, json)?;
            for (node, dist) in &distances {
                match dist {
                    Some(d) => output::detail(&format!("{node}: {d}")),
                    None => output::detail(&format!("{node}: unreachable")),
                }
            }
        }
        GraphCommands::Prim => {
            let (ledger, spanning) = algorithms::prim(&graph)?;
            print_ledger("prim", &ledger, json)?;
            print_spanning(&spanning);
        }
        GraphCommands::Kruskal => {
            let (ledger, spanning) = algorithms::kruskal(&graph)?;
            print_ledger("kruskal", &ledger, json)?;
            print_spanning(&spanning);
        }
    }
    Ok(())
}

/// Parse `SOURCE:TARGET[:WEIGHT]`; the weight defaults to 1.
fn parse_edge_spec(spec: &str) -> Result<(String, String, u64)> {
    let parts: Vec<&str> = spec.split(':').collect();
    match parts.as_slice() {
        [source, target] => Ok((source.to_string(), target.to_string(), 1)),
        [source, target, weight] => {
            let weight: u64 = weight
                .parse()
                .with_context(|| format!("invalid edge weight in {spec}"))?;
            Ok((source.to_string(), target.to_string(), weight))
        }
        _ => Err(anyhow!(
            "invalid edge spec (expected SOURCE:TARGET[:WEIGHT]): {spec}"
        )),
    }
}

fn print_ledger(title: &str, ledger: &Ledger, json: bool) -> Result<()> {
    if json {
        output::info(&serde_json::to_string_pretty(ledger)?);
    } else {
        output::header(title);
        output::ledger(ledger);
    }
    Ok(())
}

fn print_spanning(spanning: &[crate::frontier::SpanningEdge]) {
    let total: u64 = spanning.iter().map(|e| e.weight).sum();
    for edge in spanning {
        output::detail(&format!("{} - {} ({})", edge.from, edge.to, edge.weight));
    }
    output::action("total weight", &total);
}
