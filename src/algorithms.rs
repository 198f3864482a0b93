//! Graph Algorithms: BFS, DFS, Dijkstra, Prim, Kruskal.
//!
//! Each algorithm consumes the graph model plus the explicit frontier
//! primitives and writes one ledger; every step carries a snapshot of
//! the then-current frontier so a player can show its evolution
//! without re-deriving it. The first-added node is always the
//! root/source.

use std::collections::BTreeMap;

use itertools::Itertools;
use tracing::instrument;

use crate::errors::{GraphError, GraphResult};
use crate::frontier::{DistanceTable, Queue, SpanningEdge, Stack, UnionFind};
use crate::graph::Graph;
use crate::ledger::{Ledger, Snapshot};

fn source_node(graph: &Graph) -> GraphResult<String> {
    graph
        .first_node()
        .map(|n| n.value.clone())
        .ok_or(GraphError::EmptyGraph)
}

/// Breadth-first traversal. Nodes are marked visited at enqueue time,
/// which prevents duplicate enqueues; neighbors are scanned in
/// adjacency order. Returns the visit order.
#[instrument(level = "debug", skip(graph))]
pub fn bfs(graph: &Graph) -> GraphResult<(Ledger, Vec<String>)> {
    let start = source_node(graph)?;
    let adj = graph.adjacency();

    let mut ledger = Ledger::new();
    let mut queue = Queue::new();
    let mut visited: Vec<String> = vec![start.clone()];
    let mut order: Vec<String> = Vec::new();
    queue.enqueue(&start);

    let snapshot = |queue: &Queue, visited: &[String], order: &[String]| Snapshot::Queue {
        queue: queue.snapshot(),
        visited: visited.to_vec(),
        order: order.to_vec(),
    };

    ledger.record(
        format!("Starting BFS from node {start}"),
        Some(start.clone()),
        snapshot(&queue, &visited, &order),
    );

    while let Some(current) = queue.dequeue() {
        order.push(current.clone());
        ledger.count_op();
        ledger.record(
            format!("Processing node {current}"),
            Some(current.clone()),
            snapshot(&queue, &visited, &order),
        );

        for (neighbor, _) in adj.get(&current).map(Vec::as_slice).unwrap_or(&[]) {
            if !visited.contains(neighbor) {
                visited.push(neighbor.clone());
                queue.enqueue(neighbor);
                ledger.record(
                    format!("Found neighbor {neighbor} - added to queue"),
                    Some(neighbor.clone()),
                    snapshot(&queue, &visited, &order),
                );
            }
        }
    }

    ledger.record(
        format!(
            "BFS complete: visited {} nodes: {}",
            order.len(),
            order.iter().join(" -> ")
        ),
        None,
        snapshot(&queue, &visited, &order),
    );
    Ok((ledger, order))
}

/// Depth-first traversal with an explicit stack. Nodes are marked
/// visited at pop time; unvisited neighbors are pushed in reverse
/// adjacency order so visitation matches recursive left-to-right DFS.
/// Returns the visit order.
#[instrument(level = "debug", skip(graph))]
pub fn dfs(graph: &Graph) -> GraphResult<(Ledger, Vec<String>)> {
    let start = source_node(graph)?;
    let adj = graph.adjacency();

    let mut ledger = Ledger::new();
    let mut stack = Stack::new();
    let mut visited: Vec<String> = Vec::new();
    let mut order: Vec<String> = Vec::new();
    stack.push(&start);

    let snapshot = |stack: &Stack, visited: &[String], order: &[String]| Snapshot::Stack {
        stack: stack.snapshot(),
        visited: visited.to_vec(),
        order: order.to_vec(),
    };

    ledger.record(
        format!("Starting DFS from node {start}"),
        Some(start.clone()),
        snapshot(&stack, &visited, &order),
    );

    while let Some(current) = stack.pop() {
        if visited.contains(&current) {
            continue;
        }
        visited.push(current.clone());
        order.push(current.clone());
        ledger.count_op();
        ledger.record(
            format!("Processing node {current}"),
            Some(current.clone()),
            snapshot(&stack, &visited, &order),
        );

        let unvisited: Vec<&String> = adj
            .get(&current)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|(neighbor, _)| neighbor)
            .filter(|neighbor| !visited.contains(neighbor))
            .collect();
        for neighbor in unvisited.into_iter().rev() {
            stack.push(neighbor);
            ledger.record(
                format!("Pushed neighbor {neighbor} to stack"),
                Some(neighbor.clone()),
                snapshot(&stack, &visited, &order),
            );
        }
    }

    ledger.record(
        format!(
            "DFS complete: visited {} nodes: {}",
            order.len(),
            order.iter().join(" -> ")
        ),
        None,
        snapshot(&stack, &visited, &order),
    );
    Ok((ledger, order))
}

/// Classic non-heap Dijkstra: linear-scan minimum selection, strict
/// relaxation. Unreachable nodes stay at infinity and are reported,
/// not raised. Returns the final distance table.
#[instrument(level = "debug", skip(graph))]
pub fn dijkstra(graph: &Graph) -> GraphResult<(Ledger, BTreeMap<String, Option<u64>>)> {
    let start = source_node(graph)?;
    let adj = graph.adjacency();
    let nodes = graph.node_values();

    let mut ledger = Ledger::new();
    let mut table = DistanceTable::new(&nodes, &start);
    let mut visited: Vec<String> = Vec::new();

    let snapshot = |table: &DistanceTable, visited: &[String]| Snapshot::Distances {
        distances: table.snapshot(),
        visited: visited.to_vec(),
    };

    ledger.record(
        format!("Starting Dijkstra from node {start}"),
        Some(start.clone()),
        snapshot(&table, &visited),
    );

    while visited.len() < nodes.len() {
        let Some((current, dist)) = table.min_unvisited(&visited) else {
            // Disconnected remainder: permanently infinite, reported.
            break;
        };
        visited.push(current.clone());
        ledger.count_op();
        ledger.record(
            format!("Visiting node {current} (distance: {dist})"),
            Some(current.clone()),
            snapshot(&table, &visited),
        );

        for (neighbor, weight) in adj.get(&current).map(Vec::as_slice).unwrap_or(&[]) {
            if visited.contains(neighbor) {
                continue;
            }
            let candidate = dist + weight;
            let improves = table.get(neighbor).is_none_or(|known| candidate < known);
            if improves {
                table.set(neighbor, candidate);
                ledger.count_op();
                ledger.record(
                    format!("Updated {neighbor} distance to {candidate}"),
                    Some(neighbor.clone()),
                    snapshot(&table, &visited),
                );
            }
        }
    }

    let unreachable: Vec<String> = nodes
        .iter()
        .filter(|n| table.get(n).is_none())
        .cloned()
        .collect();
    if unreachable.is_empty() {
        ledger.record(
            format!("Dijkstra complete: all shortest paths calculated from {start}"),
            None,
            snapshot(&table, &visited),
        );
    } else {
        ledger.record(
            format!(
                "Dijkstra complete: {} unreachable from {start}: {}",
                if unreachable.len() == 1 { "node remains" } else { "nodes remain" },
                unreachable.iter().join(", ")
            ),
            None,
            snapshot(&table, &visited),
        );
    }
    Ok((ledger, table.snapshot()))
}

/// Prim's algorithm: grow the visited set one minimum-weight crossing
/// edge at a time (first encountered wins ties). A disconnected graph
/// yields a partial forest, reported as the final result. Returns the
/// accepted spanning edges.
#[instrument(level = "debug", skip(graph))]
pub fn prim(graph: &Graph) -> GraphResult<(Ledger, Vec<SpanningEdge>)> {
    let start = source_node(graph)?;
    let adj = graph.adjacency();

    let mut ledger = Ledger::new();
    let mut visited: Vec<String> = vec![start.clone()];
    let mut spanning: Vec<SpanningEdge> = Vec::new();

    let snapshot = |spanning: &[SpanningEdge], visited: &[String]| Snapshot::SpanningTree {
        edges: spanning.to_vec(),
        visited: visited.to_vec(),
    };

    ledger.record(
        format!("Starting Prim's algorithm from node {start}"),
        Some(start.clone()),
        snapshot(&spanning, &visited),
    );

    while visited.len() < graph.node_count() {
        // Scan every edge leaving the visited set; strict comparison
        // keeps the first minimum encountered.
        let mut best: Option<SpanningEdge> = None;
        for node in &visited {
            for (neighbor, weight) in adj.get(node).map(Vec::as_slice).unwrap_or(&[]) {
                if visited.contains(neighbor) {
                    continue;
                }
                if best.as_ref().is_none_or(|b| *weight < b.weight) {
                    best = Some(SpanningEdge {
                        from: node.clone(),
                        to: neighbor.clone(),
                        weight: *weight,
                    });
                }
            }
        }
        let Some(edge) = best else {
            ledger.record(
                "No crossing edge found - remaining nodes are unreachable, result is a partial forest",
                None,
                snapshot(&spanning, &visited),
            );
            break;
        };

        visited.push(edge.to.clone());
        spanning.push(edge.clone());
        ledger.count_op();
        ledger.record(
            format!(
                "Added edge {}-{} (weight: {}) to spanning tree",
                edge.from, edge.to, edge.weight
            ),
            Some(edge.to.clone()),
            snapshot(&spanning, &visited),
        );
    }

    let total: u64 = spanning.iter().map(|e| e.weight).sum();
    ledger.record(
        format!(
            "Prim's complete: {} edges, total weight {total}",
            spanning.len()
        ),
        None,
        snapshot(&spanning, &visited),
    );
    Ok((ledger, spanning))
}

/// Kruskal's algorithm: stable-sort all edges ascending by weight
/// (ties keep edge-list order), accept edges that join two components,
/// reject cycle-closing ones, stop early at node_count - 1 accepted
/// edges. Returns the accepted spanning edges.
#[instrument(level = "debug", skip(graph))]
pub fn kruskal(graph: &Graph) -> GraphResult<(Ledger, Vec<SpanningEdge>)> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph);
    }
    let nodes = graph.node_values();
    let mut sorted = graph.edge_list().to_vec();
    sorted.sort_by_key(|e| e.weight);

    let mut ledger = Ledger::new();
    let mut uf = UnionFind::new(&nodes);
    let mut spanning: Vec<SpanningEdge> = Vec::new();

    let snapshot = |spanning: &[SpanningEdge]| Snapshot::SpanningTree {
        edges: spanning.to_vec(),
        visited: Vec::new(),
    };

    ledger.record(
        format!(
            "Starting Kruskal's algorithm: {} edges sorted by weight",
            sorted.len()
        ),
        None,
        snapshot(&spanning),
    );

    for edge in &sorted {
        if !uf.connected(&edge.source, &edge.target) {
            uf.union(&edge.source, &edge.target);
            spanning.push(SpanningEdge {
                from: edge.source.clone(),
                to: edge.target.clone(),
                weight: edge.weight,
            });
            ledger.count_op();
            ledger.record(
                format!(
                    "Added {}-{} (weight: {}) - no cycle",
                    edge.source, edge.target, edge.weight
                ),
                Some(edge.id.clone()),
                snapshot(&spanning),
            );
            if spanning.len() == nodes.len().saturating_sub(1) {
                break;
            }
        } else {
            ledger.count_op();
            ledger.record(
                format!(
                    "Skipped {}-{} (weight: {}) - would create a cycle",
                    edge.source, edge.target, edge.weight
                ),
                Some(edge.id.clone()),
                snapshot(&spanning),
            );
        }
    }

    let total: u64 = spanning.iter().map(|e| e.weight).sum();
    ledger.record(
        format!(
            "Kruskal's complete: {} edges, total weight {total}",
            spanning.len()
        ),
        None,
        snapshot(&spanning),
    );
    Ok((ledger, spanning))
}
