//! Graph Model: nodes, edges, adjacency and edge-list views.

use std::collections::HashMap;

use serde::Serialize;
use tracing::instrument;

use crate::errors::{GraphError, GraphResult};

/// Graph node: stable synthetic id assigned at creation, with the
/// display value stored as an attribute. The display value is the
/// unique key for edges and algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub value: String,
}

/// Directed edge between two node values. Undirected graphs
/// materialize two of these per logical edge, each with its own id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub weight: u64,
}

/// Adjacency view: node value to `(neighbor, weight)` pairs in
/// edge-insertion order.
pub type Adjacency = HashMap<String, Vec<(String, u64)>>;

/// In-memory graph, mutated only through validated operations.
///
/// Failed validation rejects the call before any mutation: the graph is
/// never partially updated.
#[derive(Debug)]
pub struct Graph {
    directed: bool,
    nodes: Vec<GraphNode>,
    edges: Vec<Edge>,
    next_node_id: u64,
    next_edge_id: u64,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            edges: Vec::new(),
            next_node_id: 0,
            next_edge_id: 0,
        }
    }

    pub fn directed(&self) -> bool {
        self.directed
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Node display values in insertion order.
    pub fn node_values(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.value.clone()).collect()
    }

    /// The first-added node, which algorithms use as root/source.
    pub fn first_node(&self) -> Option<&GraphNode> {
        self.nodes.first()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn has_node(&self, value: &str) -> bool {
        self.nodes.iter().any(|n| n.value == value)
    }

    fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Register a node. Rejects duplicate display values.
    #[instrument(level = "debug", skip(self))]
    pub fn add_node(&mut self, value: &str) -> GraphResult<String> {
        if self.has_node(value) {
            return Err(GraphError::DuplicateNode(value.to_string()));
        }
        self.next_node_id += 1;
        let id = format!("node_{}", self.next_node_id);
        self.nodes.push(GraphNode {
            id: id.clone(),
            value: value.to_string(),
        });
        Ok(id)
    }

    /// Register an edge. Rejects self-loops, missing endpoints, zero
    /// weights and exact duplicate (source, target) pairs. In
    /// undirected mode the mirrored edge is inserted automatically
    /// with its own identity.
    #[instrument(level = "debug", skip(self))]
    pub fn add_edge(&mut self, source: &str, target: &str, weight: u64) -> GraphResult<()> {
        if source == target {
            return Err(GraphError::SelfLoop(source.to_string()));
        }
        if !self.has_node(source) {
            return Err(GraphError::MissingEndpoint(source.to_string()));
        }
        if !self.has_node(target) {
            return Err(GraphError::MissingEndpoint(target.to_string()));
        }
        if weight == 0 {
            return Err(GraphError::ZeroWeight {
                src: source.to_string(),
                target: target.to_string(),
            });
        }
        if self.has_edge(source, target) {
            return Err(GraphError::DuplicateEdge {
                src: source.to_string(),
                target: target.to_string(),
            });
        }

        self.push_edge(source, target, weight);
        if !self.directed {
            self.push_edge(target, source, weight);
        }
        Ok(())
    }

    fn push_edge(&mut self, source: &str, target: &str, weight: u64) {
        self.next_edge_id += 1;
        self.edges.push(Edge {
            id: format!("edge_{}", self.next_edge_id),
            source: source.to_string(),
            target: target.to_string(),
            weight,
        });
    }

    /// Build the adjacency mapping: every node gets an entry, neighbor
    /// lists follow edge-insertion order.
    pub fn adjacency(&self) -> Adjacency {
        let mut adj: Adjacency = self
            .nodes
            .iter()
            .map(|n| (n.value.clone(), Vec::new()))
            .collect();
        for edge in &self.edges {
            if let Some(neighbors) = adj.get_mut(&edge.source) {
                neighbors.push((edge.target.clone(), edge.weight));
            }
        }
        adj
    }

    /// Edges unchanged, in insertion order (global edge order for
    /// Kruskal).
    pub fn edge_list(&self) -> &[Edge] {
        &self.edges
    }
}
