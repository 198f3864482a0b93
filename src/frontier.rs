//! Frontier Primitives: explicit queue, stack, distance table and
//! union-find, so every state change a graph algorithm makes is
//! observable and snapshot-able.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::Serialize;

/// FIFO frontier over node values (BFS).
#[derive(Debug, Default)]
pub struct Queue {
    items: VecDeque<String>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, value: impl Into<String>) {
        self.items.push_back(value.into());
    }

    pub fn dequeue(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Contents front-to-back.
    pub fn snapshot(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }
}

/// LIFO frontier over node values (DFS).
#[derive(Debug, Default)]
pub struct Stack {
    items: Vec<String>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: impl Into<String>) {
        self.items.push(value.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.items.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Contents bottom-to-top.
    pub fn snapshot(&self) -> Vec<String> {
        self.items.clone()
    }
}

/// Known shortest distances for Dijkstra. `None` means unreachable so
/// far (the textbook infinity).
///
/// Min-selection is a linear scan over all nodes in insertion order,
/// first minimum wins ties; deliberately not heap-based so every
/// selection round is a plain, observable pass.
#[derive(Debug)]
pub struct DistanceTable {
    order: Vec<String>,
    dist: HashMap<String, Option<u64>>,
}

impl DistanceTable {
    /// Distance 0 for `source`, infinity for every other node.
    pub fn new(nodes: &[String], source: &str) -> Self {
        let dist = nodes
            .iter()
            .map(|n| {
                let d = if n == source { Some(0) } else { None };
                (n.clone(), d)
            })
            .collect();
        Self {
            order: nodes.to_vec(),
            dist,
        }
    }

    pub fn get(&self, node: &str) -> Option<u64> {
        self.dist.get(node).copied().flatten()
    }

    pub fn set(&mut self, node: &str, distance: u64) {
        if let Some(entry) = self.dist.get_mut(node) {
            *entry = Some(distance);
        }
    }

    /// Unvisited node of minimum known distance, by linear scan in
    /// node-insertion order. `None` when no reachable unvisited node
    /// remains.
    pub fn min_unvisited(&self, visited: &[String]) -> Option<(String, u64)> {
        let mut best: Option<(String, u64)> = None;
        for node in &self.order {
            if visited.contains(node) {
                continue;
            }
            if let Some(d) = self.get(node) {
                if best.as_ref().is_none_or(|(_, bd)| d < *bd) {
                    best = Some((node.clone(), d));
                }
            }
        }
        best
    }

    /// Full table, sorted by node value for stable serialization.
    pub fn snapshot(&self) -> BTreeMap<String, Option<u64>> {
        self.dist
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

/// Edge accepted into a spanning structure by Prim or Kruskal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningEdge {
    pub from: String,
    pub to: String,
    pub weight: u64,
}

/// Union-find over node values: path-compressing find, union attaches
/// x's root under y's root.
#[derive(Debug)]
pub struct UnionFind {
    parent: HashMap<String, String>,
}

impl UnionFind {
    /// Every node starts as its own root.
    pub fn new(nodes: &[String]) -> Self {
        Self {
            parent: nodes.iter().map(|n| (n.clone(), n.clone())).collect(),
        }
    }

    /// Root of `node`'s set, compressing the walked path.
    pub fn find(&mut self, node: &str) -> String {
        let mut root = node.to_string();
        while let Some(parent) = self.parent.get(&root) {
            if *parent == root {
                break;
            }
            root = parent.clone();
        }
        // Path compression: point every node on the walk at the root.
        let mut cur = node.to_string();
        while let Some(parent) = self.parent.get(&cur).cloned() {
            if parent == cur {
                break;
            }
            self.parent.insert(cur, root.clone());
            cur = parent;
        }
        root
    }

    pub fn union(&mut self, x: &str, y: &str) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x != root_y {
            self.parent.insert(root_x, root_y);
        }
    }

    pub fn connected(&mut self, x: &str, y: &str) -> bool {
        self.find(x) == self.find(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_queue_when_draining_then_fifo_order_holds() {
        let mut q = Queue::new();
        q.enqueue("A");
        q.enqueue("B");
        assert_eq!(q.snapshot(), names(&["A", "B"]));
        assert_eq!(q.dequeue().as_deref(), Some("A"));
        assert_eq!(q.dequeue().as_deref(), Some("B"));
        assert!(q.is_empty());
    }

    #[test]
    fn given_stack_when_draining_then_lifo_order_holds() {
        let mut s = Stack::new();
        s.push("A");
        s.push("B");
        assert_eq!(s.pop().as_deref(), Some("B"));
        assert_eq!(s.pop().as_deref(), Some("A"));
    }

    #[test]
    fn given_distance_table_when_scanning_then_first_minimum_wins_ties() {
        let nodes = names(&["A", "B", "C"]);
        let mut table = DistanceTable::new(&nodes, "A");
        table.set("B", 5);
        table.set("C", 5);
        // A is visited; B and C tie at 5, B was inserted first.
        let (node, dist) = table.min_unvisited(&names(&["A"])).unwrap();
        assert_eq!(node, "B");
        assert_eq!(dist, 5);
    }

    #[test]
    fn given_unreachable_nodes_when_scanning_then_none_is_returned() {
        let nodes = names(&["A", "B"]);
        let table = DistanceTable::new(&nodes, "A");
        assert!(table.min_unvisited(&names(&["A"])).is_none());
    }

    #[test]
    fn given_unions_when_finding_then_components_merge_with_compression() {
        let nodes = names(&["A", "B", "C", "D"]);
        let mut uf = UnionFind::new(&nodes);
        assert!(!uf.connected("A", "B"));
        uf.union("A", "B");
        uf.union("C", "D");
        assert!(uf.connected("A", "B"));
        assert!(!uf.connected("B", "C"));
        uf.union("B", "C");
        assert!(uf.connected("A", "D"));
    }
}
