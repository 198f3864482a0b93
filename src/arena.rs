use std::fmt;

use generational_arena::{Arena, Index};
use serde::Serialize;

/// Deterministic node identifier: a per-tree monotonic counter, so
/// traces are reproducible byte-for-byte across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node_{}", self.0)
    }
}

/// BST node: exclusive ownership of at most one left and one right
/// child, no parent back-pointers.
#[derive(Debug)]
pub struct BstNode {
    pub id: NodeId,
    pub value: i64,
    pub left: Option<Index>,
    pub right: Option<Index>,
}

/// Serialized tree shape: id/value/left/right recursively, `None` at
/// absence. This is the value snapshot carried by tree steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeSnapshot {
    pub id: NodeId,
    pub value: i64,
    pub left: Option<Box<TreeSnapshot>>,
    pub right: Option<Box<TreeSnapshot>>,
}

/// Arena-backed storage for one binary search tree.
///
/// Uses a generational arena for memory-safe node references; child
/// links are arena indices rather than owned boxes so delete can splice
/// subtrees without recursion.
#[derive(Debug, Default)]
pub struct BstArena {
    arena: Arena<BstNode>,
    root: Option<Index>,
    next_id: u64,
}

impl BstArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an unlinked node with the next deterministic id.
    pub fn alloc(&mut self, value: i64) -> Index {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.arena.insert(BstNode {
            id,
            value,
            left: None,
            right: None,
        })
    }

    pub fn get(&self, idx: Index) -> Option<&BstNode> {
        self.arena.get(idx)
    }

    pub fn get_mut(&mut self, idx: Index) -> Option<&mut BstNode> {
        self.arena.get_mut(idx)
    }

    pub fn remove(&mut self, idx: Index) -> Option<BstNode> {
        self.arena.remove(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn set_root(&mut self, root: Option<Index>) {
        self.root = root;
    }

    /// Number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.get(idx) {
                count += 1;
                if let Some(l) = node.left {
                    stack.push(l);
                }
                if let Some(r) = node.right {
                    stack.push(r);
                }
            }
        }
        count
    }

    /// Height of the tree, 0 for empty.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }
        while let Some((idx, depth)) = stack.pop() {
            if let Some(node) = self.get(idx) {
                if depth > max_depth {
                    max_depth = depth;
                }
                if let Some(l) = node.left {
                    stack.push((l, depth + 1));
                }
                if let Some(r) = node.right {
                    stack.push((r, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Re-derive the BST invariant top-down with interval bounds.
    ///
    /// Ties go right on insert, so the bounds are half-open: a value is
    /// in range when `low <= v < high`. Duplicates placed in the right
    /// subtree therefore validate.
    pub fn is_valid_bst(&self) -> bool {
        let mut stack: Vec<(Index, Option<i64>, Option<i64>)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, None, None));
        }
        while let Some((idx, low, high)) = stack.pop() {
            let Some(node) = self.get(idx) else {
                return false;
            };
            if low.is_some_and(|lo| node.value < lo) {
                return false;
            }
            if high.is_some_and(|hi| node.value >= hi) {
                return false;
            }
            if let Some(l) = node.left {
                stack.push((l, low, Some(node.value)));
            }
            if let Some(r) = node.right {
                stack.push((r, Some(node.value), high));
            }
        }
        true
    }

    /// Deep-copied shape of the whole tree.
    pub fn snapshot(&self) -> Option<Box<TreeSnapshot>> {
        self.snapshot_from(self.root)
    }

    fn snapshot_from(&self, idx: Option<Index>) -> Option<Box<TreeSnapshot>> {
        let node = self.get(idx?)?;
        Some(Box::new(TreeSnapshot {
            id: node.id,
            value: node.value,
            left: self.snapshot_from(node.left),
            right: self.snapshot_from(node.right),
        }))
    }
}
