//! Tree Engine: BST operations that narrate themselves into a ledger.

use generational_arena::Index;
use serde::Serialize;
use tracing::instrument;

use crate::arena::{BstArena, NodeId, TreeSnapshot};
use crate::callstack::{CallStack, Phase};
use crate::ledger::{Ledger, Snapshot};

/// Classic traversal orders; the name gives the position of the
/// node-processing visit relative to its subtrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraverseOrder {
    In,
    Pre,
    Post,
}

impl TraverseOrder {
    fn label(self) -> &'static str {
        match self {
            TraverseOrder::In => "In-Order",
            TraverseOrder::Pre => "Pre-Order",
            TraverseOrder::Post => "Post-Order",
        }
    }

    fn legend(self) -> &'static str {
        match self {
            TraverseOrder::In => "Left, Root, Right",
            TraverseOrder::Pre => "Root, Left, Right",
            TraverseOrder::Post => "Left, Right, Root",
        }
    }

    fn actions(self) -> [Action; 3] {
        match self {
            TraverseOrder::In => [Action::Left, Action::Process, Action::Right],
            TraverseOrder::Pre => [Action::Process, Action::Left, Action::Right],
            TraverseOrder::Post => [Action::Left, Action::Right, Action::Process],
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Left,
    Process,
    Right,
}

/// Which child slot of the parent the current node hangs off.
#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Summary returned by [`BinarySearchTree::info`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeInfo {
    pub height: usize,
    pub node_count: usize,
    pub is_valid_bst: bool,
    pub tree: Option<Box<TreeSnapshot>>,
}

/// Binary search tree owning its nodes in an arena.
///
/// Every public operation produces a fresh [`Ledger`]; the tree is
/// never partially updated, and a miss (search/delete of an absent
/// value) is a normally completed ledger, not an error.
#[derive(Debug, Default)]
pub struct BinarySearchTree {
    arena: BstArena,
}

impl BinarySearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn tree_snapshot(&self) -> Snapshot {
        Snapshot::Tree {
            root: self.arena.snapshot(),
        }
    }

    /// Insert `value`. Strictly smaller values go left, equal or
    /// greater go right: duplicates are permitted and land in the
    /// right subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, value: i64) -> Ledger {
        let mut ledger = Ledger::new();
        let new_idx = self.arena.alloc(value);
        let new_id = self.arena.get(new_idx).map(|n| n.id);
        ledger.record(
            format!("Starting insertion of value: {value}"),
            new_id.map(|id| id.to_string()),
            self.tree_snapshot(),
        );

        let Some(mut cur) = self.arena.root() else {
            self.arena.set_root(Some(new_idx));
            ledger.record(
                format!("Tree was empty. Set {value} as root"),
                new_id.map(|id| id.to_string()),
                self.tree_snapshot(),
            );
            return ledger;
        };

        loop {
            let Some(node) = self.arena.get(cur) else {
                break;
            };
            let (cur_id, cur_value, left, right) = (node.id, node.value, node.left, node.right);
            ledger.count_op();
            if value < cur_value {
                ledger.record(
                    format!("Comparing {value} with {cur_value}. Going LEFT"),
                    Some(cur_id.to_string()),
                    self.tree_snapshot(),
                );
                match left {
                    Some(next) => cur = next,
                    None => {
                        if let Some(node) = self.arena.get_mut(cur) {
                            node.left = Some(new_idx);
                        }
                        ledger.record(
                            format!("Found empty left child. Inserting {value}"),
                            new_id.map(|id| id.to_string()),
                            self.tree_snapshot(),
                        );
                        break;
                    }
                }
            } else {
                ledger.record(
                    format!("Comparing {value} with {cur_value}. Going RIGHT"),
                    Some(cur_id.to_string()),
                    self.tree_snapshot(),
                );
                match right {
                    Some(next) => cur = next,
                    None => {
                        if let Some(node) = self.arena.get_mut(cur) {
                            node.right = Some(new_idx);
                        }
                        ledger.record(
                            format!("Found empty right child. Inserting {value}"),
                            new_id.map(|id| id.to_string()),
                            self.tree_snapshot(),
                        );
                        break;
                    }
                }
            }
        }
        ledger
    }

    /// Search for `value`, recording one counted step per node visited
    /// and a final found/not-found narrative step.
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, value: i64) -> (Ledger, Option<NodeId>) {
        let mut ledger = Ledger::new();
        ledger.record(
            format!("Starting search for value: {value}"),
            None,
            self.tree_snapshot(),
        );

        let mut cur = self.arena.root();
        let mut found = None;
        while let Some(idx) = cur {
            let Some(node) = self.arena.get(idx) else {
                break;
            };
            ledger.count_op();
            ledger.record(
                format!("Comparing {value} with current node value: {}", node.value),
                Some(node.id.to_string()),
                self.tree_snapshot(),
            );
            if value == node.value {
                found = Some(node.id);
                break;
            } else if value < node.value {
                ledger.record(
                    format!("{value} < {}. Searching left subtree", node.value),
                    Some(node.id.to_string()),
                    self.tree_snapshot(),
                );
                cur = node.left;
            } else {
                ledger.record(
                    format!("{value} > {}. Searching right subtree", node.value),
                    Some(node.id.to_string()),
                    self.tree_snapshot(),
                );
                cur = node.right;
            }
        }

        match found {
            Some(id) => ledger.record(
                format!("Found value {value} in the tree"),
                Some(id.to_string()),
                self.tree_snapshot(),
            ),
            None => ledger.record(
                format!("Value {value} not found in the tree"),
                None,
                self.tree_snapshot(),
            ),
        }
        (ledger, found)
    }

    /// Delete the first node holding `value`.
    ///
    /// Four cases once located, in priority order: leaf, only right
    /// child, only left child, two children (in-order successor copy,
    /// then removal of the successor's original position). Deleting an
    /// absent value returns a completed but unsuccessful ledger.
    #[instrument(level = "debug", skip(self))]
    pub fn delete(&mut self, value: i64) -> (Ledger, bool) {
        let mut ledger = Ledger::new();
        ledger.record(
            format!("Starting deletion of value: {value}"),
            None,
            self.tree_snapshot(),
        );

        // Descent is an explicit loop; the two-children case re-targets
        // the loop at the successor's position instead of recursing.
        let mut target = value;
        let mut cur = self.arena.root();
        let mut parent: Option<(Index, Side)> = None;
        let removed = loop {
            let Some(idx) = cur else {
                ledger.record(
                    format!("Reached null node - value {target} not found"),
                    None,
                    self.tree_snapshot(),
                );
                break false;
            };
            let Some(node) = self.arena.get(idx) else {
                break false;
            };
            let (node_id, node_value, left, right) = (node.id, node.value, node.left, node.right);
            ledger.count_op();
            ledger.record(
                format!("Comparing {target} with current node: {node_value}"),
                Some(node_id.to_string()),
                self.tree_snapshot(),
            );

            if target < node_value {
                ledger.record(
                    format!("{target} < {node_value} - Searching in left subtree"),
                    Some(node_id.to_string()),
                    self.tree_snapshot(),
                );
                parent = Some((idx, Side::Left));
                cur = left;
            } else if target > node_value {
                ledger.record(
                    format!("{target} > {node_value} - Searching in right subtree"),
                    Some(node_id.to_string()),
                    self.tree_snapshot(),
                );
                parent = Some((idx, Side::Right));
                cur = right;
            } else {
                ledger.record(
                    format!("Found node to delete: {target}"),
                    Some(node_id.to_string()),
                    self.tree_snapshot(),
                );
                match (left, right) {
                    (None, None) => {
                        ledger.record(
                            format!("Case 1: Node {target} is a leaf - simple deletion"),
                            Some(node_id.to_string()),
                            self.tree_snapshot(),
                        );
                        self.splice(parent, idx, None);
                        break true;
                    }
                    (None, Some(r)) => {
                        ledger.record(
                            format!("Case 2: Node {target} has only right child - replacing with right child"),
                            Some(node_id.to_string()),
                            self.tree_snapshot(),
                        );
                        self.splice(parent, idx, Some(r));
                        break true;
                    }
                    (Some(l), None) => {
                        ledger.record(
                            format!("Case 3: Node {target} has only left child - replacing with left child"),
                            Some(node_id.to_string()),
                            self.tree_snapshot(),
                        );
                        self.splice(parent, idx, Some(l));
                        break true;
                    }
                    (Some(_), Some(r)) => {
                        ledger.record(
                            format!("Case 4: Node {target} has two children - finding inorder successor"),
                            Some(node_id.to_string()),
                            self.tree_snapshot(),
                        );
                        let succ_value = self.find_min(r, &mut ledger);
                        ledger.record(
                            format!("Replacing {node_value} with successor value {succ_value}"),
                            Some(node_id.to_string()),
                            self.tree_snapshot(),
                        );
                        if let Some(node) = self.arena.get_mut(idx) {
                            node.value = succ_value;
                        }
                        ledger.record(
                            format!("Now deleting the successor node {succ_value} from right subtree"),
                            Some(node_id.to_string()),
                            self.tree_snapshot(),
                        );
                        target = succ_value;
                        parent = Some((idx, Side::Right));
                        cur = Some(r);
                    }
                }
            }
        };

        if removed {
            ledger.record(
                format!("Deletion completed: Value {value} removed from tree"),
                None,
                self.tree_snapshot(),
            );
        } else {
            ledger.record(
                format!("Deletion failed: Value {value} not found in tree"),
                None,
                self.tree_snapshot(),
            );
        }
        (ledger, removed)
    }

    /// Walk to the leftmost node of the subtree at `start`, recording
    /// each hop, and return its value.
    fn find_min(&self, start: Index, ledger: &mut Ledger) -> i64 {
        let mut idx = start;
        if let Some(node) = self.arena.get(idx) {
            ledger.record(
                format!("Finding minimum value in subtree rooted at {}", node.value),
                Some(node.id.to_string()),
                self.tree_snapshot(),
            );
        }
        while let Some(left) = self.arena.get(idx).and_then(|n| n.left) {
            idx = left;
            if let Some(node) = self.arena.get(idx) {
                ledger.record(
                    format!("Moving to left child: {}", node.value),
                    Some(node.id.to_string()),
                    self.tree_snapshot(),
                );
            }
        }
        let (min_id, min_value) = self
            .arena
            .get(idx)
            .map(|n| (n.id, n.value))
            .unwrap_or((NodeId(0), 0));
        ledger.record(
            format!("Minimum value found: {min_value}"),
            Some(min_id.to_string()),
            self.tree_snapshot(),
        );
        min_value
    }

    /// Detach `idx` from its parent (or the root slot), hanging
    /// `replacement` in its place, and free the node.
    fn splice(&mut self, parent: Option<(Index, Side)>, idx: Index, replacement: Option<Index>) {
        match parent {
            None => self.arena.set_root(replacement),
            Some((p, Side::Left)) => {
                if let Some(node) = self.arena.get_mut(p) {
                    node.left = replacement;
                }
            }
            Some((p, Side::Right)) => {
                if let Some(node) = self.arena.get_mut(p) {
                    node.right = replacement;
                }
            }
        }
        self.arena.remove(idx);
    }

    /// Traverse the tree in the given order, driving the call-stack
    /// emulator so each conceptual activation is replayable. Never
    /// mutates the tree; returns the processed values in visit order.
    #[instrument(level = "debug", skip(self))]
    pub fn traverse(&self, order: TraverseOrder) -> (Ledger, Vec<i64>) {
        let mut ledger = Ledger::new();
        let mut cs = CallStack::new();
        let mut emitted: Vec<i64> = Vec::new();

        let snapshot =
            |cs: &CallStack, emitted: &[i64]| Snapshot::CallStack {
                frames: cs.snapshot(),
                history: cs.history().to_vec(),
                emitted: emitted.to_vec(),
            };

        ledger.record(
            format!("Starting {} Traversal ({})", order.label(), order.legend()),
            None,
            snapshot(&cs, &emitted),
        );

        // Simulation stack of (node, next stage); stages 0..3 run the
        // order's three actions, stage 3 returns.
        let mut sim: Vec<(Option<Index>, u8)> = Vec::new();
        self.enter(self.arena.root(), &mut cs, &mut ledger, &emitted);
        sim.push((self.arena.root(), 0));

        while let Some(&(node, stage)) = sim.last() {
            let Some(idx) = node else {
                cs.pop("null");
                ledger.record(
                    "Returning from null (base case)",
                    None,
                    snapshot(&cs, &emitted),
                );
                sim.pop();
                continue;
            };
            let Some((node_id, value, left, right)) = self
                .arena
                .get(idx)
                .map(|n| (n.id, n.value, n.left, n.right))
            else {
                sim.pop();
                continue;
            };

            if stage >= 3 {
                cs.pop(value.to_string());
                ledger.record(
                    format!("Exiting traverse({value}) - all children processed"),
                    Some(node_id.to_string()),
                    snapshot(&cs, &emitted),
                );
                sim.pop();
                continue;
            }

            if let Some(top) = sim.last_mut() {
                top.1 += 1;
            }
            match order.actions()[stage as usize] {
                Action::Left => {
                    cs.set_phase(Phase::DescendingLeft);
                    ledger.record(
                        format!("Descending into left subtree of {value}"),
                        Some(node_id.to_string()),
                        snapshot(&cs, &emitted),
                    );
                    self.enter(left, &mut cs, &mut ledger, &emitted);
                    sim.push((left, 0));
                }
                Action::Process => {
                    cs.set_phase(Phase::Processing);
                    ledger.count_op();
                    emitted.push(value);
                    ledger.record(
                        format!("Processing node: {value}"),
                        Some(node_id.to_string()),
                        snapshot(&cs, &emitted),
                    );
                }
                Action::Right => {
                    cs.set_phase(Phase::DescendingRight);
                    ledger.record(
                        format!("Descending into right subtree of {value}"),
                        Some(node_id.to_string()),
                        snapshot(&cs, &emitted),
                    );
                    self.enter(right, &mut cs, &mut ledger, &emitted);
                    sim.push((right, 0));
                }
            }
        }

        ledger.record(
            format!("{} Traversal completed", order.label()),
            None,
            Snapshot::CallStack {
                frames: cs.snapshot(),
                history: cs.history().to_vec(),
                emitted: emitted.clone(),
            },
        );
        (ledger, emitted)
    }

    /// Push the frame for a new activation (node or null sentinel) and
    /// record the entry step.
    fn enter(
        &self,
        node: Option<Index>,
        cs: &mut CallStack,
        ledger: &mut Ledger,
        emitted: &[i64],
    ) {
        let subject = node
            .and_then(|idx| self.arena.get(idx))
            .map(|n| (n.id, n.value));
        cs.push(subject);
        let snapshot = Snapshot::CallStack {
            frames: cs.snapshot(),
            history: cs.history().to_vec(),
            emitted: emitted.to_vec(),
        };
        match subject {
            Some((id, value)) => ledger.record(
                format!("Entering traverse({value})"),
                Some(id.to_string()),
                snapshot,
            ),
            None => ledger.record("Reached null node (base case)", None, snapshot),
        }
    }

    /// Height, node count, re-derived validity, and a full
    /// serialization of the tree.
    #[instrument(level = "debug", skip(self))]
    pub fn info(&self) -> TreeInfo {
        TreeInfo {
            height: self.arena.height(),
            node_count: self.arena.node_count(),
            is_valid_bst: self.arena.is_valid_bst(),
            tree: self.arena.snapshot(),
        }
    }
}
