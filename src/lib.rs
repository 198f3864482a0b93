//! steptrace: an algorithm step-trace engine.
//!
//! Runs classical tree/graph algorithms (BST insert/search/delete/
//! traversal; BFS, DFS, Dijkstra, Prim, Kruskal) while emitting an
//! ordered, replayable sequence of [`ledger::Step`] records describing
//! every meaningful internal transition. The resulting
//! [`ledger::Ledger`] is render-agnostic: players consume it at their
//! own pace, the engine itself does no I/O and no pacing.
//!
//! Everything is single-threaded and synchronous; each operation runs
//! to completion and owns its ledger for the duration. Independent
//! tree/graph instances are mutually isolated.

pub mod algorithms;
pub mod arena;
pub mod callstack;
pub mod cli;
pub mod errors;
pub mod frontier;
pub mod graph;
pub mod ledger;
pub mod tree;
pub mod util;

pub use errors::{GraphError, GraphResult};
pub use graph::Graph;
pub use ledger::{Ledger, Snapshot, Step};
pub use tree::{BinarySearchTree, TraverseOrder, TreeInfo};
