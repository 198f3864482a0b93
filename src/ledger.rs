//! Step Ledger: the ordered, replayable trace every operation writes to.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::arena::TreeSnapshot;
use crate::callstack::{FrameHistory, FrameSnapshot};
use crate::frontier::SpanningEdge;

/// Value snapshot of the owning structure at the instant a step was
/// recorded. Snapshots are deep copies: later steps never retroactively
/// change earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Snapshot {
    /// Serialized tree rooted at `root`, `None` for the empty tree.
    Tree { root: Option<Box<TreeSnapshot>> },
    /// Queue frontier (BFS): contents front-to-back.
    Queue {
        queue: Vec<String>,
        visited: Vec<String>,
        order: Vec<String>,
    },
    /// Stack frontier (DFS): contents bottom-to-top.
    Stack {
        stack: Vec<String>,
        visited: Vec<String>,
        order: Vec<String>,
    },
    /// Distance table (Dijkstra): `None` means unreachable so far.
    Distances {
        distances: BTreeMap<String, Option<u64>>,
        visited: Vec<String>,
    },
    /// Accumulated spanning structure (Prim/Kruskal).
    SpanningTree {
        edges: Vec<SpanningEdge>,
        visited: Vec<String>,
    },
    /// Simulated call stack (traversals): live frames bottom-to-top.
    CallStack {
        frames: Vec<FrameSnapshot>,
        history: Vec<FrameHistory>,
        emitted: Vec<i64>,
    },
}

/// One recorded transition in an algorithm's execution.
///
/// `description` is human-readable and not a stable machine contract;
/// consumers must not assume anything beyond the documented fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    /// 1-based sequence number, monotonic within one operation.
    pub step: usize,
    pub description: String,
    /// Display identifier of the element this step is about, if any.
    pub subject: Option<String>,
    pub snapshot: Snapshot,
    /// Count of real comparison/processing operations so far.
    /// Narrative-only steps carry the counter unchanged.
    pub op_count: usize,
}

/// Append-only ordered log of [`Step`] records.
///
/// A fresh ledger is created at the start of every public operation;
/// traces never accumulate across calls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ledger {
    steps: Vec<Step>,
    op_count: usize,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the real-operation counter (comparisons, node
    /// processing, frontier decisions). Does not record a step.
    pub fn count_op(&mut self) {
        self.op_count += 1;
    }

    /// Append a step carrying the current operation counter.
    pub fn record(
        &mut self,
        description: impl Into<String>,
        subject: Option<String>,
        snapshot: Snapshot,
    ) {
        self.steps.push(Step {
            step: self.steps.len() + 1,
            description: description.into(),
            subject,
            snapshot,
            op_count: self.op_count,
        });
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn op_count(&self) -> usize {
        self.op_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_records_when_appending_then_sequence_is_one_based_and_monotonic() {
        let mut ledger = Ledger::new();
        ledger.record("first", None, Snapshot::Tree { root: None });
        ledger.count_op();
        ledger.record("second", Some("node_1".to_string()), Snapshot::Tree { root: None });

        assert_eq!(ledger.steps()[0].step, 1);
        assert_eq!(ledger.steps()[0].op_count, 0);
        assert_eq!(ledger.steps()[1].step, 2);
        assert_eq!(ledger.steps()[1].op_count, 1);
    }

    #[test]
    fn given_narrative_step_when_recording_then_counter_is_unchanged() {
        let mut ledger = Ledger::new();
        ledger.record("narrative only", None, Snapshot::Tree { root: None });
        assert_eq!(ledger.op_count(), 0);
    }
}
