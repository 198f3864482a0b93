//! Call-Stack Emulator: explicit frames for recursively-structured
//! traversals, so a non-recursing player can replay recursion.
//!
//! Frames live in an arena (`frames`) that never shrinks; `active`
//! holds indices into it, bottom-to-top. This is purely an
//! observability layer: it never alters the traversal's result.

use std::fmt;

use serde::Serialize;

use crate::arena::NodeId;

/// Deterministic frame identifier, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame_{}", self.0)
    }
}

/// Phase of one conceptual function activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Entering,
    DescendingLeft,
    Processing,
    DescendingRight,
    Returning,
}

#[derive(Debug)]
struct Frame {
    id: FrameId,
    /// Subject node, `None` for the null/base-case sentinel.
    subject: Option<NodeId>,
    value: Option<i64>,
    phase: Phase,
    base_case: bool,
}

/// Serializable view of one live frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSnapshot {
    pub id: FrameId,
    pub subject: Option<NodeId>,
    pub value: Option<i64>,
    pub phase: Phase,
    pub base_case: bool,
}

/// Record appended when a frame is popped: what was processed and what
/// value was "returned".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameHistory {
    pub frame: FrameId,
    pub subject: Option<NodeId>,
    pub returned: String,
}

#[derive(Debug, Default)]
pub struct CallStack {
    frames: Vec<Frame>,
    active: Vec<usize>,
    history: Vec<FrameHistory>,
    next_id: u64,
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a frame for a node activation, or for the null sentinel
    /// when `subject` is `None`. Returns the frame id.
    pub fn push(&mut self, subject: Option<(NodeId, i64)>) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        let frame = Frame {
            id,
            subject: subject.map(|(node, _)| node),
            value: subject.map(|(_, value)| value),
            phase: Phase::Entering,
            base_case: subject.is_none(),
        };
        self.frames.push(frame);
        self.active.push(self.frames.len() - 1);
        id
    }

    /// Update the phase of the top frame in place.
    pub fn set_phase(&mut self, phase: Phase) {
        if let Some(&top) = self.active.last() {
            if let Some(frame) = self.frames.get_mut(top) {
                frame.phase = phase;
            }
        }
    }

    /// Pop the top frame and append a history record with the given
    /// returned-value label.
    pub fn pop(&mut self, returned: impl Into<String>) -> Option<FrameHistory> {
        let top = self.active.pop()?;
        let frame = self.frames.get_mut(top)?;
        frame.phase = Phase::Returning;
        let record = FrameHistory {
            frame: frame.id,
            subject: frame.subject,
            returned: returned.into(),
        };
        self.history.push(record.clone());
        Some(record)
    }

    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Live frames bottom-to-top.
    pub fn snapshot(&self) -> Vec<FrameSnapshot> {
        self.active
            .iter()
            .filter_map(|&i| self.frames.get(i))
            .map(|f| FrameSnapshot {
                id: f.id,
                subject: f.subject,
                value: f.value,
                phase: f.phase,
                base_case: f.base_case,
            })
            .collect()
    }

    pub fn history(&self) -> &[FrameHistory] {
        &self.history
    }
}
