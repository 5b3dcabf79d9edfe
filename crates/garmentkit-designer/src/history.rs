//! Snapshot-based undo/redo, one stack per garment side.
//!
//! Each stack is seeded with the empty list. After every user-driven
//! mutation the current element list is offered to [`HistoryManager::observe`],
//! which records it only if it differs from the entry under the cursor. An
//! undo or redo arms a one-shot suppression flag so the replayed state is not
//! recorded again.

use garmentkit_core::Side;

use crate::model::DesignElement;

/// Default number of snapshots kept per side.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Immutable copy of one side's element list.
pub type Snapshot = Vec<DesignElement>;

/// What happened when a state was offered to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new snapshot was appended.
    Recorded,
    /// The state equals the snapshot under the cursor.
    Unchanged,
    /// The state came from an undo/redo replay and was skipped.
    Suppressed,
}

/// Ordered snapshots plus a cursor.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    limit: usize,
}

impl HistoryStack {
    pub fn new(limit: usize) -> Self {
        Self::seeded(Vec::new(), limit)
    }

    /// A stack whose first entry is `seed`.
    pub fn seeded(seed: Snapshot, limit: usize) -> Self {
        Self {
            snapshots: vec![seed],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> &[DesignElement] {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of reachable snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Append `elements` unless it equals the current entry.
    ///
    /// Anything after the cursor is discarded first; the oldest entries are
    /// dropped once the stack exceeds its limit.
    pub fn record(&mut self, elements: &[DesignElement]) -> bool {
        if self.current() == elements {
            return false;
        }

        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(elements.to_vec());
        self.cursor += 1;

        if self.snapshots.len() > self.limit {
            let overflow = self.snapshots.len() - self.limit;
            self.snapshots.drain(..overflow);
            self.cursor -= overflow;
        }
        true
    }

    pub fn undo(&mut self) -> Option<&[DesignElement]> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&[DesignElement]> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

#[derive(Debug, Clone)]
struct SideHistory {
    stack: HistoryStack,
    suppress_next: bool,
}

impl SideHistory {
    fn new(seed: Snapshot, limit: usize) -> Self {
        Self {
            stack: HistoryStack::seeded(seed, limit),
            suppress_next: false,
        }
    }
}

/// Independent undo/redo stacks for the front and back.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    sides: [SideHistory; 2],
    limit: usize,
}

fn slot(side: Side) -> usize {
    match side {
        Side::Front => 0,
        Side::Back => 1,
    }
}

impl HistoryManager {
    pub fn new(limit: usize) -> Self {
        Self {
            sides: [
                SideHistory::new(Vec::new(), limit),
                SideHistory::new(Vec::new(), limit),
            ],
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn stack(&self, side: Side) -> &HistoryStack {
        &self.sides[slot(side)].stack
    }

    /// Offer the state of `side` after a mutation.
    pub fn observe(&mut self, side: Side, elements: &[DesignElement]) -> RecordOutcome {
        let history = &mut self.sides[slot(side)];
        if std::mem::take(&mut history.suppress_next) {
            tracing::trace!("History on {}: replay suppressed", side);
            return RecordOutcome::Suppressed;
        }
        if history.stack.record(elements) {
            tracing::debug!(
                "History on {}: recorded entry {} of {}",
                side,
                history.stack.cursor() + 1,
                history.stack.len()
            );
            RecordOutcome::Recorded
        } else {
            RecordOutcome::Unchanged
        }
    }

    /// Step back. Returns the snapshot to replay.
    pub fn undo(&mut self, side: Side) -> Option<Snapshot> {
        let history = &mut self.sides[slot(side)];
        let snapshot = history.stack.undo()?.to_vec();
        history.suppress_next = true;
        Some(snapshot)
    }

    /// Step forward. Returns the snapshot to replay.
    pub fn redo(&mut self, side: Side) -> Option<Snapshot> {
        let history = &mut self.sides[slot(side)];
        let snapshot = history.stack.redo()?.to_vec();
        history.suppress_next = true;
        Some(snapshot)
    }

    pub fn can_undo(&self, side: Side) -> bool {
        self.stack(side).can_undo()
    }

    pub fn can_redo(&self, side: Side) -> bool {
        self.stack(side).can_redo()
    }

    /// Start a side over with `seed` as its only entry.
    pub fn reset_side(&mut self, side: Side, seed: Snapshot) {
        self.sides[slot(side)] = SideHistory::new(seed, self.limit);
    }

    /// Start both sides over from the empty list.
    pub fn reset(&mut self) {
        for side in Side::ALL {
            self.reset_side(side, Vec::new());
        }
    }
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
