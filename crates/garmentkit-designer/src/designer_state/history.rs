//! Undo/redo for designer state.

use garmentkit_core::{DesignEvent, Side};

use super::DesignerState;
use crate::history::{HistoryManager, Snapshot};

impl DesignerState {
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Step the current side back one snapshot. Returns whether anything was replayed.
    pub fn undo(&mut self) -> bool {
        let side = self.current_side();
        match self.history.undo(side) {
            Some(snapshot) => {
                self.replay(side, snapshot);
                true
            }
            None => false,
        }
    }

    /// Step the current side forward one snapshot.
    pub fn redo(&mut self) -> bool {
        let side = self.current_side();
        match self.history.redo(side) {
            Some(snapshot) => {
                self.replay(side, snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo(self.current_side())
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo(self.current_side())
    }

    /// Install a snapshot. The history's one-shot suppression swallows the
    /// observation so the replay is not recorded again.
    fn replay(&mut self, side: Side, snapshot: Snapshot) {
        if !self.gesture.is_idle() {
            tracing::debug!("Replay on {} ends the active gesture", side);
            self.gesture = Default::default();
        }

        self.document.side_mut(side).replace(snapshot);
        self.selection.clear();
        self.history
            .observe(side, self.document.side(side).elements());
        self.is_modified = true;

        self.emit(DesignEvent::ElementsChanged { side });
        self.emit_selection();
        self.emit_history(side);
    }
}
