//! Undo/redo history over serialized document snapshots.
//!
//! Two stacks of JSON strings. [`History::snapshot`] is called with the
//! pre-mutation document; undoing pushes the current document onto the redo
//! stack and restores the popped snapshot, redoing is symmetric. Any fresh
//! snapshot clears the redo lane — history is a single linear timeline, no
//! branching.
//!
//! Snapshots are stored serialized rather than as live values so a restored
//! state is structurally independent of anything the caller has mutated
//! since, and so the stacks cost nothing beyond the JSON text.

use thiserror::Error;

use crate::model::SiteConfig;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("snapshot serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Undo/redo stacks. One per editing session.
#[derive(Debug, Default)]
pub struct History {
    undo: Vec<String>,
    redo: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push the pre-mutation state onto the undo stack and clear the redo
    /// lane. Call before applying a mutation that should be undoable.
    pub fn snapshot(&mut self, config: &SiteConfig) -> Result<(), HistoryError> {
        self.undo.push(serde_json::to_string(config)?);
        self.redo.clear();
        Ok(())
    }

    /// Step back: returns the previous state, moving `current` to the redo
    /// stack. `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &SiteConfig) -> Result<Option<SiteConfig>, HistoryError> {
        let Some(snapshot) = self.undo.pop() else {
            return Ok(None);
        };
        self.redo.push(serde_json::to_string(current)?);
        Ok(Some(serde_json::from_str(&snapshot)?))
    }

    /// Step forward again after an undo. `None` when the redo lane is empty.
    pub fn redo(&mut self, current: &SiteConfig) -> Result<Option<SiteConfig>, HistoryError> {
        let Some(snapshot) = self.redo.pop() else {
            return Ok(None);
        };
        self.undo.push(serde_json::to_string(current)?);
        Ok(Some(serde_json::from_str(&snapshot)?))
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
