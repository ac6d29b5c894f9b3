//! Edit session state for item-level edit mode.

use super::TaskId;
use serde::{Deserialize, Serialize};

/// Draft-editing state targeting exactly one task.
///
/// The draft is independent of the task's persisted text until a save is
/// confirmed by the remote store. Each session carries a sequence number so
/// that a save resolving after a newer session was opened never closes the
/// newer one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    sequence: u64,
    target: TaskId,
    draft: String,
}

impl EditSession {
    pub(crate) const fn open(sequence: u64, target: TaskId, draft: String) -> Self {
        Self {
            sequence,
            target,
            draft,
        }
    }

    /// Returns the session sequence number.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the task being edited.
    #[must_use]
    pub const fn target(&self) -> TaskId {
        self.target
    }

    /// Returns the current working copy of the text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns `true` when the draft holds only whitespace and cannot be
    /// saved.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.draft.trim().is_empty()
    }

    pub(crate) fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }
}
