//! Tagged outcomes of controller commands.

/// How a successful command affected the task list.
///
/// Commands that race under network latency commit in completion order, not
/// call order. A commit whose target was touched by another commit after
/// dispatch (or vanished meanwhile) is still applied, last writer wins, but
/// is tagged [`CommandOutcome::Stale`] so the race is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandOutcome {
    /// The remote store confirmed the command and it was committed against
    /// an unchanged base.
    Applied,
    /// The remote store confirmed the command, but another commit touched
    /// the same target between dispatch and commit.
    Stale,
    /// A local guard rejected the command; the remote store was not called.
    Skipped,
}

impl CommandOutcome {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Stale => "stale",
            Self::Skipped => "skipped",
        }
    }

    /// Returns `Stale` when `stale` holds, otherwise `Applied`.
    #[must_use]
    pub const fn committed(stale: bool) -> Self {
        if stale { Self::Stale } else { Self::Applied }
    }

    /// Returns `true` unless the command was skipped.
    #[must_use]
    pub const fn is_committed(self) -> bool {
        !matches!(self, Self::Skipped)
    }
}
