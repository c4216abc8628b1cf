//! Undo modes.
//!
//! nestkv supports two ways of recording undo points:
//! - Transaction: snapshots are taken only by `BEGIN`
//! - EveryMutation: every effective `SET`/`UNSET` also takes a snapshot

use std::fmt;

use serde::Serialize;

/// When the store records undo points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UndoMode {
    /// Transaction-scoped undo.
    ///
    /// Only `BEGIN` pushes a snapshot, so `ROLLBACK` can only undo changes
    /// made after an explicit `BEGIN`. Outside a transaction every mutation
    /// is immediately permanent.
    #[default]
    Transaction,

    /// Per-mutation undo history.
    ///
    /// Each `SET`, and each `UNSET` that actually removes a key, pushes a
    /// snapshot before it applies. A `ROLLBACK` with no `BEGIN` then undoes
    /// the most recent mutation, and inside a transaction it undoes one
    /// mutation at a time rather than the whole level.
    EveryMutation,
}

impl UndoMode {
    /// Check if mutations record their own undo points.
    pub fn snapshots_mutations(&self) -> bool {
        matches!(self, UndoMode::EveryMutation)
    }
}

impl fmt::Display for UndoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoMode::Transaction => write!(f, "transaction"),
            UndoMode::EveryMutation => write!(f, "every-mutation"),
        }
    }
}
