//! The snapshot stack behind nested transactions.
//!
//! Each entry is an owned copy of the store state taken when the level was
//! opened. Entries are written once and read at most once, by the `ROLLBACK`
//! that pops them.

use tracing::trace;

use crate::transaction::error::{TransactionError, TransactionResult};
use crate::transaction::level::{LevelOrigin, TransactionLevel};

/// A saved state plus the metadata of the level it opened.
#[derive(Debug, Clone)]
pub struct Snapshot<S> {
    /// Metadata for the level.
    pub level: TransactionLevel,
    /// The state as it was when the level was opened.
    pub state: S,
}

/// LIFO stack of snapshots, one per open level.
#[derive(Debug, Clone)]
pub struct TransactionStack<S> {
    levels: Vec<Snapshot<S>>,
}

impl<S> Default for TransactionStack<S> {
    fn default() -> Self {
        Self { levels: Vec::new() }
    }
}

impl<S> TransactionStack<S> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of open levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Push a snapshot and return the metadata of the new level.
    pub fn push(&mut self, state: S, origin: LevelOrigin) -> &TransactionLevel {
        let level = TransactionLevel::new(self.levels.len() + 1, origin);
        trace!(id = %level.id, depth = level.depth, %origin, "snapshot pushed");
        self.levels.push(Snapshot { level, state });
        &self.levels[self.levels.len() - 1].level
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> TransactionResult<Snapshot<S>> {
        let snapshot = self.levels.pop().ok_or(TransactionError::NoTransaction)?;
        trace!(id = %snapshot.level.id, depth = snapshot.level.depth, "snapshot popped");
        Ok(snapshot)
    }

    /// Discard every snapshot, returning how many levels were closed.
    pub fn clear(&mut self) -> TransactionResult<usize> {
        if self.levels.is_empty() {
            return Err(TransactionError::NoTransaction);
        }
        let closed = self.levels.len();
        self.levels.clear();
        trace!(closed, "snapshots discarded");
        Ok(closed)
    }

    /// Discard every level above `depth`, returning the snapshot that
    /// opened level `depth + 1`.
    ///
    /// Returns `NoTransaction` if the stack is not deeper than `depth`.
    pub fn truncate(&mut self, depth: usize) -> TransactionResult<Snapshot<S>> {
        if self.levels.len() <= depth {
            return Err(TransactionError::NoTransaction);
        }
        let snapshot = self.levels.drain(depth..).next().ok_or(TransactionError::NoTransaction)?;
        trace!(id = %snapshot.level.id, depth, "snapshots truncated");
        Ok(snapshot)
    }

    /// Metadata of all open levels, outermost first.
    pub fn levels(&self) -> impl Iterator<Item = &TransactionLevel> {
        self.levels.iter().map(|s| &s.level)
    }
}
