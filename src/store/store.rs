//! The transactional store.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::state::StoreState;
use crate::transaction::{
    LevelOrigin, TransactionLevel, TransactionResult, TransactionStack, UndoMode,
};

/// Store configuration options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// When undo points are recorded.
    pub undo_mode: UndoMode,
}

impl StoreConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the undo mode.
    pub fn undo_mode(mut self, mode: UndoMode) -> Self {
        self.undo_mode = mode;
        self
    }
}

/// Store statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of keys currently set.
    pub keys: usize,
    /// Number of distinct values held by at least one key.
    pub distinct_values: usize,
    /// Number of open transaction levels.
    pub depth: usize,
    /// Active undo mode.
    pub undo_mode: UndoMode,
}

/// An in-memory key-value store with nested transactions.
///
/// Holds the live [`StoreState`] and a stack of saved states, one per open
/// level. `begin` pushes a copy, `rollback` restores the top copy and
/// `commit` throws all copies away.
#[derive(Debug, Default)]
pub struct TransactionalStore {
    state: StoreState,
    stack: TransactionStack<StoreState>,
    config: StoreConfig,
}

impl TransactionalStore {
    /// Create an empty store with transaction-scoped undo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with custom configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.record_mutation();
        self.state.set(key.into(), value.into());
    }

    /// Get the value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.state.get(key)
    }

    /// Remove `key`. Returns `false`, without recording anything, if the
    /// key was not set.
    pub fn unset(&mut self, key: &str) -> bool {
        if !self.state.contains(key) {
            return false;
        }
        self.record_mutation();
        self.state.remove(key).is_some()
    }

    /// Number of keys whose value is `value`.
    pub fn counts(&self, value: &str) -> usize {
        self.state.count(value)
    }

    /// Keys whose value is `value`, sorted ascending.
    pub fn find(&self, value: &str) -> Vec<&str> {
        self.state.keys_with_value(value)
    }

    fn record_mutation(&mut self) {
        if self.config.undo_mode.snapshots_mutations() {
            self.stack.push(self.state.clone(), LevelOrigin::Mutation);
        }
    }

    /// Open a new transaction level.
    pub fn begin(&mut self) -> &TransactionLevel {
        let level = self.stack.push(self.state.clone(), LevelOrigin::Begin);
        debug!(id = %level.id, depth = level.depth, "transaction begun");
        level
    }

    /// Undo the innermost open level.
    ///
    /// Levels beneath it stay open.
    pub fn rollback(&mut self) -> TransactionResult<TransactionLevel> {
        let snapshot = self.stack.pop()?;
        self.state = snapshot.state;
        debug!(
            id = %snapshot.level.id,
            depth = snapshot.level.depth,
            "transaction rolled back"
        );
        Ok(snapshot.level)
    }

    /// Make the current state permanent, closing every open level.
    ///
    /// Returns the number of levels closed.
    pub fn commit(&mut self) -> TransactionResult<usize> {
        let closed = self.stack.clear()?;
        debug!(closed, "transactions committed");
        Ok(closed)
    }

    /// Number of open transaction levels.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Undo every level above `depth` at once, restoring the state from
    /// when level `depth + 1` was opened.
    pub fn rollback_to(&mut self, depth: usize) -> TransactionResult<TransactionLevel> {
        let snapshot = self.stack.truncate(depth)?;
        self.state = snapshot.state;
        debug!(id = %snapshot.level.id, depth, "rolled back to depth");
        Ok(snapshot.level)
    }

    /// Open levels, outermost first.
    pub fn levels(&self) -> impl Iterator<Item = &TransactionLevel> {
        self.stack.levels()
    }

    /// Get store statistics.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.state.key_count(),
            distinct_values: self.state.distinct_values(),
            depth: self.stack.depth(),
            undo_mode: self.config.undo_mode,
        }
    }

    /// Sorted view of every key and its value.
    pub fn entries(&self) -> BTreeMap<&str, &str> {
        self.state.iter().collect()
    }

    /// Check that the reverse index matches the mapping.
    pub fn is_consistent(&self) -> bool {
        self.state.index_is_consistent()
    }
}
