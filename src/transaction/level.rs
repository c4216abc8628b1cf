//! Transaction level metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use ulid::Ulid;

/// What caused a level to be pushed onto the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelOrigin {
    /// An explicit `BEGIN`.
    Begin,
    /// An undo point recorded by a mutation (only in `UndoMode::EveryMutation`).
    Mutation,
}

impl fmt::Display for LevelOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelOrigin::Begin => write!(f, "begin"),
            LevelOrigin::Mutation => write!(f, "mutation"),
        }
    }
}

/// One open transaction level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionLevel {
    /// Unique level ID.
    pub id: String,
    /// 1-based position on the stack.
    pub depth: usize,
    /// What pushed this level.
    pub origin: LevelOrigin,
    /// When the level was opened.
    pub opened_at: DateTime<Utc>,
}

impl TransactionLevel {
    pub(crate) fn new(depth: usize, origin: LevelOrigin) -> Self {
        Self {
            id: Ulid::new().to_string().to_lowercase(),
            depth,
            origin,
            opened_at: Utc::now(),
        }
    }

    /// Short form of the level ID.
    pub fn short_id(&self) -> &str {
        // ULIDs are ASCII, so byte slicing is safe.
        &self.id[self.id.len().saturating_sub(8)..]
    }
}

impl fmt::Display for TransactionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}, opened {})",
            self.depth,
            self.short_id(),
            self.origin,
            self.opened_at.format("%H:%M:%S%.3f")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ids_are_unique() {
        let a = TransactionLevel::new(1, LevelOrigin::Begin);
        let b = TransactionLevel::new(2, LevelOrigin::Begin);
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.len(), 26);
        assert_eq!(a.short_id().len(), 8);
    }

    #[test]
    fn test_level_display() {
        let level = TransactionLevel::new(3, LevelOrigin::Mutation);
        let shown = level.to_string();
        assert!(shown.starts_with("#3 "));
        assert!(shown.contains("mutation"));
    }
}
