//! Command result types.

use std::fmt;

/// Marker printed for an absent key or an empty `FIND`.
pub const NULL_MARKER: &str = "NULL";
/// Diagnostic for `ROLLBACK`/`COMMIT` with nothing open.
pub const NO_TRANSACTION: &str = "NO TRANSACTION";
/// Diagnostic for an unknown verb or wrong argument count.
pub const UNKNOWN_COMMAND: &str = "UNKNOWN COMMAND";

/// Result of executing one protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    /// Command applied; nothing to print.
    Ok,
    /// Value returned by GET.
    Value(Option<String>),
    /// Count returned by COUNTS.
    Count(usize),
    /// Sorted keys returned by FIND.
    Keys(Vec<String>),
    /// ROLLBACK or COMMIT with no open transaction.
    NoTransaction,
    /// Malformed line.
    UnknownCommand,
    /// END - the session should stop.
    End,
}

impl QueryResult {
    /// Check if the session should terminate.
    pub fn is_end(&self) -> bool {
        matches!(self, QueryResult::End)
    }

    /// Check if this result is a diagnostic rather than data.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, QueryResult::NoTransaction | QueryResult::UnknownCommand)
    }

    /// Text to print for this result, if any.
    pub fn render(&self) -> Option<String> {
        match self {
            QueryResult::Ok | QueryResult::End => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Ok | QueryResult::End => Ok(()),
            QueryResult::Value(Some(value)) => write!(f, "{}", value),
            QueryResult::Value(None) => write!(f, "{}", NULL_MARKER),
            QueryResult::Count(n) => write!(f, "{}", n),
            QueryResult::Keys(keys) if keys.is_empty() => write!(f, "{}", NULL_MARKER),
            QueryResult::Keys(keys) => write!(f, "{}", keys.join(" ")),
            QueryResult::NoTransaction => write!(f, "{}", NO_TRANSACTION),
            QueryResult::UnknownCommand => write!(f, "{}", UNKNOWN_COMMAND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(QueryResult::Ok.render(), None);
        assert_eq!(QueryResult::End.render(), None);
        assert_eq!(QueryResult::Value(Some("10".into())).render().as_deref(), Some("10"));
        assert_eq!(QueryResult::Value(None).render().as_deref(), Some("NULL"));
        assert_eq!(QueryResult::Count(0).render().as_deref(), Some("0"));
        assert_eq!(QueryResult::Keys(vec![]).render().as_deref(), Some("NULL"));
        assert_eq!(
            QueryResult::Keys(vec!["a".into(), "b".into()]).render().as_deref(),
            Some("a b")
        );
        assert_eq!(QueryResult::NoTransaction.render().as_deref(), Some("NO TRANSACTION"));
        assert_eq!(QueryResult::UnknownCommand.render().as_deref(), Some("UNKNOWN COMMAND"));
    }

    #[test]
    fn test_classification() {
        assert!(QueryResult::End.is_end());
        assert!(!QueryResult::Ok.is_end());
        assert!(QueryResult::NoTransaction.is_diagnostic());
        assert!(!QueryResult::Count(1).is_diagnostic());
    }
}
