//! Command executor.
//!
//! Maps each [`Command`] to one call on the [`TransactionalStore`].

use tracing::debug;

use super::result::QueryResult;
use crate::command::{Command, Parser};
use crate::store::{StoreConfig, TransactionalStore};
use crate::transaction::TransactionError;

/// Executes protocol lines against a store it owns.
#[derive(Debug, Default)]
pub struct QueryExecutor {
    store: TransactionalStore,
}

impl QueryExecutor {
    /// Create an executor over an empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            store: TransactionalStore::with_config(config),
        }
    }

    /// Get a reference to the underlying store.
    pub fn store(&self) -> &TransactionalStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut TransactionalStore {
        &mut self.store
    }

    /// Parse and execute one line.
    ///
    /// Malformed lines never reach the store.
    pub fn execute(&mut self, line: &str) -> QueryResult {
        match Parser::parse(line) {
            Ok(Some(command)) => self.execute_command(command),
            Ok(None) => QueryResult::Ok,
            Err(e) => {
                debug!(line, reason = %e, "rejected command");
                QueryResult::UnknownCommand
            }
        }
    }

    /// Execute a parsed command.
    pub fn execute_command(&mut self, command: Command) -> QueryResult {
        debug!(%command, depth = self.store.depth(), "executing");

        match command {
            Command::Set { key, value } => {
                self.store.set(key, value);
                QueryResult::Ok
            }
            Command::Get { key } => QueryResult::Value(self.store.get(&key).map(str::to_string)),
            Command::Unset { key } => {
                self.store.unset(&key);
                QueryResult::Ok
            }
            Command::Counts { value } => QueryResult::Count(self.store.counts(&value)),
            Command::Find { value } => QueryResult::Keys(
                self.store
                    .find(&value)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            ),
            Command::Begin => {
                self.store.begin();
                QueryResult::Ok
            }
            Command::Rollback => Self::transaction_result(self.store.rollback().map(|_| ())),
            Command::Commit => Self::transaction_result(self.store.commit().map(|_| ())),
            Command::End => QueryResult::End,
        }
    }

    fn transaction_result(result: Result<(), TransactionError>) -> QueryResult {
        match result {
            Ok(()) => QueryResult::Ok,
            Err(TransactionError::NoTransaction) => QueryResult::NoTransaction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::UndoMode;

    fn run(executor: &mut QueryExecutor, line: &str) -> Option<String> {
        executor.execute(line).render()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut ex = QueryExecutor::default();
        assert_eq!(run(&mut ex, "SET a 10"), None);
        assert_eq!(run(&mut ex, "GET a").as_deref(), Some("10"));
        assert_eq!(run(&mut ex, "SET b 20"), None);
        assert_eq!(run(&mut ex, "COUNTS 10").as_deref(), Some("1"));
        assert_eq!(run(&mut ex, "BEGIN"), None);
        assert_eq!(run(&mut ex, "SET a 20"), None);
        assert_eq!(run(&mut ex, "COUNTS 20").as_deref(), Some("2"));
        assert_eq!(run(&mut ex, "FIND 20").as_deref(), Some("a b"));
        assert_eq!(run(&mut ex, "ROLLBACK"), None);
        assert_eq!(run(&mut ex, "COUNTS 20").as_deref(), Some("1"));
        assert_eq!(run(&mut ex, "GET a").as_deref(), Some("10"));
    }

    #[test]
    fn test_diagnostics() {
        let mut ex = QueryExecutor::default();
        assert_eq!(ex.execute("ROLLBACK"), QueryResult::NoTransaction);
        assert_eq!(ex.execute("COMMIT"), QueryResult::NoTransaction);
        assert_eq!(ex.execute("SET a"), QueryResult::UnknownCommand);
        assert_eq!(ex.execute("HELLO"), QueryResult::UnknownCommand);
        assert_eq!(ex.store().stats().keys, 0);
    }

    #[test]
    fn test_absent_results() {
        let mut ex = QueryExecutor::default();
        assert_eq!(ex.execute("GET nothing"), QueryResult::Value(None));
        assert_eq!(ex.execute("COUNTS nothing"), QueryResult::Count(0));
        assert_eq!(ex.execute("FIND nothing"), QueryResult::Keys(vec![]));
        assert_eq!(run(&mut ex, "FIND nothing").as_deref(), Some("NULL"));
    }

    #[test]
    fn test_end_and_blank_lines() {
        let mut ex = QueryExecutor::default();
        assert_eq!(ex.execute(""), QueryResult::Ok);
        assert!(ex.execute("end").is_end());
    }

    #[test]
    fn test_unset_then_rollback() {
        let mut ex = QueryExecutor::default();
        ex.execute("SET a 1");
        ex.execute("BEGIN");
        ex.execute("UNSET a");
        assert_eq!(ex.execute("GET a"), QueryResult::Value(None));
        ex.execute("ROLLBACK");
        assert_eq!(ex.execute("GET a"), QueryResult::Value(Some("1".into())));
    }

    #[test]
    fn test_every_mutation_mode() {
        let mut ex = QueryExecutor::new(StoreConfig::new().undo_mode(UndoMode::EveryMutation));
        ex.execute("SET a 1");
        ex.execute("SET a 2");
        assert_eq!(ex.execute("ROLLBACK"), QueryResult::Ok);
        assert_eq!(ex.execute("GET a"), QueryResult::Value(Some("1".into())));
        assert_eq!(ex.execute("COMMIT"), QueryResult::Ok);
        assert_eq!(ex.execute("ROLLBACK"), QueryResult::NoTransaction);
    }
}
