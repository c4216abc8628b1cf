//! Database API - high-level interface for nestkv.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{debug, info};

use crate::command::{Command, ParseError, Parser};
use crate::executor::{QueryExecutor, QueryResult};
use crate::store::{StoreConfig, StoreStats, TransactionalStore};
use crate::transaction::{TransactionError, TransactionLevel, UndoMode};

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Database configuration options.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    /// When the store records undo points.
    pub undo_mode: UndoMode,
    /// Log every command and its result.
    pub verbose: bool,
}

impl DatabaseConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the undo mode.
    pub fn undo_mode(mut self, mode: UndoMode) -> Self {
        self.undo_mode = mode;
        self
    }

    /// Set verbose flag.
    pub fn verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    fn store_config(&self) -> StoreConfig {
        StoreConfig::new().undo_mode(self.undo_mode)
    }
}

/// The main database handle.
#[derive(Debug)]
pub struct Database {
    config: DatabaseConfig,
    executor: QueryExecutor,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    /// Create an empty database with default configuration.
    pub fn new() -> Self {
        Self::with_config(DatabaseConfig::default())
    }

    /// Create an empty database with custom configuration.
    pub fn with_config(config: DatabaseConfig) -> Self {
        info!(undo_mode = %config.undo_mode, "database opened");
        let executor = QueryExecutor::new(config.store_config());
        Self { config, executor }
    }

    /// Execute one protocol line.
    pub fn execute(&mut self, line: &str) -> QueryResult {
        let result = self.executor.execute(line);
        if self.config.verbose || result.is_diagnostic() {
            debug!(line, ?result, "executed");
        }
        result
    }

    /// Execute newline-separated protocol lines.
    ///
    /// Stops after an `END` line; the `End` result is included.
    pub fn execute_batch(&mut self, script: &str) -> Vec<QueryResult> {
        let mut results = Vec::new();
        for line in script.lines() {
            let result = self.execute(line);
            let end = result.is_end();
            results.push(result);
            if end {
                break;
            }
        }
        results
    }

    /// Run every line from `input`, writing replies to `output`.
    ///
    /// Returns `true` if the script ended with an `END` command rather than
    /// running out of input.
    pub fn run_script<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> DatabaseResult<bool> {
        for line in input.lines() {
            let result = self.execute(&line?);
            if result.is_end() {
                return Ok(true);
            }
            if let Some(text) = result.render() {
                writeln!(output, "{}", text)?;
            }
        }
        Ok(false)
    }

    /// Parse a line without executing it.
    pub fn parse(&self, line: &str) -> DatabaseResult<Option<Command>> {
        Ok(Parser::parse(line)?)
    }

    /// Run `f` inside a new transaction level.
    ///
    /// If `f` fails, every level opened since the call (including undo
    /// points recorded by its mutations) is rolled back and `f`'s error is
    /// returned. On success the store is committed, which flattens every
    /// open level, not just this one.
    pub fn transaction<F, T>(&mut self, f: F) -> DatabaseResult<T>
    where
        F: FnOnce(&mut Self) -> DatabaseResult<T>,
    {
        let base = self.executor.store().depth();
        self.executor.store_mut().begin();
        match f(self) {
            Ok(value) => {
                self.executor.store_mut().commit()?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = self.executor.store_mut().rollback_to(base) {
                    debug!(%rollback_err, "transaction level already closed");
                }
                Err(e)
            }
        }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &TransactionalStore {
        self.executor.store()
    }

    /// Get database statistics.
    pub fn stats(&self) -> StoreStats {
        self.store().stats()
    }

    /// Open transaction levels, outermost first.
    pub fn levels(&self) -> Vec<TransactionLevel> {
        self.store().levels().cloned().collect()
    }

    /// Statistics as pretty-printed JSON.
    pub fn stats_json(&self) -> DatabaseResult<String> {
        Ok(serde_json::to_string_pretty(&self.stats())?)
    }

    /// Open transaction levels as pretty-printed JSON.
    pub fn levels_json(&self) -> DatabaseResult<String> {
        Ok(serde_json::to_string_pretty(&self.levels())?)
    }

    /// Current contents as pretty-printed JSON, keys sorted.
    pub fn dump_json(&self) -> DatabaseResult<String> {
        Ok(serde_json::to_string_pretty(&self.store().entries())?)
    }
}
