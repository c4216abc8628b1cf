//! nestkv - an in-memory key-value store with nested transactions.
//!
//! The store keeps a key→value mapping alongside a value→count reverse
//! index, so `COUNTS` is a constant-time lookup. Transactions nest: every
//! `BEGIN` pushes a full snapshot, `ROLLBACK` pops one level and `COMMIT`
//! flattens all of them into the base state.
//!
//! # Example
//!
//! ```
//! use nestkv::db::Database;
//!
//! let mut db = Database::new();
//! db.execute("SET a 10");
//! db.execute("BEGIN");
//! db.execute("SET a 20");
//! assert_eq!(db.execute("COUNTS 20").render().as_deref(), Some("1"));
//! db.execute("ROLLBACK");
//! assert_eq!(db.execute("GET a").render().as_deref(), Some("10"));
//! ```

pub mod command;
pub mod db;
pub mod executor;
pub mod store;
pub mod transaction;
