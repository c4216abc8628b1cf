//! Command execution for nestkv.
//!
//! Turns parsed commands into store calls and their results into the
//! protocol's textual replies.

mod executor;
mod result;

pub use executor::QueryExecutor;
pub use result::{QueryResult, NO_TRANSACTION, NULL_MARKER, UNKNOWN_COMMAND};
