//! High-level Database API and REPL interface.
//!
//! This module provides a clean, user-facing API for the store
//! and an interactive command-line interface.

mod api;
mod repl;

pub use api::{Database, DatabaseConfig, DatabaseError, DatabaseResult};
pub use repl::{Repl, ReplConfig, SessionEnd};
