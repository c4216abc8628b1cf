//! Transaction control for nestkv.
//!
//! Transactions are undo scopes, not isolation scopes: there is exactly one
//! session, and a transaction level is simply a saved copy of the store that
//! `ROLLBACK` can return to.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   TransactionStack<S>                       │
//! │     (LIFO of Snapshot<S>, one per open level)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!        ┌─────────────────────┼─────────────────────┐
//!        │                     │                     │
//!        ▼                     ▼                     ▼
//!  ┌─────────────┐       ┌─────────────┐       ┌─────────────┐
//!  │  Snapshot   │       │ Transaction │       │  UndoMode   │
//!  │  (state S)  │       │   Level     │       │             │
//!  └─────────────┘       └─────────────┘       └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use nestkv::transaction::{LevelOrigin, TransactionStack};
//!
//! let mut stack = TransactionStack::new();
//! stack.push(vec![1, 2, 3], LevelOrigin::Begin);
//! assert_eq!(stack.depth(), 1);
//!
//! let restored = stack.pop().unwrap();
//! assert_eq!(restored.state, vec![1, 2, 3]);
//! assert!(stack.pop().is_err());
//! ```

mod error;
mod level;
mod stack;
mod undo;

pub use error::{TransactionError, TransactionResult};
pub use level::{LevelOrigin, TransactionLevel};
pub use stack::{Snapshot, TransactionStack};
pub use undo::UndoMode;
