//! The in-memory key-value store.
//!
//! [`TransactionalStore`] owns a key→value mapping, a value→count
//! [`ValueIndex`] and a stack of snapshots for nested transactions. Every
//! public operation leaves the index exactly matching the mapping.

mod index;
mod state;
mod store;

pub use index::ValueIndex;
pub use state::StoreState;
pub use store::{StoreConfig, StoreStats, TransactionalStore};
