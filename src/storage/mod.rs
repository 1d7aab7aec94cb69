//! Durable storage for registry records
//!
//! The engine consumes storage through the `RegistryStore` trait; the
//! shipped implementation is `SqliteStore`. Batch application is
//! all-or-nothing, which is what lets a merge commit atomically.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{RegistryStore, StorageError, StorageResult, StoreOp};
