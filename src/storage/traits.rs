//! Storage trait definitions

use crate::record::{Record, RecordId};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown record kind in store: {0}")]
    UnknownKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A write the backend refused for reasons other than the above;
    /// surfaced to the caller, never retried silently
    #[error("Write rejected: {0}")]
    Rejected(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// One mutation within an atomic batch
#[derive(Debug, Clone)]
pub enum StoreOp {
    Upsert(Record),
    Delete(RecordId),
}

/// Trait for registry storage backends
///
/// Implementations must be thread-safe (Send + Sync). `apply` is the
/// transaction boundary: either every operation in the batch becomes
/// durable or none does.
pub trait RegistryStore: Send + Sync {
    /// Look up a record by identifier
    fn get(&self, id: &RecordId) -> StorageResult<Option<Record>>;

    /// Insert or update a single record
    fn upsert(&self, record: &Record) -> StorageResult<()>;

    /// Delete a record; returns whether it existed
    fn delete(&self, id: &RecordId) -> StorageResult<bool>;

    /// All records, ordered by identifier
    fn all(&self) -> StorageResult<Vec<Record>>;

    /// Number of stored records
    fn len(&self) -> StorageResult<usize>;

    /// Apply a batch of mutations atomically
    fn apply(&self, batch: &[StoreOp]) -> StorageResult<()>;
}
