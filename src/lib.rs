//! Georegistry: a local mirror of the EPSG geodetic parameter registry
//!
//! Parses GML dictionary exports of the registry into a typed record
//! graph and keeps a durable, queryable copy in sync with it.
//!
//! # Core Concepts
//!
//! - **Records**: CRSs, datums, ellipsoids and the rest of the geodetic
//!   vocabulary, addressed by their URN identifiers
//! - **Record graph**: an in-memory snapshot where every identifier
//!   resolves to exactly one record, even across forward references
//! - **Merge**: diff-based reconciliation of a graph into storage, so
//!   repeated syncs are idempotent and failures leave no partial state
//!
//! # Example
//!
//! ```no_run
//! use georegistry::{LoadOptions, MergeOptions, Registry, SqliteStore};
//!
//! # fn main() -> Result<(), georegistry::RegistryError> {
//! let registry = Registry::new(SqliteStore::open("registry.db")?);
//! let report = registry.sync(
//!     &std::fs::read_to_string("export.gml").unwrap(),
//!     LoadOptions::new(),
//!     &MergeOptions::new(),
//! )?;
//! println!("{} records inserted", report.inserted.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod document;
pub mod loader;
pub mod merge;
pub mod record;
pub mod registry;
pub mod source;
pub mod storage;

pub use catalog::RecordKind;
pub use document::{parse_document, Element, ParseError};
pub use loader::{LoadError, LoadOptions, Loader};
pub use merge::{ConflictPolicy, MergeError, MergeOptions, MergeReport};
pub use record::{Diagnostic, DiagnosticKind, FieldValue, Record, RecordGraph, RecordId};
pub use registry::{Registry, RegistryError};
pub use source::{DocumentSource, FetchError, FileSource};
pub use storage::{RegistryStore, SqliteStore, StorageError, StorageResult, StoreOp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
