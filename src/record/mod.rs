//! Typed record model and the identifier-indexed graph

mod graph;
mod value;

pub use graph::{Diagnostic, DiagnosticKind, RecordGraph};
pub use value::{EmbeddedRecord, FieldValue, Record, RecordId};
