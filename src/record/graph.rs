//! RecordGraph: the identifier-indexed result of one load

use super::value::{Record, RecordId};
use std::collections::{BTreeMap, BTreeSet};

/// Classification of a lenient-mode diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A record was skipped: missing identifier, missing required
    /// field, or an unconvertible field value
    SkippedRecord,
    /// The same identifier was defined twice; the later definition won
    DuplicateIdentifier,
    /// A reference carried no extractable target and was left absent
    UnresolvedReference,
}

/// One issue tolerated during a lenient load
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Record the issue was observed on, when attributable
    pub identifier: Option<RecordId>,
    pub detail: String,
}

/// The set of records produced by one load, indexed by identifier.
///
/// Orders iteration by identifier so repeated loads of the same
/// document produce identical output. Ownership of the records
/// transfers to the registry when the graph is merged.
#[derive(Debug, Default)]
pub struct RecordGraph {
    records: BTreeMap<RecordId, Record>,
    /// Identifiers whose defining element appeared in the document, as
    /// opposed to identifiers that were merely referenced
    defined: BTreeSet<RecordId>,
    pub diagnostics: Vec<Diagnostic>,
}

impl RecordGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(
        records: BTreeMap<RecordId, Record>,
        defined: BTreeSet<RecordId>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            records,
            defined,
            diagnostics,
        }
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.contains_key(id)
    }

    /// Whether the document actually defined this identifier
    pub fn is_defined(&self, id: &RecordId) -> bool {
        self.defined.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RecordId, &Record)> {
        self.records.iter()
    }

    /// Identifiers defined by the document, in identifier order
    pub fn defined_ids(&self) -> impl Iterator<Item = &RecordId> {
        self.defined.iter()
    }

    /// Resolve a reference field of a record to its live target within
    /// this graph
    pub fn resolve<'a>(&'a self, record: &Record, field: &str) -> Option<&'a Record> {
        record.reference(field).and_then(|id| self.records.get(id))
    }
}
