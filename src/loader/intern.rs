//! Identity cache: one canonical record instance per identifier

use crate::catalog::RecordKind;
use crate::record::{Diagnostic, Record, RecordGraph, RecordId};
use std::collections::{BTreeMap, BTreeSet};

/// Injective identifier -> record mapping scoped to one load.
///
/// `intern` is idempotent per identifier: the first call creates an
/// unpopulated placeholder, every later call returns the same entry.
/// This is what makes forward references work: a reference field can
/// intern its target before the target's defining element has been
/// visited.
#[derive(Debug, Default)]
pub struct IdentityCache {
    records: BTreeMap<RecordId, Record>,
    defined: BTreeSet<RecordId>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record for this identifier, creating a placeholder of
    /// the given kind if it has not been seen yet.
    ///
    /// The kind passed by a reference site is only a hint derived from
    /// the identifier; the defining element overrides it in `define`.
    pub fn intern(&mut self, id: &RecordId, kind: RecordKind) -> &mut Record {
        self.records
            .entry(id.clone())
            .or_insert_with(|| Record::placeholder(id.clone(), kind))
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    /// Whether a defining element has already been seen for this
    /// identifier during the current load
    pub fn is_defined(&self, id: &RecordId) -> bool {
        self.defined.contains(id)
    }

    /// Install a fully built record, replacing any placeholder (or, in
    /// lenient mode, an earlier definition) wholesale.
    pub fn define(&mut self, record: Record) {
        self.defined.insert(record.id.clone());
        self.records.insert(record.id.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finish the load, transferring ownership of every record to the
    /// resulting graph
    pub fn into_graph(self, diagnostics: Vec<Diagnostic>) -> RecordGraph {
        RecordGraph::from_parts(self.records, self.defined, diagnostics)
    }
}
