//! Registry facade: a mapping-like surface over durable storage
//!
//! Lookups and mutations go straight through to the storage capability
//! with transactional scoping; `sync` composes parse -> load -> merge
//! into the one bulk-update entry point callers normally want.

use crate::loader::{LoadError, Loader, LoadOptions};
use crate::merge::{self, MergeError, MergeOptions, MergeReport};
use crate::record::{Record, RecordGraph, RecordId};
use crate::source::{DocumentSource, FetchError};
use crate::storage::{RegistryStore, StorageError, StoreOp};
use thiserror::Error;
use tracing::info;

/// Errors surfaced by registry operations
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A local mirror of the online registry, addressable by identifier.
///
/// Mutations return explicit results so callers can tell a durable
/// commit from a failure; nothing succeeds silently in memory only.
pub struct Registry<S: RegistryStore> {
    store: S,
}

impl<S: RegistryStore> Registry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Retrieve a record by its identifier
    pub fn get(&self, id: &RecordId) -> Result<Option<Record>, RegistryError> {
        Ok(self.store.get(id)?)
    }

    pub fn contains(&self, id: &RecordId) -> Result<bool, RegistryError> {
        Ok(self.store.get(id)?.is_some())
    }

    /// Insert or replace a single record, committed atomically
    pub fn set(&self, record: Record) -> Result<(), RegistryError> {
        self.store.apply(&[StoreOp::Upsert(record)])?;
        Ok(())
    }

    /// Delete a record; returns whether it existed. Records leave the
    /// registry only through this explicit path, never implicitly on a
    /// partial merge.
    pub fn remove(&self, id: &RecordId) -> Result<bool, RegistryError> {
        Ok(self.store.delete(id)?)
    }

    pub fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.store.len()? == 0)
    }

    /// All records in identifier order. Finite; restartable by calling
    /// again.
    pub fn records(&self) -> Result<Vec<Record>, RegistryError> {
        Ok(self.store.all()?)
    }

    /// Merge an already built graph into this registry
    pub fn merge_graph(
        &self,
        graph: &RecordGraph,
        options: &MergeOptions,
    ) -> Result<MergeReport, RegistryError> {
        Ok(merge::merge(&self.store, graph, options)?)
    }

    /// Parse, load, and merge raw export text.
    ///
    /// Graph construction is pure, so a failure at any point before the
    /// final commit leaves the registry exactly as it was.
    pub fn sync(
        &self,
        text: &str,
        load: LoadOptions,
        options: &MergeOptions,
    ) -> Result<MergeReport, RegistryError> {
        let graph = Loader::new(load).load_text(text)?;
        let report = self.merge_graph(&graph, options)?;
        info!(
            inserted = report.inserted.len(),
            updated = report.updated.len(),
            unchanged = report.unchanged.len(),
            removed = report.removed.len(),
            diagnostics = graph.diagnostics.len(),
            "registry synchronized"
        );
        Ok(report)
    }

    /// Fetch a document from a source and sync it
    pub fn sync_from(
        &self,
        source: &dyn DocumentSource,
        load: LoadOptions,
        options: &MergeOptions,
    ) -> Result<MergeReport, RegistryError> {
        let text = source.fetch_document()?;
        self.sync(&text, load, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordKind;
    use crate::record::FieldValue;
    use crate::storage::SqliteStore;

    const DOC: &str = r#"
        <gml:Dictionary xmlns:gml="g" xmlns:xlink="x">
          <gml:Ellipsoid gml:id="e">
            <gml:identifier>urn:ogc:def:ellipsoid:EPSG::7030</gml:identifier>
            <gml:name>WGS 84</gml:name>
            <gml:semiMajorAxis>6378137.0</gml:semiMajorAxis>
          </gml:Ellipsoid>
        </gml:Dictionary>"#;

    fn registry() -> Registry<SqliteStore> {
        Registry::new(SqliteStore::open_in_memory().unwrap())
    }

    #[test]
    fn sync_populates_an_empty_registry() {
        let registry = registry();
        let report = registry
            .sync(DOC, LoadOptions::new(), &MergeOptions::new())
            .unwrap();

        assert_eq!(report.inserted.len(), 1);
        assert_eq!(registry.len().unwrap(), 1);

        let ellipsoid = registry
            .get(&RecordId::from("urn:ogc:def:ellipsoid:EPSG::7030"))
            .unwrap()
            .unwrap();
        assert_eq!(ellipsoid.name.as_deref(), Some("WGS 84"));
    }

    #[test]
    fn malformed_input_leaves_the_registry_unchanged() {
        let registry = registry();
        registry
            .sync(DOC, LoadOptions::new(), &MergeOptions::new())
            .unwrap();

        let err = registry
            .sync(
                "<gml:Dictionary><gml:Ellipsoid>",
                LoadOptions::new(),
                &MergeOptions::new(),
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::Load(LoadError::Malformed(_))));

        // prior state intact
        assert_eq!(registry.len().unwrap(), 1);
        assert!(registry
            .contains(&RecordId::from("urn:ogc:def:ellipsoid:EPSG::7030"))
            .unwrap());
    }

    #[test]
    fn set_and_remove_are_explicit() {
        let registry = registry();
        let mut record = Record::placeholder(
            RecordId::from("urn:ogc:def:meridian:EPSG::8901"),
            RecordKind::PrimeMeridian,
        );
        record.name = Some("Greenwich".to_string());
        record
            .fields
            .insert("greenwichLongitude".to_string(), FieldValue::Number(0.0));
        record.populated = true;

        registry.set(record.clone()).unwrap();
        assert!(registry.contains(&record.id).unwrap());

        assert!(registry.remove(&record.id).unwrap());
        assert!(!registry.remove(&record.id).unwrap());
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn records_iteration_is_restartable() {
        let registry = registry();
        registry
            .sync(DOC, LoadOptions::new(), &MergeOptions::new())
            .unwrap();

        let first = registry.records().unwrap();
        let second = registry.records().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0], second[0]);
    }

    #[test]
    fn sync_from_reads_through_a_document_source() {
        use crate::source::FileSource;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{DOC}").unwrap();

        let registry = registry();
        let report = registry
            .sync_from(
                &FileSource::new(file.path()),
                LoadOptions::new(),
                &MergeOptions::new(),
            )
            .unwrap();
        assert_eq!(report.inserted.len(), 1);
    }
}
