//! Depth-first document walk producing a linked record graph

use super::intern::IdentityCache;
use crate::catalog::{describe, FieldDescriptor, FieldKind, RecordKind, ScalarKind, TypeDescriptor};
use crate::document::{parse_document, Element, ParseError};
use crate::record::{
    Diagnostic, DiagnosticKind, EmbeddedRecord, FieldValue, Record, RecordGraph, RecordId,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while building a record graph
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Malformed document: {0}")]
    Malformed(#[from] ParseError),

    #[error("Element <{tag}> carries no identifier")]
    MissingIdentifier { tag: String },

    #[error("{identifier}: required field `{field}` is missing")]
    SchemaViolation { identifier: RecordId, field: String },

    #[error("{identifier}: field `{field}` has unconvertible value `{value}`")]
    FieldConversion {
        identifier: RecordId,
        field: String,
        value: String,
    },

    #[error("{identifier}: field `{field}` references no resolvable target")]
    UnresolvedReference { identifier: RecordId, field: String },

    #[error("Identifier {0} is defined more than once")]
    DuplicateIdentifier(RecordId),
}

/// Load behavior toggles
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Strict mode aborts the whole load on schema violations,
    /// conversion failures, duplicate identifiers, and unresolvable
    /// references. Lenient mode (the default) skips the offending
    /// record or field and records a diagnostic.
    pub strict: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }
}

/// Builds one `RecordGraph` from a parsed export.
///
/// The walk is depth-first in document order, which makes diagnostics
/// and graph iteration reproducible. Order does not affect correctness:
/// interning is idempotent, so a record referenced before its defining
/// element resolves to the same instance either way.
pub struct Loader {
    options: LoadOptions,
    cache: IdentityCache,
    diagnostics: Vec<Diagnostic>,
}

impl Loader {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            cache: IdentityCache::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Parse and load raw export text in one step
    pub fn load_text(self, text: &str) -> Result<RecordGraph, LoadError> {
        let root = parse_document(text)?;
        self.load(&root)
    }

    /// Build the graph from an already parsed element tree
    pub fn load(mut self, root: &Element) -> Result<RecordGraph, LoadError> {
        self.visit(root)?;
        debug!(
            records = self.cache.len(),
            diagnostics = self.diagnostics.len(),
            "load complete"
        );
        Ok(self.cache.into_graph(self.diagnostics))
    }

    fn visit(&mut self, element: &Element) -> Result<(), LoadError> {
        match describe(&element.tag) {
            Some(descriptor) => self.build_record(element, descriptor)?,
            // outside the modeled subset of the registry schema
            None => debug!(tag = %element.tag, "skipping unmodeled element"),
        }
        for child in &element.children {
            self.visit(child)?;
        }
        Ok(())
    }

    fn build_record(
        &mut self,
        element: &Element,
        descriptor: &'static TypeDescriptor,
    ) -> Result<(), LoadError> {
        let id = match element.child_text("identifier") {
            Some(text) => RecordId::new(text),
            None => {
                let err = LoadError::MissingIdentifier {
                    tag: element.tag.clone(),
                };
                if self.options.strict {
                    return Err(err);
                }
                warn!(%err, "skipping record");
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::SkippedRecord,
                    identifier: None,
                    detail: err.to_string(),
                });
                return Ok(());
            }
        };

        if self.cache.is_defined(&id) {
            if self.options.strict {
                return Err(LoadError::DuplicateIdentifier(id));
            }
            warn!(identifier = %id, "identifier redefined, last definition wins");
            self.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::DuplicateIdentifier,
                identifier: Some(id.clone()),
                detail: format!("{id} is defined more than once"),
            });
        }

        match self.try_build(element, descriptor, &id) {
            Ok(record) => {
                self.cache.define(record);
                Ok(())
            }
            Err(err) if self.options.strict => Err(err),
            Err(err) => {
                warn!(%err, "skipping record");
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::SkippedRecord,
                    identifier: Some(id),
                    detail: err.to_string(),
                });
                Ok(())
            }
        }
    }

    /// Assemble a fresh record for a defining element. A later
    /// definition of the same identifier replaces the earlier one
    /// wholesale, which gives last-write-wins for scalars and whole
    /// replacement for embedded sub-records.
    fn try_build(
        &mut self,
        element: &Element,
        descriptor: &'static TypeDescriptor,
        id: &RecordId,
    ) -> Result<Record, LoadError> {
        let name = element.child_text("name").map(str::to_string);
        if descriptor.name_required && name.is_none() {
            return Err(LoadError::SchemaViolation {
                identifier: id.clone(),
                field: "name".to_string(),
            });
        }

        let mut fields = BTreeMap::new();
        for field in descriptor.fields {
            match field.kind {
                FieldKind::Scalar(scalar) => {
                    if let Some(raw) = element.child_text(field.name) {
                        let value = self.convert_scalar(id, field.name, scalar, raw)?;
                        fields.insert(field.name.to_string(), value);
                    }
                }
                FieldKind::Embedded(vocabulary) => {
                    if let Some(child) = element.child(field.name) {
                        let embedded = self.build_embedded(id, vocabulary, child)?;
                        fields.insert(field.name.to_string(), FieldValue::Embedded(embedded));
                    }
                }
                FieldKind::Reference => {
                    if let Some(child) = element.child(field.name) {
                        if let Some(target) = self.reference_target(id, field.name, child)? {
                            fields.insert(field.name.to_string(), FieldValue::Reference(target));
                        }
                    }
                }
                FieldKind::ReferenceList => {
                    let mut targets = Vec::new();
                    for child in element.children_named(field.name) {
                        if let Some(target) = self.reference_target(id, field.name, child)? {
                            targets.push(target);
                        }
                    }
                    if !targets.is_empty() {
                        fields.insert(field.name.to_string(), FieldValue::References(targets));
                    }
                }
            }

            if field.required && !fields.contains_key(field.name) {
                return Err(LoadError::SchemaViolation {
                    identifier: id.clone(),
                    field: field.name.to_string(),
                });
            }
        }

        Ok(Record {
            id: id.clone(),
            kind: descriptor.kind,
            name,
            fields,
            populated: true,
        })
    }

    fn convert_scalar(
        &self,
        id: &RecordId,
        field: &str,
        kind: ScalarKind,
        raw: &str,
    ) -> Result<FieldValue, LoadError> {
        let conversion_error = || LoadError::FieldConversion {
            identifier: id.clone(),
            field: field.to_string(),
            value: raw.to_string(),
        };
        match kind {
            ScalarKind::Text => Ok(FieldValue::Text(raw.to_string())),
            ScalarKind::Number => raw
                .trim()
                .parse::<f64>()
                .map(FieldValue::Number)
                .map_err(|_| conversion_error()),
            ScalarKind::Date => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| conversion_error()),
        }
    }

    fn build_embedded(
        &self,
        id: &RecordId,
        vocabulary: &'static [FieldDescriptor],
        element: &Element,
    ) -> Result<EmbeddedRecord, LoadError> {
        // the field element usually wraps a single container element
        // carrying the actual scalars
        let tag = match element.children.as_slice() {
            [container] => container.tag.clone(),
            _ => element.tag.clone(),
        };

        let mut fields = BTreeMap::new();
        for inner in vocabulary {
            let scalar = match inner.kind {
                FieldKind::Scalar(scalar) => scalar,
                // embedded records are anonymous scalar bags; they
                // never nest further or reference other records
                _ => continue,
            };
            if let Some(raw) = element.descendant_text(inner.name) {
                let value = self.convert_scalar(id, inner.name, scalar, raw)?;
                fields.insert(inner.name.to_string(), value);
            }
        }

        Ok(EmbeddedRecord { tag, fields })
    }

    /// Extract a reference field's target identifier and intern it.
    ///
    /// The target may be given as a reference attribute (a URN, or a
    /// `#fragment` form) or as a nested definition carrying its own
    /// identifier. Interning the target before it is populated is the
    /// forward-reference mechanism.
    fn reference_target(
        &mut self,
        id: &RecordId,
        field: &str,
        child: &Element,
    ) -> Result<Option<RecordId>, LoadError> {
        let target = child
            .href()
            .map(RecordId::from_href)
            .or_else(|| child.descendant_text("identifier").map(RecordId::new));

        match target {
            Some(target) => {
                self.cache.intern(&target, kind_hint(&target));
                Ok(Some(target))
            }
            None if self.options.strict => Err(LoadError::UnresolvedReference {
                identifier: id.clone(),
                field: field.to_string(),
            }),
            None => {
                self.diagnostics.push(Diagnostic {
                    kind: DiagnosticKind::UnresolvedReference,
                    identifier: Some(id.clone()),
                    detail: format!("field `{field}` references no resolvable target"),
                });
                Ok(None)
            }
        }
    }
}

/// Best-effort kind for a placeholder interned via a reference, from
/// the object-type segment of a `urn:ogc:def:<type>:...` identifier.
/// The defining element overrides it, and unpopulated placeholders are
/// never written to the registry.
fn kind_hint(id: &RecordId) -> RecordKind {
    match id.as_str().split(':').nth(3).unwrap_or("") {
        "ellipsoid" => RecordKind::Ellipsoid,
        "meridian" => RecordKind::PrimeMeridian,
        "datum" => RecordKind::GeodeticDatum,
        "area" => RecordKind::AreaOfUse,
        "cs" => RecordKind::EllipsoidalCs,
        "axis" => RecordKind::CoordinateSystemAxis,
        "axis-name" => RecordKind::AxisName,
        _ => RecordKind::GeodeticCrs,
    }
}
