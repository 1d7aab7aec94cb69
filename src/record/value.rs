//! Records, identifiers, and field values

use crate::catalog::RecordKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable identifier of one record: a URN-shaped string like
/// `urn:ogc:def:crs:EPSG::4326`.
///
/// Treated as an opaque, comparable, hashable key. Serializes as a
/// plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Extract the target identifier from a reference attribute value.
    ///
    /// Hrefs in the export carry the whole URN; when a `#fragment` form
    /// appears the fragment is the identifier.
    pub fn from_href(href: &str) -> Self {
        match href.rsplit_once('#') {
            Some((_, fragment)) => Self(fragment.to_string()),
            None => Self(href.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An anonymous sub-record owned by a parent field.
///
/// Embedded records carry no identifier; their lifetime is exactly that
/// of the owning field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedRecord {
    /// Local tag name of the embedding element
    pub tag: String,
    pub fields: BTreeMap<String, FieldValue>,
}

/// One field value of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Embedded(EmbeddedRecord),
    /// Non-owning link to another record, resolved against the graph or
    /// registry on demand
    Reference(RecordId),
    References(Vec<RecordId>),
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::Embedded(e) => write!(f, "<{}>", e.tag),
            FieldValue::Reference(id) => write!(f, "{}", id),
            FieldValue::References(ids) => {
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", id)?;
                }
                Ok(())
            }
        }
    }
}

/// One typed registry record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub kind: RecordKind,
    /// Human-readable label; absent on placeholders
    pub name: Option<String>,
    pub fields: BTreeMap<String, FieldValue>,
    /// False while the record has only been interned via a reference
    /// and its defining element has not been visited
    pub populated: bool,
}

impl Record {
    /// Create an unpopulated placeholder for an interned identifier
    pub fn placeholder(id: RecordId, kind: RecordKind) -> Self {
        Self {
            id,
            kind,
            name: None,
            fields: BTreeMap::new(),
            populated: false,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        match self.fields.get(name) {
            Some(FieldValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        match self.fields.get(name) {
            Some(FieldValue::Date(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn embedded(&self, name: &str) -> Option<&EmbeddedRecord> {
        match self.fields.get(name) {
            Some(FieldValue::Embedded(e)) => Some(e),
            _ => None,
        }
    }

    /// Identifier a reference field points at, if the field is set
    pub fn reference(&self, name: &str) -> Option<&RecordId> {
        match self.fields.get(name) {
            Some(FieldValue::Reference(id)) => Some(id),
            _ => None,
        }
    }

    pub fn references(&self, name: &str) -> Option<&[RecordId]> {
        match self.fields.get(name) {
            Some(FieldValue::References(ids)) => Some(ids),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_extraction_takes_fragment_suffix() {
        assert_eq!(
            RecordId::from_href("urn:ogc:def:ellipsoid:EPSG::7030").as_str(),
            "urn:ogc:def:ellipsoid:EPSG::7030"
        );
        assert_eq!(
            RecordId::from_href("GmlDictionary.xml#epsg-ellipsoid-7030").as_str(),
            "epsg-ellipsoid-7030"
        );
    }

    #[test]
    fn placeholder_is_unpopulated_and_empty() {
        let record = Record::placeholder(
            RecordId::from("urn:ogc:def:datum:EPSG::6326"),
            RecordKind::GeodeticDatum,
        );
        assert!(!record.populated);
        assert!(record.name.is_none());
        assert!(record.fields.is_empty());
    }

    #[test]
    fn typed_accessors_reject_mismatched_variants() {
        let mut record = Record::placeholder(
            RecordId::from("urn:ogc:def:ellipsoid:EPSG::7030"),
            RecordKind::Ellipsoid,
        );
        record
            .fields
            .insert("semiMajorAxis".to_string(), FieldValue::Number(6378137.0));
        assert_eq!(record.number("semiMajorAxis"), Some(6378137.0));
        assert_eq!(record.text("semiMajorAxis"), None);
        assert_eq!(record.reference("semiMajorAxis"), None);
    }

    #[test]
    fn records_serialize_round_trip() {
        let mut record = Record::placeholder(
            RecordId::from("urn:ogc:def:ellipsoid:EPSG::7030"),
            RecordKind::Ellipsoid,
        );
        record.name = Some("WGS 84".to_string());
        record
            .fields
            .insert("semiMajorAxis".to_string(), FieldValue::Number(6378137.0));
        record.fields.insert(
            "primeMeridian".to_string(),
            FieldValue::Reference(RecordId::from("urn:ogc:def:meridian:EPSG::8901")),
        );
        record.populated = true;

        let json = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
