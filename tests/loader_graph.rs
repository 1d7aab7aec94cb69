//! End-to-end graph construction from a realistic dictionary export
//!
//! Loads the WGS 84 record family and checks that identity, reference
//! resolution, and diagnostics behave across record kinds, not just on
//! single elements.

mod common;

use common::{dictionary, wgs84_dictionary, CRS_4326, DATUM_6326};
use georegistry::{LoadOptions, Loader, RecordId, RecordKind};

#[test]
fn full_dictionary_loads_strictly() {
    let graph = Loader::new(LoadOptions::new().strict())
        .load_text(&wgs84_dictionary())
        .unwrap();

    // 6 top-level entries plus 2 axes nested in the coordinate system
    assert_eq!(graph.len(), 8);
    assert!(graph.diagnostics.is_empty());
    for (_, record) in graph.iter() {
        assert!(record.populated, "{} left unpopulated", record.id);
    }
}

#[test]
fn reference_chain_resolves_across_forward_references() {
    // the CRS is first in the document, so everything it points at is
    // defined after it
    let graph = Loader::new(LoadOptions::new().strict())
        .load_text(&wgs84_dictionary())
        .unwrap();

    let crs = graph
        .get(&RecordId::from("urn:ogc:def:crs:EPSG::4326"))
        .unwrap();
    assert_eq!(crs.kind, RecordKind::GeodeticCrs);

    let datum = graph.resolve(crs, "geodeticDatum").unwrap();
    assert_eq!(datum.name.as_deref(), Some("World Geodetic System 1984"));

    let ellipsoid = graph.resolve(datum, "ellipsoid").unwrap();
    assert_eq!(ellipsoid.number("semiMajorAxis"), Some(6378137.0));

    let meridian = graph.resolve(datum, "primeMeridian").unwrap();
    assert_eq!(meridian.number("greenwichLongitude"), Some(0.0));

    let cs = graph.resolve(crs, "ellipsoidalCS").unwrap();
    let axes = cs.references("axis").unwrap();
    assert_eq!(axes.len(), 2);
    assert_eq!(graph.get(&axes[0]).unwrap().text("axisAbbrev"), Some("Lat"));
}

#[test]
fn shared_targets_are_one_instance() {
    // the datum and the CRS both point at area 1262
    let graph = Loader::new(LoadOptions::new().strict())
        .load_text(&wgs84_dictionary())
        .unwrap();

    let crs = graph
        .get(&RecordId::from("urn:ogc:def:crs:EPSG::4326"))
        .unwrap();
    let datum = graph.resolve(crs, "geodeticDatum").unwrap();

    let from_crs = crs.reference("domainOfValidity").unwrap();
    let from_datum = datum.reference("domainOfValidity").unwrap();
    assert_eq!(from_crs, from_datum);
    assert_eq!(
        graph.get(from_crs).unwrap().text("description"),
        Some("World.")
    );
}

#[test]
fn partial_export_leaves_placeholders_undefined() {
    let graph = Loader::new(LoadOptions::new())
        .load_text(&dictionary(&[CRS_4326, DATUM_6326]))
        .unwrap();

    // defined: the two entries; placeholders: area, meridian,
    // ellipsoid, coordinate system
    assert_eq!(graph.defined_ids().count(), 2);
    assert_eq!(graph.len(), 6);

    let ellipsoid = graph
        .get(&RecordId::from("urn:ogc:def:ellipsoid:EPSG::7030"))
        .unwrap();
    assert!(!ellipsoid.populated);
}
