//! Common test utilities
//!
//! GML dictionary fixtures modeled on the WGS 84 family of registry
//! records, plus helpers for assembling documents and registries.

#![allow(dead_code)]

use georegistry::{Registry, SqliteStore};

pub const ELLIPSOID_7030: &str = r#"
    <gml:Ellipsoid gml:id="epsg-ellipsoid-7030">
      <gml:identifier codeSpace="OGP">urn:ogc:def:ellipsoid:EPSG::7030</gml:identifier>
      <gml:name>WGS 84</gml:name>
      <gml:remarks>Defining parameters cited in EPSG dataset.</gml:remarks>
      <gml:semiMajorAxis uom="urn:ogc:def:uom:EPSG::9001">6378137.0</gml:semiMajorAxis>
      <gml:secondDefiningParameter>
        <gml:SecondDefiningParameter>
          <gml:inverseFlattening uom="urn:ogc:def:uom:EPSG::9201">298.257223563</gml:inverseFlattening>
        </gml:SecondDefiningParameter>
      </gml:secondDefiningParameter>
    </gml:Ellipsoid>"#;

pub const MERIDIAN_8901: &str = r#"
    <gml:PrimeMeridian gml:id="epsg-meridian-8901">
      <gml:identifier codeSpace="OGP">urn:ogc:def:meridian:EPSG::8901</gml:identifier>
      <gml:name>Greenwich</gml:name>
      <gml:greenwichLongitude uom="urn:ogc:def:uom:EPSG::9102">0</gml:greenwichLongitude>
    </gml:PrimeMeridian>"#;

pub const AREA_1262: &str = r#"
    <gml:AreaOfUse gml:id="epsg-area-1262">
      <gml:identifier codeSpace="OGP">urn:ogc:def:area:EPSG::1262</gml:identifier>
      <gml:name>World</gml:name>
      <gml:description>World.</gml:description>
      <gml:westBoundLongitude>-180</gml:westBoundLongitude>
      <gml:eastBoundLongitude>180</gml:eastBoundLongitude>
      <gml:southBoundLatitude>-90</gml:southBoundLatitude>
      <gml:northBoundLatitude>90</gml:northBoundLatitude>
    </gml:AreaOfUse>"#;

pub const DATUM_6326: &str = r#"
    <gml:GeodeticDatum gml:id="epsg-datum-6326">
      <gml:identifier codeSpace="OGP">urn:ogc:def:datum:EPSG::6326</gml:identifier>
      <gml:name>World Geodetic System 1984</gml:name>
      <epsg:type>geodetic</epsg:type>
      <gml:scope>Satellite navigation.</gml:scope>
      <gml:realizationEpoch>1984-01-01</gml:realizationEpoch>
      <gml:domainOfValidity xlink:href="urn:ogc:def:area:EPSG::1262"/>
      <gml:primeMeridian xlink:href="urn:ogc:def:meridian:EPSG::8901"/>
      <gml:ellipsoid xlink:href="urn:ogc:def:ellipsoid:EPSG::7030"/>
    </gml:GeodeticDatum>"#;

pub const CS_6422: &str = r#"
    <gml:EllipsoidalCS gml:id="epsg-cs-6422">
      <gml:identifier codeSpace="OGP">urn:ogc:def:cs:EPSG::6422</gml:identifier>
      <gml:name>Ellipsoidal 2D CS. Axes: latitude, longitude.</gml:name>
      <epsg:type>ellipsoidal</epsg:type>
      <gml:axis>
        <gml:CoordinateSystemAxis gml:id="epsg-axis-106">
          <gml:identifier codeSpace="OGP">urn:ogc:def:axis:EPSG::106</gml:identifier>
          <gml:axisAbbrev>Lat</gml:axisAbbrev>
          <gml:axisDirection>north</gml:axisDirection>
        </gml:CoordinateSystemAxis>
      </gml:axis>
      <gml:axis>
        <gml:CoordinateSystemAxis gml:id="epsg-axis-107">
          <gml:identifier codeSpace="OGP">urn:ogc:def:axis:EPSG::107</gml:identifier>
          <gml:axisAbbrev>Lon</gml:axisAbbrev>
          <gml:axisDirection>east</gml:axisDirection>
        </gml:CoordinateSystemAxis>
      </gml:axis>
    </gml:EllipsoidalCS>"#;

pub const CRS_4326: &str = r#"
    <gml:GeodeticCRS gml:id="epsg-crs-4326">
      <gml:identifier codeSpace="OGP">urn:ogc:def:crs:EPSG::4326</gml:identifier>
      <gml:name>WGS 84</gml:name>
      <epsg:type>geographic 2D</epsg:type>
      <gml:scope>Horizontal component of 3D system.</gml:scope>
      <gml:domainOfValidity xlink:href="urn:ogc:def:area:EPSG::1262"/>
      <gml:geodeticDatum xlink:href="urn:ogc:def:datum:EPSG::6326"/>
      <gml:ellipsoidalCS xlink:href="urn:ogc:def:cs:EPSG::6422"/>
    </gml:GeodeticCRS>"#;

/// Wrap entries in a dictionary root the way registry exports do
pub fn dictionary(entries: &[&str]) -> String {
    format!(
        "<gml:Dictionary xmlns:gml=\"g\" xmlns:epsg=\"e\" xmlns:xlink=\"x\">{}</gml:Dictionary>",
        entries.join("\n")
    )
}

/// The complete WGS 84 fixture: CRS, datum, ellipsoid, meridian, area,
/// coordinate system, and its two axes. The CRS comes first, so every
/// reference it carries is a forward reference.
pub fn wgs84_dictionary() -> String {
    dictionary(&[
        CRS_4326,
        DATUM_6326,
        ELLIPSOID_7030,
        MERIDIAN_8901,
        AREA_1262,
        CS_6422,
    ])
}

pub fn in_memory_registry() -> Registry<SqliteStore> {
    Registry::new(SqliteStore::open_in_memory().expect("in-memory store"))
}
