//! Static record-type descriptors for the modeled registry vocabulary

use serde::{Deserialize, Serialize};

/// The closed set of record kinds mirrored from the registry schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Ellipsoid,
    PrimeMeridian,
    AreaOfUse,
    GeodeticDatum,
    VerticalDatum,
    EngineeringDatum,
    EllipsoidalCs,
    CartesianCs,
    VerticalCs,
    SphericalCs,
    CoordinateSystemAxis,
    AxisName,
    GeodeticCrs,
    ProjectedCrs,
    VerticalCrs,
    EngineeringCrs,
    CompoundCrs,
}

impl RecordKind {
    /// Element tag name this kind is defined by
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Ellipsoid => "Ellipsoid",
            RecordKind::PrimeMeridian => "PrimeMeridian",
            RecordKind::AreaOfUse => "AreaOfUse",
            RecordKind::GeodeticDatum => "GeodeticDatum",
            RecordKind::VerticalDatum => "VerticalDatum",
            RecordKind::EngineeringDatum => "EngineeringDatum",
            RecordKind::EllipsoidalCs => "EllipsoidalCS",
            RecordKind::CartesianCs => "CartesianCS",
            RecordKind::VerticalCs => "VerticalCS",
            RecordKind::SphericalCs => "SphericalCS",
            RecordKind::CoordinateSystemAxis => "CoordinateSystemAxis",
            RecordKind::AxisName => "AxisName",
            RecordKind::GeodeticCrs => "GeodeticCRS",
            RecordKind::ProjectedCrs => "ProjectedCRS",
            RecordKind::VerticalCrs => "VerticalCRS",
            RecordKind::EngineeringCrs => "EngineeringCRS",
            RecordKind::CompoundCrs => "CompoundCRS",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar conversion applied to a field's text content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Text,
    Number,
    Date,
}

/// How a field is populated from its element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text content converted per the scalar kind
    Scalar(ScalarKind),
    /// Anonymous sub-record owned by the parent field, with its own
    /// scalar vocabulary
    Embedded(&'static [FieldDescriptor]),
    /// Identifier of another record, taken from the reference attribute
    /// or a nested identifier
    Reference,
    /// Repeated reference children (coordinate-system axes, compound
    /// CRS components)
    ReferenceList,
}

/// One named field of a record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field key; also the local tag name of the child element
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Per-kind descriptor: the ordered field list plus name policy
#[derive(Debug, Clone, Copy)]
pub struct TypeDescriptor {
    pub kind: RecordKind,
    /// Whether the `name` child is mandatory for this kind
    pub name_required: bool,
    pub fields: &'static [FieldDescriptor],
}

const fn scalar(name: &'static str, kind: ScalarKind, required: bool) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Scalar(kind),
        required,
    }
}

const fn reference(name: &'static str, required: bool) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::Reference,
        required,
    }
}

const fn reference_list(name: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        name,
        kind: FieldKind::ReferenceList,
        required: false,
    }
}

// Fields shared by every dictionary entry in the source schema
const REMARKS: FieldDescriptor = scalar("remarks", ScalarKind::Text, false);
const INFORMATION_SOURCE: FieldDescriptor = scalar("informationSource", ScalarKind::Text, false);
const ANCHOR_DEFINITION: FieldDescriptor = scalar("anchorDefinition", ScalarKind::Text, false);

/// Vocabulary of the anonymous second-defining-parameter sub-record on
/// an ellipsoid: exactly one of these is present in practice
const SECOND_DEFINING_PARAMETER_FIELDS: &[FieldDescriptor] = &[
    scalar("semiMinorAxis", ScalarKind::Number, false),
    scalar("inverseFlattening", ScalarKind::Number, false),
    scalar("isSphere", ScalarKind::Text, false),
];

const ELLIPSOID_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("semiMajorAxis", ScalarKind::Number, true),
    FieldDescriptor {
        name: "secondDefiningParameter",
        kind: FieldKind::Embedded(SECOND_DEFINING_PARAMETER_FIELDS),
        required: false,
    },
];

const PRIME_MERIDIAN_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("greenwichLongitude", ScalarKind::Number, false),
];

const AREA_OF_USE_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("description", ScalarKind::Text, false),
    scalar("westBoundLongitude", ScalarKind::Number, false),
    scalar("eastBoundLongitude", ScalarKind::Number, false),
    scalar("southBoundLatitude", ScalarKind::Number, false),
    scalar("northBoundLatitude", ScalarKind::Number, false),
];

const GEODETIC_DATUM_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    ANCHOR_DEFINITION,
    scalar("type", ScalarKind::Text, true),
    scalar("scope", ScalarKind::Text, true),
    scalar("realizationEpoch", ScalarKind::Date, false),
    reference("domainOfValidity", false),
    reference("primeMeridian", true),
    reference("ellipsoid", true),
];

const DATUM_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    ANCHOR_DEFINITION,
    scalar("type", ScalarKind::Text, true),
    scalar("scope", ScalarKind::Text, true),
    scalar("realizationEpoch", ScalarKind::Date, false),
    reference("domainOfValidity", false),
];

const COORDINATE_SYSTEM_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("type", ScalarKind::Text, false),
    reference_list("axis"),
];

const AXIS_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    scalar("axisAbbrev", ScalarKind::Text, false),
    scalar("axisDirection", ScalarKind::Text, false),
    reference("descriptionReference", false),
];

const AXIS_NAME_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("description", ScalarKind::Text, false),
];

const GEODETIC_CRS_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("type", ScalarKind::Text, false),
    scalar("scope", ScalarKind::Text, false),
    reference("domainOfValidity", false),
    reference("geodeticDatum", true),
    reference("ellipsoidalCS", true),
];

const PROJECTED_CRS_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("type", ScalarKind::Text, false),
    scalar("scope", ScalarKind::Text, false),
    reference("domainOfValidity", false),
    reference("baseGeodeticCRS", true),
    reference("cartesianCS", true),
];

const VERTICAL_CRS_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("type", ScalarKind::Text, false),
    scalar("scope", ScalarKind::Text, false),
    reference("domainOfValidity", false),
    reference("verticalDatum", true),
    reference("verticalCS", true),
];

const ENGINEERING_CRS_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("type", ScalarKind::Text, false),
    scalar("scope", ScalarKind::Text, false),
    reference("domainOfValidity", false),
    reference("engineeringDatum", true),
    reference("coordinateSystem", true),
];

const COMPOUND_CRS_FIELDS: &[FieldDescriptor] = &[
    REMARKS,
    INFORMATION_SOURCE,
    scalar("type", ScalarKind::Text, false),
    scalar("scope", ScalarKind::Text, false),
    reference("domainOfValidity", false),
    reference_list("componentReferenceSystem"),
];

const fn descriptor(
    kind: RecordKind,
    name_required: bool,
    fields: &'static [FieldDescriptor],
) -> TypeDescriptor {
    TypeDescriptor {
        kind,
        name_required,
        fields,
    }
}

/// Look up the descriptor for an element's local tag name.
///
/// `None` means the tag falls outside the modeled subset of the
/// registry schema and the element should be skipped.
pub fn describe(tag: &str) -> Option<&'static TypeDescriptor> {
    static ELLIPSOID: TypeDescriptor = descriptor(RecordKind::Ellipsoid, true, ELLIPSOID_FIELDS);
    static PRIME_MERIDIAN: TypeDescriptor =
        descriptor(RecordKind::PrimeMeridian, true, PRIME_MERIDIAN_FIELDS);
    static AREA_OF_USE: TypeDescriptor =
        descriptor(RecordKind::AreaOfUse, true, AREA_OF_USE_FIELDS);
    static GEODETIC_DATUM: TypeDescriptor =
        descriptor(RecordKind::GeodeticDatum, true, GEODETIC_DATUM_FIELDS);
    static VERTICAL_DATUM: TypeDescriptor =
        descriptor(RecordKind::VerticalDatum, true, DATUM_FIELDS);
    static ENGINEERING_DATUM: TypeDescriptor =
        descriptor(RecordKind::EngineeringDatum, true, DATUM_FIELDS);
    static ELLIPSOIDAL_CS: TypeDescriptor =
        descriptor(RecordKind::EllipsoidalCs, true, COORDINATE_SYSTEM_FIELDS);
    static CARTESIAN_CS: TypeDescriptor =
        descriptor(RecordKind::CartesianCs, true, COORDINATE_SYSTEM_FIELDS);
    static VERTICAL_CS: TypeDescriptor =
        descriptor(RecordKind::VerticalCs, true, COORDINATE_SYSTEM_FIELDS);
    static SPHERICAL_CS: TypeDescriptor =
        descriptor(RecordKind::SphericalCs, true, COORDINATE_SYSTEM_FIELDS);
    static AXIS: TypeDescriptor =
        descriptor(RecordKind::CoordinateSystemAxis, false, AXIS_FIELDS);
    static AXIS_NAME: TypeDescriptor = descriptor(RecordKind::AxisName, true, AXIS_NAME_FIELDS);
    static GEODETIC_CRS: TypeDescriptor =
        descriptor(RecordKind::GeodeticCrs, true, GEODETIC_CRS_FIELDS);
    static PROJECTED_CRS: TypeDescriptor =
        descriptor(RecordKind::ProjectedCrs, true, PROJECTED_CRS_FIELDS);
    static VERTICAL_CRS: TypeDescriptor =
        descriptor(RecordKind::VerticalCrs, true, VERTICAL_CRS_FIELDS);
    static ENGINEERING_CRS: TypeDescriptor =
        descriptor(RecordKind::EngineeringCrs, true, ENGINEERING_CRS_FIELDS);
    static COMPOUND_CRS: TypeDescriptor =
        descriptor(RecordKind::CompoundCrs, true, COMPOUND_CRS_FIELDS);

    match tag {
        "Ellipsoid" => Some(&ELLIPSOID),
        "PrimeMeridian" => Some(&PRIME_MERIDIAN),
        "AreaOfUse" => Some(&AREA_OF_USE),
        "GeodeticDatum" => Some(&GEODETIC_DATUM),
        "VerticalDatum" => Some(&VERTICAL_DATUM),
        "EngineeringDatum" => Some(&ENGINEERING_DATUM),
        "EllipsoidalCS" => Some(&ELLIPSOIDAL_CS),
        "CartesianCS" => Some(&CARTESIAN_CS),
        "VerticalCS" => Some(&VERTICAL_CS),
        "SphericalCS" => Some(&SPHERICAL_CS),
        "CoordinateSystemAxis" => Some(&AXIS),
        "AxisName" => Some(&AXIS_NAME),
        "GeodeticCRS" => Some(&GEODETIC_CRS),
        "ProjectedCRS" => Some(&PROJECTED_CRS),
        "VerticalCRS" => Some(&VERTICAL_CRS),
        "EngineeringCRS" => Some(&ENGINEERING_CRS),
        "CompoundCRS" => Some(&COMPOUND_CRS),
        _ => None,
    }
}
