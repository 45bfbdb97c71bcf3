//! Attribute schema tables for graphic entity kinds
//!
//! Field order within a table is the declaration order used to break
//! priority ties; priorities follow the tag order DXF R12 readers expect.

use super::{AttrDef, EntityKind, FieldKey, Value, ValueFactory};

const fn named(
    name: &'static str,
    code: i32,
    factory: ValueFactory,
    priority: i32,
) -> (FieldKey, AttrDef) {
    (FieldKey::Name(name), AttrDef::new(code, factory, priority))
}

const fn indexed(
    index: u8,
    code: i32,
    factory: ValueFactory,
    priority: i32,
) -> (FieldKey, AttrDef) {
    (FieldKey::Index(index), AttrDef::new(code, factory, priority))
}

use ValueFactory::{Float, Int, Point3, Str};

const LINE: &[(FieldKey, AttrDef)] = &[
    named("start", 10, Point3, 100),
    named("end", 11, Point3, 105),
];

const POINT: &[(FieldKey, AttrDef)] = &[named("point", 10, Point3, 100)];

const CIRCLE: &[(FieldKey, AttrDef)] = &[
    named("center", 10, Point3, 100),
    named("radius", 40, Float, 105),
];

const ARC: &[(FieldKey, AttrDef)] = &[
    named("center", 10, Point3, 100),
    named("radius", 40, Float, 105),
    named("startangle", 50, Float, 110),
    named("endangle", 51, Float, 115),
];

const TEXT: &[(FieldKey, AttrDef)] = &[
    named("insert", 10, Point3, 100),
    named("height", 40, Float, 105),
    named("text", 1, Str, 110),
    named("rotation", 50, Float, 115),
    named("xscale", 41, Float, 120),
    named("oblique", 51, Float, 125),
    named("style", 7, Str, 130),
    named("mirror", 71, Int, 135),
    named("halign", 72, Int, 140),
    named("alignpoint", 11, Point3, 145),
    named("valign", 73, Int, 150),
];

const SHAPE: &[(FieldKey, AttrDef)] = &[
    named("insert", 10, Point3, 100),
    named("size", 40, Float, 105),
    named("name", 2, Str, 110),
    named("rotation", 50, Float, 115),
    named("xscale", 41, Float, 120),
    named("oblique", 51, Float, 125),
];

/// Shared by SOLID and TRACE: four positional corner points
const FOUR_POINTS: &[(FieldKey, AttrDef)] = &[
    indexed(0, 10, Point3, 100),
    indexed(1, 11, Point3, 101),
    indexed(2, 12, Point3, 102),
    indexed(3, 13, Point3, 103),
];

const FACE3D: &[(FieldKey, AttrDef)] = &[
    indexed(0, 10, Point3, 100),
    indexed(1, 11, Point3, 101),
    indexed(2, 12, Point3, 102),
    indexed(3, 13, Point3, 103),
    named("invisible_edge", 70, Int, 110),
];

const BLOCK: &[(FieldKey, AttrDef)] = &[
    named("name", 2, Str, 100),
    named("flags", 70, Int, 105),
    named("basepoint", 10, Point3, 110),
    named("name2", 3, Str, 115),
    named("xref", 1, Str, 120),
];

const INSERT: &[(FieldKey, AttrDef)] = &[
    named("attribs_follow", 66, Int, 100),
    named("blockname", 2, Str, 105),
    named("insert", 10, Point3, 110),
    named("xscale", 41, Float, 115),
    named("yscale", 42, Float, 120),
    named("zscale", 43, Float, 125),
    named("rotation", 50, Float, 130),
    named("columns", 70, Int, 135),
    named("rows", 71, Int, 140),
    named("colspacing", 44, Float, 145),
    named("rowspacing", 45, Float, 150),
];

const ATTDEF: &[(FieldKey, AttrDef)] = &[
    named("insert", 10, Point3, 100),
    named("height", 40, Float, 105),
    named("text", 1, Str, 110),
    named("prompt", 3, Str, 115),
    named("tag", 2, Str, 120),
    named("flags", 70, Int, 125),
    named("fieldlength", 73, Int, 130),
    named("rotation", 50, Float, 135),
    named("oblique", 51, Float, 140),
    named("xscale", 41, Float, 145),
    named("style", 7, Str, 150),
    named("mirror", 71, Int, 155),
    named("halign", 72, Int, 160),
    named("alignpoint", 11, Point3, 165),
    named("valign", 74, Int, 170),
];

const ATTRIB: &[(FieldKey, AttrDef)] = &[
    named("insert", 10, Point3, 100),
    named("height", 40, Float, 105),
    named("text", 1, Str, 110),
    named("tag", 2, Str, 115),
    named("flags", 70, Int, 120),
    named("fieldlength", 73, Int, 125),
    named("rotation", 50, Float, 130),
    named("oblique", 51, Float, 135),
    named("xscale", 41, Float, 140),
    named("style", 7, Str, 145),
    named("mirror", 71, Int, 150),
    named("halign", 72, Int, 155),
    named("alignpoint", 11, Point3, 160),
    named("valign", 74, Int, 165),
];

const POLYLINE: &[(FieldKey, AttrDef)] = &[
    named("vertices_follow", 66, Int, 100),
    named("polyline_elevation", 10, Point3, 105),
    named("flags", 70, Int, 110),
    named("startwidth", 40, Float, 115),
    named("endwidth", 41, Float, 120),
    named("mcount", 71, Int, 125),
    named("ncount", 72, Int, 130),
    named("msmooth_density", 73, Int, 135),
    named("nsmooth_density", 74, Int, 140),
    named("smoothtype", 75, Int, 145),
];

const VERTEX: &[(FieldKey, AttrDef)] = &[
    named("location", 10, Point3, 100),
    named("startwidth", 40, Float, 105),
    named("endwidth", 41, Float, 110),
    named("bulge", 42, Float, 115),
    named("flags", 70, Int, 120),
    named("curve_tangent", 50, Float, 125),
    named("vtx0", 71, Int, 130),
    named("vtx1", 72, Int, 135),
    named("vtx2", 73, Int, 140),
    named("vtx3", 74, Int, 145),
];

const VIEWPORT: &[(FieldKey, AttrDef)] = &[
    named("center", 10, Point3, 100),
    named("width", 40, Float, 105),
    named("height", 41, Float, 110),
    named("status", 68, Int, 115),
    named("id", 69, Int, 120),
];

const SENTINEL: &[(FieldKey, AttrDef)] = &[];

/// Entity-specific schema tables for all graphic kinds
pub(super) fn schema_tables() -> Vec<(EntityKind, &'static [(FieldKey, AttrDef)])> {
    vec![
        (EntityKind::Line, LINE),
        (EntityKind::Point, POINT),
        (EntityKind::Circle, CIRCLE),
        (EntityKind::Arc, ARC),
        (EntityKind::Text, TEXT),
        (EntityKind::Shape, SHAPE),
        (EntityKind::Solid, FOUR_POINTS),
        (EntityKind::Trace, FOUR_POINTS),
        (EntityKind::Face3d, FACE3D),
        (EntityKind::Block, BLOCK),
        (EntityKind::Insert, INSERT),
        (EntityKind::Attdef, ATTDEF),
        (EntityKind::Attrib, ATTRIB),
        (EntityKind::Polyline, POLYLINE),
        (EntityKind::Vertex, VERTEX),
        (EntityKind::Viewport, VIEWPORT),
        (EntityKind::Seqend, SENTINEL),
        (EntityKind::Endblk, SENTINEL),
    ]
}

/// Construction defaults per kind, overridden by caller-supplied values.
///
/// Graphic entities default to layer "0"; the sentinels render as a bare
/// type-name tag.
pub(crate) fn default_fields(kind: EntityKind) -> Vec<(FieldKey, Value)> {
    let layer = (FieldKey::Name("layer"), Value::Str("0".to_string()));
    let origin = |name| (FieldKey::Name(name), Value::Point(super::Point::Xyz(0.0, 0.0, 0.0)));
    match kind {
        EntityKind::Line => vec![layer, origin("start"), origin("end")],
        EntityKind::Point => vec![layer, origin("point")],
        EntityKind::Circle => vec![
            layer,
            origin("center"),
            (FieldKey::Name("radius"), Value::Float(1.0)),
        ],
        EntityKind::Arc => vec![
            layer,
            origin("center"),
            (FieldKey::Name("radius"), Value::Float(1.0)),
            (FieldKey::Name("startangle"), Value::Float(0.0)),
            (FieldKey::Name("endangle"), Value::Float(360.0)),
        ],
        EntityKind::Text => vec![
            layer,
            origin("insert"),
            (FieldKey::Name("height"), Value::Float(1.0)),
            (FieldKey::Name("text"), Value::Str("Text".to_string())),
        ],
        EntityKind::Shape => vec![
            layer,
            origin("insert"),
            (FieldKey::Name("size"), Value::Float(1.0)),
        ],
        EntityKind::Solid | EntityKind::Trace | EntityKind::Face3d => vec![layer],
        EntityKind::Block => vec![
            layer,
            (FieldKey::Name("flags"), Value::Int(0)),
            origin("basepoint"),
        ],
        EntityKind::Insert => vec![layer, origin("insert")],
        EntityKind::Attdef | EntityKind::Attrib => vec![
            layer,
            origin("insert"),
            (FieldKey::Name("height"), Value::Float(1.0)),
            (FieldKey::Name("text"), Value::Str(String::new())),
        ],
        EntityKind::Polyline => vec![
            layer,
            (FieldKey::Name("vertices_follow"), Value::Int(1)),
            (FieldKey::Name("flags"), Value::Int(0)),
        ],
        EntityKind::Vertex => vec![layer, origin("location")],
        EntityKind::Viewport => vec![
            layer,
            origin("center"),
            (FieldKey::Name("width"), Value::Float(1.0)),
            (FieldKey::Name("height"), Value::Float(1.0)),
            (FieldKey::Name("status"), Value::Int(0)),
            (FieldKey::Name("id"), Value::Int(1)),
        ],
        EntityKind::Seqend | EntityKind::Endblk => vec![],
        other => super::tables::default_fields(other),
    }
}
