//! Attribute schema tables for table-entry kinds (LTYPE, LAYER, STYLE,
//! VIEW, VPORT, APPID, UCS)

use super::{AttrDef, EntityKind, FieldKey, Point, Value, ValueFactory};

const fn named(
    name: &'static str,
    code: i32,
    factory: ValueFactory,
    priority: i32,
) -> (FieldKey, AttrDef) {
    (FieldKey::Name(name), AttrDef::new(code, factory, priority))
}

use ValueFactory::{Float, FloatList, Int, Point2, Point3, Str};

const LTYPE: &[(FieldKey, AttrDef)] = &[
    named("name", 2, Str, 100),
    named("flags", 70, Int, 105),
    named("description", 3, Str, 110),
    named("alignment", 72, Int, 115),
    named("itemscount", 73, Int, 120),
    named("totalpatternlength", 40, Float, 125),
    named("pattern", 49, FloatList, 130),
];

const LAYER: &[(FieldKey, AttrDef)] = &[
    named("name", 2, Str, 100),
    named("flags", 70, Int, 105),
    named("color", 62, Int, 110),
    named("linetype", 6, Str, 115),
];

const STYLE: &[(FieldKey, AttrDef)] = &[
    named("name", 2, Str, 100),
    named("flags", 70, Int, 105),
    named("height", 40, Float, 110),
    named("width", 41, Float, 115),
    named("oblique", 50, Float, 120),
    named("generation_flags", 71, Int, 125),
    named("last_height", 42, Float, 130),
    named("font", 3, Str, 135),
    named("bigfont", 4, Str, 140),
];

const VIEW: &[(FieldKey, AttrDef)] = &[
    named("name", 2, Str, 100),
    named("flags", 70, Int, 105),
    named("height", 40, Float, 110),
    named("center_point", 10, Point2, 115),
    named("width", 41, Float, 120),
    named("direction_point", 11, Point3, 125),
    named("target_point", 12, Point3, 130),
    named("lens_length", 42, Float, 135),
    named("front_clipping", 43, Float, 140),
    named("back_clipping", 44, Float, 145),
    named("view_twist", 50, Float, 150),
    named("view_mode", 71, Int, 155),
];

const VPORT: &[(FieldKey, AttrDef)] = &[
    named("name", 2, Str, 100),
    named("flags", 70, Int, 105),
    named("lower_left", 10, Point2, 110),
    named("upper_right", 11, Point2, 115),
    named("center_point", 12, Point2, 120),
    named("snap_base", 13, Point2, 125),
    named("snap_spacing", 14, Point2, 130),
    named("grid_spacing", 15, Point2, 135),
    named("direction_point", 16, Point3, 140),
    named("target_point", 17, Point3, 145),
    named("height", 40, Float, 150),
    named("aspect_ratio", 41, Float, 155),
    named("lens_length", 42, Float, 160),
    named("front_clipping", 43, Float, 165),
    named("back_clipping", 44, Float, 170),
    named("snap_rotation", 50, Float, 175),
    named("view_twist", 51, Float, 180),
    named("view_mode", 71, Int, 185),
    named("circle_zoom", 72, Int, 190),
    named("fast_zoom", 73, Int, 195),
    named("ucs_icon", 74, Int, 200),
    named("snap_on", 75, Int, 205),
    named("grid_on", 76, Int, 210),
    named("snap_style", 77, Int, 215),
    named("snap_isopair", 78, Int, 220),
];

const APPID: &[(FieldKey, AttrDef)] = &[
    named("name", 2, Str, 100),
    named("flags", 70, Int, 105),
];

const UCS: &[(FieldKey, AttrDef)] = &[
    named("name", 2, Str, 100),
    named("flags", 70, Int, 105),
    named("origin", 10, Point3, 110),
    named("xaxis", 11, Point3, 115),
    named("yaxis", 12, Point3, 120),
];

/// Entity-specific schema tables for all table-entry kinds
pub(super) fn schema_tables() -> Vec<(EntityKind, &'static [(FieldKey, AttrDef)])> {
    vec![
        (EntityKind::Ltype, LTYPE),
        (EntityKind::Layer, LAYER),
        (EntityKind::Style, STYLE),
        (EntityKind::View, VIEW),
        (EntityKind::Vport, VPORT),
        (EntityKind::Appid, APPID),
        (EntityKind::Ucs, UCS),
    ]
}

/// Construction defaults for table-entry kinds
pub(super) fn default_fields(kind: EntityKind) -> Vec<(FieldKey, Value)> {
    let flags0 = (FieldKey::Name("flags"), Value::Int(0));
    match kind {
        EntityKind::Ltype => vec![
            flags0,
            (FieldKey::Name("description"), Value::Str(String::new())),
            (FieldKey::Name("alignment"), Value::Int(65)),
        ],
        EntityKind::Layer => vec![
            flags0,
            (FieldKey::Name("color"), Value::Int(7)),
            (
                FieldKey::Name("linetype"),
                Value::Str("CONTINUOUS".to_string()),
            ),
        ],
        EntityKind::Style => vec![
            flags0,
            (FieldKey::Name("height"), Value::Float(0.0)),
            (FieldKey::Name("width"), Value::Float(1.0)),
            (FieldKey::Name("oblique"), Value::Float(0.0)),
            (FieldKey::Name("generation_flags"), Value::Int(0)),
            (FieldKey::Name("last_height"), Value::Float(1.0)),
            (FieldKey::Name("font"), Value::Str("txt".to_string())),
            (FieldKey::Name("bigfont"), Value::Str(String::new())),
        ],
        EntityKind::View => vec![
            flags0,
            (FieldKey::Name("height"), Value::Float(1.0)),
            (FieldKey::Name("width"), Value::Float(1.0)),
            (FieldKey::Name("center_point"), Value::Point(Point::Xy(0.0, 0.0))),
            (
                FieldKey::Name("direction_point"),
                Value::Point(Point::Xyz(0.0, 0.0, 1.0)),
            ),
            (
                FieldKey::Name("target_point"),
                Value::Point(Point::Xyz(0.0, 0.0, 0.0)),
            ),
            (FieldKey::Name("lens_length"), Value::Float(50.0)),
            (FieldKey::Name("front_clipping"), Value::Float(0.0)),
            (FieldKey::Name("back_clipping"), Value::Float(0.0)),
            (FieldKey::Name("view_twist"), Value::Float(0.0)),
            (FieldKey::Name("view_mode"), Value::Int(0)),
        ],
        EntityKind::Vport => vec![
            flags0,
            (FieldKey::Name("lower_left"), Value::Point(Point::Xy(0.0, 0.0))),
            (FieldKey::Name("upper_right"), Value::Point(Point::Xy(1.0, 1.0))),
            (FieldKey::Name("center_point"), Value::Point(Point::Xy(0.0, 0.0))),
            (FieldKey::Name("snap_base"), Value::Point(Point::Xy(0.0, 0.0))),
            (
                FieldKey::Name("snap_spacing"),
                Value::Point(Point::Xy(0.1, 0.1)),
            ),
            (
                FieldKey::Name("grid_spacing"),
                Value::Point(Point::Xy(0.1, 0.1)),
            ),
            (
                FieldKey::Name("direction_point"),
                Value::Point(Point::Xyz(0.0, 0.0, 1.0)),
            ),
            (
                FieldKey::Name("target_point"),
                Value::Point(Point::Xyz(0.0, 0.0, 0.0)),
            ),
            (FieldKey::Name("height"), Value::Float(1.0)),
            (FieldKey::Name("aspect_ratio"), Value::Float(1.0)),
            (FieldKey::Name("lens_length"), Value::Float(50.0)),
            (FieldKey::Name("front_clipping"), Value::Float(0.0)),
            (FieldKey::Name("back_clipping"), Value::Float(0.0)),
            (FieldKey::Name("snap_rotation"), Value::Float(0.0)),
            (FieldKey::Name("view_twist"), Value::Float(0.0)),
            (FieldKey::Name("view_mode"), Value::Int(0)),
            (FieldKey::Name("circle_zoom"), Value::Int(100)),
            (FieldKey::Name("fast_zoom"), Value::Int(1)),
            (FieldKey::Name("ucs_icon"), Value::Int(3)),
            (FieldKey::Name("snap_on"), Value::Int(0)),
            (FieldKey::Name("grid_on"), Value::Int(0)),
            (FieldKey::Name("snap_style"), Value::Int(0)),
            (FieldKey::Name("snap_isopair"), Value::Int(0)),
        ],
        EntityKind::Appid => vec![flags0],
        EntityKind::Ucs => vec![
            flags0,
            (FieldKey::Name("origin"), Value::Point(Point::Xyz(0.0, 0.0, 0.0))),
            (FieldKey::Name("xaxis"), Value::Point(Point::Xyz(1.0, 0.0, 0.0))),
            (FieldKey::Name("yaxis"), Value::Point(Point::Xyz(0.0, 1.0, 0.0))),
        ],
        _ => vec![],
    }
}
