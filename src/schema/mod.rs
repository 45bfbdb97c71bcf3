//! Declarative attribute schemas
//!
//! Every DXF entity kind is the same generic field-dictionary engine wired
//! to a different attribute schema: a fixed map from logical field key to
//! (group code, value factory, output priority). The schemas are built
//! once, at first use, into an immutable process-wide registry.

mod entities;
mod tables;

use std::fmt;

use ahash::AHashMap;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::error::{DxfError, Result};
use crate::tags::{Tag, TagList, TagValue};
use crate::types::{Color, Vector2, Vector3};

pub(crate) use entities::default_fields;

/// Logical field key: a name, or a small index for positional fields
/// (the four corner points of SOLID/TRACE/3DFACE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// Named field
    Name(&'static str),
    /// Positional field
    Index(u8),
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKey::Name(name) => write!(f, "{}", name),
            FieldKey::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&'static str> for FieldKey {
    fn from(name: &'static str) -> Self {
        FieldKey::Name(name)
    }
}

impl From<u8> for FieldKey {
    fn from(index: u8) -> Self {
        FieldKey::Index(index)
    }
}

/// A 2D or 3D point value sharing one group-code family.
///
/// A point field with family code 10 emits its components with codes
/// 10/20/30. A 2D point used where 3D is required is extended with z = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Point {
    /// 2D point
    Xy(f64, f64),
    /// 3D point
    Xyz(f64, f64, f64),
}

impl Point {
    /// The point extended to 3D, filling z with 0
    pub fn to_3d(self) -> Point {
        match self {
            Point::Xy(x, y) => Point::Xyz(x, y, 0.0),
            p @ Point::Xyz(..) => p,
        }
    }

    /// Components in x, y, (z) order
    pub fn components(self) -> Vec<f64> {
        match self {
            Point::Xy(x, y) => vec![x, y],
            Point::Xyz(x, y, z) => vec![x, y, z],
        }
    }

    /// Convert to a [`Vector3`], filling z with 0
    pub fn to_vector3(self) -> Vector3 {
        match self.to_3d() {
            Point::Xyz(x, y, z) => Vector3::new(x, y, z),
            Point::Xy(..) => unreachable!(),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::Xy(x, y)
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Point::Xyz(x, y, z)
    }
}

impl From<Vector2> for Point {
    fn from(v: Vector2) -> Self {
        Point::Xy(v.x, v.y)
    }
}

impl From<Vector3> for Point {
    fn from(v: Vector3) -> Self {
        Point::Xyz(v.x, v.y, v.z)
    }
}

/// A raw field value supplied by a caller.
///
/// Scalar variants are cast against the field's group code when the field
/// is set; composite variants pass through their factory unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text value
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// 2D or 3D point
    Point(Point),
    /// List of floats emitted as repeated tags with one code
    /// (LTYPE pattern elements)
    Floats(Vec<f64>),
    /// Pre-built tags passed through verbatim
    Tags(TagList),
}

impl Value {
    fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::Point(_) => "point",
            Value::Floats(_) => "float list",
            Value::Tags(_) => "tags",
        }
    }

    fn describe(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => b.to_string(),
            other => format!("<{}>", other.type_name()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Color> for Value {
    fn from(color: Color) -> Self {
        Value::Int(color.index() as i64)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Value::Point(p)
    }
}

impl From<(f64, f64)> for Value {
    fn from(p: (f64, f64)) -> Self {
        Value::Point(p.into())
    }
}

impl From<(f64, f64, f64)> for Value {
    fn from(p: (f64, f64, f64)) -> Self {
        Value::Point(p.into())
    }
}

impl From<Vector2> for Value {
    fn from(v: Vector2) -> Self {
        Value::Point(v.into())
    }
}

impl From<Vector3> for Value {
    fn from(v: Vector3) -> Self {
        Value::Point(v.into())
    }
}

impl From<Vec<f64>> for Value {
    fn from(floats: Vec<f64>) -> Self {
        Value::Floats(floats)
    }
}

impl From<TagList> for Value {
    fn from(tags: TagList) -> Self {
        Value::Tags(tags)
    }
}

/// Converts a raw field value into one or more tags for a group code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFactory {
    /// Single string tag
    Str,
    /// Single integer tag
    Int,
    /// Single float tag
    Float,
    /// Single boolean tag
    Bool,
    /// Point emitted with the components the caller supplied
    Point2,
    /// Point always emitted in 3D, z filled with 0
    Point3,
    /// Float list emitted as repeated tags with one code
    FloatList,
    /// Identity: pre-built tags pass through unchanged
    PassThrough,
}

impl ValueFactory {
    /// Cast a raw value to its canonical form and build its tags.
    ///
    /// Returns the canonical value (what `get` will report) paired with
    /// the tags that will serialize for it.
    pub fn apply(&self, value: Value, code: i32) -> Result<(Value, TagList)> {
        let mismatch = |value: &Value| DxfError::TypeCast {
            code,
            value: value.describe(),
        };
        match (self, value) {
            (ValueFactory::Str, Value::Str(s)) => scalar(code, TagValue::Str(s)),
            (ValueFactory::Str, Value::Int(i)) => scalar(code, TagValue::Int(i)),
            (ValueFactory::Str, Value::Float(f)) => scalar(code, TagValue::Float(f)),
            (ValueFactory::Int, Value::Int(i)) => scalar(code, TagValue::Int(i)),
            (ValueFactory::Int, Value::Float(f)) => scalar(code, TagValue::Float(f)),
            (ValueFactory::Int, Value::Bool(b)) => scalar(code, TagValue::Bool(b)),
            (ValueFactory::Int, Value::Str(s)) => scalar(code, TagValue::Str(s)),
            (ValueFactory::Float, Value::Float(f)) => scalar(code, TagValue::Float(f)),
            (ValueFactory::Float, Value::Int(i)) => scalar(code, TagValue::Int(i)),
            (ValueFactory::Float, Value::Str(s)) => scalar(code, TagValue::Str(s)),
            (ValueFactory::Bool, Value::Bool(b)) => scalar(code, TagValue::Bool(b)),
            (ValueFactory::Bool, Value::Int(i)) => scalar(code, TagValue::Int(i)),

            (ValueFactory::Point2, Value::Point(p)) => point_tags(p, code),
            (ValueFactory::Point3, Value::Point(p)) => point_tags(p.to_3d(), code),

            (ValueFactory::FloatList, Value::Floats(floats)) => {
                let mut tags = TagList::new();
                for &f in &floats {
                    tags.push(Tag::float(code, f)?);
                }
                Ok((Value::Floats(floats), tags))
            }

            (ValueFactory::PassThrough, Value::Tags(list)) => {
                Ok((Value::Tags(list.clone()), list))
            }

            (_, other) => Err(mismatch(&other)),
        }
    }
}

/// Build a single cast tag and its canonical value
fn scalar(code: i32, raw: TagValue) -> Result<(Value, TagList)> {
    let tag = Tag::new(code, raw)?;
    let value = match tag.value() {
        TagValue::Str(s) => Value::Str(s.clone()),
        TagValue::Int(i) => Value::Int(*i),
        TagValue::Float(f) => Value::Float(*f),
        TagValue::Bool(b) => Value::Bool(*b),
    };
    Ok((value, tag.into()))
}

/// Emit a point as its component tags: x at `code`, y at `code + 10`,
/// z (when present) at `code + 20`.
fn point_tags(point: Point, code: i32) -> Result<(Value, TagList)> {
    let mut tags = TagList::new();
    for (i, component) in point.components().into_iter().enumerate() {
        tags.push(Tag::float(code + 10 * i as i32, component)?);
    }
    Ok((Value::Point(point), tags))
}

/// Static, per-field metadata: group code, value factory, output priority
#[derive(Debug, Clone, Copy)]
pub struct AttrDef {
    /// Group code the field serializes with
    pub code: i32,
    /// Factory converting raw values into tags
    pub factory: ValueFactory,
    /// Output priority; fields render in ascending priority order
    pub priority: i32,
}

impl AttrDef {
    pub(crate) const fn new(code: i32, factory: ValueFactory, priority: i32) -> Self {
        AttrDef {
            code,
            factory,
            priority,
        }
    }
}

/// The common attribute set injected into every entity-type schema.
///
/// Priorities 20-55 place these ahead of entity-specific fields.
const COMMON_ATTRIBS: &[(&str, AttrDef)] = &[
    ("linetype", AttrDef::new(6, ValueFactory::Str, 20)),
    ("elevation", AttrDef::new(38, ValueFactory::Float, 30)),
    ("thickness", AttrDef::new(39, ValueFactory::Float, 35)),
    ("color", AttrDef::new(62, ValueFactory::Int, 40)),
    ("layer", AttrDef::new(8, ValueFactory::Str, 45)),
    ("paper_space", AttrDef::new(67, ValueFactory::Int, 50)),
    ("extrusion_direction", AttrDef::new(210, ValueFactory::Point2, 55)),
];

/// A fixed per-entity-type attribute map
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    attribs: IndexMap<FieldKey, AttrDef>,
}

impl Schema {
    /// Build a schema from entity-specific definitions, then merge in the
    /// common attribute set by name. An entity-specific field keeps its
    /// own definition when the names collide (union-by-name).
    fn new(name: &'static str, specific: &[(FieldKey, AttrDef)]) -> Self {
        let mut attribs = IndexMap::new();
        for &(key, def) in specific {
            attribs.insert(key, def);
        }
        for &(common, def) in COMMON_ATTRIBS {
            attribs.entry(FieldKey::Name(common)).or_insert(def);
        }
        Schema { name, attribs }
    }

    /// DXF entity type name (the group code 0 value)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up a field definition and its declaration index.
    ///
    /// The declaration index breaks priority ties deterministically.
    pub fn get(&self, key: &FieldKey) -> Option<(usize, &AttrDef)> {
        self.attribs
            .get_full(key)
            .map(|(index, _, def)| (index, def))
    }

    /// True if the schema declares the field
    pub fn contains(&self, key: &FieldKey) -> bool {
        self.attribs.contains_key(key)
    }
}

/// Every DXF record type this library writes.
///
/// POLYMESH and POLYFACE render through the POLYLINE kind with different
/// flag words; they are not separate wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Line,
    Point,
    Circle,
    Arc,
    Text,
    Shape,
    Solid,
    Trace,
    Face3d,
    Block,
    Insert,
    Attdef,
    Attrib,
    Polyline,
    Vertex,
    Viewport,
    Seqend,
    Endblk,
    // Table entry kinds
    Ltype,
    Layer,
    Style,
    View,
    Vport,
    Appid,
    Ucs,
}

impl EntityKind {
    /// The literal uppercase DXF type name. These are a wire contract.
    pub fn dxf_name(self) -> &'static str {
        match self {
            EntityKind::Line => "LINE",
            EntityKind::Point => "POINT",
            EntityKind::Circle => "CIRCLE",
            EntityKind::Arc => "ARC",
            EntityKind::Text => "TEXT",
            EntityKind::Shape => "SHAPE",
            EntityKind::Solid => "SOLID",
            EntityKind::Trace => "TRACE",
            EntityKind::Face3d => "3DFACE",
            EntityKind::Block => "BLOCK",
            EntityKind::Insert => "INSERT",
            EntityKind::Attdef => "ATTDEF",
            EntityKind::Attrib => "ATTRIB",
            EntityKind::Polyline => "POLYLINE",
            EntityKind::Vertex => "VERTEX",
            EntityKind::Viewport => "VIEWPORT",
            EntityKind::Seqend => "SEQEND",
            EntityKind::Endblk => "ENDBLK",
            EntityKind::Ltype => "LTYPE",
            EntityKind::Layer => "LAYER",
            EntityKind::Style => "STYLE",
            EntityKind::View => "VIEW",
            EntityKind::Vport => "VPORT",
            EntityKind::Appid => "APPID",
            EntityKind::Ucs => "UCS",
        }
    }

    /// True for the four-point kinds sharing the duplicate-third-corner
    /// convention
    pub fn is_four_point(self) -> bool {
        matches!(
            self,
            EntityKind::Solid | EntityKind::Trace | EntityKind::Face3d
        )
    }

    /// The fixed attribute schema for this kind
    pub fn schema(self) -> &'static Schema {
        // Every kind is registered below, so the lookup cannot miss.
        &SCHEMAS[&self]
    }
}

/// The process-wide schema registry, built exactly once on first use.
static SCHEMAS: Lazy<AHashMap<EntityKind, Schema>> = Lazy::new(|| {
    let mut schemas = AHashMap::new();
    for (kind, specific) in entities::schema_tables() {
        schemas.insert(kind, Schema::new(kind.dxf_name(), specific));
    }
    for (kind, specific) in tables::schema_tables() {
        schemas.insert(kind, Schema::new(kind.dxf_name(), specific));
    }
    schemas
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_schema() {
        let kinds = [
            EntityKind::Line,
            EntityKind::Point,
            EntityKind::Circle,
            EntityKind::Arc,
            EntityKind::Text,
            EntityKind::Shape,
            EntityKind::Solid,
            EntityKind::Trace,
            EntityKind::Face3d,
            EntityKind::Block,
            EntityKind::Insert,
            EntityKind::Attdef,
            EntityKind::Attrib,
            EntityKind::Polyline,
            EntityKind::Vertex,
            EntityKind::Viewport,
            EntityKind::Seqend,
            EntityKind::Endblk,
            EntityKind::Ltype,
            EntityKind::Layer,
            EntityKind::Style,
            EntityKind::View,
            EntityKind::Vport,
            EntityKind::Appid,
            EntityKind::Ucs,
        ];
        for kind in kinds {
            let schema = kind.schema();
            assert_eq!(schema.name(), kind.dxf_name());
        }
    }

    #[test]
    fn test_common_attribs_injected() {
        let schema = EntityKind::Line.schema();
        for name in [
            "linetype",
            "elevation",
            "thickness",
            "color",
            "layer",
            "paper_space",
            "extrusion_direction",
        ] {
            assert!(schema.contains(&FieldKey::Name(name)), "missing {}", name);
        }
    }

    #[test]
    fn test_union_by_name_keeps_specific_definition() {
        // LAYER declares its own color field; augmentation must not
        // overwrite it.
        let schema = EntityKind::Layer.schema();
        let (_, def) = schema.get(&FieldKey::Name("color")).unwrap();
        assert_eq!(def.code, 62);
        assert!(def.priority >= 100);
    }

    #[test]
    fn test_common_priorities_precede_specific() {
        let schema = EntityKind::Line.schema();
        let (_, layer) = schema.get(&FieldKey::Name("layer")).unwrap();
        let (_, start) = schema.get(&FieldKey::Name("start")).unwrap();
        assert!(layer.priority < start.priority);
    }

    #[test]
    fn test_point3_factory_fills_z() {
        let (value, tags) = ValueFactory::Point3
            .apply(Value::Point(Point::Xy(1.0, 2.0)), 10)
            .unwrap();
        assert_eq!(value, Value::Point(Point::Xyz(1.0, 2.0, 0.0)));
        assert_eq!(tags.to_dxf_string(), " 10\n1.0\n 20\n2.0\n 30\n0.0\n");
    }

    #[test]
    fn test_point2_factory_keeps_dimension() {
        let (_, tags) = ValueFactory::Point2
            .apply(Value::Point(Point::Xy(1.0, 2.0)), 10)
            .unwrap();
        assert_eq!(tags.flatten().len(), 2);
    }

    #[test]
    fn test_factory_rejects_mismatched_value() {
        let err = ValueFactory::Point3.apply(Value::Float(1.0), 10).unwrap_err();
        assert!(matches!(err, DxfError::TypeCast { code: 10, .. }));
    }

    #[test]
    fn test_float_list_factory() {
        let (_, tags) = ValueFactory::FloatList
            .apply(Value::Floats(vec![1.0, -0.25]), 49)
            .unwrap();
        assert_eq!(tags.to_dxf_string(), " 49\n1.0\n 49\n-0.25\n");
    }
}
