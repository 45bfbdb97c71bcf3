//! The generic schema-driven entity
//!
//! Every DXF record type is this one engine wired to a different attribute
//! schema: a field dictionary whose reads and writes resolve through the
//! schema, plus the three-phase serialization protocol. The only per-kind
//! behavior is the extension/validity hooks for the four-point kinds and
//! BLOCK's mirrored name field.

use bitflags::bitflags;
use indexmap::IndexMap;

use super::DxfSerialize;
use crate::error::{DxfError, Result};
use crate::schema::{self, EntityKind, FieldKey, Point, Value};
use crate::tags::{Tag, TagList};
use crate::types::Vector3;

bitflags! {
    /// ATTDEF/ATTRIB flag word (group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AttributeFlags: i64 {
        const INVISIBLE = 1;
        const CONSTANT = 2;
        const VERIFY = 4;
        const PRESET = 8;
    }
}

/// A stored field: the canonical value, its pre-built tags, and the sort
/// keys for deterministic output (priority first, declaration order as
/// the tie-break).
#[derive(Debug, Clone)]
struct FieldSlot {
    priority: i32,
    decl_index: usize,
    value: Value,
    tags: TagList,
}

/// A named DXF record holding schema-validated field values
#[derive(Debug, Clone)]
pub struct GenericEntity {
    kind: EntityKind,
    fields: IndexMap<FieldKey, FieldSlot>,
}

impl GenericEntity {
    /// Create an entity of the given kind with its construction defaults
    pub fn new(kind: EntityKind) -> Result<Self> {
        let mut entity = GenericEntity {
            kind,
            fields: IndexMap::new(),
        };
        for (key, value) in schema::default_fields(kind) {
            entity.set(key, value)?;
        }
        Ok(entity)
    }

    /// The entity kind
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Set a field, validating it against the schema and casting the value
    /// per its group code. Overwrites silently.
    pub fn set(&mut self, field: impl Into<FieldKey>, value: impl Into<Value>) -> Result<()> {
        let key = field.into();
        let (decl_index, def) = self.kind.schema().get(&key).ok_or_else(|| {
            DxfError::UnknownField {
                entity: self.kind.dxf_name(),
                field: key.to_string(),
            }
        })?;
        let (value, tags) = def.factory.apply(value.into(), def.code)?;
        self.fields.insert(
            key,
            FieldSlot {
                priority: def.priority,
                decl_index,
                value,
                tags,
            },
        );
        Ok(())
    }

    /// Read a field's logical value: `Ok(None)` when the field is declared
    /// but unset, an error when the field is not in the schema.
    pub fn get(&self, field: impl Into<FieldKey>) -> Result<Option<Value>> {
        let key = field.into();
        if !self.kind.schema().contains(&key) {
            return Err(DxfError::UnknownField {
                entity: self.kind.dxf_name(),
                field: key.to_string(),
            });
        }
        Ok(self.fields.get(&key).map(|slot| slot.value.clone()))
    }

    /// True if the field is currently set
    pub fn is_set(&self, field: impl Into<FieldKey>) -> bool {
        self.fields.contains_key(&field.into())
    }

    /// Read a point field as a 3D vector (z filled with 0 for 2D points)
    pub(crate) fn point_value(&self, field: impl Into<FieldKey>) -> Option<Vector3> {
        match self.fields.get(&field.into()).map(|slot| &slot.value) {
            Some(Value::Point(p)) => Some(p.to_vector3()),
            _ => None,
        }
    }

    /// Read a float field, falling back to a default when unset
    pub(crate) fn float_value(&self, field: impl Into<FieldKey>, default: f64) -> f64 {
        match self.fields.get(&field.into()).map(|slot| &slot.value) {
            Some(Value::Float(f)) => *f,
            Some(Value::Int(i)) => *i as f64,
            _ => default,
        }
    }
}

impl DxfSerialize for GenericEntity {
    /// Derive fields immediately before output: BLOCK mirrors its name
    /// into the secondary name field; SOLID/TRACE/3DFACE with three corner
    /// points duplicate the third into the fourth (the DXF convention for
    /// a missing fourth vertex).
    fn extend(&mut self) -> Result<()> {
        match self.kind {
            EntityKind::Block => {
                if let Some(name) = self.get("name")? {
                    self.set("name2", name)?;
                }
            }
            kind if kind.is_four_point() => {
                if self.is_set(2u8) && !self.is_set(3u8) {
                    if let Some(third) = self.get(2u8)? {
                        self.set(3u8, third)?;
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.kind.is_four_point() {
            let corners = (0u8..3).filter(|&i| self.is_set(i)).count();
            if corners < 3 {
                return Err(DxfError::invalid(
                    self.kind.dxf_name(),
                    format!("requires at least 3 corner points, {} set", corners),
                ));
            }
        }
        Ok(())
    }

    /// Emit the type-name tag, then all field tags in ascending priority
    /// order (declaration order breaks ties).
    fn assemble(&mut self) -> Result<TagList> {
        let mut slots: Vec<&FieldSlot> = self.fields.values().collect();
        slots.sort_by_key(|slot| (slot.priority, slot.decl_index));

        let mut tags = TagList::new();
        tags.push(Tag::string(0, self.kind.dxf_name())?);
        for slot in slots {
            tags.push_nested(slot.tags.clone());
        }
        Ok(tags)
    }
}

// Convenience constructors for the simple graphic kinds.
impl GenericEntity {
    /// Create a LINE between two points
    pub fn line(start: impl Into<Point>, end: impl Into<Point>) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Line)?;
        entity.set("start", start.into())?;
        entity.set("end", end.into())?;
        Ok(entity)
    }

    /// Create a POINT at a location
    pub fn point(location: impl Into<Point>) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Point)?;
        entity.set("point", location.into())?;
        Ok(entity)
    }

    /// Create a CIRCLE
    pub fn circle(center: impl Into<Point>, radius: f64) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Circle)?;
        entity.set("center", center.into())?;
        entity.set("radius", radius)?;
        Ok(entity)
    }

    /// Create an ARC; angles are in degrees
    pub fn arc(
        center: impl Into<Point>,
        radius: f64,
        startangle: f64,
        endangle: f64,
    ) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Arc)?;
        entity.set("center", center.into())?;
        entity.set("radius", radius)?;
        entity.set("startangle", startangle)?;
        entity.set("endangle", endangle)?;
        Ok(entity)
    }

    /// Create a TEXT entity
    pub fn text(text: impl Into<String>, insert: impl Into<Point>, height: f64) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Text)?;
        entity.set("text", text.into())?;
        entity.set("insert", insert.into())?;
        entity.set("height", height)?;
        Ok(entity)
    }

    /// Create a SHAPE reference
    pub fn shape(name: impl Into<String>, insert: impl Into<Point>) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Shape)?;
        entity.set("name", name.into())?;
        entity.set("insert", insert.into())?;
        Ok(entity)
    }

    /// Create a SOLID from 3 or 4 corner points
    pub fn solid(points: &[Point]) -> Result<Self> {
        Self::four_point(EntityKind::Solid, points)
    }

    /// Create a TRACE from 3 or 4 corner points
    pub fn trace(points: &[Point]) -> Result<Self> {
        Self::four_point(EntityKind::Trace, points)
    }

    /// Create a 3DFACE from 3 or 4 corner points
    pub fn face3d(points: &[Point]) -> Result<Self> {
        Self::four_point(EntityKind::Face3d, points)
    }

    fn four_point(kind: EntityKind, points: &[Point]) -> Result<Self> {
        if points.len() > 4 {
            return Err(DxfError::IndexRange {
                index: points.len(),
                limit: 4,
            });
        }
        let mut entity = GenericEntity::new(kind)?;
        for (i, &p) in points.iter().enumerate() {
            entity.set(i as u8, p)?;
        }
        Ok(entity)
    }

    /// Create an ATTDEF (attribute definition)
    pub fn attdef(tag: impl Into<String>, insert: impl Into<Point>) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Attdef)?;
        entity.set("tag", tag.into())?;
        entity.set("insert", insert.into())?;
        Ok(entity)
    }

    /// Create an ATTRIB (attribute instance)
    pub fn attrib(
        tag: impl Into<String>,
        text: impl Into<String>,
        insert: impl Into<Point>,
    ) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Attrib)?;
        entity.set("tag", tag.into())?;
        entity.set("text", text.into())?;
        entity.set("insert", insert.into())?;
        Ok(entity)
    }

    /// Create a polyline VERTEX
    pub fn vertex(location: impl Into<Point>) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Vertex)?;
        entity.set("location", location.into())?;
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_renders_expected_bytes() {
        let mut line = GenericEntity::line((0.0, 0.0), (1.0, 1.0)).unwrap();
        let output = line.render().unwrap().to_dxf_string();
        assert_eq!(
            output,
            "  0\nLINE\n  8\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 11\n1.0\n 21\n1.0\n 31\n0.0\n"
        );
    }

    #[test]
    fn test_attdef_flag_word() {
        let mut attdef = GenericEntity::attdef("SERIAL", (0.0, 0.0)).unwrap();
        let flags = AttributeFlags::INVISIBLE | AttributeFlags::CONSTANT;
        attdef.set("flags", flags.bits()).unwrap();
        let output = attdef.render().unwrap().to_dxf_string();
        assert!(output.contains(" 70\n3\n"));
    }

    #[test]
    fn test_arc_default_tag_order() {
        let mut arc = GenericEntity::new(EntityKind::Arc).unwrap();
        let output = arc.render().unwrap().to_dxf_string();
        assert_eq!(
            output,
            "  0\nARC\n  8\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 40\n1.0\n 50\n0.0\n 51\n360.0\n"
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut line = GenericEntity::new(EntityKind::Line).unwrap();
        let err = line.set("nonexistent_field", 1.0).unwrap_err();
        assert!(matches!(err, DxfError::UnknownField { entity: "LINE", .. }));
        // The failed set must not create the field
        assert!(line.get("nonexistent_field").is_err());
    }

    #[test]
    fn test_deterministic_repeat_render() {
        let mut circle = GenericEntity::circle((2.0, 3.0), 5.0).unwrap();
        let first = circle.render().unwrap().to_dxf_string();
        let second = circle.render().unwrap().to_dxf_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_priority_order_independent_of_set_order() {
        let mut a = GenericEntity::new(EntityKind::Circle).unwrap();
        a.set("radius", 2.0).unwrap();
        a.set("center", (1.0, 1.0)).unwrap();

        let mut b = GenericEntity::new(EntityKind::Circle).unwrap();
        b.set("center", (1.0, 1.0)).unwrap();
        b.set("radius", 2.0).unwrap();

        assert_eq!(a.render().unwrap(), b.render().unwrap());
    }

    #[test]
    fn test_solid_three_points_duplicates_third() {
        let points = [
            Point::Xy(0.0, 0.0),
            Point::Xy(1.0, 0.0),
            Point::Xy(1.0, 1.0),
        ];
        let mut solid = GenericEntity::solid(&points).unwrap();
        let output = solid.render().unwrap().to_dxf_string();
        // Third corner (codes 12/22/32) equals the fourth (13/23/33)
        assert!(output.contains(" 12\n1.0\n 22\n1.0\n 32\n0.0\n"));
        assert!(output.contains(" 13\n1.0\n 23\n1.0\n 33\n0.0\n"));
    }

    #[test]
    fn test_solid_under_three_points_invalid() {
        let points = [Point::Xy(0.0, 0.0), Point::Xy(1.0, 0.0)];
        let mut solid = GenericEntity::solid(&points).unwrap();
        let err = solid.render().unwrap_err();
        assert!(matches!(
            err,
            DxfError::InvalidEntity { entity: "SOLID", .. }
        ));
    }

    #[test]
    fn test_face3d_under_three_points_invalid() {
        let mut face = GenericEntity::face3d(&[Point::Xy(0.0, 0.0)]).unwrap();
        assert!(matches!(
            face.render().unwrap_err(),
            DxfError::InvalidEntity { entity: "3DFACE", .. }
        ));
    }

    #[test]
    fn test_get_returns_canonical_value() {
        let mut text = GenericEntity::new(EntityKind::Text).unwrap();
        // Integer input for a float code is canonicalized to a float
        text.set("height", 2i64).unwrap();
        assert_eq!(text.get("height").unwrap(), Some(Value::Float(2.0)));
        assert_eq!(text.get("rotation").unwrap(), None);
    }

    #[test]
    fn test_type_cast_error_on_set() {
        let mut circle = GenericEntity::new(EntityKind::Circle).unwrap();
        let err = circle.set("radius", "not-a-number").unwrap_err();
        assert!(matches!(err, DxfError::TypeCast { code: 40, .. }));
    }
}
