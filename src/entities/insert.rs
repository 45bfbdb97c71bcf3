//! Insert entity (block reference) with attached attributes
//!
//! Attributes can be appended in world coordinates directly, or relative
//! to the referenced block's coordinate frame. In the relative case the
//! attribute's insert point, rotation, height, and width factor are
//! transformed into world space using the insert's own placement.

use super::{DxfSerialize, GenericEntity};
use crate::error::Result;
use crate::schema::{EntityKind, FieldKey, Point, Value};
use crate::tags::TagList;
use crate::types::Vector3;

/// A block reference with optional attached ATTRIB entities
#[derive(Debug, Clone)]
pub struct Insert {
    entity: GenericEntity,
    attribs: Vec<GenericEntity>,
}

impl Insert {
    /// Create a reference to a named block at an insert point
    pub fn new(blockname: impl Into<String>, insert: impl Into<Point>) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Insert)?;
        entity.set("blockname", blockname.into())?;
        entity.set("insert", insert.into())?;
        Ok(Insert {
            entity,
            attribs: Vec::new(),
        })
    }

    /// Set an insert field (scale factors, rotation, rows/columns, ...)
    pub fn set(&mut self, field: impl Into<FieldKey>, value: impl Into<Value>) -> Result<()> {
        self.entity.set(field, value)
    }

    /// Read an insert field
    pub fn get(&self, field: impl Into<FieldKey>) -> Result<Option<Value>> {
        self.entity.get(field)
    }

    /// Attach an attribute positioned in world coordinates
    pub fn add_attribute(&mut self, attrib: GenericEntity) {
        let at = if self.has_seqend() {
            self.attribs.len() - 1
        } else {
            self.attribs.len()
        };
        self.attribs.insert(at, attrib);
    }

    /// Attach an attribute positioned relative to the block's own
    /// coordinate frame.
    ///
    /// The attribute's insert point is mapped to world space in this
    /// order: translate to be basepoint-relative, apply the insert's
    /// x/y/z scale factors (scaling text height with y and adjusting the
    /// width factor by x/y to preserve the visual aspect), rotate by the
    /// insert's rotation plus the attribute's own rotation, translate back
    /// through the basepoint, then translate by the insert's own location.
    /// The attribute's rotation becomes its own rotation plus the
    /// insert's.
    pub fn add_attribute_relative(
        &mut self,
        mut attrib: GenericEntity,
        block_basepoint: impl Into<Point>,
    ) -> Result<()> {
        let basepoint = block_basepoint.into().to_vector3();
        let location = self
            .entity
            .point_value("insert")
            .unwrap_or(Vector3::ZERO);
        let sx = self.entity.float_value("xscale", 1.0);
        let sy = self.entity.float_value("yscale", 1.0);
        let sz = self.entity.float_value("zscale", 1.0);
        let insert_rotation = self.entity.float_value("rotation", 0.0);

        let local = attrib.point_value("insert").unwrap_or(Vector3::ZERO);
        let height = attrib.float_value("height", 1.0);
        let width_factor = attrib.float_value("xscale", 1.0);
        let own_rotation = attrib.float_value("rotation", 0.0);

        let point = (local - basepoint).scale(sx, sy, sz);
        let point = point.rotate_z((insert_rotation + own_rotation).to_radians());
        let world = point + basepoint + location;

        attrib.set("insert", world)?;
        attrib.set("rotation", own_rotation + insert_rotation)?;
        attrib.set("height", height * sy)?;
        attrib.set("xscale", width_factor * sx / sy)?;

        self.add_attribute(attrib);
        Ok(())
    }

    /// Number of attached attributes (the sentinel not counted)
    pub fn attribute_count(&self) -> usize {
        self.attribs
            .iter()
            .filter(|a| a.kind() != EntityKind::Seqend)
            .count()
    }

    fn has_seqend(&self) -> bool {
        self.attribs
            .last()
            .is_some_and(|a| a.kind() == EntityKind::Seqend)
    }
}

impl DxfSerialize for Insert {
    /// Flag the attribute sub-sequence and terminate it with SEQEND.
    /// Idempotent across repeated renders.
    fn extend(&mut self) -> Result<()> {
        if self.attribute_count() > 0 {
            self.entity.set("attribs_follow", 1)?;
            if !self.has_seqend() {
                self.attribs.push(GenericEntity::new(EntityKind::Seqend)?);
            }
        }
        Ok(())
    }

    fn assemble(&mut self) -> Result<TagList> {
        let mut tags = self.entity.render()?;
        for attrib in &mut self.attribs {
            tags.push_nested(attrib.render()?);
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_of(entity: &GenericEntity, field: &'static str) -> f64 {
        entity.float_value(field, f64::NAN)
    }

    #[test]
    fn test_insert_without_attributes_has_no_seqend() {
        let mut insert = Insert::new("PART", (5.0, 5.0)).unwrap();
        let output = insert.render().unwrap().to_dxf_string();
        assert!(output.contains("  2\nPART\n"));
        assert!(!output.contains("SEQEND"));
        assert!(!output.contains(" 66\n"));
    }

    #[test]
    fn test_attributes_terminated_by_single_seqend() {
        let mut insert = Insert::new("PART", (0.0, 0.0)).unwrap();
        insert.add_attribute(GenericEntity::attrib("TAG", "VALUE", (0.0, 0.0)).unwrap());
        let first = insert.render().unwrap().to_dxf_string();
        let second = insert.render().unwrap().to_dxf_string();
        assert_eq!(first, second);
        assert_eq!(second.matches("SEQEND").count(), 1);
        assert!(second.contains(" 66\n1\n"));
    }

    #[test]
    fn test_relative_attribute_rotation_and_distance() {
        // Insert rotated 45 degrees at the origin; attribute at local
        // (1, 1) with no rotation of its own ends up 45 degrees further
        // around, sqrt(2) from the origin.
        let mut insert = Insert::new("PART", (0.0, 0.0)).unwrap();
        insert.set("rotation", 45.0).unwrap();

        let attrib = GenericEntity::attrib("TAG", "VALUE", (1.0, 1.0)).unwrap();
        insert
            .add_attribute_relative(attrib, (0.0, 0.0, 0.0))
            .unwrap();

        let placed = &insert.attribs[0];
        assert_eq!(float_of(placed, "rotation"), 45.0);
        let world = placed.point_value("insert").unwrap();
        assert!((world.length() - 2.0f64.sqrt()).abs() < 1e-12);
        // (1, 1) is at 45 degrees; rotated 45 more it lies on the y axis
        assert!(world.x.abs() < 1e-12);
        assert!((world.y - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_relative_attribute_own_rotation_moves_point() {
        // Unrotated insert at the origin; an attribute at local (1, 0)
        // with its own rotation of 90 degrees lands on the y axis.
        let mut insert = Insert::new("PART", (0.0, 0.0)).unwrap();

        let mut attrib = GenericEntity::attrib("TAG", "VALUE", (1.0, 0.0)).unwrap();
        attrib.set("rotation", 90.0).unwrap();
        insert
            .add_attribute_relative(attrib, (0.0, 0.0, 0.0))
            .unwrap();

        let placed = &insert.attribs[0];
        assert_eq!(float_of(placed, "rotation"), 90.0);
        let world = placed.point_value("insert").unwrap();
        assert!(world.x.abs() < 1e-12);
        assert!((world.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_relative_attribute_own_rotation_combines_with_insert() {
        // Both rotations contribute: insert at 30 degrees, attribute at
        // 60 of its own, local (1, 0) ends up at 90 degrees total.
        let mut insert = Insert::new("PART", (0.0, 0.0)).unwrap();
        insert.set("rotation", 30.0).unwrap();

        let mut attrib = GenericEntity::attrib("TAG", "VALUE", (1.0, 0.0)).unwrap();
        attrib.set("rotation", 60.0).unwrap();
        insert
            .add_attribute_relative(attrib, (0.0, 0.0, 0.0))
            .unwrap();

        let placed = &insert.attribs[0];
        assert_eq!(float_of(placed, "rotation"), 90.0);
        let world = placed.point_value("insert").unwrap();
        assert!(world.x.abs() < 1e-12);
        assert!((world.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_relative_attribute_scaling_adjusts_text_metrics() {
        let mut insert = Insert::new("PART", (10.0, 0.0)).unwrap();
        insert.set("xscale", 2.0).unwrap();
        insert.set("yscale", 4.0).unwrap();

        let mut attrib = GenericEntity::attrib("TAG", "VALUE", (1.0, 1.0)).unwrap();
        attrib.set("height", 2.0).unwrap();
        insert
            .add_attribute_relative(attrib, (0.0, 0.0, 0.0))
            .unwrap();

        let placed = &insert.attribs[0];
        // Height scales with y; width factor compensates with x/y
        assert_eq!(float_of(placed, "height"), 8.0);
        assert_eq!(float_of(placed, "xscale"), 0.5);
        let world = placed.point_value("insert").unwrap();
        assert_eq!(world, Vector3::new(12.0, 4.0, 0.0));
    }

    #[test]
    fn test_relative_attribute_basepoint_round_trip() {
        // With no scaling or rotation the transform reduces to a pure
        // translation by the insert location.
        let mut insert = Insert::new("PART", (3.0, 4.0)).unwrap();
        let attrib = GenericEntity::attrib("TAG", "VALUE", (1.0, 2.0)).unwrap();
        insert
            .add_attribute_relative(attrib, (0.5, 0.5, 0.0))
            .unwrap();
        let world = insert.attribs[0].point_value("insert").unwrap();
        assert_eq!(world, Vector3::new(4.0, 6.0, 0.0));
    }

    #[test]
    fn test_attribute_inserted_before_existing_seqend() {
        let mut insert = Insert::new("PART", (0.0, 0.0)).unwrap();
        insert.add_attribute(GenericEntity::attrib("A", "1", (0.0, 0.0)).unwrap());
        insert.render().unwrap();
        insert.add_attribute(GenericEntity::attrib("B", "2", (0.0, 0.0)).unwrap());
        let output = insert.render().unwrap().to_dxf_string();
        assert_eq!(output.matches("SEQEND").count(), 1);
        assert!(output.rfind("  0\nATTRIB\n").unwrap() < output.find("  0\nSEQEND\n").unwrap());
    }
}
