//! Polyline entity and its vertex list

use bitflags::bitflags;

use super::{DxfSerialize, GenericEntity};
use crate::error::{DxfError, Result};
use crate::schema::{EntityKind, FieldKey, Point, Value};
use crate::tags::TagList;

bitflags! {
    /// POLYLINE flag word (group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PolylineFlags: i64 {
        /// Closed polyline
        const CLOSED = 1;
        /// Curve-fit vertices added
        const CURVE_FIT = 2;
        /// Spline-fit vertices added
        const SPLINE_FIT = 4;
        /// 3D polyline
        const POLYLINE_3D = 8;
        /// 3D polygon mesh
        const POLYGON_MESH = 16;
        /// Polygon mesh closed in the N direction
        const CLOSED_N = 32;
        /// Polyface mesh
        const POLYFACE_MESH = 64;
        /// Continuous linetype pattern
        const CONTINUOUS_LINETYPE = 128;
    }
}

bitflags! {
    /// VERTEX flag word (group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VertexFlags: i64 {
        /// Extra vertex created by curve-fitting
        const CURVE_FIT_EXTRA = 1;
        /// Curve-fit tangent defined
        const CURVE_FIT_TANGENT = 2;
        /// Spline vertex
        const SPLINE_VERTEX = 8;
        /// Spline control point
        const SPLINE_CONTROL = 16;
        /// 3D polyline vertex
        const POLYLINE_3D = 32;
        /// 3D polygon mesh vertex
        const POLYGON_MESH = 64;
        /// Polyface mesh vertex
        const POLYFACE_MESH = 128;
    }
}

/// A POLYLINE with an owned, ordered vertex list.
///
/// Invalid when the list is empty; the SEQEND sentinel is appended at
/// render time if the list does not already end with one.
#[derive(Debug, Clone)]
pub struct Polyline {
    entity: GenericEntity,
    vertices: Vec<GenericEntity>,
}

impl Polyline {
    /// Create an empty polyline
    pub fn new() -> Result<Self> {
        Ok(Polyline {
            entity: GenericEntity::new(EntityKind::Polyline)?,
            vertices: Vec::new(),
        })
    }

    /// Append a vertex at a location.
    ///
    /// When the list already carries its sentinel (after a render), the
    /// vertex is inserted ahead of it.
    pub fn add_vertex(&mut self, location: impl Into<Point>) -> Result<()> {
        let vertex = GenericEntity::vertex(location)?;
        let at = if self.has_seqend() {
            self.vertices.len() - 1
        } else {
            self.vertices.len()
        };
        self.vertices.insert(at, vertex);
        Ok(())
    }

    /// Append several vertices
    pub fn add_vertices<P: Into<Point>>(
        &mut self,
        locations: impl IntoIterator<Item = P>,
    ) -> Result<()> {
        for location in locations {
            self.add_vertex(location)?;
        }
        Ok(())
    }

    /// Mark the polyline closed
    pub fn close(&mut self) -> Result<()> {
        let flags = self.flags() | PolylineFlags::CLOSED;
        self.entity.set("flags", flags.bits())
    }

    /// Current flag word
    pub fn flags(&self) -> PolylineFlags {
        match self.entity.get("flags") {
            Ok(Some(Value::Int(bits))) => PolylineFlags::from_bits_truncate(bits),
            _ => PolylineFlags::empty(),
        }
    }

    /// Set a polyline field
    pub fn set(&mut self, field: impl Into<FieldKey>, value: impl Into<Value>) -> Result<()> {
        self.entity.set(field, value)
    }

    /// Read a polyline field
    pub fn get(&self, field: impl Into<FieldKey>) -> Result<Option<Value>> {
        self.entity.get(field)
    }

    /// Number of vertices (the sentinel not counted)
    pub fn len(&self) -> usize {
        self.vertices
            .iter()
            .filter(|v| v.kind() == EntityKind::Vertex)
            .count()
    }

    /// True when no vertices have been added
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn has_seqend(&self) -> bool {
        self.vertices
            .last()
            .is_some_and(|v| v.kind() == EntityKind::Seqend)
    }
}

impl DxfSerialize for Polyline {
    fn extend(&mut self) -> Result<()> {
        if !self.has_seqend() {
            self.vertices.push(GenericEntity::new(EntityKind::Seqend)?);
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(DxfError::invalid("POLYLINE", "polyline has no vertices"));
        }
        Ok(())
    }

    fn assemble(&mut self) -> Result<TagList> {
        let mut tags = self.entity.render()?;
        for vertex in &mut self.vertices {
            tags.push_nested(vertex.render()?);
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_polyline_invalid() {
        let mut polyline = Polyline::new().unwrap();
        assert!(matches!(
            polyline.render().unwrap_err(),
            DxfError::InvalidEntity {
                entity: "POLYLINE",
                ..
            }
        ));
    }

    #[test]
    fn test_vertices_then_single_seqend() {
        let mut polyline = Polyline::new().unwrap();
        polyline
            .add_vertices([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])
            .unwrap();
        let output = polyline.render().unwrap().to_dxf_string();
        assert_eq!(output.matches("  0\nVERTEX\n").count(), 3);
        assert_eq!(output.matches("  0\nSEQEND\n").count(), 1);
        assert!(output.contains(" 66\n1\n"));
    }

    #[test]
    fn test_seqend_idempotent_across_renders() {
        let mut polyline = Polyline::new().unwrap();
        polyline.add_vertex((0.0, 0.0)).unwrap();
        let first = polyline.render().unwrap().to_dxf_string();
        let second = polyline.render().unwrap().to_dxf_string();
        assert_eq!(first, second);
    }

    #[test]
    fn test_close_sets_flag() {
        let mut polyline = Polyline::new().unwrap();
        polyline.add_vertex((0.0, 0.0)).unwrap();
        polyline.close().unwrap();
        assert!(polyline.flags().contains(PolylineFlags::CLOSED));
        let output = polyline.render().unwrap().to_dxf_string();
        assert!(output.contains(" 70\n1\n"));
    }

    #[test]
    fn test_vertex_added_after_render_precedes_seqend() {
        let mut polyline = Polyline::new().unwrap();
        polyline.add_vertex((0.0, 0.0)).unwrap();
        polyline.render().unwrap();
        polyline.add_vertex((1.0, 1.0)).unwrap();
        let output = polyline.render().unwrap().to_dxf_string();
        assert_eq!(output.matches("  0\nVERTEX\n").count(), 2);
        assert!(output.rfind("  0\nVERTEX\n").unwrap() < output.find("  0\nSEQEND\n").unwrap());
    }
}
