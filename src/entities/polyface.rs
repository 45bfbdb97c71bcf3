//! Polyface mesh entity (POLYLINE with the polyface flag)
//!
//! Vertices added through [`PolyfaceMesh::add_vertex`] are deduplicated by
//! a rounding key: each coordinate is rounded to a configurable number of
//! decimal digits and the rounded triple is the vertex identity. This
//! trades geometric fidelity for file size; only the rounded key, not the
//! original magnitude, participates in the identity check.

use ahash::AHashMap;

use super::polyline::{PolylineFlags, VertexFlags};
use super::{DxfSerialize, GenericEntity};
use crate::error::{DxfError, Result};
use crate::schema::EntityKind;
use crate::tags::TagList;
use crate::types::{Color, Vector3};

/// Default rounding precision in decimal digits
const DEFAULT_PRECISION: i32 = 6;

/// A face record: 1-based vertex indices plus an optional face color
#[derive(Debug, Clone)]
struct FaceRecord {
    indices: [usize; 4],
    color: Option<Color>,
}

/// A polyface mesh with deduplicated vertices and indexed face records
#[derive(Debug, Clone)]
pub struct PolyfaceMesh {
    entity: GenericEntity,
    precision: i32,
    vertices: Vec<Vector3>,
    index_map: AHashMap<(i64, i64, i64), usize>,
    faces: Vec<FaceRecord>,
}

impl PolyfaceMesh {
    /// Create an empty polyface mesh with the default rounding precision
    pub fn new() -> Result<Self> {
        Self::with_precision(DEFAULT_PRECISION)
    }

    /// Create an empty polyface mesh with an explicit rounding precision
    /// (decimal digits used for the vertex identity key)
    pub fn with_precision(precision: i32) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Polyline)?;
        entity.set("flags", PolylineFlags::POLYFACE_MESH.bits())?;
        Ok(PolyfaceMesh {
            entity,
            precision,
            vertices: Vec::new(),
            index_map: AHashMap::new(),
            faces: Vec::new(),
        })
    }

    /// Add a vertex, reusing the index of any prior vertex that shares
    /// its rounding key. Returns the 0-based vertex index.
    pub fn add_vertex(&mut self, location: Vector3) -> usize {
        let key = self.rounding_key(location);
        if let Some(&index) = self.index_map.get(&key) {
            return index;
        }
        let index = self.vertices.len();
        self.vertices.push(location);
        self.index_map.insert(key, index);
        index
    }

    /// Add a triangular or quadrilateral face, resolving each corner
    /// through [`PolyfaceMesh::add_vertex`]. A triangle duplicates its
    /// third index into the fourth, matching the SOLID convention.
    pub fn add_face(&mut self, corners: &[Vector3], color: Option<Color>) -> Result<()> {
        if corners.len() < 3 || corners.len() > 4 {
            return Err(DxfError::invalid(
                "POLYLINE",
                format!("polyface face needs 3 or 4 corners, got {}", corners.len()),
            ));
        }
        let mut indices = [0usize; 4];
        for (slot, &corner) in indices.iter_mut().zip(corners) {
            *slot = self.add_vertex(corner) + 1; // 1-based on the wire
        }
        if corners.len() == 3 {
            indices[3] = indices[2];
        }
        self.faces.push(FaceRecord { indices, color });
        Ok(())
    }

    /// Number of stored (deduplicated) vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of face records
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn rounding_key(&self, v: Vector3) -> (i64, i64, i64) {
        let scale = 10f64.powi(self.precision);
        (
            (v.x * scale).round() as i64,
            (v.y * scale).round() as i64,
            (v.z * scale).round() as i64,
        )
    }
}

impl DxfSerialize for PolyfaceMesh {
    /// Record the vertex and face totals in the mesh counts
    fn extend(&mut self) -> Result<()> {
        self.entity.set("mcount", self.vertices.len() as i64)?;
        self.entity.set("ncount", self.faces.len() as i64)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.vertices.is_empty() {
            return Err(DxfError::invalid("POLYLINE", "polyface mesh is empty"));
        }
        Ok(())
    }

    /// Emit the mesh header, the vertex records, then the face records,
    /// terminated by SEQEND. The child sequence is rebuilt each render.
    fn assemble(&mut self) -> Result<TagList> {
        let mut tags = self.entity.render()?;
        for &location in &self.vertices {
            let mut vertex = GenericEntity::vertex(location)?;
            vertex.set(
                "flags",
                (VertexFlags::POLYFACE_MESH | VertexFlags::POLYGON_MESH).bits(),
            )?;
            tags.push_nested(vertex.render()?);
        }
        for face in &self.faces {
            let mut record = GenericEntity::vertex((0.0, 0.0, 0.0))?;
            record.set("flags", VertexFlags::POLYFACE_MESH.bits())?;
            if let Some(color) = face.color {
                record.set("color", color)?;
            }
            record.set("vtx0", face.indices[0] as i64)?;
            record.set("vtx1", face.indices[1] as i64)?;
            record.set("vtx2", face.indices[2] as i64)?;
            record.set("vtx3", face.indices[3] as i64)?;
            tags.push_nested(record.render()?);
        }
        tags.push_nested(GenericEntity::new(EntityKind::Seqend)?.render()?);
        Ok(tags)
    }
}
