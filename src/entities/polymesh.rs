//! Polygon mesh entity (POLYLINE with the polygon-mesh flag)

use ahash::AHashMap;

use super::polyline::{PolylineFlags, VertexFlags};
use super::{DxfSerialize, GenericEntity};
use crate::error::{DxfError, Result};
use crate::schema::{EntityKind, FieldKey, Value};
use crate::tags::TagList;
use crate::types::Vector3;

/// Grid dimensions accepted by DXF (mesh M/N counts are 16-bit)
const MAX_GRID: usize = 256;

/// A polygon mesh over a fixed M x N vertex grid.
///
/// Vertices are stored sparsely; unset cells default to the origin.
#[derive(Debug, Clone)]
pub struct PolygonMesh {
    entity: GenericEntity,
    rows: usize,
    cols: usize,
    cells: AHashMap<(usize, usize), Vector3>,
}

impl PolygonMesh {
    /// Create a mesh with a fixed grid size
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows < 2 || rows > MAX_GRID {
            return Err(DxfError::IndexRange {
                index: rows,
                limit: MAX_GRID,
            });
        }
        if cols < 2 || cols > MAX_GRID {
            return Err(DxfError::IndexRange {
                index: cols,
                limit: MAX_GRID,
            });
        }
        let mut entity = GenericEntity::new(EntityKind::Polyline)?;
        entity.set("flags", PolylineFlags::POLYGON_MESH.bits())?;
        entity.set("mcount", rows as i64)?;
        entity.set("ncount", cols as i64)?;
        Ok(PolygonMesh {
            entity,
            rows,
            cols,
            cells: AHashMap::new(),
        })
    }

    /// Grid size as (rows, cols)
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Set the vertex at a grid cell
    pub fn set_vertex(
        &mut self,
        row: usize,
        col: usize,
        location: impl Into<Vector3>,
    ) -> Result<()> {
        if row >= self.rows {
            return Err(DxfError::IndexRange {
                index: row,
                limit: self.rows,
            });
        }
        if col >= self.cols {
            return Err(DxfError::IndexRange {
                index: col,
                limit: self.cols,
            });
        }
        self.cells.insert((row, col), location.into());
        Ok(())
    }

    /// Read the vertex at a grid cell; unset cells are the origin
    pub fn vertex(&self, row: usize, col: usize) -> Result<Vector3> {
        if row >= self.rows || col >= self.cols {
            return Err(DxfError::IndexRange {
                index: row.max(col),
                limit: self.rows.max(self.cols),
            });
        }
        Ok(self.cells.get(&(row, col)).copied().unwrap_or(Vector3::ZERO))
    }

    /// Set a polyline-level field (closed flags, smooth densities, ...)
    pub fn set(&mut self, field: impl Into<FieldKey>, value: impl Into<Value>) -> Result<()> {
        self.entity.set(field, value)
    }
}

impl DxfSerialize for PolygonMesh {
    /// Emit the full row-major grid, each cell as a polygon-mesh VERTEX,
    /// terminated by SEQEND. The vertex sequence is rebuilt each render.
    fn assemble(&mut self) -> Result<TagList> {
        let mut tags = self.entity.render()?;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let location = self.cells.get(&(row, col)).copied().unwrap_or(Vector3::ZERO);
                let mut vertex = GenericEntity::vertex(location)?;
                vertex.set("flags", VertexFlags::POLYGON_MESH.bits())?;
                tags.push_nested(vertex.render()?);
            }
        }
        tags.push_nested(GenericEntity::new(EntityKind::Seqend)?.render()?);
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_emits_full_grid() {
        let mut mesh = PolygonMesh::new(2, 3).unwrap();
        mesh.set_vertex(0, 0, Vector3::new(1.0, 2.0, 3.0)).unwrap();
        let output = mesh.render().unwrap().to_dxf_string();
        assert_eq!(output.matches("  0\nVERTEX\n").count(), 6);
        assert_eq!(output.matches("  0\nSEQEND\n").count(), 1);
        assert!(output.contains(" 71\n2\n"));
        assert!(output.contains(" 72\n3\n"));
        assert!(output.contains(" 70\n16\n"));
    }

    #[test]
    fn test_unset_cells_default_to_origin() {
        let mesh = PolygonMesh::new(2, 2).unwrap();
        assert_eq!(mesh.vertex(1, 1).unwrap(), Vector3::ZERO);
    }

    #[test]
    fn test_set_vertex_out_of_grid() {
        let mut mesh = PolygonMesh::new(2, 2).unwrap();
        let err = mesh.set_vertex(2, 0, Vector3::ZERO).unwrap_err();
        assert!(matches!(err, DxfError::IndexRange { index: 2, limit: 2 }));
    }

    #[test]
    fn test_grid_size_limits() {
        assert!(PolygonMesh::new(1, 2).is_err());
        assert!(PolygonMesh::new(2, 257).is_err());
    }

    #[test]
    fn test_repeat_render_stable() {
        let mut mesh = PolygonMesh::new(2, 2).unwrap();
        mesh.set_vertex(0, 1, Vector3::new(1.0, 0.0, 0.0)).unwrap();
        let first = mesh.render().unwrap().to_dxf_string();
        let second = mesh.render().unwrap().to_dxf_string();
        assert_eq!(first, second);
    }
}
