//! DXF entity types and the serialization protocol

pub mod block;
pub mod generic;
pub mod insert;
pub mod polyface;
pub mod polyline;
pub mod polymesh;
pub mod viewport;

pub use block::Block;
pub use generic::{AttributeFlags, GenericEntity};
pub use insert::Insert;
pub use polyface::PolyfaceMesh;
pub use polyline::{Polyline, PolylineFlags, VertexFlags};
pub use polymesh::PolygonMesh;
pub use viewport::{Viewport, ViewportXdata};

use crate::error::Result;
use crate::schema::EntityKind;
use crate::tags::TagList;

/// Three-phase serialization protocol shared by all tag-producing objects.
///
/// `render` always runs the phases in order: the extension hook (derive or
/// inject fields immediately before output), the validity predicate, and
/// tag assembly. A failed validity check aborts before any output exists,
/// so callers never see a partial tag sequence.
pub trait DxfSerialize {
    /// Extension hook, run first. Default: no-op.
    fn extend(&mut self) -> Result<()> {
        Ok(())
    }

    /// Validity predicate, run second. Default: always valid.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Emit the tag sequence. Only called after a successful validity
    /// check.
    fn assemble(&mut self) -> Result<TagList>;

    /// Run the full three-phase protocol.
    fn render(&mut self) -> Result<TagList> {
        self.extend()?;
        self.validate()?;
        self.assemble()
    }
}

/// Any renderable entity: the generic schema-driven record, or one of the
/// composite kinds carrying child data.
#[derive(Debug, Clone)]
pub enum Entity {
    /// Schema-driven entity with no child data
    Generic(GenericEntity),
    /// Block definition with owned sub-entities
    Block(Block),
    /// Block reference with attached attributes
    Insert(Insert),
    /// Polyline with an owned vertex list
    Polyline(Polyline),
    /// Polygon mesh over a fixed M x N grid
    PolygonMesh(PolygonMesh),
    /// Polyface mesh with deduplicated vertices and face records
    PolyfaceMesh(PolyfaceMesh),
    /// Viewport with its fixed extended-data tail
    Viewport(Viewport),
}

impl Entity {
    /// The DXF type name this entity serializes with
    pub fn dxf_name(&self) -> &'static str {
        match self {
            Entity::Generic(e) => e.kind().dxf_name(),
            Entity::Block(_) => "BLOCK",
            Entity::Insert(_) => "INSERT",
            Entity::Polyline(_) | Entity::PolygonMesh(_) | Entity::PolyfaceMesh(_) => "POLYLINE",
            Entity::Viewport(_) => "VIEWPORT",
        }
    }

    /// True for the end-of-block sentinel
    pub(crate) fn is_endblk(&self) -> bool {
        matches!(self, Entity::Generic(e) if e.kind() == EntityKind::Endblk)
    }
}

impl DxfSerialize for Entity {
    fn extend(&mut self) -> Result<()> {
        match self {
            Entity::Generic(e) => e.extend(),
            Entity::Block(e) => e.extend(),
            Entity::Insert(e) => e.extend(),
            Entity::Polyline(e) => e.extend(),
            Entity::PolygonMesh(e) => e.extend(),
            Entity::PolyfaceMesh(e) => e.extend(),
            Entity::Viewport(e) => e.extend(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Entity::Generic(e) => e.validate(),
            Entity::Block(e) => e.validate(),
            Entity::Insert(e) => e.validate(),
            Entity::Polyline(e) => e.validate(),
            Entity::PolygonMesh(e) => e.validate(),
            Entity::PolyfaceMesh(e) => e.validate(),
            Entity::Viewport(e) => e.validate(),
        }
    }

    fn assemble(&mut self) -> Result<TagList> {
        match self {
            Entity::Generic(e) => e.assemble(),
            Entity::Block(e) => e.assemble(),
            Entity::Insert(e) => e.assemble(),
            Entity::Polyline(e) => e.assemble(),
            Entity::PolygonMesh(e) => e.assemble(),
            Entity::PolyfaceMesh(e) => e.assemble(),
            Entity::Viewport(e) => e.assemble(),
        }
    }
}

impl From<GenericEntity> for Entity {
    fn from(e: GenericEntity) -> Self {
        Entity::Generic(e)
    }
}

impl From<Block> for Entity {
    fn from(e: Block) -> Self {
        Entity::Block(e)
    }
}

impl From<Insert> for Entity {
    fn from(e: Insert) -> Self {
        Entity::Insert(e)
    }
}

impl From<Polyline> for Entity {
    fn from(e: Polyline) -> Self {
        Entity::Polyline(e)
    }
}

impl From<PolygonMesh> for Entity {
    fn from(e: PolygonMesh) -> Self {
        Entity::PolygonMesh(e)
    }
}

impl From<PolyfaceMesh> for Entity {
    fn from(e: PolyfaceMesh) -> Self {
        Entity::PolyfaceMesh(e)
    }
}

impl From<Viewport> for Entity {
    fn from(e: Viewport) -> Self {
        Entity::Viewport(e)
    }
}
