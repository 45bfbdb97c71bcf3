//! # dxfwrite-rs
//!
//! A pure Rust library for building CAD drawings in memory and writing
//! them as DXF R12 (AC1009) ASCII files.
//!
//! Every entity is a schema-driven record: logical field names map to
//! DXF group codes through a static attribute schema, values are cast
//! against the group-code type registry when set, and output is produced
//! by a three-phase render protocol (extension hook, validity check,
//! tag assembly). Composite entities (blocks, inserts, polylines and
//! meshes) carry their own child data and sentinel records.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxfwrite_rs::{Drawing, GenericEntity};
//!
//! let mut drawing = Drawing::new()?;
//! drawing.add(GenericEntity::line((0.0, 0.0), (10.0, 10.0))?);
//! drawing.add(GenericEntity::circle((5.0, 5.0), 2.5)?);
//! drawing.save_file("output.dxf")?;
//! # Ok::<(), dxfwrite_rs::DxfError>(())
//! ```
//!
//! ## Architecture
//!
//! - `tags` - group-code/value pairs, the type registry and text output
//! - `schema` - per-entity-type attribute definitions and value factories
//! - `entities` - the generic entity, the render protocol and the
//!   composite kinds
//! - `tables` - named resource tables (layers, linetypes, text styles)
//! - `document` - the `Drawing` owning the four R12 sections
//! - `ctb` - plot-style (pen assignment) tables

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ctb;
pub mod document;
pub mod entities;
pub mod error;
pub mod schema;
pub mod tables;
pub mod tags;
pub mod types;

// Re-export commonly used types
pub use document::Drawing;
pub use entities::{
    AttributeFlags, Block, DxfSerialize, Entity, GenericEntity, Insert, PolyfaceMesh, PolygonMesh,
    Polyline, PolylineFlags, VertexFlags, Viewport, ViewportXdata,
};
pub use error::{DxfError, Result};
pub use schema::{EntityKind, FieldKey, Point, Value};
pub use tables::Table;
pub use tags::{Tag, TagList, TagValue};
pub use types::{Color, Vector2, Vector3};
