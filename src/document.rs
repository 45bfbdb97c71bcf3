//! Drawing document: the four R12 sections and the top-level render

use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::entities::{DxfSerialize, Entity};
use crate::error::Result;
use crate::schema::{EntityKind, Point};
use crate::tables::{self, Table};
use crate::tags::{Tag, TagList};

/// An in-memory R12 drawing: header variables, resource tables, block
/// definitions and model-space entities. Each drawing is independently
/// renderable; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct Drawing {
    header: IndexMap<String, TagList>,
    vports: Table,
    linetypes: Table,
    layers: Table,
    styles: Table,
    views: Table,
    ucs_table: Table,
    appids: Table,
    blocks: Vec<Entity>,
    entities: Vec<Entity>,
}

impl Drawing {
    /// Create a drawing with the R12 defaults: AC1009 version stamp,
    /// origin insertion base and extents, linetype CONTINUOUS, layer 0
    /// and text style STANDARD.
    pub fn new() -> Result<Self> {
        let mut drawing = Drawing {
            header: IndexMap::new(),
            vports: Table::new(EntityKind::Vport),
            linetypes: Table::new(EntityKind::Ltype),
            layers: Table::new(EntityKind::Layer),
            styles: Table::new(EntityKind::Style),
            views: Table::new(EntityKind::View),
            ucs_table: Table::new(EntityKind::Ucs),
            appids: Table::new(EntityKind::Appid),
            blocks: Vec::new(),
            entities: Vec::new(),
        };
        drawing.set_header_str("$ACADVER", "AC1009")?;
        drawing.set_header_point("$INSBASE", (0.0, 0.0, 0.0))?;
        drawing.set_header_point("$EXTMIN", (0.0, 0.0, 0.0))?;
        drawing.set_header_point("$EXTMAX", (100.0, 100.0, 0.0))?;
        drawing
            .linetypes
            .add(tables::linetype("CONTINUOUS", "Solid line", &[0.0])?)?;
        drawing.layers.add(tables::layer("0")?)?;
        drawing.styles.add(tables::textstyle("STANDARD", "txt")?)?;
        Ok(drawing)
    }

    /// Set a header variable to an arbitrary tag list. Overwrites any
    /// prior value; insertion order of first assignment is kept.
    pub fn set_header(&mut self, name: &str, tags: TagList) {
        self.header.insert(name.to_string(), tags);
    }

    /// Set a string-valued header variable (group code 1)
    pub fn set_header_str(&mut self, name: &str, value: &str) -> Result<()> {
        self.set_header(name, TagList::from(Tag::string(1, value)?));
        Ok(())
    }

    /// Set an integer-valued header variable (group code 70)
    pub fn set_header_int(&mut self, name: &str, value: i64) -> Result<()> {
        self.set_header(name, TagList::from(Tag::int(70, value)?));
        Ok(())
    }

    /// Set a float-valued header variable (group code 40)
    pub fn set_header_float(&mut self, name: &str, value: f64) -> Result<()> {
        self.set_header(name, TagList::from(Tag::float(40, value)?));
        Ok(())
    }

    /// Set a point-valued header variable (group codes 10/20/30)
    pub fn set_header_point(&mut self, name: &str, point: impl Into<Point>) -> Result<()> {
        let p = point.into().to_vector3();
        let mut tags = TagList::new();
        tags.push(Tag::float(10, p.x)?);
        tags.push(Tag::float(20, p.y)?);
        tags.push(Tag::float(30, p.z)?);
        self.set_header(name, tags);
        Ok(())
    }

    /// Add a model-space entity
    pub fn add(&mut self, entity: impl Into<Entity>) {
        self.entities.push(entity.into());
    }

    /// Add a block definition
    pub fn add_block(&mut self, block: impl Into<Entity>) {
        self.blocks.push(block.into());
    }

    pub fn vports(&mut self) -> &mut Table {
        &mut self.vports
    }

    pub fn linetypes(&mut self) -> &mut Table {
        &mut self.linetypes
    }

    pub fn layers(&mut self) -> &mut Table {
        &mut self.layers
    }

    pub fn styles(&mut self) -> &mut Table {
        &mut self.styles
    }

    pub fn views(&mut self) -> &mut Table {
        &mut self.views
    }

    pub fn ucs_table(&mut self) -> &mut Table {
        &mut self.ucs_table
    }

    pub fn appids(&mut self) -> &mut Table {
        &mut self.appids
    }

    /// Number of model-space entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Render the whole document. Any entity failure aborts the render
    /// before output exists; a partial document is never produced.
    pub fn render_to_string(&mut self) -> Result<String> {
        let mut tags = TagList::new();
        self.render_header(&mut tags)?;
        self.render_tables(&mut tags)?;
        self.render_blocks(&mut tags)?;
        self.render_entities(&mut tags)?;
        tags.push(Tag::string(0, "EOF")?);
        Ok(tags.to_dxf_string())
    }

    /// Render and write the document to `path`
    pub fn save_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let text = self.render_to_string()?;
        fs::write(path, text)?;
        Ok(())
    }

    fn render_header(&self, tags: &mut TagList) -> Result<()> {
        tags.push(Tag::string(0, "SECTION")?);
        tags.push(Tag::string(2, "HEADER")?);
        for (name, value) in &self.header {
            tags.push(Tag::string(9, name.as_str())?);
            tags.push_nested(value.clone());
        }
        tags.push(Tag::string(0, "ENDSEC")?);
        Ok(())
    }

    fn render_tables(&mut self, tags: &mut TagList) -> Result<()> {
        tags.push(Tag::string(0, "SECTION")?);
        tags.push(Tag::string(2, "TABLES")?);
        tags.push_nested(self.vports.render()?);
        tags.push_nested(self.linetypes.render()?);
        tags.push_nested(self.layers.render()?);
        tags.push_nested(self.styles.render()?);
        tags.push_nested(self.views.render()?);
        tags.push_nested(self.ucs_table.render()?);
        tags.push_nested(self.appids.render()?);
        tags.push(Tag::string(0, "ENDSEC")?);
        Ok(())
    }

    fn render_blocks(&mut self, tags: &mut TagList) -> Result<()> {
        tags.push(Tag::string(0, "SECTION")?);
        tags.push(Tag::string(2, "BLOCKS")?);
        for block in &mut self.blocks {
            tags.push_nested(block.render()?);
        }
        tags.push(Tag::string(0, "ENDSEC")?);
        Ok(())
    }

    fn render_entities(&mut self, tags: &mut TagList) -> Result<()> {
        tags.push(Tag::string(0, "SECTION")?);
        tags.push(Tag::string(2, "ENTITIES")?);
        for entity in &mut self.entities {
            tags.push_nested(entity.render()?);
        }
        tags.push(Tag::string(0, "ENDSEC")?);
        Ok(())
    }
}
