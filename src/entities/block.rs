//! Block definition entity
//!
//! A BLOCK owns an ordered sequence of sub-entities and is terminated by
//! an ENDBLK sentinel, appended automatically at render time. A block
//! with no content is invalid.

use super::{DxfSerialize, Entity, GenericEntity};
use crate::error::{DxfError, Result};
use crate::schema::{EntityKind, FieldKey, Point, Value};
use crate::tags::TagList;

/// A named block definition with owned child entities
#[derive(Debug, Clone)]
pub struct Block {
    name: String,
    entity: GenericEntity,
    children: Vec<Entity>,
}

impl Block {
    /// Create a block with its basepoint at the origin
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Block::with_basepoint(name, (0.0, 0.0, 0.0))
    }

    /// Create a block with an explicit basepoint
    pub fn with_basepoint(name: impl Into<String>, basepoint: impl Into<Point>) -> Result<Self> {
        let name = name.into();
        let mut entity = GenericEntity::new(EntityKind::Block)?;
        entity.set("name", name.clone())?;
        entity.set("basepoint", basepoint.into())?;
        Ok(Block {
            name,
            entity,
            children: Vec::new(),
        })
    }

    /// The block name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a sub-entity.
    ///
    /// When the block already carries its end sentinel (after a render),
    /// the new entity is inserted ahead of it.
    pub fn add(&mut self, entity: impl Into<Entity>) {
        let at = if self.children.last().is_some_and(Entity::is_endblk) {
            self.children.len() - 1
        } else {
            self.children.len()
        };
        self.children.insert(at, entity.into());
    }

    /// Set a block header field (flags, xref path, ...)
    pub fn set(&mut self, field: impl Into<FieldKey>, value: impl Into<Value>) -> Result<()> {
        self.entity.set(field, value)
    }

    /// Read a block header field
    pub fn get(&self, field: impl Into<FieldKey>) -> Result<Option<Value>> {
        self.entity.get(field)
    }

    /// Number of content entities (the end sentinel not counted)
    pub fn len(&self) -> usize {
        self.children.iter().filter(|e| !e.is_endblk()).count()
    }

    /// True if the block has no content entities
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DxfSerialize for Block {
    /// Append the ENDBLK sentinel if not already present. Idempotent:
    /// rendering twice never double-appends.
    fn extend(&mut self) -> Result<()> {
        if !self.children.iter().any(Entity::is_endblk) {
            self.children
                .push(GenericEntity::new(EntityKind::Endblk)?.into());
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(DxfError::invalid("BLOCK", "block has no content"));
        }
        Ok(())
    }

    fn assemble(&mut self) -> Result<TagList> {
        let mut tags = self.entity.render()?;
        for child in &mut self.children {
            tags.push_nested(child.render()?);
        }
        Ok(tags)
    }
}
