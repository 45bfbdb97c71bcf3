//! Resource tables (LTYPE, LAYER, STYLE, VIEW, VPORT, APPID, UCS)
//!
//! Table entries are ordinary schema-driven entities; the containers here
//! only key them by name and frame them with the TABLE/ENDTAB envelope.

use indexmap::IndexMap;

use crate::entities::{DxfSerialize, GenericEntity};
use crate::error::{DxfError, Result};
use crate::schema::{EntityKind, Value};
use crate::tags::{Tag, TagList};

pub mod linetype;

pub use linetype::{linetype, standard_linetypes, LinePattern, STANDARD_PATTERNS};

/// A named table of entries, keyed case-insensitively by entry name.
/// Insertion order is preserved; adding an entry with an existing name
/// replaces it in place.
#[derive(Debug, Clone)]
pub struct Table {
    name: &'static str,
    entries: IndexMap<String, GenericEntity>,
}

impl Table {
    /// Create an empty table for the given entry kind
    pub fn new(kind: EntityKind) -> Self {
        Table {
            name: kind.dxf_name(),
            entries: IndexMap::new(),
        }
    }

    /// The table's DXF name (LTYPE, LAYER, ...)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Add an entry, keyed by its `name` field
    pub fn add(&mut self, entry: GenericEntity) -> Result<()> {
        let key = entry_name(&entry)?.to_uppercase();
        self.entries.insert(key, entry);
        Ok(())
    }

    /// Look up an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&GenericEntity> {
        self.entries.get(&name.to_uppercase())
    }

    /// Look up an entry mutably by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut GenericEntity> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Check whether an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &GenericEntity> {
        self.entries.values()
    }

    /// Render the TABLE/ENDTAB envelope with all entries inside
    pub fn render(&mut self) -> Result<TagList> {
        let mut tags = TagList::new();
        tags.push(Tag::string(0, "TABLE")?);
        tags.push(Tag::string(2, self.name)?);
        tags.push(Tag::int(70, self.entries.len() as i64)?);
        for entry in self.entries.values_mut() {
            tags.push_nested(entry.render()?);
        }
        tags.push(Tag::string(0, "ENDTAB")?);
        Ok(tags)
    }
}

fn entry_name(entry: &GenericEntity) -> Result<String> {
    match entry.get("name")? {
        Some(Value::Str(name)) if !name.is_empty() => Ok(name),
        _ => Err(DxfError::invalid(
            entry.kind().dxf_name(),
            "table entry has no name",
        )),
    }
}

/// Create a LAYER entry with the construction defaults (color 7,
/// linetype CONTINUOUS, flags 0)
pub fn layer(name: &str) -> Result<GenericEntity> {
    named_entry(EntityKind::Layer, name)
}

/// Create a STYLE entry referencing a font file
pub fn textstyle(name: &str, font: &str) -> Result<GenericEntity> {
    let mut entry = named_entry(EntityKind::Style, name)?;
    entry.set("font", font)?;
    Ok(entry)
}

/// Create a VIEW entry
pub fn view(name: &str) -> Result<GenericEntity> {
    named_entry(EntityKind::View, name)
}

/// Create a VPORT entry
pub fn vport(name: &str) -> Result<GenericEntity> {
    named_entry(EntityKind::Vport, name)
}

/// Create an APPID entry
pub fn appid(name: &str) -> Result<GenericEntity> {
    named_entry(EntityKind::Appid, name)
}

/// Create a UCS entry
pub fn ucs(name: &str) -> Result<GenericEntity> {
    named_entry(EntityKind::Ucs, name)
}

fn named_entry(kind: EntityKind, name: &str) -> Result<GenericEntity> {
    let mut entry = GenericEntity::new(kind)?;
    entry.set("name", name)?;
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_envelope() {
        let mut table = Table::new(EntityKind::Layer);
        table.add(layer("WALLS").unwrap()).unwrap();
        let output = table.render().unwrap().to_dxf_string();
        assert!(output.starts_with("  0\nTABLE\n  2\nLAYER\n 70\n1\n"));
        assert!(output.contains("  0\nLAYER\n  2\nWALLS\n"));
        assert!(output.ends_with("  0\nENDTAB\n"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut table = Table::new(EntityKind::Layer);
        table.add(layer("Walls").unwrap()).unwrap();
        assert!(table.contains("WALLS"));
        assert!(table.get("walls").is_some());
    }

    #[test]
    fn test_add_replaces_in_place() {
        let mut table = Table::new(EntityKind::Layer);
        table.add(layer("A").unwrap()).unwrap();
        table.add(layer("B").unwrap()).unwrap();
        let mut replacement = layer("A").unwrap();
        replacement.set("color", 3).unwrap();
        table.add(replacement).unwrap();
        assert_eq!(table.len(), 2);
        // original position kept
        let names: Vec<_> = table
            .iter()
            .map(|e| entry_name(e).unwrap())
            .collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_unnamed_entry_rejected() {
        let mut table = Table::new(EntityKind::Appid);
        let entry = GenericEntity::new(EntityKind::Appid).unwrap();
        assert!(table.add(entry).is_err());
    }

    #[test]
    fn test_layer_defaults() {
        let mut entry = layer("0").unwrap();
        let output = entry.render().unwrap().to_dxf_string();
        assert!(output.contains(" 62\n7\n"));
        assert!(output.contains("  6\nCONTINUOUS\n"));
    }

    #[test]
    fn test_textstyle_font() {
        let mut entry = textstyle("STANDARD", "txt").unwrap();
        let output = entry.render().unwrap().to_dxf_string();
        assert!(output.contains("  3\ntxt\n"));
    }
}
