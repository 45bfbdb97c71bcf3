//! DXF tags and tag sequences
//!
//! A tag is the elementary serializable unit of a DXF file: a group code
//! paired with a typed value. Tags render as two lines, the code
//! right-aligned in a 3-character field followed by the value. Entities
//! produce nested tag sequences which flatten depth-first into the literal
//! output order.

pub mod group_code;

use std::fmt;

use crate::error::Result;

pub use group_code::ValueKind;

/// A typed tag value
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Text value
    Str(String),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Boolean flag
    Bool(bool),
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Str(s) => write!(f, "{}", s),
            TagValue::Int(i) => write!(f, "{}", i),
            TagValue::Float(v) => write!(f, "{}", format_float(*v)),
            TagValue::Bool(b) => write!(f, "{}", if *b { 1 } else { 0 }),
        }
    }
}

/// Format a float for DXF output.
///
/// Always includes a decimal point and never uses scientific notation.
/// The shortest representation that parses back to the same bits is used,
/// so values survive a write/read cycle unchanged.
pub fn format_float(value: f64) -> String {
    let formatted = format!("{}", value);
    if formatted.contains('.') || !value.is_finite() {
        formatted
    } else {
        format!("{}.0", formatted)
    }
}

/// An immutable (group code, value) pair
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    code: i32,
    value: TagValue,
}

impl Tag {
    /// Create a tag, casting the value to the kind its group code requires.
    ///
    /// Fails with [`crate::DxfError::UnknownGroupCode`] for an unregistered
    /// code and [`crate::DxfError::TypeCast`] when the cast is impossible.
    pub fn new(code: i32, value: TagValue) -> Result<Self> {
        let value = group_code::cast(value, code)?;
        Ok(Tag { code, value })
    }

    /// Create a string tag
    pub fn string(code: i32, value: impl Into<String>) -> Result<Self> {
        Tag::new(code, TagValue::Str(value.into()))
    }

    /// Create an integer tag
    pub fn int(code: i32, value: i64) -> Result<Self> {
        Tag::new(code, TagValue::Int(value))
    }

    /// Create a float tag
    pub fn float(code: i32, value: f64) -> Result<Self> {
        Tag::new(code, TagValue::Float(value))
    }

    /// Get the group code
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Get the value
    pub fn value(&self) -> &TagValue {
        &self.value
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Right-align the code in a 3-character field; codes >= 1000 get
        // no padding.
        if self.code < 10 {
            writeln!(f, "  {}", self.code)?;
        } else if self.code < 100 {
            writeln!(f, " {}", self.code)?;
        } else {
            writeln!(f, "{}", self.code)?;
        }
        writeln!(f, "{}", self.value)
    }
}

/// One item of a tag sequence: a leaf tag or a nested sequence
#[derive(Debug, Clone)]
pub enum TagItem {
    /// Leaf tag
    Tag(Tag),
    /// Nested sequence, flattened transparently on output
    Nested(TagList),
}

/// An ordered, arbitrarily nested tag sequence.
///
/// Flattening (depth-first, preserving order) yields the literal output
/// order. Two sequences are equal iff their flattened leaf sequences are
/// pairwise equal.
#[derive(Debug, Clone, Default)]
pub struct TagList {
    items: Vec<TagItem>,
}

impl TagList {
    /// Create an empty tag sequence
    pub fn new() -> Self {
        TagList { items: Vec::new() }
    }

    /// Append a leaf tag
    pub fn push(&mut self, tag: Tag) {
        self.items.push(TagItem::Tag(tag));
    }

    /// Append a nested sequence
    pub fn push_nested(&mut self, tags: TagList) {
        self.items.push(TagItem::Nested(tags));
    }

    /// Number of direct items (not flattened leaves)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the sequence has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Flatten into the leaf tags in output order
    pub fn flatten(&self) -> Vec<&Tag> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Tag>) {
        for item in &self.items {
            match item {
                TagItem::Tag(tag) => leaves.push(tag),
                TagItem::Nested(list) => list.collect_leaves(leaves),
            }
        }
    }

    /// Render the flattened sequence as DXF text
    pub fn to_dxf_string(&self) -> String {
        let mut out = String::new();
        for tag in self.flatten() {
            out.push_str(&tag.to_string());
        }
        out
    }
}

impl PartialEq for TagList {
    fn eq(&self, other: &Self) -> bool {
        self.flatten() == other.flatten()
    }
}

impl From<Tag> for TagList {
    fn from(tag: Tag) -> Self {
        let mut list = TagList::new();
        list.push(tag);
        list
    }
}

impl FromIterator<Tag> for TagList {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut list = TagList::new();
        for tag in iter {
            list.push(tag);
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_render_code_padding() {
        assert_eq!(Tag::string(0, "LINE").unwrap().to_string(), "  0\nLINE\n");
        assert_eq!(Tag::int(62, 7).unwrap().to_string(), " 62\n7\n");
        assert_eq!(
            Tag::string(100, "AcDbEntity").unwrap().to_string(),
            "100\nAcDbEntity\n"
        );
        assert_eq!(
            Tag::string(1000, "MVIEW").unwrap().to_string(),
            "1000\nMVIEW\n"
        );
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-2.5), "-2.5");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(1234.5), "1234.5");
    }

    #[test]
    fn test_float_formatting_round_trips() {
        // Values needing 16-17 significant digits keep every digit
        for value in [
            0.1 + 0.2,
            1.0 / 3.0,
            2.0f64.sqrt(),
            f64::MAX,
            5e-324,
            -1.2345678901234567e8,
        ] {
            let text = format_float(value);
            assert!(!text.contains('e') && !text.contains('E'), "{}", text);
            assert!(text.contains('.'), "{}", text);
            assert_eq!(text.parse::<f64>().unwrap(), value, "{}", text);
        }
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_bool_renders_as_digit() {
        let tag = Tag::new(290, TagValue::Bool(true)).unwrap();
        assert_eq!(tag.to_string(), "290\n1\n");
    }

    #[test]
    fn test_tag_casts_on_creation() {
        // Integer input for a float code becomes a float
        let tag = Tag::new(40, TagValue::Int(3)).unwrap();
        assert_eq!(tag.value(), &TagValue::Float(3.0));
        assert_eq!(tag.to_string(), " 40\n3.0\n");
    }

    #[test]
    fn test_flatten_preserves_order() {
        let mut inner = TagList::new();
        inner.push(Tag::float(10, 1.0).unwrap());
        inner.push(Tag::float(20, 2.0).unwrap());

        let mut outer = TagList::new();
        outer.push(Tag::string(0, "LINE").unwrap());
        outer.push_nested(inner);
        outer.push(Tag::string(8, "0").unwrap());

        let codes: Vec<i32> = outer.flatten().iter().map(|t| t.code()).collect();
        assert_eq!(codes, vec![0, 10, 20, 8]);
    }

    #[test]
    fn test_leafwise_equality() {
        let mut nested = TagList::new();
        let mut inner = TagList::new();
        inner.push(Tag::float(10, 1.0).unwrap());
        nested.push_nested(inner);

        let mut flat = TagList::new();
        flat.push(Tag::float(10, 1.0).unwrap());

        assert_eq!(nested, flat);
    }

    #[test]
    fn test_deeply_nested_flatten() {
        let mut level3 = TagList::new();
        level3.push(Tag::int(70, 1).unwrap());
        let mut level2 = TagList::new();
        level2.push_nested(level3);
        let mut level1 = TagList::new();
        level1.push_nested(level2);
        assert_eq!(level1.flatten().len(), 1);
        assert_eq!(level1.to_dxf_string(), " 70\n1\n");
    }
}
