//! Error types for dxfwrite-rs

use std::io;
use thiserror::Error;

/// Main error type for dxfwrite-rs operations
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A field name is not part of the entity type's attribute schema
    #[error("Unknown field '{field}' for entity type {entity}")]
    UnknownField {
        entity: &'static str,
        field: String,
    },

    /// A group code has no registered value kind.
    ///
    /// This indicates a programming error in static schema data, not bad
    /// user input.
    #[error("Unknown DXF group code: {0}")]
    UnknownGroupCode(i32),

    /// A raw value could not be cast to the kind its group code requires
    #[error("Cannot cast value '{value}' for group code {code}")]
    TypeCast { code: i32, value: String },

    /// An entity reached the assembly phase without satisfying its
    /// validity predicate
    #[error("Invalid {entity} entity: {reason}")]
    InvalidEntity {
        entity: &'static str,
        reason: String,
    },

    /// Child-index or table-index lookup out of bounds
    #[error("Index {index} out of range (limit {limit})")]
    IndexRange { index: usize, limit: usize },

    /// Error parsing a pen-style (CTB) resource
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for dxfwrite-rs operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl DxfError {
    /// Shorthand for an [`DxfError::InvalidEntity`] with a formatted reason.
    pub fn invalid(entity: &'static str, reason: impl Into<String>) -> Self {
        DxfError::InvalidEntity {
            entity,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_display() {
        let err = DxfError::UnknownField {
            entity: "LINE",
            field: "radius".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown field 'radius' for entity type LINE"
        );
    }

    #[test]
    fn test_type_cast_display() {
        let err = DxfError::TypeCast {
            code: 40,
            value: "not-a-number".to_string(),
        };
        assert!(err.to_string().contains("40"));
        assert!(err.to_string().contains("not-a-number"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let dxf_err: DxfError = io_err.into();
        assert!(matches!(dxf_err, DxfError::Io(_)));
    }
}
