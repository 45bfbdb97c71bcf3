//! DXF group code value kinds
//!
//! Every group code maps to exactly one value kind (string, integer,
//! float, or boolean). The ranges below follow the DXF reference; they are
//! flattened once at startup into a code -> kind map for O(1) lookup.

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::error::{DxfError, Result};
use crate::tags::TagValue;

/// The value kind a group code requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Text value
    Str,
    /// Integer value
    Int,
    /// Floating-point value
    Float,
    /// Boolean flag, written as 1/0
    Bool,
}

/// Inclusive (start, end, kind) ranges covering all known group codes
const GROUP_CODE_RANGES: &[(i32, i32, ValueKind)] = &[
    (0, 9, ValueKind::Str),
    // Coordinate and measurement range
    (10, 59, ValueKind::Float),
    (60, 79, ValueKind::Int),
    (90, 99, ValueKind::Int),
    // Subclass and control markers
    (100, 100, ValueKind::Str),
    (102, 102, ValueKind::Str),
    (105, 105, ValueKind::Str),
    (110, 149, ValueKind::Float),
    (170, 179, ValueKind::Int),
    (210, 239, ValueKind::Float),
    (270, 289, ValueKind::Int),
    (290, 299, ValueKind::Bool),
    (300, 369, ValueKind::Str),
    (370, 389, ValueKind::Int),
    (390, 399, ValueKind::Str),
    (400, 409, ValueKind::Int),
    (410, 419, ValueKind::Str),
    (420, 429, ValueKind::Int),
    (430, 439, ValueKind::Str),
    (440, 459, ValueKind::Int),
    (460, 469, ValueKind::Float),
    (470, 479, ValueKind::Str),
    // Extended data
    (999, 1009, ValueKind::Str),
    (1010, 1059, ValueKind::Float),
    (1060, 1071, ValueKind::Int),
];

static GROUP_CODE_KINDS: Lazy<AHashMap<i32, ValueKind>> = Lazy::new(|| {
    let mut kinds = AHashMap::new();
    for &(start, end, kind) in GROUP_CODE_RANGES {
        for code in start..=end {
            kinds.insert(code, kind);
        }
    }
    kinds
});

/// Look up the value kind for a group code
pub fn kind_of(code: i32) -> Result<ValueKind> {
    GROUP_CODE_KINDS
        .get(&code)
        .copied()
        .ok_or(DxfError::UnknownGroupCode(code))
}

/// Verify that a tag value matches the kind assigned to a group code
pub fn check(value: &TagValue, code: i32) -> Result<()> {
    let kind = kind_of(code)?;
    let matches = matches!(
        (kind, value),
        (ValueKind::Str, TagValue::Str(_))
            | (ValueKind::Int, TagValue::Int(_))
            | (ValueKind::Float, TagValue::Float(_))
            | (ValueKind::Bool, TagValue::Bool(_))
    );
    if matches {
        Ok(())
    } else {
        Err(DxfError::TypeCast {
            code,
            value: value.to_string(),
        })
    }
}

/// Cast a tag value to the kind required by a group code.
///
/// Numeric conversions follow the usual narrowing rules (float to int
/// truncates); strings are parsed for numeric codes and fail when they do
/// not parse.
pub fn cast(value: TagValue, code: i32) -> Result<TagValue> {
    let kind = kind_of(code)?;
    let fail = |value: &TagValue| DxfError::TypeCast {
        code,
        value: value.to_string(),
    };
    let cast = match (kind, &value) {
        (ValueKind::Str, TagValue::Str(_)) => value,
        (ValueKind::Str, other) => TagValue::Str(other.to_string()),

        (ValueKind::Int, TagValue::Int(_)) => value,
        (ValueKind::Int, TagValue::Float(f)) => TagValue::Int(*f as i64),
        (ValueKind::Int, TagValue::Bool(b)) => TagValue::Int(*b as i64),
        (ValueKind::Int, TagValue::Str(s)) => {
            TagValue::Int(s.trim().parse().map_err(|_| fail(&value))?)
        }

        (ValueKind::Float, TagValue::Float(_)) => value,
        (ValueKind::Float, TagValue::Int(i)) => TagValue::Float(*i as f64),
        (ValueKind::Float, TagValue::Bool(b)) => TagValue::Float(*b as i64 as f64),
        (ValueKind::Float, TagValue::Str(s)) => {
            TagValue::Float(s.trim().parse().map_err(|_| fail(&value))?)
        }

        (ValueKind::Bool, TagValue::Bool(_)) => value,
        (ValueKind::Bool, TagValue::Int(i)) => TagValue::Bool(*i != 0),
        (ValueKind::Bool, TagValue::Float(f)) => TagValue::Bool(*f != 0.0),
        (ValueKind::Bool, TagValue::Str(s)) => {
            TagValue::Bool(s.trim().parse::<i64>().map_err(|_| fail(&value))? != 0)
        }
    };
    Ok(cast)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!(kind_of(0).unwrap(), ValueKind::Str);
        assert_eq!(kind_of(10).unwrap(), ValueKind::Float);
        assert_eq!(kind_of(62).unwrap(), ValueKind::Int);
        assert_eq!(kind_of(290).unwrap(), ValueKind::Bool);
        assert_eq!(kind_of(1040).unwrap(), ValueKind::Float);
        assert_eq!(kind_of(1070).unwrap(), ValueKind::Int);
    }

    #[test]
    fn test_unknown_code() {
        assert!(matches!(kind_of(80), Err(DxfError::UnknownGroupCode(80))));
        assert!(matches!(kind_of(-1), Err(DxfError::UnknownGroupCode(-1))));
        assert!(matches!(
            kind_of(2000),
            Err(DxfError::UnknownGroupCode(2000))
        ));
    }

    #[test]
    fn test_cast_int_to_float() {
        let v = cast(TagValue::Int(3), 40).unwrap();
        assert_eq!(v, TagValue::Float(3.0));
    }

    #[test]
    fn test_cast_string_to_float_fails() {
        let err = cast(TagValue::Str("abc".to_string()), 40).unwrap_err();
        assert!(matches!(err, DxfError::TypeCast { code: 40, .. }));
    }

    #[test]
    fn test_cast_numeric_string() {
        assert_eq!(
            cast(TagValue::Str("1.5".to_string()), 40).unwrap(),
            TagValue::Float(1.5)
        );
        assert_eq!(
            cast(TagValue::Str("42".to_string()), 70).unwrap(),
            TagValue::Int(42)
        );
    }

    #[test]
    fn test_check_mismatch() {
        assert!(check(&TagValue::Float(1.0), 10).is_ok());
        assert!(check(&TagValue::Str("x".to_string()), 10).is_err());
    }
}
