//! Line type entries and the standard pattern presets
//!
//! A pattern descriptor is `[total_length, e1, e2, ...]`: the first value
//! is the overall pattern length, the rest are elements where positive is
//! a dash, negative a space and zero a dot.

use crate::entities::GenericEntity;
use crate::error::Result;
use crate::schema::EntityKind;

/// A named line pattern preset
#[derive(Debug, Clone, Copy)]
pub struct LinePattern {
    pub name: &'static str,
    pub description: &'static str,
    /// `[total_length, e1, e2, ...]`
    pub pattern: &'static [f64],
}

/// The standard AutoCAD pattern set
pub const STANDARD_PATTERNS: &[LinePattern] = &[
    LinePattern {
        name: "CONTINUOUS",
        description: "Solid line",
        pattern: &[0.0],
    },
    LinePattern {
        name: "CENTER",
        description: "Center ____ _ ____ _ ____ _ ____ _ ____ _ ____",
        pattern: &[2.0, 1.25, -0.25, 0.25, -0.25],
    },
    LinePattern {
        name: "CENTERX2",
        description: "Center (2x) ________  __  ________  __  ________",
        pattern: &[3.5, 2.5, -0.25, 0.5, -0.25],
    },
    LinePattern {
        name: "CENTER2",
        description: "Center (.5x) ____ _ ____ _ ____ _ ____ _ ____",
        pattern: &[1.0, 0.625, -0.125, 0.125, -0.125],
    },
    LinePattern {
        name: "DASHED",
        description: "Dashed __ __ __ __ __ __ __ __ __ __ __ __ __ _",
        pattern: &[0.6, 0.5, -0.1],
    },
    LinePattern {
        name: "DASHEDX2",
        description: "Dashed (2x) ____  ____  ____  ____  ____  ____",
        pattern: &[1.2, 1.0, -0.2],
    },
    LinePattern {
        name: "DASHED2",
        description: "Dashed (.5x) _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _ _",
        pattern: &[0.3, 0.25, -0.05],
    },
    LinePattern {
        name: "PHANTOM",
        description: "Phantom ______  __  __  ______  __  __  ______",
        pattern: &[2.5, 1.25, -0.25, 0.25, -0.25, 0.25, -0.25],
    },
    LinePattern {
        name: "PHANTOMX2",
        description: "Phantom (2x) ____________    ____    ____",
        pattern: &[4.25, 2.5, -0.25, 0.5, -0.25, 0.5, -0.25],
    },
    LinePattern {
        name: "PHANTOM2",
        description: "Phantom (.5x) ___ _ _ ___ _ _ ___ _ _ ___ _ _",
        pattern: &[1.25, 0.625, -0.125, 0.125, -0.125, 0.125, -0.125],
    },
    LinePattern {
        name: "DASHDOT",
        description: "Dash dot __ . __ . __ . __ . __ . __ . __ . __",
        pattern: &[1.4, 1.0, -0.2, 0.0, -0.2],
    },
    LinePattern {
        name: "DASHDOTX2",
        description: "Dash dot (2x) ____  .  ____  .  ____  .  ____",
        pattern: &[2.4, 2.0, -0.2, 0.0, -0.2],
    },
    LinePattern {
        name: "DASHDOT2",
        description: "Dash dot (.5x) _ . _ . _ . _ . _ . _ . _ . _",
        pattern: &[0.7, 0.5, -0.1, 0.0, -0.1],
    },
    LinePattern {
        name: "DOT",
        description: "Dot . . . . . . . . . . . . . . . . . . . . .",
        pattern: &[0.2, 0.0, -0.2],
    },
    LinePattern {
        name: "DOTX2",
        description: "Dot (2x) .  .  .  .  .  .  .  .  .  .  .  .  .",
        pattern: &[0.4, 0.0, -0.4],
    },
    LinePattern {
        name: "DOT2",
        description: "Dot (.5x) . . . . . . . . . . . . . . . . . .",
        pattern: &[0.1, 0.0, -0.1],
    },
    LinePattern {
        name: "DIVIDE",
        description: "Divide __ . . __ . . __ . . __ . . __ . . __",
        pattern: &[1.6, 1.0, -0.2, 0.0, -0.2, 0.0, -0.2],
    },
    LinePattern {
        name: "DIVIDEX2",
        description: "Divide (2x) ____  . .  ____  . .  ____  . .",
        pattern: &[2.6, 2.0, -0.2, 0.0, -0.2, 0.0, -0.2],
    },
    LinePattern {
        name: "DIVIDE2",
        description: "Divide (.5x) _ . . _ . . _ . . _ . . _ . . _",
        pattern: &[0.8, 0.5, -0.1, 0.0, -0.1, 0.0, -0.1],
    },
];

/// Create an LTYPE entry from a pattern descriptor
pub fn linetype(name: &str, description: &str, pattern: &[f64]) -> Result<GenericEntity> {
    let mut entry = GenericEntity::new(EntityKind::Ltype)?;
    entry.set("name", name)?;
    entry.set("description", description)?;
    let items = pattern.len().saturating_sub(1);
    entry.set("itemscount", items as i64)?;
    entry.set("totalpatternlength", pattern.first().copied().unwrap_or(0.0))?;
    if items > 0 {
        entry.set("pattern", pattern[1..].to_vec())?;
    }
    Ok(entry)
}

/// All standard presets as ready-made LTYPE entries
pub fn standard_linetypes() -> Result<Vec<GenericEntity>> {
    STANDARD_PATTERNS
        .iter()
        .map(|p| linetype(p.name, p.description, p.pattern))
        .collect()
}
