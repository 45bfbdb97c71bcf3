//! CTB plot-style (pen assignment) tables
//!
//! A CTB file maps the 255 ACI color indices to plot properties: pen
//! color, screening, linetype and lineweight. On disk it is a key/value
//! text payload behind a short codec header, zlib-compressed. Styles are
//! looked up by color index (1..=255).
//!
//! This feeds `color`/`lineweight` values into drawings; it is not part
//! of the DXF tag engine itself.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{DxfError, Result};

const CODEC_HEADER: &[u8] = b"PIAFILEVERSION_2.0,CTBVER1,compress\r\npmzlibcodec";

/// Marker for "use the object's color"
pub const OBJECT_COLOR: i32 = -1006632961;
/// Automatic physical pen selection
pub const AUTOMATIC: i32 = 0;
/// Linetype index meaning "use the object's linetype"
pub const OBJECT_LINETYPE: i32 = 31;
/// Lineweight index meaning "use the object's lineweight"
pub const OBJECT_LINEWEIGHT: i32 = 0;

/// End cap styles
pub const END_STYLE_BUTT: i32 = 0;
pub const END_STYLE_SQUARE: i32 = 1;
pub const END_STYLE_ROUND: i32 = 2;
pub const END_STYLE_DIAMOND: i32 = 3;
pub const END_STYLE_OBJECT: i32 = 4;

/// Join styles
pub const JOIN_STYLE_MITER: i32 = 0;
pub const JOIN_STYLE_BEVEL: i32 = 1;
pub const JOIN_STYLE_ROUND: i32 = 2;
pub const JOIN_STYLE_DIAMOND: i32 = 3;
pub const JOIN_STYLE_OBJECT: i32 = 5;

/// Fill styles
pub const FILL_STYLE_SOLID: i32 = 64;
pub const FILL_STYLE_OBJECT: i32 = 73;

/// Default lineweight table in millimeters
pub const DEFAULT_LINEWEIGHTS: &[f64] = &[
    0.00, 0.05, 0.09, 0.10, 0.13, 0.15, 0.18, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.53,
    0.60, 0.65, 0.70, 0.80, 0.90, 1.00, 1.06, 1.20, 1.40, 1.58, 2.00, 2.11,
];

const STYLE_COUNT: usize = 255;

/// Plot properties for one ACI color index
#[derive(Debug, Clone, PartialEq)]
pub struct PenStyle {
    pub name: String,
    pub localized_name: String,
    pub description: String,
    pub color: i32,
    pub physical_pen_number: i32,
    pub virtual_pen_number: i32,
    /// Screening percentage, 0..=100
    pub screen: i32,
    pub linepattern_size: f64,
    pub linetype: i32,
    pub adaptive_linetype: bool,
    /// Index into the table's lineweight list
    pub lineweight: i32,
    pub end_style: i32,
    pub join_style: i32,
    pub fill_style: i32,
}

impl PenStyle {
    fn for_index(index: usize) -> Self {
        let name = format!("Color_{}", index);
        PenStyle {
            localized_name: name.clone(),
            name,
            description: String::new(),
            color: OBJECT_COLOR,
            physical_pen_number: AUTOMATIC,
            virtual_pen_number: AUTOMATIC,
            screen: 100,
            linepattern_size: 0.5,
            linetype: OBJECT_LINETYPE,
            adaptive_linetype: true,
            lineweight: OBJECT_LINEWEIGHT,
            end_style: END_STYLE_OBJECT,
            join_style: JOIN_STYLE_OBJECT,
            fill_style: FILL_STYLE_OBJECT,
        }
    }

    fn write_text(&self, out: &mut String) {
        out.push_str(" plot_style{\n");
        out.push_str(&format!("  name=\"{}\n", self.name));
        out.push_str(&format!("  localized_name=\"{}\n", self.localized_name));
        out.push_str(&format!("  description=\"{}\n", self.description));
        out.push_str(&format!("  color={}\n", self.color));
        out.push_str(&format!(
            "  physical_pen_number={}\n",
            self.physical_pen_number
        ));
        out.push_str(&format!(
            "  virtual_pen_number={}\n",
            self.virtual_pen_number
        ));
        out.push_str(&format!("  screen={}\n", self.screen));
        out.push_str(&format!("  linepattern_size={}\n", self.linepattern_size));
        out.push_str(&format!("  linetype={}\n", self.linetype));
        out.push_str(&format!(
            "  adaptive_linetype={}\n",
            bool_text(self.adaptive_linetype)
        ));
        out.push_str(&format!("  lineweight={}\n", self.lineweight));
        out.push_str(&format!("  fill_style={}\n", self.fill_style));
        out.push_str(&format!("  end_style={}\n", self.end_style));
        out.push_str(&format!("  join_style={}\n", self.join_style));
        out.push_str(" }\n");
    }

    fn apply_key(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "name" => self.name = string_value(value),
            "localized_name" => self.localized_name = string_value(value),
            "description" => self.description = string_value(value),
            "color" => self.color = int_value(key, value)?,
            "physical_pen_number" => self.physical_pen_number = int_value(key, value)?,
            "virtual_pen_number" => self.virtual_pen_number = int_value(key, value)?,
            "screen" => self.screen = int_value(key, value)?,
            "linepattern_size" => self.linepattern_size = float_value(key, value)?,
            "linetype" => self.linetype = int_value(key, value)?,
            "adaptive_linetype" => self.adaptive_linetype = value.trim() == "TRUE",
            "lineweight" => self.lineweight = int_value(key, value)?,
            "end_style" => self.end_style = int_value(key, value)?,
            "join_style" => self.join_style = int_value(key, value)?,
            "fill_style" => self.fill_style = int_value(key, value)?,
            // colors may carry extra mode keys we don't model
            _ => {}
        }
        Ok(())
    }
}

/// A full plot-style table: 255 pen styles plus the lineweight list
#[derive(Debug, Clone)]
pub struct PenStyleTable {
    pub description: String,
    pub scale_factor: f64,
    pub apply_factor: bool,
    pub custom_lineweight_display_units: i32,
    styles: Vec<PenStyle>,
    pub lineweights: Vec<f64>,
}

impl Default for PenStyleTable {
    fn default() -> Self {
        PenStyleTable {
            description: String::new(),
            scale_factor: 1.0,
            apply_factor: false,
            custom_lineweight_display_units: 0,
            styles: (1..=STYLE_COUNT).map(PenStyle::for_index).collect(),
            lineweights: DEFAULT_LINEWEIGHTS.to_vec(),
        }
    }
}

impl PenStyleTable {
    pub fn new() -> Self {
        PenStyleTable::default()
    }

    /// Style for a color index, 1..=255
    pub fn style(&self, aci: usize) -> Result<&PenStyle> {
        self.check_index(aci)?;
        Ok(&self.styles[aci - 1])
    }

    /// Mutable style for a color index, 1..=255
    pub fn style_mut(&mut self, aci: usize) -> Result<&mut PenStyle> {
        self.check_index(aci)?;
        Ok(&mut self.styles[aci - 1])
    }

    /// Resolved lineweight in millimeters for a color index, if the
    /// style's lineweight index is inside the table
    pub fn lineweight(&self, aci: usize) -> Result<Option<f64>> {
        let index = self.style(aci)?.lineweight as usize;
        Ok(self.lineweights.get(index).copied())
    }

    fn check_index(&self, aci: usize) -> Result<()> {
        if aci < 1 || aci > STYLE_COUNT {
            return Err(DxfError::IndexRange {
                index: aci,
                limit: STYLE_COUNT,
            });
        }
        Ok(())
    }

    /// The uncompressed key/value payload
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("description=\"{}\n", self.description));
        out.push_str("aci_table_available=TRUE\n");
        out.push_str(&format!("scale_factor={}\n", self.scale_factor));
        out.push_str(&format!("apply_factor={}\n", bool_text(self.apply_factor)));
        out.push_str(&format!(
            "custom_lineweight_display_units={}\n",
            self.custom_lineweight_display_units
        ));
        out.push_str("plot_style{\n");
        for style in &self.styles {
            style.write_text(&mut out);
        }
        out.push_str("}\n");
        out.push_str("custom_lineweight_table{\n");
        for (i, weight) in self.lineweights.iter().enumerate() {
            out.push_str(&format!(" lineweight_{}={:.2}\n", i, weight));
        }
        out.push_str("}\n");
        out
    }

    /// Parse the uncompressed key/value payload
    pub fn from_text(text: &str) -> Result<Self> {
        let mut table = PenStyleTable::new();
        table.lineweights.clear();
        let mut section = Section::Top;
        let mut style_index = 0usize;
        let mut in_entry = false;
        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            match section {
                Section::Top => {
                    if line == "plot_style{" {
                        section = Section::Styles;
                    } else if line == "custom_lineweight_table{" {
                        section = Section::Lineweights;
                    } else if let Some((key, value)) = line.split_once('=') {
                        match key {
                            "description" => table.description = string_value(value),
                            "scale_factor" => table.scale_factor = float_value(key, value)?,
                            "apply_factor" => table.apply_factor = value == "TRUE",
                            "custom_lineweight_display_units" => {
                                table.custom_lineweight_display_units = int_value(key, value)?
                            }
                            _ => {}
                        }
                    }
                }
                Section::Styles => {
                    if line == "plot_style{" {
                        in_entry = true;
                        style_index += 1;
                        if style_index > STYLE_COUNT {
                            return Err(DxfError::Parse(
                                "more than 255 plot styles".to_string(),
                            ));
                        }
                    } else if line == "}" {
                        if in_entry {
                            in_entry = false;
                        } else {
                            section = Section::Top;
                        }
                    } else if let Some((key, value)) = line.split_once('=') {
                        if !in_entry {
                            return Err(DxfError::Parse(format!(
                                "style key '{}' outside plot_style block",
                                key
                            )));
                        }
                        table.styles[style_index - 1].apply_key(key, value)?;
                    }
                }
                Section::Lineweights => {
                    if line == "}" {
                        section = Section::Top;
                    } else if let Some((_, value)) = line.split_once('=') {
                        table.lineweights.push(float_value("lineweight", value)?);
                    }
                }
            }
        }
        if table.lineweights.is_empty() {
            table.lineweights = DEFAULT_LINEWEIGHTS.to_vec();
        }
        Ok(table)
    }

    /// Write the compressed on-disk form: codec header, three
    /// little-endian u32 fields (payload checksum, uncompressed size,
    /// compressed size), then the zlib stream.
    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        let payload = self.to_text().into_bytes();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&payload)?;
        let compressed = encoder.finish()?;

        writer.write_all(CODEC_HEADER)?;
        writer.write_all(&adler32(&payload).to_le_bytes())?;
        writer.write_all(&(payload.len() as u32).to_le_bytes())?;
        writer.write_all(&(compressed.len() as u32).to_le_bytes())?;
        writer.write_all(&compressed)?;
        Ok(())
    }

    /// Read the compressed on-disk form
    pub fn read(reader: &mut impl Read) -> Result<Self> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        if raw.len() < CODEC_HEADER.len() + 12 || !raw.starts_with(CODEC_HEADER) {
            return Err(DxfError::Parse("not a CTB file".to_string()));
        }
        let body = &raw[CODEC_HEADER.len() + 12..];
        let mut decoder = ZlibDecoder::new(body);
        let mut payload = String::new();
        decoder
            .read_to_string(&mut payload)
            .map_err(|e| DxfError::Parse(format!("bad CTB payload: {}", e)))?;
        PenStyleTable::from_text(&payload)
    }
}

enum Section {
    Top,
    Styles,
    Lineweights,
}

fn bool_text(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

// String values carry a single leading quote and run to end of line
fn string_value(value: &str) -> String {
    value.trim_start().trim_start_matches('"').to_string()
}

fn int_value(key: &str, value: &str) -> Result<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| DxfError::Parse(format!("bad integer for '{}': {}", key, value)))
}

fn float_value(key: &str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| DxfError::Parse(format!("bad float for '{}': {}", key, value)))
}

fn adler32(data: &[u8]) -> u32 {
    const MOD: u32 = 65521;
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for chunk in data.chunks(5552) {
        for &byte in chunk {
            a += byte as u32;
            b += a;
        }
        a %= MOD;
        b %= MOD;
    }
    (b << 16) | a
}
