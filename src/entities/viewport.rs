//! Paper-space viewport entity
//!
//! R12 stores the viewport's view parameters in an ACAD extended-data
//! block whose group codes (1040, 1070) repeat many times and are
//! significant only by position. That block cannot go through the named
//! field schema, so it lives here as a fixed ordered struct appended
//! after the regular fields.

use super::{DxfSerialize, GenericEntity};
use crate::error::Result;
use crate::schema::{EntityKind, FieldKey, Point, Value};
use crate::tags::{Tag, TagList};
use crate::types::Vector3;

/// The MVIEW extended-data block, emitted in fixed order
#[derive(Debug, Clone)]
pub struct ViewportXdata {
    pub view_target_point: Vector3,
    pub view_direction_vector: Vector3,
    pub view_twist_angle: f64,
    pub view_height: f64,
    pub view_center_point: (f64, f64),
    pub perspective_lens_length: f64,
    pub front_clip_plane_z: f64,
    pub back_clip_plane_z: f64,
    pub view_mode: i64,
    pub circle_zoom: i64,
    pub fast_zoom: i64,
    pub ucs_icon: i64,
    pub snap: i64,
    pub grid: i64,
    pub snap_style: i64,
    pub snap_isopair: i64,
    pub snap_angle: f64,
    pub snap_base_point: (f64, f64),
    pub snap_spacing: (f64, f64),
    pub grid_spacing: (f64, f64),
    pub hidden_plot: i64,
    /// Layers frozen in this viewport only
    pub frozen_layers: Vec<String>,
}

impl Default for ViewportXdata {
    fn default() -> Self {
        ViewportXdata {
            view_target_point: Vector3::ZERO,
            view_direction_vector: Vector3::ZERO,
            view_twist_angle: 0.0,
            view_height: 1.0,
            view_center_point: (0.0, 0.0),
            perspective_lens_length: 50.0,
            front_clip_plane_z: 0.0,
            back_clip_plane_z: 0.0,
            view_mode: 0,
            circle_zoom: 100,
            fast_zoom: 1,
            ucs_icon: 3,
            snap: 0,
            grid: 0,
            snap_style: 0,
            snap_isopair: 0,
            snap_angle: 0.0,
            snap_base_point: (0.0, 0.0),
            snap_spacing: (0.1, 0.1),
            grid_spacing: (0.1, 0.1),
            hidden_plot: 0,
            frozen_layers: Vec::new(),
        }
    }
}

impl ViewportXdata {
    fn tags(&self) -> Result<TagList> {
        let mut tags = TagList::new();
        tags.push(Tag::string(1001, "ACAD")?);
        tags.push(Tag::string(1000, "MVIEW")?);
        tags.push(Tag::string(1002, "{")?);
        tags.push(Tag::int(1070, 16)?); // extended data version
        push_point(&mut tags, self.view_target_point)?;
        push_point(&mut tags, self.view_direction_vector)?;
        tags.push(Tag::float(1040, self.view_twist_angle)?);
        tags.push(Tag::float(1040, self.view_height)?);
        tags.push(Tag::float(1040, self.view_center_point.0)?);
        tags.push(Tag::float(1040, self.view_center_point.1)?);
        tags.push(Tag::float(1040, self.perspective_lens_length)?);
        tags.push(Tag::float(1040, self.front_clip_plane_z)?);
        tags.push(Tag::float(1040, self.back_clip_plane_z)?);
        tags.push(Tag::int(1070, self.view_mode)?);
        tags.push(Tag::int(1070, self.circle_zoom)?);
        tags.push(Tag::int(1070, self.fast_zoom)?);
        tags.push(Tag::int(1070, self.ucs_icon)?);
        tags.push(Tag::int(1070, self.snap)?);
        tags.push(Tag::int(1070, self.grid)?);
        tags.push(Tag::int(1070, self.snap_style)?);
        tags.push(Tag::int(1070, self.snap_isopair)?);
        tags.push(Tag::float(1040, self.snap_angle)?);
        tags.push(Tag::float(1040, self.snap_base_point.0)?);
        tags.push(Tag::float(1040, self.snap_base_point.1)?);
        tags.push(Tag::float(1040, self.snap_spacing.0)?);
        tags.push(Tag::float(1040, self.snap_spacing.1)?);
        tags.push(Tag::float(1040, self.grid_spacing.0)?);
        tags.push(Tag::float(1040, self.grid_spacing.1)?);
        tags.push(Tag::int(1070, self.hidden_plot)?);
        tags.push(Tag::string(1002, "{")?); // frozen layer list
        for layer in &self.frozen_layers {
            tags.push(Tag::string(1003, layer.as_str())?);
        }
        tags.push(Tag::string(1002, "}")?);
        tags.push(Tag::string(1002, "}")?);
        Ok(tags)
    }
}

fn push_point(tags: &mut TagList, p: Vector3) -> Result<()> {
    tags.push(Tag::float(1010, p.x)?);
    tags.push(Tag::float(1020, p.y)?);
    tags.push(Tag::float(1030, p.z)?);
    Ok(())
}

/// A paper-space viewport with its MVIEW extended-data block
#[derive(Debug, Clone)]
pub struct Viewport {
    entity: GenericEntity,
    pub xdata: ViewportXdata,
}

impl Viewport {
    /// Create a viewport at `center` with the given paper-space size
    pub fn new(center: impl Into<Point>, width: f64, height: f64) -> Result<Self> {
        let mut entity = GenericEntity::new(EntityKind::Viewport)?;
        entity.set("center", center.into())?;
        entity.set("width", width)?;
        entity.set("height", height)?;
        Ok(Viewport {
            entity,
            xdata: ViewportXdata::default(),
        })
    }

    pub fn set(
        &mut self,
        field: impl Into<FieldKey>,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        self.entity.set(field, value)?;
        Ok(self)
    }

    pub fn get(&self, field: impl Into<FieldKey>) -> Result<Option<Value>> {
        self.entity.get(field)
    }
}

impl DxfSerialize for Viewport {
    fn assemble(&mut self) -> Result<TagList> {
        let mut tags = self.entity.render()?;
        tags.push_nested(self.xdata.tags()?);
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_header_fields() {
        let mut vp = Viewport::new((5.0, 5.0), 10.0, 8.0).unwrap();
        let output = vp.render().unwrap().to_dxf_string();
        assert!(output.starts_with("  0\nVIEWPORT\n"));
        assert!(output.contains(" 10\n5.0\n 20\n5.0\n 30\n0.0\n"));
        assert!(output.contains(" 40\n10.0\n"));
        assert!(output.contains(" 41\n8.0\n"));
    }

    #[test]
    fn test_xdata_block_framing() {
        let mut vp = Viewport::new((0.0, 0.0), 1.0, 1.0).unwrap();
        let output = vp.render().unwrap().to_dxf_string();
        assert!(output.contains("1001\nACAD\n1000\nMVIEW\n1002\n{\n1070\n16\n"));
        assert!(output.ends_with("1002\n}\n1002\n}\n"));
    }

    #[test]
    fn test_frozen_layers_listed_in_inner_block() {
        let mut vp = Viewport::new((0.0, 0.0), 1.0, 1.0).unwrap();
        vp.xdata.frozen_layers.push("DETAILS".to_string());
        let output = vp.render().unwrap().to_dxf_string();
        assert!(output.contains("1002\n{\n1003\nDETAILS\n1002\n}\n"));
    }

    #[test]
    fn test_view_height_in_fixed_position() {
        let mut vp = Viewport::new((0.0, 0.0), 1.0, 1.0).unwrap();
        vp.xdata.view_height = 25.0;
        let output = vp.render().unwrap().to_dxf_string();
        // twist angle then view height, both code 1040
        assert!(output.contains("1040\n0.0\n1040\n25.0\n"));
    }
}
