//! End-to-end output checks through the public API

use dxfwrite_rs::entities::{Block, DxfSerialize, GenericEntity, Insert, PolyfaceMesh};
use dxfwrite_rs::{Drawing, DxfError, Vector3};

/// Extract the value following the first `code` tag after `anchor`
fn value_after(output: &str, anchor: &str, code: &str) -> f64 {
    let start = output.find(anchor).expect("anchor not in output");
    let region = &output[start..];
    let at = region.find(code).expect("code not in region") + code.len();
    region[at..]
        .lines()
        .next()
        .expect("value line")
        .parse()
        .expect("numeric value")
}

#[test]
fn test_line_output_bytes() {
    let mut line = GenericEntity::line((0.0, 0.0), (1.0, 1.0)).unwrap();
    let output = line.render().unwrap().to_dxf_string();
    assert!(output.starts_with(
        "  0\nLINE\n  8\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 11\n1.0\n 21\n1.0\n 31\n0.0\n"
    ));
}

#[test]
fn test_arc_default_output_bytes() {
    let mut arc = GenericEntity::new(dxfwrite_rs::EntityKind::Arc).unwrap();
    let output = arc.render().unwrap().to_dxf_string();
    assert_eq!(
        output,
        "  0\nARC\n  8\n0\n 10\n0.0\n 20\n0.0\n 30\n0.0\n 40\n1.0\n 50\n0.0\n 51\n360.0\n"
    );
}

#[test]
fn test_block_needs_content_and_single_endblk() {
    let mut block = Block::new("PART").unwrap();
    assert!(matches!(
        block.render(),
        Err(DxfError::InvalidEntity { .. })
    ));

    block.add(GenericEntity::line((0.0, 0.0), (1.0, 0.0)).unwrap());
    let first = block.render().unwrap().to_dxf_string();
    let second = block.render().unwrap().to_dxf_string();
    assert_eq!(first, second);
    assert_eq!(first.matches("ENDBLK").count(), 1);
    let line_at = first.find("  0\nLINE\n").unwrap();
    let endblk_at = first.find("  0\nENDBLK\n").unwrap();
    assert!(line_at < endblk_at);
}

#[test]
fn test_relative_attribute_transform() {
    // Insert rotated 45 degrees at the origin; attribute at local (1, 1)
    // with no rotation of its own lands on the world y-axis at sqrt(2).
    let mut insert = Insert::new("TITLE", (0.0, 0.0)).unwrap();
    insert.set("rotation", 45.0).unwrap();
    let attrib = GenericEntity::attrib("TAG", "value", (1.0, 1.0)).unwrap();
    insert
        .add_attribute_relative(attrib, (0.0, 0.0))
        .unwrap();

    let output = insert.render().unwrap().to_dxf_string();
    assert_eq!(value_after(&output, "  0\nATTRIB\n", " 50\n"), 45.0);
    let x = value_after(&output, "  0\nATTRIB\n", " 10\n");
    let y = value_after(&output, "  0\nATTRIB\n", " 20\n");
    let distance = (x * x + y * y).sqrt();
    assert!((distance - 2f64.sqrt()).abs() < 1e-9);
    assert!(x.abs() < 1e-9);
    assert!((y - 2f64.sqrt()).abs() < 1e-9);
    assert!(output.contains("  0\nSEQEND\n"));
}

#[test]
fn test_field_order_independent_of_set_order() {
    let mut a = GenericEntity::new(dxfwrite_rs::EntityKind::Circle).unwrap();
    a.set("radius", 2.0).unwrap();
    a.set("center", (1.0, 1.0)).unwrap();
    a.set("layer", "TOP").unwrap();

    let mut b = GenericEntity::new(dxfwrite_rs::EntityKind::Circle).unwrap();
    b.set("layer", "TOP").unwrap();
    b.set("center", (1.0, 1.0)).unwrap();
    b.set("radius", 2.0).unwrap();

    assert_eq!(
        a.render().unwrap().to_dxf_string(),
        b.render().unwrap().to_dxf_string()
    );
}

#[test]
fn test_unknown_field_rejected() {
    let mut line = GenericEntity::line((0.0, 0.0), (1.0, 1.0)).unwrap();
    assert!(matches!(
        line.set("nonexistent_field", 1.0),
        Err(DxfError::UnknownField { .. })
    ));
}

#[test]
fn test_full_drawing_skeleton() {
    let mut drawing = Drawing::new().unwrap();

    let mut block = Block::new("SYMBOL").unwrap();
    block.add(GenericEntity::circle((0.0, 0.0), 0.5).unwrap());
    drawing.add_block(block);
    drawing.add(Insert::new("SYMBOL", (10.0, 10.0)).unwrap());

    let mut mesh = PolyfaceMesh::new().unwrap();
    mesh.add_face(
        &[
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ],
        None,
    )
    .unwrap();
    drawing.add(mesh);

    let output = drawing.render_to_string().unwrap();
    for section in ["HEADER", "TABLES", "BLOCKS", "ENTITIES"] {
        assert!(output.contains(&format!("  0\nSECTION\n  2\n{}\n", section)));
    }
    assert!(output.contains("  0\nBLOCK\n"));
    assert!(output.contains("  0\nINSERT\n"));
    assert!(output.contains("  0\nPOLYLINE\n"));
    assert!(output.ends_with("  0\nEOF\n"));
    assert_eq!(output.matches("  0\nEOF\n").count(), 1);

    // a second render is byte-identical
    assert_eq!(output, drawing.render_to_string().unwrap());
}

#[test]
fn test_solid_point_duplication() {
    let mut solid = GenericEntity::solid(&[
        (0.0, 0.0).into(),
        (1.0, 0.0).into(),
        (1.0, 1.0).into(),
    ])
    .unwrap();
    let output = solid.render().unwrap().to_dxf_string();
    // 4th corner repeats the 3rd
    assert!(output.contains(" 12\n1.0\n 22\n1.0\n 32\n0.0\n 13\n1.0\n 23\n1.0\n 33\n0.0\n"));
}

#[test]
fn test_solid_under_three_points_invalid() {
    let mut solid =
        GenericEntity::solid(&[(0.0, 0.0).into(), (1.0, 0.0).into()]).unwrap();
    assert!(matches!(
        solid.render(),
        Err(DxfError::InvalidEntity { .. })
    ));
}
