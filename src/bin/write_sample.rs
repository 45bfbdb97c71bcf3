/// Write a small sample drawing exercising the main entity kinds.
///
/// Usage:
///   cargo run --bin write_sample -- [output.dxf]
use std::path::PathBuf;

use anyhow::Result;

use dxfwrite_rs::entities::{Block, GenericEntity, Insert, PolyfaceMesh, Polyline};
use dxfwrite_rs::tables;
use dxfwrite_rs::{Color, Drawing, Vector3};

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sample.dxf"));

    let mut drawing = Drawing::new()?;
    drawing.layers().add(tables::layer("GEOMETRY")?)?;
    drawing
        .linetypes()
        .add(tables::linetype("DASHED", "Dashed", &[0.6, 0.5, -0.1])?)?;

    let mut line = GenericEntity::line((0.0, 0.0), (40.0, 0.0))?;
    line.set("layer", "GEOMETRY")?;
    drawing.add(line);

    let mut circle = GenericEntity::circle((20.0, 15.0), 7.5)?;
    circle.set("color", Color::RED)?;
    drawing.add(circle);

    drawing.add(GenericEntity::text("dxfwrite-rs sample", (2.0, 25.0), 2.5)?);

    // An arrow symbol, inserted twice
    let mut arrow = Block::new("ARROW")?;
    arrow.add(GenericEntity::line((-1.0, 0.0), (1.0, 0.0))?);
    arrow.add(GenericEntity::solid(&[
        (1.0, 0.0).into(),
        (0.6, 0.2).into(),
        (0.6, -0.2).into(),
    ])?);
    drawing.add_block(arrow);
    for (x, rotation) in [(5.0, 0.0), (35.0, 180.0)] {
        let mut insert = Insert::new("ARROW", (x, 5.0))?;
        insert.set("rotation", rotation)?;
        drawing.add(insert);
    }

    let mut outline = Polyline::new()?;
    outline.add_vertices([(0.0, 0.0), (40.0, 0.0), (40.0, 30.0), (0.0, 30.0)])?;
    outline.close()?;
    drawing.add(outline);

    // A unit cube as a polyface mesh; shared corners are stored once
    let mut cube = PolyfaceMesh::new()?;
    let corner = |x, y, z| Vector3::new(x, y, z);
    let faces = [
        [corner(0., 0., 0.), corner(1., 0., 0.), corner(1., 1., 0.), corner(0., 1., 0.)],
        [corner(0., 0., 1.), corner(1., 0., 1.), corner(1., 1., 1.), corner(0., 1., 1.)],
        [corner(0., 0., 0.), corner(1., 0., 0.), corner(1., 0., 1.), corner(0., 0., 1.)],
        [corner(0., 1., 0.), corner(1., 1., 0.), corner(1., 1., 1.), corner(0., 1., 1.)],
        [corner(0., 0., 0.), corner(0., 1., 0.), corner(0., 1., 1.), corner(0., 0., 1.)],
        [corner(1., 0., 0.), corner(1., 1., 0.), corner(1., 1., 1.), corner(1., 0., 1.)],
    ];
    for face in faces {
        cube.add_face(&face, None)?;
    }
    println!(
        "cube: {} vertices, {} faces",
        cube.vertex_count(),
        cube.face_count()
    );
    drawing.add(cube);

    drawing.save_file(&path)?;
    println!("wrote {}", path.display());
    Ok(())
}
