//! STL (Stereolithography) export for extracted meshes
//!
//! Supports both binary and ASCII STL formats.
//! Compatible with 3D printing software and all major DCC tools.
//!
//! Author: Moroya Sakamoto

use crate::io::IoError;
use crate::mesh::Mesh;
use std::path::Path;

/// Export mesh to binary STL format
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), IoError> {
    use std::io::{BufWriter, Write};

    let file = std::fs::File::create(path)?;
    let mut w = BufWriter::new(file);

    // 80-byte header
    let header = [0u8; 80];
    w.write_all(&header)?;

    // Triangle count
    let tri_count = (mesh.indices.len() / 3) as u32;
    w.write_all(&tri_count.to_le_bytes())?;

    // Each triangle: normal(3xf32) + v1(3xf32) + v2(3xf32) + v3(3xf32) + u16 attr
    for i in 0..tri_count as usize {
        let i0 = mesh.indices[i * 3] as usize;
        let i1 = mesh.indices[i * 3 + 1] as usize;
        let i2 = mesh.indices[i * 3 + 2] as usize;

        let v0 = &mesh.vertices[i0];
        let v1 = &mesh.vertices[i1];
        let v2 = &mesh.vertices[i2];

        // Face normal (average of vertex normals)
        let n = (v0.normal + v1.normal + v2.normal).normalize_or_zero();
        for f in [n.x, n.y, n.z] {
            w.write_all(&f.to_le_bytes())?;
        }
        for v in [v0, v1, v2] {
            for f in [v.position.x, v.position.y, v.position.z] {
                w.write_all(&f.to_le_bytes())?;
            }
        }
        w.write_all(&0u16.to_le_bytes())?;
    }

    w.flush()?;
    Ok(())
}

/// Export mesh to ASCII STL format
pub fn export_stl_ascii(mesh: &Mesh, path: impl AsRef<Path>) -> Result<(), IoError> {
    use std::io::{BufWriter, Write};

    let file = std::fs::File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "solid iso_march")?;

    let tri_count = mesh.indices.len() / 3;
    for i in 0..tri_count {
        let i0 = mesh.indices[i * 3] as usize;
        let i1 = mesh.indices[i * 3 + 1] as usize;
        let i2 = mesh.indices[i * 3 + 2] as usize;

        let v0 = &mesh.vertices[i0];
        let v1 = &mesh.vertices[i1];
        let v2 = &mesh.vertices[i2];

        let n = (v0.normal + v1.normal + v2.normal).normalize_or_zero();

        writeln!(w, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(w, "    outer loop")?;
        for v in [v0, v1, v2] {
            writeln!(
                w,
                "      vertex {} {} {}",
                v.position.x, v.position.y, v.position.z
            )?;
        }
        writeln!(w, "    endloop")?;
        writeln!(w, "  endfacet")?;
    }

    writeln!(w, "endsolid iso_march")?;
    w.flush()?;
    Ok(())
}
