// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Binary STL exporter

use crate::error::Result;
use crate::geometry::Mesh;
use std::fs::File;
use std::path::Path;
use stl_io::{Normal, Vertex};

/// Write a binary STL file. Facet normals are the mesh face normals,
/// normalized here because STL expects unit normals.
pub fn export_stl(mesh: &Mesh, path: &Path) -> Result<()> {
    let mut triangles = Vec::with_capacity(mesh.triangle_count());

    for (triangle, normal) in mesh.triangles.iter().zip(&mesh.normals) {
        let length = normal.norm();
        let unit = if length > 0.0 {
            normal / length
        } else {
            // Degenerate face; STL readers tolerate a zero normal
            *normal
        };

        let vertex = |i: usize| {
            let p = mesh.vertices[triangle.indices[i]];
            Vertex::new([p.x as f32, p.y as f32, p.z as f32])
        };

        triangles.push(stl_io::Triangle {
            normal: Normal::new([unit.x as f32, unit.y as f32, unit.z as f32]),
            vertices: [vertex(0), vertex(1), vertex(2)],
        });
    }

    let mut file = File::create(path)?;
    stl_io::write_stl(&mut file, triangles.iter())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;
    use tempfile::NamedTempFile;

    #[test]
    fn test_export_stl() -> Result<()> {
        let mesh = Primitive::cube(Vector3::new(10.0, 10.0, 10.0), true).to_mesh();

        let file = NamedTempFile::with_suffix(".stl")?;
        export_stl(&mesh, file.path())?;

        // 80-byte header + 4-byte count + 50 bytes per triangle
        let content = std::fs::read(file.path())?;
        assert_eq!(content.len(), 84 + mesh.triangle_count() * 50);

        let count = u32::from_le_bytes([content[80], content[81], content[82], content[83]]);
        assert_eq!(count as usize, mesh.triangle_count());

        Ok(())
    }
}
