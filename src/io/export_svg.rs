// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flat-shaded SVG projection exporter

use crate::error::Result;
use crate::geometry::Mesh;
use crate::scene::Rgb;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

// Canvas matches the interactive render window
const WIDTH: f64 = 830.0;
const HEIGHT: f64 = 553.0;
const PADDING: f64 = 40.0;

/// Isometric projection: rotate about z, then tilt about x, keep (x, -z)
fn project(x: f64, y: f64, z: f64) -> (f64, f64) {
    let angle_x: f64 = 0.6;
    let angle_z: f64 = 0.8;
    let rx = x * angle_z.cos() - y * angle_z.sin();
    let ry = x * angle_z.sin() + y * angle_z.cos();
    let pz = ry * angle_x.sin() + z * angle_x.cos();
    (rx, -pz)
}

/// Render the mesh into an SVG document: triangles painter-sorted back to
/// front, each filled with the display color shaded by a fixed light.
pub fn render_svg(mesh: &Mesh, color: Rgb) -> String {
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\">\n"
    );

    if mesh.is_empty() {
        svg.push_str("</svg>\n");
        return svg;
    }

    let mut projected = Vec::with_capacity(mesh.vertex_count());
    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for v in &mesh.vertices {
        let (px, py) = project(v.x, v.y, v.z);
        min_x = min_x.min(px);
        max_x = max_x.max(px);
        min_y = min_y.min(py);
        max_y = max_y.max(py);
        projected.push((px, py));
    }

    let data_w = (max_x - min_x).max(0.001);
    let data_h = (max_y - min_y).max(0.001);
    let scale = ((WIDTH - 2.0 * PADDING) / data_w).min((HEIGHT - 2.0 * PADDING) / data_h);
    let tx = |px: f64| (px - min_x) * scale + PADDING;
    let ty = |py: f64| (py - min_y) * scale + PADDING;

    let light = nalgebra::Vector3::new(0.3, -0.5, 0.8).normalize();

    struct Face {
        indices: [usize; 3],
        depth: f64,
        brightness: f64,
    }

    let mut faces: Vec<Face> = mesh
        .triangles
        .iter()
        .zip(&mesh.normals)
        .map(|(triangle, normal)| {
            let depth: f64 = triangle
                .indices
                .iter()
                .map(|&i| mesh.vertices[i].z)
                .sum::<f64>()
                / 3.0;
            let length = normal.norm().max(1e-12);
            let dot = normal.dot(&light) / length;
            Face {
                indices: triangle.indices,
                depth,
                brightness: 0.3 + 0.7 * dot.abs().min(1.0),
            }
        })
        .collect();

    // Painter's algorithm: deepest faces first
    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    for face in &faces {
        let fill = Rgb::new(
            color.r * face.brightness,
            color.g * face.brightness,
            color.b * face.brightness,
        )
        .to_hex();

        let mut points = String::new();
        for &i in &face.indices {
            let (px, py) = projected[i];
            let _ = write!(points, "{:.2},{:.2} ", tx(px), ty(py));
        }
        let _ = writeln!(
            svg,
            "<polygon points=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"0.4\"/>",
            points.trim_end(),
            fill,
            fill
        );
    }

    svg.push_str("</svg>\n");
    svg
}

pub fn export_svg(mesh: &Mesh, color: Rgb, path: &Path) -> Result<()> {
    fs::write(path, render_svg(mesh, color))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;
    use tempfile::NamedTempFile;

    #[test]
    fn test_svg_has_one_polygon_per_triangle() {
        let mesh = Primitive::cube(Vector3::new(10.0, 10.0, 10.0), false).to_mesh();
        let svg = render_svg(&mesh, Rgb::from_hex("#8dc63f").unwrap());

        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<polygon").count(), mesh.triangle_count());
    }

    #[test]
    fn test_empty_mesh_yields_empty_document() {
        let svg = render_svg(&Mesh::new(), Rgb::new(0.5, 0.5, 0.5));
        assert!(svg.contains("<svg"));
        assert!(!svg.contains("<polygon"));
    }

    #[test]
    fn test_export_svg_writes_file() -> Result<()> {
        let mesh = Primitive::sphere(5.0, 8).to_mesh();
        let file = NamedTempFile::with_suffix(".SVG")?;

        export_svg(&mesh, Rgb::from_hex("#708090").unwrap(), file.path())?;

        let content = fs::read_to_string(file.path())?;
        assert!(content.starts_with("<svg"));
        assert!(content.trim_end().ends_with("</svg>"));
        Ok(())
    }
}
