// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Built-in primitive tessellators

use super::Mesh;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Tessellatable primitives the script front-end can emit
pub enum Primitive {
    Cube { size: Vector3<f64>, center: bool },
    Sphere { r: f64, segments: u32 },
    Cylinder { h: f64, r: f64, segments: u32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn sphere(r: f64, segments: u32) -> Self {
        let segments = if segments > 0 { segments } else { 32 };
        Self::Sphere { r, segments }
    }

    pub fn cylinder(h: f64, r: f64, segments: u32) -> Self {
        let segments = if segments > 0 { segments } else { 32 };
        Self::Cylinder { h, r, segments }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Sphere { r, segments } => generate_sphere_mesh(*r, *segments),
            Self::Cylinder { h, r, segments } => generate_cylinder_mesh(*h, *r, *segments),
        }
    }
}

fn generate_cube_mesh(size: Vector3<f64>, center: bool) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, 12);

    let (min, max) = if center {
        (-size / 2.0, size / 2.0)
    } else {
        (Vector3::zeros(), size)
    };

    // 8 shared corners; flat shading comes from the per-face normals
    let corners = [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];
    for corner in corners {
        mesh.add_vertex(corner);
    }

    // Two CCW triangles per face, outward winding
    let faces = [
        [4, 5, 6],
        [4, 6, 7], // z+
        [1, 0, 3],
        [1, 3, 2], // z-
        [5, 1, 2],
        [5, 2, 6], // x+
        [0, 4, 7],
        [0, 7, 3], // x-
        [7, 6, 2],
        [7, 2, 3], // y+
        [0, 1, 5],
        [0, 5, 4], // y-
    ];
    for face in faces {
        mesh.add_face(face);
    }

    mesh
}

fn generate_sphere_mesh(radius: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();
    let stacks = segments;
    let slices = segments;

    for i in 0..=stacks {
        let phi = PI * i as f64 / stacks as f64;
        let y = radius * phi.cos();
        let ring = radius * phi.sin();

        for j in 0..=slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            mesh.add_vertex(Point3::new(ring * theta.cos(), y, ring * theta.sin()));
        }
    }

    for i in 0..stacks {
        for j in 0..slices {
            let first = (i * (slices + 1) + j) as usize;
            let second = first + (slices + 1) as usize;

            // Pole rows produce degenerate first/second triangles; they are
            // kept for grid regularity, matching the tessellator this
            // replaces. Their face normals are zero vectors.
            mesh.add_face([first, second, first + 1]);
            mesh.add_face([second, second + 1, first + 1]);
        }
    }

    mesh
}

fn generate_cylinder_mesh(height: f64, radius: f64, segments: u32) -> Mesh {
    let mut mesh = Mesh::new();

    // Cylinders run from z=0 to z=height, not centered
    let bottom_center = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
    let top_center = mesh.add_vertex(Point3::new(0.0, 0.0, height));

    let mut bottom_rim = Vec::with_capacity(segments as usize);
    let mut top_rim = Vec::with_capacity(segments as usize);
    for i in 0..segments {
        let angle = 2.0 * PI * i as f64 / segments as f64;
        let (sin, cos) = angle.sin_cos();
        bottom_rim.push(mesh.add_vertex(Point3::new(radius * cos, radius * sin, 0.0)));
        top_rim.push(mesh.add_vertex(Point3::new(radius * cos, radius * sin, height)));
    }

    for i in 0..segments as usize {
        let next = (i + 1) % segments as usize;

        // Caps
        mesh.add_face([bottom_center, bottom_rim[next], bottom_rim[i]]);
        mesh.add_face([top_center, top_rim[i], top_rim[next]]);

        // Side quad as two triangles
        mesh.add_face([bottom_rim[i], top_rim[i], bottom_rim[next]]);
        mesh.add_face([top_rim[i], top_rim[next], bottom_rim[next]]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_generation() {
        let mesh = generate_cube_mesh(Vector3::new(10.0, 10.0, 10.0), false);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.normals.len(), 12);
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let mesh = generate_cube_mesh(Vector3::new(2.0, 2.0, 2.0), true);
        // Every face normal points away from the cube center (origin)
        for (triangle, normal) in mesh.triangles.iter().zip(&mesh.normals) {
            let centroid = (mesh.vertices[triangle.indices[0]].coords
                + mesh.vertices[triangle.indices[1]].coords
                + mesh.vertices[triangle.indices[2]].coords)
                / 3.0;
            assert!(
                normal.dot(&centroid) > 0.0,
                "inward-facing normal {:?}",
                normal
            );
        }
    }

    #[test]
    fn test_centered_cube_bounds() {
        let mesh = generate_cube_mesh(Vector3::new(4.0, 6.0, 8.0), true);
        let bbox = mesh.bounding_box();
        assert_relative_eq!(bbox.min.x, -2.0);
        assert_relative_eq!(bbox.max.y, 3.0);
        assert_relative_eq!(bbox.max.z, 4.0);
    }

    #[test]
    fn test_sphere_counts() {
        let segments = 16u32;
        let mesh = generate_sphere_mesh(5.0, segments);
        let expected_vertices = ((segments + 1) * (segments + 1)) as usize;
        assert_eq!(mesh.vertex_count(), expected_vertices);
        assert_eq!(mesh.triangle_count(), (segments * segments * 2) as usize);
    }

    #[test]
    fn test_cylinder_counts() {
        let segments = 16usize;
        let mesh = generate_cylinder_mesh(10.0, 5.0, segments as u32);
        assert_eq!(mesh.vertex_count(), 2 + segments * 2);
        // 2 cap triangles + 2 side triangles per segment
        assert_eq!(mesh.triangle_count(), segments * 4);
    }

    #[test]
    fn test_cylinder_spans_height() {
        let mesh = generate_cylinder_mesh(12.0, 3.0, 8);
        let bbox = mesh.bounding_box();
        assert_relative_eq!(bbox.min.z, 0.0);
        assert_relative_eq!(bbox.max.z, 12.0);
    }
}
