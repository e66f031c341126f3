// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flat-shaded mesh representation

use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }
}

/// Face normal of a triangle: cross product of two edge vectors.
///
/// Deliberately left unnormalized; consumers renormalize where they need
/// unit vectors (shading, STL facets).
pub fn face_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    let e1 = b - a;
    let e2 = c - a;
    e1.cross(&e2)
}

/// Triangular mesh with one normal per face.
///
/// Invariants: `normals.len() == triangles.len()`, and every index of every
/// triangle is within `vertices` bounds. Construction goes through
/// [`Mesh::add_vertex`] / [`Mesh::add_face`] which maintain both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub triangles: Vec<Triangle>,
    pub normals: Vec<Vector3<f64>>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            normals: Vec::with_capacity(triangle_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    /// Add a triangle by vertex indices; its face normal is computed here.
    pub fn add_face(&mut self, indices: [usize; 3]) {
        let normal = face_normal(
            &self.vertices[indices[0]],
            &self.vertices[indices[1]],
            &self.vertices[indices[2]],
        );
        self.triangles.push(Triangle::new(indices));
        self.normals.push(normal);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append another mesh, rebasing its indices
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        for triangle in &other.triangles {
            self.triangles.push(Triangle::new([
                triangle.indices[0] + offset,
                triangle.indices[1] + offset,
                triangle.indices[2] + offset,
            ]));
        }
        self.normals.extend_from_slice(&other.normals);
    }

    /// Transform all vertices and recompute the face normals from the moved
    /// vertices (exact for flat shading, no normal matrix needed).
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for vertex in &mut self.vertices {
            *vertex = matrix.transform_point(vertex);
        }
        self.recompute_normals();
    }

    /// Uniform scale about the origin
    pub fn scale_uniform(&mut self, factor: f64) {
        for vertex in &mut self.vertices {
            *vertex = *vertex * factor;
        }
        self.recompute_normals();
    }

    fn recompute_normals(&mut self) {
        for (i, triangle) in self.triangles.iter().enumerate() {
            self.normals[i] = face_normal(
                &self.vertices[triangle.indices[0]],
                &self.vertices[triangle.indices[1]],
                &self.vertices[triangle.indices[2]],
            );
        }
    }

    pub fn bounding_box(&self) -> super::BoundingBox {
        super::BoundingBox::from_points(&self.vertices)
    }
}
