// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh adapter - flat interchange buffers to structured scene geometry

use super::color::Rgb;
use super::object::SceneObject;
use crate::error::{Error, Result};
use crate::geometry::Mesh;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Face-group type tag for triangles. The only primitive this adapter
/// understands; any other tag fails the render.
pub const TRIANGLE_TAG: u32 = 0;

/// Diffuse color the kernel stamps into every mesh export. Color choice
/// happens later by substituting this literal.
pub const DEFAULT_DIFFUSE: [f64; 3] =
    [0.6400000190734865, 0.10179081114814892, 0.126246120426746];

/// Flat triangle-mesh interchange form:
/// `{"vertices": [x0,y0,z0, x1,...], "faces": [tag,i,j,k, tag,...],
///   "colorDiffuse": [r,g,b], ...}`.
/// Unknown fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub vertices: Vec<f64>,
    pub faces: Vec<u32>,
    #[serde(rename = "colorDiffuse")]
    pub color_diffuse: [f64; 3],
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MeshBuffers {
    /// Flatten a structured mesh into interchange form with the kernel
    /// default diffuse color.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut vertices = Vec::with_capacity(mesh.vertex_count() * 3);
        for v in &mesh.vertices {
            vertices.extend_from_slice(&[v.x, v.y, v.z]);
        }

        let mut faces = Vec::with_capacity(mesh.triangle_count() * 4);
        for t in &mesh.triangles {
            faces.push(TRIANGLE_TAG);
            faces.push(t.indices[0] as u32);
            faces.push(t.indices[1] as u32);
            faces.push(t.indices[2] as u32);
        }

        let mut extra = serde_json::Map::new();
        extra.insert(
            "metadata".into(),
            json!({ "formatVersion": 3, "generator": "cadview" }),
        );

        Self {
            vertices,
            faces,
            color_diffuse: DEFAULT_DIFFUSE,
            extra,
        }
    }

    /// Structured form of this export: vertices partitioned into 3-tuples,
    /// face groups into tag-stripped index triples, one unnormalized
    /// cross-product normal per triangle.
    pub fn structure(&self) -> Result<Mesh> {
        if self.vertices.len() % 3 != 0 {
            return Err(Error::MalformedMesh(format!(
                "vertex buffer length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        if self.faces.len() % 4 != 0 {
            return Err(Error::MalformedMesh(format!(
                "face buffer length {} is not a multiple of 4",
                self.faces.len()
            )));
        }

        let mut mesh = Mesh::with_capacity(self.vertices.len() / 3, self.faces.len() / 4);

        for chunk in self.vertices.chunks_exact(3) {
            mesh.add_vertex(Point3::new(chunk[0], chunk[1], chunk[2]));
        }

        for (index, group) in self.faces.chunks_exact(4).enumerate() {
            let tag = group[0];
            if tag != TRIANGLE_TAG {
                return Err(Error::UnsupportedMeshFormat { tag, index });
            }
            let indices = [group[1] as usize, group[2] as usize, group[3] as usize];
            if let Some(&bad) = indices.iter().find(|&&i| i >= mesh.vertex_count()) {
                return Err(Error::MalformedMesh(format!(
                    "face group {index} references vertex {bad} of {}",
                    mesh.vertex_count()
                )));
            }
            // add_face computes the e1 x e2 face normal
            mesh.add_face(indices);
        }

        Ok(mesh)
    }

    /// Set the diffuse color on the structured buffers
    pub fn recolor(&mut self, color: Rgb) {
        self.color_diffuse = color.to_array();
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| Error::MalformedMesh(format!("serialization failed: {e}")))
    }
}

/// The `colorDiffuse` literal as it appears in serialized exports
fn color_literal(color: &[f64; 3]) -> String {
    format!(
        "\"colorDiffuse\":[{:?},{:?},{:?}]",
        color[0], color[1], color[2]
    )
}

/// Replace the kernel's default diffuse literal in a serialized mesh with
/// the user-chosen color. A no-op when the literal is absent.
pub fn substitute_color(serialized: &str, color: Rgb) -> String {
    serialized.replace(
        &color_literal(&DEFAULT_DIFFUSE),
        &color_literal(&color.to_array()),
    )
}

/// Adapter entry point: flat buffers plus a fill color to a renderable
/// scene. The only failure mode beyond malformed buffers is a non-triangle
/// face tag.
pub fn to_scene(buffers: &MeshBuffers, color: Rgb) -> Result<SceneObject> {
    let mesh = buffers.structure()?;
    Ok(SceneObject::assemble(mesh, color))
}
