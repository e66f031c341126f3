// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Renderable scene description

use super::color::Rgb;
use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};

/// Camera sits on the (d, d, d) diagonal looking at the origin
pub const CAMERA_DISTANCE: f64 = 50.0;
pub const CAMERA_FOV: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shading {
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Rgb,
    pub shading: Shading,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub position: [f64; 3],
    pub intensity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientLight {
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub position: [f64; 3],
    pub fov: f64,
    /// Headlight that travels with the camera
    pub light: DirectionalLight,
}

/// Bundle a display surface can render without further decisions:
/// geometry, flat-shaded material, camera and lights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub geometry: Mesh,
    pub material: Material,
    pub camera: PerspectiveCamera,
    pub ambient: AmbientLight,
}

impl SceneObject {
    /// Fixed symmetric camera offset, one directional light, one ambient
    /// light. Consumers orbit the camera themselves.
    pub fn assemble(geometry: Mesh, color: Rgb) -> Self {
        Self {
            geometry,
            material: Material {
                color,
                shading: Shading::Flat,
            },
            camera: PerspectiveCamera {
                position: [CAMERA_DISTANCE, CAMERA_DISTANCE, CAMERA_DISTANCE],
                fov: CAMERA_FOV,
                light: DirectionalLight {
                    color: Rgb::new(1.0, 1.0, 1.0),
                    position: [-3.0, 5.0, 1.0],
                    intensity: 0.45,
                },
            },
            ambient: AmbientLight {
                color: Rgb::new(221.0 / 255.0, 221.0 / 255.0, 221.0 / 255.0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Vector3;

    #[test]
    fn test_assemble_is_deterministic() {
        let mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        let color = Rgb::from_hex("#708090").unwrap();

        let a = SceneObject::assemble(mesh.clone(), color);
        let b = SceneObject::assemble(mesh, color);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scene_serializes() {
        let mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
        let scene = SceneObject::assemble(mesh, Rgb::new(0.5, 0.5, 0.5));

        let json = serde_json::to_value(&scene).unwrap();
        assert!(json["geometry"]["vertices"].is_array());
        assert_eq!(json["camera"]["fov"], 35.0);
        assert_eq!(json["camera"]["light"]["intensity"], 0.45);
    }
}
