// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene module - mesh adapter, colors, renderable scene assembly

mod adapter;
mod color;
mod object;

pub use adapter::{
    substitute_color, to_scene, MeshBuffers, DEFAULT_DIFFUSE, TRIANGLE_TAG,
};
pub use color::Rgb;
pub use object::{
    AmbientLight, DirectionalLight, Material, PerspectiveCamera, SceneObject, Shading,
    CAMERA_DISTANCE, CAMERA_FOV,
};
