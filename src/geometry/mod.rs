// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and primitive tessellation

mod bbox;
mod mesh;
mod primitives;
mod solid;

pub use bbox::BoundingBox;
pub use mesh::{face_normal, Mesh, Triangle};
pub use primitives::Primitive;
pub use solid::Solid;
