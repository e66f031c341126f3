// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Retained build product

use super::{BoundingBox, Mesh};
use serde::{Deserialize, Serialize};

/// The solid produced by a script build. One solid is live per session at a
/// time; each successful rebuild replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    mesh: Mesh,
}

impl Solid {
    pub fn new(mesh: Mesh) -> Self {
        Self { mesh }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.mesh.bounding_box()
    }

    /// Uniformly scaled copy (unit conversion and the user scale factor)
    pub fn scaled(&self, factor: f64) -> Solid {
        let mut mesh = self.mesh.clone();
        mesh.scale_uniform(factor);
        Self { mesh }
    }
}
