// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interchange JSON exporter

use crate::error::Result;
use crate::geometry::Mesh;
use crate::scene::{substitute_color, MeshBuffers, Rgb};
use std::fs;
use std::path::Path;

/// Serialize the mesh in interchange form, then substitute the user color
/// for the kernel default diffuse literal (the same step the display
/// adapter uses).
pub fn export_json(mesh: &Mesh, color: Rgb, path: &Path) -> Result<()> {
    let buffers = MeshBuffers::from_mesh(mesh);
    let serialized = buffers.to_json()?;
    fs::write(path, substitute_color(&serialized, color))?;
    Ok(())
}
