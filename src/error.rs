// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error taxonomy shared across the crate

use thiserror::Error;

/// Everything that can go wrong between parsing a script and writing an
/// export file. Each failure leaves the last good build intact; none of
/// these abort the host process.
#[derive(Debug, Error)]
pub enum Error {
    /// The script source could not be parsed into a parametric model.
    #[error("failed to parse script: {0}")]
    Parse(String),

    /// The script parsed but evaluation failed for the current parameter set.
    #[error("script build failed: {0}")]
    Build(String),

    /// The mesh export contained a face group with a non-triangle type tag.
    #[error("unsupported mesh primitive tag {tag} in face group {index}")]
    UnsupportedMeshFormat { tag: u32, index: usize },

    /// Flat buffers that violate the mesh invariants (misaligned lengths,
    /// out-of-bounds vertex indices).
    #[error("malformed mesh buffer: {0}")]
    MalformedMesh(String),

    /// The user picked an export filetype outside the supported set.
    #[error("unsupported export format: {0:?}")]
    UnsupportedExportFormat(String),

    /// A color string that is not `#rrggbb` hex.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Export was requested before the first successful build.
    #[error("no solid has been built yet")]
    NothingBuilt,

    /// The underlying exporter failed to write the file.
    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
