// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! cadview
//!
//! Interactive preview and export for parametric CAD scripts. Parses a
//! script's declared parameters, builds the solid, adapts the mesh into a
//! renderable scene, derives the interactive controls a host surface should
//! show, and exports the current solid to STEP, STL, JSON or SVG.

pub mod controls;
pub mod error;
pub mod geometry;
pub mod io;
pub mod scene;
pub mod script;
pub mod session;

pub use controls::{derive_controls, Control, ControlSet, ExportControls, Units};
pub use error::{Error, Result};
pub use geometry::{Mesh, Solid};
pub use io::ExportFormat;
pub use scene::{to_scene, MeshBuffers, Rgb, SceneObject};
pub use script::{ParamKind, ParamValue, Parameter, ParametricModel};
pub use session::{BuildOutput, BuildSession, DisplayOptions};

/// One-shot entry point: parse, build with defaults, return the scene
pub fn preview(name: &str, source: &str) -> Result<SceneObject> {
    let mut session = BuildSession::from_source(name, source)?;
    let scene = session.rebuild()?.clone();
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_basic_cube() {
        let scene = preview("cube", "cube([10, 10, 10]);").unwrap();
        assert!(scene.geometry.triangle_count() > 0);
    }

    #[test]
    fn test_preview_surfaces_parse_errors() {
        assert!(matches!(
            preview("broken", "cube([10, 10"),
            Err(Error::Parse(_))
        ));
    }
}
