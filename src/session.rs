// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interactive build session
//!
//! One session per displayed model. The session owns the parsed script, the
//! override values, the display options, the control descriptors, and the
//! single current solid/scene slot. Everything is synchronous: the host
//! dispatches one control change at a time and `rebuild` runs to completion
//! before returning.

use crate::controls::{derive_controls, ControlSet, ExportControls, Units, DEFAULT_COLOR};
use crate::error::{Error, Result};
use crate::geometry::Solid;
use crate::io::{self, ExportFormat};
use crate::scene::{self, MeshBuffers, Rgb, SceneObject};
use crate::script::{Overrides, ParamValue, ParametricModel};
use std::path::PathBuf;

/// Current display options: fill color, model units, user scale factor
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    pub color: String,
    pub units: Units,
    pub scale: f64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            units: Units::Mm,
            scale: 1.0,
        }
    }
}

impl DisplayOptions {
    /// The scale actually applied to the solid: the user factor times the
    /// unit conversion (25.4 when inches are selected).
    pub fn effective_scale(&self) -> f64 {
        self.scale * self.units.scale_multiplier()
    }
}

/// A successful build: the retained solid plus its renderable scene
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub solid: Solid,
    pub scene: SceneObject,
}

/// Session state: `Unbuilt` until the first successful rebuild, `Built`
/// afterwards. Failed rebuilds never leave `Built`.
pub struct BuildSession {
    model: ParametricModel,
    overrides: Overrides,
    options: DisplayOptions,
    controls: ControlSet,
    export_controls: Option<ExportControls>,
    current: Option<BuildOutput>,
    builds: u64,
}

impl BuildSession {
    pub fn new(model: ParametricModel) -> Self {
        let controls = derive_controls(model.parameters());
        Self {
            model,
            overrides: Overrides::new(),
            options: DisplayOptions::default(),
            controls,
            export_controls: None,
            current: None,
            builds: 0,
        }
    }

    /// Parse source and open a session for it
    pub fn from_source(name: &str, source: &str) -> Result<Self> {
        Ok(Self::new(ParametricModel::parse(name, source)?))
    }

    pub fn model(&self) -> &ParametricModel {
        &self.model
    }

    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    /// Export widgets for the current build, `None` while unbuilt
    pub fn export_controls(&self) -> Option<&ExportControls> {
        self.export_controls.as_ref()
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Number of successful rebuilds so far
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn is_built(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&BuildOutput> {
        self.current.as_ref()
    }

    /// Record a parameter override. The value must match the declared kind
    /// (Int widens to Float); unknown names are rejected.
    pub fn set_override(&mut self, name: &str, value: ParamValue) -> Result<()> {
        let parameter = self
            .model
            .parameter(name)
            .ok_or_else(|| Error::Build(format!("unknown parameter {name:?}")))?;
        let coerced = parameter.coerce_override(&value)?;
        self.overrides.insert(name.to_string(), coerced);
        Ok(())
    }

    /// Validated eagerly so a typo surfaces at the picker, not mid-rebuild
    pub fn set_color(&mut self, color: &str) -> Result<()> {
        Rgb::from_hex(color)?;
        self.options.color = color.to_string();
        Ok(())
    }

    pub fn set_units(&mut self, units: Units) {
        self.options.units = units;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.options.scale = scale;
    }

    /// Rebuild the solid with the current overrides and display options.
    ///
    /// Stale export widgets are closed before any outcome is visible, on
    /// success and failure alike. The current solid/scene slot is replaced
    /// only after the whole build-adapt-assemble chain succeeded, so a
    /// failure leaves the previous view and export source intact.
    pub fn rebuild(&mut self) -> Result<&SceneObject> {
        if let Some(stale) = self.export_controls.as_mut() {
            stale.close();
        }
        self.export_controls = None;

        match self.build_once() {
            Ok(output) => {
                self.builds += 1;
                self.export_controls = Some(ExportControls::new(self.model.name()));
                tracing::info!(
                    model = self.model.name(),
                    builds = self.builds,
                    "rebuild succeeded"
                );
                let output = self.current.insert(output);
                Ok(&output.scene)
            }
            Err(err) => {
                // The last Built state is still displayable and exportable,
                // so it gets fresh export widgets.
                if self.current.is_some() {
                    self.export_controls = Some(ExportControls::new(self.model.name()));
                }
                tracing::warn!(model = self.model.name(), error = %err, "rebuild failed");
                Err(err)
            }
        }
    }

    fn build_once(&self) -> Result<BuildOutput> {
        let color = Rgb::from_hex(&self.options.color)?;
        let solid = self
            .model
            .build(&self.overrides)?
            .scaled(self.options.effective_scale());

        let mut buffers = MeshBuffers::from_mesh(solid.mesh());
        buffers.recolor(color);
        let scene = scene::to_scene(&buffers, color)?;

        Ok(BuildOutput { solid, scene })
    }

    /// Export the retained solid as `<filename>.<FORMAT>` in the working
    /// directory. The format string is validated before any file is
    /// opened; success is only reported when the exporter returned clean.
    pub fn export(&self, filename: &str, filetype: &str) -> Result<PathBuf> {
        let format: ExportFormat = filetype.parse()?;
        let output = self.current.as_ref().ok_or(Error::NothingBuilt)?;

        let path = PathBuf::from(format!("{filename}.{}", format.extension()));
        let color = Rgb::from_hex(&self.options.color)?;

        match format {
            ExportFormat::Step => io::export_step(output.solid.mesh(), self.model.name(), &path)?,
            ExportFormat::Stl => io::export_stl(output.solid.mesh(), &path)?,
            ExportFormat::Json => io::export_json(output.solid.mesh(), color, &path)?,
            ExportFormat::Svg => io::export_svg(output.solid.mesh(), color, &path)?,
        }

        tracing::info!(path = %path.display(), "exported model");
        Ok(path)
    }
}
