// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - export format selection and file writers

mod export_json;
mod export_step;
mod export_stl;
mod export_svg;

pub use export_json::export_json;
pub use export_step::export_step;
pub use export_stl::export_stl;
pub use export_svg::{export_svg, render_svg};

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// The supported export filetypes. Anything else is rejected before a file
/// is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Step,
    Json,
    Stl,
    Svg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Step,
        ExportFormat::Json,
        ExportFormat::Stl,
        ExportFormat::Svg,
    ];

    /// File extension, uppercase by convention (`part.STEP`, `part.STL`)
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Step => "STEP",
            ExportFormat::Json => "JSON",
            ExportFormat::Stl => "STL",
            ExportFormat::Svg => "SVG",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "STEP" => Ok(ExportFormat::Step),
            "JSON" => Ok(ExportFormat::Json),
            "STL" => Ok(ExportFormat::Stl),
            "SVG" => Ok(ExportFormat::Svg),
            _ => Err(Error::UnsupportedExportFormat(s.to_string())),
        }
    }
}
