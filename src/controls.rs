// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Interactive control descriptors derived from script parameters
//!
//! The crate does not render widgets; it hands a host surface a set of
//! typed descriptors and receives value changes back through the session.

use crate::error::Error;
use crate::script::{ParamKind, Parameter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default fill color offered by the color picker
pub const DEFAULT_COLOR: &str = "#8dc63f";

/// Millimeters per inch, applied to the scale factor when inches are chosen
pub const MM_PER_INCH: f64 = 25.4;

/// Model units offered by the unit toggle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Mm,
    In,
}

impl Units {
    pub fn scale_multiplier(&self) -> f64 {
        match self {
            Units::Mm => 1.0,
            Units::In => MM_PER_INCH,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Units::Mm => write!(f, "mm"),
            Units::In => write!(f, "in"),
        }
    }
}

impl FromStr for Units {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Units::Mm),
            "in" => Ok(Units::In),
            other => Err(Error::Build(format!("unknown units {other:?}"))),
        }
    }
}

/// One interactive widget the host should render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Control {
    Checkbox {
        label: String,
        value: bool,
    },
    IntField {
        label: String,
        value: i64,
    },
    FloatField {
        label: String,
        value: f64,
    },
    TextField {
        label: String,
        value: String,
    },
    ColorPicker {
        label: String,
        value: String,
    },
    Toggle {
        label: String,
        options: Vec<String>,
        value: String,
    },
    Dropdown {
        label: String,
        options: Vec<String>,
        value: String,
    },
    Button {
        label: String,
    },
}

impl Control {
    /// Select the control kind for a parameter purely from the kind of its
    /// default value. The priority is contractual (see
    /// [`crate::script::ParamValue::kind`]): bool before int before float,
    /// free text as the fallback.
    pub fn for_parameter(parameter: &Parameter) -> Control {
        use crate::script::ParamValue;

        let label = parameter.name.clone();
        match (parameter.default.kind(), &parameter.default) {
            (ParamKind::Bool, ParamValue::Bool(b)) => Control::Checkbox {
                label,
                value: *b,
            },
            (ParamKind::Int, ParamValue::Int(i)) => Control::IntField {
                label,
                value: *i,
            },
            (ParamKind::Float, ParamValue::Float(f)) => Control::FloatField {
                label,
                value: *f,
            },
            (_, other) => Control::TextField {
                label,
                value: other.to_string(),
            },
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Control::Checkbox { label, .. }
            | Control::IntField { label, .. }
            | Control::FloatField { label, .. }
            | Control::TextField { label, .. }
            | Control::ColorPicker { label, .. }
            | Control::Toggle { label, .. }
            | Control::Dropdown { label, .. }
            | Control::Button { label } => label,
        }
    }
}

/// Parameter controls plus the fixed display-option controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlSet {
    pub parameters: Vec<Control>,
    pub display: Vec<Control>,
}

/// One control per declared parameter, plus color picker, unit toggle and
/// scale factor.
pub fn derive_controls(parameters: &[Parameter]) -> ControlSet {
    ControlSet {
        parameters: parameters.iter().map(Control::for_parameter).collect(),
        display: vec![
            Control::ColorPicker {
                label: "Color".into(),
                value: DEFAULT_COLOR.into(),
            },
            Control::Toggle {
                label: "Units".into(),
                options: vec!["mm".into(), "in".into()],
                value: "mm".into(),
            },
            Control::FloatField {
                label: "Scale".into(),
                value: 1.0,
            },
        ],
    }
}

/// Export widgets: filename box, filetype selector, export button.
///
/// Owned by the session; the session closes the current set on every
/// rebuild path (success or failure) before replacements are issued, so a
/// host never holds live references to stale widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportControls {
    pub filename: Control,
    pub filetype: Control,
    pub button: Control,
    closed: bool,
}

impl ExportControls {
    pub fn new(default_filename: &str) -> Self {
        Self {
            filename: Control::TextField {
                label: "Filename".into(),
                value: default_filename.to_string(),
            },
            filetype: Control::Dropdown {
                label: "Filetype".into(),
                options: vec!["STEP".into(), "JSON".into(), "STL".into(), "SVG".into()],
                value: "STEP".into(),
            },
            button: Control::Button {
                label: "Export".into(),
            },
            closed: false,
        }
    }

    /// Invalidate this widget set. A closed set is never re-displayed.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ParamValue;

    fn param(name: &str, default: ParamValue) -> Parameter {
        Parameter {
            name: name.into(),
            default,
        }
    }

    #[test]
    fn test_kind_to_control_mapping() {
        // Bool must map to a checkbox, never an int field
        assert!(matches!(
            Control::for_parameter(&param("flag", ParamValue::Bool(true))),
            Control::Checkbox { value: true, .. }
        ));
        assert!(matches!(
            Control::for_parameter(&param("count", ParamValue::Int(7))),
            Control::IntField { value: 7, .. }
        ));
        assert!(matches!(
            Control::for_parameter(&param("width", ParamValue::Float(2.5))),
            Control::FloatField { .. }
        ));
        assert!(matches!(
            Control::for_parameter(&param("label", ParamValue::Text("lid".into()))),
            Control::TextField { .. }
        ));
    }

    #[test]
    fn test_display_controls_are_fixed() {
        let set = derive_controls(&[]);
        assert!(set.parameters.is_empty());
        assert_eq!(set.display.len(), 3);
        assert!(matches!(
            &set.display[0],
            Control::ColorPicker { value, .. } if value == DEFAULT_COLOR
        ));
        assert!(matches!(
            &set.display[1],
            Control::Toggle { value, .. } if value == "mm"
        ));
        assert!(matches!(
            &set.display[2],
            Control::FloatField { value, .. } if *value == 1.0
        ));
    }

    #[test]
    fn test_export_controls_lifecycle() {
        let mut controls = ExportControls::new("bracket");
        assert!(!controls.is_closed());
        assert!(matches!(
            &controls.filename,
            Control::TextField { value, .. } if value == "bracket"
        ));

        controls.close();
        assert!(controls.is_closed());
    }

    #[test]
    fn test_units() {
        assert_eq!("mm".parse::<Units>().unwrap(), Units::Mm);
        assert_eq!("in".parse::<Units>().unwrap(), Units::In);
        assert!("cm".parse::<Units>().is_err());
        assert_eq!(Units::In.scale_multiplier(), MM_PER_INCH);
        assert_eq!(Units::Mm.scale_multiplier(), 1.0);
    }
}
