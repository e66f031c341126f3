// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parametric model: declared parameters and build entry point

use super::ast::Program;
use super::{evaluator, parser};
use crate::error::{Error, Result};
use crate::geometry::Solid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Scalar kinds a parameter can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    Text,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Text => "text",
        };
        write!(f, "{name}")
    }
}

/// A parameter's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    /// Classify a value. The priority order is contractual: bool before int
    /// before float before text. It decides which control a parameter gets,
    /// so a bool must never be classified as an int.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Text(_) => ParamKind::Text,
        }
    }

    /// Parse a bare override string (`--set name=value` on the CLI) with the
    /// same priority order as [`ParamValue::kind`]: `true`/`false` first,
    /// then integer, then float, then free text.
    pub fn parse(raw: &str) -> ParamValue {
        match raw {
            "true" => return ParamValue::Bool(true),
            "false" => return ParamValue::Bool(false),
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return ParamValue::Int(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            return ParamValue::Float(f);
        }
        ParamValue::Text(raw.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// A declared script parameter: name plus default value. Produced once per
/// parse, read-only afterwards; overrides live in the build session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub default: ParamValue,
}

impl Parameter {
    /// Validate an override against the declared kind. An Int override is
    /// accepted where a Float is declared (and widened); everything else
    /// must match exactly.
    pub fn coerce_override(&self, value: &ParamValue) -> Result<ParamValue> {
        match (self.default.kind(), value) {
            (ParamKind::Float, ParamValue::Int(i)) => Ok(ParamValue::Float(*i as f64)),
            (declared, v) if v.kind() == declared => Ok(v.clone()),
            (declared, v) => Err(Error::Build(format!(
                "parameter {:?} expects {} but override is {} ({})",
                self.name,
                declared,
                v.kind(),
                v
            ))),
        }
    }
}

/// Override values keyed by parameter name
pub type Overrides = BTreeMap<String, ParamValue>;

/// A parsed parametric script with its declared parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametricModel {
    name: String,
    program: Program,
    parameters: Vec<Parameter>,
}

impl ParametricModel {
    /// Parse script source. The model name seeds the export filename box.
    pub fn parse(name: &str, source: &str) -> Result<Self> {
        let program = parser::parse_script(source)?;
        let parameters = program
            .assignments
            .iter()
            .map(|(name, default)| Parameter {
                name: name.clone(),
                default: default.clone(),
            })
            .collect();
        tracing::debug!(model = name, "parsed parametric script");
        Ok(Self {
            name: name.to_string(),
            program,
            parameters,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Re-run the script's build with overrides substituted for their
    /// matching parameters. Unknown names and kind mismatches fail the
    /// build; the caller's retained state is untouched.
    pub fn build(&self, overrides: &Overrides) -> Result<Solid> {
        let mut env: BTreeMap<String, ParamValue> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.default.clone()))
            .collect();

        for (name, value) in overrides {
            let parameter = self
                .parameter(name)
                .ok_or_else(|| Error::Build(format!("unknown parameter {name:?}")))?;
            env.insert(name.clone(), parameter.coerce_override(value)?);
        }

        let mesh = evaluator::evaluate(&self.program, &env)?;
        if mesh.is_empty() {
            return Err(Error::Build("script produced no geometry".into()));
        }
        Ok(Solid::new(mesh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_priority_bool_before_int() {
        assert_eq!(ParamValue::parse("true"), ParamValue::Bool(true));
        assert_eq!(ParamValue::parse("false"), ParamValue::Bool(false));
        assert_eq!(ParamValue::parse("42"), ParamValue::Int(42));
        assert_eq!(ParamValue::parse("-3"), ParamValue::Int(-3));
        assert_eq!(ParamValue::parse("2.5"), ParamValue::Float(2.5));
        assert_eq!(
            ParamValue::parse("hello"),
            ParamValue::Text("hello".into())
        );
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(ParamValue::Bool(true).kind(), ParamKind::Bool);
        assert_eq!(ParamValue::Int(1).kind(), ParamKind::Int);
        assert_eq!(ParamValue::Float(1.0).kind(), ParamKind::Float);
        assert_eq!(ParamValue::Text(String::new()).kind(), ParamKind::Text);
    }

    #[test]
    fn test_override_coercion() {
        let float_param = Parameter {
            name: "width".into(),
            default: ParamValue::Float(10.0),
        };
        // Int widens to the declared Float
        assert_eq!(
            float_param.coerce_override(&ParamValue::Int(3)).unwrap(),
            ParamValue::Float(3.0)
        );
        // Bool does not
        assert!(float_param
            .coerce_override(&ParamValue::Bool(true))
            .is_err());

        let int_param = Parameter {
            name: "count".into(),
            default: ParamValue::Int(4),
        };
        assert!(int_param.coerce_override(&ParamValue::Float(4.5)).is_err());
    }

    #[test]
    fn test_build_rejects_unknown_override() {
        let model =
            ParametricModel::parse("part", "r = 5.0;\nsphere(r=r);").unwrap();
        let mut overrides = Overrides::new();
        overrides.insert("bogus".into(), ParamValue::Int(1));
        assert!(matches!(
            model.build(&overrides),
            Err(crate::error::Error::Build(_))
        ));
    }
}
