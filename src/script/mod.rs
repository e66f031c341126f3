// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Script front-end - grammar, parametric model, evaluation

pub mod ast;
mod evaluator;
mod model;
mod parser;

pub use model::{Overrides, ParamKind, ParamValue, Parameter, ParametricModel};
pub use parser::parse_script;
