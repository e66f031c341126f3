// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parsed script tree

use super::model::ParamValue;
use nalgebra::{Matrix4, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Unevaluated argument expression. Identifier references are resolved
/// against the parameter environment at build time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Literal(ParamValue),
    Vector(Vec<Expr>),
    Ref(String),
}

/// Argument list of a shape or transform call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Args {
    pub named: Vec<(String, Expr)>,
    pub positional: Vec<Expr>,
}

impl Args {
    pub fn named(&self, name: &str) -> Option<&Expr> {
        self.named
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }

    pub fn positional(&self, index: usize) -> Option<&Expr> {
        self.positional.get(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Cube,
    Sphere,
    Cylinder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    Translate,
    Rotate,
    Scale,
}

impl TransformKind {
    /// Matrix for this transform given its resolved vector argument.
    /// Rotation angles are in degrees, applied X then Y then Z.
    pub fn to_matrix(&self, v: Vector3<f64>) -> Matrix4<f64> {
        match self {
            TransformKind::Translate => Matrix4::new_translation(&v),
            TransformKind::Rotate => {
                let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), v.x.to_radians());
                let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), v.y.to_radians());
                let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), v.z.to_radians());
                (rz * ry * rx).to_homogeneous()
            }
            TransformKind::Scale => Matrix4::new_nonuniform_scaling(&v),
        }
    }
}

/// Geometry-producing statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Shape {
        kind: ShapeKind,
        args: Args,
    },
    Transform {
        kind: TransformKind,
        args: Args,
        children: Vec<Node>,
    },
}

/// A whole parsed script: ordered parameter assignments plus geometry
/// statements. Multiple top-level statements merge into one solid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub assignments: Vec<(String, ParamValue)>,
    pub nodes: Vec<Node>,
}
