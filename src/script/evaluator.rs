// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Script evaluator - turns a parsed program into a mesh

use super::ast::{Args, Expr, Node, Program, ShapeKind, TransformKind};
use super::model::ParamValue;
use crate::error::{Error, Result};
use crate::geometry::{Mesh, Primitive};
use nalgebra::{Matrix4, Vector3};
use std::collections::BTreeMap;

/// Parameter environment: declared defaults with session overrides applied
pub type Env = BTreeMap<String, ParamValue>;

/// Evaluate a whole program under an environment. Top-level statements are
/// merged into a single mesh.
pub fn evaluate(program: &Program, env: &Env) -> Result<Mesh> {
    let mut mesh = Mesh::new();
    for node in &program.nodes {
        let part = evaluate_node(node, env, &Matrix4::identity())?;
        mesh.merge(&part);
    }
    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "evaluated script"
    );
    Ok(mesh)
}

fn evaluate_node(node: &Node, env: &Env, transform: &Matrix4<f64>) -> Result<Mesh> {
    match node {
        Node::Shape { kind, args } => {
            let args = resolve_args(args, env)?;
            let mut mesh = build_shape(*kind, &args)?;
            mesh.transform(transform);
            Ok(mesh)
        }
        Node::Transform {
            kind,
            args,
            children,
        } => {
            let args = resolve_args(args, env)?;
            let v = transform_vector(*kind, &args)?;
            let combined = transform * kind.to_matrix(v);

            let mut mesh = Mesh::new();
            for child in children {
                let part = evaluate_node(child, env, &combined)?;
                mesh.merge(&part);
            }
            Ok(mesh)
        }
    }
}

fn build_shape(kind: ShapeKind, args: &ResolvedArgs) -> Result<Mesh> {
    match kind {
        ShapeKind::Cube => {
            let size = args
                .vector("size")
                .or_else(|| args.positional_vector(0))
                .unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0));
            require_positive("cube size", size.min())?;
            let center = args.boolean("center").unwrap_or(false);
            Ok(Primitive::cube(size, center).to_mesh())
        }
        ShapeKind::Sphere => {
            let r = args
                .number("r")
                .or_else(|| args.positional_number(0))
                .unwrap_or(1.0);
            require_positive("sphere radius", r)?;
            Ok(Primitive::sphere(r, segments(args)?).to_mesh())
        }
        ShapeKind::Cylinder => {
            let h = args
                .number("h")
                .or_else(|| args.positional_number(0))
                .unwrap_or(1.0);
            let r = args
                .number("r")
                .or_else(|| args.positional_number(1))
                .unwrap_or(1.0);
            require_positive("cylinder height", h)?;
            require_positive("cylinder radius", r)?;
            Ok(Primitive::cylinder(h, r, segments(args)?).to_mesh())
        }
    }
}

fn transform_vector(kind: TransformKind, args: &ResolvedArgs) -> Result<Vector3<f64>> {
    // OpenSCAD names the vector `v` for translate/scale and `a` for rotate
    let named = match kind {
        TransformKind::Rotate => args.vector("a"),
        _ => args.vector("v"),
    };
    named
        .or_else(|| args.positional_vector(0))
        .ok_or_else(|| Error::Build(format!("{kind:?} requires a vector argument")))
}

fn segments(args: &ResolvedArgs) -> Result<u32> {
    match args.number("$fn") {
        None => Ok(32),
        Some(n) if n >= 3.0 => Ok(n as u32),
        Some(n) => Err(Error::Build(format!("$fn must be at least 3, got {n}"))),
    }
}

fn require_positive(what: &str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::Build(format!("{what} must be positive, got {value}")))
    }
}

/// Argument values after environment lookup
enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
    Vector(Vec<f64>),
}

struct ResolvedArgs {
    named: Vec<(String, Value)>,
    positional: Vec<Value>,
}

impl ResolvedArgs {
    fn find(&self, name: &str) -> Option<&Value> {
        self.named.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn number(&self, name: &str) -> Option<f64> {
        match self.find(name) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    fn boolean(&self, name: &str) -> Option<bool> {
        match self.find(name) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    fn vector(&self, name: &str) -> Option<Vector3<f64>> {
        self.find(name).and_then(as_vector3)
    }

    fn positional_number(&self, index: usize) -> Option<f64> {
        match self.positional.get(index) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        }
    }

    fn positional_vector(&self, index: usize) -> Option<Vector3<f64>> {
        self.positional.get(index).and_then(as_vector3)
    }
}

/// Scalars splat to all three components, 2-vectors get z = 0
fn as_vector3(value: &Value) -> Option<Vector3<f64>> {
    match value {
        Value::Number(n) => Some(Vector3::new(*n, *n, *n)),
        Value::Vector(items) => match items.len() {
            2 => Some(Vector3::new(items[0], items[1], 0.0)),
            3 => Some(Vector3::new(items[0], items[1], items[2])),
            _ => None,
        },
        _ => None,
    }
}

fn resolve_args(args: &Args, env: &Env) -> Result<ResolvedArgs> {
    let mut resolved = ResolvedArgs {
        named: Vec::with_capacity(args.named.len()),
        positional: Vec::with_capacity(args.positional.len()),
    };
    for (name, expr) in &args.named {
        resolved.named.push((name.clone(), resolve_expr(expr, env)?));
    }
    for expr in &args.positional {
        resolved.positional.push(resolve_expr(expr, env)?);
    }
    Ok(resolved)
}

fn resolve_expr(expr: &Expr, env: &Env) -> Result<Value> {
    match expr {
        Expr::Literal(value) => Ok(from_param(value)),
        Expr::Ref(name) => {
            let value = env
                .get(name)
                .ok_or_else(|| Error::Build(format!("undefined variable {name:?}")))?;
            Ok(from_param(value))
        }
        Expr::Vector(items) => {
            let mut numbers = Vec::with_capacity(items.len());
            for item in items {
                match resolve_expr(item, env)? {
                    Value::Number(n) => numbers.push(n),
                    _ => {
                        return Err(Error::Build(
                            "vector components must be numbers".into(),
                        ))
                    }
                }
            }
            Ok(Value::Vector(numbers))
        }
    }
}

fn from_param(value: &ParamValue) -> Value {
    match value {
        ParamValue::Bool(b) => Value::Bool(*b),
        ParamValue::Int(i) => Value::Number(*i as f64),
        ParamValue::Float(f) => Value::Number(*f),
        ParamValue::Text(s) => Value::Text(s.clone()),
    }
}
