// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Script parser using pest

use super::ast::{Args, Expr, Node, Program, ShapeKind, TransformKind};
use super::model::ParamValue;
use crate::error::{Error, Result};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "script/script.pest"]
struct ScriptParser;

/// Parse script source into a [`Program`]
pub fn parse_script(source: &str) -> Result<Program> {
    let mut pairs = ScriptParser::parse(Rule::program, source)
        .map_err(|e| Error::Parse(e.to_string()))?;

    let mut program = Program::default();

    if let Some(root) = pairs.next() {
        for pair in root.into_inner() {
            match pair.as_rule() {
                Rule::statement => parse_statement(pair, &mut program)?,
                Rule::EOI => {}
                _ => {}
            }
        }
    }

    Ok(program)
}

fn parse_statement(pair: Pair<Rule>, program: &mut Program) -> Result<()> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| Error::Parse("empty statement".into()))?;

    match inner.as_rule() {
        Rule::assignment => {
            let (name, value) = parse_assignment(inner)?;
            // Re-assignment updates the default; declaration order is kept
            match program.assignments.iter_mut().find(|(n, _)| *n == name) {
                Some(slot) => slot.1 = value,
                None => program.assignments.push((name, value)),
            }
        }
        Rule::inner_statement => {
            if let Some(node) = parse_inner_statement(inner)? {
                program.nodes.push(node);
            }
        }
        _ => {}
    }

    Ok(())
}

fn parse_assignment(pair: Pair<Rule>) -> Result<(String, ParamValue)> {
    let mut inner = pair.into_inner();
    let name = inner.next().unwrap().as_str().to_string();
    let value = parse_literal(inner.next().unwrap())?;
    Ok((name, value))
}

fn parse_inner_statement(pair: Pair<Rule>) -> Result<Option<Node>> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| Error::Parse("empty statement".into()))?;

    match inner.as_rule() {
        Rule::shape_stmt => parse_shape(inner).map(Some),
        Rule::transform_stmt => parse_transform(inner).map(Some),
        _ => Ok(None),
    }
}

fn parse_shape(pair: Pair<Rule>) -> Result<Node> {
    let inner = pair.into_inner().next().unwrap();

    let kind = match inner.as_rule() {
        Rule::cube_stmt => ShapeKind::Cube,
        Rule::sphere_stmt => ShapeKind::Sphere,
        Rule::cylinder_stmt => ShapeKind::Cylinder,
        rule => return Err(Error::Parse(format!("unexpected shape rule {rule:?}"))),
    };

    let args = match inner.into_inner().next() {
        Some(list) => parse_args(list)?,
        None => Args::default(),
    };

    Ok(Node::Shape { kind, args })
}

fn parse_transform(pair: Pair<Rule>) -> Result<Node> {
    let inner = pair.into_inner().next().unwrap();

    let kind = match inner.as_rule() {
        Rule::translate_stmt => TransformKind::Translate,
        Rule::rotate_stmt => TransformKind::Rotate,
        Rule::scale_stmt => TransformKind::Scale,
        rule => return Err(Error::Parse(format!("unexpected transform rule {rule:?}"))),
    };

    let mut parts = inner.into_inner();
    let args = parse_args(parts.next().unwrap())?;
    let children = parse_body(parts.next().unwrap())?;

    Ok(Node::Transform {
        kind,
        args,
        children,
    })
}

fn parse_body(pair: Pair<Rule>) -> Result<Vec<Node>> {
    let inner = pair.into_inner().next().unwrap();

    match inner.as_rule() {
        Rule::block => {
            let mut nodes = Vec::new();
            for stmt in inner.into_inner() {
                if let Some(node) = parse_inner_statement(stmt)? {
                    nodes.push(node);
                }
            }
            Ok(nodes)
        }
        Rule::inner_statement => Ok(parse_inner_statement(inner)?.into_iter().collect()),
        _ => Ok(Vec::new()),
    }
}

fn parse_args(pair: Pair<Rule>) -> Result<Args> {
    let mut args = Args::default();

    for arg in pair.into_inner() {
        let inner = arg.into_inner().next().unwrap();
        match inner.as_rule() {
            Rule::named_arg => {
                let mut parts = inner.into_inner();
                let name = parts.next().unwrap().as_str().to_string();
                let expr = parse_expr(parts.next().unwrap())?;
                args.named.push((name, expr));
            }
            Rule::expr => args.positional.push(parse_expr(inner)?),
            _ => {}
        }
    }

    Ok(args)
}

fn parse_expr(pair: Pair<Rule>) -> Result<Expr> {
    let inner = pair.into_inner().next().unwrap();

    match inner.as_rule() {
        Rule::literal => Ok(Expr::Literal(parse_literal(inner)?)),
        Rule::vector => {
            let mut items = Vec::new();
            for expr in inner.into_inner() {
                items.push(parse_expr(expr)?);
            }
            Ok(Expr::Vector(items))
        }
        Rule::ident => Ok(Expr::Ref(inner.as_str().to_string())),
        rule => Err(Error::Parse(format!("unexpected expression rule {rule:?}"))),
    }
}

fn parse_literal(pair: Pair<Rule>) -> Result<ParamValue> {
    let inner = pair.into_inner().next().unwrap();

    match inner.as_rule() {
        Rule::boolean => Ok(ParamValue::Bool(inner.as_str() == "true")),
        Rule::integer => inner
            .as_str()
            .parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|e| Error::Parse(format!("bad integer literal: {e}"))),
        Rule::float => inner
            .as_str()
            .parse::<f64>()
            .map(ParamValue::Float)
            .map_err(|e| Error::Parse(format!("bad float literal: {e}"))),
        Rule::string => {
            let text = inner.into_inner().next().unwrap().as_str().to_string();
            Ok(ParamValue::Text(text))
        }
        rule => Err(Error::Parse(format!("unexpected literal rule {rule:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cube() {
        let program = parse_script("cube([10, 10, 10]);").unwrap();
        assert_eq!(program.nodes.len(), 1);
        assert!(program.assignments.is_empty());
    }

    #[test]
    fn test_parse_transform_with_block() {
        let program =
            parse_script("translate([5, 0, 0]) { cube(10); sphere(4); }").unwrap();
        match &program.nodes[0] {
            Node::Transform { kind, children, .. } => {
                assert_eq!(*kind, TransformKind::Translate);
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected transform, got {other:?}"),
        }
    }

    #[test]
    fn test_parameters_collected_in_order() {
        let program = parse_script(
            "width = 50;\nheight = 30.5;\nrounded = true;\nlabel = \"lid\";\ncube([width, width, height]);",
        )
        .unwrap();

        let names: Vec<&str> = program
            .assignments
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, ["width", "height", "rounded", "label"]);
        assert_eq!(program.assignments[0].1, ParamValue::Int(50));
        assert_eq!(program.assignments[1].1, ParamValue::Float(30.5));
        assert_eq!(program.assignments[2].1, ParamValue::Bool(true));
        assert_eq!(program.assignments[3].1, ParamValue::Text("lid".into()));
    }

    #[test]
    fn test_reassignment_updates_default() {
        let program = parse_script("size = 1;\nsize = 2;\ncube(size);").unwrap();
        assert_eq!(program.assignments.len(), 1);
        assert_eq!(program.assignments[0].1, ParamValue::Int(2));
    }

    #[test]
    fn test_named_and_positional_args() {
        let program = parse_script("cylinder(h=20, r=5, $fn=64);").unwrap();
        match &program.nodes[0] {
            Node::Shape { kind, args } => {
                assert_eq!(*kind, ShapeKind::Cylinder);
                assert!(args.named("h").is_some());
                assert!(args.named("$fn").is_some());
            }
            other => panic!("expected shape, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_is_reported() {
        let result = parse_script("cube(10");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_assignment_not_allowed_in_block() {
        let result = parse_script("translate([1,0,0]) { x = 1; }");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_comments_are_skipped() {
        let program = parse_script(
            "// lid thickness\nthickness = 2.4; /* inline */ cube(thickness);",
        )
        .unwrap();
        assert_eq!(program.assignments.len(), 1);
        assert_eq!(program.nodes.len(), 1);
    }
}
