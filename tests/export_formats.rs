// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Export-path tests across the supported filetypes

use cadview::{BuildSession, Error, MeshBuffers};

const SCRIPT: &str = "size = 10.0;\ncube(size, center=true);";

fn built_session() -> BuildSession {
    let mut session = BuildSession::from_source("block", SCRIPT).unwrap();
    session.rebuild().unwrap();
    session
}

#[test]
fn test_export_writes_one_file_per_format() {
    let dir = tempfile::tempdir().unwrap();
    let session = built_session();
    let base = dir.path().join("block");
    let base = base.to_str().unwrap();

    for (filetype, extension) in [
        ("STEP", "STEP"),
        ("STL", "STL"),
        ("JSON", "JSON"),
        ("SVG", "SVG"),
    ] {
        let path = session.export(base, filetype).unwrap();
        assert_eq!(path, dir.path().join(format!("block.{extension}")));
        assert!(path.exists(), "{filetype} export missing");
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}

#[test]
fn test_format_strings_are_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let session = built_session();
    let base = dir.path().join("lower");

    let path = session.export(base.to_str().unwrap(), "stl").unwrap();
    assert_eq!(path, dir.path().join("lower.STL"));
}

#[test]
fn test_unknown_format_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let session = built_session();
    let base = dir.path().join("block");

    let result = session.export(base.to_str().unwrap(), "OBJ");
    assert!(matches!(result, Err(Error::UnsupportedExportFormat(_))));

    // No file of any kind was created
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_json_export_reparses_as_interchange_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = BuildSession::from_source("block", SCRIPT).unwrap();
    session.set_color("#ff0000").unwrap();
    session.rebuild().unwrap();

    let base = dir.path().join("block");
    let path = session.export(base.to_str().unwrap(), "JSON").unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    let buffers: MeshBuffers = serde_json::from_str(&content).unwrap();

    assert_eq!(buffers.color_diffuse, [1.0, 0.0, 0.0]);
    assert_eq!(buffers.vertices.len() % 3, 0);
    assert_eq!(buffers.faces.len() % 4, 0);

    // The adapter can structure what the exporter wrote
    let mesh = buffers.structure().unwrap();
    assert_eq!(mesh.triangle_count() * 4, buffers.faces.len());
}

#[test]
fn test_stl_export_has_expected_triangle_count() {
    let dir = tempfile::tempdir().unwrap();
    let session = built_session();
    let triangle_count = session.current().unwrap().solid.mesh().triangle_count();

    let base = dir.path().join("block");
    let path = session.export(base.to_str().unwrap(), "STL").unwrap();

    let bytes = std::fs::read(path).unwrap();
    let count = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]);
    assert_eq!(count as usize, triangle_count);
}
