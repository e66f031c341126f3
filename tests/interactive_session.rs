// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end session tests: parse, derive controls, rebuild, export

use cadview::{BuildSession, Control, Error, ParamValue, Units};

const SCRIPT: &str = r#"
// mounting plate with a boss
width = 40.0;
depth = 30.0;
thickness = 3;
boss = true;
label = "plate";

cube([width, depth, thickness]);
translate([20, 15, 3]) cylinder(h=6, r=4, $fn=24);
"#;

#[test]
fn test_controls_match_parameter_kinds() {
    let session = BuildSession::from_source("plate", SCRIPT).unwrap();
    let controls = session.controls();

    let labels: Vec<&str> = controls.parameters.iter().map(|c| c.label()).collect();
    assert_eq!(labels, ["width", "depth", "thickness", "boss", "label"]);

    assert!(matches!(controls.parameters[0], Control::FloatField { .. }));
    assert!(matches!(controls.parameters[2], Control::IntField { .. }));
    // A bool default must become a checkbox, not an int field
    assert!(matches!(controls.parameters[3], Control::Checkbox { .. }));
    assert!(matches!(controls.parameters[4], Control::TextField { .. }));

    // Fixed display options: color picker, unit toggle, scale field
    assert_eq!(controls.display.len(), 3);
}

#[test]
fn test_rebuild_loop_with_overrides() {
    let mut session = BuildSession::from_source("plate", SCRIPT).unwrap();

    let first = session.rebuild().unwrap().clone();
    let first_extent = session.current().unwrap().solid.bounding_box().max_extent();

    // Same inputs, same scene
    let again = session.rebuild().unwrap().clone();
    assert_eq!(first, again);

    // A widened plate changes the geometry
    session
        .set_override("width", ParamValue::Float(80.0))
        .unwrap();
    session.rebuild().unwrap();
    let wider_extent = session.current().unwrap().solid.bounding_box().max_extent();
    assert!(wider_extent > first_extent);
}

#[test]
fn test_failed_rebuild_keeps_exportable_solid() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = BuildSession::from_source("plate", SCRIPT).unwrap();
    session.rebuild().unwrap();
    let good_solid = session.current().unwrap().solid.clone();

    session
        .set_override("thickness", ParamValue::Int(-2))
        .unwrap();
    assert!(matches!(session.rebuild(), Err(Error::Build(_))));

    // Export still sees the last successful solid
    assert_eq!(session.current().unwrap().solid, good_solid);
    let base = dir.path().join("plate");
    let path = session.export(base.to_str().unwrap(), "STL").unwrap();
    assert!(path.exists());
}

#[test]
fn test_parse_failure_reports_and_builds_nothing() {
    let result = BuildSession::from_source("broken", "cube([1, 2;");
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[test]
fn test_inch_units_scale_export_geometry() {
    let mut session =
        BuildSession::from_source("cube", "size = 2.0;\ncube(size);").unwrap();
    session.rebuild().unwrap();
    let mm_extent = session.current().unwrap().solid.bounding_box().max_extent();

    session.set_units(Units::In);
    session.rebuild().unwrap();
    let in_extent = session.current().unwrap().solid.bounding_box().max_extent();

    assert!((in_extent / mm_extent - 25.4).abs() < 1e-9);
}

#[test]
fn test_export_controls_follow_build_state() {
    let mut session = BuildSession::from_source("plate", SCRIPT).unwrap();
    assert!(session.export_controls().is_none());

    session.rebuild().unwrap();
    let controls = session.export_controls().unwrap();
    assert!(!controls.is_closed());
    assert!(matches!(
        &controls.filename,
        Control::TextField { value, .. } if value == "plate"
    ));
    assert!(matches!(
        &controls.filetype,
        Control::Dropdown { value, .. } if value == "STEP"
    ));
}
