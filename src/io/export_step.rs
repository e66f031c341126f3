// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minimal faceted-brep STEP (ISO 10303-21) exporter

use crate::error::Result;
use crate::geometry::Mesh;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write the mesh as a faceted brep: one CARTESIAN_POINT per vertex, one
/// POLY_LOOP-bounded face per triangle, gathered into a CLOSED_SHELL.
pub fn export_step(mesh: &Mesh, name: &str, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    writeln!(w, "ISO-10303-21;")?;
    writeln!(w, "HEADER;")?;
    writeln!(w, "FILE_DESCRIPTION(('faceted brep export'),'2;1');")?;
    writeln!(
        w,
        "FILE_NAME('{}','',('cadview'),(''),'cadview','','');",
        escape(name)
    )?;
    writeln!(
        w,
        "FILE_SCHEMA(('AUTOMOTIVE_DESIGN {{ 1 0 10303 214 1 1 1 1 }}'));"
    )?;
    writeln!(w, "ENDSEC;")?;
    writeln!(w, "DATA;")?;

    // Entity ids are assigned sequentially; points first so faces can
    // reference them.
    let mut next_id = 1usize;
    let mut point_ids = Vec::with_capacity(mesh.vertex_count());
    for v in &mesh.vertices {
        writeln!(
            w,
            "#{}=CARTESIAN_POINT('',({:.6},{:.6},{:.6}));",
            next_id, v.x, v.y, v.z
        )?;
        point_ids.push(next_id);
        next_id += 1;
    }

    let mut face_ids = Vec::with_capacity(mesh.triangle_count());
    for triangle in &mesh.triangles {
        let loop_id = next_id;
        writeln!(
            w,
            "#{}=POLY_LOOP('',(#{},#{},#{}));",
            loop_id,
            point_ids[triangle.indices[0]],
            point_ids[triangle.indices[1]],
            point_ids[triangle.indices[2]]
        )?;
        let bound_id = loop_id + 1;
        writeln!(w, "#{bound_id}=FACE_OUTER_BOUND('',#{loop_id},.T.);")?;
        let face_id = loop_id + 2;
        writeln!(w, "#{face_id}=FACE('',(#{bound_id}));")?;
        face_ids.push(face_id);
        next_id = face_id + 1;
    }

    let shell_id = next_id;
    let face_refs: Vec<String> = face_ids.iter().map(|id| format!("#{id}")).collect();
    writeln!(
        w,
        "#{}=CLOSED_SHELL('',({}));",
        shell_id,
        face_refs.join(",")
    )?;
    let brep_id = shell_id + 1;
    writeln!(w, "#{brep_id}=FACETED_BREP('{}',#{shell_id});", escape(name))?;
    writeln!(
        w,
        "#{}=FACETED_BREP_SHAPE_REPRESENTATION('{}',(#{brep_id}));",
        brep_id + 1,
        escape(name)
    )?;

    writeln!(w, "ENDSEC;")?;
    writeln!(w, "END-ISO-10303-21;")?;
    w.flush()?;
    Ok(())
}

/// STEP strings quote apostrophes by doubling them
fn escape(s: &str) -> String {
    s.replace('\'', "''")
}
