// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! cadview CLI

use anyhow::{Context, Result};
use cadview::{BuildSession, ParamValue, Units};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::Path;

#[derive(Parser)]
#[command(name = "cadview")]
#[command(about = "Preview and export parametric CAD scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the parameters a script declares
    Params {
        /// Input script file
        input: String,
    },

    /// Build a script and write its scene description as JSON
    Preview {
        /// Input script file
        input: String,

        /// Scene output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Parameter overrides, name=value
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,

        /// Fill color as #rrggbb
        #[arg(long)]
        color: Option<String>,

        /// Model units (mm or in)
        #[arg(long, default_value = "mm")]
        units: String,

        /// Scale factor
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },

    /// Build a script and export the solid to a file
    Export {
        /// Input script file
        input: String,

        /// Output filename without extension (defaults to the script stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Export format (STEP, STL, JSON, SVG)
        #[arg(short, long, default_value = "STEP")]
        format: String,

        /// Parameter overrides, name=value
        #[arg(long = "set", value_name = "NAME=VALUE")]
        overrides: Vec<String>,

        /// Fill color as #rrggbb
        #[arg(long)]
        color: Option<String>,

        /// Model units (mm or in)
        #[arg(long, default_value = "mm")]
        units: String,

        /// Scale factor
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Params { input } => {
            let session = open_session(&input)?;
            for parameter in session.model().parameters() {
                println!(
                    "{}  {}  default = {}",
                    parameter.name.cyan(),
                    parameter.default.kind().to_string().dimmed(),
                    parameter.default
                );
            }
            Ok(())
        }

        Commands::Preview {
            input,
            output,
            overrides,
            color,
            units,
            scale,
        } => {
            let mut session = open_session(&input)?;
            configure(&mut session, &overrides, color.as_deref(), &units, scale)?;

            let scene = session.rebuild()?;
            let json = serde_json::to_string_pretty(scene)?;

            match output {
                Some(path) => {
                    fs::write(&path, json).context("failed to write scene file")?;
                    println!("{} {}", "scene written:".green(), path);
                }
                None => println!("{json}"),
            }
            Ok(())
        }

        Commands::Export {
            input,
            name,
            format,
            overrides,
            color,
            units,
            scale,
        } => {
            let mut session = open_session(&input)?;
            configure(&mut session, &overrides, color.as_deref(), &units, scale)?;

            session.rebuild()?;
            let filename = name.unwrap_or_else(|| model_name(&input));
            let path = session.export(&filename, &format)?;
            println!("{} {}", "exported model as:".green(), path.display());
            Ok(())
        }
    }
}

fn open_session(input: &str) -> Result<BuildSession> {
    let source = fs::read_to_string(input)
        .with_context(|| format!("failed to read script file: {input}"))?;
    let session = BuildSession::from_source(&model_name(input), &source)?;
    Ok(session)
}

/// Export filename default: the script's file stem
fn model_name(input: &str) -> String {
    Path::new(input)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("output")
        .to_string()
}

fn configure(
    session: &mut BuildSession,
    overrides: &[String],
    color: Option<&str>,
    units: &str,
    scale: f64,
) -> Result<()> {
    for entry in overrides {
        let (name, raw) = entry
            .split_once('=')
            .with_context(|| format!("override {entry:?} is not NAME=VALUE"))?;
        session.set_override(name, ParamValue::parse(raw))?;
    }
    if let Some(color) = color {
        session.set_color(color)?;
    }
    session.set_units(units.parse::<Units>()?);
    session.set_scale(scale);
    Ok(())
}
