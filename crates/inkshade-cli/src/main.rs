//! Inkshade CLI - toon material inspection and preview rendering.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use inkshade_cli::commands;

/// Inkshade - Toon Material Toolkit
#[derive(Parser)]
#[command(name = "inkshade")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the material preset registry
    Presets {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a material document without rendering
    Validate {
        /// Path to the material file (JSON)
        #[arg(short, long)]
        material: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render a material preview to PNG
    Preview {
        /// Path to the material file (JSON)
        #[arg(short, long)]
        material: Option<String>,

        /// Preview a bare preset tag instead of a material file
        #[arg(short, long)]
        tag: Option<String>,

        /// Preview geometry
        #[arg(long, default_value = "sphere", value_parser = ["sphere", "cube", "plane"])]
        shape: String,

        /// Output image size in pixels (square)
        #[arg(long, default_value = "256")]
        size: u32,

        /// Output PNG path (default: <name>.preview.png)
        #[arg(short, long)]
        out: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the fragment pipeline at a single point
    Shade {
        /// Path to the material file (JSON)
        #[arg(short, long)]
        material: String,

        /// Fragment normal, view space, comma-separated (e.g. "0,0,1")
        #[arg(short, long, default_value = "0,0,1", allow_hyphen_values = true)]
        normal: String,

        /// Fragment position, view space, comma-separated
        #[arg(short, long, default_value = "0,0,-5", allow_hyphen_values = true)]
        position: String,

        /// Fragment pixel coordinate, comma-separated (default "500,500")
        #[arg(long, allow_hyphen_values = true)]
        frag_coord: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Presets { json } => commands::presets::run(json),
        Commands::Validate { material, json } => commands::validate::run(&material, json),
        Commands::Preview {
            material,
            tag,
            shape,
            size,
            out,
            json,
        } => commands::preview::run(
            material.as_deref(),
            tag.as_deref(),
            &shape,
            size,
            out.as_deref(),
            json,
        ),
        Commands::Shade {
            material,
            normal,
            position,
            frag_coord,
            json,
        } => commands::shade::run(&material, &normal, &position, frag_coord.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
