//! `inkshade presets` - list the preset registry.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use inkshade_spec::preset;

pub fn run(json: bool) -> Result<ExitCode> {
    if json {
        let entries: Vec<_> = preset::TAGS
            .iter()
            .map(|tag| json!({ "tag": tag, "preset": preset::lookup(tag) }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&json!({ "presets": entries }))?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Registered material presets".bold());
    println!(
        "{:<10} {:>5} {:>5} {:>6} {:>9} {:>8}",
        "tag".dimmed(),
        "rim".dimmed(),
        "spec".dimmed(),
        "shiny".dimmed(),
        "halftone".dimmed(),
        "outline".dimmed()
    );
    for tag in preset::TAGS {
        let p = preset::lookup(tag);
        println!(
            "{:<10} {:>5.2} {:>5.2} {:>6.1} {:>9.2} {:>8.3}",
            tag.cyan(),
            p.rim_intensity,
            p.specular_intensity,
            p.specular_shininess,
            p.halftone_intensity,
            p.outline_width,
        );
    }
    println!();
    println!("Unknown tags resolve to {}.", "default".cyan());
    Ok(ExitCode::SUCCESS)
}
