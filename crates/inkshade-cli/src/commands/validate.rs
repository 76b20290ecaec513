//! `inkshade validate` - validate a material document without rendering.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use inkshade_spec::validation::validate_spec;

use super::load_material;

pub fn run(material: &str, json: bool) -> Result<ExitCode> {
    let spec = load_material(material)?;
    let result = validate_spec(&spec);

    if json {
        let errors: Vec<_> = result
            .errors
            .iter()
            .map(|e| {
                json!({
                    "code": e.code.code(),
                    "field": e.field,
                    "message": e.message,
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "file": material,
                "tag": spec.tag,
                "ok": result.is_ok(),
                "errors": errors,
            }))?
        );
        return Ok(if result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    if result.is_ok() {
        println!("{} {} (tag {})", "valid".green().bold(), material, spec.tag.cyan());
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "invalid".red().bold(), material);
    for error in &result.errors {
        println!("  {} {}: {}", error.code.code().red(), error.field.yellow(), error.message);
    }
    Ok(ExitCode::from(1))
}
