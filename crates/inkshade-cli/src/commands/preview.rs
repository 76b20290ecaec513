//! `inkshade preview` - render a material preview to PNG.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use colored::Colorize;
use serde_json::json;

use inkshade_backend_shading::png::{content_hash, encode_rgba, PngConfig};
use inkshade_backend_shading::preview::{render_preview, PreviewShape};
use inkshade_spec::validation::validate_uniforms;
use inkshade_spec::{ShadingModel, ShadingUniforms};

use super::load_material;

/// Neutral base color when previewing a bare tag.
const TAG_PREVIEW_COLOR: [f64; 3] = [0.75, 0.75, 0.78];

#[allow(clippy::too_many_arguments)]
pub fn run(
    material: Option<&str>,
    tag: Option<&str>,
    shape: &str,
    size: u32,
    out: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let (uniforms, label) = match (material, tag) {
        (Some(path), None) => (load_material(path)?.resolve(), stem_of(path)),
        (None, Some(tag)) => (
            ShadingUniforms::from_tag(tag, TAG_PREVIEW_COLOR, ShadingModel::Anime),
            tag.to_string(),
        ),
        (Some(_), Some(_)) => bail!("--material and --tag are mutually exclusive"),
        (None, None) => bail!("one of --material or --tag is required"),
    };

    let validation = validate_uniforms(&uniforms);
    if !validation.is_ok() {
        for error in &validation.errors {
            eprintln!("  {} {}: {}", error.code.code().red(), error.field, error.message);
        }
        bail!("material failed validation with {} error(s)", validation.errors.len());
    }

    let shape: PreviewShape = shape
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let framebuffer = render_preview(&uniforms, shape, size)?;
    let bytes = encode_rgba(&framebuffer, &PngConfig::default())?;
    let hash = content_hash(&bytes);

    let out_path = out
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}.preview.png", label)));
    std::fs::write(&out_path, &bytes)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "out": out_path,
                "size": size,
                "shape": format!("{:?}", shape).to_lowercase(),
                "hash": hash,
            }))?
        );
    } else {
        println!(
            "{} {} ({}x{}, {})",
            "wrote".green().bold(),
            out_path.display(),
            size,
            size,
            hash[..12].dimmed(),
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn stem_of(path: &str) -> String {
    PathBuf::from(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "material".to_string())
}
