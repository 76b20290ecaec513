//! `inkshade shade` - evaluate the fragment pipeline at a single point.
//!
//! A debugging surface: feed one fragment's inputs through the exact
//! pipeline the preview renderer uses and print the resulting color.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use glam::{DVec2, DVec3};
use serde_json::json;

use inkshade_backend_shading::{highlight, lighting, shade, FragmentContext};

use super::{load_material, parse_pair, parse_triple};

pub fn run(
    material: &str,
    normal: &str,
    position: &str,
    frag_coord: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let spec = load_material(material)?;
    let uniforms = spec.resolve_validated()?;

    let normal = DVec3::from_array(parse_triple(normal, "--normal")?).normalize_or_zero();
    anyhow::ensure!(normal != DVec3::ZERO, "--normal must be a non-zero vector");
    let position = DVec3::from_array(parse_triple(position, "--position")?);
    let frag_coord = match frag_coord {
        Some(raw) => {
            let [x, y] = parse_pair(raw, "--frag-coord")?;
            DVec2::new(x, y)
        }
        None => DVec2::new(500.0, 500.0),
    };

    let ctx = FragmentContext {
        normal,
        view_space_position: position,
        world_position: position,
        screen_position: DVec3::ZERO,
        frag_coord,
        uv: DVec2::splat(0.5),
        normal_fwidth: DVec3::ZERO,
        screen_fwidth: DVec3::ZERO,
    };

    let light_dir = ctx.light_direction(DVec3::from_array(uniforms.light_position));
    let diffuse = lighting::diffuse(ctx.normal, light_dir);
    let rim = highlight::rim_factor(ctx.normal, ctx.view_direction());
    let color = shade::shade(&ctx, &uniforms);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "tag": spec.tag,
                "diffuse": diffuse,
                "rim_factor": rim,
                "color": [color.r, color.g, color.b, color.a],
                "rgba8": color.to_rgba8(),
            }))?
        );
    } else {
        let [r, g, b, a] = color.to_rgba8();
        println!("{}  tag {}", "shade".bold(), spec.tag.cyan());
        println!("  diffuse    {:.4}", diffuse);
        println!("  rim factor {:.4}", rim);
        println!(
            "  color      ({:.4}, {:.4}, {:.4}, {:.1})  #{:02x}{:02x}{:02x}{:02x}",
            color.r, color.g, color.b, color.a, r, g, b, a
        );
    }
    Ok(ExitCode::SUCCESS)
}
