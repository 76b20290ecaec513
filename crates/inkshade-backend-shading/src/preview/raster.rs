//! Software triangle rasterizer driving the fragment pipeline.
//!
//! One triangle at a time: vertex stage, backface cull, barycentric
//! coverage with a depth test, perspective-correct varying interpolation,
//! and per-triangle screen-space derivatives standing in for `fwidth`.

use glam::{DVec2, DVec3};

use inkshade_spec::{OutlineStrategy, ShadingUniforms};

use crate::color::Color;
use crate::fragment::FragmentContext;
use crate::shade;
use crate::vertex::{process_vertex, Matrices, Varyings};

use super::mesh::Mesh;
use super::Framebuffer;

/// Clip-space w below this is treated as behind the camera; such triangles
/// are dropped rather than clipped, which the preview scenes never hit.
const MIN_CLIP_W: f64 = 1e-6;

/// Render a mesh into the framebuffer with the material's outline strategy.
///
/// Extrusion materials draw the expanded shell first (reverse-wound, flat
/// outline color); the main surface then overwrites everything but the
/// silhouette ring.
pub fn render_mesh(
    framebuffer: &mut Framebuffer,
    mesh: &Mesh,
    matrices: &Matrices,
    uniforms: &ShadingUniforms,
) {
    if let OutlineStrategy::Extrusion { width } = uniforms.outline {
        let outline = Color::from_array(uniforms.outline_color);
        draw_pass(framebuffer, mesh, matrices, uniforms, Some(width), true, Some(outline));
    }
    draw_pass(framebuffer, mesh, matrices, uniforms, None, false, None);
}

fn draw_pass(
    framebuffer: &mut Framebuffer,
    mesh: &Mesh,
    matrices: &Matrices,
    uniforms: &ShadingUniforms,
    expand: Option<f64>,
    flip_cull: bool,
    flat_color: Option<Color>,
) {
    for triangle in mesh.triangles() {
        let varyings = [
            process_vertex(&triangle[0], matrices, expand),
            process_vertex(&triangle[1], matrices, expand),
            process_vertex(&triangle[2], matrices, expand),
        ];
        if varyings.iter().any(|v| v.clip_position.w <= MIN_CLIP_W) {
            continue;
        }
        raster_triangle(framebuffer, &varyings, uniforms, flip_cull, flat_color);
    }
}

fn screen_coord(ndc: DVec3, width: u32, height: u32) -> DVec2 {
    DVec2::new(
        (ndc.x * 0.5 + 0.5) * width as f64,
        (1.0 - (ndc.y * 0.5 + 0.5)) * height as f64,
    )
}

/// Per-triangle screen-space `fwidth` of a vector attribute: |d/dx| + |d/dy|
/// from the affine interpolation plane through the three screen points.
fn attribute_fwidth(screen: &[DVec2; 3], values: &[DVec3; 3], inv_area: f64) -> DVec3 {
    let d1 = values[1] - values[0];
    let d2 = values[2] - values[0];
    let e1 = screen[1] - screen[0];
    let e2 = screen[2] - screen[0];
    let ddx = (d1 * e2.y - d2 * e1.y) * inv_area;
    let ddy = (d2 * e1.x - d1 * e2.x) * inv_area;
    ddx.abs() + ddy.abs()
}

fn raster_triangle(
    framebuffer: &mut Framebuffer,
    varyings: &[Varyings; 3],
    uniforms: &ShadingUniforms,
    flip_cull: bool,
    flat_color: Option<Color>,
) {
    let (width, height) = (framebuffer.width, framebuffer.height);
    let screen = [
        screen_coord(varyings[0].ndc, width, height),
        screen_coord(varyings[1].ndc, width, height),
        screen_coord(varyings[2].ndc, width, height),
    ];

    // Signed area in y-down screen space: front faces (counter-clockwise in
    // NDC) come out negative.
    let e1 = screen[1] - screen[0];
    let e2 = screen[2] - screen[0];
    let area = e1.x * e2.y - e1.y * e2.x;
    let front_facing = if flip_cull { area > 0.0 } else { area < 0.0 };
    if !front_facing || area.abs() < 1e-12 {
        return;
    }
    let inv_area = 1.0 / area;

    let min_x = screen.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
    let min_y = screen.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).floor().max(0.0) as u32;
    let max_x =
        (screen.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).ceil() as i64).min(width as i64 - 1);
    let max_y =
        (screen.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).ceil() as i64).min(height as i64 - 1);
    if max_x < min_x as i64 || max_y < min_y as i64 {
        return;
    }

    let normals = [varyings[0].normal, varyings[1].normal, varyings[2].normal];
    let ndcs = [varyings[0].ndc, varyings[1].ndc, varyings[2].ndc];
    let normal_fwidth = attribute_fwidth(&screen, &normals, inv_area);
    let screen_fwidth = attribute_fwidth(&screen, &ndcs, inv_area);

    let inv_w = [
        1.0 / varyings[0].clip_position.w,
        1.0 / varyings[1].clip_position.w,
        1.0 / varyings[2].clip_position.w,
    ];

    for y in min_y..=(max_y as u32) {
        for x in min_x..=(max_x as u32) {
            let pixel = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);

            // Barycentric weights, normalized by the full triangle area.
            let w0 = edge_weight(screen[1], screen[2], pixel) * inv_area;
            let w1 = edge_weight(screen[2], screen[0], pixel) * inv_area;
            let w2 = edge_weight(screen[0], screen[1], pixel) * inv_area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            // NDC depth interpolates linearly in screen space.
            let depth = w0 * ndcs[0].z + w1 * ndcs[1].z + w2 * ndcs[2].z;
            if !framebuffer.depth_test(x, y, depth) {
                continue;
            }

            let color = match flat_color {
                Some(flat) => flat,
                None => {
                    // Perspective-correct interpolation weights.
                    let pw0 = w0 * inv_w[0];
                    let pw1 = w1 * inv_w[1];
                    let pw2 = w2 * inv_w[2];
                    let inv_sum = 1.0 / (pw0 + pw1 + pw2);

                    let interp3 = |a: DVec3, b: DVec3, c: DVec3| {
                        (a * pw0 + b * pw1 + c * pw2) * inv_sum
                    };
                    let interp2 = |a: DVec2, b: DVec2, c: DVec2| {
                        (a * pw0 + b * pw1 + c * pw2) * inv_sum
                    };

                    let ctx = FragmentContext {
                        normal: interp3(normals[0], normals[1], normals[2]).normalize_or_zero(),
                        view_space_position: interp3(
                            varyings[0].view_space_position,
                            varyings[1].view_space_position,
                            varyings[2].view_space_position,
                        ),
                        world_position: interp3(
                            varyings[0].world_position,
                            varyings[1].world_position,
                            varyings[2].world_position,
                        ),
                        screen_position: DVec3::new(
                            w0 * ndcs[0].x + w1 * ndcs[1].x + w2 * ndcs[2].x,
                            w0 * ndcs[0].y + w1 * ndcs[1].y + w2 * ndcs[2].y,
                            depth,
                        ),
                        frag_coord: pixel,
                        uv: interp2(varyings[0].uv, varyings[1].uv, varyings[2].uv),
                        normal_fwidth,
                        screen_fwidth,
                    };
                    shade::shade(&ctx, uniforms)
                }
            };

            framebuffer.write(x, y, depth, color);
        }
    }
}

/// Signed edge function: positive when `p` is to the left of `a -> b` in
/// y-down screen space with the front-face orientation above.
fn edge_weight(a: DVec2, b: DVec2, p: DVec2) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
