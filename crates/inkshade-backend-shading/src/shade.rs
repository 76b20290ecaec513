//! The fragment compositor: one pure function from fragment context and
//! uniforms to an opaque color.
//!
//! The blend order is load-bearing: base color, cel and light scaling,
//! additive specular and rim, pattern darkening in shadow bands, soft-shadow
//! darkening, corner darkening, and finally the edge override. Patterns and
//! shadow scaling run before the edge check because edge fragments take
//! absolute priority and bypass everything else.

use glam::DVec3;

use inkshade_spec::{OutlineStrategy, ShadingModel, ShadingUniforms};

use crate::color::Color;
use crate::edge;
use crate::fragment::FragmentContext;
use crate::highlight;
use crate::lighting;
use crate::math::{lerp, smoothstep, step};
use crate::pattern::{HalftonePattern, HatchingPattern, ShadowPattern};

/// Soft-shadow attenuation factor: an inexpensive stand-in for shadow
/// mapping. 1.0 where fully lit; widening `intensity` softens the falloff.
pub fn soft_shadow(normal: DVec3, light_dir: DVec3, intensity: f64) -> f64 {
    if intensity <= 0.0 {
        return 1.0;
    }
    smoothstep(0.0, intensity, normal.dot(light_dir))
}

/// Anime base-color transition: blends the base color toward a half-darkened
/// version of itself as the cel term falls, smoothed by `smoothness`, which
/// softens the shadow edge instead of the hard cel cut.
pub fn color_transition(base: Color, cel: f64, smoothness: f64) -> Color {
    let t = if smoothness <= 0.0 {
        1.0
    } else {
        smoothstep(0.0, smoothness, cel)
    };
    base.scale(0.5 + 0.5 * t)
}

/// Scene-space corner darkening: fakes ambient occlusion near the room
/// boundary. `half_extents` are the room half-sizes along x and z.
pub fn corner_darkness(world_position: DVec3, half_extents: [f64; 2]) -> f64 {
    let dist_x = world_position.x.abs() / half_extents[0];
    let dist_z = world_position.z.abs() / half_extents[1];
    smoothstep(0.0, 1.0, dist_x.max(dist_z)) * 0.5
}

fn quantize(d: f64, uniforms: &ShadingUniforms) -> f64 {
    match uniforms.model {
        ShadingModel::Classic => lighting::cel_shade_stepped(d, uniforms.steps),
        ShadingModel::Enhanced => lighting::cel_shade_banded(d),
        ShadingModel::Anime => lighting::cel_shade_smooth(d),
    }
}

/// Shade one fragment. Pure: no hidden light or camera state, everything
/// comes in through the two arguments. Output alpha is always 1.
pub fn shade(ctx: &FragmentContext, uniforms: &ShadingUniforms) -> Color {
    let preset = &uniforms.preset;
    let view_dir = ctx.view_direction();
    let light_dir = ctx.light_direction(DVec3::from_array(uniforms.light_position));

    let d = lighting::diffuse(ctx.normal, light_dir);
    let cel = quantize(d, uniforms);

    let specular = highlight::toon_specular(
        ctx.normal,
        light_dir,
        view_dir,
        preset.specular_shininess,
        uniforms.model,
    ) * preset.specular_intensity;
    let rim = highlight::rim_factor(ctx.normal, view_dir) * preset.rim_intensity;

    let base = match uniforms.model {
        ShadingModel::Anime => color_transition(
            Color::from_array(uniforms.color),
            cel,
            preset.color_transition_smoothness,
        ),
        _ => Color::from_array(uniforms.color),
    };

    let mut final_color = base.scale(cel * uniforms.light_intensity);
    final_color = final_color.add(&Color::from_array(uniforms.specular_color).scale(specular));
    final_color = final_color.add(&Color::from_array(preset.rim_color).scale(rim));

    // Pattern darkening, shadow bands only; lit bands stay pattern-free.
    let in_shadow = step(cel, 0.5);
    if in_shadow > 0.0 && uniforms.model != ShadingModel::Classic {
        let screen = ctx.frag_coord / uniforms.pattern_reference_scale;
        let halftone = HalftonePattern::new(uniforms.halftone_scale)
            .coverage(screen, (1.0 - cel) * preset.halftone_intensity);
        let mark = match uniforms.model {
            ShadingModel::Anime => {
                let hatching = HatchingPattern::new(
                    preset.hatching_scale,
                    preset.hatching_rotation,
                    uniforms.hatching_style,
                )
                .coverage(screen, (1.0 - cel) * preset.hatching_intensity);
                // The halftone field carries the upper shadow band, the
                // hatch field the deep band.
                lerp(halftone, hatching, step(cel, lighting::AMBIENT_FLOOR))
            }
            _ => halftone,
        };
        let darkened = final_color.scale(0.7);
        final_color = final_color.lerp(&darkened, in_shadow * mark);
    }

    if uniforms.model == ShadingModel::Anime {
        let shadow = soft_shadow(ctx.normal, light_dir, preset.soft_shadow_intensity);
        let darkened = final_color.scale(0.5);
        final_color = final_color.lerp(&darkened, (1.0 - shadow) * preset.soft_shadow_intensity);

        let corner = corner_darkness(ctx.world_position, uniforms.room_half_extents);
        let darkened = final_color.scale(0.7);
        final_color = final_color.lerp(&darkened, corner);
    }

    // Edge override last and absolute: edge fragments render as outline,
    // never as shaded surface.
    if let OutlineStrategy::DerivativeEdge { threshold } = uniforms.outline {
        let strength = edge::edge_strength(ctx.normal_fwidth, ctx.screen_fwidth);
        let mask = edge::edge_mask(strength, threshold);
        if mask > 0.0 {
            let edge_color = Color::from_array(uniforms.outline_color)
                .lerp(&Color::from_array(preset.rim_color), rim * 0.5);
            final_color = final_color.lerp(&edge_color, mask);
        }
    }

    let mut out = final_color.clamp();
    out.a = 1.0;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, DVec3};
    use inkshade_spec::{EdgeThreshold, HatchingStyle};

    fn facing_fragment() -> FragmentContext {
        // Surface at the origin of view space offset down -z, normal toward
        // the camera.
        FragmentContext {
            normal: DVec3::Z,
            view_space_position: DVec3::new(0.0, 0.0, -5.0),
            world_position: DVec3::ZERO,
            screen_position: DVec3::ZERO,
            frag_coord: DVec2::new(512.0, 384.0),
            uv: DVec2::splat(0.5),
            normal_fwidth: DVec3::ZERO,
            screen_fwidth: DVec3::ZERO,
        }
    }

    fn uniforms(tag: &str, model: ShadingModel) -> ShadingUniforms {
        let mut u = ShadingUniforms::from_tag(tag, [0.65, 0.85, 1.0], model);
        // Light straight down +z so it faces the fragment normal.
        u.light_position = [0.0, 0.0, 10.0];
        u
    }

    #[test]
    fn test_glass_facing_light_scenario() {
        // Facing the light directly: top band, strong glass specular.
        let ctx = facing_fragment();
        let u = uniforms("glass", ShadingModel::Enhanced);

        let light_dir = ctx.light_direction(DVec3::from_array(u.light_position));
        let d = lighting::diffuse(ctx.normal, light_dir);
        assert!((d - 1.0).abs() < 1e-12);
        assert_eq!(quantize(d, &u), 1.0);

        let out = shade(&ctx, &u);
        // Base color times full cel plus a full-intensity specular pushes
        // every channel to the clamp.
        assert!(out.r > 0.65);
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn test_backfacing_fragment_keeps_ambient_floor() {
        let mut ctx = facing_fragment();
        ctx.normal = -DVec3::Z; // facing away from the light
        let mut u = uniforms("wood", ShadingModel::Enhanced);
        u.preset.rim_intensity = 0.0;
        u.preset.specular_intensity = 0.0;
        u.preset.halftone_intensity = 0.0;

        let out = shade(&ctx, &u);
        // color * 0.2 * light_intensity, never black.
        assert!(out.r > 0.0);
        assert!((out.r - u.color[0] * lighting::AMBIENT_FLOOR).abs() < 1e-9);
    }

    #[test]
    fn test_light_coincident_with_fragment_falls_to_floor_band() {
        let mut ctx = facing_fragment();
        let mut u = uniforms("default", ShadingModel::Enhanced);
        u.light_position = [0.0, 0.0, -5.0];
        ctx.view_space_position = DVec3::new(0.0, 0.0, -5.0);
        let light_dir = ctx.light_direction(DVec3::from_array(u.light_position));
        assert_eq!(light_dir, DVec3::ZERO);
        let d = lighting::diffuse(ctx.normal, light_dir);
        assert_eq!(quantize(d, &u), lighting::AMBIENT_FLOOR);
        // And the full shade still produces a finite, opaque color.
        let out = shade(&ctx, &u);
        assert!(out.r.is_finite());
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn test_edge_override_takes_priority() {
        let mut ctx = facing_fragment();
        ctx.normal_fwidth = DVec3::new(2.0, 0.0, 0.0); // far above the cutoff
        let mut u = uniforms("metal", ShadingModel::Enhanced);
        u.outline = OutlineStrategy::DerivativeEdge { threshold: EdgeThreshold::hard() };
        u.outline_color = [0.0, 0.0, 0.0];
        u.preset.rim_intensity = 0.0; // rim mix-in off: pure outline color

        let out = shade(&ctx, &u);
        assert_eq!((out.r, out.g, out.b), (0.0, 0.0, 0.0));
        assert_eq!(out.a, 1.0);
    }

    #[test]
    fn test_extrusion_material_ignores_derivatives() {
        let mut ctx = facing_fragment();
        ctx.normal_fwidth = DVec3::new(2.0, 0.0, 0.0);
        let mut u = uniforms("wood", ShadingModel::Classic);
        assert!(matches!(u.outline, OutlineStrategy::Extrusion { .. }));
        u.preset.specular_intensity = 0.0;
        u.preset.rim_intensity = 0.0;

        let out = shade(&ctx, &u);
        // Fully lit wood, not outline black.
        assert!(out.r > 0.5);
    }

    #[test]
    fn test_patterns_only_darken_shadow_bands() {
        // Lit fragment: pattern stage must not touch the color even with
        // maxed pattern intensities.
        let ctx = facing_fragment();
        let mut u = uniforms("fabric", ShadingModel::Anime);
        u.preset.halftone_intensity = 1.0;
        u.preset.hatching_intensity = 1.0;
        u.preset.rim_intensity = 0.0;
        u.preset.specular_intensity = 0.0;
        let lit = shade(&ctx, &u);

        let mut plain = u.clone();
        plain.preset.halftone_intensity = 0.0;
        plain.preset.hatching_intensity = 0.0;
        let reference = shade(&ctx, &plain);
        assert_eq!(lit, reference);
    }

    #[test]
    fn test_shadow_band_halftone_darkens_somewhere() {
        // Grazing light: deep shadow band; with a dense dot screen some
        // pixel in a small neighborhood must darken relative to pattern-off.
        let mut u = uniforms("fabric", ShadingModel::Enhanced);
        u.light_position = [0.0, 0.0, -100.0]; // behind the surface
        u.preset.rim_intensity = 0.0;
        u.preset.specular_intensity = 0.0;
        u.preset.halftone_intensity = 1.0;

        let mut no_pattern = u.clone();
        no_pattern.preset.halftone_intensity = 0.0;

        let mut darkened_any = false;
        for i in 0..64 {
            let mut ctx = facing_fragment();
            ctx.frag_coord = DVec2::new(i as f64 * 7.0, i as f64 * 3.0);
            let with = shade(&ctx, &u);
            let without = shade(&ctx, &no_pattern);
            if with.luminance() < without.luminance() - 1e-9 {
                darkened_any = true;
                break;
            }
        }
        assert!(darkened_any);
    }

    #[test]
    fn test_corner_darkening_dims_room_boundary() {
        let mut center = facing_fragment();
        center.world_position = DVec3::ZERO;
        let mut corner = facing_fragment();
        corner.world_position = DVec3::new(15.0, 0.0, 10.0);

        let mut u = uniforms("wall", ShadingModel::Anime);
        u.preset.rim_intensity = 0.0;
        u.preset.specular_intensity = 0.0;
        u.preset.halftone_intensity = 0.0;
        u.preset.hatching_intensity = 0.0;

        let at_center = shade(&center, &u);
        let at_corner = shade(&corner, &u);
        assert!(at_corner.luminance() < at_center.luminance());
    }

    #[test]
    fn test_corner_darkness_uses_configured_extents() {
        let p = DVec3::new(7.5, 0.0, 0.0);
        // Halfway out in a 15-unit room, all the way out in a 7.5-unit room.
        let wide = corner_darkness(p, [15.0, 10.0]);
        let narrow = corner_darkness(p, [7.5, 10.0]);
        assert!(narrow > wide);
        assert!((narrow - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_shade_is_deterministic() {
        let ctx = facing_fragment();
        let mut u = uniforms("anime", ShadingModel::Anime);
        u.hatching_style = HatchingStyle::Cross;
        assert_eq!(shade(&ctx, &u), shade(&ctx, &u));
    }

    #[test]
    fn test_soft_shadow_zero_intensity_disables_term() {
        assert_eq!(soft_shadow(DVec3::Z, DVec3::Z, 0.0), 1.0);
        assert_eq!(soft_shadow(DVec3::Z, -DVec3::Z, 0.0), 1.0);
    }

    #[test]
    fn test_color_transition_endpoints() {
        let base = Color::rgb(0.8, 0.6, 0.4);
        let lit = color_transition(base, 1.0, 0.2);
        assert_eq!(lit, base);
        let dark = color_transition(base, 0.0, 0.2);
        assert!((dark.r - 0.4).abs() < 1e-12);
    }
}
