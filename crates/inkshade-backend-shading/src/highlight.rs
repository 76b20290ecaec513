//! Toon specular highlight and rim lighting.
//!
//! Both terms are additive, tinted by their own colors rather than
//! multiplied into the base color, so highlights read as painted on.

use glam::DVec3;

use inkshade_spec::ShadingModel;

use crate::math::{smoothstep, step};

/// Rim falloff exponent, fixed across all presets.
pub const RIM_POWER: f64 = 3.0;

/// Toon-thresholded Blinn-Phong specular factor in [0, 1].
///
/// The raw half-vector lobe is collapsed to a near-binary highlight: the
/// Classic generation hard-steps at 0.5, the refined generations use a
/// narrow smoothstep window so the highlight edge stays stable under motion.
/// Multiply by `specular_intensity` for the final contribution.
pub fn toon_specular(
    normal: DVec3,
    light_dir: DVec3,
    view_dir: DVec3,
    shininess: f64,
    model: ShadingModel,
) -> f64 {
    let halfway = (light_dir + view_dir).normalize_or_zero();
    let raw = normal.dot(halfway).max(0.0).powf(shininess);
    match model {
        ShadingModel::Classic => step(0.5, raw),
        ShadingModel::Enhanced | ShadingModel::Anime => smoothstep(0.5, 0.6, raw),
    }
}

/// Rim (Fresnel-like backlight) factor in [0, 1].
///
/// Grows as the surface turns away from the camera. Multiply by
/// `rim_intensity` for the final contribution.
pub fn rim_factor(normal: DVec3, view_dir: DVec3) -> f64 {
    let rim_dot = 1.0 - view_dir.dot(normal).max(0.0);
    smoothstep(0.0, 1.0, rim_dot.powf(RIM_POWER))
}
