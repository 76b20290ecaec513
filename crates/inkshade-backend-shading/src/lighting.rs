//! Diffuse lighting and the cel quantizers.

use glam::DVec3;

use crate::math::smoothstep;

/// No band ever drops below this, so shadowed fragments keep some color
/// before the pattern and edge stages run.
pub const AMBIENT_FLOOR: f64 = 0.2;

/// Band thresholds and values for the fixed four-band quantizers, brightest
/// first: diffuse above the threshold maps to the paired band value.
const BANDS: [(f64, f64); 3] = [(0.8, 1.0), (0.6, 0.8), (0.3, 0.5)];

/// Raw diffuse term, clamped at zero.
#[inline]
pub fn diffuse(normal: DVec3, light_dir: DVec3) -> f64 {
    normal.dot(light_dir).max(0.0)
}

/// Hard four-band quantizer (Enhanced model).
///
/// Thresholds 0.8/0.6/0.3 map to bands {1.0, 0.8, 0.5}; everything below
/// lands on the 0.2 ambient floor.
pub fn cel_shade_banded(d: f64) -> f64 {
    for (threshold, band) in BANDS {
        if d > threshold {
            return band;
        }
    }
    AMBIENT_FLOOR
}

/// Four-band quantizer with smoothstepped band interiors (Anime model).
///
/// Instead of hard-stepping at each threshold, the value ramps from the band
/// below to the band above across the threshold sub-range, which removes the
/// visible banding seam while keeping the same endpoints: `d = 1` is still
/// the top band, `d <= 0` still the ambient floor.
pub fn cel_shade_smooth(d: f64) -> f64 {
    if d > 0.8 {
        return 1.0;
    }
    if d > 0.6 {
        return crate::math::lerp(0.8, 1.0, smoothstep(0.6, 0.8, d));
    }
    if d > 0.3 {
        return crate::math::lerp(0.5, 0.8, smoothstep(0.3, 0.6, d));
    }
    crate::math::lerp(AMBIENT_FLOOR, 0.5, smoothstep(0.0, 0.3, d))
}

/// Classic ceil quantizer driven by a band count.
pub fn cel_shade_stepped(d: f64, steps: u32) -> f64 {
    let steps = steps.max(1) as f64;
    let quantized = (d * steps).ceil() / steps;
    quantized.clamp(AMBIENT_FLOOR, 1.0)
}
