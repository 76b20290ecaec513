//! Derivative-based silhouette and crease edge extraction.

use glam::DVec3;

use inkshade_spec::EdgeThreshold;

use crate::math::{smoothstep, step};

/// Depth derivatives are amplified relative to normal derivatives; a small
/// depth discontinuity marks an edge as strongly as a large normal change.
const DEPTH_EDGE_GAIN: f64 = 10.0;

/// Combined edge strength from the screen-space derivatives of the
/// interpolated normal and of the NDC position.
pub fn edge_strength(normal_fwidth: DVec3, screen_fwidth: DVec3) -> f64 {
    normal_fwidth
        .length()
        .max(screen_fwidth.length() * DEPTH_EDGE_GAIN)
}

/// Edge mask in [0, 1]. `Hard` is a strict boundary; `Smooth` ramps across
/// the threshold window.
pub fn edge_mask(strength: f64, threshold: EdgeThreshold) -> f64 {
    match threshold {
        EdgeThreshold::Hard { cutoff } => step(cutoff, strength),
        EdgeThreshold::Smooth { lower, upper } => smoothstep(lower, upper, strength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_surface_has_no_edge() {
        let strength = edge_strength(DVec3::ZERO, DVec3::ZERO);
        assert_eq!(strength, 0.0);
        assert_eq!(edge_mask(strength, EdgeThreshold::hard()), 0.0);
        assert_eq!(edge_mask(strength, EdgeThreshold::smooth()), 0.0);
    }

    #[test]
    fn test_hard_threshold_is_a_strict_boundary() {
        let threshold = EdgeThreshold::hard();
        assert_eq!(edge_mask(0.799, threshold), 0.0);
        assert_eq!(edge_mask(0.8, threshold), 1.0);
        assert_eq!(edge_mask(5.0, threshold), 1.0);
    }

    #[test]
    fn test_scaling_below_window_never_triggers() {
        // Uniform scaling of derivatives below the window never classifies
        // an edge; crossing the window always does.
        let threshold = EdgeThreshold::hard();
        let base = DVec3::new(0.1, 0.0, 0.0);
        for factor in [0.5, 1.0, 2.0, 4.0, 7.9] {
            let strength = edge_strength(base * factor, DVec3::ZERO);
            assert_eq!(edge_mask(strength, threshold), 0.0, "factor {}", factor);
        }
        for factor in [8.0, 10.0, 100.0] {
            let strength = edge_strength(base * factor, DVec3::ZERO);
            assert_eq!(edge_mask(strength, threshold), 1.0, "factor {}", factor);
        }
    }

    #[test]
    fn test_depth_gain_dominates() {
        // A 0.09-unit depth derivative alone crosses the 0.8 cutoff.
        let strength = edge_strength(DVec3::ZERO, DVec3::new(0.09, 0.0, 0.0));
        assert!(strength >= 0.8);
        assert_eq!(edge_mask(strength, EdgeThreshold::hard()), 1.0);
    }

    #[test]
    fn test_smooth_window_ramps() {
        let threshold = EdgeThreshold::smooth();
        assert_eq!(edge_mask(0.8, threshold), 0.0);
        assert_eq!(edge_mask(0.9, threshold), 1.0);
        let mid = edge_mask(0.85, threshold);
        assert!(mid > 0.0 && mid < 1.0);
    }
}
