//! Pen-and-ink hatching line pattern.

use glam::DVec2;

use inkshade_spec::HatchingStyle;

use super::ShadowPattern;
use crate::math::step;

/// Fixed base rotation of the line field (45° clockwise).
const BASE_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Diagonal line field thresholded at the half duty cycle.
///
/// `Parallel` draws a single rotated line direction; `Cross` overlays the
/// two diagonals for a denser crosshatch weave. Line period follows
/// `scale * 2` so hatching runs finer than the halftone grid at equal scale.
#[derive(Debug, Clone, Copy)]
pub struct HatchingPattern {
    pub scale: f64,
    /// Extra rotation on top of the fixed 45°, radians.
    pub rotation: f64,
    pub style: HatchingStyle,
}

impl HatchingPattern {
    pub fn new(scale: f64, rotation: f64, style: HatchingStyle) -> Self {
        Self {
            scale,
            rotation,
            style,
        }
    }

    fn rotate(v: DVec2, angle: f64) -> DVec2 {
        let (sin, cos) = angle.sin_cos();
        DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
    }
}

impl ShadowPattern for HatchingPattern {
    fn coverage(&self, screen: DVec2, intensity: f64) -> f64 {
        let pattern = screen * (self.scale * 2.0);
        let rotated = Self::rotate(pattern, BASE_ANGLE + self.rotation);

        let field = match self.style {
            HatchingStyle::Parallel => {
                let lines = rotated.x.rem_euclid(1.0);
                step(0.5, lines) * 0.7
            }
            HatchingStyle::Cross => {
                let lines1 = (rotated.x + rotated.y).rem_euclid(1.0);
                let lines2 = (rotated.x - rotated.y).rem_euclid(1.0);
                (step(0.5, lines1) + step(0.5, lines2)) * 0.35
            }
        };

        step(field, intensity * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::sample_density;

    #[test]
    fn test_parallel_duty_cycle_is_half() {
        let pattern = HatchingPattern::new(20.0, 0.0, HatchingStyle::Parallel);
        let density = sample_density(&pattern, 0.6);
        assert!((density - 0.5).abs() < 0.05, "density {}", density);
    }

    #[test]
    fn test_cross_is_sparser_than_parallel_at_moderate_intensity() {
        // With both diagonal fields high the crosshatch value reaches 0.7,
        // so at moderate intensity only the gaps between both line sets
        // stay marked (~25% of the screen).
        let parallel = HatchingPattern::new(20.0, 0.0, HatchingStyle::Parallel);
        let cross = HatchingPattern::new(20.0, 0.0, HatchingStyle::Cross);
        let dp = sample_density(&parallel, 0.6);
        let dc = sample_density(&cross, 0.6);
        assert!(dc < dp, "cross {} vs parallel {}", dc, dp);
    }

    #[test]
    fn test_high_intensity_saturates_coverage() {
        let pattern = HatchingPattern::new(20.0, 0.0, HatchingStyle::Parallel);
        // intensity * 0.5 above the 0.7 field value marks everything.
        assert!((sample_density(&pattern, 1.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_shifts_the_field() {
        let a = HatchingPattern::new(20.0, 0.0, HatchingStyle::Parallel);
        let b = HatchingPattern::new(20.0, 0.3, HatchingStyle::Parallel);
        let probe = DVec2::new(0.123, 0.371);
        // Same point, different rotations, must not always agree.
        let mut differs = false;
        for i in 0..32 {
            let p = probe * (i as f64 + 1.0);
            if a.coverage(p, 0.6) != b.coverage(p, 0.6) {
                differs = true;
                break;
            }
        }
        assert!(differs);
    }

    #[test]
    fn test_coverage_is_deterministic() {
        let pattern = HatchingPattern::new(50.0, 0.0, HatchingStyle::Cross);
        let p = DVec2::new(0.77, 0.31);
        assert_eq!(pattern.coverage(p, 0.4), pattern.coverage(p, 0.4));
    }
}
