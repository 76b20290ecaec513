//! Halftone dot-screen pattern.

use glam::DVec2;

use super::ShadowPattern;
use crate::math::step;

/// Classic dot-screen: the screen is tiled into cells of period `1/scale`
/// and a dot is on where the distance from the cell center is below
/// `intensity * 0.5`, so dot radius grows with shadow depth.
#[derive(Debug, Clone, Copy)]
pub struct HalftonePattern {
    pub scale: f64,
}

impl HalftonePattern {
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }
}

impl ShadowPattern for HalftonePattern {
    fn coverage(&self, screen: DVec2, intensity: f64) -> f64 {
        let pattern = screen * self.scale;
        let grid = pattern.fract_gl() - DVec2::splat(0.5);
        let dist = grid.length();
        step(dist, intensity * 0.5)
    }
}
