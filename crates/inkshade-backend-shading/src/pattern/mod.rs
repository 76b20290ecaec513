//! Screen-space shadow patterns.
//!
//! Patterns are deterministic functions of the screen coordinate (fragment
//! pixel coordinate divided by the pattern reference scale). They are
//! intentionally resolution-dependent: density stays constant on screen
//! regardless of object distance, at the cost of patterns swimming under
//! camera motion.

mod halftone;
mod hatching;

pub use halftone::HalftonePattern;
pub use hatching::HatchingPattern;

use glam::DVec2;

/// Trait for shadow-band fill patterns.
pub trait ShadowPattern {
    /// Coverage at a screen coordinate: 1.0 where the pattern mark is on,
    /// 0.0 elsewhere. `intensity` drives mark size/duty and is typically
    /// `(1 - cel_shade) * pattern_intensity`, so marks grow with shadow
    /// depth.
    fn coverage(&self, screen: DVec2, intensity: f64) -> f64;
}

/// Fraction of on-pixels over a coarse screen grid, for density checks.
#[cfg(test)]
pub(crate) fn sample_density<P: ShadowPattern>(pattern: &P, intensity: f64) -> f64 {
    let mut on = 0usize;
    let total = 200 * 200;
    for y in 0..200 {
        for x in 0..200 {
            let screen = DVec2::new(x as f64 / 200.0, y as f64 / 200.0);
            if pattern.coverage(screen, intensity) > 0.5 {
                on += 1;
            }
        }
    }
    on as f64 / total as f64
}
