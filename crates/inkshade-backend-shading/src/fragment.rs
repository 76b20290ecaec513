//! Per-fragment inputs produced by the vertex/rasterization stage.

use glam::{DVec2, DVec3};

/// Everything the fragment pipeline needs for one fragment.
///
/// All vectors are view space unless noted. `normal` must be unit length;
/// degenerate normals are a host contract violation caught at mesh
/// construction, not here.
#[derive(Debug, Clone, Copy)]
pub struct FragmentContext {
    /// Interpolated unit surface normal, view space.
    pub normal: DVec3,
    /// Fragment position, view space.
    pub view_space_position: DVec3,
    /// Fragment position, world space (corner darkening input).
    pub world_position: DVec3,
    /// NDC position (clip xyz / w).
    pub screen_position: DVec3,
    /// Pixel coordinate of the fragment (screen-space pattern input).
    pub frag_coord: DVec2,
    /// Interpolated texture coordinate.
    pub uv: DVec2,
    /// Screen-space derivative magnitudes of the normal (`fwidth`).
    pub normal_fwidth: DVec3,
    /// Screen-space derivative magnitudes of the NDC position (`fwidth`).
    pub screen_fwidth: DVec3,
}

impl FragmentContext {
    /// Unit vector from the fragment toward the camera.
    ///
    /// Zero for a fragment exactly at the eye; downstream dot products then
    /// degrade to the ambient fallbacks rather than NaN.
    pub fn view_direction(&self) -> DVec3 {
        (-self.view_space_position).normalize_or_zero()
    }

    /// Unit vector from the fragment toward the light.
    ///
    /// A light exactly coincident with the fragment yields the zero vector,
    /// which drives diffuse to the ambient floor band.
    pub fn light_direction(&self, light_position: DVec3) -> DVec3 {
        (light_position - self.view_space_position).normalize_or_zero()
    }
}
