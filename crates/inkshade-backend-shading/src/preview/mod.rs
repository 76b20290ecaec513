//! Deterministic software preview renderer.
//!
//! Plays the host role for the shading pipeline: builds a procedural mesh,
//! supplies camera matrices, resolves the outline strategy, and rasterizes
//! every fragment through [`crate::shade::shade`]. Identical inputs produce
//! byte-identical framebuffers.

mod mesh;
mod raster;

pub use mesh::{Mesh, MeshError};
pub use raster::render_mesh;

use glam::{DMat4, DVec3};
use thiserror::Error;

use inkshade_spec::ShadingUniforms;

use crate::color::Color;
use crate::vertex::Matrices;

/// Errors from preview rendering.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("E210: preview size must be at least 1 pixel, got {0}")]
    InvalidSize(u32),
}

/// Built-in preview geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewShape {
    Sphere,
    Cube,
    Plane,
}

impl PreviewShape {
    pub fn build(self) -> Mesh {
        match self {
            PreviewShape::Sphere => Mesh::uv_sphere(1.0, 32, 48),
            PreviewShape::Cube => Mesh::cube(0.9),
            PreviewShape::Plane => Mesh::plane(1.2),
        }
    }
}

impl std::str::FromStr for PreviewShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sphere" => Ok(PreviewShape::Sphere),
            "cube" => Ok(PreviewShape::Cube),
            "plane" => Ok(PreviewShape::Plane),
            other => Err(format!("unknown preview shape: {}", other)),
        }
    }
}

/// RGBA color target with a depth buffer.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    color: Vec<Color>,
    depth: Vec<f64>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, clear: Color) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            color: vec![clear; size],
            depth: vec![f64::INFINITY; size],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        self.color[self.index(x, y)]
    }

    pub fn pixels(&self) -> &[Color] {
        &self.color
    }

    pub fn depth(&self, x: u32, y: u32) -> f64 {
        self.depth[self.index(x, y)]
    }

    /// True when `depth` is strictly nearer than the stored value.
    pub fn depth_test(&self, x: u32, y: u32, depth: f64) -> bool {
        depth < self.depth[self.index(x, y)]
    }

    pub fn write(&mut self, x: u32, y: u32, depth: f64, color: Color) {
        let index = self.index(x, y);
        self.color[index] = color;
        self.depth[index] = depth;
    }

    /// Flatten to row-major 8-bit RGBA.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.color.len() * 4);
        for color in &self.color {
            data.extend_from_slice(&color.to_rgba8());
        }
        data
    }
}

/// Background behind the preview geometry.
const CLEAR_COLOR: Color = Color::rgb(0.08, 0.09, 0.11);

fn preview_matrices(aspect: f64) -> Matrices {
    let view = DMat4::look_at_rh(DVec3::new(1.8, 1.4, 2.2), DVec3::ZERO, DVec3::Y);
    let projection = DMat4::perspective_rh(40f64.to_radians(), aspect, 0.1, 100.0);
    Matrices::new(DMat4::IDENTITY, view, projection)
}

/// Render a single-shape preview of a material into a fresh framebuffer.
pub fn render_preview(
    uniforms: &ShadingUniforms,
    shape: PreviewShape,
    size: u32,
) -> Result<Framebuffer, PreviewError> {
    if size == 0 {
        return Err(PreviewError::InvalidSize(size));
    }
    let mut framebuffer = Framebuffer::new(size, size, CLEAR_COLOR);
    let mesh = shape.build();
    let matrices = preview_matrices(1.0);
    render_mesh(&mut framebuffer, &mesh, &matrices, uniforms);
    Ok(framebuffer)
}
