//! Procedural preview meshes and the attribute contract.
//!
//! The shading pipeline assumes valid per-vertex attributes; anything
//! missing or degenerate is rejected here, at construction, never
//! mid-render.

use glam::{DVec2, DVec3};
use thiserror::Error;

use crate::vertex::VertexInput;

/// Mesh construction errors (host contract violations).
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("E201: mesh has no triangles")]
    Empty,

    #[error("E202: attribute count mismatch: {positions} positions, {normals} normals, {uvs} uvs")]
    AttributeCountMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },

    #[error("E203: vertex {index} has a degenerate (zero-length) normal")]
    DegenerateNormal { index: usize },

    #[error("E204: triangle {triangle} references vertex {index}, but the mesh has {count}")]
    IndexOutOfBounds {
        triangle: usize,
        index: u32,
        count: usize,
    },
}

/// An indexed triangle mesh with position/normal/uv attributes.
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<DVec3>,
    normals: Vec<DVec3>,
    uvs: Vec<DVec2>,
    indices: Vec<[u32; 3]>,
}

impl Mesh {
    /// Build a mesh, enforcing the attribute contract: equal-length
    /// attribute arrays, at least one triangle, in-bounds indices, and
    /// non-degenerate normals.
    pub fn new(
        positions: Vec<DVec3>,
        normals: Vec<DVec3>,
        uvs: Vec<DVec2>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, MeshError> {
        if positions.len() != normals.len() || positions.len() != uvs.len() {
            return Err(MeshError::AttributeCountMismatch {
                positions: positions.len(),
                normals: normals.len(),
                uvs: uvs.len(),
            });
        }
        if indices.is_empty() {
            return Err(MeshError::Empty);
        }
        for (index, normal) in normals.iter().enumerate() {
            if normal.length_squared() < 1e-24 {
                return Err(MeshError::DegenerateNormal { index });
            }
        }
        for (triangle, tri) in indices.iter().enumerate() {
            for &index in tri {
                if index as usize >= positions.len() {
                    return Err(MeshError::IndexOutOfBounds {
                        triangle,
                        index,
                        count: positions.len(),
                    });
                }
            }
        }
        Ok(Self {
            positions,
            normals,
            uvs,
            indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    fn vertex(&self, index: u32) -> VertexInput {
        let i = index as usize;
        VertexInput {
            position: self.positions[i],
            normal: self.normals[i],
            uv: self.uvs[i],
        }
    }

    /// Iterate triangles as vertex-input triples, counter-clockwise when
    /// viewed from outside.
    pub fn triangles(&self) -> impl Iterator<Item = [VertexInput; 3]> + '_ {
        self.indices
            .iter()
            .map(|tri| [self.vertex(tri[0]), self.vertex(tri[1]), self.vertex(tri[2])])
    }

    /// Latitude/longitude sphere centered at the origin.
    pub fn uv_sphere(radius: f64, rings: u32, segments: u32) -> Mesh {
        let rings = rings.max(2);
        let segments = segments.max(3);

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        for ring in 0..=rings {
            let theta = std::f64::consts::PI * ring as f64 / rings as f64;
            for segment in 0..=segments {
                let phi = std::f64::consts::TAU * segment as f64 / segments as f64;
                let normal = DVec3::new(
                    theta.sin() * phi.cos(),
                    theta.cos(),
                    theta.sin() * phi.sin(),
                );
                // Pole rings collapse to the axis; keep the axis normal.
                let normal = if normal.length_squared() < 1e-24 {
                    DVec3::new(0.0, if ring == 0 { 1.0 } else { -1.0 }, 0.0)
                } else {
                    normal.normalize()
                };
                positions.push(normal * radius);
                normals.push(normal);
                uvs.push(DVec2::new(
                    segment as f64 / segments as f64,
                    ring as f64 / rings as f64,
                ));
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::new();
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                indices.push([a, a + 1, b]);
                indices.push([a + 1, b + 1, b]);
            }
        }

        Mesh::new(positions, normals, uvs, indices)
            .expect("generated sphere satisfies the attribute contract")
    }

    /// Axis-aligned cube with per-face normals.
    pub fn cube(half_extent: f64) -> Mesh {
        let h = half_extent;
        // (normal, tangent, bitangent) per face
        let faces = [
            (DVec3::X, DVec3::Z, DVec3::Y),
            (DVec3::NEG_X, DVec3::NEG_Z, DVec3::Y),
            (DVec3::Y, DVec3::X, DVec3::Z),
            (DVec3::NEG_Y, DVec3::X, DVec3::NEG_Z),
            (DVec3::Z, DVec3::NEG_X, DVec3::Y),
            (DVec3::NEG_Z, DVec3::X, DVec3::Y),
        ];

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut indices = Vec::new();
        for (normal, tangent, bitangent) in faces {
            let base = positions.len() as u32;
            for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push((normal + tangent * u + bitangent * v) * h);
                normals.push(normal);
                uvs.push(DVec2::new(u * 0.5 + 0.5, v * 0.5 + 0.5));
            }
            // The face quad is laid out clockwise from outside for every
            // (tangent, bitangent) pair above, so wind the triangles back.
            indices.push([base, base + 2, base + 1]);
            indices.push([base, base + 3, base + 2]);
        }

        Mesh::new(positions, normals, uvs, indices)
            .expect("generated cube satisfies the attribute contract")
    }

    /// Ground plane in the xz plane, facing +y.
    pub fn plane(half_extent: f64) -> Mesh {
        let h = half_extent;
        let positions = vec![
            DVec3::new(-h, 0.0, -h),
            DVec3::new(-h, 0.0, h),
            DVec3::new(h, 0.0, h),
            DVec3::new(h, 0.0, -h),
        ];
        let normals = vec![DVec3::Y; 4];
        let uvs = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 0.0),
        ];
        let indices = vec![[0, 1, 2], [0, 2, 3]];

        Mesh::new(positions, normals, uvs, indices)
            .expect("generated plane satisfies the attribute contract")
    }
}
