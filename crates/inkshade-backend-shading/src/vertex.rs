//! Vertex stage: object space to clip space, with optional normal expansion
//! for the extrusion outline.

use glam::{DMat3, DMat4, DVec2, DVec3, DVec4};

/// Transform set supplied by the host per draw call.
#[derive(Debug, Clone, Copy)]
pub struct Matrices {
    pub model: DMat4,
    pub view: DMat4,
    pub projection: DMat4,
    /// Inverse-transpose of the upper 3x3 of model-view.
    pub normal_matrix: DMat3,
}

impl Matrices {
    pub fn new(model: DMat4, view: DMat4, projection: DMat4) -> Self {
        let model_view = view * model;
        let normal_matrix = DMat3::from_mat4(model_view).inverse().transpose();
        Self {
            model,
            view,
            projection,
            normal_matrix,
        }
    }

    pub fn model_view(&self) -> DMat4 {
        self.view * self.model
    }
}

/// One vertex as supplied by the host mesh.
#[derive(Debug, Clone, Copy)]
pub struct VertexInput {
    pub position: DVec3,
    pub normal: DVec3,
    pub uv: DVec2,
}

/// Varyings handed to the rasterizer for interpolation.
#[derive(Debug, Clone, Copy)]
pub struct Varyings {
    /// Clip-space position (pre-divide; w needed for perspective-correct
    /// interpolation).
    pub clip_position: DVec4,
    /// NDC position (clip xyz / w).
    pub ndc: DVec3,
    /// Unit view-space normal.
    pub normal: DVec3,
    /// View-space position of the *unexpanded* vertex.
    pub view_space_position: DVec3,
    /// World-space position of the unexpanded vertex.
    pub world_position: DVec3,
    pub uv: DVec2,
}

/// Run the vertex stage for one vertex.
///
/// When `expand` is set the projected position is displaced along the normal
/// by that distance first (the extrusion-outline shell); the shading varyings
/// still describe the unexpanded surface. Normals passed downstream are unit
/// length; a zero input normal is a host contract violation and is rejected
/// at mesh construction.
pub fn process_vertex(input: &VertexInput, matrices: &Matrices, expand: Option<f64>) -> Varyings {
    let normal = (matrices.normal_matrix * input.normal).normalize_or_zero();

    let world_position = matrices.model.transform_point3(input.position);
    let view_space_position = matrices.view.transform_point3(world_position);

    let projected = match expand {
        Some(width) => input.position + input.normal * width,
        None => input.position,
    };
    let clip_position = matrices.projection * matrices.model_view() * projected.extend(1.0);
    let ndc = if clip_position.w.abs() > f64::EPSILON {
        clip_position.truncate() / clip_position.w
    } else {
        clip_position.truncate()
    };

    Varyings {
        clip_position,
        ndc,
        normal,
        view_space_position,
        world_position,
        uv: input.uv,
    }
}
