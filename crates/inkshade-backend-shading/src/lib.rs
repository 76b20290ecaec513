//! Inkshade Shading Backend
//!
//! CPU implementation of the Inkshade toon/anime surface shading model:
//! quantized (cel) diffuse bands, toon specular and rim highlights,
//! screen-space halftone/hatching shadow patterns, silhouette outlining,
//! soft-shadow attenuation, and corner darkening, all driven by a
//! per-draw-call [`inkshade_spec::ShadingUniforms`] set.
//!
//! Every fragment is a pure function of its own interpolated inputs and the
//! uniform set: see [`shade::shade`]. The preview module adds a deterministic
//! software renderer (procedural meshes, perspective rasterizer, PNG export)
//! that plays the host role end to end, with byte-identical output for
//! identical inputs.
//!
//! # Example
//!
//! ```no_run
//! use inkshade_backend_shading::preview::{render_preview, PreviewShape};
//! use inkshade_backend_shading::png::{encode_rgba, content_hash, PngConfig};
//! use inkshade_spec::{ShadingModel, ShadingUniforms};
//!
//! let uniforms = ShadingUniforms::from_tag("glass", [0.65, 0.85, 1.0], ShadingModel::Anime);
//! let framebuffer = render_preview(&uniforms, PreviewShape::Sphere, 256).unwrap();
//! let bytes = encode_rgba(&framebuffer, &PngConfig::default()).unwrap();
//! println!("preview hash: {}", content_hash(&bytes));
//! ```

pub mod color;
pub mod edge;
pub mod fragment;
pub mod highlight;
pub mod lighting;
pub mod math;
pub mod pattern;
pub mod png;
pub mod preview;
pub mod shade;
pub mod vertex;

// Re-export main types for convenience
pub use color::Color;
pub use fragment::FragmentContext;
pub use pattern::{HalftonePattern, HatchingPattern, ShadowPattern};
pub use preview::{render_preview, Framebuffer, Mesh, MeshError, PreviewError, PreviewShape};
pub use shade::shade;
pub use vertex::{process_vertex, Matrices, VertexInput, Varyings};
