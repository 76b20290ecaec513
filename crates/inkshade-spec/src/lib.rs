//! Inkshade canonical material library.
//!
//! This crate provides the host-side half of the toon shading model: the
//! preset registry, material documents, the per-draw-call uniform set, and
//! validation. The per-fragment pipeline lives in `inkshade-backend-shading`
//! and consumes [`ShadingUniforms`] unchanged.
//!
//! # Overview
//!
//! A material is built from a surface-type tag, a base color, and optional
//! overrides. The tag selects a [`MaterialPreset`] from the registry (unknown
//! tags fall back to `default`); overrides are merged on top; the result is a
//! [`ShadingUniforms`] bound to a mesh for the frame.
//!
//! # Example
//!
//! ```
//! use inkshade_spec::{MaterialSpec, preset, validation};
//!
//! let spec = MaterialSpec::from_json(
//!     r#"{"tag": "glass", "color": [0.65, 0.85, 1.0], "model": "anime"}"#,
//! )
//! .unwrap();
//!
//! let uniforms = spec.resolve();
//! assert_eq!(uniforms.preset.specular_shininess, preset::lookup("glass").specular_shininess);
//! assert!(validation::validate_uniforms(&uniforms).is_ok());
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error codes and validation error types
//! - [`material`]: Shading models, outline strategies, uniforms, documents
//! - [`preset`]: The read-only preset registry
//! - [`validation`]: Pure validation of documents and uniform sets

pub mod error;
pub mod material;
pub mod preset;
pub mod validation;

// Re-export commonly used types at the crate root
pub use error::{ErrorCode, MaterialError, ValidationError, ValidationResult};
pub use material::{
    EdgeThreshold, HatchingStyle, MaterialOverrides, MaterialSpec, OutlineStrategy, ShadingModel,
    ShadingUniforms,
};
pub use preset::MaterialPreset;
pub use validation::{validate_spec, validate_uniforms};
