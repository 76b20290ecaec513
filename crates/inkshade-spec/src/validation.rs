//! Pure validation of material documents and resolved uniform sets.
//!
//! The fragment pipeline itself has no failure paths; everything that can be
//! wrong is caught here, before a material is bound.

use crate::error::{ErrorCode, ValidationError, ValidationResult};
use crate::material::{MaterialSpec, OutlineStrategy, ShadingUniforms};

fn check_finite(result: &mut ValidationResult, field: &str, value: f64) -> bool {
    if !value.is_finite() {
        result.push(ValidationError::new(
            ErrorCode::ValueNotFinite,
            field,
            format!("must be finite, got {}", value),
        ));
        return false;
    }
    true
}

fn check_unit_interval(result: &mut ValidationResult, field: &str, value: f64) {
    if !check_finite(result, field, value) {
        return;
    }
    if !(0.0..=1.0).contains(&value) {
        result.push(ValidationError::new(
            ErrorCode::ValueOutOfRange,
            field,
            format!("must be in [0, 1], got {}", value),
        ));
    }
}

fn check_non_negative(result: &mut ValidationResult, field: &str, value: f64) {
    if !check_finite(result, field, value) {
        return;
    }
    if value < 0.0 {
        result.push(ValidationError::new(
            ErrorCode::ValueOutOfRange,
            field,
            format!("must be non-negative, got {}", value),
        ));
    }
}

fn check_positive(result: &mut ValidationResult, code: ErrorCode, field: &str, value: f64) {
    if !check_finite(result, field, value) {
        return;
    }
    if value <= 0.0 {
        result.push(ValidationError::new(
            code,
            field,
            format!("must be positive, got {}", value),
        ));
    }
}

fn check_color(result: &mut ValidationResult, field: &str, color: [f64; 3]) {
    for (i, c) in color.iter().enumerate() {
        check_unit_interval(result, &format!("{}[{}]", field, i), *c);
    }
}

/// Validate a resolved uniform set.
///
/// Intensities may exceed 1.0 (interaction boosts), so they are only required
/// to be finite and non-negative; colors stay in [0, 1].
pub fn validate_uniforms(uniforms: &ShadingUniforms) -> ValidationResult {
    let mut result = ValidationResult::default();

    check_color(&mut result, "color", uniforms.color);
    check_color(&mut result, "outline_color", uniforms.outline_color);
    check_color(&mut result, "specular_color", uniforms.specular_color);
    check_color(&mut result, "preset.rim_color", uniforms.preset.rim_color);

    for (i, v) in uniforms.light_position.iter().enumerate() {
        check_finite(&mut result, &format!("light_position[{}]", i), *v);
    }
    check_non_negative(&mut result, "light_intensity", uniforms.light_intensity);

    if uniforms.steps == 0 {
        result.push(ValidationError::new(
            ErrorCode::ZeroSteps,
            "steps",
            "band count must be at least 1",
        ));
    }

    check_positive(
        &mut result,
        ErrorCode::NonPositiveScale,
        "halftone_scale",
        uniforms.halftone_scale,
    );
    check_positive(
        &mut result,
        ErrorCode::NonPositiveScale,
        "pattern_reference_scale",
        uniforms.pattern_reference_scale,
    );
    check_positive(
        &mut result,
        ErrorCode::NonPositiveScale,
        "preset.hatching_scale",
        uniforms.preset.hatching_scale,
    );

    for (i, v) in uniforms.room_half_extents.iter().enumerate() {
        check_positive(
            &mut result,
            ErrorCode::NonPositiveExtent,
            &format!("room_half_extents[{}]", i),
            *v,
        );
    }

    let p = &uniforms.preset;
    check_non_negative(&mut result, "preset.rim_intensity", p.rim_intensity);
    check_non_negative(&mut result, "preset.specular_intensity", p.specular_intensity);
    check_positive(
        &mut result,
        ErrorCode::NonPositiveShininess,
        "preset.specular_shininess",
        p.specular_shininess,
    );
    check_unit_interval(&mut result, "preset.halftone_intensity", p.halftone_intensity);
    check_non_negative(&mut result, "preset.outline_width", p.outline_width);
    check_unit_interval(&mut result, "preset.soft_shadow_intensity", p.soft_shadow_intensity);
    check_unit_interval(
        &mut result,
        "preset.color_transition_smoothness",
        p.color_transition_smoothness,
    );
    check_unit_interval(&mut result, "preset.hatching_intensity", p.hatching_intensity);
    check_finite(&mut result, "preset.hatching_rotation", p.hatching_rotation);

    match uniforms.outline {
        OutlineStrategy::Extrusion { width } => {
            check_non_negative(&mut result, "outline.width", width);
        }
        OutlineStrategy::DerivativeEdge { threshold } => match threshold {
            crate::material::EdgeThreshold::Hard { cutoff } => {
                check_positive(&mut result, ErrorCode::ValueOutOfRange, "outline.cutoff", cutoff);
            }
            crate::material::EdgeThreshold::Smooth { lower, upper } => {
                check_non_negative(&mut result, "outline.lower", lower);
                check_finite(&mut result, "outline.upper", upper);
                if upper <= lower {
                    result.push(ValidationError::new(
                        ErrorCode::ValueOutOfRange,
                        "outline.upper",
                        format!("must exceed lower bound {}, got {}", lower, upper),
                    ));
                }
            }
        },
    }

    result
}

/// Validate a material document by resolving it and checking the result.
pub fn validate_spec(spec: &MaterialSpec) -> ValidationResult {
    validate_uniforms(&spec.resolve())
}
