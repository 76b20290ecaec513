//! Material construction: shading models, outline strategies, and the
//! per-draw-call uniform set.

use serde::{Deserialize, Serialize};

use crate::preset::{self, MaterialPreset};

/// The three generations of the toon material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShadingModel {
    /// Ceil-quantized bands driven by `steps`, hard-step specular,
    /// geometry-expansion outline.
    Classic,
    /// Fixed four-band thresholds with smoothstepped band edges, windowed
    /// specular, derivative-based silhouette outline.
    #[default]
    Enhanced,
    /// Enhanced plus hatching, soft shadow, color transition, and
    /// corner darkening.
    Anime,
}

/// Edge classification window for the derivative outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeThreshold {
    /// Hard cutoff: a fragment is an edge iff strength exceeds `cutoff`.
    Hard { cutoff: f64 },
    /// Smoothstepped window between `lower` and `upper`.
    Smooth { lower: f64, upper: f64 },
}

impl EdgeThreshold {
    pub const fn hard() -> Self {
        EdgeThreshold::Hard { cutoff: 0.8 }
    }

    pub const fn smooth() -> Self {
        EdgeThreshold::Smooth { lower: 0.8, upper: 0.9 }
    }
}

/// Outline strategy, chosen once per material. Mixing both strategies on one
/// draw call double-darkens silhouettes, so the variants are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutlineStrategy {
    /// Backface shell extruded along the normal by `width`.
    Extrusion { width: f64 },
    /// Screen-space derivative silhouette detection.
    DerivativeEdge { threshold: EdgeThreshold },
}

/// Hatching line-field variant. `Parallel` is the shipped behavior; `Cross`
/// is the crosshatch extension point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HatchingStyle {
    #[default]
    Parallel,
    Cross,
}

fn default_light_position() -> [f64; 3] {
    [0.0, 10.0, 10.0]
}

fn default_light_intensity() -> f64 {
    1.0
}

fn default_steps() -> u32 {
    4
}

fn default_halftone_scale() -> f64 {
    100.0
}

fn default_pattern_reference_scale() -> f64 {
    1000.0
}

fn default_room_half_extents() -> [f64; 2] {
    [15.0, 10.0]
}

/// The full per-draw-call parameter set consumed by the fragment pipeline.
///
/// Constructed from a preset tag, a base color, and optional overrides;
/// immutable for the frame in which it is drawn. Light and interaction
/// fields may be updated between frames without reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadingUniforms {
    /// Base surface color, RGB in [0, 1].
    pub color: [f64; 3],
    /// Outline color for both strategies.
    pub outline_color: [f64; 3],
    /// Tint applied to the specular term.
    pub specular_color: [f64; 3],
    /// Light position in view space.
    pub light_position: [f64; 3],
    /// Scalar light multiplier.
    pub light_intensity: f64,
    /// Band count for the Classic quantizer.
    pub steps: u32,
    /// Screen-space scale of the halftone grid.
    pub halftone_scale: f64,
    /// Reference resolution divisor for screen-space patterns.
    pub pattern_reference_scale: f64,
    /// Hatching line-field variant.
    pub hatching_style: HatchingStyle,
    /// Room half-extents [x, z] for corner darkening (Anime model).
    pub room_half_extents: [f64; 2],
    /// Material generation.
    pub model: ShadingModel,
    /// Outline strategy for this material.
    pub outline: OutlineStrategy,
    /// Resolved preset parameters.
    pub preset: MaterialPreset,
}

impl ShadingUniforms {
    /// Build uniforms from a preset tag and base color.
    ///
    /// The outline strategy follows the model generation: Classic extrudes,
    /// Enhanced uses a hard derivative cutoff, Anime a smoothed window.
    pub fn from_tag(tag: &str, color: [f64; 3], model: ShadingModel) -> Self {
        let preset = *preset::lookup(tag);
        let outline = match model {
            ShadingModel::Classic => OutlineStrategy::Extrusion { width: preset.outline_width },
            ShadingModel::Enhanced => {
                OutlineStrategy::DerivativeEdge { threshold: EdgeThreshold::hard() }
            }
            ShadingModel::Anime => {
                OutlineStrategy::DerivativeEdge { threshold: EdgeThreshold::smooth() }
            }
        };
        Self {
            color,
            outline_color: [0.0, 0.0, 0.0],
            specular_color: [1.0, 1.0, 1.0],
            light_position: default_light_position(),
            light_intensity: default_light_intensity(),
            steps: default_steps(),
            halftone_scale: default_halftone_scale(),
            pattern_reference_scale: default_pattern_reference_scale(),
            hatching_style: HatchingStyle::default(),
            room_half_extents: default_room_half_extents(),
            model,
            outline,
            preset,
        }
    }

    /// Update light state between frames without rebuilding the material.
    pub fn set_light(&mut self, position: [f64; 3], intensity: f64) {
        self.light_position = position;
        self.light_intensity = intensity;
    }

    /// Apply interaction-driven highlight boosts (hover/selection).
    pub fn set_highlight_boost(&mut self, rim_intensity: f64, specular_intensity: f64) {
        self.preset.rim_intensity = rim_intensity;
        self.preset.specular_intensity = specular_intensity;
    }

    fn apply_overrides(&mut self, overrides: &MaterialOverrides) {
        if let Some(v) = overrides.outline_color {
            self.outline_color = v;
        }
        if let Some(v) = overrides.specular_color {
            self.specular_color = v;
        }
        if let Some(v) = overrides.light_position {
            self.light_position = v;
        }
        if let Some(v) = overrides.light_intensity {
            self.light_intensity = v;
        }
        if let Some(v) = overrides.steps {
            self.steps = v;
        }
        if let Some(v) = overrides.halftone_scale {
            self.halftone_scale = v;
        }
        if let Some(v) = overrides.pattern_reference_scale {
            self.pattern_reference_scale = v;
        }
        if let Some(v) = overrides.hatching_style {
            self.hatching_style = v;
        }
        if let Some(v) = overrides.room_half_extents {
            self.room_half_extents = v;
        }
        if let Some(v) = overrides.outline {
            self.outline = v;
        }

        let preset = &mut self.preset;
        if let Some(v) = overrides.rim_intensity {
            preset.rim_intensity = v;
        }
        if let Some(v) = overrides.specular_intensity {
            preset.specular_intensity = v;
        }
        if let Some(v) = overrides.specular_shininess {
            preset.specular_shininess = v;
        }
        if let Some(v) = overrides.halftone_intensity {
            preset.halftone_intensity = v;
        }
        if let Some(v) = overrides.outline_width {
            preset.outline_width = v;
        }
        if let Some(v) = overrides.rim_color {
            preset.rim_color = v;
        }
        if let Some(v) = overrides.soft_shadow_intensity {
            preset.soft_shadow_intensity = v;
        }
        if let Some(v) = overrides.color_transition_smoothness {
            preset.color_transition_smoothness = v;
        }
        if let Some(v) = overrides.hatching_scale {
            preset.hatching_scale = v;
        }
        if let Some(v) = overrides.hatching_intensity {
            preset.hatching_intensity = v;
        }
        if let Some(v) = overrides.hatching_rotation {
            preset.hatching_rotation = v;
        }

        // An overridden outline width must also reach an extrusion strategy
        // that was resolved before the override, unless the strategy itself
        // was overridden.
        if overrides.outline.is_none() {
            if let (Some(width), OutlineStrategy::Extrusion { .. }) =
                (overrides.outline_width, self.outline)
            {
                self.outline = OutlineStrategy::Extrusion { width };
            }
        }
    }
}

/// Optional per-material overrides, merged over the resolved preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular_color: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_position: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halftone_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_reference_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hatching_style: Option<HatchingStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_half_extents: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<OutlineStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rim_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular_shininess: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub halftone_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rim_color: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_shadow_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_transition_smoothness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hatching_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hatching_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hatching_rotation: Option<f64>,
}

/// A material document: preset tag, base color, and optional overrides.
///
/// This is the JSON surface consumed by the CLI (`validate`, `preview`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// Surface-type tag; unknown tags resolve to `default`.
    pub tag: String,
    /// Base surface color, RGB in [0, 1].
    pub color: [f64; 3],
    /// Material generation.
    #[serde(default)]
    pub model: ShadingModel,
    /// Overrides merged over the resolved preset.
    #[serde(default, skip_serializing_if = "MaterialOverrides::is_empty")]
    pub overrides: MaterialOverrides,
}

impl MaterialOverrides {
    fn is_empty(&self) -> bool {
        self == &MaterialOverrides::default()
    }
}

impl MaterialSpec {
    /// Parse a material document from JSON.
    pub fn from_json(json: &str) -> Result<Self, crate::error::MaterialError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve the document into a bound uniform set.
    pub fn resolve(&self) -> ShadingUniforms {
        let mut uniforms = ShadingUniforms::from_tag(&self.tag, self.color, self.model);
        uniforms.apply_overrides(&self.overrides);
        uniforms
    }

    /// Resolve and validate in one step, for callers that only need a
    /// bound-or-rejected answer rather than the individual diagnostics.
    pub fn resolve_validated(&self) -> Result<ShadingUniforms, crate::error::MaterialError> {
        let uniforms = self.resolve();
        let result = crate::validation::validate_uniforms(&uniforms);
        if result.is_ok() {
            Ok(uniforms)
        } else {
            Err(crate::error::MaterialError::Invalid(result.errors.len()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_tag_carries_registry_values() {
        let uniforms = ShadingUniforms::from_tag("metal", [0.5, 0.5, 0.5], ShadingModel::Enhanced);
        assert_eq!(uniforms.preset.rim_intensity, preset::lookup("metal").rim_intensity);
        assert_eq!(uniforms.preset.specular_shininess, 32.0);
    }

    #[test]
    fn test_override_wins_over_registry() {
        let spec = MaterialSpec {
            tag: "metal".to_string(),
            color: [0.5, 0.5, 0.5],
            model: ShadingModel::Enhanced,
            overrides: MaterialOverrides {
                rim_intensity: Some(0.123),
                ..Default::default()
            },
        };
        let uniforms = spec.resolve();
        assert_eq!(uniforms.preset.rim_intensity, 0.123);
        // Untouched fields still come from the registry.
        assert_eq!(
            uniforms.preset.specular_intensity,
            preset::lookup("metal").specular_intensity
        );
    }

    #[test]
    fn test_outline_strategy_follows_model() {
        let classic = ShadingUniforms::from_tag("wood", [1.0; 3], ShadingModel::Classic);
        assert!(matches!(classic.outline, OutlineStrategy::Extrusion { .. }));

        let enhanced = ShadingUniforms::from_tag("wood", [1.0; 3], ShadingModel::Enhanced);
        assert_eq!(
            enhanced.outline,
            OutlineStrategy::DerivativeEdge { threshold: EdgeThreshold::hard() }
        );

        let anime = ShadingUniforms::from_tag("wood", [1.0; 3], ShadingModel::Anime);
        assert_eq!(
            anime.outline,
            OutlineStrategy::DerivativeEdge { threshold: EdgeThreshold::smooth() }
        );
    }

    #[test]
    fn test_outline_width_override_reaches_extrusion() {
        let spec = MaterialSpec {
            tag: "wood".to_string(),
            color: [1.0; 3],
            model: ShadingModel::Classic,
            overrides: MaterialOverrides {
                outline_width: Some(0.09),
                ..Default::default()
            },
        };
        let uniforms = spec.resolve();
        assert_eq!(uniforms.outline, OutlineStrategy::Extrusion { width: 0.09 });
    }

    #[test]
    fn test_set_light_does_not_touch_preset() {
        let mut uniforms = ShadingUniforms::from_tag("glass", [1.0; 3], ShadingModel::Anime);
        let before = uniforms.preset;
        uniforms.set_light([3.0, 4.0, 5.0], 0.8);
        assert_eq!(uniforms.light_position, [3.0, 4.0, 5.0]);
        assert_eq!(uniforms.light_intensity, 0.8);
        assert_eq!(uniforms.preset, before);
    }

    #[test]
    fn test_material_spec_json_round_trip() {
        let spec = MaterialSpec {
            tag: "glass".to_string(),
            color: [0.65, 0.85, 1.0],
            model: ShadingModel::Anime,
            overrides: MaterialOverrides {
                light_position: Some([0.0, 10.0, 10.0]),
                hatching_style: Some(HatchingStyle::Cross),
                ..Default::default()
            },
        };
        let json = serde_json::to_string_pretty(&spec).unwrap();
        let back = MaterialSpec::from_json(&json).unwrap();
        assert_eq!(spec, back);
    }

    #[test]
    fn test_material_spec_minimal_document() {
        let spec = MaterialSpec::from_json(r#"{"tag": "wood", "color": [0.6, 0.4, 0.2]}"#).unwrap();
        assert_eq!(spec.model, ShadingModel::Enhanced);
        assert!(spec.overrides.is_empty());
        let uniforms = spec.resolve();
        assert_eq!(uniforms.steps, 4);
        assert_eq!(uniforms.pattern_reference_scale, 1000.0);
        assert_eq!(uniforms.room_half_extents, [15.0, 10.0]);
    }

    #[test]
    fn test_resolve_validated_counts_errors() {
        let spec = MaterialSpec {
            tag: "default".to_string(),
            color: [0.5, 0.5, 0.5],
            model: ShadingModel::Enhanced,
            overrides: MaterialOverrides {
                steps: Some(0),
                specular_shininess: Some(-1.0),
                ..Default::default()
            },
        };
        let err = spec.resolve_validated().unwrap_err();
        assert!(matches!(err, crate::error::MaterialError::Invalid(2)));

        let clean = MaterialSpec {
            tag: "default".to_string(),
            color: [0.5, 0.5, 0.5],
            model: ShadingModel::Enhanced,
            overrides: MaterialOverrides::default(),
        };
        assert!(clean.resolve_validated().is_ok());
    }

    #[test]
    fn test_unknown_override_field_rejected() {
        let result = MaterialSpec::from_json(
            r#"{"tag": "wood", "color": [1, 1, 1], "overrides": {"shinyness": 2.0}}"#,
        );
        assert!(result.is_err());
    }
}
