//! Material presets: per-surface shading parameter bundles.
//!
//! The registry is a fixed table keyed by surface-type tag. Lookup never
//! fails: tags without an entry resolve to the `default` preset.

use serde::{Deserialize, Serialize};

/// A named bundle of shading parameters applied uniformly to a surface type.
///
/// All intensity fields are non-negative scalars; colors are RGB in [0, 1].
/// Presets are immutable; per-material adjustments go through overrides at
/// construction time instead of mutating the table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialPreset {
    /// Strength of the rim (Fresnel-like backlight) term.
    pub rim_intensity: f64,
    /// Strength of the toon specular highlight.
    pub specular_intensity: f64,
    /// Phong exponent for the specular lobe.
    pub specular_shininess: f64,
    /// Strength of the halftone dot-screen in shadow bands.
    pub halftone_intensity: f64,
    /// Extrusion distance for the geometry-expansion outline.
    pub outline_width: f64,
    /// Tint applied to the rim term.
    pub rim_color: [f64; 3],
    /// Width of the soft-shadow transition band.
    pub soft_shadow_intensity: f64,
    /// Smoothing width for the base-color shadow transition.
    pub color_transition_smoothness: f64,
    /// Screen-space scale of the hatching line field.
    pub hatching_scale: f64,
    /// Strength of the hatching pattern in shadow bands.
    pub hatching_intensity: f64,
    /// Extra rotation of the hatching field, radians (on top of the fixed 45°).
    pub hatching_rotation: f64,
}

/// Fallback preset for unknown tags.
pub const DEFAULT: MaterialPreset = MaterialPreset {
    rim_intensity: 0.7,
    specular_intensity: 0.3,
    specular_shininess: 16.0,
    halftone_intensity: 0.5,
    outline_width: 0.05,
    rim_color: [1.0, 1.0, 1.0],
    soft_shadow_intensity: 0.5,
    color_transition_smoothness: 0.2,
    hatching_scale: 50.0,
    hatching_intensity: 0.4,
    hatching_rotation: 0.0,
};

const WOOD: MaterialPreset = MaterialPreset {
    rim_intensity: 0.4,
    specular_intensity: 0.1,
    specular_shininess: 8.0,
    halftone_intensity: 0.6,
    outline_width: 0.03,
    rim_color: [0.9, 0.8, 0.7],
    soft_shadow_intensity: 0.5,
    color_transition_smoothness: 0.2,
    hatching_scale: 50.0,
    hatching_intensity: 0.5,
    hatching_rotation: 0.0,
};

const METAL: MaterialPreset = MaterialPreset {
    rim_intensity: 1.0,
    specular_intensity: 0.8,
    specular_shininess: 32.0,
    halftone_intensity: 0.2,
    outline_width: 0.04,
    rim_color: [0.8, 0.8, 1.0],
    soft_shadow_intensity: 0.4,
    color_transition_smoothness: 0.15,
    hatching_scale: 50.0,
    hatching_intensity: 0.2,
    hatching_rotation: 0.0,
};

const FABRIC: MaterialPreset = MaterialPreset {
    rim_intensity: 0.3,
    specular_intensity: 0.05,
    specular_shininess: 4.0,
    halftone_intensity: 0.7,
    outline_width: 0.02,
    rim_color: [1.0, 1.0, 1.0],
    soft_shadow_intensity: 0.6,
    color_transition_smoothness: 0.3,
    hatching_scale: 50.0,
    hatching_intensity: 0.6,
    hatching_rotation: 0.0,
};

const GLASS: MaterialPreset = MaterialPreset {
    rim_intensity: 1.0,
    specular_intensity: 1.0,
    specular_shininess: 64.0,
    halftone_intensity: 0.1,
    outline_width: 0.03,
    rim_color: [0.9, 0.95, 1.0],
    soft_shadow_intensity: 0.3,
    color_transition_smoothness: 0.1,
    hatching_scale: 50.0,
    hatching_intensity: 0.1,
    hatching_rotation: 0.0,
};

const PLASTIC: MaterialPreset = MaterialPreset {
    rim_intensity: 0.8,
    specular_intensity: 0.5,
    specular_shininess: 24.0,
    halftone_intensity: 0.4,
    outline_width: 0.03,
    rim_color: [1.0, 1.0, 1.0],
    soft_shadow_intensity: 0.5,
    color_transition_smoothness: 0.2,
    hatching_scale: 50.0,
    hatching_intensity: 0.4,
    hatching_rotation: 0.0,
};

const WALL: MaterialPreset = MaterialPreset {
    rim_intensity: 0.2,
    specular_intensity: 0.1,
    specular_shininess: 8.0,
    halftone_intensity: 0.4,
    outline_width: 0.02,
    rim_color: [1.0, 1.0, 1.0],
    soft_shadow_intensity: 0.6,
    color_transition_smoothness: 0.25,
    hatching_scale: 50.0,
    hatching_intensity: 0.3,
    hatching_rotation: 0.0,
};

const FLOOR: MaterialPreset = MaterialPreset {
    rim_intensity: 0.25,
    specular_intensity: 0.2,
    specular_shininess: 12.0,
    halftone_intensity: 0.5,
    outline_width: 0.02,
    rim_color: [1.0, 1.0, 1.0],
    soft_shadow_intensity: 0.6,
    color_transition_smoothness: 0.25,
    hatching_scale: 50.0,
    hatching_intensity: 0.4,
    hatching_rotation: 0.0,
};

// The `enhanced` and `anime` entries carry the refined-generation default
// tunings rather than a physical surface.
const ENHANCED: MaterialPreset = MaterialPreset {
    rim_intensity: 0.5,
    specular_intensity: 0.5,
    specular_shininess: 32.0,
    halftone_intensity: 0.3,
    outline_width: 0.05,
    rim_color: [1.0, 1.0, 1.0],
    soft_shadow_intensity: 0.5,
    color_transition_smoothness: 0.2,
    hatching_scale: 50.0,
    hatching_intensity: 0.4,
    hatching_rotation: 0.0,
};

const ANIME: MaterialPreset = MaterialPreset {
    rim_intensity: 0.5,
    specular_intensity: 0.5,
    specular_shininess: 32.0,
    halftone_intensity: 0.3,
    outline_width: 0.05,
    rim_color: [1.0, 1.0, 1.0],
    soft_shadow_intensity: 0.5,
    color_transition_smoothness: 0.2,
    hatching_scale: 50.0,
    hatching_intensity: 0.4,
    hatching_rotation: 0.0,
};

/// All tags with a registry entry, in listing order.
pub const TAGS: &[&str] = &[
    "default", "wood", "metal", "fabric", "glass", "plastic", "wall", "floor", "enhanced", "anime",
];

/// Look up a preset by surface-type tag.
///
/// Any string is accepted; tags without an entry resolve to the `default`
/// preset. This is the documented fallback, not an error.
pub fn lookup(tag: &str) -> &'static MaterialPreset {
    match tag {
        "wood" => &WOOD,
        "metal" => &METAL,
        "fabric" => &FABRIC,
        "glass" => &GLASS,
        "plastic" => &PLASTIC,
        "wall" => &WALL,
        "floor" => &FLOOR,
        "enhanced" => &ENHANCED,
        "anime" => &ANIME,
        _ => &DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag_falls_back_to_default() {
        assert_eq!(lookup("granite"), lookup("default"));
        assert_eq!(lookup(""), &DEFAULT);
        assert_eq!(lookup("METAL"), &DEFAULT); // tags are case-sensitive
    }

    #[test]
    fn test_every_tag_resolves_to_its_own_entry() {
        for tag in TAGS {
            let preset = lookup(tag);
            if *tag != "default" {
                // `enhanced`/`anime` share tuning values but are distinct
                // entries; the physical surfaces must differ from default.
                if !matches!(*tag, "enhanced" | "anime") {
                    assert_ne!(preset, &DEFAULT, "tag {} resolved to default", tag);
                }
            }
        }
    }

    #[test]
    fn test_glass_preset_matches_catalog() {
        let glass = lookup("glass");
        assert_eq!(glass.specular_shininess, 64.0);
        assert_eq!(glass.specular_intensity, 1.0);
        assert_eq!(glass.halftone_intensity, 0.1);
        assert_eq!(glass.rim_color, [0.9, 0.95, 1.0]);
    }

    #[test]
    fn test_all_preset_fields_finite_and_in_range() {
        for tag in TAGS {
            let p = lookup(tag);
            let scalars = [
                p.rim_intensity,
                p.specular_intensity,
                p.specular_shininess,
                p.halftone_intensity,
                p.outline_width,
                p.soft_shadow_intensity,
                p.color_transition_smoothness,
                p.hatching_scale,
                p.hatching_intensity,
                p.hatching_rotation,
            ];
            for v in scalars {
                assert!(v.is_finite(), "non-finite field in preset {}", tag);
                assert!(v >= 0.0, "negative field in preset {}", tag);
            }
            for c in p.rim_color {
                assert!((0.0..=1.0).contains(&c), "rim_color out of range in {}", tag);
            }
            assert!(p.specular_shininess > 0.0);
            assert!(p.hatching_scale > 0.0);
        }
    }

    #[test]
    fn test_preset_serde_round_trip() {
        let json = serde_json::to_string(lookup("metal")).unwrap();
        let back: MaterialPreset = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, lookup("metal"));
    }
}
