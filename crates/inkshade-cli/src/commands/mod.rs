//! CLI command implementations.

pub mod presets;
pub mod preview;
pub mod shade;
pub mod validate;

use anyhow::{Context, Result};
use inkshade_spec::MaterialSpec;

/// Load and parse a material document from disk.
pub(crate) fn load_material(path: &str) -> Result<MaterialSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read material file: {}", path))?;
    MaterialSpec::from_json(&text)
        .with_context(|| format!("failed to parse material file: {}", path))
}

/// Parse a comma-separated f64 list of fixed length.
fn parse_numbers<const N: usize>(raw: &str, flag: &str) -> Result<[f64; N]> {
    let parts: Vec<&str> = raw.split(',').collect();
    anyhow::ensure!(
        parts.len() == N,
        "{} expects {} comma-separated numbers, got {:?}",
        flag,
        N,
        raw
    );
    let mut values = [0.0; N];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{}: invalid number {:?}", flag, part))?;
    }
    Ok(values)
}

/// Parse a comma-separated f64 triple (e.g. "0.0,10.0,10.0").
pub(crate) fn parse_triple(raw: &str, flag: &str) -> Result<[f64; 3]> {
    parse_numbers::<3>(raw, flag)
}

/// Parse a comma-separated f64 pair (e.g. "512,384").
pub(crate) fn parse_pair(raw: &str, flag: &str) -> Result<[f64; 2]> {
    parse_numbers::<2>(raw, flag)
}
