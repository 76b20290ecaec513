//! Deterministic PNG export for preview renders.
//!
//! Fixed compression and filter settings so the same framebuffer always
//! encodes to byte-identical output, which keeps preview hashes stable.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use thiserror::Error;

use crate::preview::Framebuffer;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    pub compression: Compression,
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            // No filtering: maximum determinism across encoder versions.
            filter: FilterType::NoFilter,
        }
    }
}

/// Encode a framebuffer as RGBA PNG bytes.
pub fn encode_rgba(framebuffer: &Framebuffer, config: &PngConfig) -> Result<Vec<u8>, PngError> {
    let mut bytes = Vec::new();
    write_rgba_to_writer(framebuffer, &mut bytes, config)?;
    Ok(bytes)
}

/// Write a framebuffer to a PNG file.
pub fn write_rgba(
    framebuffer: &Framebuffer,
    path: &Path,
    config: &PngConfig,
) -> Result<(), PngError> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    write_rgba_to_writer(framebuffer, writer, config)
}

/// Write a framebuffer to any writer.
pub fn write_rgba_to_writer<W: Write>(
    framebuffer: &Framebuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let mut encoder = Encoder::new(writer, framebuffer.width, framebuffer.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&framebuffer.to_rgba8())?;
    Ok(())
}

/// BLAKE3 content hash of encoded bytes, as lowercase hex.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn test_framebuffer() -> Framebuffer {
        let mut fb = Framebuffer::new(8, 8, Color::black());
        fb.write(3, 4, 0.5, Color::rgb(1.0, 0.5, 0.25));
        fb
    }

    #[test]
    fn test_encode_is_deterministic() {
        let fb = test_framebuffer();
        let config = PngConfig::default();
        let a = encode_rgba(&fb, &config).unwrap();
        let b = encode_rgba(&fb, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn test_hash_is_64_hex_chars() {
        let fb = test_framebuffer();
        let bytes = encode_rgba(&fb, &PngConfig::default()).unwrap();
        let hash = content_hash(&bytes);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_write_to_file_round_trips_header() {
        let fb = test_framebuffer();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.png");
        write_rgba(&fb, &path, &PngConfig::default()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // PNG signature
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}
