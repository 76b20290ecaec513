//! Error types for material validation and processing.

use thiserror::Error;

/// Error codes for material validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Parameter errors (E101-E109)
    /// E101: Value outside its allowed range
    ValueOutOfRange,
    /// E102: Value is NaN or infinite
    ValueNotFinite,
    /// E103: Specular shininess must be positive
    NonPositiveShininess,
    /// E104: Band count must be at least 1
    ZeroSteps,
    /// E105: Pattern scale must be positive
    NonPositiveScale,
    /// E106: Room half-extents must be positive
    NonPositiveExtent,

    // Document errors (E110-E119)
    /// E110: Material document could not be parsed
    MalformedDocument,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E101").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::ValueOutOfRange => "E101",
            ErrorCode::ValueNotFinite => "E102",
            ErrorCode::NonPositiveShininess => "E103",
            ErrorCode::ZeroSteps => "E104",
            ErrorCode::NonPositiveScale => "E105",
            ErrorCode::NonPositiveExtent => "E106",
            ErrorCode::MalformedDocument => "E110",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and the offending field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Dotted path of the field that failed (e.g., "preset.rim_intensity").
    pub field: String,
}

impl ValidationError {
    pub fn new(code: ErrorCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: field.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.code, self.field, self.message)
    }
}

/// Outcome of validating a material document or uniform set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}

/// Errors from loading or constructing a material.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("failed to parse material document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("material validation failed: {0} error(s)")]
    Invalid(usize),
}
