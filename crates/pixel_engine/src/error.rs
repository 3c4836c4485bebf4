//! Unified error types for pixel_engine

use thiserror::Error;

/// Main error type for pixel_engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Palette Errors ===
    #[error("Unknown palette: {name}")]
    UnknownPalette { name: String },

    #[error("Palette serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse int error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    // === Export Errors ===
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    #[error("{0}")]
    Generic(String),
}

impl EngineError {
    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }
}
