//! Error types for the hljs-prism crate.
//!
//! Classification, normalization and assembly never fail. Errors only come
//! from the edges: loading stylesheet text and writing the finished theme.

use thiserror::Error;

/// Errors that can occur while loading a stylesheet or writing a theme.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The stylesheet text could not be parsed into rules.
    #[error("stylesheet parse error at {line}:{column}: {message}")]
    Parse {
        line: u32,
        column: u32,
        message: String,
    },

    /// The theme could not be serialized.
    #[error("theme serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The output builder rejected a fragment.
    #[error("failed to write theme output")]
    Write(#[from] std::fmt::Error),
}

/// Result type for hljs-prism operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
