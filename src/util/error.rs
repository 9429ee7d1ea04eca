//! Error types for the export library.

use thiserror::Error;

/// Main error type for export operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Cache lookup for a key that was never added
    #[error("Cache miss in '{cache}': no entry for key {key}")]
    CacheMiss { cache: String, key: String },

    /// Mesh data inconsistent (bad indices, corner/loop mismatch, ...)
    #[error("Geometry error: {0}")]
    Geometry(String),

    /// Scene-level conversion failure
    #[error("Scene export error: {0}")]
    Scene(String),

    /// Renderer rejected the assembled property set
    #[error("Scene parse failed: {0}")]
    Parse(String),

    /// Render configuration incomplete
    #[error("Render config error: {0}")]
    Config(String),

    /// Embedded-data codec failure
    #[error("Codec error: {0}")]
    Codec(String),

    /// Base64 payload decode failure
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create a cache-miss error for the named cache and key.
    pub fn cache_miss(cache: impl Into<String>, key: impl std::fmt::Debug) -> Self {
        Self::CacheMiss {
            cache: cache.into(),
            key: format!("{:?}", key),
        }
    }

    /// Create a geometry error.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Create a scene export error.
    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a render-config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a codec error.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;
