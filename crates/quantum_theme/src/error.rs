//! Theme error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the theme runtime
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Theme state was requested with no mounted provider on this thread
    #[error("use_theme() called outside of a ThemeProvider. Mount a ThemeProvider before reading theme state.")]
    OutsideProvider,

    /// Token tree could not be loaded
    #[error(transparent)]
    TokenLoad(#[from] TokenLoadError),
}

/// Persistence-layer failures
///
/// The runtime never propagates these; they are logged and the in-memory
/// scheme stays authoritative.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backing store cannot be used at all
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    /// I/O failure on a file-backed store
    #[error("preference storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored document is not a JSON object of strings
    #[error("preference storage corrupt at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while reading an authored token tree from disk
#[derive(Error, Debug)]
pub enum TokenLoadError {
    #[error("failed to read token file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON token tree: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML token tree: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported token file extension: {0}")]
    UnsupportedFormat(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
