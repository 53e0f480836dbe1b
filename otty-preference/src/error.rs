use std::io;

use thiserror::Error;

/// Errors produced while building preference screens or touching the
/// persisted value store.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference store i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("preference store json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid time [{value}], expected HH:mm")]
    InvalidTime { value: String },

    #[error("unknown preference [{key}]")]
    UnknownKey { key: String },

    #[error("preference [{key}] is already defined")]
    DuplicateKey { key: String },

    #[error("preference [{key}] is not a {expected} preference")]
    VariantMismatch { key: String, expected: &'static str },
}

pub type Result<T> = std::result::Result<T, PreferenceError>;
