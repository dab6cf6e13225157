//! Placard error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported style code: {0}")]
    InvalidStyleCode(i32),

    #[error("interaction state out of range: {0}")]
    InvalidState(i32),

    #[error("missing geometry: {0}")]
    MissingGeometry(&'static str),

    #[error("unsupported font attribute: {0}")]
    InvalidAttribute(String),

    #[error("no fonts registered")]
    NoFonts,

    #[error("failed to load font {path:?}: {reason}")]
    FontLoad { path: PathBuf, reason: String },

    #[error("failed to load image {path:?}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
