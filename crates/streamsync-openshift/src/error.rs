//! OpenShift client error types

use std::path::PathBuf;
use streamsync_core::PlatformError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenShiftError {
    #[error("Invalid OpenShift URL: '{0}' (expected http:// or https://)")]
    InvalidUrl(String),

    #[error("Authentication is enabled but no token was found (checked STREAMSYNC_TOKEN and {0})")]
    TokenNotFound(PathBuf),

    #[error("Failed to read token from {path}: {source}")]
    TokenRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl From<OpenShiftError> for PlatformError {
    fn from(e: OpenShiftError) -> Self {
        PlatformError::Transport(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpenShiftError>;
