pub mod client;
pub mod config;
pub mod directory;
pub mod duration;
pub mod mcp;
pub mod metrics;
pub mod models;
pub mod server;
pub mod silence;
pub mod tools;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("HTTP error for {method} {path}: {message}")]
    Transport {
        method: String,
        path: String,
        status: Option<u16>,
        message: String,
    },
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid duration format: {0}")]
    InvalidDuration(String),
}

impl Error {
    /// Stable tag for the failure category, surfaced to callers next to the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "configuration_error",
            Error::Transport { .. } => "transport_error",
            Error::NotFound(_) => "not_found",
            Error::InvalidDuration(_) => "invalid_duration",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
