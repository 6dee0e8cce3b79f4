use crate::{Config, WeatherSnapshot, provider::backend::BackendSource};
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod backend;

/// Message used when the backend fails without saying why.
pub const GENERIC_FAILURE: &str = "Backend weather service unavailable.";

/// Why a fetch failed. The kinds only matter for diagnostics: every one of
/// them is shown to the user as its message.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the transport failed.
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The body was not a valid snapshot.
    #[error("Failed to parse weather response: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Http { .. } => "http",
            FetchError::Parse(_) => "parse",
        }
    }

    /// Build an HTTP error from a response body, falling back to the
    /// generic message when the body is blank.
    pub fn from_response(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() { GENERIC_FAILURE.to_string() } else { body.to_string() };
        FetchError::Http { status, message }
    }
}

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Fetch a snapshot for a non-empty, trimmed city name.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;

    /// Whether the backend reports itself healthy.
    async fn is_healthy(&self) -> bool;
}

/// Construct the backend source described by the config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherSource>> {
    let source = BackendSource::new(config.api_base(), config.timeout())?;
    Ok(Box::new(source))
}
