//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when talking to an upstream API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The GraphQL endpoint answered with top-level `errors`.
    #[error("GraphQL error: {}", .0.join("; "))]
    GraphqlError(Vec<String>),

    /// The GraphQL response carried neither `data` nor `errors`.
    #[error("GraphQL response contained no data")]
    EmptyData,

    /// Outbound HTTP is not available on this target.
    #[error("Outbound HTTP is only available inside the Spin runtime")]
    Unsupported,

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::JsonError(e.to_string())
    }
}

/// Errors raised while loading [`StorefrontConfig`](crate::StorefrontConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting was not provided.
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    /// The config file could not be read.
    #[error("Failed to read config file {path}: {message}")]
    Io { path: String, message: String },

    /// The config file could not be parsed.
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
