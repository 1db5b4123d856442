//! Error types for the memchat client

use std::time::Duration;
use thiserror::Error;

/// Result type alias for memchat operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not logged in. Run `memchat login` first.")]
    NotAuthenticated,

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl Error {
    /// True when the backend rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(ApiError::Unauthorized))
    }

    /// Server-provided detail message, if the error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Api(api) => api.detail(),
            _ => None,
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Session expired or invalid. Run `memchat login` to sign in again.")]
    Unauthorized,

    #[error("The chat backend refused this request: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Throttled. `message` is the server's text, or a retry hint when it
    /// sent none.
    #[error("{message}")]
    RateLimit {
        retry_after: Duration,
        message: String,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// A failing status with no dedicated variant
    #[error("Unexpected response ({status}): {detail}")]
    Unexpected { status: u16, detail: String },
}

impl ApiError {
    /// The message the backend sent along with a failing status, if any.
    ///
    /// Network and decoding failures have no server detail; callers fall back
    /// to a generic message for those.
    pub fn detail(&self) -> Option<&str> {
        let msg = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::ServerError(msg)
            | ApiError::Forbidden(msg) => msg,
            ApiError::RateLimit { message, .. } => message,
            ApiError::Unexpected { detail, .. } => detail,
            _ => return None,
        };
        let msg = msg.trim();
        if msg.is_empty() { None } else { Some(msg) }
    }

    /// Build a 429 error, keeping the server's message when it sent one
    pub fn rate_limited(retry_after: Duration, detail: String) -> Self {
        let message = if detail.trim().is_empty() {
            format!("Too many requests. Try again in {}s.", retry_after.as_secs())
        } else {
            detail
        };
        ApiError::RateLimit {
            retry_after,
            message,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "the chat backend did not answer in time".to_string()
        } else if err.is_connect() {
            "could not reach the chat backend".to_string()
        } else if err.is_decode() {
            return ApiError::InvalidResponse(err.to_string());
        } else {
            err.to_string()
        };
        ApiError::Network(reason)
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No config file at the given location.")]
    NotFound,

    #[error("Config file is not valid YAML: {0}")]
    ParseError(String),

    #[error("Unusable configuration: {0}")]
    Invalid(String),

    #[error("Could not write config file: {0}")]
    SaveError(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
