//! Error types for AIorNot API operations.
//!
//! API-side failures (4xx/5xx) carry the HTTP status code and, where the
//! server returned structured JSON, the parsed error body. Transport
//! timeouts and local file problems are separate variants so callers can
//! tell a slow service from a bad request.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all AIorNot operations.
#[derive(Error, Debug)]
pub enum AiornotError {
    /// 401 - invalid or missing API key
    #[error("[{status}] {message}")]
    Authentication {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// 422 - the server rejected the request payload
    #[error("[{status}] {message}")]
    Validation {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// 429 - rate limit exceeded
    #[error("[{status}] {message}")]
    RateLimit {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// 5xx - server-side failure
    #[error("[{status}] {message}")]
    Server {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// Any other non-2xx response
    #[error("[{status}] {message}")]
    Api {
        status: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// The transport deadline elapsed before the service responded
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Network failure that never produced an HTTP status
    #[error("transport error: {0}")]
    Transport(String),

    /// Local file or directory missing or unreadable
    #[error("{message}")]
    File { path: PathBuf, message: String },

    /// A 2xx body that does not match the expected schema
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Runtime construction failed in the blocking facade
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Client misconfiguration (no API key available)
    #[error("{0}")]
    Config(String),
}

impl AiornotError {
    /// Stable snake_case tag for this error's taxonomy kind, used in
    /// JSONL batch records.
    pub fn kind(&self) -> &'static str {
        match self {
            AiornotError::Authentication { .. } => "authentication",
            AiornotError::Validation { .. } => "validation",
            AiornotError::RateLimit { .. } => "rate_limit",
            AiornotError::Server { .. } => "server",
            AiornotError::Api { .. } => "api",
            AiornotError::Timeout(_) => "timeout",
            AiornotError::Transport(_) => "transport",
            AiornotError::File { .. } => "file",
            AiornotError::Decode(_) => "decode",
            AiornotError::Runtime(_) => "runtime",
            AiornotError::Config(_) => "config",
        }
    }

    /// HTTP status code, for the API-side variants.
    pub fn status(&self) -> Option<u16> {
        match self {
            AiornotError::Authentication { status, .. }
            | AiornotError::Validation { status, .. }
            | AiornotError::RateLimit { status, .. }
            | AiornotError::Server { status, .. }
            | AiornotError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed server error body, where one was returned.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            AiornotError::Authentication { body, .. }
            | AiornotError::Validation { body, .. }
            | AiornotError::RateLimit { body, .. }
            | AiornotError::Server { body, .. }
            | AiornotError::Api { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn file_not_found(path: &std::path::Path) -> Self {
        AiornotError::File {
            path: path.to_path_buf(),
            message: format!("File not found: {}", path.display()),
        }
    }

    pub(crate) fn dir_not_found(path: &std::path::Path) -> Self {
        AiornotError::File {
            path: path.to_path_buf(),
            message: format!("Directory not found: {}", path.display()),
        }
    }
}

/// Convenience type alias for AIorNot results.
pub type Result<T> = std::result::Result<T, AiornotError>;
