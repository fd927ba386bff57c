//! Centralized error types and conversions for deeplucid
//!
//! This module provides structured error types using `thiserror` for library code.
//! The binary and config loader use `anyhow` for easy context.

use std::path::PathBuf;
use thiserror::Error;

/// JSON-RPC 2.0 error codes used by the protocol layer
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Global error type for deeplucid operations
#[derive(Error, Debug)]
pub enum LucidError {
    /// IO errors with path context
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or unknown request (bad resource URI, missing session data)
    #[error("{message}")]
    InvalidRequest { message: String },

    /// Tool or method arguments failed validation
    #[error("{message}")]
    InvalidParams { message: String },

    /// Unknown JSON-RPC method or tool
    #[error("{message}")]
    MethodNotFound { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Unexpected failure while handling a request
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LucidError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::MethodNotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// JSON-RPC error code reported to the client
    pub fn json_rpc_code(&self) -> i32 {
        match self {
            LucidError::InvalidRequest { .. } => codes::INVALID_REQUEST,
            LucidError::InvalidParams { .. } => codes::INVALID_PARAMS,
            LucidError::MethodNotFound { .. } => codes::METHOD_NOT_FOUND,
            LucidError::Serialization { .. } => codes::PARSE_ERROR,
            LucidError::Io { .. } | LucidError::Internal { .. } => codes::INTERNAL_ERROR,
        }
    }

    /// Returns true if the server can keep serving after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Client mistakes only affect the one request
            LucidError::InvalidRequest { .. } => true,
            LucidError::InvalidParams { .. } => true,
            LucidError::MethodNotFound { .. } => true,
            LucidError::Serialization { .. } => true,
            LucidError::Internal { .. } => true,
            // stdio failures end the session with the client
            LucidError::Io { .. } => false,
        }
    }

    /// Returns the error severity level for logging
    pub fn severity(&self) -> tracing::Level {
        match self {
            LucidError::Io { .. } => tracing::Level::ERROR,
            LucidError::Internal { .. } => tracing::Level::ERROR,
            LucidError::Serialization { .. } => tracing::Level::WARN,
            LucidError::InvalidRequest { .. } => tracing::Level::INFO,
            LucidError::InvalidParams { .. } => tracing::Level::INFO,
            LucidError::MethodNotFound { .. } => tracing::Level::INFO,
        }
    }
}

/// Result type alias using LucidError
pub type Result<T> = std::result::Result<T, LucidError>;

impl From<std::io::Error> for LucidError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<stdio>"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for LucidError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
