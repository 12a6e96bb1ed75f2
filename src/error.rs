//! Error types for Vox
//!
//! All modules use `VoxResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Vox operations
pub type VoxResult<T> = Result<T, VoxError>;

/// All errors that can occur in Vox
#[derive(Error, Debug)]
pub enum VoxError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bot token not set")]
    TokenMissing,

    // Handle cache errors
    #[error("Failed to read handle cache {path}: {source}")]
    CacheUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Handle cache {path} is malformed: {source}")]
    CacheMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write handle cache {path}: {reason}")]
    CacheUnwritable { path: PathBuf, reason: String },

    // Remote service errors
    #[error("{method} rejected by remote service: {description}")]
    Api { method: String, description: String },

    #[error("{method} request failed: {reason}")]
    Http { method: String, reason: String },

    #[error("{method} returned no file handle")]
    MissingHandle { method: String },

    // Resource errors
    #[error("Resource not found: {0}")]
    ResourceNotFound(PathBuf),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl VoxError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an HTTP transport error for a remote method
    pub fn http(method: impl Into<String>, reason: impl ToString) -> Self {
        Self::Http {
            method: method.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::TokenMissing => Some("Set BOT_TOKEN in the environment or a .env file, or pass --token"),
            Self::CacheMalformed { .. } => Some("Run: vox cache clear"),
            Self::ResourceNotFound(_) => Some("Check voice.resource in: vox config show"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = VoxError::Api {
            method: "sendVoice".to_string(),
            description: "Bad Request: wrong file identifier".to_string(),
        };
        assert!(err.to_string().contains("sendVoice rejected"));
    }

    #[test]
    fn error_hint() {
        assert!(VoxError::TokenMissing.hint().unwrap().contains("BOT_TOKEN"));
        assert_eq!(VoxError::Internal("x".to_string()).hint(), None);
    }

    #[test]
    fn error_retryable() {
        assert!(VoxError::http("getUpdates", "connection reset").is_retryable());
        assert!(!VoxError::TokenMissing.is_retryable());
    }
}
