//! Error types for the Sarathi client.

use thiserror::Error;

/// A shared error type for the local side of the application: storage,
/// configuration and other infrastructure concerns.
///
/// Remote API failures are deliberately not part of this enum; they carry
/// their own classification in [`ApiError`].
#[derive(Error, Debug, Clone)]
pub enum SarathiError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SarathiError {
    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for SarathiError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SarathiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SarathiError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SarathiError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SarathiError>`.
pub type Result<T> = std::result::Result<T, SarathiError>;

/// Classified failure of a remote API call.
///
/// Every HTTP interaction collapses its failure modes into exactly one of
/// these buckets, so callers can decide on wording without re-inspecting
/// status codes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server could not be reached at all (refused, DNS, timeout).
    #[error("Cannot reach the server")]
    Unreachable,

    /// The server rejected the credentials or token (HTTP 401).
    #[error("Unauthorized (status {status})")]
    Unauthorized { status: u16 },

    /// The server itself failed (HTTP 5xx).
    #[error("Server fault (status {status})")]
    ServerFault { status: u16 },

    /// Anything that fits none of the buckets above.
    #[error("Request failed: {message}")]
    Unclassified {
        status: Option<u16>,
        message: String,
    },
}

impl ApiError {
    /// Buckets a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 => Self::Unauthorized { status },
            s if s >= 500 => Self::ServerFault { status },
            s => Self::Unclassified {
                status: Some(s),
                message: message.into(),
            },
        }
    }

    /// The HTTP status behind this failure, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unreachable => None,
            Self::Unauthorized { status } | Self::ServerFault { status } => Some(*status),
            Self::Unclassified { status, .. } => *status,
        }
    }

    /// Check if this is an authentication rejection
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Check if the server was unreachable
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }
}
