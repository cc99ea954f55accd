//! Error types for the Resumate client.

use thiserror::Error;

/// Message shown to the user for any transport failure.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// A shared error type for the entire Resumate client.
///
/// The first four variants form the user-facing taxonomy of the client:
/// input rejected before any I/O, credentials rejected by the server,
/// transport failures, and unsupported uploads. The remaining variants cover
/// local storage and configuration faults.
#[derive(Error, Debug, Clone)]
pub enum ResumateError {
    /// Client-side input rejected before any I/O.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Server rejected credentials, registration, or an authorized call.
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Transport failure (timeout, DNS, connection reset).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Selected resume file is not a PDF or plain-text file.
    #[error("Unsupported file type: {file_name}")]
    InvalidFileType { file_name: String },

    /// An operation of the same kind is already in flight.
    #[error("{operation} already in progress")]
    Busy { operation: &'static str },

    /// Server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResumateError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn invalid_file_type(file_name: impl Into<String>) -> Self {
        Self::InvalidFileType {
            file_name: file_name.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

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

    /// Creates a Migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    pub fn is_invalid_file_type(&self) -> bool {
        matches!(self, Self::InvalidFileType { .. })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Returns the message to show the user for this error.
    ///
    /// Validation and auth messages are shown verbatim. Transport failures
    /// always map to a generic message; the detail stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message } | Self::Auth { message } => message.clone(),
            Self::Network { .. } => NETWORK_ERROR_MESSAGE.to_string(),
            Self::InvalidFileType { .. } => "Please upload a PDF or TXT file.".to_string(),
            Self::Busy { operation } => format!("{operation} already in progress. Please wait."),
            Self::Api { status, message } => format!("API error {status}: {message}"),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ResumateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ResumateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ResumateError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ResumateError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for ResumateError {
    fn from(err: version_migrate::MigrationError) -> Self {
        use version_migrate::MigrationError;

        match err {
            MigrationError::DeserializationError(_) | MigrationError::SerializationError(_) => {
                Self::Serialization {
                    format: "migration".to_string(),
                    message: err.to_string(),
                }
            }
            _ => Self::Migration(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, ResumateError>`.
pub type Result<T> = std::result::Result<T, ResumateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_hides_detail_from_user() {
        let err = ResumateError::network("dns lookup failed for api.example.com");
        assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
        assert!(err.to_string().contains("dns lookup failed"));
    }

    #[test]
    fn test_auth_and_validation_messages_are_verbatim() {
        assert_eq!(ResumateError::auth("bad creds").user_message(), "bad creds");
        assert_eq!(
            ResumateError::validation("Passwords do not match").user_message(),
            "Passwords do not match"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ResumateError = io.into();
        assert!(matches!(err, ResumateError::Io { .. }));
    }
}
