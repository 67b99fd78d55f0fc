//! Error types for the Docent application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Docent application.
///
/// Variants follow the failure taxonomy of a chat turn: configuration problems
/// (missing credential, missing document), document I/O and decoding, and
/// remote-call failures. Callers can branch on [`DocentError::kind`] instead of
/// matching on message text.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocentError {
    /// No API key could be resolved from any source
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// No context document is loaded (or it is empty)
    #[error("Missing context document")]
    MissingDocument,

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Document bytes could not be decoded (PDF parsing, UTF-8)
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Uploaded file has an extension outside the accepted set
    #[error("Unsupported upload: {0}")]
    UnsupportedUpload(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Access-gate error (upload attempted without admin rights)
    #[error("Security error: {0}")]
    Security(String),

    /// Remote model call failed (network, quota, safety block)
    #[error("{message}")]
    Remote {
        status_code: Option<u16>,
        message: String,
    },

    /// Prompt template could not be rendered
    #[error("Template error: {0}")]
    Template(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification used by front ends to pick a message style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credential or document missing, bad settings, access denied.
    Configuration,
    /// Reading or decoding a document failed.
    Document,
    /// The remote model call failed.
    Remote,
    /// Anything else.
    Internal,
}

impl DocentError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MissingCredential error naming the credential
    pub fn missing_credential(name: impl Into<String>) -> Self {
        Self::MissingCredential(name.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Security error
    pub fn security(message: impl Into<String>) -> Self {
        Self::Security(message.into())
    }

    /// Creates a Remote error
    pub fn remote(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status_code,
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingCredential(_)
            | Self::MissingDocument
            | Self::Config(_)
            | Self::Security(_)
            | Self::UnsupportedUpload(_) => ErrorKind::Configuration,
            Self::Io { .. } | Self::Decode { .. } => ErrorKind::Document,
            Self::Remote { .. } => ErrorKind::Remote,
            Self::Serialization { .. } | Self::Template(_) | Self::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Check if this is a configuration-class error
    pub fn is_config(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Check if this is an IO or decode error
    pub fn is_io(&self) -> bool {
        self.kind() == ErrorKind::Document
    }

    /// Check if this is a remote-call error
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DocentError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<std::string::FromUtf8Error> for DocentError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Decode {
            message: format!("invalid UTF-8: {err}"),
        }
    }
}

impl From<serde_json::Error> for DocentError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DocentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DocentError>`.
pub type Result<T> = std::result::Result<T, DocentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            DocentError::missing_credential("GOOGLE_API_KEY").kind(),
            ErrorKind::Configuration
        );
        assert_eq!(DocentError::MissingDocument.kind(), ErrorKind::Configuration);
        assert_eq!(DocentError::io("boom").kind(), ErrorKind::Document);
        assert_eq!(DocentError::decode("bad pdf").kind(), ErrorKind::Document);
        assert_eq!(DocentError::remote(Some(429), "quota").kind(), ErrorKind::Remote);
        assert_eq!(DocentError::internal("x").kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: DocentError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_utf8_error_becomes_decode() {
        let err: DocentError = String::from_utf8(vec![0xff, 0xfe]).unwrap_err().into();
        assert!(matches!(err, DocentError::Decode { .. }));
    }

    #[test]
    fn test_toml_parse_error_is_serialization() {
        let err: DocentError = toml::from_str::<toml::Value>("model = ").unwrap_err().into();
        assert!(matches!(err, DocentError::Serialization { ref format, .. } if format == "TOML"));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_remote_display_is_bare_message() {
        let err = DocentError::remote(Some(503), "UNAVAILABLE: try later");
        assert_eq!(err.to_string(), "UNAVAILABLE: try later");
        assert!(err.is_remote());
        assert!(!err.is_config());
    }
}
