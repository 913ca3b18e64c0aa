// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for robofixture.
//!
//! Errors fall into three groups:
//! - I/O and container failures (fatal, the output is invalid)
//! - Encoding failures (a value does not fit the codec's schema)
//! - Configuration failures (detected before any file is opened)
//!
//! A broken built-in schema catalog is reported separately as
//! [`FixtureError::Catalog`].

use thiserror::Error;

/// Errors that can occur while generating fixtures.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// Output file could not be created, written, or finalized
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container writer failure
    #[error("MCAP error: {0}")]
    Container(#[from] mcap::McapError),

    /// A value cannot be represented by the codec's schema
    #[error("{codec} encode error: {message}")]
    Encode {
        /// Codec context (e.g., "CDR", "Protobuf", "ROS1")
        codec: String,
        /// Error message
        message: String,
    },

    /// A payload could not be read back
    #[error("{codec} decode error: {message}")]
    Decode {
        /// Codec context
        codec: String,
        /// Error message
        message: String,
    },

    /// A built-in schema could not be loaded or disagrees with the value model
    #[error("Schema catalog error in {schema}: {message}")]
    Catalog {
        /// Schema name or codec the entry belongs to
        schema: String,
        /// Error message
        message: String,
    },

    /// Payload ended before a read completed
    #[error("Buffer too short: requested {requested} bytes at position {position}, but only {available} bytes available")]
    BufferTooShort {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Read position when error occurred
        position: usize,
    },

    /// Invalid run configuration
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// Offending option
        field: String,
        /// Validation error message
        reason: String,
    },

    /// Operation not supported in the current state
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl FixtureError {
    /// Create an encode error.
    pub fn encode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        FixtureError::Encode {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(codec: impl Into<String>, message: impl Into<String>) -> Self {
        FixtureError::Decode {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a schema catalog error.
    pub fn catalog(schema: impl Into<String>, message: impl Into<String>) -> Self {
        FixtureError::Catalog {
            schema: schema.into(),
            message: message.into(),
        }
    }

    /// Create a buffer too short error.
    pub fn buffer_too_short(requested: usize, available: usize, position: usize) -> Self {
        FixtureError::BufferTooShort {
            requested,
            available,
            position,
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FixtureError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an unsupported operation error.
    pub fn unsupported(what: impl Into<String>) -> Self {
        FixtureError::Unsupported(what.into())
    }

    /// Whether this error was raised before any output was produced.
    pub fn is_config(&self) -> bool {
        matches!(self, FixtureError::InvalidConfig { .. })
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            FixtureError::Io(e) => vec![("kind", format!("{:?}", e.kind())), ("message", e.to_string())],
            FixtureError::Container(e) => vec![("message", e.to_string())],
            FixtureError::Encode { codec, message } | FixtureError::Decode { codec, message } => {
                vec![("codec", codec.clone()), ("message", message.clone())]
            }
            FixtureError::Catalog { schema, message } => {
                vec![("schema", schema.clone()), ("message", message.clone())]
            }
            FixtureError::BufferTooShort {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            FixtureError::InvalidConfig { field, reason } => {
                vec![("field", field.clone()), ("reason", reason.clone())]
            }
            FixtureError::Unsupported(what) => vec![("feature", what.clone())],
        }
    }
}

/// Result type for robofixture operations.
pub type Result<T> = std::result::Result<T, FixtureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error() {
        let err = FixtureError::encode("CDR", "seconds out of range");
        assert!(matches!(err, FixtureError::Encode { .. }));
        assert_eq!(err.to_string(), "CDR encode error: seconds out of range");
    }

    #[test]
    fn test_decode_error() {
        let err = FixtureError::decode("ROS1", "trailing bytes");
        assert_eq!(err.to_string(), "ROS1 decode error: trailing bytes");
    }

    #[test]
    fn test_catalog_error() {
        let err = FixtureError::catalog("foxglove.Log", "message not in descriptor set");
        assert!(!err.is_config());
        assert_eq!(
            err.to_string(),
            "Schema catalog error in foxglove.Log: message not in descriptor set"
        );
        assert_eq!(err.log_fields()[0], ("schema", "foxglove.Log".to_string()));
    }

    #[test]
    fn test_buffer_too_short_error() {
        let err = FixtureError::buffer_too_short(8, 3, 12);
        assert_eq!(
            err.to_string(),
            "Buffer too short: requested 8 bytes at position 12, but only 3 bytes available"
        );
    }

    #[test]
    fn test_invalid_config_error() {
        let err = FixtureError::invalid_config("topic_prefix", "must start with '/'");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'topic_prefix': must start with '/'"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FixtureError = io_err.into();
        assert!(matches!(err, FixtureError::Io(_)));
        assert!(!err.is_config());
        assert_eq!(err.to_string(), "I/O error: file not found");
    }

    #[test]
    fn test_log_fields_encode_error() {
        let err = FixtureError::encode("Protobuf", "error");
        let fields = err.log_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], ("codec", "Protobuf".to_string()));
        assert_eq!(fields[1], ("message", "error".to_string()));
    }

    #[test]
    fn test_log_fields_buffer_too_short() {
        let fields = FixtureError::buffer_too_short(100, 50, 10).log_fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].1, "100");
        assert_eq!(fields[1].1, "50");
        assert_eq!(fields[2].1, "10");
    }

    #[test]
    fn test_log_fields_invalid_config() {
        let fields = FixtureError::invalid_config("chunk_size", "must be positive").log_fields();
        assert_eq!(fields[0], ("field", "chunk_size".to_string()));
        assert_eq!(fields[1], ("reason", "must be positive".to_string()));
    }
}
