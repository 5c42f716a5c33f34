//! Builder methods for creating errors with context

use super::types::Error;
use std::path::PathBuf;

// Helper methods for creating errors with context
impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create a missing key error for the named safe
    #[must_use]
    pub fn missing_key(safe: impl Into<String>) -> Self {
        Error::MissingKey { safe: safe.into() }
    }

    /// Create an unknown safe type error
    #[must_use]
    pub fn unknown_safe(name: impl Into<String>) -> Self {
        Error::UnknownSafe { name: name.into() }
    }

    /// Create an unknown resolver error listing what is registered
    #[must_use]
    pub fn unknown_resolver(name: impl Into<String>, known: Vec<String>) -> Self {
        Error::UnknownResolver {
            name: name.into(),
            known,
        }
    }

    /// Create an ambiguous match error
    #[must_use]
    pub fn ambiguous_match(name: impl Into<String>, paths: Vec<PathBuf>) -> Self {
        Error::AmbiguousMatch {
            name: name.into(),
            paths,
        }
    }

    /// Create an error for an envelope field that is absent
    #[must_use]
    pub fn malformed_envelope(field: impl Into<String>) -> Self {
        Error::MalformedEnvelope {
            field: field.into(),
            message: "is required".to_string(),
        }
    }

    /// Create an error for an envelope field that cannot be decoded
    #[must_use]
    pub fn invalid_envelope_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::MalformedEnvelope {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a resolver lookup miss
    #[must_use]
    pub fn not_found(resolver: impl Into<String>, key: impl Into<String>) -> Self {
        Error::NotFound {
            resolver: resolver.into(),
            key: key.into(),
        }
    }

    /// Create a not implemented error
    #[must_use]
    pub fn not_implemented(operation: impl Into<String>) -> Self {
        Error::NotImplemented {
            operation: operation.into(),
        }
    }

    /// Create a crypto error
    #[must_use]
    pub fn crypto(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Crypto {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a command execution error
    #[must_use]
    pub fn command_execution(
        command: impl Into<String>,
        args: Vec<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Error::CommandExecution {
            command: command.into(),
            args,
            message: message.into(),
            exit_code,
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a decode error for the given document format
    #[must_use]
    pub fn decode(format: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Decode {
            format: format.into(),
            message: message.into(),
        }
    }
}
