//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for stackparams operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for stackparams operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// General configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// A safe was constructed without its shared secret
    #[error("configuration error: required `key` is unset for safe `{safe}`")]
    MissingKey { safe: String },

    /// No safe variant is known under the requested type name
    #[error("configuration error: unknown safe type `{name}`")]
    UnknownSafe { name: String },

    /// No registered resolver matches the requested name
    #[error("configuration error: unknown resolver requested `{name}` (registered: {})", .known.join(", "))]
    UnknownResolver { name: String, known: Vec<String> },

    /// Attempted to register a resolver without a usable type name
    #[error("configuration error: unnamed resolvers are not supported")]
    UnnamedResolver,

    /// More than one file matched where exactly one was expected
    #[error("configuration error: multiple matches encountered for `{name}` ({})", format_paths(.paths))]
    AmbiguousMatch { name: String, paths: Vec<PathBuf> },

    /// An envelope is missing a required field or carries an undecodable one
    #[error("malformed envelope: field `{field}` {message}")]
    MalformedEnvelope { field: String, message: String },

    /// A resolver's backing store does not hold the requested key
    #[error("resolver `{resolver}` could not find `{key}`")]
    NotFound { resolver: String, key: String },

    /// A provided trait method was not overridden by its implementation
    #[error("`{operation}` is not implemented")]
    NotImplemented { operation: String },

    /// Encryption or decryption failures
    #[error("failed to {operation}: {message}")]
    Crypto { operation: String, message: String },

    /// Command execution errors
    #[error("{}", format_command_error(.command, .args, .message, .exit_code))]
    CommandExecution {
        command: String,
        args: Vec<String>,
        message: String,
        exit_code: Option<i32>,
    },

    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Decoding or encoding a document in a non-JSON format
    #[error("{format} error: {message}")]
    Decode { format: String, message: String },
}

impl Error {
    /// Whether this error belongs to the configuration family
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration { .. }
                | Error::MissingKey { .. }
                | Error::UnknownSafe { .. }
                | Error::UnknownResolver { .. }
                | Error::UnnamedResolver
                | Error::AmbiguousMatch { .. }
        )
    }
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_command_error(
    command: &str,
    args: &[String],
    message: &str,
    exit_code: &Option<i32>,
) -> String {
    let args_str = args.join(" ");
    let invocation = if args_str.is_empty() {
        command.to_string()
    } else {
        format!("{command} {args_str}")
    };
    match exit_code {
        Some(code) => format!("command '{invocation}' failed with exit code {code}: {message}"),
        None => format!("command '{invocation}' failed: {message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_family() {
        assert!(Error::missing_key("ssl").is_configuration());
        assert!(Error::unknown_safe("vault").is_configuration());
        assert!(Error::unknown_resolver("nope", vec![]).is_configuration());
        assert!(Error::UnnamedResolver.is_configuration());
        assert!(!Error::malformed_envelope("iv").is_configuration());
        assert!(!Error::not_found("env", "X").is_configuration());
        assert!(!Error::not_implemented("lock").is_configuration());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::malformed_envelope("salt").to_string(),
            "malformed envelope: field `salt` is required"
        );
        assert_eq!(
            Error::command_execution("aws", vec!["ssm".into()], "boom", Some(255)).to_string(),
            "command 'aws ssm' failed with exit code 255: boom"
        );
        assert_eq!(
            Error::unknown_resolver("nope", vec!["env".into(), "command".into()]).to_string(),
            "configuration error: unknown resolver requested `nope` (registered: env, command)"
        );
    }
}
