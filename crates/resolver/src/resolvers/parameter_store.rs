use super::{key_from_input, trimmed_stdout};
use crate::executor::CommandExecutor;
use crate::resolver::Resolver;
use serde_json::Value;
use stackparams_core::{Error, Result};
use std::sync::Arc;
use tracing::debug;

const AWS_CLI: &str = "aws";
const NOT_FOUND_MARKER: &str = "ParameterNotFound";

/// Fetches decrypted values from AWS Systems Manager Parameter Store via the
/// `aws` CLI
pub struct ParameterStoreResolver {
    executor: Arc<dyn CommandExecutor>,
}

impl ParameterStoreResolver {
    pub const NAME: &'static str = "Resolvers::ParameterStore";

    #[must_use]
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    fn arguments(name: &str) -> Vec<String> {
        [
            "ssm",
            "get-parameter",
            "--name",
            name,
            "--with-decryption",
            "--query",
            "Parameter.Value",
            "--output",
            "text",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
    }
}

impl Resolver for ParameterStoreResolver {
    fn setup(&mut self) -> Result<()> {
        if self.executor.command_exists(AWS_CLI) {
            Ok(())
        } else {
            Err(Error::configuration(
                "parameter store resolver requires the `aws` CLI on PATH",
            ))
        }
    }

    fn resolve(&self, input: &Value) -> Result<Value> {
        let name = key_from_input("parameter_store", input)?;
        let args = Self::arguments(&name);

        debug!(parameter = %name, "resolving from parameter store");
        let output = self.executor.execute(AWS_CLI, &args)?;
        if output.status.success() {
            return Ok(Value::String(trimmed_stdout(&output)));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains(NOT_FOUND_MARKER) {
            return Err(Error::not_found("parameter_store", name));
        }
        Err(Error::command_execution(
            AWS_CLI,
            args,
            stderr.trim().to_string(),
            output.status.code(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::TestCommandExecutor;
    use serde_json::json;

    const GET: [&str; 9] = [
        "ssm",
        "get-parameter",
        "--name",
        "/prod/db/password",
        "--with-decryption",
        "--query",
        "Parameter.Value",
        "--output",
        "text",
    ];

    #[test]
    fn test_setup_requires_cli() {
        let executor = TestCommandExecutor::new();
        executor.mark_missing("aws");
        let mut resolver = ParameterStoreResolver::new(Arc::new(executor));
        assert!(resolver.setup().unwrap_err().is_configuration());
    }

    #[test]
    fn test_resolves_value() {
        let executor = TestCommandExecutor::new();
        executor.add_simple_response("aws", &GET, "hunter2\n");
        let mut resolver = ParameterStoreResolver::new(Arc::new(executor));
        resolver.setup().unwrap();

        assert_eq!(
            resolver.resolve(&json!("/prod/db/password")).unwrap(),
            json!("hunter2")
        );
    }

    #[test]
    fn test_missing_parameter() {
        let executor = TestCommandExecutor::new();
        executor.add_error_response(
            "aws",
            &GET,
            "An error occurred (ParameterNotFound) when calling the GetParameter operation",
        );
        let resolver = ParameterStoreResolver::new(Arc::new(executor));

        let err = resolver
            .resolve(&json!({"name": "/prod/db/password"}))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { ref resolver, .. } if resolver == "parameter_store"));
    }

    #[test]
    fn test_other_failures_are_transport_errors() {
        let executor = TestCommandExecutor::new();
        executor.add_error_response("aws", &GET, "Unable to locate credentials");
        let resolver = ParameterStoreResolver::new(Arc::new(executor));

        let err = resolver.resolve(&json!("/prod/db/password")).unwrap_err();
        assert!(matches!(err, Error::CommandExecution { .. }));
    }
}
