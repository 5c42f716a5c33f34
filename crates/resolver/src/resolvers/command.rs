use super::trimmed_stdout;
use crate::executor::CommandExecutor;
use crate::resolver::Resolver;
use serde::Deserialize;
use serde_json::Value;
use stackparams_core::{Error, Result};
use std::sync::Arc;
use tracing::debug;

/// Input accepted by [`CommandResolver`]
#[derive(Debug, Deserialize)]
struct CommandInput {
    cmd: String,
    #[serde(default)]
    args: Vec<String>,
}

/// Runs a command and uses its trimmed standard output as the value
pub struct CommandResolver {
    executor: Arc<dyn CommandExecutor>,
}

impl CommandResolver {
    pub const NAME: &'static str = "Resolvers::Command";

    #[must_use]
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }
}

impl Resolver for CommandResolver {
    fn resolve(&self, input: &Value) -> Result<Value> {
        let input: CommandInput = serde_json::from_value(input.clone()).map_err(|e| {
            Error::configuration(format!("command resolver expects {{cmd, args}}: {e}"))
        })?;

        debug!(command = %input.cmd, args = ?input.args, "resolving from command");
        let output = self.executor.execute(&input.cmd, &input.args)?;
        if !output.status.success() {
            return Err(Error::command_execution(
                input.cmd,
                input.args,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
                output.status.code(),
            ));
        }
        Ok(Value::String(trimmed_stdout(&output)))
    }
}
