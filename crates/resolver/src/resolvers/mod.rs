//! Resolvers that ship with stackparams

mod command;
mod env;
mod parameter_store;

pub use command::CommandResolver;
pub use env::EnvResolver;
pub use parameter_store::ParameterStoreResolver;

use serde_json::Value;
use stackparams_core::{Error, Result};
use std::process::Output;

/// Key named by a resolver input: either a bare string or `{name: ..}`
fn key_from_input(resolver: &str, input: &Value) -> Result<String> {
    match input {
        Value::String(name) if !name.is_empty() => Ok(name.clone()),
        Value::Object(fields) => match fields.get("name") {
            Some(Value::String(name)) if !name.is_empty() => Ok(name.clone()),
            _ => Err(Error::configuration(format!(
                "resolver `{resolver}` requires a `name` field"
            ))),
        },
        other => Err(Error::configuration(format!(
            "resolver `{resolver}` expects a name, got {other}"
        ))),
    }
}

fn trimmed_stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .trim_end_matches(['\r', '\n'])
        .to_string()
}
