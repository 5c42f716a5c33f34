use super::key_from_input;
use crate::resolver::Resolver;
use serde_json::Value;
use stackparams_core::{Error, Result};
use std::env;

/// Reads a value from the process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvResolver;

impl EnvResolver {
    pub const NAME: &'static str = "Resolvers::Env";
}

impl Resolver for EnvResolver {
    fn resolve(&self, input: &Value) -> Result<Value> {
        let name = key_from_input("env", input)?;
        env::var(&name)
            .map(Value::String)
            .map_err(|_| Error::not_found("env", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_reads_variable() {
        env::set_var("STACKPARAMS_TEST_ENV_VALUE", "from-env");
        let value = EnvResolver.resolve(&json!("STACKPARAMS_TEST_ENV_VALUE")).unwrap();
        assert_eq!(value, json!("from-env"));

        let value = EnvResolver
            .resolve(&json!({"name": "STACKPARAMS_TEST_ENV_VALUE"}))
            .unwrap();
        assert_eq!(value, json!("from-env"));
        env::remove_var("STACKPARAMS_TEST_ENV_VALUE");
    }

    #[test]
    #[serial]
    fn test_unset_variable_is_not_found() {
        env::remove_var("STACKPARAMS_TEST_ENV_UNSET");
        let err = EnvResolver
            .resolve(&json!("STACKPARAMS_TEST_ENV_UNSET"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { ref key, .. } if key == "STACKPARAMS_TEST_ENV_UNSET"));
    }
}
