use serde_json::Value;
use stackparams_core::{Error, Result};

/// Turns a resolver input into a concrete parameter value
///
/// `setup` runs once per merge pass before the first `resolve`. Neither
/// method has to be overridden; an implementation that skips `resolve`
/// reports `NotImplemented` when used.
pub trait Resolver {
    /// One-time preparation, e.g. checking that a required tool exists
    fn setup(&mut self) -> Result<()> {
        Ok(())
    }

    /// Produce the value for `input`
    fn resolve(&self, _input: &Value) -> Result<Value> {
        Err(Error::not_implemented("Resolver::resolve"))
    }
}
