use serde_json::Value;
use stackparams_config::Settings;
use stackparams_core::{Error, MergeContext, Result};
use stackparams_merge::load_context;
use stackparams_resolver::{ResolverRegistry, SystemCommandExecutor};
use std::sync::Arc;

/// Merge the configured parameter file and render the context as JSON
///
/// `presets` are `KEY=VALUE` template parameters placed in the context
/// before the file is merged.
pub fn render(settings: &Settings, stack: Option<&str>, presets: &[String]) -> Result<String> {
    let registry = ResolverRegistry::with_builtin();
    let ctx = load_context(
        settings,
        &registry,
        Arc::new(SystemCommandExecutor),
        stack,
        preset_context(presets)?,
    )?;
    Ok(serde_json::to_string_pretty(&ctx)?)
}

fn preset_context(presets: &[String]) -> Result<MergeContext> {
    let mut ctx = MergeContext::new();
    for preset in presets {
        let (key, value) = preset
            .split_once('=')
            .filter(|(key, _)| !key.trim().is_empty())
            .ok_or_else(|| {
                Error::configuration(format!("expected KEY=VALUE for --set, got `{preset}`"))
            })?;
        ctx.parameters
            .insert(key.trim().to_string(), Value::String(value.to_string()));
    }
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preset_parsing() {
        let ctx = preset_context(&["region=us-east-2".into(), "opts=a=b".into()]).unwrap();
        assert_eq!(ctx.parameters["region"], json!("us-east-2"));
        assert_eq!(ctx.parameters["opts"], json!("a=b"));

        assert!(preset_context(&["novalue".into()]).unwrap_err().is_configuration());
        assert!(preset_context(&["=x".into()]).unwrap_err().is_configuration());
    }
}
