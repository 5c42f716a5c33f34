//! Registry, cache and built-in resolvers working together

use serde_json::json;
use serial_test::serial;
use stackparams_core::Error;
use stackparams_resolver::{
    Resolver, ResolverCache, ResolverContext, ResolverRegistry, TestCommandExecutor,
};
use std::sync::Arc;

fn context(executor: &TestCommandExecutor) -> ResolverContext {
    ResolverContext::new(Arc::new(executor.clone()))
}

#[test]
#[serial]
fn test_builtin_env_through_cache() {
    std::env::set_var("STACKPARAMS_PIPELINE_VALUE", "pipeline");
    let registry = ResolverRegistry::with_builtin();
    let context = ResolverContext::default();
    let mut cache = ResolverCache::new();

    let resolver = cache.load(&registry, &context, "env").unwrap();
    assert_eq!(
        resolver.resolve(&json!("STACKPARAMS_PIPELINE_VALUE")).unwrap(),
        json!("pipeline")
    );
    std::env::remove_var("STACKPARAMS_PIPELINE_VALUE");
}

#[test]
fn test_command_resolver_shares_executor() {
    let executor = TestCommandExecutor::new();
    executor.add_simple_response("vault", &["read", "-field=value", "secret/app"], "abc\n");
    let registry = ResolverRegistry::with_builtin();
    let mut cache = ResolverCache::new();

    let resolver = cache
        .load(&registry, &context(&executor), "Command")
        .unwrap();
    let value = resolver
        .resolve(&json!({"cmd": "vault", "args": ["read", "-field=value", "secret/app"]}))
        .unwrap();

    assert_eq!(value, json!("abc"));
    assert_eq!(
        executor.calls(),
        vec!["vault read -field=value secret/app".to_string()]
    );
}

#[test]
fn test_parameter_store_setup_failure_surfaces_from_cache() {
    let executor = TestCommandExecutor::new();
    executor.mark_missing("aws");
    let registry = ResolverRegistry::with_builtin();
    let mut cache = ResolverCache::new();

    let err = cache
        .load(&registry, &context(&executor), "parameter_store")
        .err()
        .unwrap();
    assert!(err.is_configuration());
}

#[test]
fn test_custom_resolver_alongside_builtins() {
    struct Upper;

    impl Resolver for Upper {
        fn resolve(&self, input: &serde_json::Value) -> stackparams_core::Result<serde_json::Value> {
            Ok(json!(input.as_str().unwrap_or_default().to_uppercase()))
        }
    }

    let mut registry = ResolverRegistry::with_builtin();
    registry.register("Custom::Upper", |_| Ok(Box::new(Upper))).unwrap();
    let mut cache = ResolverCache::new();

    let resolver = cache
        .load(&registry, &ResolverContext::default(), "upper")
        .unwrap();
    assert_eq!(resolver.resolve(&json!("abc")).unwrap(), json!("ABC"));

    let err = cache
        .load(&registry, &ResolverContext::default(), "lower")
        .err()
        .unwrap();
    assert!(matches!(err, Error::UnknownResolver { .. }));
}

#[test]
fn test_default_resolve_is_not_implemented() {
    struct Silent;
    impl Resolver for Silent {}

    let err = Silent.resolve(&json!(null)).unwrap_err();
    assert!(matches!(err, Error::NotImplemented { .. }));
}
