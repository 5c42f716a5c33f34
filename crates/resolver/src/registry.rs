//! Name-to-factory registry for resolvers

use crate::context::ResolverContext;
use crate::resolver::Resolver;
use crate::resolvers::{CommandResolver, EnvResolver, ParameterStoreResolver};
use indexmap::IndexMap;
use stackparams_core::{Error, Result};
use stackparams_utils::canonical_name;
use std::fmt;
use tracing::debug;

/// Builds a fresh resolver instance
pub type ResolverFactory =
    Box<dyn Fn(&ResolverContext) -> Result<Box<dyn Resolver>> + Send + Sync>;

/// Registered resolvers keyed by canonical name, in registration order
#[derive(Default)]
pub struct ResolverRegistry {
    factories: IndexMap<String, ResolverFactory>,
}

impl ResolverRegistry {
    /// Empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the resolvers that ship with stackparams
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(EnvResolver::NAME, |_| Ok(Box::new(EnvResolver)));
        registry.insert(CommandResolver::NAME, |ctx| {
            Ok(Box::new(CommandResolver::new(ctx.executor())))
        });
        registry.insert(ParameterStoreResolver::NAME, |ctx| {
            Ok(Box::new(ParameterStoreResolver::new(ctx.executor())))
        });
        registry
    }

    /// Register a resolver factory under `name`
    ///
    /// The name is stored in canonical form. Registering a name that is
    /// already present replaces the earlier factory but keeps its position.
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<()>
    where
        F: Fn(&ResolverContext) -> Result<Box<dyn Resolver>> + Send + Sync + 'static,
    {
        let canonical = canonical_name(name.trim());
        if canonical.is_empty() {
            return Err(Error::UnnamedResolver);
        }
        debug!(resolver = %canonical, "registering resolver");
        self.factories.insert(canonical, Box::new(factory));
        Ok(())
    }

    fn insert<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(&ResolverContext) -> Result<Box<dyn Resolver>> + Send + Sync + 'static,
    {
        self.factories.insert(canonical_name(name), Box::new(factory));
    }

    /// Canonical names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Find the registered resolver a requested name refers to
    ///
    /// A registered name matches when it ends with the canonical form of the
    /// request, so `env` finds `resolvers_env`. When several names match, the
    /// earliest registration wins.
    pub fn detect_resolver(&self, requested: &str) -> Result<&str> {
        let wanted = canonical_name(requested.trim());
        if wanted.is_empty() {
            return Err(Error::unknown_resolver(requested, self.names()));
        }

        let mut candidates = self
            .factories
            .keys()
            .filter(|name| name.ends_with(wanted.as_str()));

        let Some(found) = candidates.next() else {
            return Err(Error::unknown_resolver(requested, self.names()));
        };

        let others: Vec<&String> = candidates.collect();
        if !others.is_empty() {
            debug!(
                requested = %wanted,
                chosen = %found,
                ?others,
                "resolver name matches several registrations"
            );
        }
        Ok(found.as_str())
    }

    /// Build a new, not yet set-up instance for a requested name
    pub fn instantiate(
        &self,
        requested: &str,
        context: &ResolverContext,
    ) -> Result<Box<dyn Resolver>> {
        let name = self.detect_resolver(requested)?;
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::unknown_resolver(requested, self.names()))?;
        debug!(resolver = %name, "instantiating resolver");
        factory(context)
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("resolvers", &self.names())
            .finish()
    }
}
