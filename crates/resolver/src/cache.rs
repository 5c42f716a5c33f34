use crate::context::ResolverContext;
use crate::registry::ResolverRegistry;
use crate::resolver::Resolver;
use stackparams_core::{Error, Result};
use stackparams_utils::canonical_name;
use std::collections::HashMap;
use tracing::debug;

/// Set-up resolver instances for a single merge pass
///
/// Keyed by the canonical requested name, so each distinct request is
/// instantiated and set up at most once.
#[derive(Default)]
pub struct ResolverCache {
    resolvers: HashMap<String, Box<dyn Resolver>>,
}

impl ResolverCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the instance for `requested`, creating and setting it up first
    /// if this pass has not used it yet
    pub fn load(
        &mut self,
        registry: &ResolverRegistry,
        context: &ResolverContext,
        requested: &str,
    ) -> Result<&dyn Resolver> {
        let key = canonical_name(requested.trim());

        if !self.resolvers.contains_key(&key) {
            let mut resolver = registry.instantiate(requested, context)?;
            resolver.setup()?;
            debug!(resolver = %key, "resolver ready");
            self.resolvers.insert(key.clone(), resolver);
        }

        self.resolvers
            .get(&key)
            .map(|resolver| &**resolver)
            .ok_or_else(|| Error::unknown_resolver(requested, registry.names()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}
