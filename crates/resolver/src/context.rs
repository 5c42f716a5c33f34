use crate::executor::{CommandExecutor, SystemCommandExecutor};
use std::sync::Arc;

/// Shared services handed to resolver factories
#[derive(Clone)]
pub struct ResolverContext {
    executor: Arc<dyn CommandExecutor>,
}

impl ResolverContext {
    #[must_use]
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Context backed by real process execution
    #[must_use]
    pub fn system() -> Self {
        Self::new(Arc::new(SystemCommandExecutor))
    }

    #[must_use]
    pub fn executor(&self) -> Arc<dyn CommandExecutor> {
        Arc::clone(&self.executor)
    }
}

impl Default for ResolverContext {
    fn default() -> Self {
        Self::system()
    }
}
