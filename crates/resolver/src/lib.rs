//! Value resolvers
//!
//! Parameters can name a resolver instead of carrying a literal value. The
//! [`ResolverRegistry`] maps canonical names to factories, a per-pass
//! [`ResolverCache`] keeps one set-up instance per requested name, and the
//! built-in resolvers live in [`resolvers`].

mod cache;
mod context;
pub mod executor;
mod registry;
mod resolver;
pub mod resolvers;

pub use cache::ResolverCache;
pub use context::ResolverContext;
pub use executor::{CommandExecutor, SystemCommandExecutor, TestCommandExecutor, TestResponse};
pub use registry::{ResolverFactory, ResolverRegistry};
pub use resolver::Resolver;
