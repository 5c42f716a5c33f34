//! Settings for stackparams
//!
//! [`Settings`] is the single resolved view of where parameter files live and
//! how they are encrypted. [`ConfigLoader`] builds it from defaults, an
//! optional `stackparams.toml`, `STACKPARAMS_*` environment variables and
//! explicit overrides, in that order of precedence.

mod loader;
mod settings;

pub use loader::ConfigLoader;
pub use settings::{Layout, Settings};
