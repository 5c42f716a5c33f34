/// Constants used throughout the stackparams codebase
// Document marker keys
pub const LOCK_TYPE_KEY: &str = "lock_type";
pub const LOCK_ENABLED_KEY: &str = "lock_enabled";
pub const RESOLVER_KEY: &str = "resolver";

// Separator for flattened parameter keys
pub const PATH_SEPARATOR: &str = "__";

// Safe defaults
pub const DEFAULT_SAFE_TYPE: &str = "ssl";
pub const DEFAULT_CIPHER: &str = "AES-256-CBC";
pub const DEFAULT_ITERATIONS: u32 = 10_000;
pub const DEFAULT_KEY_LENGTH: usize = 32;

// Parameter file locations
pub const DEFAULT_DESTINATION: &str = "default";
pub const INFRASTRUCTURE_DIRECTORY: &str = "infrastructure";
pub const STACKS_DIRECTORY: &str = "stacks";
pub const SETTINGS_FILENAME: &str = "stackparams.toml";

// Environment variable names
pub const DIRECTORY_VAR: &str = "STACKPARAMS_DIRECTORY";
pub const DESTINATION_VAR: &str = "STACKPARAMS_DESTINATION";
pub const LAYOUT_VAR: &str = "STACKPARAMS_LAYOUT";
pub const SAFE_TYPE_VAR: &str = "STACKPARAMS_SAFE_TYPE";
pub const KEY_VAR: &str = "STACKPARAMS_KEY";
pub const CIPHER_VAR: &str = "STACKPARAMS_CIPHER";
pub const ITERATIONS_VAR: &str = "STACKPARAMS_ITERATIONS";
pub const SALT_VAR: &str = "STACKPARAMS_SALT";
pub const EDITOR_VAR: &str = "EDITOR";
