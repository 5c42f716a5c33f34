//! Settings loader
//!
//! Sources are applied lowest precedence first: defaults, the settings file,
//! `STACKPARAMS_*` environment variables, then values set on the loader.

use crate::settings::{Layout, Settings};
use stackparams_core::{
    Error, Result, SecretKey, CIPHER_VAR, DESTINATION_VAR, DIRECTORY_VAR, ITERATIONS_VAR,
    KEY_VAR, LAYOUT_VAR, SAFE_TYPE_VAR, SALT_VAR, SETTINGS_FILENAME,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Builder that resolves [`Settings`] for one invocation
#[derive(Debug, Default)]
pub struct ConfigLoader {
    working_dir: Option<PathBuf>,
    settings_file: Option<PathBuf>,
    directory: Option<PathBuf>,
    destination: Option<String>,
    layout: Option<Layout>,
    key: Option<SecretKey>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory relative paths and the default settings file are resolved
    /// against; the current directory when unset
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Explicit settings file; unlike the default one it must exist
    #[must_use]
    pub fn settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }

    #[must_use]
    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    #[must_use]
    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    #[must_use]
    pub fn key(mut self, key: impl Into<SecretKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Resolve settings from every source
    pub fn load(self) -> Result<Settings> {
        self.load_with_env(|name| std::env::var(name).ok())
    }

    /// Resolve settings, reading environment variables through `lookup`
    pub fn load_with_env<F>(self, lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let working_dir = match self.working_dir.clone() {
            Some(dir) => dir,
            None => std::env::current_dir()
                .map_err(|e| Error::file_system(".", "determine working directory", e))?,
        };

        let mut settings = self.read_settings_file(&working_dir)?;
        settings.working_dir = working_dir;

        apply_env(&mut settings, lookup)?;
        self.apply_overrides(&mut settings);

        debug!(
            directory = %settings.parameter_directory().display(),
            destination = %settings.destination,
            layout = %settings.layout,
            safe = %settings.safe.safe_type,
            "settings loaded"
        );
        Ok(settings)
    }

    fn read_settings_file(&self, working_dir: &Path) -> Result<Settings> {
        let (path, required) = match &self.settings_file {
            Some(path) if path.is_absolute() => (path.clone(), true),
            Some(path) => (working_dir.join(path), true),
            None => (working_dir.join(SETTINGS_FILENAME), false),
        };

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => {
                return Ok(Settings::default());
            }
            Err(e) => return Err(Error::file_system(&path, "read", e)),
        };

        debug!(path = %path.display(), "reading settings file");
        toml::from_str(&text).map_err(|e| {
            Error::configuration(format!("invalid settings file {}: {e}", path.display()))
        })
    }

    fn apply_overrides(self, settings: &mut Settings) {
        if let Some(directory) = self.directory {
            settings.directory = Some(directory);
        }
        if let Some(destination) = self.destination {
            settings.destination = destination;
        }
        if let Some(layout) = self.layout {
            settings.layout = layout;
        }
        if let Some(key) = self.key {
            settings.safe.key = Some(key);
        }
    }
}

fn apply_env<F>(settings: &mut Settings, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

    if let Some(directory) = var(DIRECTORY_VAR) {
        settings.directory = Some(PathBuf::from(directory));
    }
    if let Some(destination) = var(DESTINATION_VAR) {
        settings.destination = destination;
    }
    if let Some(layout) = var(LAYOUT_VAR) {
        settings.layout = layout.parse()?;
    }
    if let Some(safe_type) = var(SAFE_TYPE_VAR) {
        settings.safe.safe_type = safe_type;
    }
    if let Some(key) = var(KEY_VAR) {
        settings.safe.key = Some(SecretKey::new(key));
    }
    if let Some(cipher) = var(CIPHER_VAR) {
        settings.safe.cipher = cipher;
    }
    if let Some(iterations) = var(ITERATIONS_VAR) {
        settings.safe.iterations = iterations.trim().parse().map_err(|_| {
            Error::configuration(format!(
                "{ITERATIONS_VAR} must be a positive integer, got `{iterations}`"
            ))
        })?;
    }
    if let Some(salt) = var(SALT_VAR) {
        settings.safe.salt = Some(salt);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let settings = ConfigLoader::new()
            .working_dir(dir.path())
            .load_with_env(env(&[]))
            .unwrap();

        assert_eq!(settings.destination, "default");
        assert_eq!(settings.layout, Layout::Infrastructure);
        assert!(settings.safe.key.is_none());
        assert_eq!(settings.working_dir, dir.path());
    }

    #[test]
    fn test_file_then_env_then_overrides() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILENAME),
            "destination = \"staging\"\nlayout = \"stacks\"\n\n[safe]\nkey = \"file-key\"\niterations = 500\n",
        )
        .unwrap();

        let settings = ConfigLoader::new()
            .working_dir(dir.path())
            .load_with_env(env(&[]))
            .unwrap();
        assert_eq!(settings.destination, "staging");
        assert_eq!(settings.layout, Layout::Stacks);
        assert_eq!(settings.safe.iterations, 500);
        assert_eq!(settings.safe.key.as_ref().map(SecretKey::expose), Some("file-key"));

        let settings = ConfigLoader::new()
            .working_dir(dir.path())
            .load_with_env(env(&[(DESTINATION_VAR, "prod"), (KEY_VAR, "env-key")]))
            .unwrap();
        assert_eq!(settings.destination, "prod");
        assert_eq!(settings.safe.key.as_ref().map(SecretKey::expose), Some("env-key"));

        let settings = ConfigLoader::new()
            .working_dir(dir.path())
            .key("flag-key")
            .layout(Layout::Infrastructure)
            .load_with_env(env(&[(KEY_VAR, "env-key")]))
            .unwrap();
        assert_eq!(settings.safe.key.as_ref().map(SecretKey::expose), Some("flag-key"));
        assert_eq!(settings.layout, Layout::Infrastructure);
    }

    #[test]
    fn test_invalid_env_values() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .working_dir(dir.path())
            .load_with_env(env(&[(ITERATIONS_VAR, "many")]))
            .unwrap_err();
        assert!(err.is_configuration());

        let err = ConfigLoader::new()
            .working_dir(dir.path())
            .load_with_env(env(&[(LAYOUT_VAR, "flat")]))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_settings_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILENAME), "layout = \"flat\"\n").unwrap();

        let err = ConfigLoader::new()
            .working_dir(dir.path())
            .load_with_env(env(&[]))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_explicit_settings_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::new()
            .working_dir(dir.path())
            .settings_file("missing.toml")
            .load_with_env(env(&[]))
            .unwrap_err();
        assert!(matches!(err, Error::FileSystem { .. }));
    }
}
