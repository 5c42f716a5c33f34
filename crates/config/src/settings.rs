use serde::Deserialize;
use stackparams_core::{
    Error, Result, SafeOptions, DEFAULT_DESTINATION, INFRASTRUCTURE_DIRECTORY, STACKS_DIRECTORY,
};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How parameter files are organised on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// One file per destination under `infrastructure/`
    #[default]
    Infrastructure,
    /// One file per stack under `stacks/`
    Stacks,
}

impl Layout {
    /// Directory used when none is configured
    #[must_use]
    pub fn default_directory(self) -> &'static str {
        match self {
            Layout::Infrastructure => INFRASTRUCTURE_DIRECTORY,
            Layout::Stacks => STACKS_DIRECTORY,
        }
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "infrastructure" => Ok(Layout::Infrastructure),
            "stacks" => Ok(Layout::Stacks),
            other => Err(Error::configuration(format!(
                "unknown layout `{other}` (expected `infrastructure` or `stacks`)"
            ))),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layout::Infrastructure => "infrastructure",
            Layout::Stacks => "stacks",
        })
    }
}

/// Resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Parameter directory; the layout's default directory when unset
    pub directory: Option<PathBuf>,

    /// Destination whose parameter file is merged in the infrastructure layout
    pub destination: String,

    pub layout: Layout,

    /// Safe selection and key material
    pub safe: SafeOptions,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub working_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory: None,
            destination: DEFAULT_DESTINATION.to_string(),
            layout: Layout::default(),
            safe: SafeOptions::default(),
            working_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Directory holding the parameter files for the configured layout
    #[must_use]
    pub fn parameter_directory(&self) -> PathBuf {
        match &self.directory {
            Some(dir) => self.resolve(dir),
            None => self.working_dir.join(self.layout.default_directory()),
        }
    }

    /// Directories searched when locating an item by name
    ///
    /// A configured directory is the only candidate; otherwise both default
    /// layout directories are searched.
    #[must_use]
    pub fn search_directories(&self) -> Vec<PathBuf> {
        match &self.directory {
            Some(dir) => vec![self.resolve(dir)],
            None => vec![
                self.working_dir.join(STACKS_DIRECTORY),
                self.working_dir.join(INFRASTRUCTURE_DIRECTORY),
            ],
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}
