//! On-disk document encodings

use serde_json::{Map, Value};
use stackparams_core::{Document, Error, Result};
use std::fmt;
use std::path::Path;

/// Supported parameter file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Every format, in file search order
    pub const ALL: [DocumentFormat; 3] = [
        DocumentFormat::Json,
        DocumentFormat::Yaml,
        DocumentFormat::Toml,
    ];

    /// File extensions including the leading dot, preferred one first
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            DocumentFormat::Json => &[".json"],
            DocumentFormat::Yaml => &[".yaml", ".yml"],
            DocumentFormat::Toml => &[".toml"],
        }
    }

    /// Every known extension, in file search order
    pub fn all_extensions() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().flat_map(|format| format.extensions().iter().copied())
    }

    /// Pick the format from a file's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml" | "yml") => Ok(DocumentFormat::Yaml),
            Some("toml") => Ok(DocumentFormat::Toml),
            _ => Err(Error::configuration(format!(
                "unsupported parameter file format: {}",
                path.display()
            ))),
        }
    }

    /// Decode raw file contents; blank input decodes to an empty mapping
    pub fn decode(self, bytes: &[u8]) -> Result<Document> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::decode(self.to_string(), format!("invalid UTF-8: {e}")))?;
        if text.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(text)?),
            DocumentFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| Error::decode(self.to_string(), e.to_string())),
            DocumentFormat::Toml => {
                toml::from_str(text).map_err(|e| Error::decode(self.to_string(), e.to_string()))
            }
        }
    }

    /// Encode a document for writing back to disk
    pub fn encode(self, document: &Document) -> Result<Vec<u8>> {
        match self {
            DocumentFormat::Json => {
                let mut bytes = serde_json::to_vec_pretty(document)?;
                bytes.push(b'\n');
                Ok(bytes)
            }
            DocumentFormat::Yaml => serde_yaml::to_string(document)
                .map(String::into_bytes)
                .map_err(|e| Error::decode(self.to_string(), e.to_string())),
            DocumentFormat::Toml => toml::to_string_pretty(document)
                .map(String::into_bytes)
                .map_err(|e| Error::decode(self.to_string(), e.to_string())),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DocumentFormat::Json => "JSON",
            DocumentFormat::Yaml => "YAML",
            DocumentFormat::Toml => "TOML",
        })
    }
}
