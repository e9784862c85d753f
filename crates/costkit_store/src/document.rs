//! Structured documents on disk.
//!
//! Catalogs and workload descriptions share one rule: the file extension
//! picks the format.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Serialization format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
    Toml,
}

impl DocumentFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> StoreResult<T> {
        let value = match self {
            Self::Yaml => serde_yaml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
            Self::Toml => toml::from_str(content)?,
        };
        Ok(value)
    }

    pub fn render<T: Serialize>(&self, value: &T) -> StoreResult<String> {
        let content = match self {
            Self::Yaml => serde_yaml::to_string(value)?,
            Self::Json => serde_json::to_string_pretty(value)?,
            Self::Toml => toml::to_string_pretty(value)?,
        };
        Ok(content)
    }
}

/// Read and parse a document, choosing the format by extension
pub fn read_document<T: DeserializeOwned>(path: &Path) -> StoreResult<T> {
    let format = DocumentFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Read document");
    format.parse(&content)
}

/// Serialize and write a document, creating parent directories
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let content = DocumentFormat::from_path(path)?.render(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), "Wrote document");
    Ok(())
}
