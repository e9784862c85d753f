//! CLI configuration.
//!
//! Sources, lowest precedence first: built-in defaults, `costkit.toml` in the
//! working directory, `COSTKIT_*` environment variables, command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::report::Currency;

pub const CONFIG_FILE: &str = "costkit.toml";

/// Credits that make one unit of currency
pub const DEFAULT_CREDITS_PER_UNIT: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub currency: Currency,
    pub credits_per_unit: f64,
    /// Catalog file; the built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Directory that holds `.costkit/sessions`; the working directory when unset
    pub sessions_root: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            credits_per_unit: DEFAULT_CREDITS_PER_UNIT,
            catalog_path: None,
            sessions_root: None,
        }
    }
}

impl CliConfig {
    /// Load `costkit.toml` from a directory, if present, then apply the environment
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_with(dir, |key| std::env::var(key).ok())
    }

    pub fn load_with(dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            debug!(path = %path.display(), "Loaded configuration file");
            Self::from_toml(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?
        } else {
            Self::default()
        };
        config.with_env(lookup)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Apply `COSTKIT_*` overrides read through `lookup`
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(currency) = lookup("COSTKIT_CURRENCY") {
            self.currency = currency
                .parse()
                .map_err(|e: String| anyhow::anyhow!("Invalid argument COSTKIT_CURRENCY: {}", e))?;
        }
        if let Some(credits) = lookup("COSTKIT_CREDITS_PER_UNIT") {
            self.credits_per_unit = credits
                .trim()
                .parse()
                .with_context(|| {
                    format!("Invalid argument COSTKIT_CREDITS_PER_UNIT: {}", credits)
                })?;
        }
        if let Some(catalog) = lookup("COSTKIT_CATALOG").filter(|v| !v.is_empty()) {
            self.catalog_path = Some(PathBuf::from(catalog));
        }
        if let Some(root) = lookup("COSTKIT_SESSIONS_ROOT").filter(|v| !v.is_empty()) {
            self.sessions_root = Some(PathBuf::from(root));
        }
        self.check()?;
        Ok(self)
    }

    fn check(&self) -> Result<()> {
        if !(self.credits_per_unit.is_finite() && self.credits_per_unit > 0.0) {
            anyhow::bail!(
                "Invalid argument credits_per_unit: must be positive, got {}",
                self.credits_per_unit
            );
        }
        Ok(())
    }

    /// The catalog to use, a flag taking precedence over configuration
    pub fn catalog(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf).or_else(|| self.catalog_path.clone())
    }

    pub fn sessions_root(&self, cwd: &Path) -> PathBuf {
        match &self.sessions_root {
            Some(root) if root.is_absolute() => root.clone(),
            Some(root) => cwd.join(root),
            None => cwd.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.credits_per_unit, 100.0);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_toml_then_env() {
        let config = CliConfig::from_toml("currency = \"EUR\"\ncredits_per_unit = 50.0\n").unwrap();
        assert_eq!(config.currency, Currency::EUR);

        let config = config
            .with_env(env(&[
                ("COSTKIT_CREDITS_PER_UNIT", "200"),
                ("COSTKIT_CATALOG", "prices.yaml"),
            ]))
            .unwrap();
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.credits_per_unit, 200.0);
        assert_eq!(config.catalog_path, Some(PathBuf::from("prices.yaml")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(CliConfig::from_toml("credits_per_unit = 0.0\n").is_err());
        assert!(CliConfig::from_toml("colour = \"blue\"\n").is_err());
        assert!(CliConfig::default().with_env(env(&[("COSTKIT_CURRENCY", "GBP")])).is_err());
        assert!(CliConfig::default()
            .with_env(env(&[("COSTKIT_CREDITS_PER_UNIT", "lots")]))
            .is_err());
    }

    #[test]
    fn test_flag_beats_config_catalog() {
        let config = CliConfig {
            catalog_path: Some(PathBuf::from("from-config.yaml")),
            ..Default::default()
        };
        assert_eq!(
            config.catalog(Some(Path::new("from-flag.json"))),
            Some(PathBuf::from("from-flag.json"))
        );
        assert_eq!(config.catalog(None), Some(PathBuf::from("from-config.yaml")));
    }

    #[test]
    fn test_load_from_directory() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "sessions_root = \"state\"\n").unwrap();
        let config =
            CliConfig::load_with(temp.path(), env(&[("COSTKIT_CURRENCY", "eur")])).unwrap();
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.sessions_root(temp.path()), temp.path().join("state"));

        let empty = tempdir().unwrap();
        let config = CliConfig::load_with(empty.path(), env(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.sessions_root(empty.path()), empty.path());
    }
}
