//! Configuration management for SFI
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence)
//! 2. Environment variables (SFI_* prefix, `__` between nested keys)
//! 3. sfi.local.toml (gitignored, local overrides)
//! 4. sfi.toml (git-tracked, project config)
//! 5. ~/.config/sfi/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use sfi::{AttributeCatalog, AttributeGroup, MatchMode};
use std::path::{Path, PathBuf};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main SFI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SfiConfig {
    pub dataset: DatasetConfig,
    pub generator: GeneratorConfig,
    pub matching: MatchingConfig,
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("shipments.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub default_count: u32,
    /// Unset means the generator seeds from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_count: 100,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub mode: MatchMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Custom attribute catalog. Empty means the built-in shipment catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub groups: Vec<AttributeGroup>,
}

impl SfiConfig {
    /// Load configuration from specific project directory
    pub fn load_from_dir(project_dir: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::new().with_project_dir(project_dir).load()
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();

        if self.dataset.path.is_relative() {
            self.dataset.path = base.join(&self.dataset.path);
        }
    }

    /// Checks values the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.default_count == 0 {
            return Err(ConfigError::ValidationError(
                "generator.default_count must be positive".to_string(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.filter must not be empty".to_string(),
            ));
        }
        self.build_catalog().map(|_| ())
    }

    /// The configured catalog, or the built-in one when none is configured.
    pub fn build_catalog(&self) -> Result<AttributeCatalog, ConfigError> {
        if self.catalog.groups.is_empty() {
            return Ok(AttributeCatalog::shipments());
        }
        AttributeCatalog::new(self.catalog.groups.clone())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SfiConfig::default();
        assert_eq!(config.dataset.path, PathBuf::from("shipments.json"));
        assert_eq!(config.generator.default_count, 100);
        assert_eq!(config.generator.seed, None);
        assert_eq!(config.matching.mode, MatchMode::Lenient);
        assert_eq!(config.logging.filter, "warn");
        assert!(config.catalog.groups.is_empty());
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn test_path_resolution() {
        let mut config = SfiConfig::default();
        config.resolve_paths("/home/user/project");

        assert_eq!(
            config.dataset.path,
            PathBuf::from("/home/user/project/shipments.json")
        );

        config.dataset.path = PathBuf::from("/var/data/s.json");
        config.resolve_paths("/home/user/project");
        assert_eq!(config.dataset.path, PathBuf::from("/var/data/s.json"));
    }

    #[test]
    fn test_builtin_catalog_when_unconfigured() {
        let catalog = SfiConfig::default().build_catalog().unwrap();
        assert_eq!(catalog, AttributeCatalog::shipments());
        assert_eq!(catalog.total_values(), 22);
    }

    #[test]
    fn test_custom_catalog() {
        let mut config = SfiConfig::default();
        config.catalog.groups = vec![
            AttributeGroup::new("color", ["red", "green"]),
            AttributeGroup::new("size", ["S", "M", "L"]),
        ];

        let catalog = config.build_catalog().unwrap();
        assert_eq!(catalog.group_names().collect::<Vec<_>>(), ["color", "size"]);
        assert_eq!(catalog.total_values(), 5);
    }

    #[test]
    fn test_invalid_catalog_rejected() {
        let mut config = SfiConfig::default();
        config.catalog.groups = vec![AttributeGroup::new("color", ["red", "red"])];

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("red"));
    }

    #[test]
    fn test_zero_default_count_rejected() {
        let mut config = SfiConfig::default();
        config.generator.default_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = SfiConfig::default();
        config.generator.seed = Some(42);
        config.matching.mode = MatchMode::Strict;

        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("mode = \"strict\""));

        let parsed: SfiConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.generator.seed, Some(42));
        assert_eq!(parsed.matching.mode, MatchMode::Strict);
    }
}
