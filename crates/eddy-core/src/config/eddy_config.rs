//! Top-level Eddy configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DiscoveryConfig, MaterializationConfig, StorageConfig};
use crate::constants::{CONFIG_FILE_NAME, MAX_READ_POOL_SIZE};
use crate::errors::ConfigError;
use crate::types::CandidateShape;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`EDDY_*`)
/// 3. Project config (`eddy.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EddyConfig {
    pub discovery: DiscoveryConfig,
    pub materialization: MaterializationConfig,
    pub storage: StorageConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub classes: Option<Vec<String>>,
    pub dump_dir: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub source_path: Option<PathBuf>,
    pub target_path: Option<PathBuf>,
}

impl EddyConfig {
    /// Load configuration from `root/eddy.toml`, the environment, and CLI
    /// overrides, then validate the result.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &EddyConfig) -> Result<(), ConfigError> {
        if config.materialization.batch_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "materialization.batch_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(size) = config.storage.read_pool_size {
            if !(1..=MAX_READ_POOL_SIZE).contains(&size) {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
                });
            }
        }
        if config.storage.target_path.is_some() && config.storage.source_path.is_none() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.target_path".to_string(),
                message: "a separate target store requires storage.source_path".to_string(),
            });
        }
        Ok(())
    }

    fn merge_toml_file(config: &mut EddyConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: EddyConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut EddyConfig, other: &EddyConfig) {
        if !other.discovery.classes.is_empty() {
            base.discovery.classes = other.discovery.classes.clone();
        }
        if !other.discovery.shapes.is_empty() {
            base.discovery.shapes = other.discovery.shapes.clone();
        }
        if other.discovery.dump_dir.is_some() {
            base.discovery.dump_dir = other.discovery.dump_dir.clone();
        }

        if other.materialization.batch_size.is_some() {
            base.materialization.batch_size = other.materialization.batch_size;
        }

        if other.storage.source_path.is_some() {
            base.storage.source_path = other.storage.source_path.clone();
        }
        if other.storage.target_path.is_some() {
            base.storage.target_path = other.storage.target_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `EDDY_BATCH_SIZE`, `EDDY_CLASSES=order,invoice`, etc.
    fn apply_env_overrides(config: &mut EddyConfig) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("EDDY_CLASSES") {
            config.discovery.classes = split_list(&val);
        }
        if let Ok(val) = std::env::var("EDDY_SHAPES") {
            config.discovery.shapes = split_list(&val)
                .iter()
                .map(|s| s.parse::<CandidateShape>())
                .collect::<Result<_, _>>()?;
        }
        if let Ok(val) = std::env::var("EDDY_DUMP_DIR") {
            config.discovery.dump_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("EDDY_BATCH_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.materialization.batch_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("EDDY_SOURCE_DB") {
            config.storage.source_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("EDDY_TARGET_DB") {
            config.storage.target_path = Some(PathBuf::from(val));
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut EddyConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.classes {
            config.discovery.classes = v.clone();
        }
        if let Some(ref v) = cli.dump_dir {
            config.discovery.dump_dir = Some(v.clone());
        }
        if let Some(v) = cli.batch_size {
            config.materialization.batch_size = Some(v);
        }
        if let Some(ref v) = cli.source_path {
            config.storage.source_path = Some(v.clone());
        }
        if let Some(ref v) = cli.target_path {
            config.storage.target_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn split_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
