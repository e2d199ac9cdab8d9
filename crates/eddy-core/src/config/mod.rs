//! Configuration system for Eddy.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod discovery_config;
pub mod eddy_config;
pub mod materialization_config;
pub mod storage_config;

pub use discovery_config::DiscoveryConfig;
pub use eddy_config::{CliOverrides, EddyConfig};
pub use materialization_config::MaterializationConfig;
pub use storage_config::StorageConfig;
