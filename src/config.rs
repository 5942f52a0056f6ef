use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{SymbolCode, TenantId};
use crate::error::{ConfigError, Result};

/// Lifecycle of the per-tenant volume record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeMode {
    /// Reset volume and fees at every UTC day boundary (primary mode).
    #[default]
    Daily,
    /// Accumulate forever, never reset.
    Rolling,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Aggregation-engine policy knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Suffix of the reserved tenant sub-namespace, e.g. `".sx"`.
    pub reserved_suffix: String,
    /// Volume record lifecycle.
    #[serde(default)]
    pub volume_mode: VolumeMode,
    /// Reference currency for spot-price snapshots.
    pub base_currency: SymbolCode,
    /// Per-tenant overrides of the reference currency.
    #[serde(default)]
    pub base_overrides: HashMap<TenantId, SymbolCode>,
}

impl EngineConfig {
    /// Reference currency for a tenant's snapshots, honoring overrides.
    #[must_use]
    pub fn base_for(&self, tenant: &TenantId) -> &SymbolCode {
        self.base_overrides.get(tenant).unwrap_or(&self.base_currency)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.engine.reserved_suffix.is_empty() {
            return Err(ConfigError::MissingField {
                field: "engine.reserved_suffix",
            }
            .into());
        }
        if !self.engine.reserved_suffix.starts_with('.') {
            return Err(ConfigError::InvalidValue {
                field: "engine.reserved_suffix",
                reason: "namespace suffix must start with '.'".into(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reserved_suffix: ".sx".into(),
            volume_mode: VolumeMode::Daily,
            base_currency: SymbolCode::new("USDT").expect("static code is valid"),
            base_overrides: HashMap::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}
