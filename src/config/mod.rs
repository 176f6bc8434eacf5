//! Configuration management for the module host
//!
//! Handles configuration loading (JSON or TOML) and validation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::utils::validation::{ensure, ensure_fmt};

/// Module system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Directory scanned for `<module>/module.toml`
    #[serde(default = "default_modules_dir")]
    pub modules_dir: String,

    /// List of enabled modules (empty = all)
    #[serde(default)]
    pub enabled_modules: Vec<String>,

    /// Module-specific settings handed to each module on init
    #[serde(default)]
    pub module_configs: HashMap<String, HashMap<String, String>>,
}

fn default_modules_dir() -> String {
    "modules".to_string()
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            modules_dir: default_modules_dir(),
            enabled_modules: Vec::new(),
            module_configs: HashMap::new(),
        }
    }
}

impl ModuleConfig {
    /// Whether the host config allows this module to start
    pub fn is_module_enabled(&self, name: &str) -> bool {
        self.enabled_modules.is_empty() || self.enabled_modules.iter().any(|m| m == name)
    }

    /// Settings for one module (empty when none are configured)
    pub fn settings_for(&self, name: &str) -> HashMap<String, String> {
        self.module_configs.get(name).cloned().unwrap_or_default()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log filter (e.g. "info", "micfx_core=debug"); RUST_LOG takes precedence
    #[serde(default)]
    pub filter: Option<String>,

    /// Emit JSON lines (requires the `json-logging` feature)
    #[serde(default)]
    pub json_format: bool,
}

/// Host configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostConfig {
    /// Module system configuration
    #[serde(default)]
    pub modules: ModuleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

impl HostConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HostConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: HostConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load by extension: `.json` as JSON, anything else as TOML
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure(
            !self.modules.modules_dir.trim().is_empty(),
            "modules_dir must not be empty",
        )
        .map_err(|e| anyhow::anyhow!(e))?;

        for name in &self.modules.enabled_modules {
            ensure_fmt(!name.trim().is_empty(), || {
                format!(
                    "enabled_modules contains a blank entry: {:?}",
                    self.modules.enabled_modules
                )
            })
            .map_err(|e| anyhow::anyhow!(e))?;
        }

        Ok(())
    }
}
