//! Module manifest parsing
//!
//! Handles parsing module.toml manifests and converting them into descriptors.

use crate::module::registry::descriptor::{ModuleDescriptor, DEFAULT_PRIORITY};
use crate::module::traits::ModuleError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Module manifest (module.toml structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleManifest {
    /// Module name
    pub name: String,
    /// Module version (semantic versioning)
    pub version: String,
    /// Human-readable description
    pub description: Option<String>,
    /// Module author
    pub author: Option<String>,
    /// Startup priority (lower starts earlier)
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Whether the host should start this module
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Required dependencies (module names)
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Optional dependencies (module names)
    #[serde(default)]
    pub optional_dependencies: Vec<String>,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn default_true() -> bool {
    true
}

impl ModuleManifest {
    /// Load manifest from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModuleError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ModuleError::InvalidManifest(format!("Failed to read manifest file: {}", e))
        })?;

        Self::from_toml_str(&contents)
    }

    /// Parse manifest from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ModuleError> {
        let manifest: ModuleManifest = toml::from_str(contents).map_err(|e| {
            ModuleError::InvalidManifest(format!("Failed to parse manifest TOML: {}", e))
        })?;

        if manifest.name.trim().is_empty() {
            return Err(ModuleError::InvalidManifest(
                "Module name cannot be empty".to_string(),
            ));
        }

        Ok(manifest)
    }

    /// Convert to the descriptor the resolver works with
    pub fn to_descriptor(&self) -> ModuleDescriptor {
        ModuleDescriptor {
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone().unwrap_or_default(),
            required_dependencies: self.dependencies.clone(),
            optional_dependencies: self.optional_dependencies.clone(),
            priority: self.priority,
            enabled: self.enabled,
        }
    }
}

impl From<&ModuleManifest> for ModuleDescriptor {
    fn from(manifest: &ModuleManifest) -> Self {
        manifest.to_descriptor()
    }
}
