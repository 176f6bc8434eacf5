//! Module system traits and interfaces
//!
//! Defines the lifecycle contract every hosted module implements, the state
//! machine the manager tracks for it, and the error type shared by the whole
//! module system.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::module::registry::descriptor::ModuleDescriptor;

/// Module lifecycle state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleState {
    /// Registered with the host but never started
    Registered,
    /// Module is initializing
    Initializing,
    /// Module is running normally
    Running,
    /// Module is stopping
    Stopping,
    /// Module was stopped (shutdown or startup rollback)
    Stopped,
    /// Module failed during a lifecycle hook
    Error(String),
}

/// Module trait that all hosted modules implement
///
/// The host calls the hooks in resolved dependency order: `init` then `start`
/// for every module on the way up, `stop` in reverse order on the way down.
#[async_trait]
pub trait Module: Send + Sync {
    /// Static metadata used for dependency resolution
    fn descriptor(&self) -> &ModuleDescriptor;

    /// Initialize the module with given context
    ///
    /// Called once before `start`. Module should validate its settings here.
    async fn init(&mut self, context: ModuleContext) -> Result<(), ModuleError>;

    /// Start the module
    async fn start(&mut self) -> Result<(), ModuleError>;

    /// Stop the module (graceful shutdown)
    async fn stop(&mut self) -> Result<(), ModuleError>;
}

/// Context handed to a module when it is initialized
#[derive(Debug, Clone, Default)]
pub struct ModuleContext {
    /// Name of the module this context belongs to
    pub module_name: String,
    /// Module settings (key-value pairs from the host config)
    pub config: HashMap<String, String>,
}

impl ModuleContext {
    /// Create a new module context
    pub fn new(module_name: impl Into<String>, config: HashMap<String, String>) -> Self {
        Self {
            module_name: module_name.into(),
            config,
        }
    }

    /// Get a configuration value
    pub fn get_config(&self, key: &str) -> Option<&String> {
        self.config.get(key)
    }

    /// Get a configuration value with default
    pub fn get_config_or(&self, key: &str, default: &str) -> String {
        self.config
            .get(key)
            .map(|s| s.as_str())
            .unwrap_or(default)
            .to_string()
    }
}

/// Module system errors
#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("Module name is required (got {0:?})")]
    NameRequired(String),

    #[error("Module dependency missing: {}", .0.join("; "))]
    DependencyMissing(Vec<String>),

    #[error("Circular dependency detected: {}", .0.join(" -> "))]
    CircularDependency(Vec<String>),

    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    #[error("Invalid module manifest: {0}")]
    InvalidManifest(String),

    #[error("Module initialization failed: {0}")]
    InitializationError(String),

    #[error("Module operation failed: {0}")]
    OperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ModuleError {
    fn from(e: serde_json::Error) -> Self {
        ModuleError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for ModuleError {
    fn from(e: toml::de::Error) -> Self {
        ModuleError::SerializationError(e.to_string())
    }
}

impl From<anyhow::Error> for ModuleError {
    fn from(e: anyhow::Error) -> Self {
        ModuleError::OperationError(e.to_string())
    }
}
