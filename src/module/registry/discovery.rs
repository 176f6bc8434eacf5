//! Module discovery
//!
//! Scans module directories and discovers available modules.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::module::registry::dependencies::DependencyResolver;
use crate::module::registry::manifest::ModuleManifest;
use crate::module::traits::ModuleError;
use crate::module::validation::{ManifestValidation, ManifestValidator};

/// Manifest file every module directory carries
pub const MANIFEST_FILE: &str = "module.toml";

/// Discovered module information
#[derive(Debug, Clone)]
pub struct DiscoveredModule {
    /// Module directory path
    pub directory: PathBuf,
    /// Module manifest
    pub manifest: ModuleManifest,
}

/// Module discovery scanner
pub struct ModuleDiscovery {
    /// Base directory to scan for modules
    modules_dir: PathBuf,
}

impl ModuleDiscovery {
    /// Create a new module discovery scanner
    pub fn new<P: AsRef<Path>>(modules_dir: P) -> Self {
        Self {
            modules_dir: modules_dir.as_ref().to_path_buf(),
        }
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    /// Discover all modules in the modules directory, sorted by directory name
    pub fn discover_modules(&self) -> Result<Vec<DiscoveredModule>, ModuleError> {
        info!("Discovering modules in {:?}", self.modules_dir);

        if !self.modules_dir.exists() {
            debug!("Modules directory does not exist, creating: {:?}", self.modules_dir);
            fs::create_dir_all(&self.modules_dir).map_err(|e| {
                ModuleError::OperationError(format!("Failed to create modules directory: {}", e))
            })?;
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.modules_dir).map_err(|e| {
            ModuleError::OperationError(format!("Failed to read modules directory: {}", e))
        })?;

        let mut directories = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ModuleError::OperationError(format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();
            if path.is_dir() {
                directories.push(path);
            }
        }
        directories.sort();

        let validator = ManifestValidator::new();
        let mut modules = Vec::new();

        for path in directories {
            let manifest_path = path.join(MANIFEST_FILE);
            if !manifest_path.exists() {
                debug!("No {} found in {:?}, skipping", MANIFEST_FILE, path);
                continue;
            }

            match ModuleManifest::from_file(&manifest_path) {
                Ok(manifest) => {
                    // Structural problems are reported but do not hide the module
                    if let ManifestValidation::Invalid(errors) = validator.validate(&manifest) {
                        warn!("Manifest validation failed for module {}: {:?}", manifest.name, errors);
                    }
                    modules.push(DiscoveredModule {
                        directory: path,
                        manifest,
                    });
                }
                Err(e) => {
                    warn!("Failed to parse manifest in {:?}: {}", path, e);
                }
            }
        }

        info!("Discovered {} modules", modules.len());
        Ok(modules)
    }

    /// Discover a specific module by directory name
    pub fn discover_module(&self, module_name: &str) -> Result<DiscoveredModule, ModuleError> {
        let module_dir = self.modules_dir.join(module_name);
        let manifest_path = module_dir.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(ModuleError::ModuleNotFound(format!(
                "Module {} not found (no {} in {:?})",
                module_name, MANIFEST_FILE, module_dir
            )));
        }

        let manifest = ModuleManifest::from_file(&manifest_path)?;

        if let ManifestValidation::Invalid(errors) = ManifestValidator::new().validate(&manifest) {
            warn!("Manifest validation failed for module {}: {:?}", module_name, errors);
        }

        Ok(DiscoveredModule {
            directory: module_dir,
            manifest,
        })
    }

    /// Register every discovered module into a fresh resolver
    pub fn build_resolver(modules: &[DiscoveredModule]) -> Result<DependencyResolver, ModuleError> {
        let mut resolver = DependencyResolver::new();
        for module in modules {
            resolver.register_module(module.manifest.to_descriptor())?;
        }
        Ok(resolver)
    }
}
