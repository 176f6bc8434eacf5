//! Module manager for orchestrating all modules
//!
//! Starts modules in resolved dependency order, rolls back on a failed
//! startup, and stops them in reverse order on shutdown.

use std::collections::HashMap;
use tracing::{error, info, warn};

use crate::config::ModuleConfig;
use crate::module::registry::DependencyResolver;
use crate::module::traits::{Module, ModuleContext, ModuleError, ModuleState};

/// Module manager coordinates all registered modules
pub struct ModuleManager {
    /// Dependency graph of every registered module
    resolver: DependencyResolver,
    /// Module instances (name -> module)
    modules: HashMap<String, ManagedModule>,
    /// Host-side module configuration
    config: ModuleConfig,
}

/// Managed module instance
struct ManagedModule {
    module: Box<dyn Module>,
    state: ModuleState,
}

impl ModuleManager {
    /// Create a new module manager
    pub fn new(config: ModuleConfig) -> Self {
        Self {
            resolver: DependencyResolver::new(),
            modules: HashMap::new(),
            config,
        }
    }

    /// Register a module instance; a second instance with the same name replaces the first
    ///
    /// A running instance cannot be replaced; shut it down first.
    pub fn register(&mut self, module: Box<dyn Module>) -> Result<(), ModuleError> {
        let descriptor = module.descriptor().clone();
        let name = descriptor.name.clone();

        if self.module_state(&name) == Some(ModuleState::Running) {
            warn!("Refusing to replace module {} while it is running", name);
            return Err(ModuleError::OperationError(format!(
                "Module {} is running and cannot be replaced",
                name
            )));
        }

        self.resolver.register_module(descriptor)?;
        self.modules.insert(
            name,
            ManagedModule {
                module,
                state: ModuleState::Registered,
            },
        );
        Ok(())
    }

    /// Dependency graph backing this manager
    pub fn resolver(&self) -> &DependencyResolver {
        &self.resolver
    }

    /// Validate, order and start every enabled module
    ///
    /// Modules that are already running are left alone. Returns the names
    /// started by this call, in startup order.
    pub async fn start_all(&mut self) -> Result<Vec<String>, ModuleError> {
        info!("Starting {} modules", self.modules.len());

        self.resolver.validate_dependencies().into_result()?;
        let order = self.resolver.startup_order()?;

        let mut started = Vec::new();
        for name in order {
            if self.module_state(&name) == Some(ModuleState::Running) {
                continue;
            }

            let enabled = self
                .resolver
                .descriptor(&name)
                .is_some_and(|descriptor| descriptor.enabled)
                && self.config.is_module_enabled(&name);
            if !enabled {
                info!("Module {} is disabled, skipping", name);
                continue;
            }

            let context = ModuleContext::new(name.clone(), self.config.settings_for(&name));
            if let Err(e) = self.start_module(&name, context).await {
                error!("Module {} failed to start: {}", name, e);
                self.rollback(&started).await;
                return Err(ModuleError::InitializationError(format!("{}: {}", name, e)));
            }
            started.push(name);
        }

        info!("Started modules: {:?}", started);
        Ok(started)
    }

    /// Stop every running module in reverse dependency order
    ///
    /// Stop failures are logged and do not interrupt the shutdown. Returns the
    /// names stopped successfully, in shutdown order.
    pub async fn shutdown_all(&mut self) -> Result<Vec<String>, ModuleError> {
        info!("Shutting down modules");

        let order = self.resolver.shutdown_order()?;
        let mut stopped = Vec::new();

        for name in order {
            if self.module_state(&name) != Some(ModuleState::Running) {
                continue;
            }
            match self.stop_module(&name).await {
                Ok(()) => stopped.push(name),
                Err(e) => warn!("Error stopping module {}: {}", name, e),
            }
        }

        info!("Module shutdown complete");
        Ok(stopped)
    }

    /// Get module state
    pub fn module_state(&self, name: &str) -> Option<ModuleState> {
        self.modules.get(name).map(|m| m.state.clone())
    }

    /// Names of running modules, sorted
    pub fn running_modules(&self) -> Vec<String> {
        let mut running: Vec<String> = self
            .modules
            .iter()
            .filter(|(_, m)| m.state == ModuleState::Running)
            .map(|(name, _)| name.clone())
            .collect();
        running.sort();
        running
    }

    async fn start_module(&mut self, name: &str, context: ModuleContext) -> Result<(), ModuleError> {
        let managed = self
            .modules
            .get_mut(name)
            .ok_or_else(|| ModuleError::ModuleNotFound(name.to_string()))?;

        managed.state = ModuleState::Initializing;
        if let Err(e) = managed.module.init(context).await {
            managed.state = ModuleState::Error(e.to_string());
            return Err(e);
        }
        if let Err(e) = managed.module.start().await {
            managed.state = ModuleState::Error(e.to_string());
            return Err(e);
        }

        managed.state = ModuleState::Running;
        info!("Module {} started", name);
        Ok(())
    }

    async fn stop_module(&mut self, name: &str) -> Result<(), ModuleError> {
        let managed = self
            .modules
            .get_mut(name)
            .ok_or_else(|| ModuleError::ModuleNotFound(name.to_string()))?;

        managed.state = ModuleState::Stopping;
        match managed.module.stop().await {
            Ok(()) => {
                managed.state = ModuleState::Stopped;
                info!("Module {} stopped", name);
                Ok(())
            }
            Err(e) => {
                managed.state = ModuleState::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Stop already-started modules in reverse start order
    async fn rollback(&mut self, started: &[String]) {
        for name in started.iter().rev() {
            if let Err(e) = self.stop_module(name).await {
                warn!("Error stopping module {} during rollback: {}", name, e);
            }
        }
    }
}
