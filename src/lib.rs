//! MicFx module host core
//!
//! This crate provides the module plumbing a MicFx host application is built
//! on: module descriptors and `module.toml` manifests, directory discovery,
//! dependency resolution with deterministic startup/shutdown ordering, and a
//! lifecycle manager that drives module hooks in that order.
//!
//! ## Design Principles
//!
//! 1. **Explicit registration**: modules are registered or discovered from
//!    manifests; nothing is found by runtime reflection
//! 2. **Deterministic ordering**: the same registry always yields the same order
//! 3. **Data-driven failures**: missing dependencies and cycles are returned to
//!    the host, which decides whether to abort startup
//!
//! ## Example
//!
//! ```rust
//! use micfx_core::module::{DependencyResolver, ModuleDescriptor};
//!
//! let mut resolver = DependencyResolver::new();
//! resolver.register_module(ModuleDescriptor::new("core").with_priority(10)).unwrap();
//! resolver.register_module(ModuleDescriptor::new("auth").with_dependency("core")).unwrap();
//!
//! assert!(resolver.validate_dependencies().is_valid);
//! assert_eq!(resolver.startup_order().unwrap(), vec!["core", "auth"]);
//! assert_eq!(resolver.shutdown_order().unwrap(), vec!["auth", "core"]);
//! ```

pub mod config;
pub mod module;
pub mod utils;

pub use config::{HostConfig, LoggingConfig, ModuleConfig};
pub use module::{
    DependencyResolver, Module, ModuleContext, ModuleDescriptor, ModuleError, ModuleManager,
    ModuleState, ValidationResult,
};
