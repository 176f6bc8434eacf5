//! Module system for the MicFx host
//!
//! Modules are self-contained units of application functionality. Each one
//! declares a name, a startup priority and the modules it depends on; the
//! host discovers them, validates the dependency graph, starts them in a
//! deterministic dependency order and stops them in exactly the reverse order.
//!
//! ## Layout
//!
//! - **registry**: descriptors, `module.toml` manifests, discovery, dependency resolution
//! - **validation**: structural manifest checks
//! - **manager**: lifecycle driver over [`traits::Module`] instances

pub mod manager;
pub mod registry;
pub mod traits;
pub mod validation;

pub use manager::ModuleManager;
pub use registry::{DependencyResolver, ModuleDescriptor, ValidationResult};
pub use traits::{Module, ModuleContext, ModuleError, ModuleState};
