//! Module registry and discovery
//!
//! Handles module descriptors, discovery, manifest parsing, and dependency resolution.

pub mod dependencies;
pub mod descriptor;
pub mod discovery;
pub mod manifest;

pub use dependencies::{DependencyResolver, ValidationResult};
pub use descriptor::{ModuleDescriptor, DEFAULT_PRIORITY};
pub use discovery::{DiscoveredModule, ModuleDiscovery};
pub use manifest::ModuleManifest;
