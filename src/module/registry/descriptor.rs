//! Module descriptor
//!
//! Static metadata the resolver orders modules by.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Priority assigned when a module does not declare one
pub const DEFAULT_PRIORITY: i32 = 100;

/// Static description of a module: identity, dependencies and startup priority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module name (unique identifier)
    pub name: String,
    /// Module version (semantic versioning)
    #[serde(default)]
    pub version: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// Modules that must be registered and started before this one
    #[serde(default)]
    pub required_dependencies: Vec<String>,
    /// Modules started before this one only when they are registered
    #[serde(default)]
    pub optional_dependencies: Vec<String>,
    /// Lower value starts earlier; only breaks ties between unrelated modules
    #[serde(default = "default_priority")]
    pub priority: i32,
    /// Disabled modules are still ordered but not started by the manager
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_priority() -> i32 {
    DEFAULT_PRIORITY
}

fn default_true() -> bool {
    true
}

impl ModuleDescriptor {
    /// Create a descriptor with default priority and no dependencies
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: String::new(),
            description: String::new(),
            required_dependencies: Vec::new(),
            optional_dependencies: Vec::new(),
            priority: DEFAULT_PRIORITY,
            enabled: true,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.required_dependencies.push(name.into());
        self
    }

    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_dependencies
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_optional_dependency(mut self, name: impl Into<String>) -> Self {
        self.optional_dependencies.push(name.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Whether the name is usable as a registry key
    pub fn has_valid_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Required dependencies without blank entries or duplicates, in declared order
    pub fn required(&self) -> Vec<String> {
        filter_names(&self.required_dependencies)
    }

    /// Optional dependencies without blank entries or duplicates, in declared order
    pub fn optional(&self) -> Vec<String> {
        filter_names(&self.optional_dependencies)
    }
}

/// Drop blank names and keep the first occurrence of each duplicate
fn filter_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|name| !name.trim().is_empty())
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_filters_blank_and_duplicates() {
        let descriptor = ModuleDescriptor::new("admin").with_dependencies([
            "core", "", "auth", "  ", "core", "auth", "logging",
        ]);

        assert_eq!(descriptor.required(), vec!["core", "auth", "logging"]);
    }

    #[test]
    fn test_blank_name_is_invalid() {
        assert!(!ModuleDescriptor::new("").has_valid_name());
        assert!(!ModuleDescriptor::new(" \t ").has_valid_name());
        assert!(ModuleDescriptor::new("auth").has_valid_name());
    }

    #[test]
    fn test_defaults() {
        let descriptor = ModuleDescriptor::new("core");
        assert_eq!(descriptor.priority, DEFAULT_PRIORITY);
        assert!(descriptor.enabled);
        assert!(descriptor.required().is_empty());
        assert!(descriptor.optional().is_empty());
    }
}
