//! Manifest validation framework
//!
//! Validates module manifests for structure and dependency declarations.

use tracing::{debug, warn};

use crate::module::registry::manifest::ModuleManifest;

/// Manifest validation outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestValidation {
    /// Manifest is valid
    Valid,
    /// Manifest is invalid with specific errors
    Invalid(Vec<String>),
}

/// Manifest validator
pub struct ManifestValidator {
    /// Maximum module name length
    max_name_len: usize,
}

impl ManifestValidator {
    /// Create a new manifest validator
    pub fn new() -> Self {
        Self { max_name_len: 64 }
    }

    /// Validate a module manifest
    pub fn validate(&self, manifest: &ModuleManifest) -> ManifestValidation {
        let mut errors = Vec::new();

        if manifest.name.is_empty() {
            errors.push("Module name cannot be empty".to_string());
        } else if !self.is_valid_name(&manifest.name) {
            errors.push(format!(
                "Invalid module name: {} (must be alphanumeric with dashes/underscores/dots)",
                manifest.name
            ));
        }

        if manifest.version.is_empty() {
            errors.push("Module version cannot be empty".to_string());
        } else if !self.is_valid_version(&manifest.version) {
            errors.push(format!(
                "Invalid version format: {} (expected semantic versioning)",
                manifest.version
            ));
        }

        let declared = manifest
            .dependencies
            .iter()
            .chain(manifest.optional_dependencies.iter());
        for dep in declared {
            if dep.trim().is_empty() {
                // Blank entries are filtered out by the resolver
                continue;
            }
            if !self.is_valid_name(dep) {
                errors.push(format!("Invalid dependency name: {}", dep));
            }
            if *dep == manifest.name {
                errors.push(format!("Module {} depends on itself", manifest.name));
            }
        }

        if errors.is_empty() {
            debug!("Manifest validation passed for module: {}", manifest.name);
            ManifestValidation::Valid
        } else {
            warn!(
                "Manifest validation failed for module {}: {:?}",
                manifest.name, errors
            );
            ManifestValidation::Invalid(errors)
        }
    }

    /// Validate module name format
    #[inline]
    fn is_valid_name(&self, name: &str) -> bool {
        if name.is_empty() || name.len() > self.max_name_len {
            return false;
        }

        if !name.chars().next().is_some_and(|c| c.is_alphanumeric()) {
            return false;
        }

        name.chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    }

    /// Validate version format (semantic versioning)
    ///
    /// Accepts: major.minor[.patch][-prerelease][+build]
    #[inline]
    fn is_valid_version(&self, version: &str) -> bool {
        let base = version.split('+').next().unwrap_or_default();
        let version_part = base.split('-').next().unwrap_or_default();

        let nums: Vec<&str> = version_part.split('.').collect();
        if nums.len() < 2 || nums.len() > 3 {
            return false;
        }

        nums.iter().all(|n| {
            !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) && n.parse::<u32>().is_ok()
        })
    }
}

impl Default for ManifestValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(name: &str, version: &str, deps: &[&str]) -> ModuleManifest {
        ModuleManifest {
            name: name.to_string(),
            version: version.to_string(),
            description: None,
            author: None,
            priority: 100,
            enabled: true,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            optional_dependencies: Vec::new(),
        }
    }

    #[test]
    fn test_valid_manifest() {
        let validator = ManifestValidator::new();
        assert_eq!(
            validator.validate(&manifest("MicFx.Auth", "1.0.0-beta+42", &["core"])),
            ManifestValidation::Valid
        );
    }

    #[test]
    fn test_invalid_fields_collected() {
        let validator = ManifestValidator::new();
        match validator.validate(&manifest("-bad", "one", &["ok", "no spaces"])) {
            ManifestValidation::Invalid(errors) => assert_eq!(errors.len(), 3),
            ManifestValidation::Valid => panic!("expected invalid manifest"),
        }
    }

    #[test]
    fn test_self_dependency_flagged() {
        let validator = ManifestValidator::new();
        match validator.validate(&manifest("auth", "1.0", &["auth"])) {
            ManifestValidation::Invalid(errors) => {
                assert!(errors.iter().any(|e| e.contains("depends on itself")));
            }
            ManifestValidation::Valid => panic!("expected invalid manifest"),
        }
    }

    #[test]
    fn test_blank_dependency_ignored() {
        let validator = ManifestValidator::new();
        assert_eq!(
            validator.validate(&manifest("admin", "2.1", &["", "core"])),
            ManifestValidation::Valid
        );
    }
}
