//! Module validation
//!
//! Structural checks for module manifests.

pub mod manifest_validator;

pub use manifest_validator::{ManifestValidation, ManifestValidator};
