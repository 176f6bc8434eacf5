//! Validation utilities
//!
//! Provides helpers for common validation patterns.

/// Ensure a condition is true, or return an error
///
/// Similar to `assert!` but returns a Result instead of panicking.
pub fn ensure(condition: bool, message: &str) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(message.to_string())
    }
}

/// Ensure a condition is true with a lazily formatted error message
pub fn ensure_fmt<F>(condition: bool, message: F) -> Result<(), String>
where
    F: FnOnce() -> String,
{
    if condition {
        Ok(())
    } else {
        Err(message())
    }
}
