//! Shared helpers for module system tests

pub mod test_utils;
