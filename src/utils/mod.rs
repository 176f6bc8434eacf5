//! Shared utilities

pub mod logging;
pub mod validation;

pub use logging::{init_logging, init_logging_from_config};
#[cfg(feature = "json-logging")]
pub use logging::init_json_logging;
pub use validation::{ensure, ensure_fmt};
