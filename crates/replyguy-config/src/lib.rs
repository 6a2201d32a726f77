//! # ReplyGuy Config
//!
//! Tunables for the compose-box engine: overlay marker and margins, locator
//! bounds, watcher debounce windows, extraction depth and generation limits.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
