//! Settings storage for ReplyGuy.
//!
//! Values live under three keys, mirroring what the extension keeps in the
//! browser's local storage:
//!
//! | Key | Value |
//! |---|---|
//! | `replyguy_api_key` | API key, plain string |
//! | `replyguy_model` | model name, e.g. `gpt-3.5-turbo` |
//! | `replyguy_custom_profiles` | JSON array of custom profiles |
//!
//! The backend is pluggable: [`MemoryBackend`] for tests, [`JsonFileBackend`]
//! on native targets, and a `localStorage` backend in the browser build.

mod backend;
mod error;
mod storage;

pub use backend::{KeyValueBackend, MemoryBackend};
#[cfg(not(target_arch = "wasm32"))]
pub use backend::JsonFileBackend;
pub use error::LocalStorageError;
pub use storage::{API_KEY_KEY, CUSTOM_PROFILES_KEY, MODEL_KEY, SettingsStorage};
