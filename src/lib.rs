//! # ReplyGuy
//!
//! Content script for a context-aware reply and post assistant on X.
//!
//! ```text
//!  page callbacks ──▶ Signal ──▶ ContentScript ──▶ Engine ──▶ overlay + OptionsPanel
//!  panel clicks ───▶ PanelAction ──▶ GenerationSession ──▶ SettingsStore / Generator
//!                                         └──▶ insertion bridge ──▶ compose input
//! ```
//!
//! The browser backend (`web`, wasm32 only) implements the platform traits on
//! top of `web-sys`. Everything else builds and tests natively against
//! [`replyguy_dom::MemoryDom`].
//!
//! # Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

pub mod app;
#[cfg(any(target_arch = "wasm32", test))]
mod handles;
pub mod logging;
pub mod panel;

#[cfg(target_arch = "wasm32")]
mod web;

pub use app::{CONFIG_KEY, ContentScript, Signal, load_config};
pub use panel::{OptionsPanel, PanelAction, PanelStatus};
