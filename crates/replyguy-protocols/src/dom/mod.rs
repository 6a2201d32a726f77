//! The host page document as seen by the engine.
//!
//! The engine never touches a browser API directly. Everything it needs from
//! the page goes through [`DomHost`], which lets the same heuristics run
//! against the live page (wasm32) and against synthetic fixtures in tests.

mod dom_types;
mod host;
mod signature;

pub use dom_types::{DomEventKind, NodeId, Rect};
pub use host::DomHost;
pub use signature::{AttrMatch, AttrOp, Signature};
