//! # ReplyGuy DOM
//!
//! The structural signature table for the host page, and [`MemoryDom`], an
//! in-memory [`DomHost`](replyguy_protocols::DomHost) used to build fixture
//! pages for the engine's tests.

pub mod memory;
pub mod signatures;

pub use memory::{EditorBehavior, ElementSpec, MemoryDom};
