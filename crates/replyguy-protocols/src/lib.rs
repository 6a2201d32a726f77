//! # ReplyGuy Protocols
//!
//! Core protocol definitions (traits) and shared data types for ReplyGuy.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`DomHost`] - The host page document as seen by the engine
//! - [`Generator`] - Text generation collaborator
//! - [`SettingsStore`] - Settings and custom profile persistence collaborator
//! - [`Scheduler`] - Keyed one-shot timers used for debouncing
//! - [`ObserverHost`] - Resize and activation observers owned by the platform

pub mod dom;
pub mod error;
pub mod generator;
pub mod scheduler;
pub mod store;
pub mod types;

// Re-export core traits
pub use dom::{AttrMatch, AttrOp, DomEventKind, DomHost, NodeId, Rect, Signature};
pub use error::{DomError, GenerationError, ProtocolError, StorageError};
pub use generator::{GenerationMode, GenerationRequest, Generator};
pub use scheduler::{ObserverHost, Scheduler, TimerKey};
pub use store::SettingsStore;
pub use types::*;
