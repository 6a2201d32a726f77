//! # ReplyGuy Core
//!
//! The compose-box engine: it notices when a reply or post composer appears,
//! works out what the composer is answering, picks a host region that is safe
//! to inject into, keeps a single overlay positioned inside it, and writes
//! generated text back into the page.
//!
//! Everything here talks to the page through [`DomHost`], to time through
//! [`Scheduler`] and to platform observers through [`ObserverHost`], so the
//! whole engine runs against [`replyguy_dom::MemoryDom`] in tests.
//!
//! [`DomHost`]: replyguy_protocols::DomHost
//! [`Scheduler`]: replyguy_protocols::Scheduler
//! [`ObserverHost`]: replyguy_protocols::ObserverHost

pub mod bridge;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod locator;
pub mod overlay;
pub mod scheduler;
pub mod session;
pub mod strategy;
pub mod watcher;

#[cfg(test)]
mod fixtures;

pub use bridge::{PlainControlWriter, RichTextWriter, TextWriter, WriteMethod};
pub use engine::{Engine, EngineStats};
pub use error::SessionError;
pub use extractor::ContextExtractor;
pub use locator::ContainerLocator;
pub use overlay::{
    Detection, MountRecord, OverlayLayout, OverlayManager, OverlayState, OverlayUi, OverlayView,
    TeardownReason,
};
pub use scheduler::ManualScheduler;
pub use session::{GenerationOption, GenerationSession, PendingGeneration};
pub use strategy::Cascade;
pub use watcher::{NavigationTracker, ObserverCall, RecordingObservers};
