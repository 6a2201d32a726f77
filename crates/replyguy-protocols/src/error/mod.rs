//! Error types for the ReplyGuy protocol layer.

mod dom;
mod generation;
mod protocol;
mod storage;

pub use dom::*;
pub use generation::*;
pub use protocol::*;
pub use storage::*;
