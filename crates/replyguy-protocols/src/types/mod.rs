//! Shared data types.

mod compose;
mod options;
mod settings;

pub use compose::*;
pub use options::*;
pub use settings::*;
