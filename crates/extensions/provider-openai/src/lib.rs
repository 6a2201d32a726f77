//! OpenAI generation collaborator for ReplyGuy.

mod api;
mod generator;
pub mod prompts;

pub use generator::OpenAIGenerator;
