//! Compose-box types: candidates, classifications, extracted context and
//! host regions.

use serde::{Deserialize, Serialize};

use crate::dom::NodeId;

/// How text gets into an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditingKind {
    /// `<textarea>` / `<input>`: value property plus change notifications.
    PlainFormControl,
    /// `contenteditable` region, usually backed by a rich-text editor.
    RichTextEditable,
}

impl EditingKind {
    /// Resolve from the element's tag and `contenteditable` attribute.
    pub fn from_element(tag: &str, contenteditable: Option<&str>) -> Option<Self> {
        let tag = tag.to_ascii_lowercase();
        if tag == "textarea" || tag == "input" {
            return Some(Self::PlainFormControl);
        }
        match contenteditable.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v.is_empty() || v == "true" || v == "plaintext-only" => {
                Some(Self::RichTextEditable)
            }
            _ => None,
        }
    }
}

/// A text-entry element in the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateInput {
    pub node: NodeId,
    pub kind: EditingKind,
}

/// Where a compose box sits on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComposeContext {
    DirectMessage,
    ModalReply,
    InlineReply,
    TopLevelPost,
}

impl ComposeContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectMessage => "direct-message",
            Self::ModalReply => "modal-reply",
            Self::InlineReply => "inline-reply",
            Self::TopLevelPost => "top-level-post",
        }
    }

    /// Whether the overlay should offer replies to something, as opposed to
    /// a fresh post.
    pub fn is_reply(&self) -> bool {
        !matches!(self, Self::TopLevelPost)
    }
}

impl std::fmt::Display for ComposeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic payload handed to generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContext {
    /// Text being replied to.
    pub text: String,
    /// Author label of that text.
    pub author: String,
    /// Earlier messages or posts, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thread: Vec<String>,
}

impl ExtractedContext {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            thread: Vec::new(),
        }
    }

    pub fn with_thread(mut self, thread: Vec<String>) -> Self {
        self.thread = thread;
        self
    }
}

/// The element chosen to host the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerRegion {
    pub node: NodeId,
    /// Width measured when the region was selected.
    pub width: f64,
    /// Name of the locator strategy that produced it.
    pub strategy: &'static str,
}

#[cfg(test)]
#[path = "compose_tests.rs"]
mod tests;
