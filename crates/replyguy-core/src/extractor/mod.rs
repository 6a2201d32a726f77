//! Context extraction.
//!
//! Given a compose input, decide what kind of composer it is and what it is
//! answering. Extraction is total: when the page does not look the way the
//! signatures expect, a placeholder context comes back instead of an error.

mod dm;

use replyguy_config::ExtractorConfig;
use replyguy_dom::signatures;
use replyguy_protocols::{ComposeContext, DomHost, ExtractedContext, NodeId};
use tracing::{debug, warn};

pub use dm::{message_text, strip_timestamps};

/// Why extraction fell back to a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Miss {
    Detached,
    NoPostUnit,
    NoMessages,
}

impl Miss {
    fn degraded(self) -> ExtractedContext {
        match self {
            Miss::Detached => ExtractedContext::new("Context not available", "Unknown"),
            Miss::NoPostUnit => ExtractedContext::new("Tweet context not available", "Unknown"),
            Miss::NoMessages => ExtractedContext::new("No messages in conversation", "Unknown"),
        }
    }
}

pub struct ContextExtractor<'a> {
    dom: &'a dyn DomHost,
    config: &'a ExtractorConfig,
}

impl<'a> ContextExtractor<'a> {
    pub fn new(dom: &'a dyn DomHost, config: &'a ExtractorConfig) -> Self {
        Self { dom, config }
    }

    /// Whether `candidate` composes a direct message.
    pub fn is_direct_message(&self, candidate: NodeId) -> bool {
        let in_dm_area = signatures::DM_AREAS
            .iter()
            .any(|sig| self.dom.closest(candidate, sig).is_some());
        in_dm_area
            || self.dom.query(None, &signatures::DM_DRAWER).is_some()
            || self
                .dom
                .location_path()
                .starts_with(signatures::MESSAGES_PATH)
    }

    /// Classify the composer hosting `candidate`.
    pub fn classify(&self, candidate: NodeId) -> ComposeContext {
        if self.is_direct_message(candidate) {
            return ComposeContext::DirectMessage;
        }

        if let Some(dialog) = self.dom.closest(candidate, &signatures::DIALOG) {
            return if self.dom.query(Some(dialog), &signatures::POST).is_some() {
                ComposeContext::ModalReply
            } else {
                ComposeContext::TopLevelPost
            };
        }

        if let Some(cell) = self.dom.closest(candidate, &signatures::LIST_CELL) {
            if self.dom.query(Some(cell), &signatures::POST).is_some() {
                return ComposeContext::InlineReply;
            }
        }

        let path = self.dom.location_path();
        if signatures::HOME_PATHS.contains(&path.as_str()) {
            ComposeContext::TopLevelPost
        } else {
            ComposeContext::InlineReply
        }
    }

    /// Extract the semantic payload for `candidate`. Never fails.
    pub fn extract_context(&self, candidate: NodeId) -> ExtractedContext {
        let result = if !self.dom.is_connected(candidate) {
            Err(Miss::Detached)
        } else if self.is_direct_message(candidate) {
            self.extract_dm()
        } else {
            self.extract_post(candidate)
        };

        match result {
            Ok(ctx) => {
                debug!(
                    "extracted context by '{}' ({} chars, {} prior)",
                    ctx.author,
                    ctx.text.len(),
                    ctx.thread.len()
                );
                ctx
            }
            Err(miss) => {
                warn!("context extraction degraded: {:?}", miss);
                miss.degraded()
            }
        }
    }

    fn extract_post(&self, candidate: NodeId) -> Result<ExtractedContext, Miss> {
        let post = self
            .dom
            .closest(candidate, &signatures::POST)
            .or_else(|| self.dom.query(None, &signatures::POST))
            .ok_or(Miss::NoPostUnit)?;

        let text = self.child_text(post, &signatures::POST_TEXT).unwrap_or_default();
        let author = self
            .child_text(post, &signatures::AUTHOR)
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(ExtractedContext::new(text, author).with_thread(self.thread_before(post)))
    }

    /// Text of up to `thread_depth` post units preceding `post` in document
    /// order, oldest first.
    fn thread_before(&self, post: NodeId) -> Vec<String> {
        let posts = self.dom.query_all(None, &signatures::POST);
        let Some(index) = posts.iter().position(|p| *p == post) else {
            return Vec::new();
        };
        let start = index.saturating_sub(self.config.thread_depth);
        posts[start..index]
            .iter()
            .filter_map(|p| self.child_text(*p, &signatures::POST_TEXT))
            .collect()
    }

    fn child_text(&self, scope: NodeId, signature: &replyguy_protocols::Signature) -> Option<String> {
        self.dom
            .query(Some(scope), signature)
            .map(|n| self.dom.text_content(n).trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
