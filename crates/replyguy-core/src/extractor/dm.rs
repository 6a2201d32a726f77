//! Direct-message extraction.

use std::sync::LazyLock;

use regex::Regex;
use replyguy_dom::signatures;
use replyguy_protocols::{DomHost, ExtractedContext, NodeId, Signature};

use super::{ContextExtractor, Miss};
use crate::strategy::{Cascade, non_empty};

static CLOCK_TIME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d{1,2}:\d{2}(?:\s*[ap]\.?m\.?)?").ok());

static SEPARATORS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s*·\s*").ok());

/// Remove clock times and the `·` separators left around them, and collapse
/// whitespace.
pub fn strip_timestamps(text: &str) -> String {
    let mut out = text.to_string();
    if let Some(re) = CLOCK_TIME.as_ref() {
        out = re.replace_all(&out, " ").into_owned();
    }
    if let Some(re) = SEPARATORS.as_ref() {
        out = re.replace_all(&out, " ").into_owned();
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of one message: the most specific text-bearing child that has any
/// text, falling back to the whole element.
pub fn message_text(dom: &dyn DomHost, message: NodeId) -> String {
    let specific: &'static [Signature] = &signatures::MESSAGE_TEXT;
    let cascade: Cascade<'_, NodeId, String> = specific.iter().fold(
        Cascade::new("message-text"),
        |cascade, sig| {
            cascade.step(sig.name, move |m: &NodeId| {
                dom.query(Some(*m), sig)
                    .map(|n| strip_timestamps(&dom.text_content(n)))
                    .filter(|t| !t.is_empty())
            })
        },
    );
    cascade
        .step("full-text", |m: &NodeId| {
            Some(strip_timestamps(&dom.text_content(*m))).filter(|t| !t.is_empty())
        })
        .first(&message)
        .unwrap_or_else(|| "Message text not available".to_string())
}

/// Drop matches nested inside another match. `nodes` is in document order,
/// so a nested match always follows the last match kept before it.
fn outermost(dom: &dyn DomHost, nodes: Vec<NodeId>) -> Vec<NodeId> {
    let mut kept: Vec<NodeId> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if kept.last().is_some_and(|last| dom.contains(*last, node)) {
            continue;
        }
        kept.push(node);
    }
    kept
}

fn with_text(dom: &dyn DomHost, nodes: Vec<NodeId>) -> Vec<NodeId> {
    nodes
        .into_iter()
        .filter(|n| !dom.text_content(*n).trim().is_empty())
        .collect()
}

impl ContextExtractor<'_> {
    pub(super) fn extract_dm(&self) -> Result<ExtractedContext, Miss> {
        let dom = self.dom;
        let scope = dom.query(None, &signatures::DM_DRAWER);
        let scan = |sig: &Signature| -> Option<Vec<NodeId>> {
            non_empty(with_text(dom, outermost(dom, dom.query_all(scope, sig))))
        };

        let messages = Cascade::<'_, (), Vec<NodeId>>::new("dm-messages")
            .step("message-entry", |_| scan(&signatures::MESSAGE_ENTRY))
            .step("message-flavoured", |_| scan(&signatures::MESSAGE_FLAVOURED))
            .step("main-region-items", |_| {
                let main = dom.query(None, &signatures::MAIN_REGION)?;
                [signatures::ARTICLE, signatures::CONVERSATION_ITEM]
                    .iter()
                    .find_map(|sig| {
                        non_empty(with_text(dom, outermost(dom, dom.query_all(Some(main), sig))))
                    })
            })
            .step("text-bearing", |_| scan(&signatures::TEXT_BEARING))
            .first(&())
            .ok_or(Miss::NoMessages)?;

        let tail_start = messages.len().saturating_sub(self.config.dm_tail.max(1));
        let tail = &messages[tail_start..];
        let Some((last, prior)) = tail.split_last() else {
            return Err(Miss::NoMessages);
        };

        let author = dom
            .query(Some(*last), &signatures::AUTHOR)
            .map(|n| dom.text_content(n).trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "DM Sender".to_string());

        let thread = prior.iter().map(|m| message_text(dom, *m)).collect();
        Ok(ExtractedContext::new(message_text(dom, *last), author).with_thread(thread))
    }
}
