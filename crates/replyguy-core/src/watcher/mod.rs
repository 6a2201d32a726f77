//! Detection of compose inputs and page navigation.
//!
//! The platform glue feeds the engine three kinds of raw signals: batches of
//! added nodes, element resizes and periodic location probes. This module
//! turns added-node batches into at most one candidate and decides when the
//! location has actually changed.

mod observers;

use replyguy_dom::signatures;
use replyguy_protocols::{CandidateInput, DomHost, EditingKind, NodeId};
use tracing::trace;

pub use observers::{ObserverCall, RecordingObservers};

/// Editing kind of a matched input. Elements that match a compose signature
/// without declaring themselves editable are treated as rich text.
pub fn resolve_kind(dom: &dyn DomHost, node: NodeId) -> EditingKind {
    let contenteditable = dom.attribute(node, "contenteditable");
    EditingKind::from_element(&dom.tag_name(node), contenteditable.as_deref())
        .unwrap_or(EditingKind::RichTextEditable)
}

fn inside(dom: &dyn DomHost, overlay: Option<NodeId>, node: NodeId) -> bool {
    overlay.is_some_and(|o| dom.contains(o, node))
}

/// Whether every node in the batch belongs to the overlay itself.
pub fn is_own_mutation(dom: &dyn DomHost, added: &[NodeId], overlay: Option<NodeId>) -> bool {
    !added.is_empty() && added.iter().all(|n| inside(dom, overlay, *n))
}

/// First compose input among `added` (each node or its descendants), in
/// signature priority order. Nodes inside the overlay are ignored.
pub fn scan_added(
    dom: &dyn DomHost,
    added: &[NodeId],
    overlay: Option<NodeId>,
) -> Option<CandidateInput> {
    let roots: Vec<NodeId> = added
        .iter()
        .copied()
        .filter(|n| dom.is_connected(*n) && !inside(dom, overlay, *n))
        .collect();
    if roots.is_empty() {
        return None;
    }

    let inputs: &'static [_] = &signatures::COMPOSE_INPUTS;
    for signature in inputs {
        for root in &roots {
            let found = if dom.matches(*root, signature) {
                Some(*root)
            } else {
                dom.query_all(Some(*root), signature)
                    .into_iter()
                    .find(|n| !inside(dom, overlay, *n))
            };
            if let Some(node) = found {
                trace!("compose input {} matched '{}'", node, signature.name);
                return Some(CandidateInput {
                    node,
                    kind: resolve_kind(dom, node),
                });
            }
        }
    }
    None
}

/// First compose input anywhere in the document.
pub fn scan_document(dom: &dyn DomHost, overlay: Option<NodeId>) -> Option<CandidateInput> {
    let inputs: &'static [_] = &signatures::COMPOSE_INPUTS;
    inputs.iter().find_map(|signature| {
        dom.query_all(None, signature)
            .into_iter()
            .find(|n| !inside(dom, overlay, *n))
            .map(|node| CandidateInput {
                node,
                kind: resolve_kind(dom, node),
            })
    })
}

/// Remembers the last seen location.
#[derive(Debug, Default, Clone)]
pub struct NavigationTracker {
    last_href: Option<String>,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_href(&self) -> Option<&str> {
        self.last_href.as_deref()
    }

    /// Record `href`. Returns true when it differs from the previous one;
    /// the first observation only sets the baseline.
    pub fn observe(&mut self, href: &str) -> bool {
        match self.last_href.replace(href.to_string()) {
            Some(previous) => previous != href,
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.last_href = None;
    }
}
