//! Insertion points inside a container region.

use replyguy_dom::signatures;
use replyguy_protocols::{DomHost, NodeId};

/// Where the overlay element goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Directly before the region's toolbar.
    BeforeToolbar { parent: NodeId, toolbar: NodeId },
    /// After the candidate's nearest wrapper that has a following sibling.
    AfterWrapper { parent: NodeId, next: NodeId },
    /// Last child of the region.
    Append { region: NodeId },
}

impl Anchor {
    pub fn parent(&self) -> NodeId {
        match self {
            Anchor::BeforeToolbar { parent, .. } | Anchor::AfterWrapper { parent, .. } => *parent,
            Anchor::Append { region } => *region,
        }
    }

    pub fn reference(&self) -> Option<NodeId> {
        match self {
            Anchor::BeforeToolbar { toolbar, .. } => Some(*toolbar),
            Anchor::AfterWrapper { next, .. } => Some(*next),
            Anchor::Append { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Anchor::BeforeToolbar { .. } => "before-toolbar",
            Anchor::AfterWrapper { .. } => "after-wrapper",
            Anchor::Append { .. } => "append",
        }
    }

    /// Whether `element` already sits exactly here.
    pub fn holds(&self, dom: &dyn DomHost, element: NodeId) -> bool {
        dom.parent(element) == Some(self.parent()) && dom.next_sibling(element) == self.reference()
    }
}

fn is_post_unit(dom: &dyn DomHost, node: NodeId) -> bool {
    dom.closest(node, &signatures::POST).is_some()
        || dom.query(Some(node), &signatures::POST).is_some()
}

fn next_sibling_skipping(dom: &dyn DomHost, node: NodeId, skip: Option<NodeId>) -> Option<NodeId> {
    let next = dom.next_sibling(node)?;
    if Some(next) == skip {
        dom.next_sibling(next)
    } else {
        Some(next)
    }
}

/// Pick the insertion point for the overlay inside `region`.
pub fn choose_anchor(
    dom: &dyn DomHost,
    region: NodeId,
    candidate: NodeId,
    overlay: Option<NodeId>,
) -> Anchor {
    let outside_overlay = |n: &NodeId| overlay.is_none_or(|o| !dom.contains(o, *n));

    let toolbar = dom
        .query_all(Some(region), &signatures::TOOLBAR)
        .into_iter()
        .find(outside_overlay);
    if let Some(toolbar) = toolbar {
        if let Some(parent) = dom.parent(toolbar) {
            return Anchor::BeforeToolbar { parent, toolbar };
        }
    }

    let mut wrapper = dom.parent(candidate);
    while let Some(w) = wrapper {
        if w == region || !dom.contains(region, w) {
            break;
        }
        if let (Some(next), Some(parent)) = (next_sibling_skipping(dom, w, overlay), dom.parent(w)) {
            if !is_post_unit(dom, next) {
                return Anchor::AfterWrapper { parent, next };
            }
        }
        wrapper = dom.parent(w);
    }

    Anchor::Append { region }
}
