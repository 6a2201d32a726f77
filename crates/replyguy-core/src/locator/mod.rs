//! Container location.
//!
//! Finds the element that represents "this compose unit" so the overlay can
//! live inside it. Every strategy's answer is validated before it is
//! accepted:
//!
//! - the element is attached and is neither `<html>` nor `<body>`,
//! - it contains the candidate,
//! - its measured width lies within the configured band.
//!
//! `None` means the overlay must not be shown.

use replyguy_config::LocatorConfig;
use replyguy_dom::signatures;
use replyguy_protocols::{ContainerRegion, DomHost, NodeId};
use tracing::{debug, info};

use crate::strategy::Cascade;

/// Ancestor that contains a toolbar, nearest first, that also validates.
/// Skipped entirely when the document has no toolbar.
pub fn toolbar_ancestor(
    dom: &dyn DomHost,
    config: &LocatorConfig,
    candidate: NodeId,
) -> Option<NodeId> {
    dom.query(None, &signatures::TOOLBAR)?;
    dom.ancestors(candidate).into_iter().find(|a| {
        dom.query(Some(*a), &signatures::TOOLBAR).is_some()
            && validate(dom, config, *a, candidate).is_some()
    })
}

/// Nearest ancestor carrying the grouped-controls role.
pub fn grouped_controls(dom: &dyn DomHost, candidate: NodeId) -> Option<NodeId> {
    dom.parent(candidate)
        .and_then(|p| dom.closest(p, &signatures::GROUPED_CONTROLS))
}

/// Nearest enclosing form.
pub fn enclosing_form(dom: &dyn DomHost, candidate: NodeId) -> Option<NodeId> {
    dom.parent(candidate)
        .and_then(|p| dom.closest(p, &signatures::FORM))
}

/// Nearest virtualised list cell.
pub fn list_cell(dom: &dyn DomHost, candidate: NodeId) -> Option<NodeId> {
    dom.parent(candidate)
        .and_then(|p| dom.closest(p, &signatures::LIST_CELL))
}

/// Widest ancestor within the plausible compose-unit band, looking at most
/// `walk_depth` levels up.
pub fn geometric(dom: &dyn DomHost, config: &LocatorConfig, candidate: NodeId) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for ancestor in dom.ancestors(candidate).into_iter().take(config.walk_depth) {
        if dom.is_document_frame(ancestor) {
            break;
        }
        let rect = dom.bounding_rect(ancestor);
        let plausible = rect.width >= config.geometric_min_width
            && rect.width <= config.geometric_max_width
            && rect.height >= config.geometric_min_height;
        if plausible && best.is_none_or(|(_, w)| rect.width > w) {
            best = Some((ancestor, rect.width));
        }
    }
    best.map(|(node, _)| node)
}

/// Check a proposed region against the invariants. Returns the measured
/// width when it holds.
pub fn validate(
    dom: &dyn DomHost,
    config: &LocatorConfig,
    region: NodeId,
    candidate: NodeId,
) -> Option<f64> {
    if !dom.is_connected(region) || dom.is_document_frame(region) {
        return None;
    }
    if !dom.contains(region, candidate) {
        return None;
    }
    let width = dom.bounding_rect(region).width;
    if !config.width_in_bounds(width) {
        debug!("region {} rejected: width {} out of bounds", region, width);
        return None;
    }
    Some(width)
}

pub struct ContainerLocator<'a> {
    dom: &'a dyn DomHost,
    config: &'a LocatorConfig,
}

impl<'a> ContainerLocator<'a> {
    pub fn new(dom: &'a dyn DomHost, config: &'a LocatorConfig) -> Self {
        Self { dom, config }
    }

    fn cascade(&self) -> Cascade<'a, NodeId, NodeId> {
        let dom = self.dom;
        let config = self.config;
        let checked = move |found: Option<NodeId>, candidate: NodeId| {
            found.filter(|region| validate(dom, config, *region, candidate).is_some())
        };
        Cascade::new("container-locator")
            .step("toolbar-ancestor", move |c: &NodeId| {
                toolbar_ancestor(dom, config, *c)
            })
            .step("grouped-controls", move |c: &NodeId| {
                checked(grouped_controls(dom, *c), *c)
            })
            .step("form", move |c: &NodeId| checked(enclosing_form(dom, *c), *c))
            .step("list-cell", move |c: &NodeId| checked(list_cell(dom, *c), *c))
            .step("geometric", move |c: &NodeId| {
                checked(geometric(dom, config, *c), *c)
            })
    }

    /// Strategy names in the order they are tried.
    pub fn strategies(&self) -> Vec<&'static str> {
        self.cascade().names()
    }

    /// Find the host region for `candidate`.
    pub fn locate(&self, candidate: NodeId) -> Option<ContainerRegion> {
        if !self.dom.is_connected(candidate) {
            debug!("candidate {} is detached; no region", candidate);
            return None;
        }
        let Some((strategy, node)) = self.cascade().run(&candidate) else {
            info!("no container region for candidate {}", candidate);
            return None;
        };
        let width = validate(self.dom, self.config, node, candidate)?;
        Some(ContainerRegion {
            node,
            width,
            strategy,
        })
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
