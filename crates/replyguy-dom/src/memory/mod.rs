//! In-memory document.
//!
//! [`MemoryDom`] keeps an arena of element nodes behind a `RefCell`. It models
//! what the engine relies on: tree structure, attributes, text, measured
//! boxes, focus, editing commands and dispatched notifications. It is not a
//! browser; layout is whatever the fixture says it is.

mod node;

use std::cell::RefCell;

use replyguy_protocols::{DomError, DomEventKind, DomHost, NodeId, Rect, Signature};
use tracing::trace;

pub use node::{EditorBehavior, ElementSpec};
use node::NodeData;

const DEFAULT_HREF: &str = "https://x.com/home";

#[derive(Debug)]
struct Arena {
    nodes: Vec<NodeData>,
    root: NodeId,
    body: NodeId,
    focused: Option<NodeId>,
    events: Vec<(NodeId, DomEventKind)>,
    href: String,
}

impl Arena {
    fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0 as usize)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(DomError::UnknownNode(id))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(data);
        id
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            if n == self.root {
                return true;
            }
            current = self.get(n).and_then(|d| d.parent);
        }
        false
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.get(n).and_then(|d| d.parent);
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.get(id).and_then(|d| d.parent);
        if let Some(parent) = parent {
            if let Ok(p) = self.get_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        if let Ok(node) = self.get_mut(id) {
            node.parent = None;
        }
    }

    fn preorder(&self, start: NodeId, include_start: bool, out: &mut Vec<NodeId>) {
        if include_start {
            out.push(start);
        }
        if let Some(data) = self.get(start) {
            for child in &data.children {
                self.preorder(*child, true, out);
            }
        }
    }

    fn text_of(&self, id: NodeId, out: &mut String) {
        if let Some(data) = self.get(id) {
            out.push_str(&data.text);
            for child in &data.children {
                self.text_of(*child, out);
            }
        }
    }

    fn matches(&self, id: NodeId, signature: &Signature) -> bool {
        self.get(id)
            .map(|d| signature.matches_with(&d.tag, |name| d.attrs.get(name).cloned()))
            .unwrap_or(false)
    }

    fn record(&mut self, node: NodeId, kind: DomEventKind) {
        trace!("memory dom: {} on {}", kind.as_str(), node);
        self.events.push((node, kind));
    }
}

/// An in-memory [`DomHost`].
#[derive(Debug)]
pub struct MemoryDom {
    arena: RefCell<Arena>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// A document with `<html>` and an empty `<body>` sized like a desktop
    /// viewport, located at the home timeline.
    pub fn new() -> Self {
        let mut arena = Arena {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            focused: None,
            events: Vec::new(),
            href: DEFAULT_HREF.to_string(),
        };
        let mut html = NodeData::new("html");
        html.rect = Rect::sized(1280.0, 800.0);
        let root = arena.push(html);
        let mut body = NodeData::new("body");
        body.rect = Rect::sized(1280.0, 800.0);
        body.parent = Some(root);
        let body = arena.push(body);
        arena.nodes[root.0 as usize].children.push(body);
        arena.root = root;
        arena.body = body;
        Self {
            arena: RefCell::new(arena),
        }
    }

    /// Build a document whose body holds the given JSON fixture (a single
    /// element or an array of elements).
    pub fn from_fixture_json(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let specs: Vec<ElementSpec> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };
        let dom = Self::new();
        let body = dom.arena.borrow().body;
        for spec in &specs {
            dom.append(body, spec);
        }
        Ok(dom)
    }

    /// Build `spec` and append it under `parent`. Returns the new subtree root.
    pub fn append(&self, parent: NodeId, spec: &ElementSpec) -> NodeId {
        let id = self.build(spec);
        let mut arena = self.arena.borrow_mut();
        if let Ok(p) = arena.get_mut(parent) {
            p.children.push(id);
            if let Ok(node) = arena.get_mut(id) {
                node.parent = Some(parent);
            }
        }
        id
    }

    /// Build `spec` as a detached subtree.
    pub fn build(&self, spec: &ElementSpec) -> NodeId {
        let mut data = NodeData::new(&spec.tag);
        data.attrs = spec.attrs.clone();
        data.text = spec.text.clone().unwrap_or_default();
        data.rect = Rect::sized(spec.width, spec.height);
        let id = self.arena.borrow_mut().push(data);
        for child in &spec.children {
            self.append(id, child);
        }
        id
    }

    /// Detach `node` without going through the trait (simulates the page
    /// removing it, e.g. on virtualised scroll).
    pub fn detach(&self, node: NodeId) {
        self.arena.borrow_mut().detach(node);
    }

    pub fn set_href(&self, href: &str) {
        self.arena.borrow_mut().href = href.to_string();
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        if let Ok(data) = self.arena.borrow_mut().get_mut(node) {
            data.rect = rect;
        }
    }

    pub fn set_width(&self, node: NodeId, width: f64) {
        let height = self.bounding_rect(node).height;
        self.set_rect(node, Rect::sized(width, height.max(1.0)));
    }

    pub fn set_editor_behavior(&self, node: NodeId, behavior: EditorBehavior) {
        if let Ok(data) = self.arena.borrow_mut().get_mut(node) {
            data.editor = behavior;
        }
    }

    /// Current value of a form control.
    pub fn value(&self, node: NodeId) -> String {
        self.arena
            .borrow()
            .get(node)
            .map(|d| d.value.clone())
            .unwrap_or_default()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.arena
            .borrow()
            .get(node)
            .and_then(|d| d.styles.get(property).cloned())
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.arena.borrow().focused
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.arena
            .borrow()
            .get(node)
            .map(|d| d.children.clone())
            .unwrap_or_default()
    }

    /// Notifications dispatched on `node`, oldest first.
    pub fn events_for(&self, node: NodeId) -> Vec<DomEventKind> {
        self.arena
            .borrow()
            .events
            .iter()
            .filter(|(n, _)| *n == node)
            .map(|(_, k)| *k)
            .collect()
    }

    pub fn count_events(&self, node: NodeId, kind: DomEventKind) -> usize {
        self.events_for(node).into_iter().filter(|k| *k == kind).count()
    }

    pub fn clear_events(&self) {
        self.arena.borrow_mut().events.clear();
    }

    /// First connected element whose `name` attribute equals `value`.
    pub fn find_by_attr(&self, name: &str, value: &str) -> Option<NodeId> {
        self.query_attribute_all(name, value).into_iter().next()
    }

    pub fn by_testid(&self, value: &str) -> Option<NodeId> {
        self.find_by_attr("data-testid", value)
    }

    /// Every connected element, in document order.
    pub fn all_elements(&self) -> Vec<NodeId> {
        let arena = self.arena.borrow();
        let mut out = Vec::new();
        arena.preorder(arena.root, true, &mut out);
        out
    }
}

impl DomHost for MemoryDom {
    fn root(&self) -> NodeId {
        self.arena.borrow().root
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.arena.borrow().body)
    }

    fn location_href(&self) -> String {
        self.arena.borrow().href.clone()
    }

    fn query_all(&self, scope: Option<NodeId>, signature: &Signature) -> Vec<NodeId> {
        let arena = self.arena.borrow();
        let mut order = Vec::new();
        match scope {
            Some(scope) => arena.preorder(scope, false, &mut order),
            None => arena.preorder(arena.root, true, &mut order),
        }
        order
            .into_iter()
            .filter(|id| arena.matches(*id, signature))
            .collect()
    }

    fn query_attribute_all(&self, name: &str, value: &str) -> Vec<NodeId> {
        let arena = self.arena.borrow();
        let mut order = Vec::new();
        arena.preorder(arena.root, true, &mut order);
        order
            .into_iter()
            .filter(|id| {
                arena
                    .get(*id)
                    .and_then(|d| d.attrs.get(name))
                    .is_some_and(|v| v == value)
            })
            .collect()
    }

    fn matches(&self, node: NodeId, signature: &Signature) -> bool {
        self.arena.borrow().matches(node, signature)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.borrow().get(node).and_then(|d| d.parent)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let arena = self.arena.borrow();
        let parent = arena.get(node)?.parent?;
        let siblings = &arena.get(parent)?.children;
        let index = siblings.iter().position(|c| *c == node)?;
        siblings.get(index + 1).copied()
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.arena.borrow().is_connected(node)
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.arena
            .borrow()
            .get(node)
            .map(|d| d.tag.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.arena
            .borrow()
            .get(node)
            .and_then(|d| d.attrs.get(name).cloned())
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.arena.borrow().text_of(node, &mut out);
        out
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        let arena = self.arena.borrow();
        if !arena.is_connected(node) {
            return Rect::default();
        }
        arena.get(node).map(|d| d.rect).unwrap_or_default()
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomError::Script(format!("InvalidCharacterError: {}", tag)));
        }
        Ok(self.arena.borrow_mut().push(NodeData::new(tag)))
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.arena
            .borrow_mut()
            .get_mut(node)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.arena.borrow_mut().get_mut(node)?.attrs.remove(name);
        Ok(())
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.arena
            .borrow_mut()
            .get_mut(node)?
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn insert_before(
        &self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();
        arena.get_mut(parent)?;
        arena.get_mut(node)?;
        if arena.is_inclusive_ancestor(node, parent) {
            return Err(DomError::HierarchyRequest { parent, node });
        }
        if let Some(reference) = reference {
            if reference == node {
                return Ok(());
            }
            let ref_parent = arena.get(reference).and_then(|d| d.parent);
            if ref_parent != Some(parent) {
                return Err(DomError::NotAChild { parent, reference });
            }
        }

        arena.detach(node);
        let p = arena.get_mut(parent)?;
        let index = match reference {
            Some(reference) => p
                .children
                .iter()
                .position(|c| *c == reference)
                .unwrap_or(p.children.len()),
            None => p.children.len(),
        };
        p.children.insert(index, node);
        arena.get_mut(node)?.parent = Some(parent);
        Ok(())
    }

    fn remove(&self, node: NodeId) {
        self.arena.borrow_mut().detach(node);
    }

    fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();
        let children = std::mem::take(&mut arena.get_mut(node)?.children);
        for child in children {
            if let Ok(c) = arena.get_mut(child) {
                c.parent = None;
            }
        }
        arena.get_mut(node)?.text = text.to_string();
        Ok(())
    }

    fn focus(&self, node: NodeId) {
        let mut arena = self.arena.borrow_mut();
        if arena.is_connected(node) {
            arena.focused = Some(node);
            arena.record(node, DomEventKind::Focus);
        }
    }

    fn click(&self, node: NodeId) {
        let mut arena = self.arena.borrow_mut();
        if arena.is_connected(node) {
            arena.record(node, DomEventKind::Click);
        }
    }

    fn exec_insert_text(&self, node: NodeId, text: &str) -> Result<bool, DomError> {
        let mut arena = self.arena.borrow_mut();
        if !arena.is_connected(node) {
            return Err(DomError::Detached(node));
        }
        let editor = arena.get_mut(node)?.editor;
        if editor.throws {
            return Err(DomError::Script("execCommand threw".to_string()));
        }
        if arena.focused != Some(node) || !editor.accepts_insert_text {
            return Ok(false);
        }
        arena.get_mut(node)?.text.push_str(text);
        arena.record(node, DomEventKind::Input);
        Ok(true)
    }

    fn dispatch_paste(&self, node: NodeId, text: &str) -> Result<bool, DomError> {
        let mut arena = self.arena.borrow_mut();
        if !arena.is_connected(node) {
            return Err(DomError::Detached(node));
        }
        let editor = arena.get_mut(node)?.editor;
        if editor.throws {
            return Err(DomError::Script("ClipboardEvent constructor threw".to_string()));
        }
        arena.record(node, DomEventKind::Paste);
        if editor.consumes_paste {
            arena.get_mut(node)?.text.push_str(text);
            return Ok(true);
        }
        Ok(false)
    }

    fn set_native_value(&self, node: NodeId, value: &str) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();
        let data = arena.get_mut(node)?;
        if data.tag != "textarea" && data.tag != "input" {
            return Err(DomError::Unsupported(format!(
                "value setter on <{}>",
                data.tag
            )));
        }
        data.value = value.to_string();
        Ok(())
    }

    fn dispatch(&self, node: NodeId, kind: DomEventKind) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();
        arena.get_mut(node)?;
        arena.record(node, kind);
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
