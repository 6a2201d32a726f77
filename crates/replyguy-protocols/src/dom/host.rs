//! DomHost trait definition.

use super::{DomEventKind, NodeId, Rect, Signature};
use crate::error::DomError;

/// The host page document.
///
/// Reads are infallible: a host that cannot answer returns `None`, an empty
/// string or an empty box, and the engine treats that as a structural
/// mismatch. Writes return [`DomError`] so callers can fall back.
///
/// All methods take `&self`; the document is shared, interior-mutable state
/// owned by the page.
pub trait DomHost {
    /// The document element (`<html>`).
    fn root(&self) -> NodeId;

    /// The `<body>` element, if present.
    fn body(&self) -> Option<NodeId>;

    /// Current `location.href`.
    fn location_href(&self) -> String;

    /// All elements matching `signature` in document order. With a scope,
    /// only descendants of the scope are searched (the scope itself is not).
    fn query_all(&self, scope: Option<NodeId>, signature: &Signature) -> Vec<NodeId>;

    /// All elements whose attribute `name` equals `value`, in document order.
    /// Used for runtime-configured markers that have no static signature.
    fn query_attribute_all(&self, name: &str, value: &str) -> Vec<NodeId>;

    /// Whether the element itself matches `signature`.
    fn matches(&self, node: NodeId, signature: &Signature) -> bool;

    /// Parent element.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Next element sibling.
    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Whether the element is attached to the document.
    fn is_connected(&self, node: NodeId) -> bool;

    /// Lowercase tag name.
    fn tag_name(&self, node: NodeId) -> String;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Concatenated text of the element and its descendants.
    fn text_content(&self, node: NodeId) -> String;

    /// Measured border box.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<NodeId, DomError>;

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError>;

    fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), DomError>;

    fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), DomError>;

    /// Insert `node` into `parent` before `reference`, or as the last child
    /// when `reference` is `None`. Moves the node if it is already attached.
    fn insert_before(
        &self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError>;

    /// Detach the element from its parent. No-op if already detached.
    fn remove(&self, node: NodeId);

    /// Replace all children with a single text node.
    fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), DomError>;

    fn focus(&self, node: NodeId);

    fn click(&self, node: NodeId);

    /// Run the `insertText` editing command against the focused editable.
    /// `Ok(false)` means the host declined the command.
    fn exec_insert_text(&self, node: NodeId, text: &str) -> Result<bool, DomError>;

    /// Dispatch a synthetic paste carrying `text` as `text/plain`.
    /// `Ok(true)` means a page handler consumed the paste.
    fn dispatch_paste(&self, node: NodeId, text: &str) -> Result<bool, DomError>;

    /// Set a form control's value through the platform's own property setter,
    /// bypassing any override a page framework installed on the instance.
    fn set_native_value(&self, node: NodeId, value: &str) -> Result<(), DomError>;

    /// Dispatch a bubbling notification of the given kind.
    fn dispatch(&self, node: NodeId, kind: DomEventKind) -> Result<(), DomError>;

    /// First match in document order.
    fn query(&self, scope: Option<NodeId>, signature: &Signature) -> Option<NodeId> {
        self.query_all(scope, signature).into_iter().next()
    }

    /// Nearest inclusive ancestor matching `signature`.
    fn closest(&self, node: NodeId, signature: &Signature) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.matches(n, signature) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }

    /// Inclusive containment.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    /// Ancestors from the parent outwards.
    fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.parent(node);
        while let Some(n) = current {
            out.push(n);
            current = self.parent(n);
        }
        out
    }

    /// Whether the element is the document element or the body.
    fn is_document_frame(&self, node: NodeId) -> bool {
        node == self.root() || Some(node) == self.body()
    }

    fn append_child(&self, parent: NodeId, node: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, node, None)
    }

    /// Path component of the current location.
    fn location_path(&self) -> String {
        url::Url::parse(&self.location_href())
            .map(|u| u.path().to_string())
            .unwrap_or_default()
    }
}
