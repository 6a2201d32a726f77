//! [`DomHost`] over the live page.

use std::cell::RefCell;

use js_sys::{Function, Object, Reflect};
use replyguy_protocols::{DomError, DomEventKind, DomHost, NodeId, Rect, Signature};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    ClipboardEvent, ClipboardEventInit, DataTransfer, Document, Element, Event, EventInit,
    HtmlDocument, HtmlElement, NodeList, Window,
};

use crate::handles::{HandleTable, SWEEP_THRESHOLD};

/// Property stamped on every element the engine has seen.
const HANDLE_KEY: &str = "__replyguyNode";

pub(crate) fn script_error(err: JsValue) -> DomError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    DomError::Script(message)
}

pub struct BrowserDom {
    window: Window,
    document: Document,
    nodes: RefCell<HandleTable<Element>>,
    /// Id of the overlay element, whose handle survives while detached.
    overlay_id: String,
}

impl BrowserDom {
    pub fn new(window: Window, overlay_id: &str) -> Result<Self, JsValue> {
        let document = window.document().ok_or("no document")?;
        Ok(Self {
            window,
            document,
            nodes: RefCell::new(HandleTable::new(SWEEP_THRESHOLD)),
            overlay_id: overlay_id.to_string(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Handle for `element`, issuing one on first sight.
    pub fn handle(&self, element: &Element) -> NodeId {
        let target: &JsValue = element.as_ref();
        let key = JsValue::from_str(HANDLE_KEY);
        if let Some(id) = Reflect::get(target, &key).ok().and_then(|v| v.as_f64()) {
            let node = NodeId(id as u64);
            if self.nodes.borrow().contains(node) {
                return node;
            }
        }
        let node = self.nodes.borrow_mut().insert(element.clone());
        let _ = Reflect::set(target, &key, &JsValue::from_f64(node.0 as f64));
        node
    }

    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node).cloned()
    }

    fn keep(&self, element: &Element) -> bool {
        element.is_connected() || element.id() == self.overlay_id
    }

    /// Forget handles of elements that left the document.
    pub fn prune(&self) -> usize {
        self.nodes.borrow_mut().prune(|e| self.keep(e))
    }

    /// [`prune`](Self::prune) once the table has grown past its limit. Only
    /// called between callbacks, never while panel nodes are being built
    /// detached.
    pub fn sweep(&self) -> usize {
        self.nodes.borrow_mut().sweep(|e| self.keep(e))
    }

    fn require(&self, node: NodeId) -> Result<Element, DomError> {
        self.element(node).ok_or(DomError::UnknownNode(node))
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into().ok()
    }

    fn collect(&self, list: NodeList) -> Vec<NodeId> {
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|n| n.dyn_into::<Element>().ok())
            .map(|e| self.handle(&e))
            .collect()
    }

    fn select(&self, scope: Option<NodeId>, css: &str) -> Vec<NodeId> {
        let list = match scope {
            Some(scope) => match self.element(scope) {
                Some(element) => element.query_selector_all(css),
                None => return Vec::new(),
            },
            None => self.document.query_selector_all(css),
        };
        list.map(|l| self.collect(l)).unwrap_or_default()
    }
}

impl DomHost for BrowserDom {
    fn root(&self) -> NodeId {
        self.document
            .document_element()
            .map(|e| self.handle(&e))
            .unwrap_or(NodeId(0))
    }

    fn body(&self) -> Option<NodeId> {
        self.document.body().map(|b| self.handle(&b))
    }

    fn location_href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn query_all(&self, scope: Option<NodeId>, signature: &Signature) -> Vec<NodeId> {
        self.select(scope, &signature.to_css())
    }

    fn query_attribute_all(&self, name: &str, value: &str) -> Vec<NodeId> {
        let css = format!("[{}=\"{}\"]", name, value.replace('\\', "\\\\").replace('"', "\\\""));
        self.select(None, &css)
    }

    fn matches(&self, node: NodeId, signature: &Signature) -> bool {
        self.element(node)
            .is_some_and(|e| e.matches(&signature.to_css()).unwrap_or(false))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(node)?.parent_element()?;
        Some(self.handle(&parent))
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let next = self.element(node)?.next_element_sibling()?;
        Some(self.handle(&next))
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.is_connected())
    }

    fn tag_name(&self, node: NodeId) -> String {
        self.element(node)
            .map(|e| e.tag_name().to_ascii_lowercase())
            .unwrap_or_default()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn text_content(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|e| e.text_content())
            .unwrap_or_default()
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        match self.element(node) {
            Some(element) => {
                let rect = element.get_bounding_client_rect();
                Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
            }
            None => Rect::default(),
        }
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        let element = self.document.create_element(tag).map_err(script_error)?;
        Ok(self.handle(&element))
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.require(node)?
            .set_attribute(name, value)
            .map_err(script_error)
    }

    fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.require(node)?
            .remove_attribute(name)
            .map_err(script_error)
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        let element = self
            .html(node)
            .ok_or_else(|| DomError::Unsupported(format!("style on {}", node)))?;
        element
            .style()
            .set_property(property, value)
            .map_err(script_error)
    }

    fn insert_before(
        &self,
        parent: NodeId,
        node: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        let parent_element = self.require(parent)?;
        let element = self.require(node)?;
        let reference = match reference {
            Some(r) => Some(self.require(r)?),
            None => None,
        };
        parent_element
            .insert_before(&element, reference.as_deref())
            .map(|_| ())
            .map_err(script_error)
    }

    fn remove(&self, node: NodeId) {
        if let Some(element) = self.element(node) {
            element.remove();
        }
    }

    fn set_text_content(&self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.require(node)?.set_text_content(Some(text));
        Ok(())
    }

    fn focus(&self, node: NodeId) {
        if let Some(element) = self.html(node) {
            let _ = element.focus();
        }
    }

    fn click(&self, node: NodeId) {
        if let Some(element) = self.html(node) {
            element.click();
        }
    }

    fn exec_insert_text(&self, node: NodeId, text: &str) -> Result<bool, DomError> {
        if !self.is_connected(node) {
            return Err(DomError::Detached(node));
        }
        let document = self
            .document
            .dyn_ref::<HtmlDocument>()
            .ok_or_else(|| DomError::Unsupported("execCommand".to_string()))?;
        document
            .exec_command_with_show_ui_and_value("insertText", false, text)
            .map_err(script_error)
    }

    fn dispatch_paste(&self, node: NodeId, text: &str) -> Result<bool, DomError> {
        let element = self.require(node)?;
        let data = DataTransfer::new().map_err(script_error)?;
        data.set_data("text/plain", text).map_err(script_error)?;

        let init = ClipboardEventInit::new();
        init.set_bubbles(true);
        init.set_cancelable(true);
        init.set_clipboard_data(Some(&data));
        let event =
            ClipboardEvent::new_with_event_init_dict("paste", &init).map_err(script_error)?;

        // dispatchEvent answers false when a handler called preventDefault
        let not_cancelled = element.dispatch_event(&event).map_err(script_error)?;
        Ok(!not_cancelled)
    }

    fn set_native_value(&self, node: NodeId, value: &str) -> Result<(), DomError> {
        let element = self.require(node)?;
        let constructor = match element.tag_name().to_ascii_lowercase().as_str() {
            "textarea" => "HTMLTextAreaElement",
            "input" => "HTMLInputElement",
            other => return Err(DomError::Unsupported(format!("value setter on <{}>", other))),
        };

        let global = js_sys::global();
        let class = Reflect::get(&global, &JsValue::from_str(constructor)).map_err(script_error)?;
        let prototype: Object = Reflect::get(&class, &JsValue::from_str("prototype"))
            .map_err(script_error)?
            .dyn_into()
            .map_err(script_error)?;
        let descriptor = Reflect::get_own_property_descriptor(&prototype, &JsValue::from_str("value"))
            .map_err(script_error)?;
        let setter: Function = Reflect::get(&descriptor, &JsValue::from_str("set"))
            .map_err(script_error)?
            .dyn_into()
            .map_err(script_error)?;
        setter
            .call1(element.as_ref(), &JsValue::from_str(value))
            .map(|_| ())
            .map_err(script_error)
    }

    fn dispatch(&self, node: NodeId, kind: DomEventKind) -> Result<(), DomError> {
        let element = self.require(node)?;
        let init = EventInit::new();
        init.set_bubbles(true);
        let event = Event::new_with_event_init_dict(kind.as_str(), &init).map_err(script_error)?;
        element.dispatch_event(&event).map(|_| ()).map_err(script_error)
    }
}
