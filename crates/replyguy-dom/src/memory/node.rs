//! Node storage and fixture specs for the in-memory document.

use std::collections::BTreeMap;

use replyguy_protocols::{NodeId, Rect};
use serde::Deserialize;

/// How a rich-text editor reacts to programmatic input.
///
/// Real pages differ: some editors honour the `insertText` command, some
/// only react to paste, and some refuse both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorBehavior {
    /// The editor accepts `insertText`.
    pub accepts_insert_text: bool,
    /// A page handler consumes synthetic pastes.
    pub consumes_paste: bool,
    /// Editing commands raise a script error instead of answering.
    pub throws: bool,
}

impl Default for EditorBehavior {
    fn default() -> Self {
        Self {
            accepts_insert_text: true,
            consumes_paste: false,
            throws: false,
        }
    }
}

impl EditorBehavior {
    /// Refuses the editing command but handles paste.
    pub fn paste_only() -> Self {
        Self {
            accepts_insert_text: false,
            consumes_paste: true,
            throws: false,
        }
    }

    /// Ignores both the editing command and paste.
    pub fn inert() -> Self {
        Self {
            accepts_insert_text: false,
            consumes_paste: false,
            throws: false,
        }
    }

    pub fn throwing() -> Self {
        Self {
            accepts_insert_text: false,
            consumes_paste: false,
            throws: true,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub rect: Rect,
    pub styles: BTreeMap<String, String>,
    pub value: String,
    pub editor: EditorBehavior,
}

impl NodeData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
            rect: Rect::default(),
            styles: BTreeMap::new(),
            value: String::new(),
            editor: EditorBehavior::default(),
        }
    }
}

/// Declarative element tree, buildable in code or deserialized from JSON.
///
/// ```json
/// { "tag": "div", "attrs": { "role": "group" }, "width": 600, "height": 120,
///   "children": [ { "tag": "div", "attrs": { "data-testid": "toolBar" } } ] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn testid(self, value: impl Into<String>) -> Self {
        self.attr("data-testid", value)
    }

    pub fn role(self, value: impl Into<String>) -> Self {
        self.attr("role", value)
    }

    pub fn class(mut self, class: &str) -> Self {
        let merged = match self.attrs.get("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.attrs.insert("class".to_string(), merged);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }
}
