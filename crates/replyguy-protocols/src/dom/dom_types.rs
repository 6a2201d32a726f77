//! Shared DOM types: node handles, measured boxes, and notifications.

use serde::{Deserialize, Serialize};

/// Opaque handle to an element in the host document.
///
/// Handles are only meaningful to the [`DomHost`](super::DomHost) that issued
/// them. A handle may outlive its element; use `is_connected` before trusting
/// it after any asynchronous gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounding box for an element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A box of the given size at the origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Whether nothing was laid out for the element.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Notifications the engine dispatches on host elements so the page's own
/// listeners observe programmatic edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomEventKind {
    Input,
    Change,
    Paste,
    Focus,
    Click,
}

impl DomEventKind {
    /// The DOM event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Change => "change",
            Self::Paste => "paste",
            Self::Focus => "focus",
            Self::Click => "click",
        }
    }
}
