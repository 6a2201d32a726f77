//! Writing generated text back into the host page.
//!
//! The host page keeps its own model of what is in the composer, so text has
//! to arrive through channels its listeners observe. Each editing kind gets a
//! [`TextWriter`] that knows which channels to try.

use replyguy_dom::signatures;
use replyguy_protocols::{CandidateInput, DomError, DomEventKind, DomHost, EditingKind, NodeId};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::watcher::resolve_kind;

/// How the text ended up in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteMethod {
    NativeValue,
    InsertTextCommand,
    SyntheticPaste,
    DirectAssignment,
}

pub trait TextWriter {
    fn kind(&self) -> EditingKind;

    /// Put `text` into `node`. The node is already focused.
    fn write(&self, dom: &dyn DomHost, node: NodeId, text: &str) -> Result<WriteMethod, DomError>;
}

/// `<textarea>` and `<input>`: native value setter, then the page's own
/// `input` and `change` listeners.
pub struct PlainControlWriter;

impl TextWriter for PlainControlWriter {
    fn kind(&self) -> EditingKind {
        EditingKind::PlainFormControl
    }

    fn write(&self, dom: &dyn DomHost, node: NodeId, text: &str) -> Result<WriteMethod, DomError> {
        dom.set_native_value(node, text)?;
        dom.dispatch(node, DomEventKind::Input)?;
        dom.dispatch(node, DomEventKind::Change)?;
        Ok(WriteMethod::NativeValue)
    }
}

/// Contenteditable rich-text editors.
pub struct RichTextWriter;

impl TextWriter for RichTextWriter {
    fn kind(&self) -> EditingKind {
        EditingKind::RichTextEditable
    }

    fn write(&self, dom: &dyn DomHost, node: NodeId, text: &str) -> Result<WriteMethod, DomError> {
        match dom.exec_insert_text(node, text) {
            Ok(true) => return Ok(WriteMethod::InsertTextCommand),
            Ok(false) => debug!("insert-text command refused by {}", node),
            Err(e) => debug!("insert-text command failed on {}: {}", node, e),
        }
        match dom.dispatch_paste(node, text) {
            Ok(true) => return Ok(WriteMethod::SyntheticPaste),
            Ok(false) => debug!("synthetic paste not consumed by {}", node),
            Err(e) => debug!("synthetic paste failed on {}: {}", node, e),
        }
        dom.set_text_content(node, text)?;
        dom.dispatch(node, DomEventKind::Input)?;
        Ok(WriteMethod::DirectAssignment)
    }
}

pub fn writer_for(kind: EditingKind) -> &'static dyn TextWriter {
    match kind {
        EditingKind::PlainFormControl => &PlainControlWriter,
        EditingKind::RichTextEditable => &RichTextWriter,
    }
}

/// The input to write into: the current candidate while it is still in the
/// document, otherwise the first compose input on the page.
pub fn resolve_target(dom: &dyn DomHost, current: Option<CandidateInput>) -> Option<CandidateInput> {
    if let Some(candidate) = current.filter(|c| dom.is_connected(c.node)) {
        return Some(candidate);
    }
    let inputs: &'static [_] = &signatures::COMPOSE_INPUTS;
    inputs.iter().find_map(|signature| {
        dom.query(None, signature).map(|node| CandidateInput {
            node,
            kind: resolve_kind(dom, node),
        })
    })
}

/// Best-effort insertion. Returns the method that worked, or `None` when no
/// target exists or every channel failed. Never fails outward.
pub fn insert_text(
    dom: &dyn DomHost,
    current: Option<CandidateInput>,
    text: &str,
) -> Option<WriteMethod> {
    let Some(target) = resolve_target(dom, current) else {
        warn!("no compose input to insert into");
        return None;
    };

    dom.focus(target.node);
    dom.click(target.node);

    let writer = writer_for(target.kind);
    let result = writer.write(dom, target.node, text);
    dom.focus(target.node);

    match result {
        Ok(method) => {
            info!("inserted {} chars into {} via {:?}", text.chars().count(), target.node, method);
            Some(method)
        }
        Err(e) => {
            warn!("insertion into {} failed: {}", target.node, e);
            None
        }
    }
}
