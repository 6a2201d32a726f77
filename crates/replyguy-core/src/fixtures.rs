//! Page builders shared by the unit tests.

use std::cell::Cell;

use replyguy_dom::{ElementSpec, MemoryDom};
use replyguy_protocols::{DomHost, NodeId};

use crate::overlay::{OverlayUi, OverlayView};

pub fn post(author: &str, text: &str) -> ElementSpec {
    ElementSpec::new("article")
        .testid("tweet")
        .size(600.0, 150.0)
        .child(ElementSpec::div().testid("User-Name").text(author))
        .child(ElementSpec::div().testid("tweetText").text(text))
}

pub fn cell(child: ElementSpec) -> ElementSpec {
    ElementSpec::div()
        .testid("cellInnerDiv")
        .size(600.0, 200.0)
        .child(child)
}

pub fn rich_input() -> ElementSpec {
    ElementSpec::div()
        .testid("tweetTextarea_0")
        .attr("contenteditable", "true")
        .attr("role", "textbox")
        .size(540.0, 40.0)
}

pub fn toolbar() -> ElementSpec {
    ElementSpec::div().testid("toolBar").size(540.0, 36.0)
}

/// A reply composer: `group > [wrapper > input, toolbar]`.
pub fn reply_group(width: f64) -> ElementSpec {
    ElementSpec::div()
        .role("group")
        .size(width, 120.0)
        .child(ElementSpec::div().size(width - 20.0, 60.0).child(rich_input()))
        .child(toolbar())
}

pub fn dm_message(author: Option<&str>, text: &str) -> ElementSpec {
    let mut entry = ElementSpec::div().testid("messageEntry").size(300.0, 40.0);
    if let Some(author) = author {
        entry = entry.child(ElementSpec::div().testid("User-Name").text(author));
    }
    entry.child(ElementSpec::new("span").attr("dir", "auto").text(text))
}

/// A DM drawer holding `messages` followed by a composer.
pub fn dm_drawer(messages: Vec<ElementSpec>) -> ElementSpec {
    ElementSpec::div()
        .testid("DMDrawer")
        .size(400.0, 600.0)
        .child(ElementSpec::div().size(400.0, 500.0).children(messages))
        .child(
            ElementSpec::div()
                .testid("DMComposer")
                .size(400.0, 80.0)
                .child(rich_input()),
        )
}

/// Status page with a focal post and an inline reply composer below it.
pub struct StatusPage {
    pub dom: MemoryDom,
    pub post: NodeId,
    pub group: NodeId,
    pub input: NodeId,
    pub toolbar: NodeId,
}

pub fn status_page() -> StatusPage {
    let dom = MemoryDom::new();
    dom.set_href("https://x.com/alice/status/1");
    let body = dom.body().unwrap_or(dom.root());
    let main = dom.append(
        body,
        &ElementSpec::new("main").role("main").size(1000.0, 800.0),
    );
    dom.append(main, &cell(post("alice", "hello world")));
    dom.append(main, &cell(reply_group(600.0)));
    let post = dom.by_testid("tweet").unwrap_or(body);
    let input = dom.by_testid("tweetTextarea_0").unwrap_or(body);
    let toolbar = dom.by_testid("toolBar").unwrap_or(body);
    let group = dom.parent(toolbar).unwrap_or(body);
    StatusPage {
        dom,
        post,
        group,
        input,
        toolbar,
    }
}

/// Overlay UI that only counts lifecycle calls.
#[derive(Debug, Default)]
pub struct CountingUi {
    pub mounts: Cell<usize>,
    pub updates: Cell<usize>,
    pub unmounts: Cell<usize>,
}

impl OverlayUi for CountingUi {
    fn mount(&self, _dom: &dyn DomHost, _element: NodeId, _view: &OverlayView) {
        self.mounts.set(self.mounts.get() + 1);
    }

    fn update(&self, _dom: &dyn DomHost, _element: NodeId, _view: &OverlayView) {
        self.updates.set(self.updates.get() + 1);
    }

    fn unmount(&self, _dom: &dyn DomHost, _element: NodeId) {
        self.unmounts.set(self.unmounts.get() + 1);
    }
}
