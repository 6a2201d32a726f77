//! Host page signatures.
//!
//! The page is a third-party client that ships without stable ids. These
//! signatures are the attributes it has carried for long enough to be worth
//! relying on. Ordered lists are tried first to last.

use replyguy_protocols::{AttrMatch, Signature};

// Compose inputs.

pub const REPLY_TEXTAREA: Signature = Signature {
    name: "reply-textarea",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "tweetTextarea_0")],
};

pub const TEXTBOX: Signature = Signature {
    name: "rich-textbox",
    tag: Some("div"),
    class: None,
    attrs: &[
        AttrMatch::equals("contenteditable", "true"),
        AttrMatch::equals("role", "textbox"),
    ],
};

pub const DRAFT_EDITOR: Signature = Signature {
    name: "draft-editor",
    tag: None,
    class: Some("public-DraftEditor-content"),
    attrs: &[],
};

/// Compose-input signatures in priority order.
pub const COMPOSE_INPUTS: [Signature; 3] = [REPLY_TEXTAREA, TEXTBOX, DRAFT_EDITOR];

// Post structure.

pub const TOOLBAR: Signature = Signature {
    name: "toolbar",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "toolBar")],
};

pub const POST: Signature = Signature {
    name: "post",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "tweet")],
};

pub const POST_TEXT: Signature = Signature {
    name: "post-text",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "tweetText")],
};

pub const AUTHOR: Signature = Signature {
    name: "author",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "User-Name")],
};

pub const LIST_CELL: Signature = Signature {
    name: "list-cell",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "cellInnerDiv")],
};

// Direct messages.

pub const DM_DRAWER: Signature = Signature {
    name: "dm-drawer",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "DMDrawer")],
};

pub const DM_COMPOSER: Signature = Signature {
    name: "dm-composer",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "DMComposer")],
};

/// Any of these on the candidate or an ancestor marks a DM area.
pub const DM_AREAS: [Signature; 2] = [DM_DRAWER, DM_COMPOSER];

pub const MESSAGE_ENTRY: Signature = Signature {
    name: "message-entry",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("data-testid", "messageEntry")],
};

pub const MESSAGE_FLAVOURED: Signature = Signature {
    name: "message-flavoured",
    tag: None,
    class: None,
    attrs: &[AttrMatch::contains("data-testid", "message")],
};

pub const ARTICLE: Signature = Signature {
    name: "article",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("role", "article")],
};

pub const CONVERSATION_ITEM: Signature = Signature {
    name: "conversation-item",
    tag: None,
    class: None,
    attrs: &[AttrMatch::contains("data-testid", "conversation")],
};

pub const MAIN_REGION: Signature = Signature {
    name: "main",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("role", "main")],
};

pub const TEXT_BEARING: Signature = Signature {
    name: "text-bearing",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("dir", "auto")],
};

// Message text, most specific first.

pub const LANG_TEXT: Signature = Signature {
    name: "lang-text",
    tag: None,
    class: None,
    attrs: &[AttrMatch::present("lang")],
};

pub const AUTO_DIR_SPAN: Signature = Signature {
    name: "auto-dir-span",
    tag: Some("span"),
    class: None,
    attrs: &[AttrMatch::equals("dir", "auto")],
};

pub const MESSAGE_TEXT: [Signature; 3] = [POST_TEXT, LANG_TEXT, AUTO_DIR_SPAN];

// Container regions.

pub const GROUPED_CONTROLS: Signature = Signature {
    name: "grouped-controls",
    tag: Some("div"),
    class: None,
    attrs: &[AttrMatch::equals("role", "group")],
};

pub const FORM: Signature = Signature::tag("form", "form");

pub const DIALOG: Signature = Signature {
    name: "dialog",
    tag: None,
    class: None,
    attrs: &[AttrMatch::equals("role", "dialog")],
};

/// Page paths that host the top-level composer.
pub const HOME_PATHS: [&str; 3] = ["/", "/home", "/compose/tweet"];

/// Path prefix of the full-page messages view.
pub const MESSAGES_PATH: &str = "/messages";
