use super::*;
use std::collections::HashMap;

const TEXTBOX: Signature = Signature {
    name: "textbox",
    tag: Some("div"),
    class: None,
    attrs: &[
        AttrMatch::equals("contenteditable", "true"),
        AttrMatch::equals("role", "textbox"),
    ],
};

const DRAFT: Signature = Signature {
    name: "draft",
    tag: None,
    class: Some("public-DraftEditor-content"),
    attrs: &[],
};

const MESSAGEISH: Signature = Signature {
    name: "messageish",
    tag: None,
    class: None,
    attrs: &[AttrMatch::contains("data-testid", "message")],
};

fn lookup(attrs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = attrs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn test_to_css_compound() {
    assert_eq!(
        TEXTBOX.to_css(),
        r#"div[contenteditable="true"][role="textbox"]"#
    );
    assert_eq!(DRAFT.to_css(), ".public-DraftEditor-content");
    assert_eq!(MESSAGEISH.to_css(), r#"[data-testid*="message"]"#);
}

#[test]
fn test_to_css_presence_and_tag() {
    const LANG: Signature = Signature {
        name: "lang",
        tag: None,
        class: None,
        attrs: &[AttrMatch::present("lang")],
    };
    assert_eq!(LANG.to_css(), "[lang]");
    assert_eq!(Signature::tag("form", "form").to_css(), "form");
}

#[test]
fn test_matches_requires_all_attributes() {
    assert!(TEXTBOX.matches_with(
        "DIV",
        lookup(&[("contenteditable", "true"), ("role", "textbox")])
    ));
    assert!(!TEXTBOX.matches_with("div", lookup(&[("contenteditable", "true")])));
    assert!(!TEXTBOX.matches_with(
        "span",
        lookup(&[("contenteditable", "true"), ("role", "textbox")])
    ));
}

#[test]
fn test_matches_class_token_not_substring() {
    assert!(DRAFT.matches_with(
        "div",
        lookup(&[("class", "notranslate public-DraftEditor-content")])
    ));
    assert!(!DRAFT.matches_with(
        "div",
        lookup(&[("class", "public-DraftEditor-content-wrapper")])
    ));
}

#[test]
fn test_matches_contains_operator() {
    assert!(MESSAGEISH.matches_with("div", lookup(&[("data-testid", "messageEntry")])));
    assert!(MESSAGEISH.matches_with("div", lookup(&[("data-testid", "dm-message-list")])));
    assert!(!MESSAGEISH.matches_with("div", lookup(&[("data-testid", "DMDrawer")])));
}

#[test]
fn test_display_includes_name_and_css() {
    let shown = DRAFT.to_string();
    assert!(shown.starts_with("draft"));
    assert!(shown.contains(".public-DraftEditor-content"));
}
