use super::*;
use crate::fixtures::*;
use replyguy_dom::{ElementSpec, MemoryDom};

fn extractor_config() -> ExtractorConfig {
    ExtractorConfig::default()
}

#[test]
fn test_post_text_and_author() {
    let page = status_page();
    let config = extractor_config();
    let extractor = ContextExtractor::new(&page.dom, &config);

    let ctx = extractor.extract_context(page.input);
    assert_eq!(ctx.text, "hello world");
    assert_eq!(ctx.author, "alice");
    assert!(ctx.thread.is_empty());
}

#[test]
fn test_thread_context_preceding_posts() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    for i in 1..=4 {
        dom.append(body, &post("bob", &format!("post {}", i)));
    }
    let last = dom.append(body, &post("carol", "post 5").child(rich_input()));
    let input = dom.query(Some(last), &signatures::REPLY_TEXTAREA).unwrap();

    let config = extractor_config();
    let ctx = ContextExtractor::new(&dom, &config).extract_context(input);
    assert_eq!(ctx.text, "post 5");
    assert_eq!(ctx.author, "carol");
    assert_eq!(ctx.thread, vec!["post 2", "post 3", "post 4"]);
}

#[test]
fn test_no_post_unit_degrades() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let input = dom.append(body, &rich_input());

    let config = extractor_config();
    let ctx = ContextExtractor::new(&dom, &config).extract_context(input);
    assert_eq!(ctx.text, "Tweet context not available");
    assert_eq!(ctx.author, "Unknown");
}

#[test]
fn test_detached_candidate_degrades() {
    let page = status_page();
    page.dom.detach(page.group);
    let config = extractor_config();
    let ctx = ContextExtractor::new(&page.dom, &config).extract_context(page.input);
    assert_eq!(ctx.author, "Unknown");
    assert_eq!(ctx.text, "Context not available");
}

#[test]
fn test_missing_author_is_unknown() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    dom.append(
        body,
        &ElementSpec::new("article")
            .testid("tweet")
            .child(ElementSpec::div().testid("tweetText").text("no byline")),
    );
    let input = dom.append(body, &rich_input());
    let config = extractor_config();
    let ctx = ContextExtractor::new(&dom, &config).extract_context(input);
    assert_eq!(ctx.text, "no byline");
    assert_eq!(ctx.author, "Unknown");
}

#[test]
fn test_dm_thread_tail() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let messages = (1..=7)
        .map(|i| dm_message(Some("dana"), &format!("message {}", i)))
        .collect();
    dom.append(body, &dm_drawer(messages));
    let input = dom.by_testid("tweetTextarea_0").unwrap();

    let config = extractor_config();
    let ctx = ContextExtractor::new(&dom, &config).extract_context(input);
    assert_eq!(ctx.text, "message 7");
    assert_eq!(ctx.author, "dana");
    assert_eq!(
        ctx.thread,
        vec!["message 3", "message 4", "message 5", "message 6"]
    );
}

#[test]
fn test_dm_sender_placeholder_and_timestamp_strip() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let entry = ElementSpec::div()
        .testid("messageEntry")
        .text("see you there 10:42 AM");
    dom.append(body, &dm_drawer(vec![entry]));
    let input = dom.by_testid("tweetTextarea_0").unwrap();

    let config = extractor_config();
    let ctx = ContextExtractor::new(&dom, &config).extract_context(input);
    assert_eq!(ctx.text, "see you there");
    assert_eq!(ctx.author, "DM Sender");
    assert!(ctx.thread.is_empty());
}

#[test]
fn test_dm_falls_back_to_main_region_articles() {
    let dom = MemoryDom::new();
    dom.set_href("https://x.com/messages/1-2");
    let body = dom.body().unwrap();
    let main = dom.append(body, &ElementSpec::new("main").role("main"));
    for text in ["first", "second"] {
        dom.append(
            main,
            &ElementSpec::div()
                .role("article")
                .child(ElementSpec::new("span").attr("lang", "en").text(text)),
        );
    }
    let input = dom.append(main, &rich_input());

    let config = extractor_config();
    let extractor = ContextExtractor::new(&dom, &config);
    assert_eq!(extractor.classify(input), ComposeContext::DirectMessage);
    let ctx = extractor.extract_context(input);
    assert_eq!(ctx.text, "second");
    assert_eq!(ctx.thread, vec!["first"]);
}

#[test]
fn test_dm_message_flavoured_keeps_outermost() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let nested = ElementSpec::div().testid("messageCell").child(
        ElementSpec::div()
            .testid("messageBubble")
            .child(ElementSpec::new("span").attr("dir", "auto").text("only one")),
    );
    dom.append(body, &dm_drawer(vec![nested]));
    let input = dom.by_testid("tweetTextarea_0").unwrap();

    let config = extractor_config();
    let ctx = ContextExtractor::new(&dom, &config).extract_context(input);
    assert_eq!(ctx.text, "only one");
    assert!(ctx.thread.is_empty());
}

#[test]
fn test_dm_without_messages_degrades() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    dom.append(body, &dm_drawer(Vec::new()));
    let input = dom.by_testid("tweetTextarea_0").unwrap();

    let config = extractor_config();
    let ctx = ContextExtractor::new(&dom, &config).extract_context(input);
    assert_eq!(ctx.text, "No messages in conversation");
    assert_eq!(ctx.author, "Unknown");
}

#[test]
fn test_dm_tail_respects_config() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let messages = (1..=4)
        .map(|i| dm_message(None, &format!("m{}", i)))
        .collect();
    dom.append(body, &dm_drawer(messages));
    let input = dom.by_testid("tweetTextarea_0").unwrap();

    let config = ExtractorConfig {
        dm_tail: 2,
        ..Default::default()
    };
    let ctx = ContextExtractor::new(&dom, &config).extract_context(input);
    assert_eq!(ctx.text, "m4");
    assert_eq!(ctx.thread, vec!["m3"]);
}

#[test]
fn test_classify_dm_drawer_anywhere() {
    let page = status_page();
    let body = page.dom.body().unwrap();
    page.dom.append(body, &dm_drawer(Vec::new()));
    let config = extractor_config();
    let extractor = ContextExtractor::new(&page.dom, &config);
    assert_eq!(extractor.classify(page.input), ComposeContext::DirectMessage);
}

#[test]
fn test_classify_modal_reply_and_modal_post() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let reply_dialog = dom.append(
        body,
        &ElementSpec::div()
            .role("dialog")
            .child(post("alice", "hi"))
            .child(reply_group(560.0)),
    );
    let post_dialog = dom.append(body, &ElementSpec::div().role("dialog").child(reply_group(560.0)));
    let reply_input = dom.query(Some(reply_dialog), &signatures::REPLY_TEXTAREA).unwrap();
    let post_input = dom.query(Some(post_dialog), &signatures::REPLY_TEXTAREA).unwrap();

    let config = extractor_config();
    let extractor = ContextExtractor::new(&dom, &config);
    assert_eq!(extractor.classify(reply_input), ComposeContext::ModalReply);
    assert_eq!(extractor.classify(post_input), ComposeContext::TopLevelPost);
}

#[test]
fn test_classify_by_path() {
    let page = status_page();
    let config = extractor_config();
    let extractor = ContextExtractor::new(&page.dom, &config);
    assert_eq!(extractor.classify(page.input), ComposeContext::InlineReply);

    page.dom.set_href("https://x.com/home");
    assert_eq!(extractor.classify(page.input), ComposeContext::TopLevelPost);

    page.dom.set_href("https://x.com/compose/tweet");
    assert_eq!(extractor.classify(page.input), ComposeContext::TopLevelPost);
}

#[test]
fn test_classify_cell_with_post_is_inline_reply_on_home() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let cell_node = dom.append(body, &cell(post("alice", "hi").child(rich_input())));
    let input = dom.query(Some(cell_node), &signatures::REPLY_TEXTAREA).unwrap();

    let config = extractor_config();
    let extractor = ContextExtractor::new(&dom, &config);
    assert_eq!(dom.location_path(), "/home");
    assert_eq!(extractor.classify(input), ComposeContext::InlineReply);
}

#[test]
fn test_message_text_prefers_specific_child() {
    let dom = MemoryDom::new();
    let body = dom.body().unwrap();
    let message = dom.append(
        body,
        &ElementSpec::div()
            .child(ElementSpec::new("span").attr("dir", "auto").text("generic"))
            .child(ElementSpec::div().attr("lang", "en").text("specific")),
    );
    assert_eq!(message_text(&dom, message), "specific");
}
