//! Prompt construction.

use replyguy_protocols::{ExtractedContext, PostCategory, PresetTone};

const REPLY_PREAMBLE: &str =
    "You write short, human, engineer-style X (Twitter) replies. No AI tone. No slang.";

const POST_PREAMBLE: &str =
    "You write short, human, engaging X (Twitter) posts. No AI tone. No slang.";

const REPLY_RULES: &[&str] = &[
    "60-120 characters",
    "mostly lowercase except names",
    "short, tight sentences. fragments allowed.",
    "contractions always",
    "quick start. no warm-up phrases.",
    "avoid commas unless needed",
    "banned phrases: \"that's impressive\", \"excited to see\", \"furthermore\", \"in conclusion\"",
    "no hashtags unless the topic demands it",
    "0-1 emoji max, only if it truly fits",
    "refer to something specific in their tweet",
    "raw text only",
];

const POST_RULES: &[&str] = &[
    "100-240 characters",
    "mostly lowercase except names and emphasis",
    "short, punchy sentences. fragments allowed.",
    "contractions always",
    "direct start. no warm-up phrases.",
    "avoid commas unless needed",
    "banned phrases: \"excited to announce\", \"thrilled to share\", \"game changer\", \"furthermore\", \"in conclusion\"",
    "hashtags only if truly relevant",
    "0-2 emojis max, only if they fit naturally",
    "be specific and concrete",
    "raw text only",
];

/// User message for post generation; the system prompt carries everything.
pub const POST_USER_MESSAGE: &str = "Generate a post based on the instructions above.";

pub fn tone_instruction(tone: PresetTone) -> &'static str {
    match tone {
        PresetTone::Friendly => {
            "warm but simple, like chatting with a teammate. short lines, light tone, no hype."
        }
        PresetTone::Casual => {
            "relaxed and direct. small sentences, simple words. like replying fast between tasks."
        }
        PresetTone::Supportive => {
            "steady and honest. acknowledge their point quickly then add a small thought. no cliches."
        }
        PresetTone::Humorous => {
            "dry engineer humor. subtle and light. a tiny twist or observation, nothing forced."
        }
        PresetTone::Thoughtful => {
            "quiet, simple reflection. start from their point and add one small idea. no lecturing."
        }
        PresetTone::Analytical => {
            "clean breakdown. one clear point, one supporting detail. short sentences, not formal."
        }
        PresetTone::Creative => {
            "simple but fresh idea. a different angle, kept grounded and straightforward."
        }
    }
}

pub fn category_instruction(category: PostCategory) -> &'static str {
    match category {
        PostCategory::Insight => {
            "share a simple observation or learning. one clear point. real and grounded."
        }
        PostCategory::Question => "ask something you're genuinely curious about. one simple question.",
        PostCategory::Announcement => {
            "share news or an update directly. clear and simple. no marketing tone."
        }
        PostCategory::Tip => "share one useful thing. short and practical, like telling a friend.",
        PostCategory::Story => "a quick personal moment or experience. simple narrative, casual language.",
        PostCategory::Opinion => "a simple take on something. honest and direct. no loud claims.",
        PostCategory::Fun => "light and playful. simple humor or observation. no forced jokes.",
        PostCategory::Custom => "",
    }
}

fn rules(out: &mut String, heading: &str, rules: &[&str]) {
    out.push_str(heading);
    out.push('\n');
    for rule in rules {
        out.push_str("- ");
        out.push_str(rule);
        out.push('\n');
    }
}

/// Instruction for `option`: the custom description when given, else the
/// preset text, else the option itself.
fn instruction<'a>(option: &'a str, custom: Option<&'a str>, preset: Option<&'static str>) -> &'a str {
    custom
        .filter(|c| !c.trim().is_empty())
        .or(preset.filter(|p| !p.is_empty()))
        .unwrap_or(option)
}

pub fn reply_system_prompt(option: &str, custom: Option<&str>) -> String {
    let preset = PresetTone::parse(option).map(tone_instruction);
    let instruction = instruction(option, custom, preset);
    let mut out = String::from(REPLY_PREAMBLE);
    out.push_str("\n\n");
    if custom.is_some_and(|c| !c.trim().is_empty()) {
        out.push_str("CUSTOM TONE (follow exactly):\n");
    } else {
        out.push_str("TONE:\n");
    }
    out.push_str(instruction);
    out.push_str("\n\n");
    rules(&mut out, "RULES:", REPLY_RULES);
    out
}

pub fn post_system_prompt(option: &str, custom: Option<&str>) -> String {
    let preset = PostCategory::parse(option).map(category_instruction);
    let instruction = instruction(option, custom, preset);
    let mut out = String::from(POST_PREAMBLE);
    out.push_str("\n\n");
    if custom.is_some_and(|c| !c.trim().is_empty()) {
        out.push_str("CUSTOM INSTRUCTIONS (follow exactly):\n");
    } else {
        out.push_str("POST TYPE: ");
    }
    out.push_str(instruction);
    out.push_str("\n\n");
    rules(&mut out, "RULES:", POST_RULES);
    out
}

/// The post being answered, followed by earlier thread entries.
pub fn reply_user_message(subject: &ExtractedContext) -> String {
    let mut out = format!("Tweet: \"{}\"", subject.text);
    if !subject.thread.is_empty() {
        out.push_str("\n\nThread context:\n");
        out.push_str(&subject.thread.join("\n"));
    }
    out
}
