//! The options panel rendered inside the overlay element.
//!
//! The panel is plain DOM built through [`DomHost`]: a header with a close
//! button, one button per custom profile and preset, a free-text box in post
//! mode, and a status line. Buttons carry a [`ACTION_ATTR`] value that the
//! platform glue hands back to [`PanelAction::parse`] on click.

use std::cell::RefCell;

use replyguy_core::{GenerationOption, GenerationSession, OverlayUi, OverlayView};
use replyguy_protocols::{CustomProfile, DomError, DomHost, NodeId, PostCategory, PresetTone};
use tracing::{debug, warn};

/// Attribute naming what a panel button does.
pub const ACTION_ATTR: &str = "data-replyguy-action";
/// Attribute marking the custom instruction text box.
pub const CUSTOM_INPUT_ATTR: &str = "data-replyguy-input";

const CLOSE: &str = "close";
const CUSTOM: &str = "custom";

/// A click on the panel, decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    Close,
    Generate(GenerationOption),
}

impl PanelAction {
    /// Decode an [`ACTION_ATTR`] value. `custom_text` is the current content
    /// of the custom instruction box, read by the caller.
    pub fn parse(raw: &str, profiles: &[CustomProfile], custom_text: Option<&str>) -> Option<Self> {
        if raw == CLOSE {
            return Some(Self::Close);
        }
        if raw == CUSTOM {
            let text = custom_text.unwrap_or_default().to_string();
            return Some(Self::Generate(GenerationOption::CustomInstruction(text)));
        }
        let (kind, value) = raw.split_once(':')?;
        let option = match kind {
            "tone" => GenerationOption::Tone(PresetTone::parse(value)?),
            "category" => GenerationOption::Category(PostCategory::parse(value)?),
            "profile" => {
                GenerationOption::Profile(profiles.iter().find(|p| p.id == value)?.clone())
            }
            _ => return None,
        };
        Some(Self::Generate(option))
    }
}

/// The [`ACTION_ATTR`] value for a button offering `option`.
pub fn action_for(option: &GenerationOption) -> String {
    match option {
        GenerationOption::Tone(tone) => format!("tone:{}", tone.as_str()),
        GenerationOption::Category(category) => format!("category:{}", category.as_str()),
        GenerationOption::Profile(profile) => format!("profile:{}", profile.id),
        GenerationOption::CustomInstruction(_) => CUSTOM.to_string(),
    }
}

/// What the status line shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelStatus {
    Idle,
    /// Option key being generated.
    Loading(String),
    Error(String),
}

impl PanelStatus {
    pub fn from_session(session: &GenerationSession) -> Self {
        if let Some(key) = session.loading() {
            Self::Loading(key.to_string())
        } else if let Some(error) = session.error() {
            Self::Error(error.to_string())
        } else {
            Self::Idle
        }
    }

    fn state(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading(_) => "loading",
            Self::Error(_) => "error",
        }
    }

    fn text(&self) -> &str {
        match self {
            Self::Idle => "",
            Self::Loading(_) => "Generating...",
            Self::Error(message) => message,
        }
    }
}

#[derive(Debug, Default)]
struct PanelState {
    profiles: Vec<CustomProfile>,
    view: Option<OverlayView>,
    root: Option<NodeId>,
    status_line: Option<NodeId>,
    /// Option key and button for every generate button.
    buttons: Vec<(String, NodeId)>,
    status: Option<PanelStatus>,
}

/// Options panel shown in the overlay.
#[derive(Debug, Default)]
pub struct OptionsPanel {
    state: RefCell<PanelState>,
}

impl OptionsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profiles(&self) -> Vec<CustomProfile> {
        self.state.borrow().profiles.clone()
    }

    /// Replace the profile list. Takes effect on the next render.
    pub fn set_profiles(&self, profiles: Vec<CustomProfile>) {
        self.state.borrow_mut().profiles = profiles;
    }

    /// Root of the rendered panel, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.state.borrow().root
    }

    /// Options offered for the current view, in display order.
    pub fn options(&self) -> Vec<GenerationOption> {
        let state = self.state.borrow();
        let reply_mode = state.view.as_ref().is_some_and(|v| v.context.is_reply());
        options_for(reply_mode, &state.profiles)
    }

    /// Rebuild the panel inside `element`.
    pub fn render(&self, dom: &dyn DomHost, element: NodeId) {
        if let Err(e) = self.try_render(dom, element) {
            warn!("panel render failed: {}", e);
        }
    }

    /// Update the status line and mark the loading button.
    pub fn show_status(&self, dom: &dyn DomHost, status: PanelStatus) {
        let mut state = self.state.borrow_mut();
        let Some(line) = state.status_line else {
            state.status = Some(status);
            return;
        };
        let result = apply_status(dom, line, &state.buttons, &status);
        if let Err(e) = result {
            warn!("panel status update failed: {}", e);
        }
        state.status = Some(status);
    }

    fn try_render(&self, dom: &dyn DomHost, element: NodeId) -> Result<(), DomError> {
        let mut state = self.state.borrow_mut();
        let Some(view) = state.view.clone() else {
            return Ok(());
        };
        dom.set_text_content(element, "")?;

        let reply_mode = view.context.is_reply();
        let root = dom.create_element("div")?;
        dom.set_attribute(root, "class", "replyguy-panel")?;
        dom.set_attribute(root, "data-mode", if reply_mode { "reply" } else { "post" })?;
        dom.set_attribute(root, "data-layout", view.layout.as_str())?;

        let header = element_with_text(dom, "div", "")?;
        dom.set_attribute(header, "class", "replyguy-header")?;
        let title = element_with_text(dom, "span", "ReplyGuy")?;
        dom.set_attribute(title, "class", "replyguy-title")?;
        dom.append_child(header, title)?;
        let subtitle = element_with_text(dom, "span", &subtitle(&view))?;
        dom.set_attribute(subtitle, "class", "replyguy-subtitle")?;
        dom.append_child(header, subtitle)?;
        let close = element_with_text(dom, "button", "\u{00d7}")?;
        dom.set_attribute(close, "type", "button")?;
        dom.set_attribute(close, ACTION_ATTR, CLOSE)?;
        dom.set_attribute(close, "aria-label", "Close")?;
        dom.append_child(header, close)?;
        dom.append_child(root, header)?;

        let list = dom.create_element("div")?;
        dom.set_attribute(list, "class", "replyguy-options")?;
        let mut buttons = Vec::new();
        for option in options_for(reply_mode, &state.profiles) {
            let button = element_with_text(dom, "button", &button_text(&option))?;
            dom.set_attribute(button, "type", "button")?;
            dom.set_attribute(button, ACTION_ATTR, &action_for(&option))?;
            if matches!(option, GenerationOption::Profile(_)) {
                dom.set_attribute(button, "class", "replyguy-profile")?;
            }
            dom.append_child(list, button)?;
            buttons.push((option.option_key(), button));
        }
        dom.append_child(root, list)?;

        if !reply_mode {
            let custom = dom.create_element("div")?;
            dom.set_attribute(custom, "class", "replyguy-custom")?;
            let input = dom.create_element("textarea")?;
            dom.set_attribute(input, CUSTOM_INPUT_ATTR, CUSTOM)?;
            dom.set_attribute(input, "placeholder", "Describe the post you want...")?;
            dom.append_child(custom, input)?;
            let go = element_with_text(dom, "button", "Generate")?;
            dom.set_attribute(go, "type", "button")?;
            dom.set_attribute(go, ACTION_ATTR, CUSTOM)?;
            dom.append_child(custom, go)?;
            dom.append_child(root, custom)?;
            buttons.push((PostCategory::Custom.as_str().to_string(), go));
        }

        let line = dom.create_element("div")?;
        dom.set_attribute(line, "class", "replyguy-status")?;
        dom.set_attribute(line, "role", "status")?;
        dom.append_child(root, line)?;

        let status = state.status.clone().unwrap_or(PanelStatus::Idle);
        apply_status(dom, line, &buttons, &status)?;

        dom.append_child(element, root)?;
        debug!(
            "panel rendered in {} mode with {} buttons",
            if reply_mode { "reply" } else { "post" },
            buttons.len()
        );

        state.root = Some(root);
        state.status_line = Some(line);
        state.buttons = buttons;
        Ok(())
    }
}

impl OverlayUi for OptionsPanel {
    fn mount(&self, dom: &dyn DomHost, element: NodeId, view: &OverlayView) {
        self.state.borrow_mut().view = Some(view.clone());
        self.render(dom, element);
    }

    fn update(&self, dom: &dyn DomHost, element: NodeId, view: &OverlayView) {
        let rerender = {
            let mut state = self.state.borrow_mut();
            let changed = state
                .view
                .as_ref()
                .is_none_or(|old| old.context != view.context || old.subject != view.subject);
            state.view = Some(view.clone());
            let attached = state.root.is_some_and(|r| dom.parent(r) == Some(element));
            if !changed && attached {
                if let Some(root) = state.root {
                    let _ = dom.set_attribute(root, "data-layout", view.layout.as_str());
                }
            }
            changed || !attached
        };
        if rerender {
            self.render(dom, element);
        }
    }

    fn unmount(&self, dom: &dyn DomHost, element: NodeId) {
        let mut state = self.state.borrow_mut();
        if let Err(e) = dom.set_text_content(element, "") {
            debug!("panel unmount on {} failed: {}", element, e);
        }
        state.view = None;
        state.root = None;
        state.status_line = None;
        state.buttons.clear();
    }
}

fn options_for(reply_mode: bool, profiles: &[CustomProfile]) -> Vec<GenerationOption> {
    let mut options: Vec<GenerationOption> = profiles
        .iter()
        .cloned()
        .map(GenerationOption::Profile)
        .collect();
    if reply_mode {
        options.extend(PresetTone::ALL.into_iter().map(GenerationOption::Tone));
    } else {
        options.extend(PostCategory::PRESETS.into_iter().map(GenerationOption::Category));
    }
    options
}

fn button_text(option: &GenerationOption) -> String {
    match option {
        GenerationOption::Tone(tone) => format!("{} {}", tone.emoji(), tone.label()),
        GenerationOption::Category(category) => {
            format!("{} {}", category.emoji(), category.label())
        }
        other => other.label(),
    }
}

fn subtitle(view: &OverlayView) -> String {
    match &view.subject {
        Some(subject) if !subject.author.is_empty() => format!("Replying to {}", subject.author),
        Some(_) => "Reply".to_string(),
        None => "New post".to_string(),
    }
}

fn element_with_text(dom: &dyn DomHost, tag: &str, text: &str) -> Result<NodeId, DomError> {
    let node = dom.create_element(tag)?;
    if !text.is_empty() {
        dom.set_text_content(node, text)?;
    }
    Ok(node)
}

fn apply_status(
    dom: &dyn DomHost,
    line: NodeId,
    buttons: &[(String, NodeId)],
    status: &PanelStatus,
) -> Result<(), DomError> {
    dom.set_attribute(line, "data-state", status.state())?;
    dom.set_text_content(line, status.text())?;
    let loading = match status {
        PanelStatus::Loading(key) => Some(key.as_str()),
        _ => None,
    };
    for (key, button) in buttons {
        let busy = loading.is_some_and(|k| k == key);
        dom.set_attribute(*button, "data-loading", if busy { "true" } else { "false" })?;
        if loading.is_some() {
            dom.set_attribute(*button, "disabled", "")?;
        } else {
            dom.remove_attribute(*button, "disabled")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;
