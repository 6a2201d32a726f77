//! Content-script assembly.
//!
//! [`ContentScript`] owns the engine, the generation session and the options
//! panel, and holds the store and generator collaborators. Platform glue
//! turns browser callbacks into [`Signal`]s and panel clicks into
//! [`PanelAction`]s; everything else happens here.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use replyguy_config::{Config, ConfigLoader, ConfigValidator};
use replyguy_core::{Engine, GenerationOption, GenerationSession, SessionError, WriteMethod};
use replyguy_protocols::{
    DomHost, Generator, NodeId, ObserverHost, Scheduler, SettingsStore, StorageError, TimerKey,
};
use tracing::{debug, warn};

use crate::panel::{OptionsPanel, PanelAction, PanelStatus};

/// Storage key of the optional JSON configuration.
pub const CONFIG_KEY: &str = "replyguy_config";

/// Parse the JSON configuration kept next to the settings. Missing input
/// gives defaults; malformed or invalid input is logged and replaced by
/// defaults.
pub fn load_config(raw: Option<&str>) -> Config {
    let config = match ConfigLoader::load_json(raw.unwrap_or_default()) {
        Ok(config) => config,
        Err(e) => {
            warn!("configuration ignored: {}", e);
            return Config::default();
        }
    };
    let result = match ConfigValidator::validate(&config) {
        Ok(result) => result,
        Err(e) => {
            warn!("configuration not validated: {}", e);
            return Config::default();
        }
    };
    for warning in &result.warnings {
        warn!("configuration {}: {}", warning.path, warning.message);
    }
    match result.into_error() {
        Some(e) => {
            warn!("configuration rejected: {}", e);
            Config::default()
        }
        None => config,
    }
}

/// A platform callback, queued or delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    NodesAdded(Vec<NodeId>),
    Activation(NodeId),
    ContainerResized,
    ViewportChanged,
    LocationProbe,
    Timer(TimerKey),
    Close,
}

pub struct ContentScript {
    dom: Rc<dyn DomHost>,
    engine: RefCell<Engine>,
    session: RefCell<GenerationSession>,
    panel: Rc<OptionsPanel>,
    store: Rc<dyn SettingsStore>,
    generator: Rc<dyn Generator>,
}

impl ContentScript {
    pub fn new(
        dom: Rc<dyn DomHost>,
        scheduler: Rc<dyn Scheduler>,
        observers: Rc<dyn ObserverHost>,
        config: Config,
        store: Rc<dyn SettingsStore>,
        generator: Rc<dyn Generator>,
    ) -> Self {
        let panel = Rc::new(OptionsPanel::new());
        let engine = Engine::new(Rc::clone(&dom), scheduler, observers, config, panel.clone());
        Self {
            dom,
            engine: RefCell::new(engine),
            session: RefCell::new(GenerationSession::new()),
            panel,
            store,
            generator,
        }
    }

    pub fn start(&self) {
        self.engine.borrow_mut().start();
    }

    /// Borrow the engine for inspection.
    pub fn engine(&self) -> Ref<'_, Engine> {
        self.engine.borrow()
    }

    pub fn panel(&self) -> &OptionsPanel {
        &self.panel
    }

    pub fn status(&self) -> PanelStatus {
        PanelStatus::from_session(&self.session.borrow())
    }

    /// Deliver a platform callback. Gives the signal back when the engine is
    /// already borrowed further up the stack; the caller retries it later.
    pub fn dispatch(&self, signal: Signal) -> Result<(), Signal> {
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            debug!("engine busy, deferring {:?}", signal);
            return Err(signal);
        };
        match signal {
            Signal::NodesAdded(added) => engine.on_nodes_added(&added),
            Signal::Activation(node) => engine.on_activation(node),
            Signal::ContainerResized => engine.on_container_resized(),
            Signal::ViewportChanged => engine.on_viewport_changed(),
            Signal::LocationProbe => {
                engine.on_location_probe();
            }
            Signal::Timer(key) => engine.on_timer(key),
            Signal::Close => engine.close(),
        }
        Ok(())
    }

    /// Decode a panel click against the current profile list.
    pub fn resolve_action(&self, raw: &str, custom_text: Option<&str>) -> Option<PanelAction> {
        PanelAction::parse(raw, &self.panel.profiles(), custom_text)
    }

    pub async fn perform(&self, action: PanelAction) -> Option<WriteMethod> {
        match action {
            PanelAction::Close => {
                if self.dispatch(Signal::Close).is_err() {
                    warn!("close ignored while the engine is busy");
                }
                None
            }
            PanelAction::Generate(option) => self.generate(option).await,
        }
    }

    /// Generate text for `option` and write it into the compose input. The
    /// overlay stays open afterwards.
    pub async fn generate(&self, option: GenerationOption) -> Option<WriteMethod> {
        let subject = self.engine.borrow().subject().cloned();
        let begun = self.session.borrow_mut().begin(option, subject);
        let pending = match begun {
            Ok(pending) => pending,
            Err(SessionError::Busy) => return None,
            Err(_) => {
                self.render_status();
                return None;
            }
        };
        self.render_status();

        let result = pending.run(&*self.store, &*self.generator).await;
        let text = self.session.borrow_mut().finish(result);
        self.render_status();

        let text = text?;
        let Ok(engine) = self.engine.try_borrow() else {
            warn!("generated text dropped: engine busy");
            return None;
        };
        let method = engine.insert_text(&text);
        debug!("generation for {} chars finished with {:?}", text.chars().count(), method);
        method
    }

    /// Reload custom profiles and redraw the panel if it is showing.
    pub async fn refresh_profiles(&self) -> Result<usize, StorageError> {
        let profiles = self.store.get_custom_profiles().await?;
        let count = profiles.len();
        self.panel.set_profiles(profiles);
        let element = self
            .engine
            .try_borrow()
            .ok()
            .and_then(|e| e.mounted().and(e.overlay_element()));
        if let Some(element) = element {
            self.panel.render(&*self.dom, element);
        }
        debug!("loaded {} custom profiles", count);
        Ok(count)
    }

    fn render_status(&self) {
        let status = self.status();
        self.panel.show_status(&*self.dom, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use replyguy_core::{ManualScheduler, RecordingObservers};
    use replyguy_dom::MemoryDom;
    use replyguy_protocols::{CustomProfile, GenerationError, GenerationRequest, Settings};

    struct NoStore;

    #[async_trait(?Send)]
    impl SettingsStore for NoStore {
        async fn get_settings(&self) -> Result<Settings, StorageError> {
            Ok(Settings::default())
        }

        async fn get_custom_profiles(&self) -> Result<Vec<CustomProfile>, StorageError> {
            Ok(Vec::new())
        }
    }

    struct Unreachable;

    #[async_trait(?Send)]
    impl Generator for Unreachable {
        async fn generate(&self, _request: GenerationRequest) -> Result<String, GenerationError> {
            Err(GenerationError::Network("unreachable".to_string()))
        }
    }

    fn script() -> ContentScript {
        ContentScript::new(
            Rc::new(MemoryDom::new()),
            Rc::new(ManualScheduler::new()),
            Rc::new(RecordingObservers::new()),
            Config::default(),
            Rc::new(NoStore),
            Rc::new(Unreachable),
        )
    }

    #[test]
    fn test_dispatch_defers_while_engine_borrowed() {
        let script = script();
        script.start();
        let held = script.engine();
        assert_eq!(
            script.dispatch(Signal::ViewportChanged),
            Err(Signal::ViewportChanged)
        );
        drop(held);
        assert_eq!(script.dispatch(Signal::ViewportChanged), Ok(()));
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None), Config::default());
        let config = load_config(Some(r#"{"watcher": {"navigation_settle_ms": 800}}"#));
        assert_eq!(config.watcher.navigation_settle_ms, 800);
        assert_eq!(load_config(Some("{broken")), Config::default());
        let invalid = load_config(Some(r#"{"locator": {"min_width": 900, "max_width": 100}}"#));
        assert_eq!(invalid, Config::default());
    }

    #[test]
    fn test_resolve_action_uses_profiles() {
        let script = script();
        assert_eq!(script.resolve_action("close", None), Some(PanelAction::Close));
        assert_eq!(script.resolve_action("profile:p1", None), None);
    }

    #[tokio::test]
    async fn test_missing_key_shows_error() {
        let script = script();
        let method = script
            .generate(GenerationOption::Category(
                replyguy_protocols::PostCategory::Tip,
            ))
            .await;
        assert_eq!(method, None);
        assert_eq!(
            script.status(),
            PanelStatus::Error("Please add your OpenAI API key in the extension settings".to_string())
        );
    }
}
