//! Browser entry point.
//!
//! Builds the web-backed platform, hands it to a [`ContentScript`] and routes
//! every browser callback into [`ContentScript::dispatch`]. Signals that
//! arrive while the engine is mid-pass (a `focus()` during insertion fires
//! listeners synchronously) are retried on a fresh task.

mod dom;
mod observers;
mod scheduler;
mod storage;

use std::cell::RefCell;
use std::io;
use std::rc::{Rc, Weak};

use replyguy_protocols::DomHost;
use replyguy_provider_openai::OpenAIGenerator;
use replyguy_storage_local::{CUSTOM_PROFILES_KEY, KeyValueBackend, SettingsStorage};
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, EventTarget, HtmlTextAreaElement};

use crate::app::{CONFIG_KEY, ContentScript, Signal, load_config};
use crate::logging;
use crate::panel::{ACTION_ATTR, CUSTOM_INPUT_ATTR};

use dom::BrowserDom;
use observers::BrowserObservers;
use scheduler::{BrowserScheduler, defer};
use storage::LocalStorageBackend;

thread_local! {
    static APP: RefCell<Option<Rc<ContentScript>>> = const { RefCell::new(None) };
}

/// Collects one formatted event and writes it to the console on drop.
#[derive(Default)]
struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer);
            web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
            self.buffer.clear();
        }
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

fn deliver(app: &Weak<ContentScript>, signal: Signal) {
    let Some(script) = app.upgrade() else {
        return;
    };
    if let Err(signal) = script.dispatch(signal) {
        let app = app.clone();
        defer(move || deliver(&app, signal));
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    logging::init_with_writer(ConsoleWriter::default, None);
    spawn_local(async {
        if let Err(e) = boot().await {
            error!("content script failed to start: {:?}", e);
        }
    });
}

async fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let backend = LocalStorageBackend::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let raw = match backend.get(CONFIG_KEY).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("configuration not readable: {}", e);
            None
        }
    };
    let config = load_config(raw.as_deref());

    let dom = Rc::new(BrowserDom::new(window.clone(), &config.overlay.marker_id)?);
    let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
    let observers = Rc::new(BrowserObservers::new(window, Rc::clone(&dom))?);
    let generator = Rc::new(OpenAIGenerator::new(config.generation.clone()));
    let store = Rc::new(SettingsStorage::new(backend));

    let script = Rc::new(ContentScript::new(
        dom.clone(),
        scheduler.clone(),
        observers.clone(),
        config,
        store.clone(),
        generator,
    ));
    let weak = Rc::downgrade(&script);

    let timers = weak.clone();
    scheduler.set_handler(Rc::new(move |key| deliver(&timers, Signal::Timer(key))));
    let signals = weak.clone();
    observers.set_sink(Rc::new(move |signal| deliver(&signals, signal)));
    observers.install()?;

    let clicks = weak.clone();
    let panel_dom = Rc::clone(&dom);
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(script) = clicks.upgrade() else {
            return;
        };
        let Some(button) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|e| e.closest(&format!("[{}]", ACTION_ATTR)).ok().flatten())
        else {
            return;
        };
        let Some(raw) = button.get_attribute(ACTION_ATTR) else {
            return;
        };
        let custom_text = panel_dom
            .document()
            .query_selector(&format!("[{}]", CUSTOM_INPUT_ATTR))
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlTextAreaElement>().ok())
            .map(|e| e.value());
        let Some(action) = script.resolve_action(&raw, custom_text.as_deref()) else {
            debug!("unknown panel action {}", raw);
            return;
        };
        event.prevent_default();
        event.stop_propagation();
        spawn_local(async move {
            script.perform(action).await;
        });
    });
    let document: &EventTarget = dom.document().as_ref();
    observers.add_listener(document, "click", true, on_click)?;

    let refresh = weak.clone();
    let on_storage = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |changes: JsValue, _area: JsValue| {
        let touched = js_sys::Reflect::has(&changes, &JsValue::from_str(CUSTOM_PROFILES_KEY))
            .unwrap_or(false);
        let Some(script) = refresh.upgrade().filter(|_| touched) else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = script.refresh_profiles().await {
                warn!("custom profiles not reloaded: {}", e);
            }
        });
    });
    match store.backend().on_changed(on_storage.as_ref().unchecked_ref()) {
        Ok(()) => on_storage.forget(),
        Err(e) => warn!("storage changes not observed: {}", e),
    }

    script.start();
    if let Err(e) = script.refresh_profiles().await {
        warn!("custom profiles not loaded: {}", e);
    }
    info!("content script started on {}", dom.location_href());
    APP.with(|app| *app.borrow_mut() = Some(script));
    Ok(())
}
