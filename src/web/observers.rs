//! [`ObserverHost`] over `ResizeObserver`, `MutationObserver` and event
//! listeners.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use replyguy_protocols::{NodeId, ObserverHost};
use tracing::{debug, trace, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Element, Event, EventTarget, MutationObserver, MutationObserverInit,
    MutationRecord, ResizeObserver, Window,
};

use super::dom::BrowserDom;
use crate::app::Signal;

pub type SignalSink = Rc<dyn Fn(Signal)>;

type Sink = Rc<RefCell<Option<SignalSink>>>;

fn emit(sink: &Sink, signal: Signal) {
    let target = sink.borrow().clone();
    if let Some(target) = target {
        target(signal);
    }
}

pub struct BrowserObservers {
    window: Window,
    dom: Rc<BrowserDom>,
    sink: Sink,
    resize: ResizeObserver,
    _on_resize: Closure<dyn FnMut(Array)>,
    on_activation: Closure<dyn FnMut(Event)>,
    watched: RefCell<Vec<Element>>,
    /// Page-level observers and listeners, kept alive for the page lifetime.
    mutations: RefCell<Option<(MutationObserver, Closure<dyn FnMut(Array, MutationObserver)>)>>,
    listeners: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
}

impl BrowserObservers {
    pub fn new(window: Window, dom: Rc<BrowserDom>) -> Result<Self, JsValue> {
        let sink: Sink = Rc::new(RefCell::new(None));

        let resize_sink = Rc::clone(&sink);
        let on_resize = Closure::<dyn FnMut(Array)>::new(move |_entries: Array| {
            emit(&resize_sink, Signal::ContainerResized);
        });
        let resize = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;

        let activation_sink = Rc::clone(&sink);
        let activation_dom = Rc::clone(&dom);
        let on_activation = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(element) = event
                .current_target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            let node = activation_dom.handle(&element);
            emit(&activation_sink, Signal::Activation(node));
        });

        Ok(Self {
            window,
            dom,
            sink,
            resize,
            _on_resize: on_resize,
            on_activation,
            watched: RefCell::new(Vec::new()),
            mutations: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub fn set_sink(&self, sink: SignalSink) {
        *self.sink.borrow_mut() = Some(sink);
    }

    /// Start watching the page: added nodes and location changes through a
    /// document-wide mutation observer, viewport changes and history
    /// navigation through window listeners.
    pub fn install(&self) -> Result<(), JsValue> {
        let sink = Rc::clone(&self.sink);
        let dom = Rc::clone(&self.dom);
        let on_mutation = Closure::<dyn FnMut(Array, MutationObserver)>::new(
            move |records: Array, _observer: MutationObserver| {
                let swept = dom.sweep();
                if swept > 0 {
                    trace!("{} stale handles swept", swept);
                }
                emit(&sink, Signal::LocationProbe);
                let mut added = Vec::new();
                for record in records.iter() {
                    let Ok(record) = record.dyn_into::<MutationRecord>() else {
                        continue;
                    };
                    let nodes = record.added_nodes();
                    for i in 0..nodes.length() {
                        if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                            added.push(dom.handle(&element));
                        }
                    }
                }
                if !added.is_empty() {
                    emit(&sink, Signal::NodesAdded(added));
                }
            },
        );
        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        let target = self
            .dom
            .document()
            .document_element()
            .ok_or("no document element")?;
        observer.observe_with_options(&target, &init)?;
        *self.mutations.borrow_mut() = Some((observer, on_mutation));

        let window: &EventTarget = self.window.as_ref();
        self.listen(window, "scroll", Signal::ViewportChanged, true)?;
        self.listen(window, "resize", Signal::ViewportChanged, true)?;
        self.listen(window, "popstate", Signal::LocationProbe, false)?;
        debug!("page observers installed");
        Ok(())
    }

    /// Keep `callback` alive and attach it to `target` for `event`.
    pub fn add_listener(
        &self,
        target: &EventTarget,
        event: &str,
        capture: bool,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        let options = AddEventListenerOptions::new();
        options.set_capture(capture);
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            callback.as_ref().unchecked_ref(),
            event,
            &options,
        )?;
        self.listeners.borrow_mut().push(callback);
        Ok(())
    }

    fn listen(
        &self,
        target: &EventTarget,
        event: &str,
        signal: Signal,
        passive: bool,
    ) -> Result<(), JsValue> {
        let sink = Rc::clone(&self.sink);
        let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            emit(&sink, signal.clone());
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            callback.as_ref().unchecked_ref(),
            event,
            &options,
        )?;
        self.listeners.borrow_mut().push(callback);
        Ok(())
    }
}

impl ObserverHost for BrowserObservers {
    fn observe_resize(&self, node: NodeId) {
        match self.dom.element(node) {
            Some(element) => self.resize.observe(&element),
            None => warn!("resize target {} unknown", node),
        }
    }

    fn disconnect_resize(&self) {
        self.resize.disconnect();
    }

    fn watch_activation(&self, node: NodeId) {
        let Some(element) = self.dom.element(node) else {
            return;
        };
        let callback = self.on_activation.as_ref().unchecked_ref();
        for event in ["click", "focus"] {
            if let Err(e) = element.add_event_listener_with_callback(event, callback) {
                warn!("{} listener on {} failed: {:?}", event, node, e);
            }
        }
        self.watched.borrow_mut().push(element);
    }

    fn unwatch_activations(&self) {
        let callback = self.on_activation.as_ref().unchecked_ref();
        for element in self.watched.borrow_mut().drain(..) {
            for event in ["click", "focus"] {
                let _ = element.remove_event_listener_with_callback(event, callback);
            }
        }
        let pruned = self.dom.prune();
        debug!("activation listeners removed, {} stale handles pruned", pruned);
    }
}
