//! [`Scheduler`] over `setTimeout`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use replyguy_protocols::{Scheduler, TimerKey};
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

pub type TimerHandler = Rc<dyn Fn(TimerKey)>;

const KEYS: [TimerKey; 3] = [
    TimerKey::Reposition,
    TimerKey::Activation,
    TimerKey::NavigationSettle,
];

#[derive(Default)]
struct Timers {
    handler: RefCell<Option<TimerHandler>>,
    pending: RefCell<HashMap<TimerKey, i32>>,
}

/// One reusable callback per key; scheduling a key again clears the old
/// timeout first.
pub struct BrowserScheduler {
    window: Window,
    timers: Rc<Timers>,
    callbacks: HashMap<TimerKey, Closure<dyn FnMut()>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        let timers = Rc::new(Timers::default());
        let callbacks = KEYS
            .into_iter()
            .map(|key| {
                let timers = Rc::clone(&timers);
                let callback = Closure::<dyn FnMut()>::new(move || {
                    timers.pending.borrow_mut().remove(&key);
                    let handler = timers.handler.borrow().clone();
                    if let Some(handler) = handler {
                        handler(key);
                    }
                });
                (key, callback)
            })
            .collect();
        Self {
            window,
            timers,
            callbacks,
        }
    }

    pub fn set_handler(&self, handler: TimerHandler) {
        *self.timers.handler.borrow_mut() = Some(handler);
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, key: TimerKey, delay: Duration) {
        self.cancel(key);
        let Some(callback) = self.callbacks.get(&key) else {
            return;
        };
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                millis,
            ) {
            Ok(handle) => {
                self.timers.pending.borrow_mut().insert(key, handle);
            }
            Err(e) => warn!("setTimeout for {} failed: {:?}", key, e),
        }
    }

    fn cancel(&self, key: TimerKey) {
        if let Some(handle) = self.timers.pending.borrow_mut().remove(&key) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn is_pending(&self, key: TimerKey) -> bool {
        self.timers.pending.borrow().contains_key(&key)
    }
}

/// Run `f` on a fresh task.
pub fn defer(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(f);
    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
    {
        warn!("deferred callback not scheduled: {:?}", e);
    }
}
