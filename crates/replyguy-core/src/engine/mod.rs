//! The engine: one owned state object behind every platform callback.
//!
//! ```text
//!  mutations ──▶ scan ──▶ detect ──▶ classify/extract ──▶ locate ──▶ overlay
//!  resize/scroll ──(debounce)──────────────────────────▶ reposition ─┘
//!  click/focus ──(debounce)──▶ detect
//!  location probe ──▶ teardown ──(settle)──▶ scan
//! ```
//!
//! Platform glue calls the `on_*` handlers and delivers timers back through
//! [`Engine::on_timer`]. Handlers never block and never fail.

mod handlers;

use std::collections::BTreeSet;
use std::rc::Rc;

use replyguy_config::Config;
use replyguy_protocols::{
    CandidateInput, DomHost, ExtractedContext, NodeId, ObserverHost, Scheduler, TimerKey,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::bridge::{self, WriteMethod};
use crate::extractor::ContextExtractor;
use crate::locator::ContainerLocator;
use crate::overlay::{
    Detection, MountRecord, OverlayManager, OverlayState, OverlayUi, TeardownReason,
};
use crate::watcher::{self, NavigationTracker};

/// Counters for what the engine has done since start.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub scans: u64,
    pub detections: u64,
    pub reposition_passes: u64,
    pub navigations: u64,
}

pub struct Engine {
    dom: Rc<dyn DomHost>,
    scheduler: Rc<dyn Scheduler>,
    observers: Rc<dyn ObserverHost>,
    config: Config,
    overlay: OverlayManager,
    candidate: Option<CandidateInput>,
    pending_activation: Option<NodeId>,
    watched: BTreeSet<NodeId>,
    observed_region: Option<NodeId>,
    navigation: NavigationTracker,
    stats: EngineStats,
}

impl Engine {
    pub fn new(
        dom: Rc<dyn DomHost>,
        scheduler: Rc<dyn Scheduler>,
        observers: Rc<dyn ObserverHost>,
        config: Config,
        ui: Rc<dyn OverlayUi>,
    ) -> Self {
        let overlay = OverlayManager::new(config.overlay.clone(), ui);
        Self {
            dom,
            scheduler,
            observers,
            config,
            overlay,
            candidate: None,
            pending_activation: None,
            watched: BTreeSet::new(),
            observed_region: None,
            navigation: NavigationTracker::new(),
            stats: EngineStats::default(),
        }
    }

    /// Record the starting location and scan the page once.
    pub fn start(&mut self) {
        let href = self.dom.location_href();
        self.navigation.observe(&href);
        info!("engine started at {}", href);
        self.scan();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn candidate(&self) -> Option<CandidateInput> {
        self.candidate
    }

    pub fn mounted(&self) -> Option<&MountRecord> {
        self.overlay.mounted()
    }

    /// Subject of the current mount; `None` in post mode or when absent.
    pub fn subject(&self) -> Option<&ExtractedContext> {
        self.overlay
            .mounted()
            .and_then(|m| m.detection.subject.as_ref())
    }

    pub fn overlay_element(&self) -> Option<NodeId> {
        self.overlay.element()
    }

    /// Whether a positioning pass is running. Platform glue checks this to
    /// defer callbacks that arrive mid-pass.
    pub fn in_pass(&self) -> bool {
        self.overlay.in_pass()
    }

    /// User dismissed the overlay. The candidate is kept so activating it
    /// again brings the overlay back.
    pub fn close(&mut self) {
        if self.overlay.teardown(&*self.dom, TeardownReason::UserClosed) {
            self.scheduler.cancel(TimerKey::Reposition);
            self.sync_resize_observer();
        }
    }

    /// Write generated text into the current candidate, or whatever compose
    /// input the page has now.
    pub fn insert_text(&self, text: &str) -> Option<WriteMethod> {
        bridge::insert_text(&*self.dom, self.candidate, text)
    }

    pub(crate) fn scan(&mut self) {
        self.stats.scans += 1;
        match watcher::scan_document(&*self.dom, self.overlay.element()) {
            Some(candidate) if self.serves(candidate.node) => {
                debug!("scan found served input {}", candidate.node);
            }
            Some(candidate) => self.detect(candidate),
            None => debug!("scan found no compose input"),
        }
    }

    /// Classify, extract and show the overlay for `candidate`.
    pub(crate) fn detect(&mut self, candidate: CandidateInput) {
        self.stats.detections += 1;
        let dom = Rc::clone(&self.dom);

        let extractor = ContextExtractor::new(&*dom, &self.config.extractor);
        let context = extractor.classify(candidate.node);
        let subject = context
            .is_reply()
            .then(|| extractor.extract_context(candidate.node));
        info!("detected {} input {} ({:?})", context, candidate.node, candidate.kind);

        if self.watched.insert(candidate.node) {
            self.observers.watch_activation(candidate.node);
        }
        self.candidate = Some(candidate);

        let locator = ContainerLocator::new(&*dom, &self.config.locator);
        self.overlay.show(
            &*dom,
            &locator,
            Detection {
                candidate,
                context,
                subject,
            },
        );
        self.sync_resize_observer();
    }

    pub(crate) fn reposition(&mut self) {
        self.stats.reposition_passes += 1;
        let dom = Rc::clone(&self.dom);
        let locator = ContainerLocator::new(&*dom, &self.config.locator);
        let state = self.overlay.reposition(&*dom, &locator);
        debug!("reposition pass #{} -> {:?}", self.stats.reposition_passes, state);
        self.sync_resize_observer();
    }

    /// Keep exactly one resize observation, on the mounted region.
    fn sync_resize_observer(&mut self) {
        let region = self.overlay.mounted().map(|m| m.region.node);
        if region == self.observed_region {
            return;
        }
        if self.observed_region.take().is_some() {
            self.observers.disconnect_resize();
        }
        if let Some(region) = region {
            self.observers.observe_resize(region);
            self.observed_region = Some(region);
        }
    }

    fn reset_for_navigation(&mut self) {
        self.overlay.teardown(&*self.dom, TeardownReason::Navigation);
        self.candidate = None;
        self.pending_activation = None;
        self.scheduler.cancel(TimerKey::Reposition);
        self.scheduler.cancel(TimerKey::Activation);
        self.sync_resize_observer();
        if !self.watched.is_empty() {
            self.watched.clear();
            self.observers.unwatch_activations();
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
