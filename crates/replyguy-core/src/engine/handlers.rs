//! Platform signal handlers.

use replyguy_protocols::{CandidateInput, NodeId, TimerKey};
use tracing::{debug, info, trace};

use super::Engine;
use crate::overlay::OverlayState;
use crate::watcher;

impl Engine {
    /// A batch of nodes was added to the document. At most one detection
    /// per batch.
    pub fn on_nodes_added(&mut self, added: &[NodeId]) {
        if self.overlay.in_pass() {
            trace!("mutation batch during positioning pass ignored");
            return;
        }
        let overlay = self.overlay.element();
        if watcher::is_own_mutation(&*self.dom, added, overlay) {
            return;
        }
        let Some(candidate) = watcher::scan_added(&*self.dom, added, overlay) else {
            return;
        };
        if self.serves(candidate.node) {
            debug!("input {} already served", candidate.node);
            return;
        }
        self.detect(candidate);
    }

    /// Click or focus on a watched input.
    pub fn on_activation(&mut self, node: NodeId) {
        if !self.watched.contains(&node) {
            return;
        }
        self.pending_activation = Some(node);
        self.scheduler
            .schedule(TimerKey::Activation, self.config.watcher.activation_debounce());
    }

    /// The observed region changed size.
    pub fn on_container_resized(&mut self) {
        self.request_reposition();
    }

    /// Window scroll or resize.
    pub fn on_viewport_changed(&mut self) {
        self.request_reposition();
    }

    /// Compare the current location with the last one. On change the overlay
    /// is torn down at once and a scan is scheduled after the settle delay.
    /// Returns whether navigation happened.
    pub fn on_location_probe(&mut self) -> bool {
        let href = self.dom.location_href();
        if !self.navigation.observe(&href) {
            return false;
        }
        info!("navigated to {}", href);
        self.stats.navigations += 1;
        self.reset_for_navigation();
        self.scheduler
            .schedule(TimerKey::NavigationSettle, self.config.watcher.navigation_settle());
        true
    }

    /// A timer scheduled through the [`Scheduler`](replyguy_protocols::Scheduler)
    /// came due.
    pub fn on_timer(&mut self, key: TimerKey) {
        trace!("timer {} fired", key);
        match key {
            TimerKey::Reposition => self.reposition(),
            TimerKey::Activation => self.activation_settled(),
            TimerKey::NavigationSettle => self.scan(),
        }
    }

    fn request_reposition(&mut self) {
        if self.overlay.state() != OverlayState::Mounted {
            return;
        }
        self.scheduler
            .schedule(TimerKey::Reposition, self.config.watcher.reposition_debounce());
    }

    fn activation_settled(&mut self) {
        let Some(node) = self.pending_activation.take() else {
            return;
        };
        if !self.dom.is_connected(node) {
            debug!("activated input {} is gone", node);
            return;
        }
        if self.serves(node) {
            trace!("activation on served input {} ignored", node);
            return;
        }
        let kind = watcher::resolve_kind(&*self.dom, node);
        self.detect(CandidateInput { node, kind });
    }

    /// The current mount is valid and belongs to `node`.
    pub(crate) fn serves(&self, node: NodeId) -> bool {
        self.candidate.is_some_and(|c| c.node == node) && self.overlay.is_mount_valid(&*self.dom)
    }
}
