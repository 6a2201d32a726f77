use std::cell::RefCell;

use replyguy_protocols::{NodeId, ObserverHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverCall {
    ObserveResize(NodeId),
    DisconnectResize,
    WatchActivation(NodeId),
    UnwatchActivations,
}

/// [`ObserverHost`] that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingObservers {
    calls: RefCell<Vec<ObserverCall>>,
}

impl RecordingObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ObserverCall> {
        self.calls.borrow().clone()
    }

    /// The element currently under resize observation, if any.
    pub fn resize_target(&self) -> Option<NodeId> {
        let mut target = None;
        for call in self.calls.borrow().iter() {
            match call {
                ObserverCall::ObserveResize(node) => target = Some(*node),
                ObserverCall::DisconnectResize => target = None,
                _ => {}
            }
        }
        target
    }

    pub fn observe_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, ObserverCall::ObserveResize(_)))
            .count()
    }

    /// Inputs with a live activation listener.
    pub fn watched(&self) -> Vec<NodeId> {
        let mut watched = Vec::new();
        for call in self.calls.borrow().iter() {
            match call {
                ObserverCall::WatchActivation(node) => watched.push(*node),
                ObserverCall::UnwatchActivations => watched.clear(),
                _ => {}
            }
        }
        watched
    }
}

impl ObserverHost for RecordingObservers {
    fn observe_resize(&self, node: NodeId) {
        self.calls.borrow_mut().push(ObserverCall::ObserveResize(node));
    }

    fn disconnect_resize(&self) {
        self.calls.borrow_mut().push(ObserverCall::DisconnectResize);
    }

    fn watch_activation(&self, node: NodeId) {
        self.calls
            .borrow_mut()
            .push(ObserverCall::WatchActivation(node));
    }

    fn unwatch_activations(&self) {
        self.calls.borrow_mut().push(ObserverCall::UnwatchActivations);
    }
}
