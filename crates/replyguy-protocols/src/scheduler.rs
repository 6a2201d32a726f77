//! Timer and observer seams.
//!
//! The engine never sleeps. It asks a [`Scheduler`] to call back later under a
//! [`TimerKey`]; scheduling a key that is already pending replaces it, which is
//! how debounce windows restart.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dom::NodeId;

/// Named deferred tasks owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerKey {
    /// Trailing-edge reposition after resize or layout churn.
    Reposition,
    /// Deferred handling of a focus/click on a compose input.
    Activation,
    /// Quiet period after a client-side route change.
    NavigationSettle,
}

impl TimerKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reposition => "reposition",
            Self::Activation => "activation",
            Self::NavigationSettle => "navigation-settle",
        }
    }
}

impl std::fmt::Display for TimerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Scheduler {
    /// Fire `key` after `delay`, replacing any pending timer with that key.
    fn schedule(&self, key: TimerKey, delay: Duration);

    fn cancel(&self, key: TimerKey);

    fn is_pending(&self, key: TimerKey) -> bool;
}

/// Subscriptions the engine holds on the host page.
pub trait ObserverHost {
    /// Start observing size changes of `node`. Replaces any previous target.
    fn observe_resize(&self, node: NodeId);

    fn disconnect_resize(&self);

    /// Route focus and click on `node` to the engine's activation handler.
    fn watch_activation(&self, node: NodeId);

    fn unwatch_activations(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_key_names() {
        assert_eq!(TimerKey::NavigationSettle.to_string(), "navigation-settle");
        let json = serde_json::to_string(&TimerKey::Reposition).unwrap();
        assert_eq!(json, "\"reposition\"");
    }

    #[test]
    fn test_timer_keys_order() {
        let mut keys = vec![TimerKey::NavigationSettle, TimerKey::Reposition, TimerKey::Activation];
        keys.sort();
        assert_eq!(
            keys,
            vec![TimerKey::Reposition, TimerKey::Activation, TimerKey::NavigationSettle]
        );
    }
}
