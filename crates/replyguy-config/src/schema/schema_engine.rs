//! Engine tunables: overlay, locator, watcher and extractor.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Overlay element settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// `id` carried by the overlay element. Any other element with this id
    /// is purged before a new overlay is created.
    #[serde(default = "default_marker_id")]
    pub marker_id: String,

    #[serde(default = "default_margin_top")]
    pub margin_top_px: u32,

    #[serde(default = "default_margin_bottom")]
    pub margin_bottom_px: u32,

    /// Regions narrower than this get `data-layout="narrow"`.
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint_px: f64,
}

fn default_marker_id() -> String {
    "replyguy-overlay".to_string()
}

fn default_margin_top() -> u32 {
    8
}

fn default_margin_bottom() -> u32 {
    12
}

fn default_narrow_breakpoint() -> f64 {
    450.0
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            marker_id: default_marker_id(),
            margin_top_px: default_margin_top(),
            margin_bottom_px: default_margin_bottom(),
            narrow_breakpoint_px: default_narrow_breakpoint(),
        }
    }
}

/// Container locator bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatorConfig {
    /// Narrowest acceptable region, in CSS pixels.
    #[serde(default = "default_min_width")]
    pub min_width: f64,

    /// Widest acceptable region, in CSS pixels.
    #[serde(default = "default_max_width")]
    pub max_width: f64,

    /// How many ancestors the geometric fallback inspects.
    #[serde(default = "default_walk_depth")]
    pub walk_depth: usize,

    #[serde(default = "default_geometric_min_width")]
    pub geometric_min_width: f64,

    #[serde(default = "default_geometric_max_width")]
    pub geometric_max_width: f64,

    #[serde(default = "default_geometric_min_height")]
    pub geometric_min_height: f64,
}

fn default_min_width() -> f64 {
    50.0
}

fn default_max_width() -> f64 {
    2000.0
}

fn default_walk_depth() -> usize {
    12
}

fn default_geometric_min_width() -> f64 {
    250.0
}

fn default_geometric_max_width() -> f64 {
    1500.0
}

fn default_geometric_min_height() -> f64 {
    40.0
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            min_width: default_min_width(),
            max_width: default_max_width(),
            walk_depth: default_walk_depth(),
            geometric_min_width: default_geometric_min_width(),
            geometric_max_width: default_geometric_max_width(),
            geometric_min_height: default_geometric_min_height(),
        }
    }
}

impl LocatorConfig {
    pub fn width_in_bounds(&self, width: f64) -> bool {
        width >= self.min_width && width <= self.max_width
    }
}

/// Debounce windows for the mutation and resize watcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatcherConfig {
    #[serde(default = "default_reposition_debounce")]
    pub reposition_debounce_ms: u64,

    #[serde(default = "default_activation_debounce")]
    pub activation_debounce_ms: u64,

    #[serde(default = "default_navigation_settle")]
    pub navigation_settle_ms: u64,
}

fn default_reposition_debounce() -> u64 {
    100
}

fn default_activation_debounce() -> u64 {
    200
}

fn default_navigation_settle() -> u64 {
    500
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            reposition_debounce_ms: default_reposition_debounce(),
            activation_debounce_ms: default_activation_debounce(),
            navigation_settle_ms: default_navigation_settle(),
        }
    }
}

impl WatcherConfig {
    pub fn reposition_debounce(&self) -> Duration {
        Duration::from_millis(self.reposition_debounce_ms)
    }

    pub fn activation_debounce(&self) -> Duration {
        Duration::from_millis(self.activation_debounce_ms)
    }

    pub fn navigation_settle(&self) -> Duration {
        Duration::from_millis(self.navigation_settle_ms)
    }
}

/// Context extraction depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Number of trailing DM messages considered.
    #[serde(default = "default_dm_tail")]
    pub dm_tail: usize,

    /// Maximum preceding posts collected as thread context.
    #[serde(default = "default_thread_depth")]
    pub thread_depth: usize,
}

fn default_dm_tail() -> usize {
    5
}

fn default_thread_depth() -> usize {
    3
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            dm_tail: default_dm_tail(),
            thread_depth: default_thread_depth(),
        }
    }
}
