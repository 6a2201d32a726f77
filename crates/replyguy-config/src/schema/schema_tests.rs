use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.overlay.marker_id, "replyguy-overlay");
    assert_eq!(config.locator.min_width, 50.0);
    assert_eq!(config.locator.max_width, 2000.0);
    assert_eq!(config.watcher.activation_debounce_ms, 200);
    assert_eq!(config.extractor.dm_tail, 5);
}

#[test]
fn test_overlay_config_default() {
    let overlay = OverlayConfig::default();
    assert_eq!(overlay.margin_top_px, 8);
    assert_eq!(overlay.margin_bottom_px, 12);
    assert_eq!(overlay.narrow_breakpoint_px, 450.0);
}

#[test]
fn test_locator_config_default() {
    let locator = LocatorConfig::default();
    assert_eq!(locator.walk_depth, 12);
    assert_eq!(locator.geometric_min_width, 250.0);
    assert_eq!(locator.geometric_max_width, 1500.0);
    assert_eq!(locator.geometric_min_height, 40.0);
}

#[test]
fn test_width_in_bounds_inclusive() {
    let locator = LocatorConfig::default();
    assert!(locator.width_in_bounds(50.0));
    assert!(locator.width_in_bounds(2000.0));
    assert!(!locator.width_in_bounds(49.9));
    assert!(!locator.width_in_bounds(2000.5));
}

#[test]
fn test_watcher_durations() {
    let watcher = WatcherConfig::default();
    assert_eq!(watcher.reposition_debounce().as_millis(), 100);
    assert_eq!(watcher.activation_debounce().as_millis(), 200);
    assert_eq!(watcher.navigation_settle().as_millis(), 500);
}

#[test]
fn test_generation_config_default() {
    let generation = GenerationConfig::default();
    assert!(generation.api_url.ends_with("/chat/completions"));
    assert_eq!(generation.reply_max_tokens, 100);
    assert_eq!(generation.post_max_tokens, 150);
    assert!((generation.reply_temperature - 0.8).abs() < f32::EPSILON);
    assert!((generation.post_temperature - 0.9).abs() < f32::EPSILON);
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("replyguy-overlay"));
    let back: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
