use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_inverted_width_band() {
    let mut config = Config::default();
    config.locator.min_width = 3000.0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "locator.min_width"));
}

#[test]
fn test_validate_zero_walk_depth() {
    let mut config = Config::default();
    config.locator.walk_depth = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "locator.walk_depth"));
}

#[test]
fn test_validate_zero_dm_tail() {
    let mut config = Config::default();
    config.extractor.dm_tail = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "extractor.dm_tail"));
}

#[test]
fn test_validate_reposition_debounce_warning() {
    let mut config = Config::default();
    config.watcher.reposition_debounce_ms = 20;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.path == "watcher.reposition_debounce_ms")
    );
}

#[test]
fn test_validate_activation_debounce_warning() {
    let mut config = Config::default();
    config.watcher.activation_debounce_ms = 1500;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_validate_marker_whitespace() {
    let mut config = Config::default();
    config.overlay.marker_id = "reply guy".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "overlay.marker_id"));
}

#[test]
fn test_validate_bad_api_url() {
    let mut config = Config::default();
    config.generation.api_url = "ftp://example.com".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "generation.api_url"));
}

#[test]
fn test_validate_temperature_range() {
    let mut config = Config::default();
    config.generation.post_temperature = 3.5;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.path == "generation.post_temperature")
    );
}

#[test]
fn test_into_error_takes_first() {
    let mut config = Config::default();
    config.locator.walk_depth = 0;
    config.extractor.dm_tail = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    match result.into_error() {
        Some(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "locator.walk_depth"),
        other => panic!("unexpected: {:?}", other),
    }
}
