//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a [`ConfigError`], for callers that refuse to start
    /// on an invalid configuration.
    pub fn into_error(self) -> Option<ConfigError> {
        self.errors.into_iter().next().map(|e| ConfigError::InvalidValue {
            field: e.path,
            message: e.message,
        })
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_overlay(config, &mut result);
        Self::validate_locator(config, &mut result);
        Self::validate_watcher(config, &mut result);
        Self::validate_extractor(config, &mut result);
        Self::validate_generation(config, &mut result);

        Ok(result)
    }

    fn validate_overlay(config: &Config, result: &mut ValidationResult) {
        let marker = &config.overlay.marker_id;
        if marker.is_empty() {
            result.add_error(ValidationError::new(
                "overlay.marker_id",
                "marker_id cannot be empty",
            ));
        } else if marker.chars().any(char::is_whitespace) {
            result.add_error(ValidationError::new(
                "overlay.marker_id",
                "marker_id cannot contain whitespace",
            ));
        }
    }

    fn validate_locator(config: &Config, result: &mut ValidationResult) {
        let locator = &config.locator;
        if locator.min_width <= 0.0 {
            result.add_error(ValidationError::new(
                "locator.min_width",
                "min_width must be greater than 0",
            ));
        }
        if locator.min_width >= locator.max_width {
            result.add_error(ValidationError::new(
                "locator.min_width",
                format!(
                    "min_width ({}) must be below max_width ({})",
                    locator.min_width, locator.max_width
                ),
            ));
        }
        if locator.geometric_min_width >= locator.geometric_max_width {
            result.add_error(ValidationError::new(
                "locator.geometric_min_width",
                "geometric_min_width must be below geometric_max_width",
            ));
        }
        if locator.walk_depth == 0 {
            result.add_error(ValidationError::new(
                "locator.walk_depth",
                "walk_depth must be greater than 0",
            ));
        }
        if locator.geometric_max_width > locator.max_width
            || locator.geometric_min_width < locator.min_width
        {
            result.add_warning(ValidationWarning::new(
                "locator",
                "geometric band extends past the accepted width range; some candidates will never validate",
            ));
        }
    }

    fn validate_watcher(config: &Config, result: &mut ValidationResult) {
        let watcher = &config.watcher;
        if !(100..=500).contains(&watcher.reposition_debounce_ms) {
            result.add_warning(ValidationWarning::new(
                "watcher.reposition_debounce_ms",
                format!(
                    "reposition debounce of {} ms is outside the 100-500 ms range the host page tolerates",
                    watcher.reposition_debounce_ms
                ),
            ));
        }
        if watcher.activation_debounce_ms > 1000 {
            result.add_warning(ValidationWarning::new(
                "watcher.activation_debounce_ms",
                "activation debounce above 1 s will feel unresponsive",
            ));
        }
    }

    fn validate_extractor(config: &Config, result: &mut ValidationResult) {
        if config.extractor.dm_tail == 0 {
            result.add_error(ValidationError::new(
                "extractor.dm_tail",
                "dm_tail must be greater than 0",
            ));
        }
    }

    fn validate_generation(config: &Config, result: &mut ValidationResult) {
        let url = &config.generation.api_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "generation.api_url",
                "api_url must start with http:// or https://",
            ));
        }
        for (path, temperature) in [
            ("generation.reply_temperature", config.generation.reply_temperature),
            ("generation.post_temperature", config.generation.post_temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                result.add_error(ValidationError::new(path, "temperature must be within 0.0-2.0"));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
