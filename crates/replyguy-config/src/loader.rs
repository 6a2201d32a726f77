//! Configuration loader.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a TOML string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load configuration from JSON, as handed over by the extension's
    /// storage. No variable expansion happens here.
    pub fn load_json(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.overlay.marker_id, "replyguy-overlay");
        assert_eq!(config.watcher.reposition_debounce_ms, 100);
    }

    #[test]
    fn test_load_partial_section() {
        let content = r#"
            [locator]
            min_width = 80
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.locator.min_width, 80.0);
        assert_eq!(config.locator.max_width, 2000.0);
        assert_eq!(config.locator.walk_depth, 12);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [overlay]
            marker_id = "rg-test"
            narrow_breakpoint_px = 500

            [watcher]
            reposition_debounce_ms = 250
            activation_debounce_ms = 150
            navigation_settle_ms = 800

            [extractor]
            dm_tail = 8
            thread_depth = 2

            [generation]
            api_url = "http://localhost:9999/v1/chat/completions"
            reply_max_tokens = 60
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.overlay.marker_id, "rg-test");
        assert_eq!(config.overlay.narrow_breakpoint_px, 500.0);
        assert_eq!(config.watcher.navigation_settle_ms, 800);
        assert_eq!(config.extractor.dm_tail, 8);
        assert_eq!(config.generation.reply_max_tokens, 60);
        assert_eq!(config.generation.post_max_tokens, 150);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[extractor]").unwrap();
        writeln!(file, "dm_tail = 3").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.extractor.dm_tail, 3);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/replyguy.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_json() {
        let json = r#"{"watcher": {"reposition_debounce_ms": 300}}"#;
        let config = ConfigLoader::load_json(json).unwrap();
        assert_eq!(config.watcher.reposition_debounce_ms, 300);
        assert_eq!(config.watcher.activation_debounce_ms, 200);
    }

    #[test]
    fn test_load_json_empty_is_default() {
        let config = ConfigLoader::load_json("  ").unwrap();
        assert_eq!(config.locator.walk_depth, 12);
    }

    #[test]
    fn test_load_json_invalid() {
        let result = ConfigLoader::load_json("{not json");
        assert!(matches!(result, Err(ConfigError::JsonParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: unique test-only variable
        unsafe {
            std::env::set_var("REPLYGUY_TEST_API_URL", "http://127.0.0.1:1/v1");
        }
        let content = "[generation]\napi_url = \"${REPLYGUY_TEST_API_URL}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.generation.api_url, "http://127.0.0.1:1/v1");
        unsafe {
            std::env::remove_var("REPLYGUY_TEST_API_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${REPLYGUY_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }
}
