//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AtlasConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::navigation::NavigationMode;

/// Selects hash routing when truthy (`true`, `1`, `yes`).
pub const ENV_HASH_ROUTER: &str = "ATLAS_HASH_ROUTER";
/// Overrides `content.api_key`.
pub const ENV_CONTENT_API_KEY: &str = "ATLAS_CONTENT_API_KEY";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AtlasConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: AtlasConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Startup configuration: the file when given (defaults otherwise), then
/// environment overrides, then validation. Called once per process.
pub fn load_startup_config(path: Option<&Path>) -> Result<AtlasConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => AtlasConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_overrides<F>(config: &mut AtlasConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(flag) = lookup(ENV_HASH_ROUTER) {
        config.navigation.mode = NavigationMode::from_hash_flag(Some(&flag));
    }
    if let Some(key) = lookup(ENV_CONTENT_API_KEY) {
        config.content.api_key = key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_valid_file() {
        let path = std::env::temp_dir().join(format!("atlas-config-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[navigation]\nmode = \"hash\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.navigation.mode, NavigationMode::Hash);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_invalid_file() {
        let path = std::env::temp_dir().join(format!("atlas-config-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[content]\ntimeout_secs = 0\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("content.timeout_secs"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            [(ENV_HASH_ROUTER, "true"), (ENV_CONTENT_API_KEY, "abc123")].into();
        let mut config = AtlasConfig::default();

        apply_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.navigation.mode, NavigationMode::Hash);
        assert_eq!(config.content.api_key, "abc123");
    }
}
