//! Registry configuration
//!
//! Settings are plain serde structs stored as TOML:
//!
//! ```toml
//! # fastprop.toml
//! lookup_cache = true
//! warn_on_replace = true
//! ```
//!
//! ```ignore
//! let config = ReflectConfig::load("fastprop.toml")?;
//! let registry = ModelRegistry::with_config(config);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings applied by a [`ModelRegistry`](crate::registry::ModelRegistry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectConfig {
    /// Cache name lookups in models built by the registry
    pub lookup_cache: bool,

    /// Warn when a registration replaces a model with a different shape
    pub warn_on_replace: bool,
}

impl Default for ReflectConfig {
    fn default() -> Self {
        Self {
            lookup_cache: true,
            warn_on_replace: true,
        }
    }
}

impl ReflectConfig {
    /// Parse from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded reflection config from {:?}", path);
        Ok(config)
    }

    /// Save to a TOML file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved reflection config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReflectConfig::default();
        assert!(config.lookup_cache);
        assert!(config.warn_on_replace);
    }

    #[test]
    fn test_partial_toml() {
        let config = ReflectConfig::from_toml_str("lookup_cache = false").unwrap();
        assert!(!config.lookup_cache);
        assert!(config.warn_on_replace);

        let empty = ReflectConfig::from_toml_str("").unwrap();
        assert_eq!(empty, ReflectConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = ReflectConfig::from_toml_str("lookup_cache = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("fastprop-config-{}", std::process::id()));
        let path = dir.join("nested").join("fastprop.toml");

        let config = ReflectConfig {
            lookup_cache: false,
            warn_on_replace: false,
        };
        config.save(&path).unwrap();
        assert_eq!(ReflectConfig::load(&path).unwrap(), config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReflectConfig::load("/nonexistent/fastprop.toml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
