//! Configuration system
//!
//! Any serde type with a `Default` can be stored as TOML or RON; the format is
//! picked from the file extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// On-disk configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Format implied by the extension of `path`
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, contents: &str) -> Result<T, ConfigError> {
        match self {
            Self::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Self::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    fn render<T: Serialize>(self, value: &T) -> Result<String, ConfigError> {
        match self {
            Self::Toml => toml::to_string_pretty(value).map_err(|e| ConfigError::Serialize(e.to_string())),
            Self::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        format.parse(&contents)
    }

    /// Load configuration from file, or fall back to defaults if the file is absent
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            Self::load_from_file(path)
        } else {
            log::info!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = ConfigFormat::from_path(path)?.render(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("settings.RON")).unwrap(), ConfigFormat::Ron);
        assert!(matches!(
            ConfigFormat::from_path(Path::new("settings")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_format_checked_before_io() {
        let result = ConfigFormat::from_path(Path::new("/does/not/exist.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_parse_error_reported() {
        let result: Result<std::collections::BTreeMap<String, u32>, _> =
            ConfigFormat::Toml.parse("key = \"not a number\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
