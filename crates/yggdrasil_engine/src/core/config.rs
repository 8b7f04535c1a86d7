//! # Unified Configuration System
//!
//! Configuration for the engine core, the Vulkan bootstrap and the main window.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: Core engine behavior such as logging
//! - **Renderer Config**: Instance metadata and validation settings
//! - **Window Config**: Title, size and presentation mode of the main window

use serde::{Serialize, Deserialize};

use crate::platform::WindowMode;

// Re-export from the config module for compatibility
pub use crate::config::{Config, ConfigError};

/// Build flavour the engine was compiled in
///
/// Gates validation-layer requests when [`RendererConfig::enable_validation`]
/// is left on auto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// `debug_assertions` enabled
    Debug,
    /// Optimized build without `debug_assertions`
    Release,
}

impl BuildMode {
    /// The mode this crate was compiled in
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    /// Whether this is a debug build
    pub const fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// # Renderer Configuration
///
/// Application metadata passed to instance creation plus debug features.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Application name for Vulkan instance creation
    pub application_name: String,
    /// Application version (major, minor, patch)
    pub application_version: (u32, u32, u32),
    /// Engine name for Vulkan instance creation
    pub engine_name: String,
    /// Engine version (major, minor, patch)
    pub engine_version: (u32, u32, u32),
    /// Whether to enable Vulkan validation layers; `None` follows the build mode
    pub enable_validation: Option<bool>,
    /// Route validation output into the log when validation is enabled
    pub debug_messenger: bool,
}

impl RendererConfig {
    /// Create a new renderer configuration
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            application_name: app_name.into(),
            application_version: (1, 0, 0),
            engine_name: "Yggdrasil Game Engine".to_string(),
            engine_version: (1, 0, 0),
            enable_validation: None, // Auto-detect based on build type
            debug_messenger: true,
        }
    }

    /// Set application version
    pub fn with_version(mut self, major: u32, minor: u32, patch: u32) -> Self {
        self.application_version = (major, minor, patch);
        self
    }

    /// Enable or disable validation layers regardless of build mode
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.enable_validation = Some(enabled);
        self
    }

    /// Enable or disable the validation log messenger
    pub fn with_debug_messenger(mut self, enabled: bool) -> Self {
        self.debug_messenger = enabled;
        self
    }

    /// Resolve whether validation layers are requested for `mode`
    pub fn validation_enabled(&self, mode: BuildMode) -> bool {
        self.enable_validation.unwrap_or_else(|| mode.is_debug())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application_name.is_empty() {
            return Err(ConfigError::Invalid("Application name cannot be empty".to_string()));
        }
        if self.engine_name.is_empty() {
            return Err(ConfigError::Invalid("Engine name cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self::new("Yggdrasil")
    }
}

/// # Engine Configuration
///
/// Core engine behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Window Configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Client area width in pixels
    pub width: u32,
    /// Client area height in pixels
    pub height: u32,
    /// Presentation mode
    pub mode: WindowMode,
}

impl WindowConfig {
    /// Create a windowed configuration
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            mode: WindowMode::Windowed,
        }
    }

    /// Set presentation mode
    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Window extent must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("Main Window", 800, 600)
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Rendering system configuration
    pub renderer: RendererConfig,
    /// Main window configuration
    pub window: WindowConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            engine: EngineConfig::default(),
            renderer: RendererConfig::new(app_name),
            window: WindowConfig::default(),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.renderer.validate()?;
        self.window.validate()?;
        Ok(())
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_follows_build_mode() {
        let config = RendererConfig::default();
        assert!(config.validation_enabled(BuildMode::Debug));
        assert!(!config.validation_enabled(BuildMode::Release));
    }

    #[test]
    fn test_validation_override() {
        let config = RendererConfig::default().with_validation(false);
        assert!(!config.validation_enabled(BuildMode::Debug));

        let config = RendererConfig::default().with_validation(true);
        assert!(config.validation_enabled(BuildMode::Release));
    }

    #[test]
    fn test_default_application_config() {
        let config = ApplicationConfig::default();
        assert_eq!(config.window.title, "Main Window");
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert_eq!(config.window.mode, WindowMode::Windowed);
        assert_eq!(config.renderer.application_name, "Yggdrasil");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = ApplicationConfig::default();
        config.window.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = ApplicationConfig::new("");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ApplicationConfig = toml::from_str(
            r#"
            [window]
            title = "Editor"
            mode = "Borderless"

            [renderer]
            enable_validation = false
            "#,
        )
        .unwrap();
        assert_eq!(config.window.title, "Editor");
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.mode, WindowMode::Borderless);
        assert_eq!(config.renderer.enable_validation, Some(false));
        assert_eq!(config.engine.log_level, "info");
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let path = std::env::temp_dir().join("yggdrasil_config_test.ron");
        let path = path.to_str().unwrap();

        let mut config = ApplicationConfig::new("Roundtrip");
        config.window = config.window.with_mode(WindowMode::Fullscreen);
        config.save_to_file(path).unwrap();
        let loaded = ApplicationConfig::load_from_file(path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(loaded.renderer.application_name, "Roundtrip");
        assert_eq!(loaded.window.mode, WindowMode::Fullscreen);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ApplicationConfig::load_from_file("config.json");
        assert!(result.is_err());
        assert!(matches!(
            ApplicationConfig::default().save_to_file("config.json"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
