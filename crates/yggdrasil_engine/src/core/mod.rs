//! # Core Engine Module
//!
//! Shared abstractions used throughout the engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration system for all engine subsystems
//! - **Foundation**: Low-level utilities (collections, memory, logging)

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    ApplicationConfig,
    BuildMode,
    EngineConfig,
    RendererConfig,
    WindowConfig,
    Config,
    ConfigError,
};
