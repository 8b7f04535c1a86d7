//! # Yggdrasil Engine
//!
//! Platform layer and Vulkan device bootstrap for the Yggdrasil game engine.
//!
//! ## Features
//!
//! - **Vulkan Bootstrap**: Instance, surface, GPU selection and logical device
//! - **Platform Layer**: GLFW windows, per-frame input snapshots, native handles
//! - **Foundation**: Fixed-capacity arrays and a bump arena
//! - **Configuration**: TOML/RON application config
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use yggdrasil_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut platform = PlatformContext::init()?;
//!     let window = Window::create(&mut platform, "Demo", 800, 600, WindowMode::Windowed)?;
//!
//!     let mut lifecycle = RendererLifecycle::load(config.renderer)?;
//!     let mut renderer = Renderer::default();
//!     let result = lifecycle.create(&window.native(), &mut renderer);
//!     lifecycle.destroy(renderer);
//!     result?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;
pub mod platform;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{ApplicationConfig, BuildMode, Config, EngineConfig, RendererConfig, WindowConfig},
        foundation::collections::CappedArray,
        platform::{Key, NativeWindow, PlatformContext, UserInput, Window, WindowMode},
        render::{Renderer, RendererLifecycle, VulkanError},
    };
}
