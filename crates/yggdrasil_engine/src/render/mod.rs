//! # Rendering System
//!
//! Graphics device bootstrap for the Yggdrasil engine.
//!
//! ## Architecture
//!
//! - **Lifecycle**: [`RendererLifecycle`] builds and tears down a [`Renderer`]
//! - **Factories**: instance, surface and logical device creation, each a single step
//! - **Selection**: [`DeviceSelector`] filters and ranks physical devices
//! - **API seam**: every Vulkan call goes through [`GraphicsApi`]
//!
//! Later stages (swapchain, pipelines, command recording) build on the
//! handles a complete [`Renderer`] exposes.

/// Graphics backend implementations
pub mod backends;

pub use backends::vulkan::{
    AshApi, DeviceSelector, FrameResources, GraphicsApi, QueueFamilyIndices, Renderer,
    RendererLifecycle, VulkanError, VulkanResult,
};
