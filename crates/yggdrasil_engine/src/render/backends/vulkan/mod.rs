//! Vulkan backend implementation
//!
//! Currently covers the device bootstrap: instance, surface, physical device
//! selection and logical device creation.

/// Vulkan bootstrap types (instance, surface, devices, lifecycle)
pub mod initialization;

// Re-export the lifecycle and its aggregate
pub use initialization::renderer::{FrameResources, Renderer, RendererLifecycle};

// Re-export core initialization types
pub use initialization::api::GraphicsApi;
pub use initialization::ash_api::AshApi;
pub use initialization::device_selector::{DeviceSelector, QueueFamilyIndices};
pub use initialization::error::{VulkanError, VulkanResult};
