//! Vulkan bootstrap errors

use ash::vk;
use thiserror::Error;

/// Vulkan-specific error types
///
/// Every bootstrap step reports exactly one of these; nothing is retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VulkanError {
    /// The Vulkan loader library could not be found or loaded
    #[error("Failed to load Vulkan: {0}")]
    LoaderUnavailable(String),

    /// `vkCreateInstance` rejected the layer/extension set or failed
    #[error("Instance creation failed: {0:?}")]
    InstanceCreationFailed(vk::Result),

    /// The platform surface call failed
    #[error("Surface creation failed: {0:?}")]
    SurfaceCreationFailed(vk::Result),

    /// No physical device has the required extensions and a graphics+present family
    #[error("No qualifying physical device: {0}")]
    NoQualifyingDevice(String),

    /// `vkCreateDevice` failed on the selected physical device
    #[error("Logical device creation failed: {0:?}")]
    LogicalDeviceCreationFailed(vk::Result),
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;
