//! Vulkan instance creation

use ash::extensions::ext::DebugUtils;
use ash::vk;
use std::ffi::{CStr, CString};

use super::api::{GraphicsApi, InstanceRequest};
use super::error::{VulkanError, VulkanResult};
use super::platform::{ActivePlatform, SurfacePlatform};
use crate::core::config::{BuildMode, RendererConfig};

/// Validation layer requested in debug builds
pub const VALIDATION_LAYER: &CStr = c"VK_LAYER_KHRONOS_validation";

/// Builds the instance request for this platform and build mode
pub struct InstanceFactory<'a> {
    config: &'a RendererConfig,
    build_mode: BuildMode,
}

impl<'a> InstanceFactory<'a> {
    /// Create a factory for `config` compiled in `build_mode`
    pub fn new(config: &'a RendererConfig, build_mode: BuildMode) -> Self {
        Self { config, build_mode }
    }

    /// The request handed to `vkCreateInstance`
    pub fn request(&self) -> InstanceRequest {
        let validation = self.config.validation_enabled(self.build_mode);
        let debug_messenger = validation && self.config.debug_messenger;

        let mut extensions = ActivePlatform::surface_extensions();
        if debug_messenger {
            extensions.push(DebugUtils::name());
        }

        let layers = if validation { vec![VALIDATION_LAYER] } else { Vec::new() };

        InstanceRequest {
            application_name: to_cstring(&self.config.application_name),
            application_version: pack_version(self.config.application_version),
            engine_name: to_cstring(&self.config.engine_name),
            engine_version: pack_version(self.config.engine_version),
            api_version: vk::API_VERSION_1_0,
            extensions,
            layers,
            debug_messenger,
        }
    }

    /// Create the instance; any rejection aborts the bootstrap
    pub fn create<A: GraphicsApi + ?Sized>(&self, api: &mut A) -> VulkanResult<vk::Instance> {
        let request = self.request();
        log::debug!(
            "Creating Vulkan instance ({} extensions, {} layers)",
            request.extensions.len(),
            request.layers.len()
        );

        api.create_instance(&request).map_err(|result| {
            log::error!("Failed to create Vulkan instance: {:?}", result);
            VulkanError::InstanceCreationFailed(result)
        })
    }
}

fn pack_version((major, minor, patch): (u32, u32, u32)) -> u32 {
    vk::make_api_version(0, major, minor, patch)
}

// Interior NULs cannot be passed to the driver; truncate at the first one
fn to_cstring(value: &str) -> CString {
    let bytes = value.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    CString::new(&bytes[..end]).unwrap_or_default()
}
