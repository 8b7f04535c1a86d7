//! Process-wide windowing-system state

use super::window::{WindowError, WindowResult};

/// Windowing-system registration shared by every window of the process
///
/// Initialise once before creating any window and keep it alive until the
/// last window is dropped. Dropping it tears the windowing system down.
pub struct PlatformContext {
    glfw: glfw::Glfw,
}

impl PlatformContext {
    /// Register with the windowing system
    pub fn init() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|_| WindowError::InitializationFailed)?;

        if !glfw.vulkan_supported() {
            log::warn!("Windowing system reports no Vulkan loader");
        }
        log::debug!("Platform context initialized");

        Ok(Self { glfw })
    }

    /// Whether a Vulkan loader was found
    pub fn vulkan_supported(&self) -> bool {
        self.glfw.vulkan_supported()
    }

    pub(crate) fn glfw_mut(&mut self) -> &mut glfw::Glfw {
        &mut self.glfw
    }
}
