//! Vulkan surface creation for a native window

use ash::vk;

use super::api::GraphicsApi;
use super::error::{VulkanError, VulkanResult};
use crate::platform::NativeWindow;

/// Binds a native window to an instance
pub struct SurfaceFactory;

impl SurfaceFactory {
    /// Create a surface for `window` owned by `instance`
    ///
    /// # Panics
    /// A null `instance` or unset window handles are caller bugs, not runtime
    /// failures.
    pub fn create<A: GraphicsApi + ?Sized>(
        api: &mut A,
        instance: vk::Instance,
        window: &NativeWindow,
    ) -> VulkanResult<vk::SurfaceKHR> {
        assert!(instance != vk::Instance::null(), "Vulkan instance is null");
        assert!(window.is_valid(), "Native window handle is null");

        log::debug!("Creating window surface");
        api.create_surface(instance, window).map_err(|result| {
            log::error!("Failed to create Vulkan surface: {:?}", result);
            VulkanError::SurfaceCreationFailed(result)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::backends::vulkan::initialization::mock::{surface_handle, test_window, Call, MockApi};
    use ash::vk::Handle;
    use raw_window_handle::{RawDisplayHandle, RawWindowHandle, XlibDisplayHandle, XlibWindowHandle};

    #[test]
    fn test_surface_created_for_valid_window() {
        let mut api = MockApi::new();
        let surface = SurfaceFactory::create(&mut api, vk::Instance::from_raw(1), &test_window()).unwrap();

        assert_eq!(surface, surface_handle());
        assert_eq!(api.calls(), vec![Call::CreateSurface]);
    }

    #[test]
    fn test_surface_failure_maps_to_error() {
        let mut api = MockApi::new();
        api.fail_surface = Some(vk::Result::ERROR_NATIVE_WINDOW_IN_USE_KHR);

        let result = SurfaceFactory::create(&mut api, vk::Instance::from_raw(1), &test_window());
        assert_eq!(
            result,
            Err(VulkanError::SurfaceCreationFailed(vk::Result::ERROR_NATIVE_WINDOW_IN_USE_KHR))
        );
    }

    #[test]
    #[should_panic(expected = "Vulkan instance is null")]
    fn test_null_instance_is_a_precondition_failure() {
        let mut api = MockApi::new();
        let _ = SurfaceFactory::create(&mut api, vk::Instance::null(), &test_window());
    }

    #[test]
    #[should_panic(expected = "Native window handle is null")]
    fn test_null_window_is_a_precondition_failure() {
        let mut api = MockApi::new();
        let window = NativeWindow::new(
            RawDisplayHandle::Xlib(XlibDisplayHandle::empty()),
            RawWindowHandle::Xlib(XlibWindowHandle::empty()),
        );
        let _ = SurfaceFactory::create(&mut api, vk::Instance::from_raw(1), &window);
    }
}
