//! Per-target surface construction
//!
//! Exactly one [`SurfacePlatform`] implementation is compiled in, exposed as
//! [`ActivePlatform`]. Building for a target without one is a compile error.

use ash::prelude::VkResult;
use ash::{vk, Entry, Instance};
use std::ffi::CStr;

use crate::platform::NativeWindow;

/// Surface creation path for one windowing system
pub trait SurfacePlatform {
    /// Instance extensions the surface path needs, `VK_KHR_surface` included
    fn surface_extensions() -> Vec<&'static CStr>;

    /// Create a surface for `window`
    ///
    /// # Safety
    /// `instance` must have been created with [`Self::surface_extensions`]
    /// enabled, and the native window must outlive the returned surface.
    unsafe fn create_surface(
        entry: &Entry,
        instance: &Instance,
        window: &NativeWindow,
    ) -> VkResult<vk::SurfaceKHR>;
}

#[cfg(target_os = "windows")]
mod win32 {
    use super::*;
    use ash::extensions::khr;
    use raw_window_handle::RawWindowHandle;

    /// Win32 surfaces via `VK_KHR_win32_surface`
    pub struct Win32Platform;

    impl SurfacePlatform for Win32Platform {
        fn surface_extensions() -> Vec<&'static CStr> {
            vec![khr::Win32Surface::name(), khr::Surface::name()]
        }

        unsafe fn create_surface(
            entry: &Entry,
            instance: &Instance,
            window: &NativeWindow,
        ) -> VkResult<vk::SurfaceKHR> {
            let RawWindowHandle::Win32(handle) = window.window else {
                log::error!("Expected a Win32 window handle, got {:?}", window.window);
                return Err(vk::Result::ERROR_INITIALIZATION_FAILED);
            };

            let create_info = vk::Win32SurfaceCreateInfoKHR::builder()
                .hinstance(handle.hinstance as vk::HINSTANCE)
                .hwnd(handle.hwnd as vk::HWND);

            khr::Win32Surface::new(entry, instance).create_win32_surface(&create_info, None)
        }
    }
}

#[cfg(target_os = "linux")]
mod xlib {
    use super::*;
    use ash::extensions::khr;
    use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

    /// X11 surfaces via `VK_KHR_xlib_surface`
    pub struct XlibPlatform;

    impl SurfacePlatform for XlibPlatform {
        fn surface_extensions() -> Vec<&'static CStr> {
            vec![khr::XlibSurface::name(), khr::Surface::name()]
        }

        unsafe fn create_surface(
            entry: &Entry,
            instance: &Instance,
            window: &NativeWindow,
        ) -> VkResult<vk::SurfaceKHR> {
            let (RawDisplayHandle::Xlib(display), RawWindowHandle::Xlib(handle)) =
                (window.display, window.window)
            else {
                log::error!("Expected Xlib handles, got {:?} / {:?}", window.display, window.window);
                return Err(vk::Result::ERROR_INITIALIZATION_FAILED);
            };

            let create_info = vk::XlibSurfaceCreateInfoKHR::builder()
                .dpy(display.display as *mut vk::Display)
                .window(handle.window);

            khr::XlibSurface::new(entry, instance).create_xlib_surface(&create_info, None)
        }
    }
}

#[cfg(target_os = "macos")]
mod metal {
    use super::*;
    use ash::extensions::{ext, khr};

    /// `CAMetalLayer` surfaces via `VK_EXT_metal_surface`
    pub struct MetalPlatform;

    impl SurfacePlatform for MetalPlatform {
        fn surface_extensions() -> Vec<&'static CStr> {
            vec![ext::MetalSurface::name(), khr::Surface::name()]
        }

        unsafe fn create_surface(
            entry: &Entry,
            instance: &Instance,
            window: &NativeWindow,
        ) -> VkResult<vk::SurfaceKHR> {
            // ash-window attaches the metal layer to the AppKit view
            ash_window::create_surface(entry, instance, window.display, window.window, None)
        }
    }
}

/// Surface path compiled for this target
#[cfg(target_os = "windows")]
pub type ActivePlatform = win32::Win32Platform;

/// Surface path compiled for this target
#[cfg(target_os = "linux")]
pub type ActivePlatform = xlib::XlibPlatform;

/// Surface path compiled for this target
#[cfg(target_os = "macos")]
pub type ActivePlatform = metal::MetalPlatform;

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
compile_error!("Unsupported platform for Vulkan surface creation.");

#[cfg(test)]
mod tests {
    use super::*;
    use ash::extensions::khr;

    #[test]
    fn test_surface_extensions_include_khr_surface() {
        let extensions = ActivePlatform::surface_extensions();
        assert_eq!(extensions.len(), 2);
        assert!(extensions.contains(&khr::Surface::name()));
    }
}
