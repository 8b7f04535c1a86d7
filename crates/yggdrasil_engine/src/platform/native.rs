//! Platform-native window handles consumed by the graphics bootstrap

use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle, RawDisplayHandle, RawWindowHandle};

/// Raw display and window handles of an existing native window
///
/// The window must outlive every surface created from these handles.
#[derive(Debug, Clone, Copy)]
pub struct NativeWindow {
    /// Connection to the windowing system
    pub display: RawDisplayHandle,
    /// The window itself
    pub window: RawWindowHandle,
}

impl NativeWindow {
    /// Wrap already-extracted handles
    pub fn new(display: RawDisplayHandle, window: RawWindowHandle) -> Self {
        Self { display, window }
    }

    /// Capture the handles of any window exposing them
    pub fn from_window<W>(window: &W) -> Self
    where
        W: HasRawWindowHandle + HasRawDisplayHandle,
    {
        Self {
            display: window.raw_display_handle(),
            window: window.raw_window_handle(),
        }
    }

    /// Whether the handles a surface is created from are set
    ///
    /// Checks the window handle of every supported windowing system and the
    /// display connection where the surface call takes one. Kinds without a
    /// surface path here are left to the platform layer to reject.
    pub fn is_valid(&self) -> bool {
        let window = match self.window {
            RawWindowHandle::Xlib(handle) => handle.window != 0,
            RawWindowHandle::Xcb(handle) => handle.window != 0,
            RawWindowHandle::Wayland(handle) => !handle.surface.is_null(),
            RawWindowHandle::Win32(handle) => !handle.hwnd.is_null(),
            RawWindowHandle::AppKit(handle) => !handle.ns_view.is_null(),
            _ => true,
        };

        let display = match self.display {
            RawDisplayHandle::Xlib(handle) => !handle.display.is_null(),
            RawDisplayHandle::Xcb(handle) => !handle.connection.is_null(),
            RawDisplayHandle::Wayland(handle) => !handle.display.is_null(),
            _ => true,
        };

        window && display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raw_window_handle::{
        AppKitDisplayHandle, AppKitWindowHandle, Win32WindowHandle, WindowsDisplayHandle,
        XlibDisplayHandle, XlibWindowHandle,
    };
    use std::ffi::c_void;
    use std::ptr::NonNull;

    fn dangling() -> *mut c_void {
        NonNull::<c_void>::dangling().as_ptr()
    }

    fn xlib(display: *mut c_void, window: u64) -> NativeWindow {
        let mut display_handle = XlibDisplayHandle::empty();
        display_handle.display = display;
        let mut window_handle = XlibWindowHandle::empty();
        window_handle.window = window as _;
        NativeWindow::new(RawDisplayHandle::Xlib(display_handle), RawWindowHandle::Xlib(window_handle))
    }

    fn assert_exposes_handles<W: HasRawWindowHandle + HasRawDisplayHandle>() {}

    #[test]
    fn test_glfw_window_exposes_raw_handles() {
        assert_exposes_handles::<glfw::Window>();
    }

    #[test]
    fn test_xlib_handles() {
        assert!(xlib(dangling(), 42).is_valid());
        assert!(!xlib(dangling(), 0).is_valid());
        assert!(!xlib(std::ptr::null_mut(), 42).is_valid());
    }

    #[test]
    fn test_win32_handles() {
        let display = RawDisplayHandle::Windows(WindowsDisplayHandle::empty());

        let empty = NativeWindow::new(display, RawWindowHandle::Win32(Win32WindowHandle::empty()));
        assert!(!empty.is_valid());

        let mut handle = Win32WindowHandle::empty();
        handle.hwnd = dangling();
        assert!(NativeWindow::new(display, RawWindowHandle::Win32(handle)).is_valid());
    }

    #[test]
    fn test_appkit_handles() {
        let display = RawDisplayHandle::AppKit(AppKitDisplayHandle::empty());

        let mut handle = AppKitWindowHandle::empty();
        handle.ns_window = dangling();
        assert!(!NativeWindow::new(display, RawWindowHandle::AppKit(handle)).is_valid());

        handle.ns_view = dangling();
        assert!(NativeWindow::new(display, RawWindowHandle::AppKit(handle)).is_valid());
    }
}
