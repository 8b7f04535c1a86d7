//! Window management using GLFW
//!
//! Provides window creation, presentation modes and the per-frame input pump

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::context::PlatformContext;
use super::input::UserInput;
use super::native::NativeWindow;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The windowing system could not be initialized
    #[error("GLFW initialization failed")]
    InitializationFailed,

    /// The window could not be created
    #[error("Window creation failed")]
    CreationFailed,

    /// Any other windowing-system failure
    #[error("GLFW error: {0}")]
    GlfwError(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// How the window occupies the screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowMode {
    /// Decorated, resizable window
    #[default]
    Windowed,
    /// Exclusive fullscreen on the primary monitor
    Fullscreen,
    /// Undecorated window
    Borderless,
}

/// GLFW window wrapper with its input state
pub struct Window {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    input: UserInput,
    mode: WindowMode,
    windowed_size: (u32, u32),
}

impl Window {
    /// Create and show a window without a client graphics API
    pub fn create(
        context: &mut PlatformContext,
        title: &str,
        width: u32,
        height: u32,
        mode: WindowMode,
    ) -> WindowResult<Self> {
        let glfw = context.glfw_mut();
        glfw.default_window_hints();
        // Vulkan surfaces need a window without an OpenGL context
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Decorated(mode != WindowMode::Borderless));

        let created = match mode {
            WindowMode::Fullscreen => glfw.with_primary_monitor(|glfw, monitor| match monitor {
                Some(monitor) => {
                    let (w, h) = monitor
                        .get_video_mode()
                        .map_or((width, height), |video| (video.width, video.height));
                    glfw.create_window(w, h, title, glfw::WindowMode::FullScreen(monitor))
                }
                None => {
                    log::warn!("No primary monitor, creating {} windowed", title);
                    glfw.create_window(width, height, title, glfw::WindowMode::Windowed)
                }
            }),
            WindowMode::Windowed | WindowMode::Borderless => {
                glfw.create_window(width, height, title, glfw::WindowMode::Windowed)
            }
        };

        let (mut window, events) = created.ok_or(WindowError::CreationFailed)?;

        window.set_key_polling(true);
        window.set_char_polling(true);
        window.set_close_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_mouse_button_polling(true);
        window.set_framebuffer_size_polling(true);
        window.show();

        let mut input = UserInput::new();
        let (cursor_x, cursor_y) = window.get_cursor_pos();
        input.mouse.x = cursor_x as i32;
        input.mouse.y = cursor_y as i32;

        log::info!("Created window '{}' ({}x{}, {:?})", title, width, height, mode);

        Ok(Self {
            window,
            events,
            input,
            mode,
            windowed_size: (width, height),
        })
    }

    /// Switch between windowed, borderless and fullscreen presentation
    pub fn set_mode(&mut self, context: &mut PlatformContext, mode: WindowMode) {
        let (width, height) = self.windowed_size;
        match mode {
            WindowMode::Fullscreen => {
                let window = &mut self.window;
                let switched = context.glfw_mut().with_primary_monitor(|_, monitor| match monitor {
                    Some(monitor) => {
                        let (w, h, refresh) = monitor.get_video_mode().map_or(
                            (width, height, None),
                            |video| (video.width, video.height, Some(video.refresh_rate)),
                        );
                        window.set_monitor(glfw::WindowMode::FullScreen(monitor), 0, 0, w, h, refresh);
                        true
                    }
                    None => false,
                });
                if !switched {
                    log::warn!("No primary monitor, keeping {:?}", self.mode);
                    return;
                }
            }
            WindowMode::Windowed | WindowMode::Borderless => {
                let (x, y) = if self.mode == WindowMode::Fullscreen {
                    (0, 0)
                } else {
                    self.window.get_pos()
                };
                self.window.set_decorated(mode == WindowMode::Windowed);
                self.window.set_monitor(glfw::WindowMode::Windowed, x, y, width, height, None);
            }
        }
        self.mode = mode;
    }

    /// Clear last frame's input and pump pending window events
    pub fn update_input(&mut self, context: &mut PlatformContext) {
        self.input.begin_frame();
        context.glfw_mut().poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            self.input.handle_event(&event);
        }
        if self.window.should_close() {
            self.input.closed_window = true;
        }
    }

    /// Input recorded during the last [`Window::update_input`]
    pub fn input(&self) -> &UserInput {
        &self.input
    }

    /// Ask the main loop to close this window
    pub fn request_close(&mut self) {
        self.window.set_should_close(true);
        self.input.closed_window = true;
    }

    /// Current presentation mode
    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Client area size in screen coordinates
    pub fn size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width as u32, height as u32)
    }

    /// Drawable size in pixels
    pub fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width as u32, height as u32)
    }

    /// Native handles for surface creation
    pub fn native(&self) -> NativeWindow {
        NativeWindow::from_window(&*self.window)
    }
}
