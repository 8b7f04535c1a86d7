//! Platform layer
//!
//! Window creation, per-frame input and the native handles the renderer binds
//! its surface to. All windowing-system state hangs off an explicit
//! [`PlatformContext`] instead of process globals. Read-only file mapping and
//! runtime library loading live here too.

pub mod context;
pub mod file_mapping;
pub mod input;
pub mod library;
pub mod native;
pub mod window;

pub use context::PlatformContext;
pub use file_mapping::{FileMapping, FileMappingError};
pub use input::{KeyState, MouseInput, UserInput};
pub use library::{DynamicLibrary, LibraryError};
pub use native::NativeWindow;
pub use window::{Window, WindowError, WindowMode, WindowResult};

/// Keyboard keys as reported by the windowing system
pub use glfw::Key;
