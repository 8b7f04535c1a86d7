//! Per-frame user input gathered from window events

use bitflags::bitflags;
use glfw::{Action, Key, MouseButton, WindowEvent};

use crate::foundation::collections::CappedArray;

/// Number of addressable keyboard keys
pub const KEY_COUNT: usize = 512;

/// Typed characters kept per frame; extra characters are dropped
pub const MAX_TYPED_CHARACTERS: usize = 128;

/// Wheel delta reported for one scroll notch
pub const WHEEL_DELTA: f64 = 120.0;

bitflags! {
    /// Edges observed for a key or button during the current frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyState: u8 {
        /// Pressed (or auto-repeated) this frame
        const DOWN = 1 << 0;
        /// Released this frame
        const UP = 1 << 1;
    }
}

/// Mouse position, wheel and buttons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseInput {
    /// Cursor x in window coordinates
    pub x: i32,
    /// Cursor y in window coordinates
    pub y: i32,
    /// Vertical wheel movement this frame, in [`WHEEL_DELTA`] units
    pub scroll_delta: i32,
    /// Left button edges
    pub left: KeyState,
    /// Right button edges
    pub right: KeyState,
    /// Middle button edges
    pub middle: KeyState,
}

/// Input recorded for one window during one frame
#[derive(Debug, Clone)]
pub struct UserInput {
    /// Characters typed this frame, in order
    pub typed_characters: CappedArray<char, MAX_TYPED_CHARACTERS>,
    keys: [KeyState; KEY_COUNT],
    /// Mouse state
    pub mouse: MouseInput,
    /// Set when the user asked the window to close
    pub closed_window: bool,
}

impl UserInput {
    /// Create empty input state
    pub fn new() -> Self {
        Self {
            typed_characters: CappedArray::new(),
            keys: [KeyState::empty(); KEY_COUNT],
            mouse: MouseInput::default(),
            closed_window: false,
        }
    }

    /// Clear everything recorded last frame except the cursor position
    pub fn begin_frame(&mut self) {
        let (x, y) = (self.mouse.x, self.mouse.y);
        *self = Self::new();
        self.mouse.x = x;
        self.mouse.y = y;
    }

    /// Edges recorded for `key` this frame
    pub fn key(&self, key: Key) -> KeyState {
        key_index(key).map_or(KeyState::empty(), |index| self.keys[index])
    }

    /// Whether `key` went down this frame
    pub fn key_down(&self, key: Key) -> bool {
        self.key(key).contains(KeyState::DOWN)
    }

    /// Whether `key` went up this frame
    pub fn key_up(&self, key: Key) -> bool {
        self.key(key).contains(KeyState::UP)
    }

    /// Record a single window event
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match *event {
            WindowEvent::Close => self.closed_window = true,
            WindowEvent::Key(key, _, action, _) => {
                if let Some(index) = key_index(key) {
                    self.keys[index] |= edge(action);
                }
            }
            WindowEvent::Char(character) => {
                if character != '\0' && self.typed_characters.append(character).is_err() {
                    log::warn!("Typed character buffer full, dropping {:?}", character);
                }
            }
            WindowEvent::CursorPos(x, y) => {
                self.mouse.x = x as i32;
                self.mouse.y = y as i32;
            }
            WindowEvent::Scroll(_, y) => {
                self.mouse.scroll_delta = (y * WHEEL_DELTA) as i32;
            }
            WindowEvent::MouseButton(button, action, _) => {
                let state = match button {
                    MouseButton::Button1 => &mut self.mouse.left,
                    MouseButton::Button2 => &mut self.mouse.right,
                    MouseButton::Button3 => &mut self.mouse.middle,
                    _ => return,
                };
                *state |= edge(action);
            }
            _ => {}
        }
    }
}

impl Default for UserInput {
    fn default() -> Self {
        Self::new()
    }
}

fn key_index(key: Key) -> Option<usize> {
    usize::try_from(key as i32).ok().filter(|&index| index < KEY_COUNT)
}

fn edge(action: Action) -> KeyState {
    match action {
        Action::Press | Action::Repeat => KeyState::DOWN,
        Action::Release => KeyState::UP,
    }
}
