use std::collections::HashSet;

pub use crossterm::event::{KeyCode, MouseButton};

pub trait InputSource {
    fn mouse_x(&self) -> i32;
    fn mouse_y(&self) -> i32;
    fn mouse_button_down(&self, button: MouseButton) -> bool;
    fn mouse_wheel_up(&self) -> bool;
    fn mouse_wheel_down(&self) -> bool;
    fn key_down(&self, key: KeyCode) -> bool;
    /// Monotonic clock in seconds.
    fn seconds(&self) -> f64;
}

/// Plain sampled input state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub x: i32,
    pub y: i32,
    pub left: bool,
    pub middle: bool,
    pub right: bool,
    pub wheel_up: bool,
    pub wheel_down: bool,
    pub keys: HashSet<KeyCode>,
    pub seconds: f64,
}

impl InputSnapshot {
    /// Pointer at `(x, y)` with nothing pressed.
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pressed(mut self, button: MouseButton) -> Self {
        self.set_button(button, true);
        self
    }

    #[must_use]
    pub fn at_time(mut self, seconds: f64) -> Self {
        self.seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn set_button(&mut self, button: MouseButton, down: bool) {
        match button {
            MouseButton::Left => self.left = down,
            MouseButton::Middle => self.middle = down,
            MouseButton::Right => self.right = down,
        }
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }
}

impl InputSource for InputSnapshot {
    fn mouse_x(&self) -> i32 {
        self.x
    }

    fn mouse_y(&self) -> i32 {
        self.y
    }

    fn mouse_button_down(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
        }
    }

    fn mouse_wheel_up(&self) -> bool {
        self.wheel_up
    }

    fn mouse_wheel_down(&self) -> bool {
        self.wheel_down
    }

    fn key_down(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    fn seconds(&self) -> f64 {
        self.seconds
    }
}
