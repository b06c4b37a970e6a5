use std::collections::HashSet;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};

use crate::input::InputSnapshot;

pub struct InputAccumulator {
    x: i32,
    y: i32,
    held: HashSet<MouseButton>,
    latched: HashSet<MouseButton>,
    keys: HashSet<KeyCode>,
    wheel_up: bool,
    wheel_down: bool,
    resized: Option<(u16, u16)>,
    started: Instant,
}

impl Default for InputAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAccumulator {
    pub fn new() -> Self {
        Self {
            x: 0,
            y: 0,
            held: HashSet::new(),
            latched: HashSet::new(),
            keys: HashSet::new(),
            wheel_up: false,
            wheel_down: false,
            resized: None,
            started: Instant::now(),
        }
    }

    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Mouse(mouse) => {
                self.x = mouse.column as i32;
                self.y = mouse.row as i32;
                match mouse.kind {
                    MouseEventKind::Down(button) => {
                        self.held.insert(button);
                        self.latched.insert(button);
                    }
                    MouseEventKind::Up(button) => {
                        self.held.remove(&button);
                    }
                    MouseEventKind::Drag(button) => {
                        self.held.insert(button);
                    }
                    MouseEventKind::ScrollUp => self.wheel_up = true,
                    MouseEventKind::ScrollDown => self.wheel_down = true,
                    _ => {}
                }
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                self.keys.insert(key.code);
            }
            Event::Resize(width, height) => self.resized = Some((*width, *height)),
            _ => {}
        }
    }

    /// Surface size reported since the last call, if it changed.
    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resized.take()
    }

    /// State for the next frame, stamped with the time since creation.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let seconds = self.started.elapsed().as_secs_f64();
        self.snapshot_at(seconds)
    }

    /// State for the next frame at an explicit clock value. Clears latched
    /// presses, wheel notches and keys.
    pub fn snapshot_at(&mut self, seconds: f64) -> InputSnapshot {
        let mut snapshot = InputSnapshot::at(self.x, self.y).at_time(seconds);
        for button in self.held.union(&self.latched) {
            snapshot.set_button(*button, true);
        }
        snapshot.wheel_up = std::mem::take(&mut self.wheel_up);
        snapshot.wheel_down = std::mem::take(&mut self.wheel_down);
        snapshot.keys = std::mem::take(&mut self.keys);
        self.latched.clear();
        snapshot
    }
}
