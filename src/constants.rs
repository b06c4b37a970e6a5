/// Smallest size a window can be resized to, in units.
pub const WINDOW_MIN_WIDTH: i32 = 64;
pub const WINDOW_MIN_HEIGHT: i32 = 64;

/// Thickness of the frame drawn around a window's content.
pub const WINDOW_BORDER: i32 = 1;

/// Height of a window's drag bar.
pub const TOP_BAR_HEIGHT: i32 = 1;

/// Width of the close button at the right end of the drag bar.
pub const CLOSE_BUTTON_WIDTH: i32 = 3;

/// Resize handle size in the bottom-right corner of a window.
pub const RESIZER_SIZE: i32 = 1;

/// Thickness of a scrollbar across its scrolling axis. The arrow buttons at
/// both ends are square with this side.
pub const SCROLLBAR_THICKNESS: i32 = 1;

/// Units scrolled per second while an arrow button is held.
pub const SCROLL_SPEED: f64 = 20.0;

/// Units scrolled per mouse wheel notch.
pub const WHEEL_STEP: f64 = 3.0;

/// Longest gap between two clicks that still counts as a double click.
pub const DOUBLE_CLICK_SECONDS: f64 = 0.5;

/// Frame pacing used by the console event loop when nothing else is given.
pub const DEFAULT_FRAME_MILLIS: u64 = 16;
