pub mod constants;
pub mod container;
pub mod draw;
pub mod drivers;
pub mod element;
pub mod event_loop;
pub mod geometry;
pub mod hover;
pub mod input;
pub mod internal_container;
pub mod main_container;
pub mod mouse_state;
pub mod scroll;
pub mod sticky;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod widgets;
pub mod window;

pub use container::Container;
pub use draw::{Drawer, GuiPart, PartState};
pub use element::{Element, ElementBase, ElementHandle, Shared, WeakElement, erase, shared};
pub use geometry::Rect;
pub use hover::FrameContext;
pub use input::{InputSnapshot, InputSource};
pub use main_container::MainContainer;
pub use scroll::ScrollElement;
pub use sticky::Sticky;
pub use window::{Window, WindowConfig};
