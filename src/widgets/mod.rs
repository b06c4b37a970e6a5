pub mod button;
pub mod panel;
pub mod scrollbar;
pub mod tooltip;

pub use button::Button;
pub use panel::Panel;
pub use scrollbar::{Orientation, Scrollbar};
pub use tooltip::Tooltip;
