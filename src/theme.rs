use ratatui::style::{Color, Style};

use crate::draw::{GuiPart, PartState};

// Centralized theme colors. The drawer looks every skinned part up here so
// widgets never pick colors themselves.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);
pub const ACCENT_ALT_RGB: (u8, u8, u8) = (255, 165, 0);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

pub fn accent_alt() -> Color {
    rgb_to_color(ACCENT_ALT_RGB)
}

/// Styles for every `GuiPart`, plus the modifiers layered on top while the
/// pointer is over a part or holding it down.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub text: Style,
    pub panel: Style,
    pub window: Style,
    pub window_border: Style,
    pub top_bar: Style,
    pub close_button: Style,
    pub resizer: Style,
    pub button: Style,
    pub tooltip: Style,
    pub scroll_track: Style,
    pub scroller: Style,
    pub arrow: Style,
    pub scroll_corner: Style,
    pub hovered: Style,
    pub pressed: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Style::default(),
            panel: Style::default().bg(Color::DarkGray).fg(Color::Black),
            window: Style::default().bg(Color::Black).fg(Color::White),
            window_border: Style::default().fg(Color::DarkGray).bg(Color::Black),
            top_bar: Style::default().bg(Color::Blue).fg(Color::White),
            close_button: Style::default().bg(Color::Blue).fg(Color::White),
            resizer: Style::default().fg(Color::Gray).bg(Color::Black),
            button: Style::default().bg(Color::Gray).fg(Color::Black),
            tooltip: Style::default().bg(accent_alt()).fg(Color::Black),
            scroll_track: Style::default().bg(Color::DarkGray).fg(Color::Gray),
            scroller: Style::default().bg(Color::Gray).fg(Color::Black),
            arrow: Style::default().bg(Color::DarkGray).fg(Color::White),
            scroll_corner: Style::default().bg(Color::DarkGray),
            hovered: Style::default().bg(accent()),
            pressed: Style::default().bg(accent_alt()).fg(Color::Black),
        }
    }
}

impl Theme {
    /// Unmodified style of a part.
    pub fn base(&self, part: GuiPart) -> Style {
        match part {
            GuiPart::Panel => self.panel,
            GuiPart::WindowPanel => self.window,
            GuiPart::TopBar => self.top_bar,
            GuiPart::CloseButton => self.close_button,
            GuiPart::Resizer => self.resizer,
            GuiPart::Button => self.button,
            GuiPart::Tooltip => self.tooltip,
            GuiPart::ScrollTrackVertical | GuiPart::ScrollTrackHorizontal => self.scroll_track,
            GuiPart::Scroller => self.scroller,
            GuiPart::ArrowUp | GuiPart::ArrowDown | GuiPart::ArrowLeft | GuiPart::ArrowRight => {
                self.arrow
            }
            GuiPart::ScrollCorner => self.scroll_corner,
        }
    }

    /// Style of a part in the given interaction state. Panels, tooltips and
    /// the top bar do not react to hovering.
    pub fn part(&self, part: GuiPart, state: PartState) -> Style {
        let style = self.base(part);
        if !reacts_to_pointer(part) {
            return style;
        }
        if state.mouse_down {
            style.patch(self.pressed)
        } else if state.mouse_over {
            style.patch(self.hovered)
        } else {
            style
        }
    }
}

fn reacts_to_pointer(part: GuiPart) -> bool {
    !matches!(
        part,
        GuiPart::Panel
            | GuiPart::WindowPanel
            | GuiPart::TopBar
            | GuiPart::Tooltip
            | GuiPart::ScrollTrackVertical
            | GuiPart::ScrollTrackHorizontal
            | GuiPart::ScrollCorner
    )
}
