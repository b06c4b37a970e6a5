use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::KeyCode;
use indoc::indoc;
use ratatui::style::Color;

use term_gui::constants::DEFAULT_FRAME_MILLIS;
use term_gui::drivers::{ConsoleInput, ConsoleOutput, DriverError, OutputDriver};
use term_gui::event_loop::{ControlFlow, EventLoop};
use term_gui::input::InputSource;
use term_gui::theme::Theme;
use term_gui::widgets::{Button, Panel};
use term_gui::{ElementHandle, MainContainer, Rect, Shared, Window, WindowConfig, erase, shared};

#[derive(Parser, Debug)]
#[command(
    name = "term-gui-demo",
    version = env!("CARGO_PKG_VERSION"),
    about = "Floating windows, scrolling and buttons in the terminal",
    after_help = indoc! {"
        Controls:
          drag a title bar to move a window, drag its corner to resize it
          scroll the first window with the wheel or its scrollbars
          press Esc or q, or click Quit, to leave
    "}
)]
struct DemoCli {
    /// Target frames per second.
    #[arg(
        short = 'f',
        long = "fps",
        value_name = "FPS",
        default_value_t = 1000.0 / DEFAULT_FRAME_MILLIS as f64
    )]
    fps: f64,

    /// Number of windows to open.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 3)]
    windows: usize,

    /// Write debug logs to this file.
    #[arg(long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    /// Smallest size windows can be resized to.
    #[arg(
        long = "min-window",
        value_name = "WxH",
        default_value = "20x8",
        value_parser = parse_size
    )]
    min_window: (i32, i32),
}

impl DemoCli {
    fn frame_interval(&self) -> Result<Duration, String> {
        if !(1.0..=240.0).contains(&self.fps) {
            return Err("fps must be between 1 and 240".to_string());
        }
        if !(1..=16).contains(&self.windows) {
            return Err("windows must be between 1 and 16".to_string());
        }
        Ok(Duration::from_secs_f64(1.0 / self.fps))
    }
}

fn parse_size(value: &str) -> Result<(i32, i32), String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got `{value}`"))?;
    let width = width
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("bad width: {err}"))?;
    let height = height
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("bad height: {err}"))?;
    if width < 1 || height < 1 {
        return Err("size must be positive".to_string());
    }
    Ok((width, height))
}

/// Everything the demo tree is made of. Containers only hold weak links, so
/// the strong handles live here for the whole run.
struct Demo {
    main: MainContainer,
    quit: Shared<Button>,
    _owned: Vec<ElementHandle>,
}

impl Demo {
    fn new(windows: usize, min_window: (i32, i32)) -> Self {
        let mut main = MainContainer::new(80, 24);
        let mut owned: Vec<ElementHandle> = Vec::new();

        let backdrop = erase(&shared(Panel::new(Rect::new(0, 0, 80, 24)).with_color(Color::Reset)));
        main.push_top_full(&backdrop);
        owned.push(backdrop);

        let quit = shared(Button::new(Rect::new(1, 0, 9, 1), "Quit").with_tooltip("Esc or q"));
        main.push_top(&erase(&quit));

        for index in 0..windows {
            let offset = index as i32;
            let rect = Rect::sized(2 + offset * 6, 2 + offset * 3, 40, 14);
            let config = WindowConfig::new(format!("Window {}", index + 1))
                .min_size(min_window.0, min_window.1)
                .scrollable(index == 0);
            let window = shared(Window::new(rect, config));
            {
                let mut window = window.borrow_mut();
                if index == 0 {
                    for row in 0..20 {
                        let button = erase(&shared(
                            Button::new(Rect::sized(0, 0, 16, 1), format!("Item {row:02}"))
                                .with_tooltip(format!("row {row}")),
                        ));
                        window.push_top_at(&button, 1, row * 2);
                        owned.push(button);
                    }
                    let wide = erase(&shared(
                        Panel::new(Rect::sized(0, 0, 60, 1)).with_color(Color::Blue),
                    ));
                    window.push_top_at(&wide, 18, 3);
                    owned.push(wide);
                } else {
                    let back = erase(&shared(
                        Panel::new(Rect::sized(0, 0, 14, 5)).with_color(Color::Green),
                    ));
                    let front = erase(&shared(
                        Panel::new(Rect::sized(0, 0, 14, 5)).with_color(Color::Magenta),
                    ));
                    let button = erase(&shared(
                        Button::new(Rect::sized(0, 0, 12, 3), "Press me")
                            .with_tooltip("overlapping panels below"),
                    ));
                    window.push_top_at(&back, 2, 1);
                    window.push_top_at(&front, 8, 3);
                    window.push_top_at(&button, 20, 1);
                    owned.extend([back, front, button]);
                }
            }
            let handle = erase(&window);
            main.push_top(&handle);
            owned.push(handle);
        }

        Self {
            main,
            quit,
            _owned: owned,
        }
    }
}

fn main() -> Result<(), DriverError> {
    let args = DemoCli::parse();
    let frame_interval = args
        .frame_interval()
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    term_gui::tracing_sub::init(args.log.as_deref())?;
    tracing::info!(?args, "starting demo");

    let mut demo = Demo::new(args.windows, args.min_window);
    let theme = Theme::default();
    let mut output = ConsoleOutput::new()?;
    output.enter()?;

    let quit = demo.quit.clone();
    let mut event_loop = EventLoop::new(ConsoleInput::new(), frame_interval);
    let result = event_loop.run(&mut output, &mut demo.main, &theme, |_, input| {
        let wants_quit = input.key_down(KeyCode::Esc)
            || input.key_down(KeyCode::Char('q'))
            || quit.borrow().was_clicked();
        if wants_quit {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        }
    });

    output.exit()?;
    if let Err(err) = &result {
        tracing::error!(%err, "demo stopped");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("20x8"), Ok((20, 8)));
        assert_eq!(parse_size("30X 10"), Ok((30, 10)));
        assert!(parse_size("20").is_err());
        assert!(parse_size("0x5").is_err());
    }

    #[test]
    fn demo_keeps_its_elements_alive() {
        let demo = Demo::new(3, (20, 8));
        // backdrop, quit button and three windows
        assert_eq!(demo.main.root().len(), 5);
    }
}
