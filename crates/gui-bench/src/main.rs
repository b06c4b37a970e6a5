use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as CellRect;
use ratatui::style::Color;

use term_gui::drivers::RatatuiDrawer;
use term_gui::input::{InputSnapshot, MouseButton};
use term_gui::theme::Theme;
use term_gui::ui::UiFrame;
use term_gui::widgets::{Button, Panel};
use term_gui::{ElementHandle, MainContainer, Rect, Window, WindowConfig, erase, shared};

#[derive(Parser, Debug)]
#[command(
    name = "gui-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Offscreen handle/draw benchmark for a tree of floating windows"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Stop after this many frames even if time remains.
    #[arg(long = "frames", value_name = "COUNT")]
    max_frames: Option<u64>,

    /// Number of windows in the tree.
    #[arg(short = 'w', long = "windows", value_name = "COUNT", default_value_t = 24)]
    windows: usize,

    /// Surface size in cells.
    #[arg(long = "width", default_value_t = 160)]
    width: u16,
    #[arg(long = "height", default_value_t = 48)]
    height: u16,
}

struct BenchConfig {
    duration: Duration,
    max_frames: Option<u64>,
    windows: usize,
    area: CellRect,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.1..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.1 and 600 seconds".to_string());
        }
        if !(1..=512).contains(&cli.windows) {
            return Err("windows must be between 1 and 512".to_string());
        }
        if cli.width < 16 || cli.height < 8 {
            return Err("surface must be at least 16x8".to_string());
        }
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            max_frames: cli.max_frames,
            windows: cli.windows,
            area: CellRect::new(0, 0, cli.width, cli.height),
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let stats = run_benchmark(&config);
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn run_benchmark(config: &BenchConfig) -> BenchStats {
    let (mut main, _owned) = build_tree(config);
    let theme = Theme::default();
    let mut buffer = Buffer::empty(config.area);
    let mut pointer = PointerWalk::seeded_from_clock(config.area);
    let mut stats = BenchStats::new();

    loop {
        let input = pointer.next_frame(stats.elapsed().as_secs_f64());

        let frame_start = Instant::now();
        main.handle(&input);
        let handle_time = frame_start.elapsed();

        buffer.reset();
        {
            let frame = UiFrame::from_parts(config.area, &mut buffer);
            let mut drawer = RatatuiDrawer::new(frame, &theme);
            main.draw(&mut drawer);
        }
        stats.record_frame(handle_time, frame_start.elapsed());

        if stats.elapsed() >= config.duration {
            stats.exit_reason = ExitReason::Completed;
            break;
        }
        if config.max_frames.is_some_and(|max| stats.frame_count >= max) {
            stats.exit_reason = ExitReason::FrameLimit;
            break;
        }
    }

    stats.mark_completed();
    stats
}

/// A root full of windows, each holding a few buttons and panels. The
/// returned handles keep every element alive.
fn build_tree(config: &BenchConfig) -> (MainContainer, Vec<ElementHandle>) {
    let width = config.area.width as i32;
    let height = config.area.height as i32;
    let mut main = MainContainer::new(width, height);
    let mut owned = Vec::new();

    for index in 0..config.windows {
        let offset = index as i32;
        let x = (offset * 7) % (width - 8).max(1);
        let y = (offset * 3) % (height - 4).max(1);
        let window_config = WindowConfig::new(format!("bench {index}"))
            .min_size(12, 6)
            .scrollable(index % 4 == 0);
        let window = shared(Window::new(Rect::sized(x, y, 30, 12), window_config));
        {
            let mut window = window.borrow_mut();
            for row in 0..4 {
                let button = erase(&shared(
                    Button::new(Rect::sized(0, 0, 10, 1), format!("b{row}")).with_tooltip("tip"),
                ));
                window.push_top_at(&button, 1, row * 2);
                owned.push(button);
            }
            let panel = erase(&shared(
                Panel::new(Rect::sized(0, 0, 12, 6)).with_color(Color::Indexed(index as u8)),
            ));
            window.push_top_at(&panel, 13, 1);
            owned.push(panel);
        }
        let handle = erase(&window);
        main.push_top(&handle);
        owned.push(handle);
    }

    (main, owned)
}

/// Synthetic pointer: wanders around the surface and periodically holds the
/// left button for a while so windows get raised and dragged.
struct PointerWalk {
    state: u64,
    area: CellRect,
    input: InputSnapshot,
    hold_frames: u32,
}

impl PointerWalk {
    fn seeded_from_clock(area: CellRect) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
            ^ 0xA5A5_A5A5_1234_5678;
        Self {
            state: seed,
            area,
            input: InputSnapshot::default(),
            hold_frames: 0,
        }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn step(&mut self) -> i32 {
        (self.next() % 5) as i32 - 2
    }

    fn next_frame(&mut self, seconds: f64) -> InputSnapshot {
        let x = (self.input.x + self.step()).clamp(0, self.area.width as i32 - 1);
        let y = (self.input.y + self.step()).clamp(0, self.area.height as i32 - 1);
        self.input.move_to(x, y);

        if self.hold_frames > 0 {
            self.hold_frames -= 1;
        } else if self.next() % 16 == 0 {
            self.hold_frames = 1 + self.next() % 30;
        }
        self.input.set_button(MouseButton::Left, self.hold_frames > 0);
        self.input.wheel_down = self.next() % 64 == 0;
        self.input.seconds = seconds;
        self.input.clone()
    }
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    frame_count: u64,
    total_handle_time: Duration,
    total_frame_time: Duration,
    fastest_frame: Duration,
    slowest_frame: Duration,
    exit_reason: ExitReason,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            frame_count: 0,
            total_handle_time: Duration::ZERO,
            total_frame_time: Duration::ZERO,
            fastest_frame: Duration::MAX,
            slowest_frame: Duration::ZERO,
            exit_reason: ExitReason::Completed,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_frame(&mut self, handle_time: Duration, frame_time: Duration) {
        self.frame_count = self.frame_count.saturating_add(1);
        self.total_handle_time += handle_time;
        self.total_frame_time += frame_time;
        if frame_time < self.fastest_frame {
            self.fastest_frame = frame_time;
        }
        if frame_time > self.slowest_frame {
            self.slowest_frame = frame_time;
        }
    }

    fn average_ms(&self, total: Duration) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        (total.as_secs_f64() / self.frame_count as f64) * 1_000.0
    }

    fn fastest_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.fastest_frame.as_secs_f64() * 1_000.0
    }

    fn slowest_frame_ms(&self) -> f64 {
        if self.frame_count == 0 {
            return 0.0;
        }
        self.slowest_frame.as_secs_f64() * 1_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let fps_avg = if elapsed > 0.0 {
            self.frame_count as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            GUI bench {status}.
            Surface: {width}x{height} cells, {windows} windows
            Duration: {elapsed:.2}s (target {target:.2}s)
            Frames: {frames} | Avg FPS: {fps:.1}
            Avg handle: {handle:.3} ms | Avg frame: {avg:.3} ms
            Best: {best:.3} ms | Worst: {worst:.3} ms
            "#,
            status = self.exit_reason.describe(),
            width = config.area.width,
            height = config.area.height,
            windows = config.windows,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            frames = self.frame_count,
            fps = fps_avg,
            handle = self.average_ms(self.total_handle_time),
            avg = self.average_ms(self.total_frame_time),
            best = self.fastest_frame_ms(),
            worst = self.slowest_frame_ms(),
        )
    }
}

#[derive(Copy, Clone)]
enum ExitReason {
    Completed,
    FrameLimit,
}

impl ExitReason {
    fn describe(self) -> &'static str {
        match self {
            ExitReason::Completed => "completed full duration",
            ExitReason::FrameLimit => "reached the frame limit",
        }
    }
}
