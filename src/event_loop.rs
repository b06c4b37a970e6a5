use std::time::{Duration, Instant};

use crate::drivers::{DriverError, InputAccumulator, InputDriver, OutputDriver, RatatuiDrawer};
use crate::input::InputSnapshot;
use crate::main_container::MainContainer;
use crate::theme::Theme;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// Frame pump driving one element tree.
///
/// Every frame samples the accumulated input once, runs `handle` on the
/// whole tree, lets the caller react, draws, then waits out the rest of the
/// frame interval while collecting events for the next frame. Elements only
/// ever see the per-frame snapshot.
pub struct EventLoop<D> {
    driver: D,
    accumulator: InputAccumulator,
    frame_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, frame_interval: Duration) -> Self {
        Self {
            driver,
            accumulator: InputAccumulator::new(),
            frame_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Wait up to `timeout` for input and fold everything pending.
    pub fn pump(&mut self, timeout: Duration) -> Result<(), DriverError> {
        if self.driver.poll(timeout)? {
            // Drain the queue so bursts (drags, scrolling) do not pile up
            // behind the frame rate.
            loop {
                let event = self.driver.read()?;
                self.accumulator.apply(&event);
                if !self.driver.poll(Duration::from_millis(0))? {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Runs frames until `on_frame` asks to quit.
    ///
    /// `on_frame` is called after the tree handled the frame's input and
    /// before it is drawn.
    pub fn run<O, F>(
        &mut self,
        output: &mut O,
        main: &mut MainContainer,
        theme: &Theme,
        mut on_frame: F,
    ) -> Result<(), DriverError>
    where
        O: OutputDriver,
        F: FnMut(&mut MainContainer, &InputSnapshot) -> ControlFlow,
    {
        let (width, height) = output.size()?;
        main.resize(width as i32, height as i32);

        loop {
            let started = Instant::now();
            if let Some((width, height)) = self.accumulator.take_resize() {
                main.resize(width as i32, height as i32);
            }
            let input = self.accumulator.snapshot();
            main.handle(&input);
            if let ControlFlow::Quit = on_frame(main, &input) {
                break;
            }

            output.draw(|frame| {
                let mut drawer = RatatuiDrawer::new(frame, theme);
                main.draw(&mut drawer);
            })?;

            self.pump(self.frame_interval.saturating_sub(started.elapsed()))?;
        }
        Ok(())
    }
}
