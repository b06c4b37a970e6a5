pub mod accumulator;
pub mod console;
pub mod output_driver;
pub mod ratatui_drawer;

use ::crossterm::event::Event;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub use accumulator::InputAccumulator;
pub use console::{ConsoleInput, ConsoleOutput};
pub use output_driver::OutputDriver;
pub use ratatui_drawer::RatatuiDrawer;

/// Failures at the device boundary. The element tree itself never fails.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }
}
