use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::Level;

use crate::drivers::DriverError;

/// Writer handed to the subscriber for each event: the shared log file when
/// one was opened, otherwise a sink. Stderr is never used since it would
/// tear through the alternate screen.
pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Sink(io::Sink),
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(file) => match file.lock() {
                Ok(mut file) => file.write(buf),
                Err(_) => Ok(buf.len()),
            },
            DelegatingInner::Sink(sink) => sink.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(file) => match file.lock() {
                Ok(mut file) => file.flush(),
                Err(_) => Ok(()),
            },
            DelegatingInner::Sink(sink) => sink.flush(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SubscriberMakeWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl SubscriberMakeWriter {
    /// Writer appending to a freshly created file at `path`.
    pub fn to_file(path: &Path) -> Result<Self, DriverError> {
        let file = File::create(path).map_err(|source| DriverError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            file: Some(Arc::new(Mutex::new(file))),
        })
    }

    /// Writer discarding everything.
    pub fn sink() -> Self {
        Self::default()
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        let inner = match &self.file {
            Some(file) => DelegatingInner::File(Arc::clone(file)),
            None => DelegatingInner::Sink(io::sink()),
        };
        DelegatingWriter { inner }
    }
}

/// Install the global subscriber, writing to `log_file` when given.
/// Subsequent calls are no-ops for the global subscriber.
pub fn init(log_file: Option<&Path>) -> Result<(), DriverError> {
    let writer = match log_file {
        Some(path) => SubscriberMakeWriter::to_file(path)?,
        None => SubscriberMakeWriter::sink(),
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(writer)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::fmt::MakeWriter;

    #[test]
    fn file_writer_appends_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gui.log");
        let make = SubscriberMakeWriter::to_file(&path).expect("log file");
        let mut writer = make.make_writer();
        writer.write_all(b"hello\n").expect("write");
        writer.flush().expect("flush");
        let contents = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(contents, "hello\n");
    }

    #[test]
    fn missing_directory_is_a_log_file_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent").join("gui.log");
        let err = SubscriberMakeWriter::to_file(&path).expect_err("no parent dir");
        assert!(matches!(err, DriverError::LogFile { .. }));
    }
}
