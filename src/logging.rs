//! Diagnostic output for the console binary.
//!
//! Standard output belongs to the menu, so events go to standard error or to a log file.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriter;

#[derive(Clone)]
pub struct LogWriter {
    file: Option<Arc<Mutex<File>>>,
}

impl LogWriter {
    /// Log to `path` if given, otherwise to standard error.
    ///
    /// # Errors
    /// Returns the error from creating the log file.
    pub fn new(path: Option<PathBuf>) -> io::Result<Self> {
        let file = match path {
            Some(path) => Some(Arc::new(Mutex::new(File::create(path)?))),
            None => None,
        };
        Ok(Self { file })
    }
}

pub struct LogWriterGuard {
    file: Option<Arc<Mutex<File>>>,
}

impl<'a> MakeWriter<'a> for LogWriter {
    type Writer = LogWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriterGuard {
            file: self.file.clone(),
        }
    }
}

fn poisoned<T>(_: T) -> io::Error {
    io::Error::other("log file lock poisoned")
}

impl Write for LogWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.file {
            Some(file) => file.lock().map_err(poisoned)?.write_all(buf)?,
            None => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.file {
            Some(file) => file.lock().map_err(poisoned)?.flush(),
            None => io::stderr().flush(),
        }
    }
}

/// Install the global fmt subscriber. `WARN` by default, `DEBUG` when `verbose`.
///
/// # Errors
/// Returns the error from creating the log file.
pub fn init(log: Option<PathBuf>, verbose: bool) -> io::Result<()> {
    let writer = LogWriter::new(log)?;
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(false)
        .with_max_level(level)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn file_writer_appends_every_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.log");
        let writer = LogWriter::new(Some(path.clone())).unwrap();

        writer.make_writer().write_all(b"first\n").unwrap();
        let mut guard = writer.make_writer();
        guard.write_all(b"second\n").unwrap();
        guard.flush().unwrap();

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }
}
