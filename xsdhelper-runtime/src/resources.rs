//! File streams opened by executed code, with a release ledger and trace.

use crate::fault::Fault;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Handle of a stream opened by executed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(pub usize);

/// How a stream was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `File.OpenRead`.
    Read,
    /// `File.Create`.
    Write,
}

/// Observable runtime event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// A stream was acquired.
    StreamOpened {
        /// Stream handle.
        id: StreamId,
        /// Opened path.
        path: PathBuf,
        /// Access mode.
        access: Access,
    },
    /// A stream was released.
    StreamReleased {
        /// Stream handle.
        id: StreamId,
    },
    /// A `finally` block started running.
    FinallyEntered {
        /// Member whose body contains the block.
        member: String,
    },
}

/// Stream acquisition and release counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceLedger {
    /// Streams successfully opened.
    pub acquired: usize,
    /// Streams released for the first time.
    pub released: usize,
    /// Release requests for already released streams.
    pub double_released: usize,
}

impl ResourceLedger {
    /// Returns `true` when every acquired stream was released exactly once.
    #[must_use]
    pub const fn is_balanced(&self) -> bool {
        self.acquired == self.released && self.double_released == 0
    }
}

#[derive(Debug)]
enum Handle {
    Read(File),
    Write(BufWriter<File>),
}

#[derive(Debug)]
struct Entry {
    path: PathBuf,
    access: Access,
    handle: Option<Handle>,
}

/// Streams and events of one interpreter.
#[derive(Debug, Default)]
pub struct Resources {
    streams: Vec<Entry>,
    ledger: ResourceLedger,
    trace: Vec<TraceEvent>,
}

impl Resources {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens `path` for reading.
    ///
    /// # Errors
    /// Returns the file system error unchanged.
    pub fn open_read(&mut self, path: &Path) -> Result<StreamId, Fault> {
        let file = File::open(path)?;
        Ok(self.register(path, Access::Read, Handle::Read(file)))
    }

    /// Creates or truncates `path` for writing.
    ///
    /// # Errors
    /// Returns the file system error unchanged.
    pub fn create(&mut self, path: &Path) -> Result<StreamId, Fault> {
        let file = File::create(path)?;
        Ok(self.register(path, Access::Write, Handle::Write(BufWriter::new(file))))
    }

    fn register(&mut self, path: &Path, access: Access, handle: Handle) -> StreamId {
        let id = StreamId(self.streams.len());
        self.streams.push(Entry {
            path: path.to_path_buf(),
            access,
            handle: Some(handle),
        });
        self.ledger.acquired += 1;
        tracing::trace!(id = id.0, path = %path.display(), ?access, "stream opened");
        self.trace.push(TraceEvent::StreamOpened {
            id,
            path: path.to_path_buf(),
            access,
        });
        id
    }

    fn handle(&mut self, id: StreamId) -> Result<&mut Handle, Fault> {
        let entry = self
            .streams
            .get_mut(id.0)
            .ok_or_else(|| Fault::missing(format!("stream #{}", id.0)))?;
        entry.handle.as_mut().ok_or_else(|| {
            Fault::unsupported(format!("stream on '{}' is closed", entry.path.display()))
        })
    }

    /// Reads the remaining content of a read stream.
    ///
    /// # Errors
    /// Returns `Fault::Io` on read failure and `Fault::Unsupported` for a
    /// closed or write-only stream.
    pub fn read_to_string(&mut self, id: StreamId) -> Result<String, Fault> {
        match self.handle(id)? {
            Handle::Read(file) => {
                let mut text = String::new();
                file.read_to_string(&mut text)?;
                Ok(text)
            }
            Handle::Write(_) => Err(Fault::unsupported("reading from a write stream")),
        }
    }

    /// Writes bytes to a write stream.
    ///
    /// # Errors
    /// Returns `Fault::Io` on write failure and `Fault::Unsupported` for a
    /// closed or read-only stream.
    pub fn write_all(&mut self, id: StreamId, bytes: &[u8]) -> Result<(), Fault> {
        match self.handle(id)? {
            Handle::Write(writer) => Ok(writer.write_all(bytes)?),
            Handle::Read(_) => Err(Fault::unsupported("writing to a read stream")),
        }
    }

    /// Flushes a stream.
    ///
    /// # Errors
    /// Returns `Fault::Io` on flush failure.
    pub fn flush(&mut self, id: StreamId) -> Result<(), Fault> {
        match self.handle(id)? {
            Handle::Write(writer) => Ok(writer.flush()?),
            Handle::Read(_) => Ok(()),
        }
    }

    /// Releases a stream. Releasing twice is counted, not raised.
    ///
    /// # Errors
    /// Returns `Fault::Io` if buffered data cannot be written out.
    pub fn release(&mut self, id: StreamId) -> Result<(), Fault> {
        let entry = self
            .streams
            .get_mut(id.0)
            .ok_or_else(|| Fault::missing(format!("stream #{}", id.0)))?;
        let Some(handle) = entry.handle.take() else {
            self.ledger.double_released += 1;
            tracing::trace!(id = id.0, "stream released twice");
            return Ok(());
        };

        self.ledger.released += 1;
        tracing::trace!(id = id.0, access = ?entry.access, "stream released");
        self.trace.push(TraceEvent::StreamReleased { id });
        if let Handle::Write(mut writer) = handle {
            writer.flush()?;
        }
        Ok(())
    }

    /// Records that a `finally` block started.
    pub fn enter_finally(&mut self, member: &str) {
        self.trace.push(TraceEvent::FinallyEntered {
            member: member.to_string(),
        });
    }

    /// Returns the acquisition counts.
    #[must_use]
    pub fn ledger(&self) -> ResourceLedger {
        self.ledger
    }

    /// Returns recorded events in order.
    #[must_use]
    pub fn trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    /// Returns the number of streams still open.
    #[must_use]
    pub fn open_streams(&self) -> usize {
        self.streams.iter().filter(|e| e.handle.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = Resources::new();

        let err = resources.open_read(&dir.path().join("missing.xml")).unwrap_err();
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert_eq!(resources.ledger(), ResourceLedger::default());
        assert!(resources.trace().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.xml");
        let mut resources = Resources::new();

        let out = resources.create(&path).unwrap();
        resources.write_all(out, b"<a/>").unwrap();
        resources.release(out).unwrap();

        let input = resources.open_read(&path).unwrap();
        assert_eq!(resources.read_to_string(input).unwrap(), "<a/>");
        resources.release(input).unwrap();

        let ledger = resources.ledger();
        assert_eq!(ledger.acquired, 2);
        assert_eq!(ledger.released, 2);
        assert!(ledger.is_balanced());
        assert_eq!(resources.open_streams(), 0);
    }

    #[test]
    fn test_double_release_is_counted() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = Resources::new();

        let id = resources.create(&dir.path().join("x.xml")).unwrap();
        resources.release(id).unwrap();
        resources.release(id).unwrap();

        let ledger = resources.ledger();
        assert_eq!(ledger.released, 1);
        assert_eq!(ledger.double_released, 1);
        assert!(!ledger.is_balanced());
    }

    #[test]
    fn test_closed_stream_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut resources = Resources::new();

        let id = resources.create(&dir.path().join("x.xml")).unwrap();
        resources.release(id).unwrap();
        let err = resources.write_all(id, b"late").unwrap_err();
        assert!(matches!(err, Fault::Unsupported { .. }));
    }

    #[test]
    fn test_trace_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.xml");
        let mut resources = Resources::new();

        let id = resources.create(&path).unwrap();
        resources.enter_finally("SaveXMLFile");
        resources.release(id).unwrap();

        assert_eq!(
            resources.trace(),
            &[
                TraceEvent::StreamOpened {
                    id,
                    path,
                    access: Access::Write
                },
                TraceEvent::FinallyEntered {
                    member: "SaveXMLFile".to_string()
                },
                TraceEvent::StreamReleased { id },
            ]
        );
    }
}
