use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Destination for a finished document. Receives the full byte buffer once.
pub trait OutputSink {
    fn write_document(&mut self, bytes: &[u8]) -> Result<(), Error>;

    /// Filesystem location of the written document, if any.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Writes to a temporary file next to `path` and renames it into place,
/// so readers see either the whole document or nothing.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for FileSink {
    fn write_document(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if !dir.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory does not exist: {}", dir.display()),
            )));
        }

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {}", e, self.path.display()),
            ))
        })?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        log::debug!("wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Keeps the document in memory.
#[derive(Default)]
pub struct MemorySink {
    bytes: Vec<u8>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl OutputSink for MemorySink {
    fn write_document(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.bytes = bytes.to_vec();
        Ok(())
    }
}
