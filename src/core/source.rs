//! File access as an injected capability.
//!
//! Ingestion reads through [`FileSource`] rather than `std::fs` directly so
//! the load path can be exercised in tests without touching the disk.

use std::path::Path;

use crate::util::error::{read_err, Result};

/// Something that can produce the bytes of a named file.
pub trait FileSource {
    /// Read the whole file at `path`.
    ///
    /// # Errors
    /// Returns [`crate::util::error::LogSleuthError::Read`] on failure.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Reads from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileSource;

impl FileSource for FsFileSource {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| {
            tracing::error!("Failed to read {}: {}", path.display(), e);
            read_err(path, e)
        })
    }
}
