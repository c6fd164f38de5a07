//! Single-file dictionary cache: the raw bytes of the last validated
//! response, read at the start of every load and replaced whole after a
//! good fetch. Translations survive restarts through this file.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Platform cache location, e.g. `~/.cache/kctrans/translation.json`.
    pub fn default_path() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("kctrans")
            .join("translation.json")
    }

    /// Read the cached bytes, if any. Read failures other than absence are
    /// logged and treated as a missing cache.
    pub fn read(&self) -> Option<Vec<u8>> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                debug!(path = %self.path.display(), len = bytes.len(), "dictionary cache read");
                Some(bytes)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "couldn't read dictionary cache");
                None
            }
        }
    }

    /// Whole-file overwrite through a sibling temp file plus rename, so an
    /// interrupted write never leaves a truncated cache behind.
    pub fn write(&self, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, bytes)?;
        fs::rename(&staging, &self.path)
    }
}
