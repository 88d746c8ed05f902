//! Temporary files for tests.
//!
//! # Examples
//!
//! ```
//! use assay::temp_file;
//!
//! let file = temp_file("hello\nworld").unwrap();
//! let path = file.path().to_path_buf();
//! assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\nworld");
//!
//! file.clean().unwrap();
//! assert!(!path.exists());
//! ```

use std::io::{self, Write};
use std::path::Path;
use tempfile::{NamedTempFile, TempPath};

/// A file in the system temp directory, removed on [`TempFile::clean`] or
/// when dropped.
#[derive(Debug)]
pub struct TempFile {
    path: TempPath,
}

impl TempFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the file now, reporting failures that `Drop` would ignore.
    pub fn clean(self) -> io::Result<()> {
        tracing::debug!(path = %self.path.display(), "removing temp file");
        self.path.close()
    }
}

/// Creates a temp file holding `contents`.
///
/// The file handle is closed before returning; only the path is kept.
pub fn temp_file(contents: &str) -> io::Result<TempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;

    let path = file.into_temp_path();
    tracing::debug!(path = %path.display(), bytes = contents.len(), "created temp file");
    Ok(TempFile { path })
}
