//! Session cookie persistence between invocations.
//!
//! The cookie is a bearer credential. It is written through a temporary file
//! in the target directory, which is created owner-only (0600 on unix), and
//! then renamed over the previous session.

use crate::error::CliError;
use peakwave_core::Result;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File holding the exported `Cookie` header.
#[derive(Debug, Clone)]
pub struct CookieFile {
    path: PathBuf,
}

impl CookieFile {
    /// Points at `path`; nothing is read yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, err: &std::io::Error) -> CliError {
        CliError::SessionFile {
            path: self.path.clone(),
            details: err.to_string(),
        }
    }

    /// Reads the saved cookie header, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<String>, CliError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let header = contents.trim();
                Ok((!header.is_empty()).then(|| header.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.error(&e).into()),
        }
    }

    /// Saves the cookie header.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, header: &str) -> Result<(), CliError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| self.error(&e))?;
        file.write_all(header.as_bytes())
            .map_err(|e| self.error(&e))?;
        file.persist(&self.path).map_err(|e| self.error(&e.error))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    /// Deletes the saved session. A missing file is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), CliError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "session removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.error(&e).into()),
        }
    }
}
