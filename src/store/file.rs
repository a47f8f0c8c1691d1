//! store::file
//!
//! Loader for key=value metadata files.
//!
//! # File format
//!
//! One entry per line, `#` comment lines and blank lines ignored:
//!
//! ```text
//! VERSION=v1.2.3
//! GIT_COMMIT=abc123
//! GIT_BRANCH=main
//! GIT_REPO=git@example.com:me/myapp.git
//! BUILD_TIMESTAMP=Mon Jan  2 15:04:05 UTC 2006
//! ```
//!
//! Whitespace around keys and values is trimmed. Lines without `=` and
//! unrecognized keys are skipped without error. Each recognized key is
//! gated individually: it only lands if its target field is still
//! empty/unset. Note this is finer-grained than the grouped
//! [`MetadataStore::set_git_info`] setter, which gates all three git
//! fields on the stored commit alone.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::parse::parse_unix_date;
use crate::store::MetadataStore;

/// Errors from reading metadata files.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened.
    #[error("failed to open '{path}': {source}")]
    Open {
        /// The file that was being opened
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The file could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// The file that was being read
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },
}

impl MetadataStore {
    /// Load metadata from a key=value file.
    ///
    /// Recognized keys: `VERSION`, `GIT_COMMIT`, `GIT_BRANCH`, `GIT_REPO`,
    /// `BUILD_TIMESTAMP`. Each updates its field only if that field is
    /// still empty/unset. A readable file with zero recognized keys is
    /// still a success. Malformed timestamps are ignored, not errors.
    ///
    /// # Errors
    ///
    /// Returns [`FileError`] if the file cannot be opened or a read fails
    /// mid-stream. Lines applied before a mid-stream failure remain
    /// applied.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), FileError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FileError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| FileError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            self.apply_line(&line);
        }
        Ok(())
    }

    /// Apply a single metadata file line, silently skipping anything that
    /// is not a recognized `KEY=value` entry.
    fn apply_line(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        let Some((key, value)) = line.split_once('=') else {
            return;
        };
        let (key, value) = (key.trim(), value.trim());

        match key {
            "VERSION" => {
                if self.version.raw.is_empty() {
                    self.set_version(value);
                }
            }
            "GIT_COMMIT" => {
                if self.build.git.commit.is_empty() {
                    self.build.git.commit = value.to_string();
                }
            }
            "GIT_BRANCH" => {
                if self.build.git.branch.is_empty() {
                    self.build.git.branch = value.to_string();
                }
            }
            "GIT_REPO" => {
                if self.build.git.repo.is_empty() {
                    self.build.git.repo = value.to_string();
                }
            }
            "BUILD_TIMESTAMP" => {
                if self.build.timestamp.is_none() {
                    self.build.timestamp = parse_unix_date(value);
                }
            }
            _ => {}
        }
    }
}
