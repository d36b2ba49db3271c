use std::{
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// StoreError
///
/// Failures crossing the store boundary (file open, rewrite, bad line
/// target). Field-level problems never surface here: malformed numeric
/// tokens degrade to absent values on the record instead.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line index {index} out of range (file has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },
}

impl StoreError {
    pub(crate) fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the failure is a missing backing file, which callers
    /// typically map to "empty catalog" rather than a user-facing error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound
        )
    }
}
