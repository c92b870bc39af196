//! Per-file status model

use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Reconciled VCS state of a single file
///
/// Immutable snapshot: the kind of a published record never changes. A
/// later status for the same path is a new record that supersedes this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStatus {
    /// Absolute file path
    pub path: PathBuf,

    /// Status kind
    pub kind: StatusKind,

    /// Modification timestamp, when the source reports one
    pub mtime: Option<DateTime<Utc>>,
}

impl PathStatus {
    /// Create a status record without a modification timestamp
    pub fn new(path: impl Into<PathBuf>, kind: StatusKind) -> Self {
        Self {
            path: path.into(),
            kind,
            mtime: None,
        }
    }

    /// Attach a modification timestamp
    pub fn with_mtime(mut self, mtime: DateTime<Utc>) -> Self {
        self.mtime = Some(mtime);
        self
    }
}

/// Possible status kinds for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Content differs from the committed version
    Modified,

    /// Copied from another tracked file
    Copy,

    /// Renamed from another tracked file
    Rename,

    /// Newly tracked
    Added,

    /// Removed
    Deleted,

    /// Has merge conflicts
    Unmerged,

    /// Tracked and unchanged
    Unmodified,

    /// Not under version control
    Unversioned,

    /// The backend reported a code this crate does not recognize
    Unknown,
}

impl StatusKind {
    /// Status indicator character for one-line listings
    pub fn indicator(&self) -> char {
        match self {
            Self::Modified => 'M',
            Self::Copy => 'C',
            Self::Rename => 'R',
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Unmerged => 'U',
            Self::Unmodified => '.',
            Self::Unversioned => '?',
            Self::Unknown => '!',
        }
    }
}
