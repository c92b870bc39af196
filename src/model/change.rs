//! Change events and content references
//!
//! A [`ChangeEvent`] is the reconciler's output: one classified change per
//! dirty path, carrying lazy references to the before/after content.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::revision::RevisionId;
use crate::backend::VcsBackend;

/// Reference to one representation of a file's content
///
/// Constructing a reference never touches the filesystem or the backend.
/// An unreadable reference surfaces a [`ReadError`] only when the content
/// is actually dereferenced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentRef {
    /// Current on-disk content
    Local {
        /// Absolute file path
        path: PathBuf,
    },

    /// Committed content at a specific revision
    Committed {
        /// Absolute file path
        path: PathBuf,
        /// Revision the content belongs to
        revision: RevisionId,
    },
}

impl ContentRef {
    /// Reference to the current on-disk content
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self::Local { path: path.into() }
    }

    /// Reference to committed content at `revision`
    pub fn committed(path: impl Into<PathBuf>, revision: RevisionId) -> Self {
        Self::Committed {
            path: path.into(),
            revision,
        }
    }

    /// Reference to the last committed content (synthetic tip revision)
    pub fn committed_tip(path: impl Into<PathBuf>) -> Self {
        Self::committed(path, RevisionId::tip())
    }

    /// Path the reference points at
    pub fn path(&self) -> &Path {
        match self {
            Self::Local { path } | Self::Committed { path, .. } => path,
        }
    }

    /// Read the referenced content
    pub fn read(&self, backend: &dyn VcsBackend) -> Result<Vec<u8>, ReadError> {
        match self {
            Self::Local { path } => std::fs::read(path).map_err(|source| ReadError::Local {
                path: path.clone(),
                source,
            }),
            Self::Committed { path, revision } => backend.read_content_at(path, revision),
        }
    }

    /// Whether the referenced content can currently be produced
    pub fn exists(&self, backend: &dyn VcsBackend) -> bool {
        match self {
            Self::Local { path } => path.exists(),
            Self::Committed { .. } => self.read(backend).is_ok(),
        }
    }

    /// Length of the referenced content in bytes
    ///
    /// For committed content this is derived from a full read.
    pub fn len(&self, backend: &dyn VcsBackend) -> Result<u64, ReadError> {
        match self {
            Self::Local { path } => std::fs::metadata(path)
                .map(|meta| meta.len())
                .map_err(|source| ReadError::Local {
                    path: path.clone(),
                    source,
                }),
            Self::Committed { .. } => self.read(backend).map(|bytes| bytes.len() as u64),
        }
    }
}

/// Content unavailable for a before/after reference
///
/// Deferred: reconciliation still emits events whose references cannot be
/// read; the error appears when a reader dereferences the content.
#[derive(Debug, Error)]
pub enum ReadError {
    /// On-disk content could not be read
    #[error("cannot read {}: {}", path.display(), source)]
    Local {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: io::Error,
    },

    /// Committed content could not be produced by the backend
    #[error("cannot read {} at {}: {}", path.display(), revision, detail)]
    Committed {
        /// Path that failed to read
        path: PathBuf,
        /// Revision the read targeted
        revision: RevisionId,
        /// Backend-reported detail
        detail: String,
    },
}

/// Display status of a reconciled change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    /// Newly tracked file
    Added,
    /// Removed file
    Deleted,
    /// Content change (covers copies and renames)
    Modified,
    /// Unresolved merge conflict
    MergedWithConflicts,
    /// Status the reconciler could not classify
    Unknown,
}

/// One reconciled change, ready for the host changelist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A standard before/after change
    Change {
        /// Committed content the change starts from; absent when the path
        /// did not previously exist under version control
        before: Option<ContentRef>,
        /// Resulting content; absent when the path was deleted without a
        /// readable successor
        after: Option<ContentRef>,
        /// Classified display status
        status: DisplayStatus,
    },

    /// A path not under version control
    Unversioned {
        /// The unversioned path
        path: PathBuf,
    },
}

impl ChangeEvent {
    /// Create a standard change; at least one content reference must exist
    pub fn change(
        before: Option<ContentRef>,
        after: Option<ContentRef>,
        status: DisplayStatus,
    ) -> Self {
        debug_assert!(before.is_some() || after.is_some());
        Self::Change {
            before,
            after,
            status,
        }
    }

    /// Create an unversioned marker
    pub fn unversioned(path: impl Into<PathBuf>) -> Self {
        Self::Unversioned { path: path.into() }
    }

    /// Path this event refers to (after side when both sides exist)
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Change {
                after: Some(content),
                ..
            }
            | Self::Change {
                before: Some(content),
                after: None,
                ..
            } => Some(content.path()),
            Self::Change { .. } => None,
            Self::Unversioned { path } => Some(path),
        }
    }

    /// Display status, when this is a standard change
    pub fn status(&self) -> Option<DisplayStatus> {
        match self {
            Self::Change { status, .. } => Some(*status),
            Self::Unversioned { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_path_prefers_after_side() {
        let event = ChangeEvent::change(
            Some(ContentRef::committed_tip("/repo/old.txt")),
            Some(ContentRef::local("/repo/new.txt")),
            DisplayStatus::Modified,
        );
        assert_eq!(event.path(), Some(Path::new("/repo/new.txt")));
    }

    #[test]
    fn test_event_path_falls_back_to_before_side() {
        let event = ChangeEvent::change(
            Some(ContentRef::committed_tip("/repo/gone.txt")),
            None,
            DisplayStatus::Deleted,
        );
        assert_eq!(event.path(), Some(Path::new("/repo/gone.txt")));
    }

    #[test]
    fn test_unversioned_marker() {
        let event = ChangeEvent::unversioned("/repo/scratch.txt");
        assert_eq!(event.path(), Some(Path::new("/repo/scratch.txt")));
        assert_eq!(event.status(), None);
    }

    #[test]
    fn test_content_ref_path() {
        let local = ContentRef::local("/repo/a.txt");
        assert_eq!(local.path(), Path::new("/repo/a.txt"));

        let committed = ContentRef::committed("/repo/a.txt", RevisionId::new("3f7a2b1c"));
        assert_eq!(committed.path(), Path::new("/repo/a.txt"));
    }

    #[test]
    fn test_committed_tip_uses_tip_revision() {
        let content = ContentRef::committed_tip("/repo/a.txt");
        match content {
            ContentRef::Committed { revision, .. } => assert!(revision.is_tip()),
            ContentRef::Local { .. } => panic!("expected committed reference"),
        }
    }
}
