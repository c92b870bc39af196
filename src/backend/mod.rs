//! Collaborator contracts
//!
//! Reckon never executes version control commands itself. These traits
//! describe what the embedding host supplies: a backend that answers
//! status/content/blame/history queries, an optional live change monitor,
//! and the sinks that consume reconciled output.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{ChangeEvent, PathStatus, ReadError, RevisionId, RevisionMetadata};

/// Errors surfaced by backend implementations and output parsers
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backing command ran but reported failure
    #[error("backend command failed (exit code {exit_code}): {stderr}")]
    CommandFailed {
        /// Captured error output
        stderr: String,
        /// Process exit code
        exit_code: i32,
    },

    /// Backend output did not match the expected format
    #[error("failed to parse backend output: {0}")]
    Parse(String),

    /// IO failure talking to the backend
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One element of a blame stream: authorship of a single source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlameLine {
    /// Authorship date
    pub date: DateTime<Utc>,

    /// Revision that last touched the line
    pub revision: RevisionId,

    /// Author name
    pub author: String,

    /// 1-based line number as reported by the backend
    pub line_number: usize,

    /// The source line itself, without trailing newline
    pub text: String,
}

/// Executes version control queries on behalf of the core
pub trait VcsBackend {
    /// Current status of each given path
    fn query_statuses(&self, paths: &[PathBuf]) -> Result<Vec<PathStatus>, BackendError>;

    /// Committed content of `path` at `revision`
    fn read_content_at(&self, path: &Path, revision: &RevisionId) -> Result<Vec<u8>, ReadError>;

    /// Per-line authorship of `path`, in line order
    fn query_blame(&self, path: &Path) -> Result<Vec<BlameLine>, BackendError>;

    /// Revision history touching `path`
    fn query_log(&self, path: &Path) -> Result<Vec<RevisionMetadata>, BackendError>;
}

/// Live "recently changed files" monitor
///
/// Optional collaborator. `None` means no live-monitoring data is
/// available for the root, a normal condition rather than an error.
pub trait ChangeMonitor {
    /// Snapshot of files the monitor observed changing under `root`
    fn changed_files(&self, root: &Path) -> Option<Vec<PathStatus>>;
}

/// Receives reconciled output, one call per emitted event
pub trait ChangelistSink {
    /// A classified before/after change
    fn process_change(&mut self, event: ChangeEvent);

    /// A path not under version control
    fn process_unversioned(&mut self, path: PathBuf);
}

/// Resolves a path to its owning repository root
pub trait RootResolver {
    /// Nearest enclosing version-controlled directory, if any
    fn root_of(&self, path: &Path) -> Option<PathBuf>;
}

/// Displays full revision detail on a line-activation request
pub trait DetailViewer {
    /// Show the resolved revision; purely a notification
    fn show_revision(&mut self, metadata: &RevisionMetadata);
}
