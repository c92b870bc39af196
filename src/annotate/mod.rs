//! Line annotation query surface
//!
//! Read-side views over a completed [`AnnotationLog`]: per-line aspect
//! values for the gutter, tooltips joining line records with revision
//! metadata, and line-activation resolution for detail display.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backend::{BlameLine, DetailViewer};
use crate::model::{AnnotationLog, RevisionId, RevisionMetadata, SequencingError};

/// Date format for the gutter date aspect
const ASPECT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format inside tooltips
const TOOLTIP_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Per-line annotation aspects shown in the gutter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aspect {
    /// Short revision identifier
    RevisionShort,

    /// Authorship date
    Date,

    /// Author name
    Author,
}

/// Cache of revision metadata keyed by revision identifier
///
/// Registration is an idempotent upsert, so an index may be shared across
/// annotation sessions for the same root (behind a mutex when shared
/// between threads).
#[derive(Debug, Clone, Default)]
pub struct RevisionIndex {
    revisions: HashMap<RevisionId, RevisionMetadata>,
}

impl RevisionIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert metadata entries; a later entry for the same id overwrites
    pub fn register(&mut self, entries: impl IntoIterator<Item = RevisionMetadata>) {
        for entry in entries {
            self.revisions.insert(entry.revision.clone(), entry);
        }
    }

    /// Metadata for `revision`, if registered
    pub fn get(&self, revision: &RevisionId) -> Option<&RevisionMetadata> {
        self.revisions.get(revision)
    }

    /// Number of registered revisions
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Check if no revisions are registered
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}

/// Completed annotation for one file
///
/// Owns the line log and a revision index. History entries may arrive
/// after the blame lines; metadata-dependent queries return empty values
/// until the revision is registered.
#[derive(Debug, Clone)]
pub struct FileAnnotation {
    path: PathBuf,
    log: AnnotationLog,
    revisions: RevisionIndex,
}

impl FileAnnotation {
    /// Wrap a completed log; revision metadata can be registered later
    pub fn new(path: impl Into<PathBuf>, log: AnnotationLog) -> Self {
        Self {
            path: path.into(),
            log,
            revisions: RevisionIndex::new(),
        }
    }

    /// Build an annotation from a blame stream
    ///
    /// Fails on the first out-of-order line. A failed build leaves nothing
    /// to clean up; drop the error and retry the whole session.
    pub fn build(
        path: impl Into<PathBuf>,
        blame: impl IntoIterator<Item = BlameLine>,
    ) -> Result<Self, SequencingError> {
        let mut log = AnnotationLog::new();
        for line in blame {
            log.append(
                line.date,
                line.revision,
                line.author,
                &line.text,
                line.line_number,
            )?;
        }
        let path = path.into();
        debug!(path = %path.display(), lines = log.len(), "annotation built");
        Ok(Self::new(path, log))
    }

    /// File this annotation covers
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of annotated lines
    pub fn line_count(&self) -> usize {
        self.log.len()
    }

    /// Register revision metadata arriving from a history query
    pub fn register_revisions(&mut self, entries: impl IntoIterator<Item = RevisionMetadata>) {
        self.revisions.register(entries);
    }

    /// Gutter value of `aspect` for the line at `index` (0-based)
    ///
    /// Empty for out-of-range lines.
    pub fn aspect_value(&self, aspect: Aspect, index: usize) -> String {
        let Some(record) = self.log.line(index) else {
            return String::new();
        };
        match aspect {
            Aspect::RevisionShort => record.revision.short().to_string(),
            Aspect::Date => record.date.format(ASPECT_DATE_FORMAT).to_string(),
            Aspect::Author => record.author.clone(),
        }
    }

    /// Tooltip text for the line at `index`
    ///
    /// Joins the line's revision with the registered metadata. Empty when
    /// the line is out of range or its revision is not registered yet.
    pub fn tooltip(&self, index: usize) -> String {
        let Some(record) = self.log.line(index) else {
            return String::new();
        };
        let Some(meta) = self.revisions.get(&record.revision) else {
            return String::new();
        };
        format!(
            "commit {}\nAuthor: {}\nDate: {}\n\n{}",
            record.revision,
            meta.author,
            meta.date.format(TOOLTIP_DATE_FORMAT),
            meta.message,
        )
    }

    /// Resolve the full revision metadata behind the line at `index`
    pub fn revision_detail(&self, index: usize) -> Option<&RevisionMetadata> {
        let record = self.log.line(index)?;
        self.revisions.get(&record.revision)
    }

    /// Handle a line-activation request by notifying the detail viewer
    ///
    /// Resolution only; the viewer owns the navigation. No-op when the
    /// line or its revision cannot be resolved.
    pub fn activate(&self, index: usize, viewer: &mut dyn DetailViewer) {
        if let Some(meta) = self.revision_detail(index) {
            viewer.show_revision(meta);
        }
    }

    /// The full annotated text accumulated during the build
    pub fn annotated_content(&self) -> &str {
        self.log.raw_text()
    }
}
