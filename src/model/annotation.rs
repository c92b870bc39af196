//! Line annotation (blame) accumulation
//!
//! [`AnnotationLog`] is the write-once store behind an annotation session:
//! per-line authorship records plus the raw annotated text, appended in
//! strict line order while blame data streams in, then read many times.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::revision::RevisionId;

/// Authorship of a single line
///
/// The line number is implied by the record's position in the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// Authorship date
    pub date: DateTime<Utc>,

    /// Revision that last touched the line
    pub revision: RevisionId,

    /// Author name
    pub author: String,
}

/// Annotation lines arrived out of order
///
/// The blame stream is line-ordered by construction, so a mismatch means
/// the collaborator feeding the log has desynchronized. Fatal for the
/// current annotation session: drop the log, do not attempt repair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("annotation line {claimed} arrived while expecting line {expected}")]
pub struct SequencingError {
    /// 1-based line number claimed by the incoming record
    pub claimed: usize,

    /// 1-based line number the log expected next
    pub expected: usize,
}

/// Append-only store of per-line authorship plus the raw annotated text
///
/// Single writer, then many readers: `append` takes `&mut self` during the
/// build phase, all queries take `&self` afterwards. A partially appended
/// log can simply be dropped.
#[derive(Debug, Clone, Default)]
pub struct AnnotationLog {
    records: Vec<LineRecord>,
    text: String,
}

impl AnnotationLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append authorship for the next line
    ///
    /// `claimed_line_number` is the 1-based line number reported by the
    /// blame stream; it must equal `len() + 1`.
    pub fn append(
        &mut self,
        date: DateTime<Utc>,
        revision: RevisionId,
        author: impl Into<String>,
        line_text: &str,
        claimed_line_number: usize,
    ) -> Result<(), SequencingError> {
        let expected = self.records.len() + 1;
        if claimed_line_number != expected {
            return Err(SequencingError {
                claimed: claimed_line_number,
                expected,
            });
        }
        self.records.push(LineRecord {
            date,
            revision,
            author: author.into(),
        });
        self.text.push_str(line_text);
        self.text.push('\n');
        Ok(())
    }

    /// Authorship of the line at `index` (0-based)
    ///
    /// Out-of-range probes return `None`; gutter callers routinely ask for
    /// one past the end during paint cycles.
    pub fn line(&self, index: usize) -> Option<&LineRecord> {
        self.records.get(index)
    }

    /// Number of annotated lines
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the log has no lines
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The full annotated text, one newline-terminated line per record
    ///
    /// Stable only once the write phase has ended.
    pub fn raw_text(&self) -> &str {
        &self.text
    }
}
