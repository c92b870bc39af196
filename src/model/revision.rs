//! Revision identity and metadata

use std::fmt;

use chrono::{DateTime, Utc};

/// Number of characters shown for a revision in gutter displays
pub const SHORT_REV_LEN: usize = 8;

/// Identifier of a single revision (commit hash or symbolic name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevisionId(String);

impl RevisionId {
    /// Symbolic name of the synthetic "last committed" revision
    pub const TIP: &'static str = "HEAD";

    /// Create a revision identifier from a backend-reported string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The synthetic tip revision (last committed content)
    pub fn tip() -> Self {
        Self(Self::TIP.to_string())
    }

    /// Is this the synthetic tip revision?
    pub fn is_tip(&self) -> bool {
        self.0 == Self::TIP
    }

    /// Full identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for gutter display (first 8 characters)
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(SHORT_REV_LEN) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RevisionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Full metadata for one revision, as returned by a history query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionMetadata {
    /// Revision this metadata describes
    pub revision: RevisionId,

    /// Author name
    pub author: String,

    /// Authorship date
    pub date: DateTime<Utc>,

    /// Commit message (subject line)
    pub message: String,
}
