//! History log parser (templated tab-separated records)

use super::{Parser, parse_date};
use crate::backend::BackendError;
use crate::model::{RevisionId, RevisionMetadata};

impl Parser {
    /// Parse templated log output into revision metadata
    ///
    /// One record per line, tab-separated:
    /// `<revision>\t<author>\t<timestamp>\t<subject>`
    ///
    /// Lines without all four fields are skipped.
    pub fn parse_log(output: &str) -> Result<Vec<RevisionMetadata>, BackendError> {
        Ok(output.lines().filter_map(Self::parse_log_line).collect())
    }

    /// Parse a single templated log line
    pub(super) fn parse_log_line(line: &str) -> Option<RevisionMetadata> {
        let mut fields = line.splitn(4, '\t');

        let revision = fields.next()?.trim();
        if revision.is_empty() {
            return None;
        }
        let author = fields.next()?.trim().to_string();
        let date = parse_date(fields.next()?.trim())?;
        let message = fields.next()?.trim().to_string();

        Some(RevisionMetadata {
            revision: RevisionId::new(revision),
            author,
            date,
            message,
        })
    }
}
