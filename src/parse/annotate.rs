//! Annotate output parser

use super::{ANNOTATE_LINE_REGEX, Parser, parse_date};
use crate::backend::{BackendError, BlameLine};
use crate::model::RevisionId;

impl Parser {
    /// Parse annotate output into the blame stream
    ///
    /// One record per line; see [`ANNOTATE_LINE_REGEX`] for the format.
    /// Malformed lines are skipped — a skipped line shows up downstream as
    /// a sequencing failure when the stream is appended to a log, which is
    /// the desync signal the annotation store is designed to catch.
    pub fn parse_annotate(output: &str) -> Result<Vec<BlameLine>, BackendError> {
        Ok(output.lines().filter_map(Self::parse_annotate_line).collect())
    }

    /// Parse a single annotate output line
    pub(super) fn parse_annotate_line(line: &str) -> Option<BlameLine> {
        let caps = ANNOTATE_LINE_REGEX.captures(line)?;

        let revision = RevisionId::new(caps.get(1)?.as_str());
        let author = caps.get(2)?.as_str().trim().to_string();
        let date = parse_date(caps.get(3)?.as_str())?;
        let line_number: usize = caps.get(4)?.as_str().parse().ok()?;
        let text = caps
            .get(5)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Some(BlameLine {
            date,
            revision,
            author,
            line_number,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_annotate_line() {
        let line = "3f7a2b1c (Alice Doe 2026-03-01 12:00:00 +0000 1)fn main() {";
        let blame = Parser::parse_annotate_line(line).expect("line parses");

        assert_eq!(blame.revision, RevisionId::new("3f7a2b1c"));
        assert_eq!(blame.author, "Alice Doe");
        assert_eq!(blame.line_number, 1);
        assert_eq!(blame.text, "fn main() {");
    }

    #[test]
    fn test_parse_annotate_line_empty_content() {
        let line = "3f7a2b1c (Alice 2026-03-01 12:00:00 +0000 7)";
        let blame = Parser::parse_annotate_line(line).expect("line parses");
        assert_eq!(blame.line_number, 7);
        assert_eq!(blame.text, "");
    }

    #[test]
    fn test_parse_annotate_skips_malformed_lines() {
        let output = "3f7a2b1c (Alice 2026-03-01 12:00:00 +0000 1)a\n\
                      not an annotate record\n\
                      3f7a2b1c (Alice 2026-03-01 12:00:00 +0000 2)b\n";
        let stream = Parser::parse_annotate(output).expect("parse succeeds");
        assert_eq!(stream.len(), 2);
        assert_eq!(stream[1].line_number, 2);
    }

    #[test]
    fn test_parse_annotate_empty_output() {
        let stream = Parser::parse_annotate("").expect("parse succeeds");
        assert!(stream.is_empty());
    }
}
