//! Backend output parsers
//!
//! Turns raw text from the version control backend into structured
//! models. The expected line formats are documented on each parser.

mod annotate;
mod log;
mod status;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Regex for one annotate output line
/// Format: `<revision> (<author> <timestamp> <line_number>)<content>`
/// Example: `3f7a2b1c (Alice Doe 2026-03-01 12:00:00 +0000 1)fn main() {`
///
/// Groups:
/// 1. revision (first token)
/// 2. author (may contain spaces)
/// 3. timestamp (YYYY-MM-DD HH:MM:SS ±ZZZZ)
/// 4. line number (1-based)
/// 5. content (rest of line, may be empty)
static ANNOTATE_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\S+)\s+\((.+?)\s+(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} [+-]\d{4})\s+(\d+)\)(.*)$",
    )
    .expect("Invalid annotate line regex")
});

/// Timestamp format shared by annotate and log records
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Parser for backend command output
pub struct Parser;

/// Parse a backend timestamp into UTC
pub(crate) fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(input, DATE_FORMAT)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}
