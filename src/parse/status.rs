//! Status output parser (porcelain format)

use super::Parser;
use crate::backend::BackendError;
use crate::model::{PathStatus, StatusKind};

/// Column codes that mark a line as a porcelain status record
const COLUMN_CODES: [char; 11] = [' ', '.', 'M', 'T', 'A', 'D', 'R', 'C', 'U', 'X', '?'];

impl Parser {
    /// Parse porcelain status output into one record per path
    ///
    /// Formats:
    /// - `XY path` — two status columns, a space, then the path
    /// - `XY old -> new` — rename/copy records (the new path is kept)
    /// - `?? path` — unversioned
    ///
    /// Column combinations this crate does not classify (e.g. type
    /// changes) map to [`StatusKind::Unknown`] so that no reported path is
    /// silently dropped; lines that are not status records are skipped.
    pub fn parse_status(output: &str) -> Result<Vec<PathStatus>, BackendError> {
        Ok(output.lines().filter_map(Self::parse_status_line).collect())
    }

    /// Parse a single porcelain status line
    pub(super) fn parse_status_line(line: &str) -> Option<PathStatus> {
        let mut chars = line.chars();
        let x = chars.next()?;
        let y = chars.next()?;
        if chars.next()? != ' ' {
            return None;
        }
        if !COLUMN_CODES.contains(&x) || !COLUMN_CODES.contains(&y) {
            return None;
        }
        let rest = chars.as_str().trim();
        if rest.is_empty() {
            return None;
        }

        let kind = match (x, y) {
            ('?', _) | (_, '?') => StatusKind::Unversioned,
            ('U', _) | (_, 'U') | ('A', 'A') | ('D', 'D') => StatusKind::Unmerged,
            ('R', _) | (_, 'R') => StatusKind::Rename,
            ('C', _) | (_, 'C') => StatusKind::Copy,
            ('A', _) | (_, 'A') => StatusKind::Added,
            ('D', _) | (_, 'D') => StatusKind::Deleted,
            ('M', _) | (_, 'M') => StatusKind::Modified,
            (' ', ' ') | ('.', '.') => StatusKind::Unmodified,
            _ => StatusKind::Unknown,
        };

        // Rename/copy records carry both sides; the new path identifies the file
        let path = match rest.split_once(" -> ") {
            Some((_, new_path)) if matches!(kind, StatusKind::Rename | StatusKind::Copy) => {
                new_path.trim()
            }
            _ => rest,
        };

        Some(PathStatus::new(path, kind))
    }
}
