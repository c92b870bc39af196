//! Changeset routing
//!
//! Groups change events (or raw paths) by owning repository root, and
//! partitions commit flows by the target operation the backend will run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::backend::RootResolver;
use crate::model::{ChangeEvent, DisplayStatus};

/// An item the router can place under a repository root
pub trait Routable {
    /// Path used for root resolution
    fn route_path(&self) -> Option<&Path>;
}

impl Routable for ChangeEvent {
    fn route_path(&self) -> Option<&Path> {
        self.path()
    }
}

impl Routable for PathBuf {
    fn route_path(&self) -> Option<&Path> {
        Some(self)
    }
}

/// Group items by their owning repository root
///
/// Each item is resolved once; items whose root cannot be resolved are
/// excluded from every group. The caller is expected to have pre-filtered
/// to paths under version control, so an unresolved root is a boundary
/// condition, not an error.
pub fn group_by_root<T: Routable>(
    items: Vec<T>,
    resolver: &dyn RootResolver,
) -> BTreeMap<PathBuf, Vec<T>> {
    let mut groups: BTreeMap<PathBuf, Vec<T>> = BTreeMap::new();
    for item in items {
        let Some(root) = item.route_path().and_then(|path| resolver.root_of(path)) else {
            trace!("dropping item outside any known root");
            continue;
        };
        groups.entry(root).or_default().push(item);
    }
    groups
}

/// Paths a commit pass hands to the backend, split by target operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitBatch {
    /// Content to stage: modified and added files, after side
    pub writes: Vec<PathBuf>,

    /// Files to remove: deleted files, before side
    pub removals: Vec<PathBuf>,
}

impl CommitBatch {
    /// Check if the batch carries no operations
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.removals.is_empty()
    }
}

/// Partition a changeset into per-root commit batches
///
/// Only Modified/Added/Deleted events are commit operations; conflicted,
/// unknown and unversioned entries are skipped. The partition is stable
/// and order within a batch is insertion order.
pub fn plan_commit(
    events: &[ChangeEvent],
    resolver: &dyn RootResolver,
) -> BTreeMap<PathBuf, CommitBatch> {
    let mut plan: BTreeMap<PathBuf, CommitBatch> = BTreeMap::new();
    for event in events {
        let ChangeEvent::Change {
            before,
            after,
            status,
        } = event
        else {
            continue;
        };
        let (side, is_removal) = match status {
            DisplayStatus::Modified | DisplayStatus::Added => (after, false),
            DisplayStatus::Deleted => (before, true),
            DisplayStatus::MergedWithConflicts | DisplayStatus::Unknown => continue,
        };
        let Some(path) = side.as_ref().map(|content| content.path()) else {
            continue;
        };
        let Some(root) = resolver.root_of(path) else {
            trace!(path = %path.display(), "dropping commit entry outside any known root");
            continue;
        };
        let batch = plan.entry(root).or_default();
        if is_removal {
            batch.removals.push(path.to_path_buf());
        } else {
            batch.writes.push(path.to_path_buf());
        }
    }
    plan
}
