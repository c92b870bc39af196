//! Change reconciliation
//!
//! Merges the host's dirty scope with backend-reported and
//! monitor-observed statuses into one classified change event per path,
//! and drives a full reconciliation pass against the collaborators.

mod router;

pub use router::{CommitBatch, Routable, group_by_root, plan_commit};

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::backend::{BackendError, ChangeMonitor, ChangelistSink, VcsBackend};
use crate::model::{ChangeEvent, ContentRef, DisplayStatus, PathStatus, StatusKind};

/// Merge dirty-scope paths with reported statuses into classified events
///
/// The dirty set defines which backend statuses are in consideration;
/// monitor-observed statuses always count and win over the backend for the
/// same path, since the live monitor is trusted over a possibly stale
/// status query. Output is ordered by path and fully determined by the
/// inputs; reconciliation has no other side effects.
pub fn reconcile(
    dirty: &BTreeSet<PathBuf>,
    backend_statuses: Vec<PathStatus>,
    observed_statuses: Vec<PathStatus>,
) -> Vec<ChangeEvent> {
    let mut merged: BTreeMap<PathBuf, PathStatus> = BTreeMap::new();
    for status in backend_statuses {
        if dirty.contains(&status.path) {
            merged.insert(status.path.clone(), status);
        }
    }
    for status in observed_statuses {
        merged.insert(status.path.clone(), status);
    }
    merged.into_values().filter_map(classify).collect()
}

/// Classify one reconciled status into its change event
///
/// Total over [`StatusKind`]: only `Unmodified` produces nothing, and
/// `Unknown` fails open into an Unknown-classified change rather than
/// dropping the path.
pub fn classify(status: PathStatus) -> Option<ChangeEvent> {
    let path = status.path;
    let event = match status.kind {
        StatusKind::Unmerged => ChangeEvent::change(
            Some(ContentRef::committed_tip(path.clone())),
            Some(ContentRef::local(path)),
            DisplayStatus::MergedWithConflicts,
        ),
        StatusKind::Added => ChangeEvent::change(
            None,
            Some(ContentRef::local(path)),
            DisplayStatus::Added,
        ),
        StatusKind::Deleted => ChangeEvent::change(
            Some(ContentRef::committed_tip(path.clone())),
            Some(ContentRef::local(path)),
            DisplayStatus::Deleted,
        ),
        StatusKind::Copy | StatusKind::Rename | StatusKind::Modified => ChangeEvent::change(
            Some(ContentRef::committed_tip(path.clone())),
            Some(ContentRef::local(path)),
            DisplayStatus::Modified,
        ),
        StatusKind::Unmodified => return None,
        StatusKind::Unversioned => ChangeEvent::unversioned(path),
        StatusKind::Unknown => ChangeEvent::change(
            None,
            Some(ContentRef::local(path)),
            DisplayStatus::Unknown,
        ),
    };
    Some(event)
}

/// Drives one reconciliation pass against the host's collaborators
///
/// The counterpart of a host change-provider entry point: query the
/// backend for the dirty scope, fold in the monitor's snapshot, classify,
/// replay into the changelist sink.
pub struct ChangeProvider<'a> {
    backend: &'a dyn VcsBackend,
    monitor: Option<&'a dyn ChangeMonitor>,
}

impl<'a> ChangeProvider<'a> {
    /// Create a provider over the given backend, without a monitor
    pub fn new(backend: &'a dyn VcsBackend) -> Self {
        Self {
            backend,
            monitor: None,
        }
    }

    /// Attach a live change monitor
    pub fn with_monitor(mut self, monitor: &'a dyn ChangeMonitor) -> Self {
        self.monitor = Some(monitor);
        self
    }

    /// Reconcile the dirty scope under `root`, replaying into `sink`
    ///
    /// Events are emitted in reconciliation order (sorted by path), so a
    /// repeated pass over identical inputs replays identically.
    pub fn collect_changes(
        &self,
        root: &Path,
        dirty: &BTreeSet<PathBuf>,
        sink: &mut dyn ChangelistSink,
    ) -> Result<(), BackendError> {
        let paths: Vec<PathBuf> = dirty.iter().cloned().collect();
        let statuses = self.backend.query_statuses(&paths)?;
        let observed = self
            .monitor
            .and_then(|monitor| monitor.changed_files(root))
            .unwrap_or_default();

        let events = reconcile(dirty, statuses, observed);
        debug!(
            root = %root.display(),
            dirty = dirty.len(),
            events = events.len(),
            "reconciled dirty scope"
        );

        for event in events {
            match event {
                ChangeEvent::Unversioned { path } => sink.process_unversioned(path),
                change => sink.process_change(change),
            }
        }
        Ok(())
    }
}
