//! Shared fixtures for integration tests
//!
//! An in-memory backend plus recording collaborators, so scenarios can
//! drive the full reconciliation/annotation flow without a real
//! repository or external processes.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use reckon::backend::{
    BackendError, BlameLine, ChangeMonitor, ChangelistSink, RootResolver, VcsBackend,
};
use reckon::model::{ChangeEvent, PathStatus, ReadError, RevisionId, RevisionMetadata};

/// In-memory VCS backend
#[derive(Default)]
pub struct FakeBackend {
    statuses: BTreeMap<PathBuf, PathStatus>,
    contents: HashMap<(PathBuf, RevisionId), Vec<u8>>,
    blame: HashMap<PathBuf, Vec<BlameLine>>,
    log: HashMap<PathBuf, Vec<RevisionMetadata>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: PathStatus) {
        self.statuses.insert(status.path.clone(), status);
    }

    pub fn set_content(
        &mut self,
        path: impl Into<PathBuf>,
        revision: RevisionId,
        bytes: impl Into<Vec<u8>>,
    ) {
        self.contents.insert((path.into(), revision), bytes.into());
    }

    pub fn set_blame(&mut self, path: impl Into<PathBuf>, lines: Vec<BlameLine>) {
        self.blame.insert(path.into(), lines);
    }

    pub fn set_log(&mut self, path: impl Into<PathBuf>, entries: Vec<RevisionMetadata>) {
        self.log.insert(path.into(), entries);
    }
}

impl VcsBackend for FakeBackend {
    fn query_statuses(&self, paths: &[PathBuf]) -> Result<Vec<PathStatus>, BackendError> {
        Ok(paths
            .iter()
            .filter_map(|path| self.statuses.get(path).cloned())
            .collect())
    }

    fn read_content_at(&self, path: &Path, revision: &RevisionId) -> Result<Vec<u8>, ReadError> {
        self.contents
            .get(&(path.to_path_buf(), revision.clone()))
            .cloned()
            .ok_or_else(|| ReadError::Committed {
                path: path.to_path_buf(),
                revision: revision.clone(),
                detail: "no content recorded".to_string(),
            })
    }

    fn query_blame(&self, path: &Path) -> Result<Vec<BlameLine>, BackendError> {
        Ok(self.blame.get(path).cloned().unwrap_or_default())
    }

    fn query_log(&self, path: &Path) -> Result<Vec<RevisionMetadata>, BackendError> {
        Ok(self.log.get(path).cloned().unwrap_or_default())
    }
}

/// Monitor returning a fixed snapshot regardless of root
pub struct FixedMonitor(pub Option<Vec<PathStatus>>);

impl ChangeMonitor for FixedMonitor {
    fn changed_files(&self, _root: &Path) -> Option<Vec<PathStatus>> {
        self.0.clone()
    }
}

/// Sink recording emissions in order
#[derive(Default)]
pub struct CollectingSink {
    pub changes: Vec<ChangeEvent>,
    pub unversioned: Vec<PathBuf>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChangelistSink for CollectingSink {
    fn process_change(&mut self, event: ChangeEvent) {
        self.changes.push(event);
    }

    fn process_unversioned(&mut self, path: PathBuf) {
        self.unversioned.push(path);
    }
}

/// Resolves roots by path prefix
pub struct PrefixResolver(pub Vec<PathBuf>);

impl RootResolver for PrefixResolver {
    fn root_of(&self, path: &Path) -> Option<PathBuf> {
        self.0.iter().find(|root| path.starts_with(root)).cloned()
    }
}
