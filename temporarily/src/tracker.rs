//! Bookkeeping for everything a [`Tracker`] created, and its removal.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::Config;
use crate::entry::{rebase_path, Entry, EntryKind};
use crate::error::Result;
use crate::path::PathOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Record {
    path: PathBuf,
    kind: EntryKind,
}

/// Outcome of a cleanup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: usize,
    /// Entries that were already gone.
    pub missing: usize,
    /// Entries that could not be removed. They are logged and forgotten.
    pub failed: usize,
}

impl CleanupReport {
    fn merge(&mut self, other: CleanupReport) {
        self.removed += other.removed;
        self.missing += other.missing;
        self.failed += other.failed;
    }
}

/// Creates temporary entries and remembers them until [`Tracker::cleanup`].
#[derive(Debug)]
pub struct Tracker {
    config: Config,
    registry: Mutex<Vec<Record>>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            registry: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A fresh candidate path. Nothing is created or registered.
    pub fn filepath(&self, options: &PathOptions) -> Result<PathBuf> {
        options.build(&self.config)
    }

    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }

    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();
        self.registry().iter().any(|r| r.path == path)
    }

    /// Registered paths, in registration order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.registry().iter().map(|r| r.path.clone()).collect()
    }

    /// Removes every registered entry and empties the registry.
    pub fn cleanup(&self) -> CleanupReport {
        let records = std::mem::take(&mut *self.registry());

        let report = remove_all(records);
        if report != CleanupReport::default() {
            tracing::debug!(?report, "Cleaned up temporary entries");
        }

        report
    }

    /// Removes one entry ahead of [`Tracker::cleanup`]. For a directory this
    /// covers every registered entry at or below its path. Entries this
    /// tracker does not know about are left alone.
    pub fn remove(&self, entry: &Entry) -> CleanupReport {
        let root = entry.filepath();
        let records = {
            let mut registry = self.registry();
            let (taken, kept): (Vec<_>, Vec<_>) =
                registry.drain(..).partition(|r| match entry.kind() {
                    EntryKind::File => r.path == root,
                    EntryKind::Dir => r.path.starts_with(root),
                });
            *registry = kept;
            taken
        };

        remove_all(records)
    }

    pub(crate) fn register(&self, path: &Path, kind: EntryKind) {
        let mut registry = self.registry();
        if registry.iter().any(|r| r.path == path && r.kind == kind) {
            return;
        }
        registry.push(Record {
            path: path.to_path_buf(),
            kind,
        });
    }

    /// Points every record at or below `from` to the same place under `to`.
    pub(crate) fn rebase(&self, from: &Path, to: &Path) {
        for record in self.registry().iter_mut() {
            rebase_path(&mut record.path, from, to);
        }
    }

    fn registry(&self) -> MutexGuard<'_, Vec<Record>> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Files go first, then directories deepest-first, so every directory we made
/// is empty of our own entries by the time we get to it.
fn remove_all(records: Vec<Record>) -> CleanupReport {
    let (files, mut dirs): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|r| r.kind == EntryKind::File);

    dirs.reverse();
    dirs.sort_by_key(|r| std::cmp::Reverse(r.path.components().count()));

    let mut report = CleanupReport::default();
    for record in files.iter().chain(dirs.iter()) {
        report.merge(remove_one(record));
    }

    report
}

fn remove_one(record: &Record) -> CleanupReport {
    let result = match record.kind {
        EntryKind::File => std::fs::remove_file(&record.path),
        EntryKind::Dir => std::fs::remove_dir(&record.path),
    };

    match result {
        Ok(()) => {
            tracing::debug!(path = ?record.path, kind = ?record.kind, "Removed");
            CleanupReport {
                removed: 1,
                ..Default::default()
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => CleanupReport {
            missing: 1,
            ..Default::default()
        },
        Err(e) => {
            tracing::warn!(path = ?record.path, kind = ?record.kind, error = %e, "Could not remove");
            CleanupReport {
                failed: 1,
                ..Default::default()
            }
        }
    }
}
