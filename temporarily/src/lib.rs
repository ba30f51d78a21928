//! Uniquely named temporary files and directories, removed together by one
//! cleanup call.
//!
//! ```no_run
//! use temporarily::{DirOptions, FileOptions};
//!
//! # fn main() -> temporarily::Result<()> {
//! let dir = temporarily::dir(DirOptions::new().name("fixtures-{dddd}"))?;
//! let file = temporarily::file(FileOptions::new().dir(&dir.filepath).data("Hello World!"))?;
//! assert!(file.filepath.starts_with(&dir.filepath));
//!
//! temporarily::cleanup();
//! # Ok(())
//! # }
//! ```
//!
//! The free functions work on a process-wide [`Tracker`]. Tests and embedders
//! that want isolated bookkeeping can build their own.

mod macros;

pub mod config;
pub mod dir;
pub mod entry;
pub mod error;
pub mod exit;
pub mod file;
pub mod path;
pub mod template;
pub mod tracker;

use std::path::PathBuf;

use once_cell::sync::Lazy;

pub use crate::config::Config;
pub use crate::dir::{Child, DirOptions};
pub use crate::entry::{Entry, EntryKind, TempDir, TempFile};
pub use crate::error::{Error, Result};
pub use crate::file::{Encoding, FileOptions};
pub use crate::path::PathOptions;
pub use crate::template::{CharSource, Template};
pub use crate::tracker::{CleanupReport, Tracker};

static DEFAULT_TRACKER: Lazy<Tracker> = Lazy::new(Tracker::new);

/// The process-wide tracker behind the free functions.
pub fn tracker() -> &'static Tracker {
    &DEFAULT_TRACKER
}

pub fn filepath(options: &PathOptions) -> Result<PathBuf> {
    tracker().filepath(options)
}

pub fn dir(options: &DirOptions) -> Result<TempDir> {
    tracker().dir(options)
}

pub fn dir_with_children(options: &DirOptions, children: Vec<Child>) -> Result<TempDir> {
    tracker().dir_with_children(options, children)
}

pub fn file(options: &FileOptions) -> Result<TempFile> {
    tracker().file(options)
}

pub fn remove(entry: &Entry) -> CleanupReport {
    tracker().remove(entry)
}

pub fn cleanup() -> CleanupReport {
    tracker().cleanup()
}

/// Cleans the process-wide tracker up at exit.
pub fn install_exit_handler() {
    exit::install_exit_handler(tracker())
}
