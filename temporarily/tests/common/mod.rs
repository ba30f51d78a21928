use std::path::Path;
use tempfile::TempDir;
use temporarily::{Config, Tracker};

pub fn create_base_dir() -> TempDir {
    tempfile::tempdir().expect("Cannot create a temporary directory")
}

pub fn tracker_in(base: &Path) -> Tracker {
    Tracker::with_config(Config::new().base_dir(base))
}

pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
