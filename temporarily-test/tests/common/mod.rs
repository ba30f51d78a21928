use std::path::Path;
use tempfile::TempDir;

pub fn create_base_dir() -> TempDir {
    tempfile::tempdir()
        .expect("Cannot create a temporary directory")
}

pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}
