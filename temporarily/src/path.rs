//! Destination paths for new entries.

use std::path::{Component, Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOptions {
    dir: Option<PathBuf>,
    name: Option<String>,
    ext: Option<String>,
}

impl PathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.dir = Some(dir.into());

        self
    }

    pub fn name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.name = Some(name.into());

        self
    }

    pub fn ext<S: Into<String>>(&mut self, ext: S) -> &mut Self {
        self.ext = Some(ext.into());

        self
    }

    /// Resolves the base directory and expands the name pattern. Never touches
    /// the filesystem.
    pub fn build(&self, config: &Config) -> Result<PathBuf> {
        let pattern = self.name.as_deref().unwrap_or_else(|| config.get_name());
        let mut basename = config.get_template().expand(pattern)?;

        if let Some(ext) = self.ext.as_deref() {
            let ext = ext.strip_prefix('.').unwrap_or(ext);
            if !ext.is_empty() {
                basename.push('.');
                basename.push_str(ext);
            }
        }

        let dir = self.dir.as_deref().unwrap_or_else(|| config.get_base_dir());
        let dirname = resolve(dir)?;

        Ok(normalize(&join_relative(dirname, &basename)))
    }
}

/// Makes `path` absolute against the current directory and folds away `.` and
/// `..` components lexically.
pub fn resolve<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(normalize(path));
    }

    let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;

    Ok(normalize(&cwd.join(path)))
}

/// Appends `name` below `base` even when it starts with a root or prefix.
fn join_relative(mut base: PathBuf, name: &str) -> PathBuf {
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            other => base.push(other.as_os_str()),
        }
    }

    base
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

#[cfg(all(test, unix))]
mod test {
    use super::*;

    #[test]
    fn resolve_folds_dots() {
        assert_eq!(resolve("/a/./b/../c").unwrap(), PathBuf::from("/a/c"));
        assert_eq!(resolve("/..").unwrap(), PathBuf::from("/"));
    }

    #[test]
    fn resolve_relative_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve("x/y").unwrap(), cwd.join("x").join("y"));
    }

    #[test]
    fn fixed_name_and_ext() {
        let config = Config::default().base_dir("/base");
        let path = PathOptions::new().name("fixed").ext("json").build(&config).unwrap();
        assert_eq!(path, PathBuf::from("/base/fixed.json"));

        let dotted = PathOptions::new().name("fixed").ext(".json").build(&config).unwrap();
        assert_eq!(dotted, path);
    }

    #[test]
    fn no_ext_means_no_dot() {
        let config = Config::default().base_dir("/base");
        let path = PathOptions::new().build(&config).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert_eq!(path.parent().unwrap(), Path::new("/base"));
        assert!(name.starts_with("temporarily-"));
        assert_eq!(name.len(), "temporarily-".len() + 8);
        assert!(!name.contains('.'));

        let empty = PathOptions::new().name("n").ext("").build(&config).unwrap();
        assert_eq!(empty, PathBuf::from("/base/n"));
    }

    #[test]
    fn nested_names_are_joined() {
        let config = Config::default().base_dir("/base");
        let path = PathOptions::new().name("1/2/{d}").build(&config).unwrap();
        assert_eq!(path.parent().unwrap(), Path::new("/base/1/2"));
    }

    #[test]
    fn rooted_names_stay_under_base_dir() {
        let config = Config::default().base_dir("/base");
        let path = PathOptions::new().name("/etc/passwd").build(&config).unwrap();
        assert_eq!(path, PathBuf::from("/base/etc/passwd"));

        let path = PathOptions::new().name("//x/{d}").ext("txt").build(&config).unwrap();
        assert_eq!(path.parent().unwrap(), Path::new("/base/x"));
    }

    #[test]
    fn unknown_placeholder_fails_before_anything_else() {
        let config = Config::default().base_dir("/does/not/matter");
        let err = PathOptions::new().name("test-{abc}").build(&config).unwrap_err();
        assert!(matches!(err, Error::UnknownPlaceholder { found: 'a', .. }));
    }
}
