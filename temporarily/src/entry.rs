//! Handles for the files and directories a [`Tracker`](crate::Tracker) created.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Dir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempFile {
    pub filepath: PathBuf,
    pub mode: u32,
    /// Bytes written at creation. Not refreshed afterwards.
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempDir {
    pub filepath: PathBuf,
    pub mode: u32,
    /// Entries composed under this directory, in the order they were given.
    pub children: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    File(TempFile),
    Dir(TempDir),
}

impl Entry {
    pub fn filepath(&self) -> &Path {
        match self {
            Entry::File(f) => &f.filepath,
            Entry::Dir(d) => &d.filepath,
        }
    }

    pub fn mode(&self) -> u32 {
        match self {
            Entry::File(f) => f.mode,
            Entry::Dir(d) => d.mode,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Entry::File(_) => EntryKind::File,
            Entry::Dir(_) => EntryKind::Dir,
        }
    }

    pub fn children(&self) -> &[Entry] {
        match self {
            Entry::File(_) => &[],
            Entry::Dir(d) => &d.children,
        }
    }

    pub fn as_file(&self) -> Option<&TempFile> {
        match self {
            Entry::File(f) => Some(f),
            Entry::Dir(_) => None,
        }
    }

    pub fn as_dir(&self) -> Option<&TempDir> {
        match self {
            Entry::File(_) => None,
            Entry::Dir(d) => Some(d),
        }
    }

    /// Rewrites this entry's path, and its descendants', after `from` was
    /// renamed to `to` on disk.
    pub(crate) fn rebase(&mut self, from: &Path, to: &Path) {
        match self {
            Entry::File(f) => rebase_path(&mut f.filepath, from, to),
            Entry::Dir(d) => {
                rebase_path(&mut d.filepath, from, to);
                for child in d.children.iter_mut() {
                    child.rebase(from, to);
                }
            }
        }
    }
}

impl From<TempFile> for Entry {
    fn from(f: TempFile) -> Self {
        Entry::File(f)
    }
}

impl From<TempDir> for Entry {
    fn from(d: TempDir) -> Self {
        Entry::Dir(d)
    }
}

pub(crate) fn rebase_path(path: &mut PathBuf, from: &Path, to: &Path) {
    if let Ok(rest) = path.strip_prefix(from) {
        *path = if rest.as_os_str().is_empty() {
            to.to_path_buf()
        } else {
            to.join(rest)
        };
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn file(path: &str) -> Entry {
        Entry::File(TempFile {
            filepath: path.into(),
            mode: 0o666,
            data: Vec::new(),
        })
    }

    #[test]
    fn rebase_moves_whole_subtree() {
        let mut entry = Entry::Dir(TempDir {
            filepath: "/tmp/a".into(),
            mode: 0o777,
            children: vec![
                file("/tmp/a/f"),
                Entry::Dir(TempDir {
                    filepath: "/tmp/a/b".into(),
                    mode: 0o777,
                    children: vec![file("/tmp/a/b/g")],
                }),
            ],
        });

        entry.rebase(Path::new("/tmp/a"), Path::new("/tmp/p/a"));

        assert_eq!(entry.filepath(), Path::new("/tmp/p/a"));
        assert_eq!(entry.children()[0].filepath(), Path::new("/tmp/p/a/f"));
        assert_eq!(entry.children()[1].filepath(), Path::new("/tmp/p/a/b"));
        assert_eq!(
            entry.children()[1].children()[0].filepath(),
            Path::new("/tmp/p/a/b/g")
        );
    }

    #[test]
    fn rebase_ignores_sibling_prefixes() {
        let mut path = PathBuf::from("/tmp/ab");
        rebase_path(&mut path, Path::new("/tmp/a"), Path::new("/x"));
        assert_eq!(path, PathBuf::from("/tmp/ab"));
    }
}
