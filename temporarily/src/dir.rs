use std::fs;
use std::io;
use std::path::Path;
#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;

use crate::entry::{Entry, EntryKind, TempDir, TempFile};
use crate::error::{Error, Result};
use crate::file::FileOptions;
use crate::path::PathOptions;
use crate::tracker::Tracker;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirOptions {
    path: PathOptions,
    mode: Option<u32>,
}

impl DirOptions {
    pub fn new() -> Self {
        Self::default()
    }

    crate::impl_path_options!();
}

/// Something to place inside a directory made by [`Tracker::dir_with_children`].
#[derive(Debug, Clone)]
pub enum Child {
    /// An entry created earlier. It is moved on disk into the new directory.
    Entry(Entry),
    /// A file to create directly inside the new directory.
    File(FileOptions),
    /// A directory to create directly inside the new directory, with its own children.
    Dir(DirOptions, Vec<Child>),
}

impl Child {
    pub fn file(options: &FileOptions) -> Self {
        Child::File(options.clone())
    }

    pub fn dir(options: &DirOptions, children: Vec<Child>) -> Self {
        Child::Dir(options.clone(), children)
    }
}

impl From<Entry> for Child {
    fn from(entry: Entry) -> Self {
        Child::Entry(entry)
    }
}

impl From<TempFile> for Child {
    fn from(f: TempFile) -> Self {
        Child::Entry(Entry::File(f))
    }
}

impl From<TempDir> for Child {
    fn from(d: TempDir) -> Self {
        Child::Entry(Entry::Dir(d))
    }
}

impl Tracker {
    /// Makes sure a directory exists at the path built from `options`.
    ///
    /// Missing ancestors are created with the configured directory mode and
    /// registered. A directory that already exists is returned as is and is
    /// not registered.
    pub fn dir(&self, options: &DirOptions) -> Result<TempDir> {
        let filepath = self.filepath(&options.path)?;
        let mode = options.mode.unwrap_or_else(|| self.config().get_dir_mode());

        self.ensure_dir(&filepath, mode)?;

        Ok(TempDir {
            filepath,
            mode,
            children: Vec::new(),
        })
    }

    /// Like [`Tracker::dir`], then places `children` inside the directory in order.
    pub fn dir_with_children(&self, options: &DirOptions, children: Vec<Child>) -> Result<TempDir> {
        let mut dir = self.dir(options)?;

        for child in children {
            let entry = self.compose(&dir.filepath, child)?;
            dir.children.push(entry);
        }

        Ok(dir)
    }

    fn compose(&self, parent: &Path, child: Child) -> Result<Entry> {
        match child {
            Child::Entry(entry) => self.relocate(entry, parent),
            Child::File(mut options) => {
                options.dir(parent);
                self.file(&options).map(Entry::File)
            }
            Child::Dir(mut options, children) => {
                options.dir(parent);
                self.dir_with_children(&options, children).map(Entry::Dir)
            }
        }
    }

    /// One rename at the top of the subtree. Descendant paths, in the entry and
    /// in the registry, are rewritten to match.
    fn relocate(&self, mut entry: Entry, parent: &Path) -> Result<Entry> {
        let from = entry.filepath().to_path_buf();
        let to = match from.file_name() {
            Some(name) => parent.join(name),
            None => {
                return Err(Error::MoveFailed {
                    from: from.clone(),
                    to: parent.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, "entry has no file name"),
                });
            }
        };

        if from == to {
            return Ok(entry);
        }

        fs::rename(&from, &to).map_err(|source| Error::MoveFailed {
            from: from.clone(),
            to: to.clone(),
            source,
        })?;
        tracing::debug!(from = ?from, to = ?to, "Moved");

        self.rebase(&from, &to);
        entry.rebase(&from, &to);

        Ok(entry)
    }

    /// Returns whether the directory had to be created.
    pub(crate) fn ensure_dir(&self, path: &Path, mode: u32) -> Result<bool> {
        match fs::metadata(path) {
            Ok(_) => return Ok(false),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(Error::AccessCheckFailed {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }

        if let Some(parent) = path.parent() {
            self.ensure_dir(parent, self.config().get_dir_mode())?;
        }

        match create_dir(path, mode) {
            Ok(()) => {}
            // Another caller made it between our check and our mkdir. It is theirs.
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {
                return Ok(false);
            }
            Err(source) => {
                return Err(Error::DirectoryCreateFailed {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
        self.register(path, EntryKind::Dir);
        tracing::debug!(path = ?path, mode, "Created directory");

        Ok(true)
    }
}

fn create_dir(path: &Path, mode: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    builder.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path)
}
