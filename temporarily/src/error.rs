use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Expected template placeholder to be one of: {expected}. Received {found}")]
    UnknownPlaceholder { found: char, expected: String },

    #[error("Template placeholder {key} has an empty alphabet")]
    EmptyAlphabet { key: char },

    #[error("Could not resolve the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Could not check {}: {source}", path.display())]
    AccessCheckFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write file {}: {source}", path.display())]
    FileWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not move {} to {}: {source}", from.display(), to.display())]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The path the failed operation was working on, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Error::UnknownPlaceholder { .. } | Error::EmptyAlphabet { .. } | Error::CurrentDir(_) => None,
            Error::AccessCheckFailed { path, .. }
            | Error::DirectoryCreateFailed { path, .. }
            | Error::FileWriteFailed { path, .. } => Some(path),
            Error::MoveFailed { from, .. } => Some(from),
        }
    }
}
