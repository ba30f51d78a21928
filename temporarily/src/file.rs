use std::fs;
use std::io::{self, Write};
use std::path::Path;
#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::entry::{EntryKind, TempFile};
use crate::error::{Error, Result};
use crate::path::PathOptions;
use crate::tracker::Tracker;

/// How text content is turned into bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    /// One byte per char; anything past U+00FF keeps only its low byte.
    Latin1,
}

impl Encoding {
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Encoding::Latin1 => text.chars().map(|c| c as u32 as u8).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Bytes(Vec<u8>),
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOptions {
    path: PathOptions,
    mode: Option<u32>,
    content: Content,
    encoding: Option<Encoding>,
}

impl FileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    crate::impl_path_options!();

    /// Text to write, encoded with [`FileOptions::encoding`].
    pub fn data<S: Into<String>>(&mut self, data: S) -> &mut Self {
        self.content = Content::Text(data.into());

        self
    }

    /// Raw bytes to write as they are.
    pub fn bytes<B: Into<Vec<u8>>>(&mut self, bytes: B) -> &mut Self {
        self.content = Content::Bytes(bytes.into());

        self
    }

    pub fn encoding(&mut self, encoding: Encoding) -> &mut Self {
        self.encoding = Some(encoding);

        self
    }
}

impl Tracker {
    /// Writes a new file at the path built from `options`, creating missing
    /// ancestors first. Whatever was at that path is overwritten.
    pub fn file(&self, options: &FileOptions) -> Result<TempFile> {
        let filepath = self.filepath(&options.path)?;
        let mode = options.mode.unwrap_or_else(|| self.config().get_file_mode());
        let data = match &options.content {
            Content::Text(text) => options
                .encoding
                .unwrap_or_else(|| self.config().get_encoding())
                .encode(text),
            Content::Bytes(bytes) => bytes.clone(),
        };

        if let Some(parent) = filepath.parent() {
            self.ensure_dir(parent, self.config().get_dir_mode())?;
        }

        write(&filepath, &data, mode).map_err(|source| Error::FileWriteFailed {
            path: filepath.clone(),
            source,
        })?;
        self.register(&filepath, EntryKind::File);
        tracing::debug!(path = ?filepath, mode, len = data.len(), "Created file");

        Ok(TempFile {
            filepath,
            mode,
            data,
        })
    }
}

fn write(path: &Path, data: &[u8], mode: u32) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(mode);
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options.open(path)?;
    file.write_all(data)
}
