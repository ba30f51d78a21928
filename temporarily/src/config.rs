//! Defaults applied when a call leaves an option unset.

use std::path::{Path, PathBuf};

use crate::file::Encoding;
use crate::template::Template;

pub const DEFAULT_NAME: &str = "temporarily-{WWWWDDDD}";
pub const DEFAULT_DIR_MODE: u32 = 0o777;
pub const DEFAULT_FILE_MODE: u32 = 0o666;

#[derive(Debug, Clone)]
pub struct Config {
    base_dir: PathBuf,
    name: String,
    dir_mode: u32,
    file_mode: u32,
    encoding: Encoding,
    template: Template,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: std::env::temp_dir(),
            name: DEFAULT_NAME.to_owned(),
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: DEFAULT_FILE_MODE,
            encoding: Encoding::default(),
            template: Template::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory new entries are placed in when a call gives no `dir`.
    pub fn base_dir<P: Into<PathBuf>>(mut self, base_dir: P) -> Self {
        self.base_dir = base_dir.into();

        self
    }

    /// Name pattern used when a call gives no `name`.
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();

        self
    }

    /// Mode for requested directories without one, and for every ancestor
    /// created on the way.
    pub fn dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;

        self
    }

    pub fn file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;

        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;

        self
    }

    pub fn template(mut self, template: Template) -> Self {
        self.template = template;

        self
    }

    pub fn get_base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_dir_mode(&self) -> u32 {
        self.dir_mode
    }

    pub fn get_file_mode(&self) -> u32 {
        self.file_mode
    }

    pub fn get_encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn get_template(&self) -> &Template {
        &self.template
    }
}
