//! Local file config source, with an ordered directory probe when no
//! explicit path is given.

use std::path::PathBuf;

use config::FileFormat;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::source::{parse_document, ConfigSource};
use crate::view::ConfigView;

/// Base file name searched for when probing (`config.yml`, `config.toml`, ...).
const BASE_NAME: &str = "config";

/// Per-user config directory under `$HOME`.
const HOME_SUBDIR: &str = ".confetch";

/// System-wide config directory.
const SYSTEM_DIR: &str = "/etc/confetch";

/// Reads a config file from disk.
///
/// With an explicit path, that exact file is read and a missing file is a
/// [`LoadError::FileRead`]. Without one, a fixed ordered list of directories
/// is probed for `config.<ext>` and the first match wins (no merging):
/// the current directory, `$HOME`, `$HOME/.confetch`, then `/etc/confetch`.
/// Exhausting all candidates is a [`LoadError::NoConfigFound`].
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Option<PathBuf>,
    format: FileFormat,
}

impl FileSource {
    /// Source reading exactly `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            format: FileFormat::Yaml,
        }
    }

    /// Source probing the candidate directories for a `config.*` file.
    pub fn probing() -> Self {
        Self {
            path: None,
            format: FileFormat::Yaml,
        }
    }

    /// Override the document format (and with it the probed extensions).
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    fn load_explicit(&self, path: &PathBuf) -> Result<ConfigView, LoadError> {
        debug!(path = %path.display(), "reading config file");
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::FileRead {
            path: path.clone(),
            source,
        })?;
        parse_document(&text, self.format)
    }

    fn probe(&self) -> Result<ConfigView, LoadError> {
        for dir in candidate_dirs() {
            for ext in format_extensions(self.format) {
                let candidate = dir.join(format!("{}.{}", BASE_NAME, ext));
                if candidate.is_file() {
                    debug!(path = %candidate.display(), "found config file");
                    return self.load_explicit(&candidate);
                }
            }
        }
        warn!(
            base = BASE_NAME,
            "no config file found in any candidate directory"
        );
        Err(LoadError::NoConfigFound(BASE_NAME.to_string()))
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::probing()
    }
}

impl ConfigSource for FileSource {
    fn load(&self) -> Result<ConfigView, LoadError> {
        match &self.path {
            Some(path) => self.load_explicit(path),
            None => self.probe(),
        }
    }
}

/// Probe order: current directory, user home, a per-user subdirectory,
/// then the system-wide directory.
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(".")];
    if let Ok(home) = std::env::var("HOME") {
        dirs.push(PathBuf::from(&home));
        dirs.push(PathBuf::from(home).join(HOME_SUBDIR));
    }
    dirs.push(PathBuf::from(SYSTEM_DIR));
    dirs
}

/// File extensions probed for a given document format.
fn format_extensions(format: FileFormat) -> &'static [&'static str] {
    match format {
        FileFormat::Yaml => &["yml", "yaml"],
        FileFormat::Toml => &["toml"],
        FileFormat::Json => &["json"],
        _ => &[],
    }
}
