//! Static in-memory config source.

use config::FileFormat;

use crate::error::LoadError;
use crate::source::{parse_document, ConfigSource};
use crate::view::ConfigView;

/// Holds a config document as an in-memory text blob.
///
/// Loading never touches external resources; the only possible failure is
/// malformed document syntax.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
    format: FileFormat,
}

impl StaticSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: FileFormat::Yaml,
        }
    }

    /// Override the document format.
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }
}

impl ConfigSource for StaticSource {
    fn load(&self) -> Result<ConfigView, LoadError> {
        parse_document(&self.text, self.format)
    }
}
