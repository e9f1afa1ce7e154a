//! Config sources: interchangeable loaders producing a [`ConfigView`].
//!
//! A source owns only its locator state (path, inline text, bucket + key) and
//! the document format. Construction never performs I/O; every
//! [`load`](ConfigSource::load) call is one independent fetch-and-parse cycle
//! with nothing cached in between.

use config::{Config, File, FileFormat};

use crate::error::LoadError;
use crate::view::ConfigView;

pub mod file;
pub mod inline;
pub mod s3;

/// A strategy for obtaining and parsing raw configuration content.
pub trait ConfigSource {
    /// Fetch the source's content and parse it into a [`ConfigView`].
    fn load(&self) -> Result<ConfigView, LoadError>;
}

/// Shared parse step all sources converge on: raw text in the given format
/// becomes a queryable document.
pub(crate) fn parse_document(text: &str, format: FileFormat) -> Result<ConfigView, LoadError> {
    let doc = Config::builder()
        .add_source(File::from_str(text, format))
        .build()?;
    Ok(ConfigView::new(doc))
}
