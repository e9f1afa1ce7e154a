//! Confetch: Typed Configuration Access
//!
//! A thin, typed facade over hierarchical configuration documents. Documents
//! are loaded from interchangeable sources (local file, static in-memory text,
//! S3 object) and queried by dotted key path with caller-supplied defaults.
//!
//! Parsing and dotted-key lookup are delegated to the `config` crate; this
//! library contributes source selection, value coercion, and the default
//! fallback policy: a key that is absent, or present but of the wrong shape,
//! yields the caller's default.

pub mod coerce;
pub mod error;
pub mod source;
pub mod view;

pub use config::FileFormat;
pub use error::LoadError;
pub use source::file::FileSource;
pub use source::inline::StaticSource;
pub use source::s3::S3Source;
pub use source::ConfigSource;
pub use view::ConfigView;
