//! S3 object config source.
//!
//! The object is downloaded in one synchronous GET; no streaming, no retries,
//! no timeout (callers wanting a deadline wrap the load themselves). The
//! request goes to the bucket's virtual-hosted S3 URL, or path-style against
//! an explicit endpoint for S3-compatible stores.

use config::FileFormat;
use tracing::debug;

use crate::error::LoadError;
use crate::source::{parse_document, ConfigSource};
use crate::view::ConfigView;

/// Region used when neither the caller nor the environment names one.
const DEFAULT_REGION: &str = "us-east-1";

/// Environment variable consulted for the region.
pub const ENV_REGION: &str = "AWS_REGION";

/// Environment variable naming the bucket for [`S3Source::from_env`].
pub const ENV_BUCKET: &str = "CONFETCH_S3_BUCKET";

/// Environment variable naming the object key for [`S3Source::from_env`].
pub const ENV_KEY: &str = "CONFETCH_S3_KEY";

/// Loads a config document from an object in an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3Source {
    bucket: String,
    key: String,
    region: String,
    endpoint: Option<String>,
    format: FileFormat,
}

impl S3Source {
    /// Source for `key` in `bucket`. Region resolution order: the explicit
    /// argument, the `AWS_REGION` environment variable, then a fixed default.
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        region: Option<String>,
    ) -> Self {
        let region = region
            .or_else(|| std::env::var(ENV_REGION).ok())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        Self {
            bucket: bucket.into(),
            key: key.into(),
            region,
            endpoint: None,
            format: FileFormat::Yaml,
        }
    }

    /// Source built entirely from `AWS_REGION`, `CONFETCH_S3_BUCKET` and
    /// `CONFETCH_S3_KEY`. Fails at construction when any of them is unset.
    pub fn from_env() -> Result<Self, LoadError> {
        let region = require_env(ENV_REGION)?;
        let bucket = require_env(ENV_BUCKET)?;
        let key = require_env(ENV_KEY)?;
        Ok(Self::new(bucket, key, Some(region)))
    }

    /// Send requests to `endpoint` (path-style) instead of the AWS
    /// virtual-hosted URL. Intended for S3-compatible stores and tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Override the document format.
    pub fn with_format(mut self, format: FileFormat) -> Self {
        self.format = format;
        self
    }

    fn object_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!(
                "{}/{}/{}",
                endpoint.trim_end_matches('/'),
                self.bucket,
                self.key
            ),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, self.key
            ),
        }
    }

    fn download(&self) -> Result<String, LoadError> {
        let url = self.object_url();
        debug!(%url, "downloading config object");

        let download_error = |source| LoadError::Download {
            bucket: self.bucket.clone(),
            key: self.key.clone(),
            source,
        };

        reqwest::blocking::get(&url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(download_error)
    }
}

impl ConfigSource for S3Source {
    fn load(&self) -> Result<ConfigView, LoadError> {
        let text = self.download()?;
        parse_document(&text, self.format)
    }
}

fn require_env(name: &'static str) -> Result<String, LoadError> {
    std::env::var(name).map_err(|_| LoadError::MissingEnv(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Serialize env-var manipulation across tests.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_source_env() {
        std::env::remove_var(ENV_REGION);
        std::env::remove_var(ENV_BUCKET);
        std::env::remove_var(ENV_KEY);
    }

    #[test]
    fn test_region_resolution_order() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_source_env();

        let explicit = S3Source::new("b", "k", Some("eu-central-1".to_string()));
        assert_eq!(explicit.region, "eu-central-1");

        std::env::set_var(ENV_REGION, "eu-west-1");
        let from_env = S3Source::new("b", "k", None);
        assert_eq!(from_env.region, "eu-west-1");

        // Explicit argument wins over the environment.
        let explicit = S3Source::new("b", "k", Some("eu-central-1".to_string()));
        assert_eq!(explicit.region, "eu-central-1");

        std::env::remove_var(ENV_REGION);
        let fallback = S3Source::new("b", "k", None);
        assert_eq!(fallback.region, DEFAULT_REGION);
    }

    #[test]
    fn test_from_env_requires_all_variables() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_source_env();

        assert!(matches!(
            S3Source::from_env(),
            Err(LoadError::MissingEnv(ENV_REGION))
        ));

        std::env::set_var(ENV_REGION, "eu-central-1");
        assert!(matches!(
            S3Source::from_env(),
            Err(LoadError::MissingEnv(ENV_BUCKET))
        ));

        std::env::set_var(ENV_BUCKET, "some-bucket");
        assert!(matches!(
            S3Source::from_env(),
            Err(LoadError::MissingEnv(ENV_KEY))
        ));

        std::env::set_var(ENV_KEY, "some/key.yml");
        let source = S3Source::from_env().unwrap();
        assert_eq!(source.bucket, "some-bucket");
        assert_eq!(source.key, "some/key.yml");
        assert_eq!(source.region, "eu-central-1");

        clear_source_env();
    }

    #[test]
    fn test_object_url() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_source_env();

        let source = S3Source::new("bucket", "path/config.yml", Some("eu-central-1".to_string()));
        assert_eq!(
            source.object_url(),
            "https://bucket.s3.eu-central-1.amazonaws.com/path/config.yml"
        );

        let source = source.with_endpoint("http://127.0.0.1:9000/");
        assert_eq!(
            source.object_url(),
            "http://127.0.0.1:9000/bucket/path/config.yml"
        );
    }

    #[test]
    fn test_load_from_mock_endpoint() {
        let mut server = mockito::Server::new();
        let object = server
            .mock("GET", "/test-bucket/app/config.yml")
            .with_status(200)
            .with_body("key2: value2\nnamespace1:\n  key1: value1\n")
            .create();

        let view = S3Source::new("test-bucket", "app/config.yml", Some("eu-central-1".into()))
            .with_endpoint(server.url())
            .load()
            .unwrap();

        object.assert();
        assert_eq!(view.get("key2", None), Some("value2".to_string()));
        assert_eq!(view.get("namespace1.key1", None), Some("value1".to_string()));
    }

    #[test]
    fn test_load_missing_object_fails() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/test-bucket/missing.yml")
            .with_status(404)
            .create();

        let result = S3Source::new("test-bucket", "missing.yml", Some("eu-central-1".into()))
            .with_endpoint(server.url())
            .load();
        assert!(matches!(result, Err(LoadError::Download { .. })));
    }

    #[test]
    fn test_load_malformed_object_fails() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/test-bucket/bad.yml")
            .with_status(200)
            .with_body("key: [unclosed")
            .create();

        let result = S3Source::new("test-bucket", "bad.yml", Some("eu-central-1".into()))
            .with_endpoint(server.url())
            .load();
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
