//! Client configuration.
//!
//! Everything the HTTP side needs (service location, timeouts) lives in
//! [`ClientConfig`], built via [`ClientConfigBuilder`]. The endpoint is never
//! hard-coded in the request path: tests point the client at a local mock
//! server by setting `base_url`.

use crate::error::HighlightError;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Where a locally run highlighting service listens by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Path of the upload endpoint, relative to the base URL.
pub const HIGHLIGHT_PATH: &str = "highlight";

/// Path of the liveness endpoint, relative to the base URL.
pub const HEALTH_PATH: &str = "health";

/// Configuration for talking to the highlighting service.
///
/// # Example
/// ```rust
/// use pdf_highlighter::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("http://localhost:9000")
///     .request_timeout_secs(300)
///     .build()
///     .unwrap();
/// assert_eq!(config.highlight_url().unwrap().as_str(), "http://localhost:9000/highlight");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the highlighting service. Default: [`DEFAULT_BASE_URL`].
    pub base_url: String,

    /// Timeout for the highlight round trip in seconds. Default: None.
    ///
    /// Highlighting runs a model over the whole document, so the request is
    /// bounded only by the transport unless this is set.
    pub request_timeout_secs: Option<u64>,

    /// Timeout for downloading the highlighted PDF in seconds. Default: 120.
    pub download_timeout_secs: u64,

    /// Timeout for the health probe in seconds. Default: 5.
    pub health_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            download_timeout_secs: 120,
            health_timeout_secs: 5,
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full URL of `POST /highlight`.
    pub fn highlight_url(&self) -> Result<Url, HighlightError> {
        self.join(HIGHLIGHT_PATH)
    }

    /// Full URL of `GET /health`.
    pub fn health_url(&self) -> Result<Url, HighlightError> {
        self.join(HEALTH_PATH)
    }

    fn join(&self, path: &str) -> Result<Url, HighlightError> {
        let mut base = parse_base_url(&self.base_url)?;
        // Url::join drops the last segment unless the base ends with '/'.
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path)
            .map_err(|e| HighlightError::InvalidConfig(format!("cannot join '{path}': {e}")))
    }
}

fn parse_base_url(raw: &str) -> Result<Url, HighlightError> {
    let url = Url::parse(raw)
        .map_err(|e| HighlightError::InvalidConfig(format!("base URL '{raw}' is invalid: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(HighlightError::InvalidConfig(format!(
            "base URL must be http or https, got '{other}'"
        ))),
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = Some(secs);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn health_timeout_secs(mut self, secs: u64) -> Self {
        self.config.health_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, HighlightError> {
        let c = &self.config;
        parse_base_url(&c.base_url)?;
        if c.request_timeout_secs == Some(0) {
            return Err(HighlightError::InvalidConfig(
                "Request timeout must be ≥ 1 second".into(),
            ));
        }
        if c.download_timeout_secs == 0 {
            return Err(HighlightError::InvalidConfig(
                "Download timeout must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(
            config.highlight_url().unwrap().as_str(),
            "http://127.0.0.1:8000/highlight"
        );
        assert_eq!(
            config.health_url().unwrap().as_str(),
            "http://127.0.0.1:8000/health"
        );
        assert_eq!(config.request_timeout_secs, None);
    }

    #[test]
    fn base_url_with_path_prefix_is_kept() {
        let config = ClientConfig::builder()
            .base_url("https://example.com/api")
            .build()
            .unwrap();
        assert_eq!(
            config.highlight_url().unwrap().as_str(),
            "https://example.com/api/highlight"
        );

        let trailing = ClientConfig::builder()
            .base_url("https://example.com/api/")
            .build()
            .unwrap();
        assert_eq!(
            trailing.highlight_url().unwrap().as_str(),
            "https://example.com/api/highlight"
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::builder()
            .base_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, HighlightError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(ClientConfig::builder().base_url("not a url").build().is_err());
    }

    #[test]
    fn rejects_zero_request_timeout() {
        assert!(ClientConfig::builder()
            .request_timeout_secs(0)
            .build()
            .is_err());
    }
}
