//! The network seam: one round trip to the highlighting service.
//!
//! [`HighlightService`] is the only thing the form controller knows about
//! the network. [`HttpHighlightService`] is the production implementation
//! over `reqwest`; tests drop in a fake that returns canned outcomes.
//!
//! ## Outcome mapping
//!
//! | What happened | Result |
//! |---------------|--------|
//! | no response (connect, DNS, timeout) | `Err(SubmitError::Transport)` |
//! | non-2xx status | `Err(SubmitError::Server { status })` |
//! | 2xx, body not JSON / no `file_url` | `Err(SubmitError::MalformedResponse)` |
//! | 2xx with `file_url` | `Ok(HighlightResponse)` |

use crate::config::ClientConfig;
use crate::error::{HighlightError, SubmitError};
use crate::file::SelectedFile;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Multipart field carrying the PDF bytes.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the requested minutes.
pub const READING_TIME_FIELD: &str = "reading_time";

/// Everything one upload sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRequest {
    pub file: SelectedFile,
    /// Forwarded verbatim; the service parses it.
    pub reading_time: String,
}

/// Success body of `POST /highlight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightResponse {
    /// Where the highlighted PDF can be fetched.
    pub file_url: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Performs the highlight round trip.
pub trait HighlightService {
    /// Send one upload and report how it went. Exactly one request per call.
    fn highlight(
        &self,
        request: &HighlightRequest,
    ) -> impl Future<Output = Result<HighlightResponse, SubmitError>> + Send;
}

/// [`HighlightService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpHighlightService {
    client: reqwest::Client,
    config: ClientConfig,
    highlight_url: Url,
}

impl HttpHighlightService {
    pub fn new(config: ClientConfig) -> Result<Self, HighlightError> {
        let highlight_url = config.highlight_url()?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| HighlightError::Internal(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            config,
            highlight_url,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Probe `GET /health`; the service is healthy when it answers `{"status": "ok"}`.
    pub async fn check_health(&self) -> Result<HealthStatus, HighlightError> {
        let url = self.config.health_url()?;
        let unhealthy = |reason: String| HighlightError::Unhealthy {
            url: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url.clone())
            .timeout(Duration::from_secs(self.config.health_timeout_secs))
            .send()
            .await
            .map_err(|e| unhealthy(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unhealthy(format!("HTTP {}", response.status())));
        }

        let health: HealthStatus = response
            .json()
            .await
            .map_err(|e| unhealthy(format!("unexpected body: {e}")))?;
        if health.status != "ok" {
            return Err(unhealthy(format!("status is '{}'", health.status)));
        }

        debug!("Health check passed: {}", url);
        Ok(health)
    }

    /// Fetch the highlighted PDF behind a result reference into `dest`.
    ///
    /// Returns the number of bytes written.
    pub async fn download_result(&self, file_url: &str, dest: &Path) -> Result<u64, HighlightError> {
        let failed = |reason: String| HighlightError::DownloadFailed {
            url: file_url.to_string(),
            reason,
        };

        let url = Url::parse(file_url).map_err(|e| failed(format!("invalid URL: {e}")))?;
        info!("Downloading highlighted PDF from: {}", url);

        let secs = self.config.download_timeout_secs;
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(secs))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    failed(format!("timed out after {secs}s"))
                } else {
                    failed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(failed(format!("HTTP {}", response.status())));
        }

        let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;

        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|source| HighlightError::OutputWriteFailed {
                path: dest.to_path_buf(),
                source,
            })?;

        info!("Saved {} bytes to {}", bytes.len(), dest.display());
        Ok(bytes.len() as u64)
    }
}

impl HighlightService for HttpHighlightService {
    async fn highlight(&self, request: &HighlightRequest) -> Result<HighlightResponse, SubmitError> {
        let part = Part::bytes(request.file.data().to_vec())
            .file_name(request.file.name().to_string())
            .mime_str(request.file.mime())
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        let form = Form::new()
            .part(FILE_FIELD, part)
            .text(READING_TIME_FIELD, request.reading_time.clone());

        info!(
            "POST {} ({}, {} bytes, reading_time={})",
            self.highlight_url,
            request.file.name(),
            request.file.size(),
            request.reading_time
        );

        let mut builder = self.client.post(self.highlight_url.clone()).multipart(form);
        if let Some(secs) = self.config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let response = builder.send().await.map_err(|e| {
            let cause = if e.is_timeout() {
                format!("Request timed out: {e}")
            } else {
                e.to_string()
            };
            warn!("Highlight request failed — {}", cause);
            SubmitError::Transport(cause)
        })?;

        let status = response.status();
        if !status.is_success() {
            // FastAPI puts the cause under "detail"; useful in logs only.
            if let Ok(body) = response.text().await {
                if let Some(detail) = error_detail(&body) {
                    debug!("Service detail for HTTP {}: {}", status, detail);
                }
            }
            warn!("Highlight service answered HTTP {}", status);
            return Err(SubmitError::Server {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;
        parse_response(&body)
    }
}

/// Parse a 2xx body into a [`HighlightResponse`].
pub fn parse_response(body: &[u8]) -> Result<HighlightResponse, SubmitError> {
    let parsed: HighlightResponse = serde_json::from_slice(body)
        .map_err(|e| SubmitError::MalformedResponse(e.to_string()))?;
    if parsed.file_url.trim().is_empty() {
        return Err(SubmitError::MalformedResponse("file_url is empty".into()));
    }
    Ok(parsed)
}

fn error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    Some(match parsed.detail {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}
