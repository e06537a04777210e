use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::SearchConfig;
use crate::error::{FeedError, Result};

pub mod document;

pub use document::{DocumentUploadRequest, Operation, SearchDocument};

/// Retry budget for one upload call. The hosting runtime owns any
/// retry of the whole batch beyond this.
pub const MAX_UPLOAD_ATTEMPTS: u32 = 6;

const UPLOAD_PATH: &str = "2013-01-01/documents/batch";
const BASE_BACKOFF_MS: u64 = 500;

/// Destination for an assembled document batch.
#[async_trait]
pub trait DocumentSink {
    /// Submits the batch in a single call and returns the raw response
    /// body on success.
    async fn upload(&self, batch: &[DocumentUploadRequest]) -> Result<String>;
}

#[derive(Error, Debug)]
#[error("failed to send upload request: {source}")]
struct ResponseError {
    source: reqwest::Error,
    should_retry: bool,
}

/// HTTP client for the search domain's document upload endpoint.
#[derive(Debug, Clone)]
pub struct SearchDomainClient {
    upload_url: Url,
    region: String,
    client: reqwest::Client,
    base_backoff_ms: u64,
}

impl SearchDomainClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .tcp_keepalive(Some(Duration::from_secs(300)))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| FeedError::Upload(format!("failed to build http client: {err}")))?;

        let upload_url = upload_url(&config.endpoint)?;
        debug!(
            region = %config.region,
            url = %upload_url,
            "configured search domain client"
        );

        Ok(Self {
            upload_url,
            region: config.region.clone(),
            client,
            base_backoff_ms: BASE_BACKOFF_MS,
        })
    }

    #[cfg(test)]
    fn with_base_backoff_ms(mut self, ms: u64) -> Self {
        self.base_backoff_ms = ms;
        self
    }

    async fn execute_upload(&self, payload: Vec<u8>) -> std::result::Result<String, ResponseError> {
        let response = self
            .client
            .post(self.upload_url.clone())
            .header("content-type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|err| ResponseError {
                source: err,
                should_retry: true,
            })?;

        let status = response.status();
        match response.error_for_status() {
            Ok(response) => response.text().await.map_err(|err| ResponseError {
                source: err,
                should_retry: true,
            }),
            Err(err) => Err(ResponseError {
                source: err,
                should_retry: is_status_retriable(status),
            }),
        }
    }

    fn calculate_backoff(&self, attempt: u32) -> u64 {
        // shift by max 16 bits to avoid overflow
        let exp_backoff = self.base_backoff_ms * (1 << attempt.min(16));

        // +/- 20%
        let jitter_factor = rand::rng().random_range(0.8..1.2);
        (exp_backoff as f64 * jitter_factor) as u64
    }
}

#[async_trait]
impl DocumentSink for SearchDomainClient {
    async fn upload(&self, batch: &[DocumentUploadRequest]) -> Result<String> {
        let payload = serde_json::to_vec(batch)
            .map_err(|err| FeedError::Upload(format!("failed to serialize batch: {err}")))?;
        debug!(
            batch_len = batch.len(),
            body = %String::from_utf8_lossy(&payload),
            "submitting document batch"
        );

        let mut attempt = 0;
        let mut last_error = None;

        while attempt < MAX_UPLOAD_ATTEMPTS {
            attempt += 1;
            match self.execute_upload(payload.clone()).await {
                Ok(response) => {
                    info!(
                        region = %self.region,
                        batch_len = batch.len(),
                        attempt,
                        "uploaded document batch"
                    );
                    return Ok(response);
                }
                Err(err) => {
                    let should_retry = err.should_retry;
                    warn!(
                        url = %self.upload_url,
                        attempt,
                        error = %err,
                        "upload attempt failed"
                    );
                    last_error = Some(err);
                    if !should_retry {
                        break;
                    }

                    if attempt < MAX_UPLOAD_ATTEMPTS {
                        let backoff = self.calculate_backoff(attempt);
                        sleep(Duration::from_millis(backoff)).await;
                    }
                }
            }
        }

        let err_msg = match last_error {
            Some(err) => err.to_string(),
            None => "unknown error".to_owned(),
        };

        Err(FeedError::Upload(format!(
            "gave up after {attempt} attempts: {err_msg}"
        )))
    }
}

fn upload_url(endpoint: &str) -> Result<Url> {
    let absolute = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        format!("https://{endpoint}")
    };

    let base = Url::parse(&absolute).map_err(|source| FeedError::Endpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;

    base.join(UPLOAD_PATH).map_err(|source| FeedError::Endpoint {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn is_status_retriable(status: reqwest::StatusCode) -> bool {
    if status.is_server_error() {
        return true;
    }

    match status.as_u16() {
        // Too Many Requests - retry after backoff
        429 => true,
        408 => true, // Request Timeout
        423 => true, // Locked - resource is temporarily locked
        425 => true, // Too Early

        // All other client errors are not retriable
        _ => false,
    }
}
