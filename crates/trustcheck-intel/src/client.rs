//! Shared HTTP plumbing for threat-intelligence clients.

use std::num::NonZeroU32;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{ClientConfig, RetryConfig};
use crate::error::{IntelError, IntelResult};

/// Rate-limited, retrying JSON transport for one source
pub(crate) struct IntelHttp {
    http: HttpClient,
    base_url: String,
    source: &'static str,
    limiter: DefaultDirectRateLimiter,
    retry: RetryConfig,
}

impl IntelHttp {
    pub(crate) fn new(
        source: &'static str,
        default_base_url: &str,
        config: ClientConfig,
    ) -> IntelResult<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| default_base_url.to_string())
            .trim_end_matches('/')
            .to_string();
        url::Url::parse(&base_url).map_err(|e| IntelError::InvalidUrl(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit.requests_per_second).unwrap_or(NonZeroU32::MIN),
        )
        .allow_burst(NonZeroU32::new(config.rate_limit.burst_size).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            http,
            base_url,
            source,
            limiter: RateLimiter::direct(quota),
            retry: config.retry,
        })
    }

    /// Absolute URL for an API path
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Underlying client for building requests
    pub(crate) const fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Send a request, retrying transient failures, and decode the JSON body
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> IntelResult<T> {
        let mut attempt = 0;
        loop {
            let this_try = request
                .try_clone()
                .ok_or_else(|| IntelError::Http("request body cannot be retried".into()))?;

            self.limiter.until_ready().await;
            match self.send_once(this_try).await {
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    let backoff = self.retry.backoff_for(attempt);
                    warn!(source = self.source, error = %e, ?backoff, "retrying threat lookup");
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    async fn send_once<T: DeserializeOwned>(&self, request: RequestBuilder) -> IntelResult<T> {
        let response = request.send().await?;
        let status = response.status();
        debug!(source = self.source, status = status.as_u16(), "threat lookup response");

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(IntelError::Json)
        } else {
            Err(Self::error_for(status.as_u16(), response).await)
        }
    }

    /// Convert an error response to an `IntelError`
    async fn error_for(status: u16, response: Response) -> IntelError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        let body = response.text().await.unwrap_or_default();

        // Both sources wrap messages as {"error": {"message": ...}} or {"error": "..."}
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                let err = v.get("error")?;
                err.get("message")
                    .and_then(|m| m.as_str())
                    .or_else(|| err.as_str())
                    .map(String::from)
            })
            .unwrap_or(body);

        match status {
            401 | 403 => IntelError::Unauthorized,
            404 => IntelError::NotFound { resource: message },
            429 => IntelError::RateLimited { retry_after },
            _ => IntelError::Api {
                code: status,
                message,
            },
        }
    }
}
