//! Page and header fetches for content-based probes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::STRICT_TRANSPORT_SECURITY;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{ReconError, ReconResult};

/// Browser-like agent; some sites serve bots a different page
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// A fetched page
#[derive(Debug, Clone)]
pub struct Page {
    /// URL after redirects
    pub final_url: String,
    /// HTTP status
    pub status: u16,
    /// Decoded body
    pub body: String,
}

/// Response headers of interest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadInfo {
    /// `Strict-Transport-Security` present
    pub hsts: bool,
}

/// Fetches pages over HTTP(S)
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET the page; non-success statuses are errors
    async fn fetch(&self, url: &str) -> ReconResult<Page>;

    /// HEAD the URL without verifying its certificate
    async fn head(&self, url: &str) -> ReconResult<HeadInfo>;
}

/// reqwest-based fetcher
pub struct HttpFetcher {
    client: Client,
    lenient: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given timeout and User-Agent
    pub fn new(timeout: Duration, user_agent: &str) -> ReconResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .gzip(true)
            .build()?;
        let lenient = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { client, lenient })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> ReconResult<Page> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let final_url = response.url().to_string();
        debug!(status = status.as_u16(), %final_url, "page fetched");

        if !status.is_success() {
            return Err(ReconError::Http(format!("{url} returned {status}")));
        }

        let body = response.text().await?;
        Ok(Page {
            final_url,
            status: status.as_u16(),
            body,
        })
    }

    #[instrument(skip(self))]
    async fn head(&self, url: &str) -> ReconResult<HeadInfo> {
        let response = self.lenient.head(url).send().await?;
        Ok(HeadInfo {
            hsts: response.headers().contains_key(STRICT_TRANSPORT_SECURITY),
        })
    }
}
