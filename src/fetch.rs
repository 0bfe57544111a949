//! Page fetching.
//!
//! Retrieves target pages with a browser-like request profile and hands the
//! HTML to the extractor. Fetching never fails the caller: any transport or
//! status error is absorbed into a [`PageContent`] carrying the error text,
//! because generation must proceed even for unreachable pages.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::extract::{self, PageContent};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Request timeout for page fetches.
const FETCH_TIMEOUT_SECS: u64 = 10;

/// Maximum redirects followed per fetch.
const MAX_REDIRECTS: usize = 5;

/// Abstraction over page retrieval so generation can be exercised without
/// the network.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Retrieves and extracts a page. Never fails; errors are carried inside
    /// the returned content.
    async fn fetch(&self, url: &str) -> PageContent;
}

/// Fetches pages over HTTP with a browser-like request profile.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.5"),
        );
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(
            header::UPGRADE_INSECURE_REQUESTS,
            HeaderValue::from_static("1"),
        );
        headers.insert(
            header::CACHE_CONTROL,
            HeaderValue::from_static("max-age=0"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch raw HTML from a URL
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("HTTP {} for {}", status, url);
        }

        response
            .text()
            .await
            .context("Failed to read response body")
    }
}

#[async_trait]
impl ContentFetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> PageContent {
        let url = normalize_url(url);
        debug!(url = %url, "Fetching page");

        match self.fetch_html(&url).await {
            Ok(html) => extract::extract(&url, &html),
            Err(err) => {
                let message = format!("{:#}", err);
                warn!(url = %url, error = %message, "Page fetch failed");
                PageContent::unavailable(url, message)
            }
        }
    }
}

/// Normalize a URL by adding https:// if no scheme is present
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Host of the URL with one leading `www.` stripped.
///
/// Returns an empty string when the URL does not parse.
pub fn domain_of(url: &str) -> String {
    let normalized = normalize_url(url);
    match Url::parse(&normalized) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}
