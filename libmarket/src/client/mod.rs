//! Blocking HTTP client for the marketplace catalog API.
//!
//! This module provides a thin client built on reqwest's blocking API. It
//! fetches one page of images at a time and follows the `rel="next"` entry
//! of the `Link` response header until the last page.

use crate::error::{MarketError, Result};
use crate::link;
use crate::model::{Arch, ImagesResponse, Page};
use reqwest::blocking::{Client as ReqwestClient, Response};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, LINK};
use std::iter::FusedIterator;
use std::time::Duration;
use tracing::debug;
use url::Url;


/// Public marketplace catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-marketplace.scaleway.com";

/// A source of catalog pages.
///
/// [`Client`] fetches pages over HTTP; the aggregator only depends on this
/// trait so it can be driven by any page source.
pub trait PageSource {
    /// URL of the first page of current images for `arch`.
    fn first_page_url(&self, arch: Arch) -> String;

    /// Fetches and decodes a single page.
    fn fetch_page(&self, url: &str) -> Result<Page>;
}

/// Configuration for the HTTP client.
///
/// # Examples
///
/// ```
/// use libmarket::client::ClientConfig;
///
/// let config = ClientConfig::new().with_timeout(60);
/// assert_eq!(config.timeout_seconds, Some(60));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: none, `0` also means none)
    pub timeout_seconds: Option<u64>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: format!("market/{}", crate::version()),
        }
    }
}

impl ClientConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Sets the User-Agent header.
    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP client for marketplace catalog operations.
#[derive(Debug, Clone)]
pub struct Client {
    /// The underlying HTTP client
    http_client: ReqwestClient,
    /// Base API URL (e.g., "https://api-marketplace.scaleway.com")
    base_url: String,
    /// Timeout used in error messages
    timeout_seconds: Option<u64>,
}

impl Client {
    /// Creates a new client for the specified base URL with default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmarket::client::Client;
    ///
    /// let client = Client::new("https://api-marketplace.scaleway.com/").unwrap();
    /// assert_eq!(client.base_url(), "https://api-marketplace.scaleway.com");
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Creates a new client for the specified base URL with custom configuration.
    pub fn with_config(base_url: &str, config: ClientConfig) -> Result<Self> {
        let base_url = Self::normalize_url(base_url)?;
        let timeout_seconds = config.timeout_seconds.filter(|seconds| *seconds > 0);

        let http_client = ReqwestClient::builder()
            .timeout(timeout_seconds.map(Duration::from_secs))
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| MarketError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            http_client,
            base_url,
            timeout_seconds,
        })
    }

    /// Normalizes a base URL: trims it, defaults the scheme to https and
    /// removes trailing slashes.
    fn normalize_url(url: &str) -> Result<String> {
        let url = url.trim();

        if url.is_empty() {
            return Err(MarketError::invalid_argument("API URL cannot be empty"));
        }

        let url = if !url.starts_with("http://") && !url.starts_with("https://") {
            format!("https://{}", url)
        } else {
            url.to_string()
        };

        let url = url.trim_end_matches('/');

        Url::parse(url).map_err(|e| {
            MarketError::invalid_argument(format!("invalid API URL '{}': {}", url, e))
        })?;

        Ok(url.to_string())
    }

    /// Returns the base API URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Iterates over every catalog page for `arch`, in API order.
    pub fn pages(&self, arch: Arch) -> Pages<'_, Self> {
        pages(self, arch)
    }

    /// Resolves a `Link` target against the URL of the page that advertised it.
    ///
    /// Relative targets (`/images?page=2`) keep the scheme and host of the
    /// current page; absolute targets are returned unchanged.
    fn resolve_next_url(current: &str, target: &str) -> Result<String> {
        Url::parse(current)
            .and_then(|base| base.join(target))
            .map(String::from)
            .map_err(|e| {
                MarketError::decode_with_source(
                    format!("Invalid next page link '{}' from {}", target, current),
                    e,
                )
            })
    }

    /// Extracts the `rel="next"` target from every `Link` header of a response.
    fn extract_next_link(headers: &reqwest::header::HeaderMap) -> Option<String> {
        let values: Vec<&str> = headers
            .get_all(LINK)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();

        if values.is_empty() {
            return None;
        }

        link::next_link(&values.join(", "))
    }

    /// Decodes a page body and checks the non-empty id invariant.
    fn decode_images(body: &str, url: &str) -> Result<ImagesResponse> {
        let response: ImagesResponse = serde_json::from_str(body).map_err(|e| {
            MarketError::decode_with_source(format!("Failed to parse images page from {}", url), e)
        })?;

        for image in &response.images {
            image.validate()?;
        }

        Ok(response)
    }

    /// Translates a reqwest error into a MarketError.
    fn translate_reqwest_error(&self, error: reqwest::Error, url: &str) -> MarketError {
        if error.is_timeout() {
            let after = self
                .timeout_seconds
                .map(|s| format!(" after {} seconds", s))
                .unwrap_or_default();
            MarketError::network_with_source(format!("Request to {} timed out{}", url, after), error)
        } else if error.is_connect() {
            MarketError::network_with_source(format!("Failed to connect to {}", url), error)
        } else if error.is_request() {
            MarketError::network_with_source(format!("Failed to send request to {}", url), error)
        } else {
            MarketError::network_with_source(
                format!("Network error communicating with {}", url),
                error,
            )
        }
    }

    /// Checks the HTTP response status and translates errors to MarketError.
    fn check_response_status(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_body = response
            .text()
            .unwrap_or_else(|_| String::from("(unable to read response body)"));

        let message = match status {
            StatusCode::NOT_FOUND => format!("catalog endpoint not found: {}", error_body),
            StatusCode::TOO_MANY_REQUESTS => format!("rate limit exceeded: {}", error_body),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT => format!("server error: {}", error_body),
            _ => error_body,
        };

        Err(MarketError::status(status.as_u16(), url, message))
    }
}

impl PageSource for Client {
    fn first_page_url(&self, arch: Arch) -> String {
        format!("{}/images?only_current=true&arch={}", self.base_url, arch)
    }

    /// Fetches one page of images.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API is unreachable or the body cannot be read (`Network`)
    /// - The API answers with a non-success status (`Status`)
    /// - The body is not a valid images page (`Decode`)
    fn fetch_page(&self, url: &str) -> Result<Page> {
        debug!(url, "fetching catalog page");

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| self.translate_reqwest_error(e, url))?;

        // Read the Link header before the body consumes the response
        let next_link = Self::extract_next_link(response.headers());

        let response = Self::check_response_status(response)?;

        let body = response.text().map_err(|e| {
            MarketError::network_with_source(format!("Failed to read response from {}", url), e)
        })?;

        let images = Self::decode_images(&body, url)?.images;

        let next_url = next_link
            .map(|target| Self::resolve_next_url(url, &target))
            .transpose()?;

        let page = Page { images, next_url };
        debug!(
            url,
            images = page.images.len(),
            last = page.is_last(),
            "decoded catalog page"
        );

        Ok(page)
    }
}

/// Iterator over catalog pages, following next links.
///
/// Yields pages in API order. After the last page, or after the first
/// error, it yields nothing more.
pub struct Pages<'a, S: PageSource + ?Sized> {
    source: &'a S,
    next_url: Option<String>,
}

impl<S: PageSource + ?Sized> Iterator for Pages<'_, S> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = self.next_url.take()?;

        match self.source.fetch_page(&url) {
            Ok(page) => {
                self.next_url = page.next_url.clone();
                Some(Ok(page))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl<S: PageSource + ?Sized> FusedIterator for Pages<'_, S> {}

/// Iterates over every page of current images for `arch` from `source`.
pub fn pages<S: PageSource + ?Sized>(source: &S, arch: Arch) -> Pages<'_, S> {
    Pages {
        source,
        next_url: Some(source.first_page_url(arch)),
    }
}
