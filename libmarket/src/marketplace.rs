//! High-level API for the marketplace catalog.
//!
//! This module provides the recommended entry point: connect to the
//! catalog, list the images matching a name, and render their identifiers.
//!
//! # Examples
//!
//! ```no_run
//! use libmarket::{Arch, Marketplace};
//! use libmarket::present::render_all;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let market = Marketplace::connect(libmarket::DEFAULT_BASE_URL)?;
//!
//!     let images = market.list_images(Arch::X86_64, "ubuntu")?;
//!     print!("{}", render_all(&images, Arch::X86_64));
//!
//!     Ok(())
//! }
//! ```

use crate::client::{Client, ClientConfig, DEFAULT_BASE_URL};
use crate::config::Config;
use crate::error::Result;
use crate::filter::{NameFilter, Progress, collect_images_with_progress};
use crate::model::{Arch, Image};

/// High-level interface to the marketplace catalog.
///
/// `Marketplace` wires the HTTP client, the pagination loop and the name
/// filter together.
pub struct Marketplace {
    client: Client,
}

impl Marketplace {
    /// Connects to a catalog with default settings.
    ///
    /// No request is made until images are listed.
    pub fn connect(base_url: &str) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Creates a builder for advanced configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmarket::Marketplace;
    ///
    /// let market = Marketplace::builder()
    ///     .base_url("http://localhost:8080")
    ///     .timeout(10)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(market.base_url(), "http://localhost:8080");
    /// ```
    pub fn builder() -> MarketplaceBuilder {
        MarketplaceBuilder::new()
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Lists current images for `arch` whose name contains `name`, ignoring case.
    ///
    /// An empty `name` lists every image. Images keep API order.
    pub fn list_images(&self, arch: Arch, name: &str) -> Result<Vec<Image>> {
        self.list_images_with_progress(arch, name, |_| {})
    }

    /// Same as [`Marketplace::list_images`], calling `on_page` after each page.
    pub fn list_images_with_progress<F>(
        &self,
        arch: Arch,
        name: &str,
        on_page: F,
    ) -> Result<Vec<Image>>
    where
        F: FnMut(&Progress),
    {
        collect_images_with_progress(&self.client, arch, &NameFilter::new(name), on_page)
    }
}

/// Builder for [`Marketplace`].
#[derive(Debug, Clone)]
pub struct MarketplaceBuilder {
    pub(crate) base_url: String,
    pub(crate) client_config: ClientConfig,
}

impl Default for MarketplaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketplaceBuilder {
    /// Creates a builder pointing at [`DEFAULT_BASE_URL`] with no timeout.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_config: ClientConfig::default(),
        }
    }

    /// Sets the catalog base URL.
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.client_config = self.client_config.with_timeout(seconds);
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.client_config = self.client_config.with_user_agent(user_agent);
        self
    }

    /// Applies the `api` section of a loaded configuration.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.base_url = config.api.url.clone();
        self.client_config.timeout_seconds = config.api.timeout;
        self
    }

    /// Builds the marketplace client.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error if the base URL is empty or
    /// unparseable.
    pub fn build(self) -> Result<Marketplace> {
        let client = Client::with_config(&self.base_url, self.client_config)?;
        Ok(Marketplace { client })
    }
}

#[cfg(test)]
#[path = "marketplace_tests.rs"]
mod tests;
