//! libmarket - Marketplace Image Catalog Library
//!
//! libmarket queries the paginated marketplace catalog API and resolves the
//! identifiers needed to provision a server from a public image.
//!
//! An image is represented by several identifiers:
//!
//! - the marketplace image id (one per image family, e.g. Ubuntu Bionic)
//! - a version id (one per release of that image)
//! - a local image id (one per version, zone and architecture); this is
//!   the id to use when creating a server
//!
//! # Quick Start
//!
//! ```no_run
//! use libmarket::{Arch, Marketplace};
//! use libmarket::present::render;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let market = Marketplace::connect(libmarket::DEFAULT_BASE_URL)?;
//!
//!     for image in market.list_images(Arch::Arm64, "debian")? {
//!         print!("{}", render(&image, Arch::Arm64));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Marketplace`] - Main entry point for catalog queries
//! - [`MarketplaceBuilder`] - Builder for advanced configuration
//! - [`Image`], [`ImageVersion`], [`LocalImage`] - The catalog tree
//! - [`Arch`] - Server architecture
//! - [`NameFilter`] - Case-insensitive name matching

#![warn(clippy::all)]

/// Returns the libmarket crate version.
///
/// # Examples
///
/// ```
/// let version = libmarket::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// High-level public API (main entry point)
mod marketplace;
pub use marketplace::{Marketplace, MarketplaceBuilder};

// Re-export commonly used types for convenience
pub use client::{DEFAULT_BASE_URL, PageSource};
pub use config::Config;
pub use error::{MarketError, Result};
pub use filter::{NameFilter, Progress};
pub use model::{Arch, Image, ImageVersion, LocalImage, Page};

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod link;
pub mod model;
pub mod present;
