//! Marketplace catalog data model.
//!
//! The catalog is a three-level tree: an [`Image`] has [`ImageVersion`]s,
//! and each version has one [`LocalImage`] per zone and architecture. The
//! local image id is the value needed to provision a server.

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(test)]
mod tests;

/// Server architecture accepted by the marketplace API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[default]
    #[serde(rename = "x86_64")]
    X86_64,
    #[serde(rename = "arm64")]
    Arm64,
    #[serde(rename = "arm")]
    Arm,
}

impl Arch {
    /// All recognized architectures, in the order they are listed to users.
    pub const ALL: [Arch; 3] = [Arch::X86_64, Arch::Arm64, Arch::Arm];

    /// Returns the wire name used by the API (`x86_64`, `arm64`, `arm`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Arm64 => "arm64",
            Arch::Arm => "arm",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = MarketError;

    /// Parses an architecture name. Matching is exact: `"ARM"` is rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use libmarket::Arch;
    ///
    /// let arch: Arch = "arm64".parse().unwrap();
    /// assert_eq!(arch, Arch::Arm64);
    /// assert!("mips".parse::<Arch>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        Arch::ALL
            .into_iter()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| {
                MarketError::invalid_argument(format!(
                    "unknown architecture '{}': only x86_64 (default), arm64 or arm are accepted",
                    s
                ))
            })
    }
}

/// A zone- and architecture-specific image identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalImage {
    pub id: String,
    /// Raw architecture string as sent by the API.
    pub arch: String,
    pub zone: String,
}

impl LocalImage {
    /// Returns true when this local image was built for exactly `arch`.
    pub fn matches(&self, arch: Arch) -> bool {
        self.arch == arch.as_str()
    }
}

/// A release snapshot of a marketplace image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVersion {
    pub id: String,
    #[serde(default)]
    pub local_images: Vec<LocalImage>,
}

/// A top-level marketplace catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub versions: Vec<ImageVersion>,
}

impl Image {
    /// Iterates over every local image of every version built for `arch`.
    pub fn local_images_for(&self, arch: Arch) -> impl Iterator<Item = &LocalImage> {
        self.versions
            .iter()
            .flat_map(|version| version.local_images.iter())
            .filter(move |local| local.matches(arch))
    }

    /// Checks the non-empty id invariant over the whole tree.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(MarketError::decode(format!(
                "image '{}' has an empty id",
                self.name
            )));
        }
        for version in &self.versions {
            if version.id.is_empty() {
                return Err(MarketError::decode(format!(
                    "image {} has a version with an empty id",
                    self.id
                )));
            }
            if version.local_images.iter().any(|local| local.id.is_empty()) {
                return Err(MarketError::decode(format!(
                    "version {} of image {} has a local image with an empty id",
                    version.id, self.id
                )));
            }
        }
        Ok(())
    }
}

/// Body of a `GET /images` response.
#[derive(Debug, Deserialize)]
pub(crate) struct ImagesResponse {
    pub images: Vec<Image>,
}

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Images in API order.
    pub images: Vec<Image>,
    /// Absolute URL of the next page, if the API advertised one.
    pub next_url: Option<String>,
}

impl Page {
    /// Returns true when this is the last page.
    pub fn is_last(&self) -> bool {
        self.next_url.is_none()
    }
}
