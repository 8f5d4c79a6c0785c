//! Name filtering and page aggregation.
//!
//! Images are matched on their display name with a case-insensitive
//! substring search and accumulated across pages in API order.

use crate::client::{PageSource, pages};
use crate::error::Result;
use crate::model::{Arch, Image};
use tracing::{debug, trace};


/// Case-insensitive substring matcher on image names.
///
/// An empty pattern matches every name.
///
/// # Examples
///
/// ```
/// use libmarket::NameFilter;
///
/// let filter = NameFilter::new("bionic");
/// assert!(filter.matches("Ubuntu Bionic"));
/// assert!(!filter.matches("Debian Buster"));
/// assert!(NameFilter::new("").matches("anything"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameFilter {
    needle: String,
}

impl NameFilter {
    /// Creates a filter for `pattern`.
    pub fn new(pattern: &str) -> Self {
        Self {
            needle: pattern.to_lowercase(),
        }
    }

    /// Returns true when the filter accepts every name.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns true when `name` contains the pattern, ignoring case.
    pub fn matches(&self, name: &str) -> bool {
        self.is_empty() || name.to_lowercase().contains(&self.needle)
    }
}

/// Progress snapshot reported after each page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Pages fetched so far
    pub pages: usize,
    /// Images seen so far, matching or not
    pub seen: usize,
    /// Images kept so far
    pub matched: usize,
}

/// Collects every image whose name matches `filter`, across all pages.
///
/// `arch` is only forwarded to the API query; local images are not
/// filtered here. The result keeps API order and is not deduplicated.
///
/// # Errors
///
/// Returns the first error raised while fetching or decoding a page; no
/// partial result is returned.
pub fn collect_images<S: PageSource + ?Sized>(
    source: &S,
    arch: Arch,
    filter: &NameFilter,
) -> Result<Vec<Image>> {
    collect_images_with_progress(source, arch, filter, |_| {})
}

/// Same as [`collect_images`], calling `on_page` after every page.
pub fn collect_images_with_progress<S, F>(
    source: &S,
    arch: Arch,
    filter: &NameFilter,
    mut on_page: F,
) -> Result<Vec<Image>>
where
    S: PageSource + ?Sized,
    F: FnMut(&Progress),
{
    let mut images = Vec::new();
    let mut progress = Progress::default();

    for page in pages(source, arch) {
        let page = page?;
        progress.pages += 1;
        progress.seen += page.images.len();

        for image in page.images {
            if filter.matches(&image.name) {
                images.push(image);
            } else {
                trace!(id = %image.id, name = %image.name, "image filtered out by name");
            }
        }

        progress.matched = images.len();
        on_page(&progress);
    }

    debug!(
        pages = progress.pages,
        seen = progress.seen,
        matched = progress.matched,
        "collected catalog images"
    );

    Ok(images)
}
