//! Text rendering of image identifier trees.
//!
//! ```text
//! Image 8f3a... — Ubuntu Bionic
//!   Version identifier: 2d7c...
//!     Image identifier for x86_64 servers in fr-par-1: 61b9...
//! ```

use crate::model::{Arch, Image};


/// Renders one image block.
///
/// Every version header is printed; local images are printed only when
/// their architecture is exactly `arch`.
///
/// # Examples
///
/// ```
/// use libmarket::{Arch, Image};
/// use libmarket::present::render;
///
/// let image = Image {
///     id: "im2".to_string(),
///     name: "Debian".to_string(),
///     versions: vec![],
/// };
/// assert_eq!(render(&image, Arch::X86_64), "Image im2 — Debian\n");
/// ```
pub fn render(image: &Image, arch: Arch) -> String {
    let mut out = String::new();

    out.push_str(&format!("Image {} — {}\n", image.id, image.name));
    for version in &image.versions {
        out.push_str(&format!("  Version identifier: {}\n", version.id));
        for local in version.local_images.iter().filter(|l| l.matches(arch)) {
            out.push_str(&format!(
                "    Image identifier for {} servers in {}: {}\n",
                local.arch, local.zone, local.id
            ));
        }
    }

    out
}

/// Renders every image block, in order.
pub fn render_all(images: &[Image], arch: Arch) -> String {
    images.iter().map(|image| render(image, arch)).collect()
}

/// Number of local image lines [`render`] prints for `image`.
pub fn count_local_images(image: &Image, arch: Arch) -> usize {
    image.local_images_for(arch).count()
}
