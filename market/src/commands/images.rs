use crate::context::{AppContext, VerbosityLevel};
use crate::format;
use libmarket::present::{count_local_images, render_all};
use libmarket::{Image, Marketplace, Progress, Result};
use std::io::Write;
use tracing::info;

/// Build the marketplace client from the resolved context
fn connect(ctx: &AppContext) -> Result<Marketplace> {
    Marketplace::builder().with_config(&ctx.config).build()
}

/// Fetch every page and keep the images matching the name filter
pub fn list_images(ctx: &AppContext) -> Result<Vec<Image>> {
    let market = connect(ctx)?;
    let arch = ctx.arch();

    info!(api = market.base_url(), %arch, name = %ctx.name, "listing marketplace images");

    // Logs would interleave with the spinner line
    let spinner = if ctx.verbosity == VerbosityLevel::Normal {
        format::spinner("Fetching marketplace images...")
    } else {
        indicatif::ProgressBar::hidden()
    };

    let result = market.list_images_with_progress(arch, &ctx.name, |progress: &Progress| {
        spinner.set_message(format!(
            "Fetched {} page(s), {} matching image(s)",
            progress.pages, progress.matched
        ));
        info!(
            pages = progress.pages,
            seen = progress.seen,
            matched = progress.matched,
            "page fetched"
        );
    });

    spinner.finish_and_clear();
    result
}

/// Handle the image listing: print the identifier tree of every match.
///
/// Nothing is printed on stdout unless every page was fetched. Returns the
/// process exit code.
pub fn handle_images(ctx: &AppContext, out: &mut dyn Write) -> i32 {
    let images = match list_images(ctx) {
        Ok(images) => images,
        Err(e) => {
            format::error(ctx.color(), &format::error_chain(&e));
            return 1;
        }
    };

    let arch = ctx.arch();
    let local_images: usize = images.iter().map(|i| count_local_images(i, arch)).sum();
    info!(
        images = images.len(),
        local_images,
        %arch,
        "matched images"
    );

    if let Err(e) = out.write_all(render_all(&images, arch).as_bytes()) {
        format::error(ctx.color(), &format!("Failed to write output: {}", e));
        return 1;
    }

    0
}

#[cfg(test)]
#[path = "images_tests.rs"]
mod tests;
