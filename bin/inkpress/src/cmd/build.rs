//! Build command - generates the blog once

use std::fs;

use color_eyre::eyre::{Result, WrapErr, bail};
use inkpress_core::post::POST_DIR;
use inkpress_generator::BuildStats;

use super::Options;

/// Check the assets directory and create the output directories.
///
/// Runs once at startup, before the first build.
pub fn prepare(options: &Options) -> Result<()> {
    if let Some(assets) = options.assets.as_deref().filter(|dir| !dir.is_dir()) {
        bail!(
            "assets path {} doesn't exist or is not a directory",
            assets.display()
        );
    }

    let post_dir = options.output.join(POST_DIR);
    fs::create_dir_all(&post_dir)
        .wrap_err_with(|| format!("output path {} couldn't be created", post_dir.display()))?;

    Ok(())
}

/// Run the build command.
///
/// Prepares the output directory and runs one full build. Any build error is
/// returned to the caller, which exits non-zero.
pub fn run(options: &Options) -> Result<BuildStats> {
    tracing::info!(
        source = %options.source.display(),
        templates = %options.templates.display(),
        skip_drafts = options.build.skip_drafts,
        "Starting build"
    );

    prepare(options)?;

    options.builder().build().wrap_err("Build failed")
}
