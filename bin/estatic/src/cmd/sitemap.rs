//! Sitemap command - standalone sitemap generation stage

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use estatic_core::Config;
use estatic_generator::Builder;

/// Run the sitemap stage on its own.
///
/// Collection and the invariant guard run in full, so a sitemap can never
/// be written for a duplicate or empty project set.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!(?config_path, "Generating sitemap");

    let config = Config::load(config_path).wrap_err("Failed to load configuration")?;
    let count = Builder::new(config)
        .build_sitemap()
        .wrap_err("Sitemap generation failed")?;

    println!("  ✓ Sitemap written with {count} URL(s)");

    Ok(())
}
