//! Inject command - post-emit link injection stage

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use estatic_core::Config;
use estatic_generator::Builder;

/// Run the link injection pass over the emitted output directory.
///
/// Safe to re-run: pages whose marker was already consumed are untouched.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!(?config_path, "Injecting related links");

    let config = Config::load(config_path).wrap_err("Failed to load configuration")?;
    let stats = Builder::new(config)
        .inject_links()
        .wrap_err("Link injection failed")?;

    println!(
        "  ✓ Link injection complete: {} injected, {} skipped",
        stats.injected, stats.skipped
    );

    Ok(())
}
