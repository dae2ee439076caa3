//! Hubs command - standalone builder hub page stage

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use estatic_core::Config;
use estatic_generator::Builder;

/// Run the builder hub page stage on its own.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!(?config_path, "Generating builder hub pages");

    let config = Config::load(config_path).wrap_err("Failed to load configuration")?;
    let count = Builder::new(config)
        .build_hubs()
        .wrap_err("Hub page generation failed")?;

    println!("  ✓ {count} hub page(s) written");

    Ok(())
}
