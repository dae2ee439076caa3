//! Build command - runs the full prerender

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use estatic_core::Config;
use estatic_generator::Builder;

/// Run the build command.
///
/// Emits project pages, builder hub pages, the sitemap, and robots.txt.
pub fn run(config_path: &Path, output: Option<&Path>, origin: Option<&str>) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, ?origin, "Starting build");

    let mut config = Config::load(config_path).wrap_err("Failed to load configuration")?;

    // Override origin if specified via CLI
    if let Some(o) = origin {
        tracing::info!(origin = o, "Overriding site origin from CLI");
        config.site.origin = o.to_string();
    }

    let mut builder = Builder::new(config);
    if let Some(out) = output {
        builder = builder.with_output_dir(out);
    }

    let stats = builder.build().wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  ✓ Build completed successfully!");
    println!();
    println!("  Project pages: {}", stats.projects);
    println!("  Hub pages:     {}", stats.hubs);
    println!("  Sitemap URLs:  {}", stats.sitemap_urls);
    println!();
    println!("  Duration:      {:.2}s", duration.as_secs_f64());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}
