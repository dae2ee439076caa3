//! Estatic CLI
//!
//! Static marketing-site generator for real-estate project content.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Estatic.
#[derive(Parser)]
#[command(
    name = "estatic",
    version,
    about = "Content-driven static site and SEO artifact generator"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands, one per pipeline stage.
#[derive(clap::Subcommand)]
enum Commands {
    /// Full prerender: project pages, hub pages, sitemap, robots.txt
    Build {
        /// Override the output directory
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Override the site origin (e.g., https://example.com)
        #[arg(long)]
        origin: Option<String>,
    },
    /// Generate only the sitemap
    Sitemap,
    /// Generate only the builder hub pages
    Hubs,
    /// Inject breadcrumb and sibling links into emitted pages
    Inject,
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    estatic::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { output, origin } => {
            estatic::cmd::build::run(&cli.config, output.as_deref(), origin.as_deref())?;
        }
        Commands::Sitemap => {
            estatic::cmd::sitemap::run(&cli.config)?;
        }
        Commands::Hubs => {
            estatic::cmd::hubs::run(&cli.config)?;
        }
        Commands::Inject => {
            estatic::cmd::inject::run(&cli.config)?;
        }
        Commands::Check { strict } => {
            estatic::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
