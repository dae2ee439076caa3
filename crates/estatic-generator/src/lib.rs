//! Estatic Generator Library
//!
//! Static generation engine for the Estatic real-estate site generator.
//!
//! # Modules
//!
//! - [`collector`] - Content discovery and FAQ tier loading
//! - [`guard`] - Cross-document invariant enforcement
//! - [`seo`] - SEO metadata and JSON-LD synthesis
//! - [`shell`] - HTML shell template and build manifest resolution
//! - [`emit`] - Static page emission
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`inject`] - Post-emit link injection
//! - [`build`] - Build orchestration

pub mod build;
pub mod collector;
pub mod emit;
pub mod guard;
pub mod inject;
pub mod robots;
pub mod seo;
pub mod shell;
pub mod sitemap;

pub use build::{BuildError, BuildStats, Builder};
pub use collector::{ContentCollector, SiteContent};
pub use emit::StaticEmitter;
pub use guard::GuardError;
pub use inject::{InjectStats, LinkInjector};
pub use robots::RobotsGenerator;
pub use seo::{SeoBlock, SeoSynthesizer};
pub use shell::{BuildManifest, ShellTemplate};
pub use sitemap::SitemapGenerator;
