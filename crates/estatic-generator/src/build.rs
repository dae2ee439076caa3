//! Build orchestration.
//!
//! Runs the pipeline stages in their fixed order: configuration checks
//! (template, manifest), strict content collection, invariant guard, FAQ
//! merge, SEO synthesis, page emission, sitemap, robots. Link injection is
//! a separate pass invoked after emission has completed.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    time::Instant,
};

use estatic_core::{Config, FaqItem, merge_faqs};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collector::{CollectorError, ContentCollector, SiteContent},
    emit::{EmitError, StaticEmitter},
    guard::{self, GuardError},
    inject::{InjectError, InjectStats, LinkInjector},
    robots::{RobotsError, RobotsGenerator},
    shell::{BuildManifest, ShellError, ShellTemplate},
    sitemap::{SitemapError, SitemapGenerator},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content collection error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Invariant violation.
    #[error("invariant violation: {0}")]
    Guard(#[from] GuardError),

    /// Template or manifest configuration error.
    #[error("shell error: {0}")]
    Shell(#[from] ShellError),

    /// Page emission error.
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),

    /// Sitemap generation error.
    #[error("sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    /// Robots generation error.
    #[error("robots error: {0}")]
    Robots(#[from] RobotsError),

    /// Link injection error.
    #[error("inject error: {0}")]
    Inject(#[from] InjectError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Number of project pages emitted.
    pub projects: usize,

    /// Number of builder hub pages emitted.
    pub hubs: usize,

    /// Number of sitemap URL entries.
    pub sitemap_urls: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the pipeline.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    output_dir: PathBuf,
}

impl Builder {
    /// Create a builder writing to the configured output directory.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let output_dir = PathBuf::from(&config.build.output_dir);
        Self { config, output_dir }
    }

    /// Override the output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Execute the full prerender: project pages, hub pages, sitemap,
    /// robots.txt. Configuration errors surface before any per-project
    /// processing; invariant violations abort before any file is written.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(output = %self.output_dir.display(), "starting build");

        // Configuration checks come first: a stale template or manifest must
        // fail the build before any content work happens.
        let template = ShellTemplate::load(Path::new(&self.config.build.template))?;
        let manifest = BuildManifest::load(Path::new(&self.config.build.manifest))?;
        let entry_script = manifest.entry_script(&self.config.build.entry)?;

        let content = self.collect_guarded()?;

        let collector = ContentCollector::new(&self.config);
        let universal = collector.load_universal_faqs()?;
        let builder_tiers = self.load_builder_tiers(&collector, &content)?;

        std::fs::create_dir_all(&self.output_dir)?;

        let emitter = StaticEmitter::new(
            self.config.clone(),
            template,
            entry_script,
            &self.output_dir,
        );

        for record in &content.projects {
            let builder_faqs = builder_tiers
                .get(record.builder())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let merged = merge_faqs(&universal, builder_faqs, &record.faqs);
            emitter.emit_project(record, &merged)?;
            stats.projects += 1;
        }

        for (builder, projects) in content.by_builder() {
            emitter.emit_hub(builder, &projects)?;
            stats.hubs += 1;
        }

        stats.sitemap_urls = self.write_sitemap(&content)?;

        RobotsGenerator::new(self.config.clone()).generate(&self.output_dir)?;

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            projects = stats.projects,
            hubs = stats.hubs,
            sitemap_urls = stats.sitemap_urls,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Standalone sitemap stage.
    pub fn build_sitemap(&self) -> Result<usize> {
        let content = self.collect_guarded()?;
        std::fs::create_dir_all(&self.output_dir)?;
        self.write_sitemap(&content)
    }

    /// Standalone builder hub stage.
    pub fn build_hubs(&self) -> Result<usize> {
        let template = ShellTemplate::load(Path::new(&self.config.build.template))?;
        let manifest = BuildManifest::load(Path::new(&self.config.build.manifest))?;
        let entry_script = manifest.entry_script(&self.config.build.entry)?;

        let content = self.collect_guarded()?;

        std::fs::create_dir_all(&self.output_dir)?;
        let emitter = StaticEmitter::new(
            self.config.clone(),
            template,
            entry_script,
            &self.output_dir,
        );

        let mut count = 0;
        for (builder, projects) in content.by_builder() {
            emitter.emit_hub(builder, &projects)?;
            count += 1;
        }

        Ok(count)
    }

    /// Standalone link-injection stage, run after emission has completed.
    pub fn inject_links(&self) -> Result<InjectStats> {
        let content = self.collect_guarded()?;
        let injector = LinkInjector::new(self.config.clone());
        Ok(injector.run(&self.output_dir, &content.projects)?)
    }

    /// Strict collection followed by the full guard contract.
    fn collect_guarded(&self) -> Result<SiteContent> {
        let collector = ContentCollector::new(&self.config);
        let content = collector.collect_strict()?;

        guard::ensure_non_empty(&content.projects)?;
        guard::enforce(&content.projects)?;

        Ok(content)
    }

    /// Load the builder FAQ tier once per distinct builder.
    fn load_builder_tiers(
        &self,
        collector: &ContentCollector,
        content: &SiteContent,
    ) -> Result<BTreeMap<String, Vec<FaqItem>>> {
        let mut tiers = BTreeMap::new();
        for builder in content.by_builder().keys() {
            let faqs = collector.load_builder_faqs(builder)?;
            debug!(builder, faqs = faqs.len(), "loaded builder FAQ tier");
            tiers.insert((*builder).to_string(), faqs);
        }
        Ok(tiers)
    }

    fn write_sitemap(&self, content: &SiteContent) -> Result<usize> {
        let generator = SitemapGenerator::new(self.config.clone());
        let xml = generator.generate(&content.projects)?;

        let path = self.output_dir.join("sitemap.xml");
        std::fs::write(&path, xml)?;
        info!(path = %path.display(), "generated sitemap");

        Ok(content.projects.len())
    }
}
