//! Post-emit link injection.
//!
//! A second pass over emitted HTML that adds breadcrumb and sibling-project
//! navigation. It only rewrites files that still contain the injection
//! marker, so a repeat run is a no-op, and it never touches source content.

use std::{fs, path::Path};

use estatic_core::{Config, ProjectRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::{emit::page_path, seo::escape_html, shell::RELATED_MARKER};

/// Maximum number of sibling projects linked from a page.
const MAX_SIBLINGS: usize = 4;

/// Link injection errors.
#[derive(Debug, Error)]
pub enum InjectError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for injection operations.
pub type Result<T> = std::result::Result<T, InjectError>;

/// Injection statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectStats {
    /// Pages rewritten this pass.
    pub injected: usize,

    /// Pages skipped: already injected or not yet emitted.
    pub skipped: usize,
}

/// Link injector.
#[derive(Debug)]
pub struct LinkInjector {
    config: Config,
}

impl LinkInjector {
    /// Create a new link injector.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the injection pass over an emitted output directory.
    pub fn run(&self, output_dir: &Path, projects: &[ProjectRecord]) -> Result<InjectStats> {
        let mut stats = InjectStats::default();

        for record in projects {
            let path = page_path(output_dir, record.public_slug());

            if !path.is_file() {
                // Creating pages is the emitter's job, not ours.
                debug!(slug = record.public_slug(), "page not emitted, skipping");
                stats.skipped += 1;
                continue;
            }

            let html = fs::read_to_string(&path)?;
            if !html.contains(RELATED_MARKER) {
                debug!(slug = record.public_slug(), "marker already consumed, skipping");
                stats.skipped += 1;
                continue;
            }

            let markup = self.related_links(record, projects);
            let rewritten = html.replacen(RELATED_MARKER, &markup, 1);
            fs::write(&path, rewritten)?;
            stats.injected += 1;
        }

        info!(
            injected = stats.injected,
            skipped = stats.skipped,
            "link injection complete"
        );

        Ok(stats)
    }

    /// Breadcrumb plus a bounded sibling list, as pure markup.
    fn related_links(&self, record: &ProjectRecord, projects: &[ProjectRecord]) -> String {
        let mut html = String::from("<nav class=\"breadcrumb\" aria-label=\"Breadcrumb\"><ol>");
        html.push_str(&format!(
            "<li><a href=\"{}/\">Home</a></li>",
            self.config.origin()
        ));
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>",
            self.config.page_url(record.builder()),
            escape_html(record.builder())
        ));
        html.push_str(&format!("<li>{}</li>", escape_html(&record.name)));
        html.push_str("</ol></nav>");

        let siblings: Vec<&ProjectRecord> = projects
            .iter()
            .filter(|p| {
                p.builder() == record.builder() && p.public_slug() != record.public_slug()
            })
            .take(MAX_SIBLINGS)
            .collect();

        if !siblings.is_empty() {
            html.push_str("<section class=\"related-projects\"><h2>More from this builder</h2><ul>");
            for sibling in siblings {
                html.push_str(&format!(
                    "<li><a href=\"{}\">{}</a></li>",
                    self.config.page_url(sibling.public_slug()),
                    escape_html(&sibling.name)
                ));
            }
            html.push_str("</ul></section>");
        }

        html
    }
}
