//! Sitemap generation.
//!
//! Emits one `<url>` entry per guard-passed project. The generator re-runs
//! the invariant guard before producing XML so a sitemap can never contain
//! duplicate or inconsistent URLs, even when invoked as a standalone stage.

use chrono::Utc;
use estatic_core::{Config, ProjectRecord};
use thiserror::Error;
use tracing::debug;

use crate::guard::{self, GuardError};

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invariant violation detected during the pre-write guard pass.
    #[error("invariant violation: {0}")]
    Guard(#[from] GuardError),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Change frequency for sitemap entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    /// Parse a configured frequency name; unknown names fall back to weekly.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "always" => Self::Always,
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            "never" => Self::Never,
            _ => Self::Weekly,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

/// A sitemap URL entry.
#[derive(Debug, Clone)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,

    /// Last modification date (`YYYY-MM-DD`).
    pub lastmod: String,

    /// Change frequency.
    pub changefreq: ChangeFreq,

    /// Priority (0.0 to 1.0).
    pub priority: f32,
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate sitemap XML from the full project set.
    ///
    /// Re-runs the invariant guard (including the non-empty policy) before
    /// any XML is assembled.
    pub fn generate(&self, projects: &[ProjectRecord]) -> Result<String> {
        guard::ensure_non_empty(projects)?;
        guard::enforce(projects)?;

        debug!(count = projects.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for project in projects {
            let url = self.project_to_url(project);
            xml.push_str(&url_to_xml(&url));
        }

        xml.push_str("</urlset>\n");

        Ok(xml)
    }

    /// Convert a project to a sitemap URL entry. The `lastmod` is the
    /// current build date; the pipeline has no per-document mtime tracking.
    fn project_to_url(&self, project: &ProjectRecord) -> SitemapUrl {
        SitemapUrl {
            loc: self.config.sitemap_loc(project.public_slug()),
            lastmod: Utc::now().format("%Y-%m-%d").to_string(),
            changefreq: ChangeFreq::parse(&self.config.sitemap.changefreq),
            priority: self.config.sitemap.priority,
        }
    }
}

/// Convert a URL entry to XML.
fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");

    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));
    xml.push_str(&format!("    <lastmod>{}</lastmod>\n", url.lastmod));
    xml.push_str(&format!(
        "    <changefreq>{}</changefreq>\n",
        url.changefreq.as_str()
    ));
    xml.push_str(&format!("    <priority>{:.1}</priority>\n", url.priority));

    xml.push_str("  </url>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use estatic_core::ProjectRecord;
    use serde_json::json;

    use super::*;

    fn test_config() -> Config {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[site]
title = "Test Site"
origin = "https://example.com"
"#,
        )
        .expect("write");
        Config::load(&path).expect("config")
    }

    fn record(builder: &str, slug: &str) -> ProjectRecord {
        ProjectRecord::from_document(json!({ "slug": slug, "builder": builder }), None)
            .expect("record")
    }

    #[test]
    fn test_generate_sitemap() {
        let generator = SitemapGenerator::new(test_config());
        let projects = vec![record("acme", "skyline"), record("beta", "heights")];

        let xml = generator.generate(&projects).unwrap();

        assert!(xml.contains(r#"<?xml version="1.0""#));
        assert!(xml.contains("<urlset"));
        assert!(xml.contains("<loc>https://example.com/acme-skyline</loc>"));
        assert!(xml.contains("<loc>https://example.com/beta-heights</loc>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert_eq!(xml.matches("<url>").count(), 2);
    }

    #[test]
    fn test_empty_set_is_rejected() {
        let generator = SitemapGenerator::new(test_config());
        let result = generator.generate(&[]);
        assert!(matches!(
            result,
            Err(SitemapError::Guard(GuardError::NoProjects))
        ));
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let generator = SitemapGenerator::new(test_config());
        let projects = vec![record("x", "a"), record("x", "a")];

        let result = generator.generate(&projects);
        assert!(matches!(
            result,
            Err(SitemapError::Guard(GuardError::DuplicateSlug { .. }))
        ));
    }

    #[test]
    fn test_lastmod_is_build_date() {
        let generator = SitemapGenerator::new(test_config());
        let xml = generator.generate(&[record("acme", "skyline")]).unwrap();

        let today = Utc::now().format("%Y-%m-%d").to_string();
        assert!(xml.contains(&format!("<lastmod>{today}</lastmod>")));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_changefreq_parse() {
        assert_eq!(ChangeFreq::parse("daily"), ChangeFreq::Daily);
        assert_eq!(ChangeFreq::parse("DAILY"), ChangeFreq::Daily);
        assert_eq!(ChangeFreq::parse("bogus"), ChangeFreq::Weekly);
    }
}
