//! Content discovery.
//!
//! Walks the content root and resolves every project document into a
//! [`ProjectRecord`]. Discovery is a pure fold over the file listing: each
//! call rebuilds the collection from disk, there is no cross-run cache.
//!
//! Two source layouts are supported:
//!
//! - flat files: `<builder>/<builder>-<slug>.json` (file name tracked, so
//!   the filename consistency invariant applies);
//! - legacy folders: `<builder>/<slug>/project.json` (no tracked file name).

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use estatic_core::{Config, FaqItem, ProjectRecord};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Content root directory does not exist.
    #[error("content root not found: {0}")]
    MissingRoot(PathBuf),

    /// Document is not valid JSON.
    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Document yields no project identity (strict mode only).
    #[error("no project identity in {0} (missing or empty slug/builder)")]
    UnresolvedIdentity(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// Reserved top-level directories that hold tiered FAQ content, not projects.
const RESERVED_DIRS: [&str; 2] = ["global", "builders"];

/// Collected site content.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// All resolved projects, in discovery order.
    pub projects: Vec<ProjectRecord>,
}

impl SiteContent {
    /// Projects grouped by builder, in discovery order within each group.
    #[must_use]
    pub fn by_builder(&self) -> BTreeMap<&str, Vec<&ProjectRecord>> {
        let mut groups: BTreeMap<&str, Vec<&ProjectRecord>> = BTreeMap::new();
        for project in &self.projects {
            groups.entry(project.builder()).or_default().push(project);
        }
        groups
    }

    /// Sibling projects of the same builder, excluding the project itself.
    #[must_use]
    pub fn siblings(&self, record: &ProjectRecord) -> Vec<&ProjectRecord> {
        self.projects
            .iter()
            .filter(|p| {
                p.builder() == record.builder() && p.public_slug() != record.public_slug()
            })
            .collect()
    }
}

/// Content collector that walks the content root and parses documents.
#[derive(Debug)]
pub struct ContentCollector {
    content_root: PathBuf,
}

impl ContentCollector {
    /// Create a collector for the configured content root.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            content_root: PathBuf::from(&config.content.root),
        }
    }

    /// Create a collector for an explicit content root.
    #[must_use]
    pub fn with_root(content_root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: content_root.into(),
        }
    }

    /// Collect content leniently: files without an identity are skipped
    /// with a warning. Used by discovery-style commands.
    pub fn collect(&self) -> Result<SiteContent> {
        self.collect_inner(false)
    }

    /// Collect content strictly: every discovered document must resolve to
    /// an identity. Used by the prerender pipeline, which must emit SEO for
    /// every page.
    pub fn collect_strict(&self) -> Result<SiteContent> {
        self.collect_inner(true)
    }

    fn collect_inner(&self, strict: bool) -> Result<SiteContent> {
        if !self.content_root.is_dir() {
            return Err(CollectorError::MissingRoot(self.content_root.clone()));
        }

        info!(root = %self.content_root.display(), strict, "collecting content");

        let mut projects = Vec::new();

        for entry in WalkDir::new(&self.content_root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !self.is_project_document(path) {
                continue;
            }

            match self.resolve_document(path)? {
                Some(record) => {
                    debug!(slug = record.public_slug(), "resolved project");
                    projects.push(record);
                }
                None if strict => {
                    return Err(CollectorError::UnresolvedIdentity(path.to_path_buf()));
                }
                None => {
                    warn!(path = %path.display(), "skipping document without identity");
                }
            }
        }

        info!(projects = projects.len(), "content collection complete");

        Ok(SiteContent { projects })
    }

    /// Whether a path is a project document rather than FAQ tier content.
    fn is_project_document(&self, path: &Path) -> bool {
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            return false;
        }

        // First path component under the content root decides reservation.
        let relative = path.strip_prefix(&self.content_root).unwrap_or(path);
        let first = relative
            .components()
            .next()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .unwrap_or_default();

        !RESERVED_DIRS.contains(&first.as_str())
    }

    /// Read and resolve one document. Flat files track their file name;
    /// `project.json` inside a slug folder is the legacy layout and does not.
    fn resolve_document(&self, path: &Path) -> Result<Option<ProjectRecord>> {
        let raw = fs::read_to_string(path)?;
        let document: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| CollectorError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let base_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_name = if base_name == "project.json" {
            None
        } else {
            Some(base_name)
        };

        Ok(ProjectRecord::from_document(document, file_name))
    }

    /// Load the universal FAQ tier from `global/faq.json`.
    /// A missing file is an empty tier, never an error.
    pub fn load_universal_faqs(&self) -> Result<Vec<FaqItem>> {
        self.load_faq_file(&self.content_root.join("global").join("faq.json"))
    }

    /// Load a builder's FAQ tier from `builders/<builder>/builder_faq.json`.
    /// A missing file is an empty tier, never an error.
    pub fn load_builder_faqs(&self, builder: &str) -> Result<Vec<FaqItem>> {
        self.load_faq_file(
            &self
                .content_root
                .join("builders")
                .join(builder)
                .join("builder_faq.json"),
        )
    }

    fn load_faq_file(&self, path: &Path) -> Result<Vec<FaqItem>> {
        if !path.is_file() {
            debug!(path = %path.display(), "FAQ tier file absent, using empty tier");
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(path)?;
        let document: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| CollectorError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let faqs = document
            .get("faqs")
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| serde_json::from_value::<FaqItem>(i.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(faqs)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_project(root: &Path, builder: &str, slug: &str) {
        let dir = root.join(builder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{builder}-{slug}.json")),
            serde_json::json!({ "slug": slug, "builder": builder, "name": slug }).to_string(),
        )
        .unwrap();
    }

    #[test]
    fn test_collect_flat_files() {
        let root = TempDir::new().unwrap();
        write_project(root.path(), "acme", "skyline");
        write_project(root.path(), "beta", "heights");

        let collector = ContentCollector::with_root(root.path());
        let content = collector.collect().unwrap();

        assert_eq!(content.projects.len(), 2);
        let slugs: Vec<_> = content
            .projects
            .iter()
            .map(|p| p.public_slug().to_string())
            .collect();
        assert_eq!(slugs, vec!["acme-skyline", "beta-heights"]);
    }

    #[test]
    fn test_collect_legacy_folder_layout() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("acme").join("skyline");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("project.json"),
            serde_json::json!({ "slug": "skyline", "builder": "acme" }).to_string(),
        )
        .unwrap();

        let content = ContentCollector::with_root(root.path()).collect().unwrap();

        assert_eq!(content.projects.len(), 1);
        // Legacy layout does not track a file name.
        assert!(content.projects[0].file_name.is_none());
    }

    #[test]
    fn test_reserved_dirs_are_not_projects() {
        let root = TempDir::new().unwrap();
        write_project(root.path(), "acme", "skyline");

        let global = root.path().join("global");
        fs::create_dir_all(&global).unwrap();
        fs::write(
            global.join("faq.json"),
            serde_json::json!({ "faqs": [{ "question": "Q", "answer": "A" }] }).to_string(),
        )
        .unwrap();

        let builders = root.path().join("builders").join("acme");
        fs::create_dir_all(&builders).unwrap();
        fs::write(
            builders.join("builder_faq.json"),
            serde_json::json!({ "faqs": [] }).to_string(),
        )
        .unwrap();

        let content = ContentCollector::with_root(root.path()).collect().unwrap();
        assert_eq!(content.projects.len(), 1);
    }

    #[test]
    fn test_lenient_skips_unresolved_strict_fails() {
        let root = TempDir::new().unwrap();
        write_project(root.path(), "acme", "skyline");
        fs::write(
            root.path().join("acme").join("stray.json"),
            serde_json::json!({ "name": "no identity here" }).to_string(),
        )
        .unwrap();

        let collector = ContentCollector::with_root(root.path());

        let lenient = collector.collect().unwrap();
        assert_eq!(lenient.projects.len(), 1);

        let strict = collector.collect_strict();
        assert!(matches!(
            strict,
            Err(CollectorError::UnresolvedIdentity(_))
        ));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let collector = ContentCollector::with_root("/nonexistent/content");
        assert!(matches!(
            collector.collect(),
            Err(CollectorError::MissingRoot(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("acme");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("acme-bad.json"), "{ not json").unwrap();

        let result = ContentCollector::with_root(root.path()).collect();
        assert!(matches!(result, Err(CollectorError::Parse { .. })));
    }

    #[test]
    fn test_faq_tiers_missing_files_are_empty() {
        let root = TempDir::new().unwrap();
        let collector = ContentCollector::with_root(root.path());

        assert!(collector.load_universal_faqs().unwrap().is_empty());
        assert!(collector.load_builder_faqs("acme").unwrap().is_empty());
    }

    #[test]
    fn test_faq_tier_loading() {
        let root = TempDir::new().unwrap();
        let global = root.path().join("global");
        fs::create_dir_all(&global).unwrap();
        fs::write(
            global.join("faq.json"),
            serde_json::json!({
                "faqs": [{ "question": "What is RERA?", "answer": "The regulator." }]
            })
            .to_string(),
        )
        .unwrap();

        let faqs = ContentCollector::with_root(root.path())
            .load_universal_faqs()
            .unwrap();

        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].question, "What is RERA?");
    }

    #[test]
    fn test_siblings() {
        let root = TempDir::new().unwrap();
        write_project(root.path(), "acme", "skyline");
        write_project(root.path(), "acme", "gardens");
        write_project(root.path(), "beta", "heights");

        let content = ContentCollector::with_root(root.path()).collect().unwrap();
        let skyline = content
            .projects
            .iter()
            .find(|p| p.public_slug() == "acme-skyline")
            .unwrap();

        let siblings = content.siblings(skyline);
        assert_eq!(siblings.len(), 1);
        assert_eq!(siblings[0].public_slug(), "acme-gardens");
    }
}
