//! Canonical project identity resolution.
//!
//! A project document may carry its identity fields (`slug`, `builder`) at
//! the document root or nested under a `project` key. The resolver tries the
//! nested shape first, then the root, and yields nothing when either field
//! is missing or empty. Callers decide whether absence is fatal.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical identity of a project, derived from a raw content document.
///
/// `public_slug` is the single public URL key used everywhere downstream:
/// sitemap entries, output directory names, and cross-links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectIdentity {
    /// Project slug within its builder.
    pub slug: String,

    /// Builder identifier.
    pub builder: String,

    /// Public URL path segment: `{builder}-{slug}`.
    pub public_slug: String,
}

impl ProjectIdentity {
    /// Construct an identity from its two components.
    #[must_use]
    pub fn new(slug: impl Into<String>, builder: impl Into<String>) -> Self {
        let slug = slug.into();
        let builder = builder.into();
        let public_slug = format!("{builder}-{slug}");
        Self {
            slug,
            builder,
            public_slug,
        }
    }

    /// The source file name the flat-file layout expects for this identity.
    #[must_use]
    pub fn expected_file_name(&self) -> String {
        format!("{}.json", self.public_slug)
    }
}

/// Resolve a project identity from a raw JSON document.
///
/// Tries the nested `project` object first, then the document root. Returns
/// `None` when `slug` or `builder` is missing or not a non-empty string.
#[must_use]
pub fn resolve_identity(doc: &Value) -> Option<ProjectIdentity> {
    doc.get("project")
        .and_then(identity_from)
        .or_else(|| identity_from(doc))
}

fn identity_from(obj: &Value) -> Option<ProjectIdentity> {
    let slug = non_empty_str(obj.get("slug")?)?;
    let builder = non_empty_str(obj.get("builder")?)?;
    Some(ProjectIdentity::new(slug, builder))
}

fn non_empty_str(value: &Value) -> Option<&str> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}
