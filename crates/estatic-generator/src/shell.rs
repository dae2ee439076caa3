//! HTML shell template and build manifest resolution.
//!
//! The shell is a fixed-slot format: two literal markers plus a single
//! `</head>` for SEO insertion. All slots are validated up front, before
//! any emission work begins, so a stale template fails the build instead of
//! producing pages with silent no-op substitutions. The build manifest is a
//! pure lookup with no fallback filename guessing.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Literal marker replaced with the serialized project payload.
pub const PAYLOAD_MARKER: &str = "<!--project-payload-->";

/// Literal marker replaced with the manifest-resolved script tag.
pub const ENTRY_MARKER: &str = "<!--entry-script-->";

/// Literal marker consumed later by the link injector.
pub const RELATED_MARKER: &str = "<!--related-links-->";

/// Head close tag; the SEO block is inserted immediately before it.
const HEAD_CLOSE: &str = "</head>";

/// Shell/manifest resolution errors.
#[derive(Debug, Error)]
pub enum ShellError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template file does not exist.
    #[error("shell template not found: {0}")]
    TemplateNotFound(PathBuf),

    /// A required marker is absent from the template.
    #[error("shell template {path} is missing required marker {marker}")]
    MissingMarker { path: PathBuf, marker: String },

    /// A substitution target occurs more than once.
    #[error("shell template {path} contains marker {marker} {count} times, expected exactly once")]
    DuplicateMarker {
        path: PathBuf,
        marker: String,
        count: usize,
    },

    /// Build manifest file does not exist.
    #[error("build manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// Build manifest is not valid JSON.
    #[error("build manifest {path} is not valid JSON: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// The configured entry is absent from the manifest.
    #[error("build manifest {path} has no entry for {entry}")]
    MissingEntry { path: PathBuf, entry: String },
}

/// Result type for shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;

/// A validated HTML shell template.
#[derive(Debug, Clone)]
pub struct ShellTemplate {
    html: String,
}

impl ShellTemplate {
    /// Load and validate the shell template. Every substitution target must
    /// occur exactly once.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ShellError::TemplateNotFound(path.to_path_buf()));
        }

        let html = std::fs::read_to_string(path)?;
        let template = Self { html };
        template.validate(path)?;

        debug!(path = %path.display(), "shell template validated");
        Ok(template)
    }

    /// Construct from an in-memory string; validation against a synthetic
    /// path. Used by tests and embedded defaults.
    pub fn from_string(html: impl Into<String>) -> Result<Self> {
        let template = Self { html: html.into() };
        template.validate(Path::new("<inline>"))?;
        Ok(template)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for marker in [PAYLOAD_MARKER, ENTRY_MARKER, HEAD_CLOSE] {
            match self.html.matches(marker).count() {
                0 => {
                    return Err(ShellError::MissingMarker {
                        path: path.to_path_buf(),
                        marker: marker.to_string(),
                    });
                }
                1 => {}
                count => {
                    return Err(ShellError::DuplicateMarker {
                        path: path.to_path_buf(),
                        marker: marker.to_string(),
                        count,
                    });
                }
            }
        }
        Ok(())
    }

    /// Compose a final page: SEO head block before `</head>`, payload script
    /// replacing the payload marker, entry script replacing the entry marker.
    #[must_use]
    pub fn compose(&self, seo_head: &str, payload_script: &str, entry_script: &str) -> String {
        self.html
            .replacen(HEAD_CLOSE, &format!("{seo_head}{HEAD_CLOSE}"), 1)
            .replacen(PAYLOAD_MARKER, payload_script, 1)
            .replacen(ENTRY_MARKER, entry_script, 1)
    }
}

/// A parsed bundler build manifest.
#[derive(Debug, Clone)]
pub struct BuildManifest {
    path: PathBuf,
    entries: serde_json::Value,
}

impl BuildManifest {
    /// Load the manifest file. Missing file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ShellError::ManifestNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path)?;
        let entries: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| ShellError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Resolve the compiled output file for a source entry point. Pure
    /// lookup: a missing entry is fatal, never guessed around.
    pub fn resolve(&self, entry: &str) -> Result<String> {
        self.entries
            .get(entry)
            .and_then(|e| e.get("file"))
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ShellError::MissingEntry {
                path: self.path.clone(),
                entry: entry.to_string(),
            })
    }

    /// Script tag referencing the resolved entry bundle.
    pub fn entry_script(&self, entry: &str) -> Result<String> {
        let file = self.resolve(entry)?;
        Ok(format!(
            "<script type=\"module\" src=\"/{}\"></script>",
            file.trim_start_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const VALID_SHELL: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
</head>
<body>
<div id="root"></div>
<!--project-payload-->
<!--entry-script-->
<!--related-links-->
</body>
</html>"#;

    #[test]
    fn test_valid_template_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, VALID_SHELL).unwrap();

        assert!(ShellTemplate::load(&path).is_ok());
    }

    #[test]
    fn test_missing_payload_marker_is_fatal() {
        let broken = VALID_SHELL.replace(PAYLOAD_MARKER, "");
        let err = ShellTemplate::from_string(broken).unwrap_err();

        match err {
            ShellError::MissingMarker { marker, .. } => assert_eq!(marker, PAYLOAD_MARKER),
            other => panic!("expected MissingMarker, got {other}"),
        }
    }

    #[test]
    fn test_missing_entry_marker_is_fatal() {
        let broken = VALID_SHELL.replace(ENTRY_MARKER, "");
        let err = ShellTemplate::from_string(broken).unwrap_err();

        match err {
            ShellError::MissingMarker { marker, .. } => assert_eq!(marker, ENTRY_MARKER),
            other => panic!("expected MissingMarker, got {other}"),
        }
    }

    #[test]
    fn test_duplicate_marker_is_fatal() {
        let doubled = VALID_SHELL.replace(ENTRY_MARKER, &format!("{ENTRY_MARKER}{ENTRY_MARKER}"));
        let err = ShellTemplate::from_string(doubled).unwrap_err();

        assert!(matches!(err, ShellError::DuplicateMarker { count: 2, .. }));
    }

    #[test]
    fn test_template_not_found() {
        let err = ShellTemplate::load(Path::new("/nonexistent/index.html")).unwrap_err();
        assert!(matches!(err, ShellError::TemplateNotFound(_)));
    }

    #[test]
    fn test_compose_substitutes_all_slots() {
        let template = ShellTemplate::from_string(VALID_SHELL).unwrap();
        let html = template.compose(
            "<title>T</title>\n",
            r#"<script id="data">{}</script>"#,
            r#"<script type="module" src="/assets/main-abc.js"></script>"#,
        );

        assert!(html.contains("<title>T</title>\n</head>"));
        assert!(html.contains(r#"<script id="data">{}</script>"#));
        assert!(html.contains("/assets/main-abc.js"));
        assert!(!html.contains(PAYLOAD_MARKER));
        assert!(!html.contains(ENTRY_MARKER));
        // The related-links marker is left for the injector pass.
        assert!(html.contains(RELATED_MARKER));
    }

    #[test]
    fn test_manifest_resolve() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(
            &path,
            serde_json::json!({
                "src/main.tsx": { "file": "assets/main-Dk29a.js", "isEntry": true }
            })
            .to_string(),
        )
        .unwrap();

        let manifest = BuildManifest::load(&path).unwrap();
        assert_eq!(manifest.resolve("src/main.tsx").unwrap(), "assets/main-Dk29a.js");
        assert_eq!(
            manifest.entry_script("src/main.tsx").unwrap(),
            r#"<script type="module" src="/assets/main-Dk29a.js"></script>"#
        );
    }

    #[test]
    fn test_manifest_missing_entry_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("manifest.json");
        fs::write(&path, "{}").unwrap();

        let manifest = BuildManifest::load(&path).unwrap();
        let err = manifest.resolve("src/main.tsx").unwrap_err();

        match err {
            ShellError::MissingEntry { entry, .. } => assert_eq!(entry, "src/main.tsx"),
            other => panic!("expected MissingEntry, got {other}"),
        }
    }

    #[test]
    fn test_manifest_missing_file_is_fatal() {
        let err = BuildManifest::load(Path::new("/nonexistent/manifest.json")).unwrap_err();
        assert!(matches!(err, ShellError::ManifestNotFound(_)));
    }
}
