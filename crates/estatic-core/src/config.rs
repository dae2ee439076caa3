//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Estatic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Content discovery settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Sitemap settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// Robots.txt settings.
    #[serde(default)]
    pub robots: RobotsConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title, used in page title suffixes and hub pages.
    pub title: String,

    /// Public origin for the site (e.g., "https://example.com").
    pub origin: String,

    /// Site description for meta tags.
    #[serde(default)]
    pub description: Option<String>,

    /// Site author/publisher name.
    #[serde(default)]
    pub author: Option<String>,
}

/// Content discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Root directory holding per-builder project documents.
    #[serde(default = "default_content_root")]
    pub root: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory for generated pages.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Path to the HTML shell template.
    #[serde(default = "default_template")]
    pub template: String,

    /// Path to the bundler build manifest.
    #[serde(default = "default_manifest")]
    pub manifest: String,

    /// Source entry point to resolve in the build manifest.
    #[serde(default = "default_entry")]
    pub entry: String,
}

/// Sitemap configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    /// Change frequency written for every project URL.
    #[serde(default = "default_changefreq")]
    pub changefreq: String,

    /// Priority written for every project URL (0.0 to 1.0).
    #[serde(default = "default_priority")]
    pub priority: f32,
}

/// Robots.txt configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotsConfig {
    /// Whether robots.txt generation is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Paths to disallow.
    #[serde(default)]
    pub disallow: Vec<String>,

    /// Paths to allow.
    #[serde(default)]
    pub allow: Vec<String>,
}

// Default value functions
fn default_content_root() -> String {
    "content".to_string()
}

fn default_output_dir() -> String {
    "dist".to_string()
}

fn default_template() -> String {
    "index.html".to_string()
}

fn default_manifest() -> String {
    "dist/.vite/manifest.json".to_string()
}

fn default_entry() -> String {
    "src/main.tsx".to_string()
}

fn default_changefreq() -> String {
    "weekly".to_string()
}

fn default_priority() -> f32 {
    0.8
}

fn default_true() -> bool {
    true
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_content_root(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            template: default_template(),
            manifest: default_manifest(),
            entry: default_entry(),
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            changefreq: default_changefreq(),
            priority: default_priority(),
        }
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            disallow: Vec::new(),
            allow: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration using the config crate for more flexibility.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("ESTATIC").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.origin.is_empty() {
            return Err(CoreError::config("site.origin cannot be empty"));
        }

        if self.site.origin.ends_with('/') {
            tracing::warn!("site.origin should not have a trailing slash");
        }

        if !(0.0..=1.0).contains(&self.sitemap.priority) {
            return Err(CoreError::config(
                "sitemap.priority must be between 0.0 and 1.0",
            ));
        }

        Ok(())
    }

    /// Get the site origin without a trailing slash.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.site.origin.trim_end_matches('/')
    }

    /// Canonical page URL for a public slug: `origin/<public_slug>/`.
    #[must_use]
    pub fn page_url(&self, public_slug: &str) -> String {
        format!("{}/{}/", self.origin(), public_slug.trim_matches('/'))
    }

    /// Sitemap location for a public slug: `origin/<public_slug>`.
    #[must_use]
    pub fn sitemap_loc(&self, public_slug: &str) -> String {
        format!("{}/{}", self.origin(), public_slug.trim_matches('/'))
    }

    /// Resolve a possibly-relative asset URL against the site origin.
    #[must_use]
    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.origin(), url.trim_start_matches('/'))
        }
    }
}
