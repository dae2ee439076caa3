//! Static page emission.
//!
//! Writes one HTML document per project and per builder hub from the
//! validated shell template. Placement, ordering, and substitution are pure
//! functions of the input documents, so re-running with identical inputs
//! reproduces identical files.

use std::{fs, path::{Path, PathBuf}};

use estatic_core::{Config, ProjectRecord, ResolvedFaqItem};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::{
    seo::{SeoBlock, SeoSynthesizer},
    shell::ShellTemplate,
};

/// Element id carrying the embedded page payload.
const PAYLOAD_ELEMENT_ID: &str = "__ESTATIC_DATA__";

/// Emission errors.
#[derive(Debug, Error)]
pub enum EmitError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload serialization error.
    #[error("payload serialization failed for {slug}: {message}")]
    Payload { slug: String, message: String },
}

/// Result type for emission operations.
pub type Result<T> = std::result::Result<T, EmitError>;

/// Static page emitter.
#[derive(Debug)]
pub struct StaticEmitter {
    seo: SeoSynthesizer,
    template: ShellTemplate,
    entry_script: String,
    output_dir: PathBuf,
}

impl StaticEmitter {
    /// Create an emitter over a validated template and resolved entry script.
    #[must_use]
    pub fn new(
        config: Config,
        template: ShellTemplate,
        entry_script: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            seo: SeoSynthesizer::new(config),
            template,
            entry_script: entry_script.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Emit one project page to `out/<public_slug>/index.html`.
    pub fn emit_project(
        &self,
        record: &ProjectRecord,
        faqs: &[ResolvedFaqItem],
    ) -> Result<PathBuf> {
        let block = self.seo.project_seo(record, faqs);
        let payload = json!({
            "kind": "project",
            "publicSlug": record.public_slug(),
            "project": record.document,
            "faqs": faqs,
        });

        self.write_page(record.public_slug(), &block, &payload)
    }

    /// Emit one builder hub page to `out/<builder>/index.html`.
    pub fn emit_hub(&self, builder: &str, projects: &[&ProjectRecord]) -> Result<PathBuf> {
        let block = self.seo.hub_seo(builder, projects);
        let payload = json!({
            "kind": "hub",
            "builder": builder,
            "projects": projects
                .iter()
                .map(|p| json!({
                    "publicSlug": p.public_slug(),
                    "name": p.name,
                    "city": p.city,
                    "locality": p.locality,
                }))
                .collect::<Vec<_>>(),
        });

        self.write_page(builder, &block, &payload)
    }

    fn write_page(
        &self,
        dir_slug: &str,
        block: &SeoBlock,
        payload: &serde_json::Value,
    ) -> Result<PathBuf> {
        let payload_script = payload_script(dir_slug, payload)?;
        let seo_head = self.seo.head_html(block);
        let html = self
            .template
            .compose(&seo_head, &payload_script, &self.entry_script);

        let page_dir = self.output_dir.join(dir_slug);
        fs::create_dir_all(&page_dir)?;

        let path = page_dir.join("index.html");
        fs::write(&path, html)?;
        debug!(path = %path.display(), "wrote page");

        Ok(path)
    }
}

/// Serialize a payload into an inline JSON script element. `<` is escaped
/// so document content can never terminate the script element early.
fn payload_script(slug: &str, payload: &serde_json::Value) -> Result<String> {
    let serialized = serde_json::to_string(payload).map_err(|e| EmitError::Payload {
        slug: slug.to_string(),
        message: e.to_string(),
    })?;

    Ok(format!(
        "<script id=\"{PAYLOAD_ELEMENT_ID}\" type=\"application/json\">{}</script>",
        serialized.replace('<', "\\u003c")
    ))
}

/// Path of an already-emitted project page, used by the link injector.
#[must_use]
pub fn page_path(output_dir: &Path, public_slug: &str) -> PathBuf {
    output_dir.join(public_slug).join("index.html")
}
