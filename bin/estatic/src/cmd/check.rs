//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use estatic_core::{Config, ProjectRecord};
use estatic_generator::{guard, shell::{BuildManifest, ShellTemplate}};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Discovery here is lenient: a document that resolves to no identity is a
/// warning, unlike the prerender pipeline where it aborts the build.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(ref cfg) = config {
        println!("\nChecking content files...");
        validate_content(cfg, &mut result);

        println!("\nChecking shell template and build manifest...");
        validate_shell(cfg, &mut result);
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Walk the content root leniently and run the invariant guard over
/// whatever resolves.
fn validate_content(config: &Config, result: &mut ValidationResult) {
    let root = Path::new(&config.content.root);
    if !root.is_dir() {
        result.add_error(format!("Content root not found: {}", root.display()));
        return;
    }

    let mut records = Vec::new();

    for entry in walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        // FAQ tier files are not project documents.
        let relative = path.strip_prefix(root).unwrap_or(path);
        let first = relative
            .components()
            .next()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .unwrap_or_default();
        if first == "global" || first == "builders" {
            continue;
        }

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                result.add_error(format!("Cannot read {}: {e}", path.display()));
                continue;
            }
        };

        let document: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                result.add_error(format!("Invalid JSON in {}: {e}", path.display()));
                continue;
            }
        };

        let base_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let file_name = (base_name != "project.json").then_some(base_name);

        match ProjectRecord::from_document(document, file_name) {
            Some(record) => records.push(record),
            None => result.add_warning(format!(
                "No project identity in {} (missing or empty slug/builder)",
                path.display()
            )),
        }
    }

    println!("  ✓ {} project document(s) resolved", records.len());

    if let Err(e) = guard::ensure_non_empty(&records) {
        result.add_error(e.to_string());
    }
    if let Err(e) = guard::enforce(&records) {
        result.add_error(e.to_string());
    }
}

/// Validate the shell template markers and the build manifest entry.
fn validate_shell(config: &Config, result: &mut ValidationResult) {
    match ShellTemplate::load(Path::new(&config.build.template)) {
        Ok(_) => println!("  ✓ Shell template valid"),
        Err(e) => {
            result.add_error(e.to_string());
            println!("  ✗ Shell template invalid");
        }
    }

    match BuildManifest::load(Path::new(&config.build.manifest)) {
        Ok(manifest) => match manifest.resolve(&config.build.entry) {
            Ok(file) => println!("  ✓ Manifest entry resolves to {file}"),
            Err(e) => {
                result.add_error(e.to_string());
                println!("  ✗ Manifest entry missing");
            }
        },
        Err(e) => {
            result.add_error(e.to_string());
            println!("  ✗ Build manifest invalid");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_result_accumulates() {
        let mut result = ValidationResult::default();
        assert!(!result.has_errors());
        assert!(!result.has_warnings());

        result.add_warning("something minor");
        assert!(result.has_warnings());
        assert!(!result.has_errors());

        result.add_error("something fatal");
        assert!(result.has_errors());
    }

    #[test]
    fn test_check_fails_on_missing_config() {
        let result = run(Path::new("/nonexistent/config.toml"), false);
        assert!(result.is_err());
    }
}
