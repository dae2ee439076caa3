//! Cross-document invariant guard.
//!
//! Validates the whole collected set of project records before any output
//! is written. The guard fails fast: the first violation aborts the build,
//! naming the offending record. These are data-authoring defects, never
//! downgraded to warnings.

use std::collections::HashSet;

use estatic_core::ProjectRecord;
use thiserror::Error;
use tracing::debug;

/// Invariant violations.
#[derive(Debug, Error)]
pub enum GuardError {
    /// Two records share the same public slug.
    #[error("duplicate public slug: {public_slug}")]
    DuplicateSlug { public_slug: String },

    /// A flat-file record's file name does not match its public slug.
    #[error("file name mismatch for {public_slug}: expected {expected}, found {actual}")]
    FileNameMismatch {
        public_slug: String,
        expected: String,
        actual: String,
    },

    /// The discovered project set is empty.
    #[error("no valid projects discovered; refusing to build an empty site")]
    NoProjects,
}

/// Result type for guard operations.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Enforce the cross-document invariants over the full ordered collection.
///
/// 1. Public slugs are globally unique.
/// 2. When a record tracks a source file name (flat-file layout), it must
///    equal `"{public_slug}.json"` exactly. Records without a tracked name
///    (legacy folder layout) bypass this check by construction.
pub fn enforce(records: &[ProjectRecord]) -> Result<()> {
    debug!(count = records.len(), "enforcing invariants");

    let mut seen = HashSet::new();

    for record in records {
        let public_slug = record.public_slug();

        if !seen.insert(public_slug.to_string()) {
            return Err(GuardError::DuplicateSlug {
                public_slug: public_slug.to_string(),
            });
        }

        if let Some(actual) = &record.file_name {
            let expected = record.identity.expected_file_name();
            if *actual != expected {
                return Err(GuardError::FileNameMismatch {
                    public_slug: public_slug.to_string(),
                    expected,
                    actual: actual.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Build-level policy: a build that discovers zero valid projects must abort
/// rather than silently emit an empty site. Callers invoke this alongside
/// [`enforce`].
pub fn ensure_non_empty(records: &[ProjectRecord]) -> Result<()> {
    if records.is_empty() {
        return Err(GuardError::NoProjects);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(builder: &str, slug: &str, file_name: Option<&str>) -> ProjectRecord {
        ProjectRecord::from_document(
            json!({ "slug": slug, "builder": builder }),
            file_name.map(str::to_string),
        )
        .expect("record")
    }

    #[test]
    fn test_unique_set_passes() {
        let records = vec![
            record("acme", "skyline", Some("acme-skyline.json")),
            record("beta", "heights", Some("beta-heights.json")),
        ];
        assert!(enforce(&records).is_ok());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let records = vec![record("x", "a", None), record("x", "a", None)];

        let err = enforce(&records).unwrap_err();
        match err {
            GuardError::DuplicateSlug { public_slug } => assert_eq!(public_slug, "x-a"),
            other => panic!("expected DuplicateSlug, got {other}"),
        }
    }

    #[test]
    fn test_file_name_mismatch_rejected() {
        let records = vec![record("x", "a", Some("x-b.json"))];

        let err = enforce(&records).unwrap_err();
        match err {
            GuardError::FileNameMismatch {
                public_slug,
                expected,
                actual,
            } => {
                assert_eq!(public_slug, "x-a");
                assert_eq!(expected, "x-a.json");
                assert_eq!(actual, "x-b.json");
            }
            other => panic!("expected FileNameMismatch, got {other}"),
        }
    }

    #[test]
    fn test_untracked_file_name_bypasses_check() {
        // Legacy folder layout carries no file name, so only uniqueness applies.
        let records = vec![record("x", "a", None)];
        assert!(enforce(&records).is_ok());
    }

    #[test]
    fn test_empty_set_policy() {
        assert!(matches!(ensure_non_empty(&[]), Err(GuardError::NoProjects)));
        assert!(ensure_non_empty(&[record("x", "a", None)]).is_ok());
    }
}
