//! FAQ model and tiered merge.
//!
//! FAQ content comes from three independent tiers: a site-wide universal
//! set, a per-builder set, and a per-project set. [`merge_faqs`] collapses
//! them into one deduplicated sequence where the highest tier wins.

use serde::{Deserialize, Serialize};

/// A raw FAQ entry as authored in a content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqItem {
    /// Question text as authored.
    pub question: String,

    /// Answer markup or plain text.
    pub answer: String,

    /// Optional category label.
    #[serde(default)]
    pub category: Option<String>,
}

/// Source tier of an FAQ entry. Higher tiers win on duplicate questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaqTier {
    /// Site-wide entries from `global/faq.json`.
    Universal,
    /// Per-builder entries from `builders/<builder>/builder_faq.json`.
    Builder,
    /// Entries authored on the project document itself.
    Project,
}

impl FaqTier {
    /// Merge priority; higher values win on duplicate questions.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            Self::Universal => 0,
            Self::Builder => 1,
            Self::Project => 2,
        }
    }

    /// Lowercase tier name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Universal => "universal",
            Self::Builder => "builder",
            Self::Project => "project",
        }
    }
}

/// An FAQ entry after normalization and tier tagging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedFaqItem {
    /// Question text, original casing from the winning tier.
    pub question: String,

    /// Answer from the winning tier.
    pub answer: String,

    /// Normalized category; "General" when the source had none.
    pub category: String,

    /// Tier the surviving entry came from.
    pub tier: FaqTier,
}

impl ResolvedFaqItem {
    fn from_item(item: &FaqItem, tier: FaqTier) -> Self {
        let category = item
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or("General")
            .to_string();

        Self {
            question: item.question.clone(),
            answer: item.answer.clone(),
            category,
            tier,
        }
    }
}

/// Dedup key: trimmed, case-folded question text.
fn question_key(question: &str) -> String {
    question.trim().to_lowercase()
}

/// Merge the three FAQ tiers into one deduplicated, deterministic sequence.
///
/// Duplicate questions (matched case-insensitively on trimmed text) keep the
/// highest-tier occurrence: project beats builder beats universal. Output
/// order is tier priority first, original order within a tier second. The
/// merge walks tiers highest-priority-first with first-seen-wins, so the
/// result does not depend on any map's iteration order.
#[must_use]
pub fn merge_faqs(
    universal: &[FaqItem],
    builder: &[FaqItem],
    project: &[FaqItem],
) -> Vec<ResolvedFaqItem> {
    let tiers = [
        (FaqTier::Project, project),
        (FaqTier::Builder, builder),
        (FaqTier::Universal, universal),
    ];

    let mut seen = std::collections::HashSet::new();
    let mut merged = Vec::new();

    for (tier, items) in tiers {
        for item in items {
            let key = question_key(&item.question);
            if key.is_empty() || !seen.insert(key) {
                continue;
            }
            merged.push(ResolvedFaqItem::from_item(item, tier));
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(question: &str, answer: &str) -> FaqItem {
        FaqItem {
            question: question.to_string(),
            answer: answer.to_string(),
            category: None,
        }
    }

    #[test]
    fn test_project_tier_wins() {
        let universal = vec![item("Q1", "U")];
        let builder = vec![item("Q1", "B")];
        let project = vec![item("Q1", "P")];

        let merged = merge_faqs(&universal, &builder, &project);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].answer, "P");
        assert_eq!(merged[0].tier, FaqTier::Project);
    }

    #[test]
    fn test_builder_beats_universal() {
        let universal = vec![item("Q1", "U")];
        let builder = vec![item("Q1", "B")];

        let merged = merge_faqs(&universal, &builder, &[]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].answer, "B");
        assert_eq!(merged[0].tier, FaqTier::Builder);
    }

    #[test]
    fn test_dedup_is_case_insensitive_and_trimmed() {
        let universal = vec![item("What is RERA?", "Regulator.")];
        let project = vec![item("  what is rera? ", "The real estate regulator.")];

        let merged = merge_faqs(&universal, &[], &project);

        assert_eq!(merged.len(), 1);
        // Winning tier's casing is preserved as stored.
        assert_eq!(merged[0].question, "  what is rera? ");
        assert_eq!(merged[0].answer, "The real estate regulator.");
    }

    #[test]
    fn test_output_order_is_tier_then_original() {
        let universal = vec![item("U1", "u1"), item("U2", "u2")];
        let builder = vec![item("B1", "b1")];
        let project = vec![item("P1", "p1"), item("P2", "p2")];

        let merged = merge_faqs(&universal, &builder, &project);
        let questions: Vec<_> = merged.iter().map(|m| m.question.as_str()).collect();

        assert_eq!(questions, vec!["P1", "P2", "B1", "U1", "U2"]);
    }

    #[test]
    fn test_category_normalization() {
        let project = vec![
            FaqItem {
                question: "Q1".to_string(),
                answer: "A1".to_string(),
                category: Some("  Pricing  ".to_string()),
            },
            FaqItem {
                question: "Q2".to_string(),
                answer: "A2".to_string(),
                category: Some("   ".to_string()),
            },
            item("Q3", "A3"),
        ];

        let merged = merge_faqs(&[], &[], &project);

        assert_eq!(merged[0].category, "Pricing");
        assert_eq!(merged[1].category, "General");
        assert_eq!(merged[2].category, "General");
    }

    #[test]
    fn test_empty_tiers_yield_empty_set() {
        assert!(merge_faqs(&[], &[], &[]).is_empty());
    }

    #[test]
    fn test_tier_priority_ordering() {
        assert!(FaqTier::Project.priority() > FaqTier::Builder.priority());
        assert!(FaqTier::Builder.priority() > FaqTier::Universal.priority());
        assert_eq!(FaqTier::Project.as_str(), "project");
    }
}
