//! Project content records.
//!
//! A [`ProjectRecord`] is the resolved form of one content document: its
//! canonical identity plus the descriptive fields the generator needs. The
//! full raw document is kept alongside for payload injection into the shell.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::faq::FaqItem;
use crate::identity::{ProjectIdentity, resolve_identity};

/// Hero media attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroMedia {
    /// Video identifier on the hosting platform, when a walkthrough exists.
    #[serde(default)]
    pub video_id: Option<String>,

    /// Gallery image URLs, possibly relative to the site origin.
    #[serde(default)]
    pub images: Vec<String>,
}

/// A unit plan offered within a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnitPlan {
    /// Display title, e.g. "3 BHK Premium".
    #[serde(default)]
    pub title: String,

    /// Asking price in whole currency units. A plan is "priced" when set.
    #[serde(default)]
    pub price: Option<u64>,

    /// Carpet area in square feet.
    #[serde(default)]
    pub area_sqft: Option<f64>,
}

impl UnitPlan {
    /// Whether this plan carries a price.
    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.price.is_some()
    }
}

/// A resolved project: identity, source file name, and descriptive metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Canonical identity.
    pub identity: ProjectIdentity,

    /// Relative source file name, tracked only for the flat-file layout.
    /// The legacy folder layout leaves this unset, which also bypasses the
    /// filename consistency invariant.
    pub file_name: Option<String>,

    /// Display name. Falls back to the slug when the document has none.
    pub name: String,

    /// City the project is located in.
    pub city: Option<String>,

    /// Zone within the city.
    pub zone: Option<String>,

    /// Locality or neighbourhood.
    pub locality: Option<String>,

    /// Hero media for previews.
    pub hero: Option<HeroMedia>,

    /// Unit plans, priced or not.
    pub unit_plans: Vec<UnitPlan>,

    /// Project-tier FAQ items from the document's `faq.faqs` array.
    pub faqs: Vec<FaqItem>,

    /// The full raw document, injected verbatim into the page payload.
    pub document: Value,
}

impl ProjectRecord {
    /// Resolve a record from a raw document.
    ///
    /// Returns `None` when the document yields no identity; callers decide
    /// whether that is fatal. `file_name` should be the bare relative file
    /// name for flat-file sources and `None` for the folder layout.
    #[must_use]
    pub fn from_document(document: Value, file_name: Option<String>) -> Option<Self> {
        let identity = resolve_identity(&document)?;

        // Descriptive fields follow the same shape tolerance as identity:
        // the nested `project` object wins, the root is the fallback.
        let name = field_str(&document, "name")
            .unwrap_or(&identity.slug)
            .to_string();
        let city = field_str(&document, "city").map(str::to_string);
        let zone = field_str(&document, "zone").map(str::to_string);
        let locality = field_str(&document, "locality").map(str::to_string);

        let hero = field(&document, "hero")
            .and_then(|v| serde_json::from_value::<HeroMedia>(v.clone()).ok());

        let unit_plans = field(&document, "unit_plans")
            .and_then(Value::as_array)
            .map(|plans| {
                plans
                    .iter()
                    .filter_map(|p| serde_json::from_value::<UnitPlan>(p.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        let faqs = field(&document, "faq")
            .and_then(|f| f.get("faqs"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| serde_json::from_value::<FaqItem>(i.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            identity,
            file_name,
            name,
            city,
            zone,
            locality,
            hero,
            unit_plans,
            faqs,
            document,
        })
    }

    /// Public URL path segment for this project.
    #[must_use]
    pub fn public_slug(&self) -> &str {
        &self.identity.public_slug
    }

    /// Builder identifier for this project.
    #[must_use]
    pub fn builder(&self) -> &str {
        &self.identity.builder
    }

    /// Unit plans that carry a price.
    #[must_use]
    pub fn priced_plans(&self) -> Vec<&UnitPlan> {
        self.unit_plans.iter().filter(|p| p.is_priced()).collect()
    }
}

/// Look up a field under the nested `project` object, then the root.
fn field<'a>(doc: &'a Value, key: &str) -> Option<&'a Value> {
    doc.get("project")
        .and_then(|p| p.get(key))
        .or_else(|| doc.get(key))
}

fn field_str<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
    match field(doc, key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_document() -> Value {
        json!({
            "slug": "skyline",
            "builder": "acme",
            "name": "Acme Skyline",
            "city": "Pune",
            "locality": "Baner",
            "hero": {
                "video_id": "abc123",
                "images": ["/images/skyline/1.jpg"]
            },
            "unit_plans": [
                { "title": "2 BHK", "price": 8500000, "area_sqft": 1050.0 },
                { "title": "3 BHK", "area_sqft": 1450.0 }
            ],
            "faq": {
                "faqs": [
                    { "question": "Is the project RERA registered?", "answer": "Yes." }
                ]
            }
        })
    }

    #[test]
    fn test_from_document_flat_file() {
        let record =
            ProjectRecord::from_document(sample_document(), Some("acme-skyline.json".to_string()))
                .expect("record");

        assert_eq!(record.public_slug(), "acme-skyline");
        assert_eq!(record.name, "Acme Skyline");
        assert_eq!(record.city.as_deref(), Some("Pune"));
        assert_eq!(record.locality.as_deref(), Some("Baner"));
        assert_eq!(record.file_name.as_deref(), Some("acme-skyline.json"));
        assert_eq!(record.unit_plans.len(), 2);
        assert_eq!(record.priced_plans().len(), 1);
        assert_eq!(record.faqs.len(), 1);
        assert_eq!(
            record.hero.as_ref().and_then(|h| h.video_id.as_deref()),
            Some("abc123")
        );
    }

    #[test]
    fn test_from_document_nested_project() {
        let doc = json!({
            "project": {
                "slug": "heights",
                "builder": "beta",
                "name": "Beta Heights",
                "city": "Mumbai"
            }
        });
        let record = ProjectRecord::from_document(doc, None).expect("record");

        assert_eq!(record.public_slug(), "beta-heights");
        assert_eq!(record.name, "Beta Heights");
        assert_eq!(record.city.as_deref(), Some("Mumbai"));
        assert!(record.file_name.is_none());
    }

    #[test]
    fn test_name_falls_back_to_slug() {
        let doc = json!({ "slug": "skyline", "builder": "acme" });
        let record = ProjectRecord::from_document(doc, None).expect("record");
        assert_eq!(record.name, "skyline");
    }

    #[test]
    fn test_document_without_identity_yields_none() {
        let doc = json!({ "name": "Orphan" });
        assert!(ProjectRecord::from_document(doc, None).is_none());
    }
}
