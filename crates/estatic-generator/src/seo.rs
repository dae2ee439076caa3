//! SEO metadata and structured-data synthesis.
//!
//! Builds the per-page head block: title, description, canonical URL,
//! Open Graph/Twitter tags, and JSON-LD documents. Every JSON-LD block is
//! independent and optional; a block is only emitted when the content that
//! backs it exists, never fabricated.

use estatic_core::{Config, HeroMedia, ProjectRecord, ResolvedFaqItem};
use serde_json::{Value, json};
use tracing::debug;

/// Offer availability written for every priced plan. The upstream content
/// carries no live inventory state, so this stays fixed.
const OFFER_AVAILABILITY: &str = "https://schema.org/InStock";

/// Offer currency for priced plans.
const OFFER_CURRENCY: &str = "INR";

/// Per-slug preview image convention used when no hero media exists.
const PROJECT_PLACEHOLDER_DIR: &str = "/images/projects";

/// Generic preview image used as the final fallback.
const GENERIC_PLACEHOLDER: &str = "/images/placeholder.jpg";

/// A synthesized SEO block for one page.
#[derive(Debug, Clone)]
pub struct SeoBlock {
    /// Page title.
    pub title: String,

    /// Meta description.
    pub description: String,

    /// Canonical page URL (always ends with a slash).
    pub canonical_url: String,

    /// Absolute preview image URL for Open Graph/Twitter cards.
    pub image_url: String,

    /// JSON-LD documents, each tagged by `@type`.
    pub json_ld: Vec<Value>,
}

/// SEO synthesizer.
#[derive(Debug)]
pub struct SeoSynthesizer {
    config: Config,
}

impl SeoSynthesizer {
    /// Create a new synthesizer.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Synthesize the SEO block for a project page.
    #[must_use]
    pub fn project_seo(&self, record: &ProjectRecord, faqs: &[ResolvedFaqItem]) -> SeoBlock {
        debug!(slug = record.public_slug(), "synthesizing project SEO");

        let canonical_url = self.config.page_url(record.public_slug());
        let image_url = self.preview_image(record.hero.as_ref(), record.public_slug());

        let location = join_non_empty(
            &[record.locality.as_deref(), record.city.as_deref()],
            ", ",
        );
        let title = join_non_empty(
            &[
                Some(record.name.as_str()),
                non_empty(&location),
                Some(self.config.site.title.as_str()),
            ],
            " | ",
        );

        let by_builder = format!(" by {}", title_case(record.builder()));
        let in_location = non_empty(&location)
            .map(|l| format!(" in {l}"))
            .unwrap_or_default();
        let description = format!(
            "Explore {}{by_builder}{in_location}. View floor plans, pricing, photos and RERA details.",
            record.name
        );

        let mut json_ld = Vec::new();
        json_ld.push(self.breadcrumb_list(record));
        json_ld.push(self.apartment_complex(record, &canonical_url, &image_url));
        if let Some(product) = self.product_offers(record, &canonical_url) {
            json_ld.push(product);
        }
        if let Some(faq_page) = faq_page(faqs) {
            json_ld.push(faq_page);
        }

        SeoBlock {
            title,
            description,
            canonical_url,
            image_url,
            json_ld,
        }
    }

    /// Synthesize the SEO block for a builder hub page.
    #[must_use]
    pub fn hub_seo(&self, builder: &str, projects: &[&ProjectRecord]) -> SeoBlock {
        debug!(builder, projects = projects.len(), "synthesizing hub SEO");

        let display = title_case(builder);
        let canonical_url = self.config.page_url(builder);
        let image_url = projects
            .first()
            .map(|p| self.preview_image(p.hero.as_ref(), p.public_slug()))
            .unwrap_or_else(|| self.config.absolute_url(GENERIC_PLACEHOLDER));

        let title = format!("{display} Projects | {}", self.config.site.title);
        let description = format!(
            "Browse residential projects by {display}. Compare locations, floor plans and pricing."
        );

        let mut json_ld = vec![self.organization(&display, &canonical_url)];
        if let Some(item_list) = self.item_list(projects) {
            json_ld.push(item_list);
        }

        SeoBlock {
            title,
            description,
            canonical_url,
            image_url,
            json_ld,
        }
    }

    /// Resolve the preview image for an entity, following the strict
    /// fallback order: video thumbnail, first gallery image, per-slug
    /// placeholder. The result is always an absolute URL.
    #[must_use]
    pub fn preview_image(&self, hero: Option<&HeroMedia>, public_slug: &str) -> String {
        if let Some(hero) = hero {
            if let Some(video_id) = hero.video_id.as_deref() {
                if !video_id.is_empty() {
                    return format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg");
                }
            }
            if let Some(first) = hero.images.first() {
                if !first.is_empty() {
                    return self.config.absolute_url(first);
                }
            }
        }

        if public_slug.is_empty() {
            self.config.absolute_url(GENERIC_PLACEHOLDER)
        } else {
            self.config
                .absolute_url(&format!("{PROJECT_PLACEHOLDER_DIR}/{public_slug}.jpg"))
        }
    }

    /// BreadcrumbList: Home, then city and city+zone when present, then the
    /// current page entry (locality or project name) with no URL.
    fn breadcrumb_list(&self, record: &ProjectRecord) -> Value {
        let mut items = vec![json!({
            "@type": "ListItem",
            "position": 1,
            "name": "Home",
            "item": format!("{}/", self.config.origin()),
        })];

        if let Some(city) = non_empty_opt(record.city.as_deref()) {
            items.push(json!({
                "@type": "ListItem",
                "position": items.len() + 1,
                "name": city,
                "item": self.config.page_url(&slugify(city)),
            }));

            if let Some(zone) = non_empty_opt(record.zone.as_deref()) {
                items.push(json!({
                    "@type": "ListItem",
                    "position": items.len() + 1,
                    "name": format!("{zone}, {city}"),
                    "item": self
                        .config
                        .page_url(&format!("{}/{}", slugify(city), slugify(zone))),
                }));
            }
        }

        // The current page is always last and carries no URL.
        let leaf = non_empty_opt(record.locality.as_deref()).unwrap_or(&record.name);
        items.push(json!({
            "@type": "ListItem",
            "position": items.len() + 1,
            "name": leaf,
        }));

        json!({
            "@context": "https://schema.org",
            "@type": "BreadcrumbList",
            "itemListElement": items,
        })
    }

    /// ApartmentComplex: the primary per-project entity.
    fn apartment_complex(&self, record: &ProjectRecord, url: &str, image: &str) -> Value {
        let mut entity = json!({
            "@context": "https://schema.org",
            "@type": "ApartmentComplex",
            "name": record.name,
            "url": url,
            "image": image,
        });

        let mut address = serde_json::Map::new();
        address.insert("@type".to_string(), json!("PostalAddress"));
        if let Some(locality) = non_empty_opt(record.locality.as_deref()) {
            address.insert("streetAddress".to_string(), json!(locality));
        }
        if let Some(city) = non_empty_opt(record.city.as_deref()) {
            address.insert("addressLocality".to_string(), json!(city));
        }
        if address.len() > 1 {
            entity["address"] = Value::Object(address);
        }

        entity
    }

    /// Product with one Offer per priced unit plan. Emitted only when at
    /// least one plan carries a price.
    fn product_offers(&self, record: &ProjectRecord, url: &str) -> Option<Value> {
        let priced = record.priced_plans();
        if priced.is_empty() {
            return None;
        }

        let offers: Vec<Value> = priced
            .iter()
            .map(|plan| {
                json!({
                    "@type": "Offer",
                    "name": plan.title,
                    "price": plan.price,
                    "priceCurrency": OFFER_CURRENCY,
                    "availability": OFFER_AVAILABILITY,
                    "url": url,
                })
            })
            .collect();

        Some(json!({
            "@context": "https://schema.org",
            "@type": "Product",
            "name": record.name,
            "url": url,
            "offers": offers,
        }))
    }

    /// ItemList for a hub page; positions are 1-based and sequential.
    fn item_list(&self, projects: &[&ProjectRecord]) -> Option<Value> {
        if projects.is_empty() {
            return None;
        }

        let elements: Vec<Value> = projects
            .iter()
            .enumerate()
            .map(|(i, project)| {
                json!({
                    "@type": "ListItem",
                    "position": i + 1,
                    "name": project.name,
                    "url": self.config.page_url(project.public_slug()),
                })
            })
            .collect();

        Some(json!({
            "@context": "https://schema.org",
            "@type": "ItemList",
            "itemListElement": elements,
        }))
    }

    /// Organization context for a builder hub page.
    fn organization(&self, display_name: &str, url: &str) -> Value {
        json!({
            "@context": "https://schema.org",
            "@type": "Organization",
            "name": display_name,
            "url": url,
        })
    }

    /// Render the full head block: meta tags plus one `application/ld+json`
    /// script per JSON-LD document. JSON-LD is serialized, never
    /// string-concatenated.
    #[must_use]
    pub fn head_html(&self, block: &SeoBlock) -> String {
        let mut html = String::new();

        html.push_str(&format!("<title>{}</title>\n", escape_html(&block.title)));
        html.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape_html(&block.description)
        ));
        html.push_str(&format!(
            "<link rel=\"canonical\" href=\"{}\">\n",
            escape_html(&block.canonical_url)
        ));

        // Open Graph
        html.push_str(&format!(
            "<meta property=\"og:title\" content=\"{}\">\n",
            escape_html(&block.title)
        ));
        html.push_str(&format!(
            "<meta property=\"og:description\" content=\"{}\">\n",
            escape_html(&block.description)
        ));
        html.push_str(&format!(
            "<meta property=\"og:url\" content=\"{}\">\n",
            escape_html(&block.canonical_url)
        ));
        html.push_str(&format!(
            "<meta property=\"og:image\" content=\"{}\">\n",
            escape_html(&block.image_url)
        ));
        html.push_str("<meta property=\"og:type\" content=\"website\">\n");

        // Twitter
        html.push_str("<meta name=\"twitter:card\" content=\"summary_large_image\">\n");
        html.push_str(&format!(
            "<meta name=\"twitter:title\" content=\"{}\">\n",
            escape_html(&block.title)
        ));
        html.push_str(&format!(
            "<meta name=\"twitter:description\" content=\"{}\">\n",
            escape_html(&block.description)
        ));
        html.push_str(&format!(
            "<meta name=\"twitter:image\" content=\"{}\">\n",
            escape_html(&block.image_url)
        ));

        for doc in &block.json_ld {
            // Serialization cannot fail for json! values built above.
            let serialized = serde_json::to_string(doc).unwrap_or_default();
            html.push_str(&format!(
                "<script type=\"application/ld+json\">{}</script>\n",
                serialized.replace('<', "\\u003c")
            ));
        }

        html
    }
}

/// FAQPage block; only when the merged set is non-empty.
#[must_use]
pub fn faq_page(faqs: &[ResolvedFaqItem]) -> Option<Value> {
    if faqs.is_empty() {
        return None;
    }

    let entities: Vec<Value> = faqs
        .iter()
        .map(|faq| {
            json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": {
                    "@type": "Answer",
                    "text": faq.answer,
                },
            })
        })
        .collect();

    Some(json!({
        "@context": "https://schema.org",
        "@type": "FAQPage",
        "mainEntity": entities,
    }))
}

/// Escape a string for HTML attribute and text contexts.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// URL slug from a display string: lowercase, spaces to dashes.
fn slugify(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

/// Title-case a builder identifier for display: `dlf-homes` → `Dlf Homes`.
fn title_case(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn join_non_empty(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .filter_map(|p| *p)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn non_empty(s: &str) -> Option<&str> {
    if s.trim().is_empty() { None } else { Some(s) }
}

fn non_empty_opt(s: Option<&str>) -> Option<&str> {
    s.and_then(non_empty)
}
