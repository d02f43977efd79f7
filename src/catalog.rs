use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::CatalogError;

static DATA_DIR: Dir = include_dir!("src/data");
const BUNDLED_CATALOG: &str = "catalog.json";

/// Longest product name shown on a card before truncation
pub const CARD_NAME_WIDTH: usize = 40;
/// Products previewed on each hero slide
const HERO_PREVIEWS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub name: String,
    pub tagline: String,
    pub phone: String,
    pub email: String,
    pub website: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallToAction {
    pub primary: Link,
    pub secondary: Link,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
    pub currency: String,
    pub unit: String,
}

impl PriceRange {
    pub fn label(&self) -> String {
        if self.min == self.max {
            format!("{} {} / {}", self.currency, self.min, self.unit)
        } else {
            format!(
                "{} {} - {} / {}",
                self.currency, self.min, self.max, self.unit
            )
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<PriceRange>,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub applications: Vec<String>,
}

impl Product {
    fn spec(&self, key: &str) -> Option<&str> {
        self.specifications.get(key).map(String::as_str)
    }

    /// Three headline specs for cards, with fallbacks for missing fields
    pub fn highlights(&self) -> [String; 3] {
        [
            self.spec("flow_rate")
                .or(self.spec("pressure"))
                .unwrap_or("High Performance")
                .to_string(),
            self.spec("pressure")
                .or(self.spec("material"))
                .unwrap_or("Industrial Grade")
                .to_string(),
            self.spec("material")
                .or(self.spec("usage"))
                .unwrap_or("Premium Quality")
                .to_string(),
        ]
    }

    pub fn summary(&self) -> String {
        self.description.clone().unwrap_or_else(|| {
            format!(
                "High-quality {} for industrial applications",
                self.name.to_lowercase()
            )
        })
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub stats: Vec<Stat>,
    pub cta: Option<CallToAction>,
    pub items: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductPreview {
    pub slug: String,
    pub name: String,
    pub price: Option<PriceRange>,
    pub specs: [String; 3],
}

/// One hero carousel slide, built from a catalog category
#[derive(Debug, Clone, PartialEq)]
pub struct HeroSlide {
    pub category_slug: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub previews: Vec<ProductPreview>,
    pub stats: Vec<Stat>,
    pub cta: CallToAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum SortOrder {
    #[default]
    #[strum(serialize = "A-Z")]
    Ascending,
    #[strum(serialize = "Z-A")]
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub company: Company,
    pub categories: Vec<Category>,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn bundled() -> Result<Self, CatalogError> {
        let file = DATA_DIR
            .get_file(BUNDLED_CATALOG)
            .ok_or(CatalogError::MissingBundle(BUNDLED_CATALOG))?;
        let text = file
            .contents_utf8()
            .ok_or(CatalogError::MissingBundle(BUNDLED_CATALOG))?;
        Self::from_json(text)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse and reject catalogs that would leave a carousel with no slides
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(text)?;
        if catalog.categories.is_empty() {
            return Err(CatalogError::Empty("categories"));
        }
        if catalog.categories.iter().all(|c| c.items.is_empty()) {
            return Err(CatalogError::Empty("products"));
        }
        Ok(catalog)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Every product in category order, as shown in the hot-deals strip
    pub fn hot_deals(&self) -> Vec<&Product> {
        self.products().collect()
    }

    pub fn hero_slides(&self) -> Vec<HeroSlide> {
        self.categories
            .iter()
            .map(|category| HeroSlide {
                category_slug: category.slug.clone(),
                title: category.name.clone(),
                subtitle: format!("{} Premium Solutions", self.company.name),
                description: category.description.clone(),
                previews: category
                    .items
                    .iter()
                    .take(HERO_PREVIEWS)
                    .map(|p| ProductPreview {
                        slug: p.slug.clone(),
                        name: p.name.clone(),
                        price: p.price.clone(),
                        specs: p.highlights(),
                    })
                    .collect(),
                stats: category.stats.clone(),
                cta: category.cta.clone().unwrap_or_else(|| CallToAction {
                    primary: Link {
                        text: "View Products".to_string(),
                        href: format!("/category/{}", category.slug),
                    },
                    secondary: Link {
                        text: "Contact Us".to_string(),
                        href: "/contact".to_string(),
                    },
                }),
            })
            .collect()
    }

    pub fn find_product(&self, slug: &str) -> Option<&Product> {
        self.products().find(|p| p.slug == slug)
    }

    pub fn find_category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    pub fn category_of(&self, product_slug: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.items.iter().any(|p| p.slug == product_slug))
    }

    /// Case-insensitive substring match over name and description, sorted by name
    pub fn search(&self, term: &str, order: SortOrder) -> Vec<&Product> {
        let needle = term.trim().to_lowercase();
        let mut found: Vec<&Product> = self
            .products()
            .filter(|p| needle.is_empty() || p.matches(&needle))
            .collect();
        found.sort_by(|a, b| {
            let cmp = a.name.to_lowercase().cmp(&b.name.to_lowercase());
            match order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });
        found
    }

    pub fn product_url(&self, product: &Product) -> String {
        format!(
            "{}/product/{}",
            self.company.website.trim_end_matches('/'),
            product.slug
        )
    }
}

/// Truncate to `max` display columns, appending "..." when shortened
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.width() <= max {
        return name.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in name.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.categories.len(), 4);
        assert_eq!(catalog.hot_deals().len(), 12);
    }

    #[test]
    fn hero_slides_follow_category_order() {
        let catalog = Catalog::bundled().unwrap();
        let slides = catalog.hero_slides();
        assert_eq!(slides.len(), 4);
        assert_eq!(slides[0].category_slug, "electro-actuated-pumps");
        assert!(slides.iter().all(|s| s.previews.len() <= 2));
        assert_eq!(slides[3].stats.len(), 4);
    }

    #[test]
    fn highlights_fall_back_when_specs_missing() {
        let product = Product {
            id: "x".into(),
            slug: "x".into(),
            name: "X".into(),
            description: None,
            price: None,
            specifications: BTreeMap::new(),
            features: vec![],
            applications: vec![],
        };
        assert_eq!(
            product.highlights(),
            [
                "High Performance".to_string(),
                "Industrial Grade".to_string(),
                "Premium Quality".to_string()
            ]
        );
        assert_eq!(product.summary(), "High-quality x for industrial applications");
    }

    #[test]
    fn highlights_prefer_flow_rate_then_pressure() {
        let catalog = Catalog::bundled().unwrap();
        let pump = catalog
            .find_product("compact-mechanical-dosing-pump")
            .unwrap();
        let [first, second, third] = pump.highlights();
        assert_eq!(first, "5 bar");
        assert_eq!(second, "5 bar");
        assert_eq!(third, "PP");
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let catalog = Catalog::bundled().unwrap();
        let hits = catalog.search("PLUNGER", SortOrder::Ascending);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|p| {
            p.name.to_lowercase().contains("plunger")
                || p.summary().to_lowercase().contains("plunger")
        }));
    }

    #[test]
    fn search_empty_term_returns_everything_sorted() {
        let catalog = Catalog::bundled().unwrap();
        let asc = catalog.search("", SortOrder::Ascending);
        let desc = catalog.search("  ", SortOrder::Descending);
        assert_eq!(asc.len(), 12);
        assert_eq!(asc.first().map(|p| &p.slug), desc.last().map(|p| &p.slug));
    }

    #[test]
    fn search_without_hits_is_empty() {
        let catalog = Catalog::bundled().unwrap();
        assert!(catalog.search("turbine", SortOrder::Ascending).is_empty());
    }

    #[test]
    fn category_lookup_by_product() {
        let catalog = Catalog::bundled().unwrap();
        let cat = catalog.category_of("triplex-plunger-pump").unwrap();
        assert_eq!(cat.slug, "plunger-pumps");
        assert!(catalog.find_category("nope").is_none());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let json = r#"{"company":{"name":"a","tagline":"b","phone":"c","email":"d","website":"e"},"categories":[]}"#;
        assert_matches!(Catalog::from_json(json), Err(CatalogError::Empty("categories")));
    }

    #[test]
    fn catalog_without_products_is_rejected() {
        let json = r#"{"company":{"name":"a","tagline":"b","phone":"c","email":"d","website":"e"},
            "categories":[{"slug":"s","name":"n","description":"d","cta":null,"items":[]}]}"#;
        assert_matches!(Catalog::from_json(json), Err(CatalogError::Empty("products")));
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        assert_matches!(Catalog::from_json("{"), Err(CatalogError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let res = Catalog::from_path(dir.path().join("missing.json"));
        assert_matches!(res, Err(CatalogError::Io { .. }));
    }

    #[test]
    fn price_label_formats_range() {
        let price = PriceRange {
            min: 10,
            max: 20,
            currency: "INR".into(),
            unit: "piece".into(),
        };
        assert_eq!(price.label(), "INR 10 - 20 / piece");
    }

    #[test]
    fn product_url_joins_website_and_slug() {
        let catalog = Catalog::bundled().unwrap();
        let pump = catalog.find_product("triplex-plunger-pump").unwrap();
        assert_eq!(
            catalog.product_url(pump),
            "https://aquaflow-pumps.example/product/triplex-plunger-pump"
        );
    }

    #[test]
    fn truncate_name_appends_ellipsis() {
        assert_eq!(truncate_name("short", 40), "short");
        assert_eq!(truncate_name("abcdefghij", 4), "abcd...");
    }
}
