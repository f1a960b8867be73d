//! Draw catalogs: weighted categories and the entries they partition.
//!
//! A catalog is validated once, when it is built. After that every
//! category is known to have a positive weight and at least one entry, so
//! draws never need to handle a configuration error.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::random::RandomSource;
use crate::select::{select_category, select_entry};

/// A weighted bucket of draw entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category id.
    pub id: String,
    /// Relative weight. Must be positive and finite.
    pub weight: f64,
}

impl Category {
    /// Create a category.
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }
}

/// One drawable item: a crystal ball effect, a tarot card, an ouija answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawEntry {
    /// Unique id within the catalog.
    pub id: String,
    /// The category this entry belongs to.
    pub category_id: String,
    /// Short title shown to the user.
    pub display_text: String,
    /// Longer descriptive text.
    pub flavor_text: String,
    /// Text merged into the host conversation when this entry is drawn.
    pub injection_text: String,
    /// Alternate reading used when the entry is drawn reversed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reversed_text: Option<String>,
}

impl DrawEntry {
    /// Create an entry without a reversed reading.
    pub fn new(
        id: impl Into<String>,
        category_id: impl Into<String>,
        display_text: impl Into<String>,
        flavor_text: impl Into<String>,
        injection_text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            display_text: display_text.into(),
            flavor_text: flavor_text.into(),
            injection_text: injection_text.into(),
            reversed_text: None,
        }
    }

    /// Attach a reversed reading.
    pub fn with_reversed(mut self, text: impl Into<String>) -> Self {
        self.reversed_text = Some(text.into());
        self
    }
}

/// Informational numbers about one category of a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStats {
    /// Category id.
    pub id: String,
    /// Configured weight.
    pub weight: f64,
    /// Number of entries in the category.
    pub count: usize,
    /// Probability that a draw lands in this category.
    pub share: f64,
}

#[derive(Deserialize)]
struct CatalogDocument {
    categories: Vec<Category>,
    entries: Vec<DrawEntry>,
}

/// A validated, immutable set of categories and entries.
///
/// Categories keep their declaration order, which fixes how the weighted
/// selector partitions probability mass.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
    entries: Vec<DrawEntry>,
}

impl Catalog {
    /// Build and validate a catalog.
    pub fn new(categories: Vec<Category>, entries: Vec<DrawEntry>) -> CoreResult<Self> {
        if categories.is_empty() {
            return Err(CoreError::NoCategories);
        }

        let mut category_ids = HashSet::new();
        for category in &categories {
            if !category.weight.is_finite() || category.weight <= 0.0 {
                return Err(CoreError::InvalidWeight {
                    category: category.id.clone(),
                    weight: category.weight,
                });
            }
            if !category_ids.insert(category.id.as_str()) {
                return Err(CoreError::DuplicateCategory(category.id.clone()));
            }
        }

        let mut entry_ids = HashSet::new();
        for entry in &entries {
            if !entry_ids.insert(entry.id.as_str()) {
                return Err(CoreError::DuplicateEntry(entry.id.clone()));
            }
            if !category_ids.contains(entry.category_id.as_str()) {
                return Err(CoreError::UnknownCategory {
                    entry: entry.id.clone(),
                    category: entry.category_id.clone(),
                });
            }
        }

        for category in &categories {
            if !entries.iter().any(|e| e.category_id == category.id) {
                return Err(CoreError::EmptyCategory(category.id.clone()));
            }
        }

        tracing::debug!(
            categories = categories.len(),
            entries = entries.len(),
            "catalog loaded"
        );

        Ok(Self {
            categories,
            entries,
        })
    }

    /// Parse and validate a catalog from a JSON document of the form
    /// `{ "categories": [...], "entries": [...] }`.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::new(doc.categories, doc.entries)
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[DrawEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: &str) -> Option<&DrawEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries belonging to one category.
    pub fn entries_in<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a DrawEntry> {
        self.entries
            .iter()
            .filter(move |e| e.category_id == category_id)
    }

    /// Sum of all category weights.
    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|c| c.weight).sum()
    }

    /// Per-category weight, entry count, and probability share.
    pub fn pool_stats(&self) -> Vec<CategoryStats> {
        let total = self.total_weight();
        self.categories
            .iter()
            .map(|c| CategoryStats {
                id: c.id.clone(),
                weight: c.weight,
                count: self.entries_in(&c.id).count(),
                share: c.weight / total,
            })
            .collect()
    }

    /// Pick a category by weight, then an entry uniformly within it.
    pub fn draw(&self, rng: &mut dyn RandomSource) -> &DrawEntry {
        // Validation guarantees both picks succeed.
        let category = select_category(&self.categories, rng)
            .map(|c| c.id.as_str())
            .unwrap_or_default();
        select_entry(&self.entries, category, rng).unwrap_or(&self.entries[0])
    }
}
