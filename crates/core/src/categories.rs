//! Game categories: the closed tag set, its display catalog and per-row flags

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Play-mode category of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Single,
    Multi,
    Coop,
    Pvp,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [Category::Single, Category::Multi, Category::Coop, Category::Pvp];

    /// Stable key used in exported data and filter models
    pub fn key(&self) -> &'static str {
        match self {
            Category::Single => "single",
            Category::Multi => "multi",
            Category::Coop => "coop",
            Category::Pvp => "pvp",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Category::Single => "Single-player",
            Category::Multi => "Multi-player",
            Category::Coop => "Co-op",
            Category::Pvp => "PvP",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| FilterError::UnknownCategory(s.to_string()))
    }
}

/// One offered category with the label shown for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: Category,
    pub label: String,
}

/// The categories a filter offers, in order, with their labels.
///
/// Shared read-only between a column's filter and its floating filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    entries: Vec<CategoryEntry>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(Category::ALL)
    }
}

impl CategoryCatalog {
    /// Catalog offering the given categories with their default labels.
    /// Duplicates are dropped; the order of first appearance is kept.
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut entries: Vec<CategoryEntry> = Vec::new();
        for category in categories {
            if entries.iter().any(|e| e.category == category) {
                continue;
            }
            entries.push(CategoryEntry {
                category,
                label: category.default_label().to_string(),
            });
        }
        Self { entries }
    }

    /// Replace labels of offered categories; overrides for categories not offered are ignored
    pub fn with_labels(mut self, labels: &BTreeMap<Category, String>) -> Self {
        for entry in &mut self.entries {
            if let Some(label) = labels.get(&entry.category) {
                entry.label = label.clone();
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.entries.iter().any(|e| e.category == category)
    }

    pub fn label(&self, category: Category) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.label.as_str())
    }

    /// Resolve a filter model string.
    ///
    /// The empty string means "no filter". Anything else must be the key of an
    /// offered category.
    pub fn resolve(&self, model: &str) -> Result<Option<Category>, FilterError> {
        if model.is_empty() {
            return Ok(None);
        }
        let category: Category = model.parse()?;
        if self.contains(category) {
            Ok(Some(category))
        } else {
            Err(FilterError::UnknownCategory(model.to_string()))
        }
    }

    /// Check a typed model against the offered categories
    pub fn validate(&self, model: Option<Category>) -> Result<Option<Category>, FilterError> {
        match model {
            Some(category) if !self.contains(category) => {
                Err(FilterError::UnknownCategory(category.key().to_string()))
            }
            other => Ok(other),
        }
    }
}

/// Category flags of one game. A category not listed reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, RawFlag>")]
pub struct CategorySet {
    flags: BTreeMap<Category, bool>,
}

/// A flag as exported: anything but a bool counts as not listed
#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Flag(bool),
    Other(IgnoredAny),
}

impl From<BTreeMap<String, RawFlag>> for CategorySet {
    fn from(raw: BTreeMap<String, RawFlag>) -> Self {
        let mut flags = BTreeMap::new();
        for (key, value) in raw {
            let Ok(category) = key.parse::<Category>() else {
                tracing::debug!(key = %key, "dropping unknown category flag");
                continue;
            };
            match value {
                RawFlag::Flag(flag) => {
                    flags.insert(category, flag);
                }
                RawFlag::Other(_) => tracing::debug!(key = %key, "dropping non-boolean category flag"),
            }
        }
        Self { flags }
    }
}

impl FromIterator<(Category, bool)> for CategorySet {
    fn from_iter<I: IntoIterator<Item = (Category, bool)>>(iter: I) -> Self {
        Self { flags: iter.into_iter().collect() }
    }
}

impl CategorySet {
    /// `Some(flag)` when the category is listed, `None` when it is not
    pub fn get(&self, category: Category) -> Option<bool> {
        self.flags.get(&category).copied()
    }

    pub fn contains(&self, category: Category) -> bool {
        self.get(category).unwrap_or(false)
    }
}

/// Rows the category filter can test
pub trait CategoryRow {
    /// The row's category flags, or `None` when the row has no category data
    fn categories(&self) -> Option<&CategorySet>;
}

/// Whether a possibly missing set has the category. Missing data reads as `false`.
pub fn has_category(set: Option<&CategorySet>, category: Category) -> bool {
    set.map(|s| s.contains(category)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.key().parse::<Category>(), Ok(category));
        }
        assert!("Single".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_default_catalog_order_and_labels() {
        let catalog = CategoryCatalog::default();
        let labels: Vec<&str> = catalog.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Single-player", "Multi-player", "Co-op", "PvP"]);
    }

    #[test]
    fn test_resolve() {
        let catalog = CategoryCatalog::new([Category::Single, Category::Coop]);
        assert_eq!(catalog.resolve(""), Ok(None));
        assert_eq!(catalog.resolve("coop"), Ok(Some(Category::Coop)));
        assert!(catalog.resolve("pvp").is_err()); // known but not offered
        assert!(catalog.resolve("bogus").is_err());
        assert!(catalog.validate(Some(Category::Multi)).is_err());
        assert_eq!(catalog.validate(None), Ok(None));
    }

    #[test]
    fn test_duplicates_and_label_overrides() {
        let mut labels = BTreeMap::new();
        labels.insert(Category::Pvp, "Versus".to_string());
        labels.insert(Category::Multi, "Ignored".to_string());
        let catalog = CategoryCatalog::new([Category::Pvp, Category::Single, Category::Pvp]).with_labels(&labels);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.label(Category::Pvp), Some("Versus"));
        assert_eq!(catalog.label(Category::Multi), None);
    }

    #[test]
    fn test_category_set_three_way_read() {
        let set: CategorySet = [(Category::Single, true), (Category::Pvp, false)].into_iter().collect();
        assert_eq!(set.get(Category::Single), Some(true));
        assert_eq!(set.get(Category::Pvp), Some(false));
        assert_eq!(set.get(Category::Coop), None);
        assert!(set.contains(Category::Single));
        assert!(!set.contains(Category::Coop));
        assert!(!has_category(None, Category::Single));
        assert!(has_category(Some(&set), Category::Single));
    }

    #[test]
    fn test_category_set_drops_unknown_keys() {
        let set: CategorySet = serde_json::from_str(r#"{"single": true, "vr": true, "coop": false}"#).unwrap();
        assert!(set.contains(Category::Single));
        assert_eq!(set.get(Category::Coop), Some(false));
        assert_eq!(set.get(Category::Multi), None);
    }

    #[test]
    fn test_category_set_drops_non_boolean_flags() {
        let set: CategorySet =
            serde_json::from_str(r#"{"single": null, "multi": 1, "coop": "yes", "pvp": true}"#).unwrap();
        assert_eq!(set.get(Category::Single), None);
        assert_eq!(set.get(Category::Multi), None);
        assert_eq!(set.get(Category::Coop), None);
        assert!(set.contains(Category::Pvp));
    }
}
