//! Category / Menu Model

use super::product::{ItemId, MenuItem};
use serde::{Deserialize, Serialize};

/// Menu category: an ordered group of items
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// Full menu: ordered categories
///
/// `categories` has no serde default: a blob without the grouping
/// fails to parse and is treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    pub categories: Vec<Category>,
}

impl Menu {
    /// Iterate every item across categories, in menu order
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Number of items across categories
    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Ids that appear more than once. Lookups take the first match, so any
    /// entry here shadows a later item.
    pub fn duplicate_ids(&self) -> Vec<ItemId> {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for item in self.items() {
            if !seen.insert(item.id.as_str()) && !dups.contains(&item.id) {
                dups.push(item.id.clone());
            }
        }
        dups
    }
}
