//! Inventory view filtering: search substring plus category selection.

use crate::models::{Category, Ingredient};

/// Category side of the filter; `All` is the sentinel that disables it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(Category),
}

/// Decides whether an ingredient is included in the inventory view.
///
/// The search term matches case-insensitively against the name only. The
/// category matches either the primary category exactly or any tag
/// case-insensitively, so dual-axis items (frozen chicken filed under
/// Protein) surface under both filters. That broadening is intentional.
#[derive(Clone, Debug, Default)]
pub struct InventoryFilter {
    pub search: String,
    pub category: CategoryFilter,
}

impl InventoryFilter {
    pub fn matches(&self, ingredient: &Ingredient) -> bool {
        self.matches_search(ingredient) && self.matches_category(ingredient)
    }

    fn matches_search(&self, ingredient: &Ingredient) -> bool {
        ingredient
            .name
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    fn matches_category(&self, ingredient: &Ingredient) -> bool {
        match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Category(category) => {
                if ingredient.category == category {
                    return true;
                }
                let wanted = category.as_str().to_lowercase();
                ingredient.tags.iter().any(|tag| *tag == wanted)
            }
        }
    }
}
