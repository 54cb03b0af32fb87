//! Tag engine - derives the canonical persisted tag set for an ingredient.
//!
//! Tags combine one storage-location token (fridge/freezer/pantry/counter)
//! with free-form descriptive tags. Freezer storage additionally implies the
//! literal "frozen" tag, which lets a frozen chicken breast match both the
//! Protein and Frozen category filters. All functions here are pure.

use crate::models::{Category, StorageLocation};

/// The four storage-location tokens, in `storage_icon` priority order after
/// "frozen".
pub const STORAGE_TOKENS: [&str; 4] = ["fridge", "freezer", "pantry", "counter"];

/// Maximum number of descriptive tags surfaced on an inventory card.
pub const MAX_DISPLAY_TAGS: usize = 3;

/// Builds the persisted tag set from the storage-location selection and the
/// user's additional tags.
///
/// The storage token comes first, then the extra tags lowercased in their
/// given order, then "frozen" when the location is the freezer. Duplicates
/// keep their first occurrence. Tags are recomputed wholesale on every edit,
/// never patched incrementally.
pub fn derive_tags(storage: StorageLocation, extra_tags: &[String]) -> Vec<String> {
    let mut tags = vec![storage.as_tag().to_string()];
    for tag in extra_tags {
        tags.push(tag.to_lowercase());
    }
    if storage == StorageLocation::Freezer {
        tags.push("frozen".to_string());
    }
    dedup_preserving_order(tags)
}

fn dedup_preserving_order(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Picks the storage glyph for an ingredient card.
///
/// Total over any tag set; checks run in fixed priority order
/// (frozen > fridge > pantry) so a set that somehow carries several storage
/// tags still resolves deterministically to the first match.
pub fn storage_icon(tags: &[String]) -> &'static str {
    if tags.iter().any(|t| t == "frozen") {
        "❄️"
    } else if tags.iter().any(|t| t == "fridge") {
        "🧊"
    } else if tags.iter().any(|t| t == "pantry") {
        "🏠"
    } else {
        "📦"
    }
}

/// Curated quick-add tag vocabulary per primary category.
///
/// Static reference data for the ingredient form; a total mapping so no
/// category can miss an entry.
pub const fn suggested_tags(category: Category) -> &'static [&'static str] {
    match category {
        Category::Protein => &["lean", "high-protein", "meat", "fish", "poultry"],
        Category::Vegetables => &["organic", "fresh", "leafy", "root", "cruciferous"],
        Category::Fruits => &["seasonal", "citrus", "berry", "tropical", "stone-fruit"],
        Category::Dairy => &["low-fat", "whole", "aged", "fresh"],
        Category::Grains => &["whole-grain", "refined", "gluten-free"],
        Category::Pantry => &["canned", "dried", "jarred", "bottled"],
        Category::HerbsAndSpices => &["dried", "fresh", "ground", "whole"],
        Category::Frozen => &["frozen"],
    }
}

/// Tags worth showing on an inventory card: the storage tokens and "frozen"
/// are rendered separately, so they are filtered out here; the remainder is
/// capped at [`MAX_DISPLAY_TAGS`] preserving insertion order.
pub fn displayable_tags(tags: &[String]) -> Vec<&str> {
    tags.iter()
        .map(String::as_str)
        .filter(|t| *t != "frozen" && !STORAGE_TOKENS.contains(t))
        .take(MAX_DISPLAY_TAGS)
        .collect()
}
