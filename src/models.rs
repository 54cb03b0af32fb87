//! Domain model types shared across the store, tag engine, and sync layer.
//!
//! The four entity collections (ingredients, recipes, meal plans, shopping
//! items) each come in two flavours: the full record with its persistence id,
//! and a `New*` draft carrying every field except the id. Ids are assigned by
//! the sync adapter on create; a record never enters the store without one.

use crate::errors::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary classification for an inventory ingredient.
///
/// This is a closed set: every ingredient carries exactly one of these,
/// chosen at creation time and distinct from its free-form tags.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Category {
    Protein,
    Vegetables,
    Fruits,
    Dairy,
    Grains,
    Pantry,
    #[serde(rename = "Herbs & Spices")]
    HerbsAndSpices,
    Frozen,
}

impl Category {
    /// All categories, in the order the inventory UI presents them.
    pub const ALL: [Self; 8] = [
        Self::Protein,
        Self::Vegetables,
        Self::Fruits,
        Self::Dairy,
        Self::Grains,
        Self::Pantry,
        Self::HerbsAndSpices,
        Self::Frozen,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protein => "Protein",
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Dairy => "Dairy",
            Self::Grains => "Grains",
            Self::Pantry => "Pantry",
            Self::HerbsAndSpices => "Herbs & Spices",
            Self::Frozen => "Frozen",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::unknown_token("category", s))
    }
}

/// Measurement unit vocabulary for inventory quantities.
///
/// Recipe ingredient references and shopping items keep free-text units;
/// only stocked ingredients are constrained to this set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Piece,
    Kg,
    G,
    Lbs,
    Oz,
    Cup,
    Ml,
    L,
    Bunch,
    Package,
    Jar,
    Bottle,
}

impl Unit {
    pub const ALL: [Self; 12] = [
        Self::Piece,
        Self::Kg,
        Self::G,
        Self::Lbs,
        Self::Oz,
        Self::Cup,
        Self::Ml,
        Self::L,
        Self::Bunch,
        Self::Package,
        Self::Jar,
        Self::Bottle,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Piece => "piece",
            Self::Kg => "kg",
            Self::G => "g",
            Self::Lbs => "lbs",
            Self::Oz => "oz",
            Self::Cup => "cup",
            Self::Ml => "ml",
            Self::L => "l",
            Self::Bunch => "bunch",
            Self::Package => "package",
            Self::Jar => "jar",
            Self::Bottle => "bottle",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| Error::unknown_token("unit", s))
    }
}

/// Where an ingredient is kept. Exactly one storage token derived from this
/// must be present in every ingredient's tag set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageLocation {
    Fridge,
    Freezer,
    Pantry,
    Counter,
}

impl StorageLocation {
    pub const ALL: [Self; 4] = [Self::Fridge, Self::Freezer, Self::Pantry, Self::Counter];

    /// The lowercase tag token persisted into the ingredient's tag set.
    pub const fn as_tag(self) -> &'static str {
        match self {
            Self::Fridge => "fridge",
            Self::Freezer => "freezer",
            Self::Pantry => "pantry",
            Self::Counter => "counter",
        }
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for StorageLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_tag() == s)
            .ok_or_else(|| Error::unknown_token("storage location", s))
    }
}

/// A perishable item in the household inventory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Persistence id, assigned by the sync adapter on create.
    pub id: String,
    pub name: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: Unit,
    /// Calendar date only; freshness tiers are derived from this on read.
    pub expiry_date: NaiveDate,
    pub added_date: NaiveDate,
    /// Deduplicated lowercase tags; contains exactly one storage token and
    /// "frozen" iff the storage location is the freezer.
    pub tags: Vec<String>,
}

/// Ingredient draft prior to its first save.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    pub name: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: Unit,
    pub expiry_date: NaiveDate,
    pub added_date: NaiveDate,
    pub tags: Vec<String>,
}

impl NewIngredient {
    pub fn with_id(self, id: String) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            unit: self.unit,
            expiry_date: self.expiry_date,
            added_date: self.added_date,
            tags: self.tags,
        }
    }
}

/// Free-text ingredient reference inside a recipe. Not foreign-keyed to the
/// inventory; units here are unconstrained (e.g. "tbsp").
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

/// Per-serving nutrition facts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Fixed well-known ids for builtin recipes, generated for user ones.
    pub id: String,
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    /// Preparation time in minutes.
    pub prep_time: u32,
    /// Cooking time in minutes.
    pub cook_time: u32,
    pub servings: u32,
    pub nutrition: Nutrition,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub is_user_created: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub nutrition: Nutrition,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub is_user_created: bool,
}

impl NewRecipe {
    pub fn with_id(self, id: String) -> Recipe {
        Recipe {
            id,
            name: self.name,
            ingredients: self.ingredients,
            instructions: self.instructions,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            nutrition: self.nutrition,
            tags: self.tags,
            image: self.image,
            is_user_created: self.is_user_created,
        }
    }
}

/// A recipe scheduled on a calendar date. Embeds a full copy of the recipe
/// so later recipe edits do not retroactively change historical plans.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub date: NaiveDate,
    pub recipe: Recipe,
    /// Servings override for this plan, independent of the recipe default.
    pub servings: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealPlan {
    pub date: NaiveDate,
    pub recipe: Recipe,
    pub servings: u32,
}

impl NewMealPlan {
    pub fn with_id(self, id: String) -> MealPlan {
        MealPlan {
            id,
            date: self.date,
            recipe: self.recipe,
            servings: self.servings,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    /// Free text; shopping items are not constrained to the inventory
    /// unit or category vocabularies.
    pub unit: String,
    pub category: String,
    pub completed: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShoppingItem {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub category: String,
    pub completed: bool,
}

impl NewShoppingItem {
    pub fn with_id(self, id: String) -> ShoppingItem {
        ShoppingItem {
            id,
            name: self.name,
            quantity: self.quantity,
            unit: self.unit,
            category: self.category,
            completed: self.completed,
        }
    }
}
