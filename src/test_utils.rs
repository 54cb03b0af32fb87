//! Shared test utilities for `FreshPlan`.
//!
//! Provides an in-memory database setup and sample-record builders with
//! sensible defaults so tests only spell out the fields they care about.

use crate::config::database;
use crate::core::catalog;
use crate::errors::Result;
use crate::models::{
    Category, NewIngredient, NewMealPlan, NewRecipe, NewShoppingItem, Nutrition, RecipeIngredient,
    StorageLocation, Unit,
};
use crate::session::IngredientDraft;
use crate::sync::LocalSyncAdapter;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    database::create_tables(&db).await?;
    Ok(db)
}

/// Opens a local sync adapter over a fresh in-memory database.
pub async fn setup_adapter() -> Result<LocalSyncAdapter> {
    LocalSyncAdapter::open(setup_test_db().await?).await
}

/// Ingredient record with the canonical fridge tag set.
pub fn sample_new_ingredient(name: &str) -> NewIngredient {
    NewIngredient {
        name: name.to_string(),
        category: Category::Dairy,
        quantity: 1.0,
        unit: Unit::L,
        expiry_date: date(2025, 6, 10),
        added_date: date(2025, 6, 1),
        tags: vec!["fridge".to_string()],
    }
}

/// Form-side draft for session tests; tags are derived on save.
pub fn sample_draft(name: &str, storage: StorageLocation) -> IngredientDraft {
    IngredientDraft {
        name: name.to_string(),
        category: Category::Protein,
        quantity: 500.0,
        unit: Unit::G,
        expiry_date: date(2025, 6, 10),
        storage,
        extra_tags: Vec::new(),
        added_date: Some(date(2025, 6, 1)),
    }
}

/// Minimal user-created recipe.
pub fn sample_new_recipe(name: &str) -> NewRecipe {
    NewRecipe {
        name: name.to_string(),
        ingredients: vec![RecipeIngredient {
            name: "Pasta".to_string(),
            quantity: 250.0,
            unit: "g".to_string(),
        }],
        instructions: vec!["Boil pasta.".to_string(), "Combine and bake.".to_string()],
        prep_time: 20,
        cook_time: 40,
        servings: 4,
        nutrition: Nutrition {
            calories: 550.0,
            protein: 22.0,
            carbs: 60.0,
            fat: 24.0,
            fiber: 6.0,
        },
        tags: vec!["Comfort Food".to_string()],
        image: None,
        is_user_created: true,
    }
}

/// Meal plan embedding the first builtin recipe.
pub fn sample_new_meal_plan(plan_date: NaiveDate) -> NewMealPlan {
    NewMealPlan {
        date: plan_date,
        recipe: catalog::builtin_recipes().remove(0),
        servings: 2,
    }
}

pub fn sample_new_shopping_item(name: &str) -> NewShoppingItem {
    NewShoppingItem {
        name: name.to_string(),
        quantity: 2.0,
        unit: "piece".to_string(),
        category: "Vegetables".to_string(),
        completed: false,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}
