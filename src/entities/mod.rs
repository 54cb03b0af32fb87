//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the local persistence tables, one per synced
//! collection. Each entity has a Model struct for data and an Entity struct
//! for operations.

pub mod ingredient;
pub mod meal_plan;
pub mod recipe;
pub mod shopping_item;

// Re-export specific types to avoid conflicts
pub use ingredient::{
    Column as IngredientColumn, Entity as IngredientEntity, Model as IngredientRow,
};
pub use meal_plan::{Column as MealPlanColumn, Entity as MealPlanEntity, Model as MealPlanRow};
pub use recipe::{Column as RecipeColumn, Entity as RecipeEntity, Model as RecipeRow};
pub use shopping_item::{
    Column as ShoppingItemColumn, Entity as ShoppingItemEntity, Model as ShoppingItemRow,
};
