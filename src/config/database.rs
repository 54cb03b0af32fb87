//! Database connection and schema creation for the local sync adapter.
//!
//! Tables are generated from the entity definitions with `SeaORM`'s
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! struct definitions without hand-written SQL.

use crate::entities::{IngredientEntity, MealPlanEntity, RecipeEntity, ShoppingItemEntity};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the local SQLite database.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the four collection tables from the entity definitions. Safe to
/// run only against a fresh database; existing tables are not migrated.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let ingredient_table = schema.create_table_from_entity(IngredientEntity);
    let recipe_table = schema.create_table_from_entity(RecipeEntity);
    let meal_plan_table = schema.create_table_from_entity(MealPlanEntity);
    let shopping_item_table = schema.create_table_from_entity(ShoppingItemEntity);

    db.execute(builder.build(&ingredient_table)).await?;
    db.execute(builder.build(&recipe_table)).await?;
    db.execute(builder.build(&meal_plan_table)).await?;
    db.execute(builder.build(&shopping_item_table)).await?;

    Ok(())
}
