//! Sync adapter boundary.
//!
//! The core issues outbound writes through this trait and receives inbound
//! full-collection snapshots through per-collection `watch` feeds. Writes are
//! fire-and-forget from the store's perspective: their success is observed
//! only through a later snapshot, never as a return value feeding a
//! transition. Snapshot ordering is a delivery-layer contract - ingredients,
//! recipes and shopping items arrive newest-first, meal plans by date
//! ascending - which the core trusts verbatim and does not re-sort.

use crate::errors::Result;
use crate::models::{
    Ingredient, MealPlan, NewIngredient, NewMealPlan, NewRecipe, NewShoppingItem, Recipe,
    ShoppingItem,
};
use async_trait::async_trait;
use tokio::sync::watch;

/// SQLite-backed local adapter
pub mod local;

pub use local::LocalSyncAdapter;

/// Persistence collaborator for one signed-in user's collections.
#[async_trait]
pub trait SyncAdapter: Send + Sync {
    /// Persists a new ingredient and returns its assigned id.
    async fn create_ingredient(&self, data: NewIngredient) -> Result<String>;
    /// Replaces the stored record wholesale; tags are never patched
    /// incrementally.
    async fn update_ingredient(&self, id: &str, data: NewIngredient) -> Result<()>;
    async fn delete_ingredient(&self, id: &str) -> Result<()>;
    /// Snapshot feed, newest-first. The current value is the latest full
    /// collection.
    fn ingredient_feed(&self) -> watch::Receiver<Vec<Ingredient>>;

    /// Persists a new user recipe and returns its assigned id. Builtin
    /// recipes never pass through the adapter.
    async fn create_recipe(&self, data: NewRecipe) -> Result<String>;
    async fn update_recipe(&self, id: &str, data: NewRecipe) -> Result<()>;
    async fn delete_recipe(&self, id: &str) -> Result<()>;
    /// Snapshot feed of user recipes only, newest-first.
    fn recipe_feed(&self) -> watch::Receiver<Vec<Recipe>>;

    async fn create_meal_plan(&self, data: NewMealPlan) -> Result<String>;
    async fn delete_meal_plan(&self, id: &str) -> Result<()>;
    /// Batch regeneration: deletes prior plans whose date appears in the
    /// replacement set, then creates all new plans.
    async fn replace_meal_plans(&self, plans: Vec<NewMealPlan>) -> Result<()>;
    /// Snapshot feed, ordered by plan date ascending.
    fn meal_plan_feed(&self) -> watch::Receiver<Vec<MealPlan>>;

    async fn create_shopping_item(&self, data: NewShoppingItem) -> Result<String>;
    async fn update_shopping_item(&self, id: &str, data: NewShoppingItem) -> Result<()>;
    async fn delete_shopping_item(&self, id: &str) -> Result<()>;
    /// Batch regeneration: clears the entire list, then creates the new
    /// items.
    async fn replace_shopping_list(&self, items: Vec<NewShoppingItem>) -> Result<()>;
    /// Snapshot feed, newest-first.
    fn shopping_item_feed(&self) -> watch::Receiver<Vec<ShoppingItem>>;
}
