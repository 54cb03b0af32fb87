//! Authoritative in-memory state and its closed set of transitions.
//!
//! The store holds the four entity collections plus session status and only
//! changes through [`Transition`] values applied by a pure reducer. Every
//! applied transition yields a complete new snapshot; nothing partially
//! applies. No validation happens here - malformed input passes through
//! verbatim, which keeps every transition total. Validation belongs to the
//! tag engine and the calling form, before a transition is dispatched.

use crate::core::catalog;
use crate::models::{Ingredient, MealPlan, Recipe, ShoppingItem};
use tokio::sync::RwLock;
use tracing::trace;

/// Lightweight witness that a sync session is attached. The adapter itself
/// is never stored in state; presence plus the epoch is all readers and the
/// stale-feed guard need.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionHandle {
    /// Monotonically increasing per sign-in; feed dispatches tagged with a
    /// stale epoch are dropped.
    pub epoch: u64,
    pub user_id: String,
}

/// Complete snapshot of all user data plus session status.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    /// Snapshot version, bumped once per applied transition.
    pub version: u64,
    pub ingredients: Vec<Ingredient>,
    /// Builtin catalog first, then user recipes in delivery order.
    pub recipes: Vec<Recipe>,
    pub meal_plans: Vec<MealPlan>,
    pub shopping_list: Vec<ShoppingItem>,
    pub loading: bool,
    /// Latest collaborator failure, if any. No history is kept.
    pub error: Option<String>,
    pub sync_handle: Option<SessionHandle>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 0,
            ingredients: Vec::new(),
            recipes: catalog::builtin_recipes(),
            meal_plans: Vec::new(),
            shopping_list: Vec::new(),
            loading: false,
            error: None,
            sync_handle: None,
        }
    }
}

/// The closed set of named state transitions.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    SetLoading(bool),
    SetError(Option<String>),
    SetSyncHandle(Option<SessionHandle>),
    /// Wholesale replacement, used on every external snapshot.
    ReplaceIngredients(Vec<Ingredient>),
    /// Payload carries user recipes only; the builtin catalog is
    /// re-prepended every time, never taken from the payload.
    ReplaceRecipes(Vec<Recipe>),
    ReplaceMealPlans(Vec<MealPlan>),
    ReplaceShoppingList(Vec<ShoppingItem>),
    /// Record must already carry its persistence id.
    AddIngredient(Ingredient),
    /// Full-record replacement by id; no-op when the id is absent.
    UpdateIngredient(Ingredient),
    DeleteIngredient(String),
    AddRecipe(Recipe),
    AddMealPlan(MealPlan),
    DeleteMealPlan(String),
    AddShoppingItem(ShoppingItem),
    /// Flips `completed` on the matching item; no-op when absent.
    ToggleShoppingItem(String),
    DeleteShoppingItem(String),
}

impl AppState {
    /// Pure reducer: `(previous state, transition) -> next state`.
    /// Total over every transition; never fails.
    #[must_use]
    pub fn apply(&self, transition: Transition) -> Self {
        let mut next = self.clone();
        next.version = self.version + 1;
        match transition {
            Transition::SetLoading(loading) => next.loading = loading,
            Transition::SetError(error) => next.error = error,
            Transition::SetSyncHandle(handle) => next.sync_handle = handle,
            Transition::ReplaceIngredients(ingredients) => next.ingredients = ingredients,
            Transition::ReplaceRecipes(user_recipes) => {
                let mut recipes = catalog::builtin_recipes();
                recipes.extend(user_recipes);
                next.recipes = recipes;
            }
            Transition::ReplaceMealPlans(plans) => next.meal_plans = plans,
            Transition::ReplaceShoppingList(items) => next.shopping_list = items,
            Transition::AddIngredient(ingredient) => next.ingredients.push(ingredient),
            Transition::UpdateIngredient(ingredient) => {
                if let Some(existing) = next.ingredients.iter_mut().find(|i| i.id == ingredient.id)
                {
                    *existing = ingredient;
                }
            }
            Transition::DeleteIngredient(id) => next.ingredients.retain(|i| i.id != id),
            Transition::AddRecipe(recipe) => next.recipes.push(recipe),
            Transition::AddMealPlan(plan) => next.meal_plans.push(plan),
            Transition::DeleteMealPlan(id) => next.meal_plans.retain(|p| p.id != id),
            Transition::AddShoppingItem(item) => next.shopping_list.push(item),
            Transition::ToggleShoppingItem(id) => {
                if let Some(item) = next.shopping_list.iter_mut().find(|i| i.id == id) {
                    item.completed = !item.completed;
                }
            }
            Transition::DeleteShoppingItem(id) => next.shopping_list.retain(|i| i.id != id),
        }
        next
    }
}

/// Single-writer wrapper around [`AppState`].
///
/// All transitions serialize through [`Store::dispatch`]; readers take cheap
/// clones of the current snapshot. Snapshot feeds use
/// [`Store::dispatch_feed`], which drops transitions from stale sessions.
#[derive(Debug, Default)]
pub struct Store {
    state: RwLock<AppState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a transition. The write lock is the serialization point for
    /// the single logical writer.
    pub async fn dispatch(&self, transition: Transition) {
        let mut state = self.state.write().await;
        let next = state.apply(transition);
        *state = next;
    }

    /// Applies a feed-originated transition only when `epoch` matches the
    /// currently attached session. A feed callback firing after teardown is
    /// therefore a no-op.
    pub async fn dispatch_feed(&self, epoch: u64, transition: Transition) {
        let mut state = self.state.write().await;
        let current = state.sync_handle.as_ref().map(|h| h.epoch);
        if current != Some(epoch) {
            trace!(epoch, ?current, "dropping snapshot from stale session");
            return;
        }
        let next = state.apply(transition);
        *state = next;
    }

    /// Current snapshot, cloned out so readers never hold the lock.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::models::{Category, NewIngredient, NewShoppingItem, Unit};
    use chrono::NaiveDate;

    fn ingredient(id: &str, name: &str) -> Ingredient {
        NewIngredient {
            name: name.to_string(),
            category: Category::Dairy,
            quantity: 1.0,
            unit: Unit::L,
            expiry_date: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            added_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            tags: vec!["fridge".to_string()],
        }
        .with_id(id.to_string())
    }

    fn shopping_item(id: &str, name: &str) -> ShoppingItem {
        NewShoppingItem {
            name: name.to_string(),
            quantity: 2.0,
            unit: "piece".to_string(),
            category: "Vegetables".to_string(),
            completed: false,
        }
        .with_id(id.to_string())
    }

    fn user_recipe(id: &str, name: &str) -> Recipe {
        let mut recipe = catalog::builtin_recipes().remove(0);
        recipe.id = id.to_string();
        recipe.name = name.to_string();
        recipe.is_user_created = true;
        recipe
    }

    #[test]
    fn test_initial_state_carries_builtin_recipes() {
        let state = AppState::default();
        assert_eq!(state.version, 0);
        assert_eq!(state.recipes.len(), 3);
        assert!(state.ingredients.is_empty());
        assert!(state.sync_handle.is_none());
    }

    #[test]
    fn test_every_transition_bumps_version() {
        let state = AppState::default();
        let next = state.apply(Transition::SetLoading(true));
        assert_eq!(next.version, 1);
        assert!(next.loading);
        // A no-op update still produces a new snapshot.
        let next = next.apply(Transition::DeleteIngredient("missing".to_string()));
        assert_eq!(next.version, 2);
    }

    #[test]
    fn test_replace_recipes_reprepends_seed_set_idempotently() {
        let state = AppState::default();
        let user = vec![user_recipe("u-1", "Lasagna")];
        let once = state.apply(Transition::ReplaceRecipes(user.clone()));
        let twice = once.apply(Transition::ReplaceRecipes(user));
        let seed_count = |s: &AppState| {
            s.recipes
                .iter()
                .filter(|r| r.id.starts_with("default-"))
                .count()
        };
        assert_eq!(seed_count(&once), 3);
        assert_eq!(seed_count(&twice), 3);
        assert_eq!(once.recipes.len(), 4);
        assert_eq!(twice.recipes.len(), 4);
        assert_eq!(once.recipes[0].id, "default-1");
    }

    #[test]
    fn test_replace_recipes_ignores_seed_duplicates_in_payload() {
        // A snapshot that somehow contains a builtin is appended verbatim
        // after the seed set; the seed set itself is never doubled by
        // repeated replacement with user-only payloads.
        let state = AppState::default();
        let next = state.apply(Transition::ReplaceRecipes(Vec::new()));
        assert_eq!(next.recipes.len(), 3);
    }

    #[test]
    fn test_add_then_delete_restores_prior_collection() {
        let state = AppState::default().apply(Transition::ReplaceIngredients(vec![ingredient(
            "i-1", "Milk",
        )]));
        let before: Vec<Ingredient> = state.ingredients.clone();
        let added = state.apply(Transition::AddIngredient(ingredient("i-2", "Eggs")));
        assert_eq!(added.ingredients.len(), 2);
        let removed = added.apply(Transition::DeleteIngredient("i-2".to_string()));
        assert_eq!(removed.ingredients, before);
    }

    #[test]
    fn test_update_after_delete_is_noop() {
        let state = AppState::default()
            .apply(Transition::AddIngredient(ingredient("i-1", "Milk")))
            .apply(Transition::DeleteIngredient("i-1".to_string()));
        let mut renamed = ingredient("i-1", "Oat Milk");
        renamed.quantity = 5.0;
        let next = state.apply(Transition::UpdateIngredient(renamed));
        assert_eq!(next.ingredients, state.ingredients);
    }

    #[test]
    fn test_update_replaces_matching_record_wholesale() {
        let state = AppState::default().apply(Transition::AddIngredient(ingredient("i-1", "Milk")));
        let mut updated = ingredient("i-1", "Whole Milk");
        updated.tags = vec!["fridge".to_string(), "whole".to_string()];
        let next = state.apply(Transition::UpdateIngredient(updated.clone()));
        assert_eq!(next.ingredients, vec![updated]);
    }

    #[test]
    fn test_toggle_shopping_item_twice_restores_flag() {
        let state = AppState::default().apply(Transition::AddShoppingItem(shopping_item(
            "s-1", "Carrots",
        )));
        let toggled = state.apply(Transition::ToggleShoppingItem("s-1".to_string()));
        assert!(toggled.shopping_list[0].completed);
        let back = toggled.apply(Transition::ToggleShoppingItem("s-1".to_string()));
        assert!(!back.shopping_list[0].completed);
        // Toggling an unknown id is a no-op.
        let unchanged = back.apply(Transition::ToggleShoppingItem("missing".to_string()));
        assert_eq!(unchanged.shopping_list, back.shopping_list);
    }

    #[test]
    fn test_meal_plan_add_and_delete() {
        let plan = crate::models::NewMealPlan {
            date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            recipe: catalog::builtin_recipes().remove(1),
            servings: 4,
        }
        .with_id("p-1".to_string());
        let state = AppState::default().apply(Transition::AddMealPlan(plan));
        assert_eq!(state.meal_plans.len(), 1);
        let next = state.apply(Transition::DeleteMealPlan("p-1".to_string()));
        assert!(next.meal_plans.is_empty());
    }

    #[test]
    fn test_set_error_keeps_latest_message_only() {
        let state = AppState::default()
            .apply(Transition::SetError(Some("first failure".to_string())))
            .apply(Transition::SetError(Some("second failure".to_string())));
        assert_eq!(state.error.as_deref(), Some("second failure"));
        let cleared = state.apply(Transition::SetError(None));
        assert!(cleared.error.is_none());
    }

    #[tokio::test]
    async fn test_store_serializes_dispatches() {
        let store = Store::new();
        store
            .dispatch(Transition::AddIngredient(ingredient("i-1", "Milk")))
            .await;
        store
            .dispatch(Transition::AddIngredient(ingredient("i-2", "Eggs")))
            .await;
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.version, 2);
        assert_eq!(snapshot.ingredients.len(), 2);
    }

    #[tokio::test]
    async fn test_feed_dispatch_from_stale_epoch_is_dropped() {
        let store = Store::new();
        store
            .dispatch(Transition::SetSyncHandle(Some(SessionHandle {
                epoch: 2,
                user_id: "user-1".to_string(),
            })))
            .await;

        // Feed from the prior session.
        store
            .dispatch_feed(
                1,
                Transition::ReplaceIngredients(vec![ingredient("i-9", "Stale")]),
            )
            .await;
        assert!(store.snapshot().await.ingredients.is_empty());

        // Feed from the live session applies.
        store
            .dispatch_feed(
                2,
                Transition::ReplaceIngredients(vec![ingredient("i-1", "Milk")]),
            )
            .await;
        assert_eq!(store.snapshot().await.ingredients.len(), 1);
    }

    #[tokio::test]
    async fn test_feed_dispatch_after_detach_is_dropped() {
        let store = Store::new();
        store
            .dispatch(Transition::SetSyncHandle(Some(SessionHandle {
                epoch: 1,
                user_id: "user-1".to_string(),
            })))
            .await;
        store.dispatch(Transition::SetSyncHandle(None)).await;
        store
            .dispatch_feed(
                1,
                Transition::ReplaceIngredients(vec![ingredient("i-1", "Late")]),
            )
            .await;
        assert!(store.snapshot().await.ingredients.is_empty());
    }
}
