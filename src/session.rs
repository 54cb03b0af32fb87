//! Session-scoped binding between the store and a sync adapter.
//!
//! A [`Session`] replaces ambient global state: it is created at sign-in,
//! carries the epoch-tagged sync handle, runs the four snapshot feeds, and
//! is consumed at sign-out. All outbound writes go through session
//! operations; collaborator failures are caught here and written to the
//! store's error field, never raised through a transition.

use crate::core::tags;
use crate::errors::Error;
use crate::models::{
    Category, Ingredient, NewIngredient, NewMealPlan, NewRecipe, NewShoppingItem, StorageLocation,
    Unit,
};
use crate::store::{SessionHandle, Store, Transition};
use crate::sync::SyncAdapter;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

/// Form-side ingredient input, before tag derivation.
///
/// The storage location and extra tags are combined into the canonical tag
/// set by the tag engine on every save; persisted tags are never patched.
#[derive(Clone, Debug)]
pub struct IngredientDraft {
    pub name: String,
    pub category: Category,
    pub quantity: f64,
    pub unit: Unit,
    pub expiry_date: NaiveDate,
    pub storage: StorageLocation,
    pub extra_tags: Vec<String>,
    /// Preserved across edits; defaults to today on first save.
    pub added_date: Option<NaiveDate>,
}

impl IngredientDraft {
    fn into_record(self) -> NewIngredient {
        let tags = tags::derive_tags(self.storage, &self.extra_tags);
        NewIngredient {
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            unit: self.unit,
            expiry_date: self.expiry_date,
            added_date: self.added_date.unwrap_or_else(|| Local::now().date_naive()),
            tags,
        }
    }
}

/// One signed-in user's live session.
pub struct Session {
    store: Arc<Store>,
    adapter: Arc<dyn SyncAdapter>,
    handle: SessionHandle,
    feeds: Vec<JoinHandle<()>>,
}

impl Session {
    /// Attaches a sync handle, applies each collection's current snapshot,
    /// and spawns the four feed tasks.
    pub async fn start(
        store: Arc<Store>,
        adapter: Arc<dyn SyncAdapter>,
        user_id: &str,
    ) -> Self {
        let epoch = NEXT_EPOCH.fetch_add(1, Ordering::Relaxed);
        let handle = SessionHandle {
            epoch,
            user_id: user_id.to_string(),
        };
        info!(epoch, user_id, "starting session");
        store
            .dispatch(Transition::SetSyncHandle(Some(handle.clone())))
            .await;

        let feeds = vec![
            spawn_feed(
                &store,
                epoch,
                adapter.ingredient_feed(),
                Transition::ReplaceIngredients,
            )
            .await,
            spawn_feed(
                &store,
                epoch,
                adapter.recipe_feed(),
                Transition::ReplaceRecipes,
            )
            .await,
            spawn_feed(
                &store,
                epoch,
                adapter.meal_plan_feed(),
                Transition::ReplaceMealPlans,
            )
            .await,
            spawn_feed(
                &store,
                epoch,
                adapter.shopping_item_feed(),
                Transition::ReplaceShoppingList,
            )
            .await,
        ];

        Self {
            store,
            adapter,
            handle,
            feeds,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Tears the session down: stops all feeds first, then detaches the
    /// handle and clears the four collections. A feed snapshot racing this
    /// teardown carries a stale epoch and is dropped by the store.
    pub async fn end(self) {
        info!(epoch = self.handle.epoch, "ending session");
        for feed in self.feeds {
            feed.abort();
        }
        self.store.dispatch(Transition::SetSyncHandle(None)).await;
        self.store
            .dispatch(Transition::ReplaceIngredients(Vec::new()))
            .await;
        self.store
            .dispatch(Transition::ReplaceRecipes(Vec::new()))
            .await;
        self.store
            .dispatch(Transition::ReplaceMealPlans(Vec::new()))
            .await;
        self.store
            .dispatch(Transition::ReplaceShoppingList(Vec::new()))
            .await;
    }

    /// Records a collaborator failure. The prior state is retained; only
    /// the latest message is kept.
    async fn fail(&self, operation: &str, error: &Error) {
        warn!(operation, %error, "sync adapter call failed");
        self.store
            .dispatch(Transition::SetError(Some(format!("{operation}: {error}"))))
            .await;
    }

    pub async fn clear_error(&self) {
        self.store.dispatch(Transition::SetError(None)).await;
    }

    pub async fn set_loading(&self, loading: bool) {
        self.store.dispatch(Transition::SetLoading(loading)).await;
    }

    /// Derives the canonical tag set and persists a new ingredient. The
    /// local append happens only after the adapter confirms the write and
    /// assigns the id.
    pub async fn add_ingredient(&self, draft: IngredientDraft) {
        let record = draft.into_record();
        match self.adapter.create_ingredient(record.clone()).await {
            Ok(id) => {
                self.store
                    .dispatch(Transition::AddIngredient(record.with_id(id)))
                    .await;
            }
            Err(e) => self.fail("add ingredient", &e).await,
        }
    }

    /// Full-record replacement; the tag set is recomputed wholesale from
    /// the draft's storage location and extra tags.
    pub async fn update_ingredient(&self, id: &str, draft: IngredientDraft) {
        let record = draft.into_record();
        match self.adapter.update_ingredient(id, record.clone()).await {
            Ok(()) => {
                self.store
                    .dispatch(Transition::UpdateIngredient(record.with_id(id.to_string())))
                    .await;
            }
            Err(e) => self.fail("update ingredient", &e).await,
        }
    }

    pub async fn delete_ingredient(&self, id: &str) {
        match self.adapter.delete_ingredient(id).await {
            Ok(()) => {
                self.store
                    .dispatch(Transition::DeleteIngredient(id.to_string()))
                    .await;
            }
            Err(e) => self.fail("delete ingredient", &e).await,
        }
    }

    pub async fn add_recipe(&self, mut data: NewRecipe) {
        data.is_user_created = true;
        match self.adapter.create_recipe(data.clone()).await {
            Ok(id) => {
                self.store
                    .dispatch(Transition::AddRecipe(data.with_id(id)))
                    .await;
            }
            Err(e) => self.fail("add recipe", &e).await,
        }
    }

    /// User recipes only; the updated collection arrives via the snapshot
    /// feed.
    pub async fn update_recipe(&self, id: &str, data: NewRecipe) {
        if let Err(e) = self.adapter.update_recipe(id, data).await {
            self.fail("update recipe", &e).await;
        }
    }

    pub async fn delete_recipe(&self, id: &str) {
        if let Err(e) = self.adapter.delete_recipe(id).await {
            self.fail("delete recipe", &e).await;
        }
    }

    pub async fn add_meal_plan(&self, data: NewMealPlan) {
        match self.adapter.create_meal_plan(data.clone()).await {
            Ok(id) => {
                self.store
                    .dispatch(Transition::AddMealPlan(data.with_id(id)))
                    .await;
            }
            Err(e) => self.fail("add meal plan", &e).await,
        }
    }

    pub async fn delete_meal_plan(&self, id: &str) {
        match self.adapter.delete_meal_plan(id).await {
            Ok(()) => {
                self.store
                    .dispatch(Transition::DeleteMealPlan(id.to_string()))
                    .await;
            }
            Err(e) => self.fail("delete meal plan", &e).await,
        }
    }

    /// Clear-and-rewrite regeneration for the planned date range. The new
    /// collection arrives via the snapshot feed.
    pub async fn generate_meal_plans(&self, plans: Vec<NewMealPlan>) {
        if let Err(e) = self.adapter.replace_meal_plans(plans).await {
            self.fail("generate meal plans", &e).await;
        }
    }

    pub async fn add_shopping_item(&self, data: NewShoppingItem) {
        match self.adapter.create_shopping_item(data.clone()).await {
            Ok(id) => {
                self.store
                    .dispatch(Transition::AddShoppingItem(data.with_id(id)))
                    .await;
            }
            Err(e) => self.fail("add shopping item", &e).await,
        }
    }

    /// Flips the completed flag, persisting the full updated record.
    pub async fn toggle_shopping_item(&self, id: &str) {
        let snapshot = self.store.snapshot().await;
        let Some(item) = snapshot.shopping_list.iter().find(|i| i.id == id) else {
            return;
        };
        let data = NewShoppingItem {
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            category: item.category.clone(),
            completed: !item.completed,
        };
        match self.adapter.update_shopping_item(id, data).await {
            Ok(()) => {
                self.store
                    .dispatch(Transition::ToggleShoppingItem(id.to_string()))
                    .await;
            }
            Err(e) => self.fail("toggle shopping item", &e).await,
        }
    }

    pub async fn delete_shopping_item(&self, id: &str) {
        match self.adapter.delete_shopping_item(id).await {
            Ok(()) => {
                self.store
                    .dispatch(Transition::DeleteShoppingItem(id.to_string()))
                    .await;
            }
            Err(e) => self.fail("delete shopping item", &e).await,
        }
    }

    /// Full-list regeneration. The new collection arrives via the snapshot
    /// feed.
    pub async fn generate_shopping_list(&self, items: Vec<NewShoppingItem>) {
        if let Err(e) = self.adapter.replace_shopping_list(items).await {
            self.fail("generate shopping list", &e).await;
        }
    }
}

/// Applies the feed's current snapshot under the session epoch, then keeps
/// forwarding every subsequent snapshot until the feed closes or the task
/// is aborted at teardown.
async fn spawn_feed<T, F>(
    store: &Arc<Store>,
    epoch: u64,
    mut feed: watch::Receiver<Vec<T>>,
    transition: F,
) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(Vec<T>) -> Transition + Send + Sync + 'static,
{
    let initial = feed.borrow_and_update().clone();
    store.dispatch_feed(epoch, transition(initial)).await;
    let store = Arc::clone(store);
    tokio::spawn(async move {
        while feed.changed().await.is_ok() {
            let snapshot = feed.borrow_and_update().clone();
            store.dispatch_feed(epoch, transition(snapshot)).await;
        }
    })
}

/// Ingredients currently classified as expiring or expired, for surfacing
/// in status summaries.
pub fn urgent_ingredients(
    ingredients: &[Ingredient],
    now: chrono::NaiveDateTime,
) -> Vec<&Ingredient> {
    use crate::core::expiry::{FreshnessTier, classify};
    ingredients
        .iter()
        .filter(|i| {
            matches!(
                classify(i.expiry_date, now).tier,
                FreshnessTier::Expired | FreshnessTier::Expiring
            )
        })
        .collect()
}
