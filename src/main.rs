use chrono::Local;
use dotenvy::dotenv;
use freshplan::config::{database, settings};
use freshplan::errors::Result;
use freshplan::session::{Session, urgent_ingredients};
use freshplan::store::Store;
use freshplan::sync::LocalSyncAdapter;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application settings
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load application settings: {e}"))?;
    info!(user = %settings.user.id, "Loaded application settings.");

    // 4. Initialize the local database
    let db = database::create_connection(&settings.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Open the sync adapter and start a session
    let adapter = Arc::new(LocalSyncAdapter::open(db).await?);
    let store = Arc::new(Store::new());
    let session = Session::start(Arc::clone(&store), adapter, &settings.user.id).await;

    // 6. Log a freshness summary for the signed-in household
    let snapshot = store.snapshot().await;
    info!(
        ingredients = snapshot.ingredients.len(),
        recipes = snapshot.recipes.len(),
        meal_plans = snapshot.meal_plans.len(),
        shopping_items = snapshot.shopping_list.len(),
        "Inventory loaded."
    );
    let now = Local::now().naive_local();
    for ingredient in urgent_ingredients(&snapshot.ingredients, now) {
        info!(
            name = %ingredient.name,
            expires = %ingredient.expiry_date,
            "Use soon or may spoil!"
        );
    }

    session.end().await;
    Ok(())
}
