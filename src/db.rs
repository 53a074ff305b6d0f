use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::PlannerConfig;
use crate::error::{PlanError, PlanResult};
use crate::store::SqlitePlanStore;

pub type DbPool = SqlitePool;

/// Application state holding the database pool and the saved-plan store
pub struct AppState {
  pub db: DbPool,
  pub plans: SqlitePlanStore,
}

impl AppState {
  pub fn new(db: DbPool, config: &PlannerConfig) -> Self {
    let plans = SqlitePlanStore::new(db.clone(), config.storage_key.clone());
    Self { db, plans }
  }

  /// Headless setup: the configured URL, or an in-memory database
  pub async fn open(config: &PlannerConfig) -> PlanResult<Self> {
    let db = connect(config.database_url_or_memory()).await?;
    Ok(Self::new(db, config))
  }

  pub async fn close(&self) {
    self.db.close().await;
  }
}

/// Open a pool for `database_url` and run migrations
pub async fn connect(database_url: &str) -> PlanResult<DbPool> {
  tracing::info!(url = %database_url, "Initializing database");

  // Each in-memory connection is its own database, so keep exactly one
  let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect(database_url)
    .await?;

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .map_err(|e| PlanError::Storage(format!("Failed to run migrations: {}", e)))?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}

/// Database file inside the app data dir:
/// e.g. ~/Library/Application Support/com.marathontrainer.app/marathon-planner.db
#[cfg(feature = "desktop")]
fn get_db_path<R: tauri::Runtime>(app: &tauri::AppHandle<R>) -> PlanResult<std::path::PathBuf> {
  use tauri::Manager;

  let data_dir = app
    .path()
    .app_data_dir()
    .map_err(|e| PlanError::Storage(format!("Failed to get app data dir: {}", e)))?;

  std::fs::create_dir_all(&data_dir)
    .map_err(|e| PlanError::Storage(format!("Failed to create {}: {}", data_dir.display(), e)))?;

  Ok(data_dir.join("marathon-planner.db"))
}

/// Initialize the desktop database, honouring a configured URL first
#[cfg(feature = "desktop")]
pub async fn initialize_db<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &PlannerConfig,
) -> PlanResult<DbPool> {
  let db_url = match &config.database_url {
    Some(url) => url.clone(),
    None => format!("sqlite://{}?mode=rwc", get_db_path(app)?.display()),
  };
  connect(&db_url).await
}
