pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod generator;
pub mod level;
pub mod logging;
pub mod models;
pub mod pace;
pub mod store;
pub mod validation;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(test)]
mod test_utils;

pub use error::{PlanError, PlanResult};
pub use generator::{generate_training_plan, generate_training_plan_on};
pub use models::{
  DistanceGrowthMode, PlanRequest, PlanResponse, RaceType, RunnerInput, SessionType,
  TrainingPlan, TrainingSession, TrainingWeek,
};
pub use store::{MemoryPlanStore, PlanStore, SqlitePlanStore};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  use config::PlannerConfig;
  use db::AppState;
  use std::sync::Arc;
  use tauri::Manager;

  let config = PlannerConfig::load().unwrap_or_else(|e| {
    eprintln!("Invalid configuration, using defaults: {}", e);
    PlannerConfig::default()
  });
  logging::init(&config);

  tauri::Builder::default()
    .setup(move |app| {
      let app_handle = app.handle().clone();
      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&app_handle, &config).await {
          Ok(pool) => {
            let state = Arc::new(AppState::new(pool, &config));
            app_handle.manage(state);
            tracing::info!("Database ready");
          }
          Err(e) => {
            tracing::error!(error = %e, "Failed to initialize database");
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      commands::plan::generate_training_plan,
      commands::plan::get_saved_plan,
      commands::plan::clear_saved_plan,
      commands::plan::export_saved_plan_csv,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}
