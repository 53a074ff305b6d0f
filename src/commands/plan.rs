//! Tauri commands for plan generation, the saved plan and CSV export

use chrono::Local;
use serde::Serialize;
use std::sync::Arc;
use tauri::State;

use crate::db::AppState;
use crate::error::PlanError;
use crate::export::{default_export_file_name, export_csv};
use crate::generator;
use crate::models::{PlanRequest, PlanResponse, TrainingPlan};
use crate::store::PlanStore;

#[derive(Debug, Clone, Serialize)]
pub struct CsvExport {
  pub file_name: String,
  pub content: String,
}

/// Generate a plan from the form request and save it for the calendar view.
/// Any generation failure comes back in the response envelope; a failure to
/// save the generated plan is returned as an error.
#[tauri::command]
pub async fn generate_training_plan(
  state: State<'_, Arc<AppState>>,
  request: PlanRequest,
) -> Result<PlanResponse, PlanError> {
  let result = request
    .into_input()
    .and_then(|input| generator::generate_training_plan(&input));

  let plan = match result {
    Ok(plan) => plan,
    Err(e) => {
      if e.is_input_error() {
        tracing::warn!(error = %e, "Rejected plan request");
      } else {
        tracing::error!(error = %e, "Plan generation failed");
      }
      return Ok(PlanResponse::failure(&e));
    }
  };

  state.plans.save(&plan).await?;
  Ok(PlanResponse::ok(plan))
}

#[tauri::command]
pub async fn get_saved_plan(
  state: State<'_, Arc<AppState>>,
) -> Result<Option<TrainingPlan>, PlanError> {
  state.plans.load().await
}

#[tauri::command]
pub async fn clear_saved_plan(state: State<'_, Arc<AppState>>) -> Result<(), PlanError> {
  state.plans.clear().await
}

#[tauri::command]
pub async fn export_saved_plan_csv(
  state: State<'_, Arc<AppState>>,
) -> Result<CsvExport, PlanError> {
  let plan = state
    .plans
    .load()
    .await?
    .ok_or_else(|| PlanError::Export("no saved plan to export".to_string()))?;

  Ok(CsvExport {
    file_name: default_export_file_name(Local::now().date_naive()),
    content: export_csv(&plan)?,
  })
}
