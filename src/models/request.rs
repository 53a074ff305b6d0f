use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::models::{DistanceGrowthMode, RaceType, RunnerInput, TrainingPlan};

/// Plan request as it arrives from the form; every field may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanRequest {
  #[serde(rename = "raceType")]
  pub race_type: Option<RaceType>,
  #[serde(rename = "currentPB")]
  pub current_pb: Option<String>,
  #[serde(rename = "targetPB")]
  pub target_pb: Option<String>,
  #[serde(rename = "raceDate")]
  pub race_date: Option<NaiveDate>,
  #[serde(rename = "weeklyFrequency")]
  pub weekly_frequency: Option<u8>,
  #[serde(rename = "weeklyMileage")]
  pub weekly_mileage: Option<f64>,
  #[serde(rename = "currentWeeklyMileage")]
  pub current_weekly_mileage: Option<f64>,
  #[serde(rename = "distanceGrowthMode")]
  pub distance_growth_mode: Option<DistanceGrowthMode>,
}

fn required<T>(value: Option<T>, field: &'static str) -> PlanResult<T> {
  value.ok_or(PlanError::MissingField(field))
}

impl PlanRequest {
  /// Reject missing required fields; range checks happen in validation
  pub fn into_input(self) -> PlanResult<RunnerInput> {
    let current_pb = required(self.current_pb.filter(|s| !s.trim().is_empty()), "currentPB")?;
    let target_pb = required(self.target_pb.filter(|s| !s.trim().is_empty()), "targetPB")?;

    Ok(RunnerInput {
      race_type: required(self.race_type, "raceType")?,
      current_pb,
      target_pb,
      race_date: required(self.race_date, "raceDate")?,
      weekly_frequency: required(self.weekly_frequency, "weeklyFrequency")?,
      weekly_mileage: required(self.weekly_mileage, "weeklyMileage")?,
      current_weekly_mileage: self.current_weekly_mileage,
      distance_growth_mode: self.distance_growth_mode.unwrap_or_default(),
    })
  }
}

/// Response envelope: `{ success: true, data }` or `{ success: false, error }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<TrainingPlan>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl PlanResponse {
  pub fn ok(plan: TrainingPlan) -> Self {
    Self {
      success: true,
      data: Some(plan),
      error: None,
    }
  }

  pub fn failure(error: &PlanError) -> Self {
    Self {
      success: false,
      data: None,
      error: Some(error.to_string()),
    }
  }
}

impl From<PlanResult<TrainingPlan>> for PlanResponse {
  fn from(result: PlanResult<TrainingPlan>) -> Self {
    match result {
      Ok(plan) => Self::ok(plan),
      Err(e) => Self::failure(&e),
    }
  }
}
