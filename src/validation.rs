use chrono::NaiveDate;

use crate::error::{PlanError, PlanResult};
use crate::models::RunnerInput;
use crate::pace::{duration_to_seconds, seconds_to_clock};

pub const MIN_WEEKLY_FREQUENCY: u8 = 3;
pub const MAX_WEEKLY_FREQUENCY: u8 = 7;

/// Target weekly volume bounds in km, inclusive
pub const MIN_WEEKLY_MILEAGE: f64 = 10.0;
pub const MAX_WEEKLY_MILEAGE: f64 = 120.0;
pub const MAX_CURRENT_WEEKLY_MILEAGE: f64 = 100.0;

/// Check runner input before generation, returning the first rule that fails
pub fn validate_input(input: &RunnerInput, today: NaiveDate) -> PlanResult<()> {
  if !(MIN_WEEKLY_FREQUENCY..=MAX_WEEKLY_FREQUENCY).contains(&input.weekly_frequency) {
    return Err(PlanError::Validation(format!(
      "weekly frequency must be between {} and {} sessions, got {}",
      MIN_WEEKLY_FREQUENCY, MAX_WEEKLY_FREQUENCY, input.weekly_frequency
    )));
  }

  if !(MIN_WEEKLY_MILEAGE..=MAX_WEEKLY_MILEAGE).contains(&input.weekly_mileage) {
    return Err(PlanError::Validation(format!(
      "weekly mileage must be between {} and {} km, got {}",
      MIN_WEEKLY_MILEAGE, MAX_WEEKLY_MILEAGE, input.weekly_mileage
    )));
  }

  if let Some(current) = input.current_weekly_mileage {
    if !(0.0..=MAX_CURRENT_WEEKLY_MILEAGE).contains(&current) {
      return Err(PlanError::Validation(format!(
        "current weekly mileage must be between 0 and {} km, got {}",
        MAX_CURRENT_WEEKLY_MILEAGE, current
      )));
    }
  }

  let current_pb = duration_to_seconds(&input.current_pb)?;
  let target_pb = duration_to_seconds(&input.target_pb)?;

  let (min, max) = input.race_type.pb_bounds();
  for (name, seconds) in [("current PB", current_pb), ("target PB", target_pb)] {
    if seconds < min || seconds > max {
      return Err(PlanError::Validation(format!(
        "{} {} must be between {} and {}",
        input.race_type.label(),
        name,
        seconds_to_clock(min),
        seconds_to_clock(max)
      )));
    }
  }

  if target_pb >= current_pb {
    return Err(PlanError::Validation(
      "target PB must be faster than current PB".to_string(),
    ));
  }

  if input.race_date <= today {
    return Err(PlanError::Validation(format!(
      "race date {} must be after today ({})",
      input.race_date, today
    )));
  }

  Ok(())
}
