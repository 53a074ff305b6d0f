//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Runner input and plan factories

use chrono::{Duration, NaiveDate};
use sqlx::SqlitePool;

use crate::generator::{generate_training_plan_on, plan_start_date};
use crate::models::{DistanceGrowthMode, RaceType, RunnerInput, TrainingPlan};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Plan Factories
/// ---------------------------------------------------------------------------

/// Fixed "today" so generated dates are stable
pub fn today() -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date")
}

/// Reference runner: 4:30 marathoner aiming for 4:00, 5 runs a week, 30 -> 40 km
pub fn make_runner_input(race_date: NaiveDate) -> RunnerInput {
  RunnerInput {
    race_type: RaceType::Full,
    current_pb: "4:30:00".to_string(),
    target_pb: "4:00:00".to_string(),
    race_date,
    weekly_frequency: 5,
    weekly_mileage: 40.0,
    current_weekly_mileage: Some(30.0),
    distance_growth_mode: DistanceGrowthMode::Progressive,
  }
}

/// Generate a reference plan with the given number of weeks
pub fn make_plan(weeks: i64) -> TrainingPlan {
  let race_date = plan_start_date(today()) + Duration::weeks(weeks);
  generate_training_plan_on(&make_runner_input(race_date), today())
    .expect("Failed to generate test plan")
}
