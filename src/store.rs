//! Saved-plan persistence
//!
//! The generator never touches storage. Callers hand a finished plan to a
//! `PlanStore`, which keeps it as JSON under one fixed key and gives it back
//! for the calendar view.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use crate::error::PlanResult;
use crate::models::TrainingPlan;

#[async_trait]
pub trait PlanStore: Send + Sync {
  /// Replace the saved plan
  async fn save(&self, plan: &TrainingPlan) -> PlanResult<()>;

  async fn load(&self) -> PlanResult<Option<TrainingPlan>>;

  async fn clear(&self) -> PlanResult<()>;
}

/// ---------------------------------------------------------------------------
/// SQLite
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqlitePlanStore {
  pool: SqlitePool,
  key: String,
}

impl SqlitePlanStore {
  pub fn new(pool: SqlitePool, key: impl Into<String>) -> Self {
    Self {
      pool,
      key: key.into(),
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }
}

#[async_trait]
impl PlanStore for SqlitePlanStore {
  async fn save(&self, plan: &TrainingPlan) -> PlanResult<()> {
    let plan_json = serde_json::to_string(plan)?;

    sqlx::query(
      r#"
      INSERT INTO saved_plans (storage_key, plan_json, updated_at)
      VALUES (?1, ?2, ?3)
      ON CONFLICT(storage_key) DO UPDATE SET
        plan_json = excluded.plan_json,
        updated_at = excluded.updated_at
      "#,
    )
    .bind(&self.key)
    .bind(&plan_json)
    .bind(Utc::now().to_rfc3339())
    .execute(&self.pool)
    .await?;

    tracing::debug!(key = %self.key, weeks = plan.weeks.len(), "Saved training plan");
    Ok(())
  }

  async fn load(&self) -> PlanResult<Option<TrainingPlan>> {
    let row: Option<(String,)> =
      sqlx::query_as("SELECT plan_json FROM saved_plans WHERE storage_key = ?1")
        .bind(&self.key)
        .fetch_optional(&self.pool)
        .await?;

    match row {
      Some((json,)) => Ok(Some(serde_json::from_str(&json)?)),
      None => Ok(None),
    }
  }

  async fn clear(&self) -> PlanResult<()> {
    sqlx::query("DELETE FROM saved_plans WHERE storage_key = ?1")
      .bind(&self.key)
      .execute(&self.pool)
      .await?;

    tracing::debug!(key = %self.key, "Cleared saved training plan");
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// In-memory
/// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryPlanStore {
  slot: RwLock<Option<String>>,
}

impl MemoryPlanStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
  async fn save(&self, plan: &TrainingPlan) -> PlanResult<()> {
    let json = serde_json::to_string(plan)?;
    *self.slot.write().await = Some(json);
    Ok(())
  }

  async fn load(&self) -> PlanResult<Option<TrainingPlan>> {
    match self.slot.read().await.as_deref() {
      Some(json) => Ok(Some(serde_json::from_str(json)?)),
      None => Ok(None),
    }
  }

  async fn clear(&self) -> PlanResult<()> {
    *self.slot.write().await = None;
    Ok(())
  }
}
