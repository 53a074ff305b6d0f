use std::env;

use crate::error::{PlanError, PlanResult};

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const DEFAULT_STORAGE_KEY: &str = "trainingPlan";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

const DATABASE_URL_VAR: &str = "PLANNER_DATABASE_URL";
const STORAGE_KEY_VAR: &str = "PLANNER_STORAGE_KEY";
const LOG_FILTER_VAR: &str = "PLANNER_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
  /// None means the caller picks (app data dir on desktop, in-memory otherwise)
  pub database_url: Option<String>,
  /// Key the saved plan lives under
  pub storage_key: String,
  /// tracing-subscriber filter directive
  pub log_filter: String,
}

impl Default for PlannerConfig {
  fn default() -> Self {
    Self {
      database_url: None,
      storage_key: DEFAULT_STORAGE_KEY.to_string(),
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    }
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  env::var(name)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

impl PlannerConfig {
  /// Read `.env` (if present) and then the process environment
  pub fn load() -> PlanResult<Self> {
    dotenvy::dotenv().ok();
    Self::from_env()
  }

  pub fn from_env() -> PlanResult<Self> {
    let defaults = Self::default();

    let database_url = non_empty_var(DATABASE_URL_VAR);
    if let Some(url) = &database_url {
      if !url.starts_with("sqlite:") {
        return Err(PlanError::Config(format!(
          "{} must be a sqlite: URL, got {}",
          DATABASE_URL_VAR, url
        )));
      }
    }

    Ok(Self {
      database_url,
      storage_key: non_empty_var(STORAGE_KEY_VAR).unwrap_or(defaults.storage_key),
      log_filter: non_empty_var(LOG_FILTER_VAR).unwrap_or(defaults.log_filter),
    })
  }

  pub fn database_url_or_memory(&self) -> &str {
    self.database_url.as_deref().unwrap_or(IN_MEMORY_DATABASE_URL)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn test_defaults_when_unset() {
    temp_env::with_vars_unset([DATABASE_URL_VAR, STORAGE_KEY_VAR, LOG_FILTER_VAR], || {
      let config = PlannerConfig::from_env().unwrap();
      assert_eq!(config, PlannerConfig::default());
      assert_eq!(config.database_url_or_memory(), IN_MEMORY_DATABASE_URL);
    });
  }

  #[test]
  #[serial]
  fn test_reads_environment() {
    temp_env::with_vars(
      [
        (DATABASE_URL_VAR, Some("sqlite://plans.db?mode=rwc")),
        (STORAGE_KEY_VAR, Some("springMarathon")),
        (LOG_FILTER_VAR, Some("marathon_planner_lib=debug")),
      ],
      || {
        let config = PlannerConfig::from_env().unwrap();
        assert_eq!(config.database_url.as_deref(), Some("sqlite://plans.db?mode=rwc"));
        assert_eq!(config.storage_key, "springMarathon");
        assert_eq!(config.log_filter, "marathon_planner_lib=debug");
      },
    );
  }

  #[test]
  #[serial]
  fn test_blank_values_fall_back() {
    temp_env::with_vars(
      [
        (DATABASE_URL_VAR, Some("  ")),
        (STORAGE_KEY_VAR, Some("")),
        (LOG_FILTER_VAR, None),
      ],
      || {
        let config = PlannerConfig::from_env().unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
      },
    );
  }

  #[test]
  #[serial]
  fn test_rejects_non_sqlite_url() {
    temp_env::with_var(DATABASE_URL_VAR, Some("postgres://localhost/plans"), || {
      assert!(matches!(PlannerConfig::from_env(), Err(PlanError::Config(_))));
    });
  }
}
