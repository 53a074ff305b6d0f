use serde::Serialize;
use thiserror::Error;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum PlanError {
  #[error("Missing required field: {0}")]
  MissingField(&'static str),

  #[error("Invalid input: {0}")]
  Validation(String),

  #[error("Invalid duration '{0}': expected H:MM or H:MM:SS")]
  InvalidDuration(String),

  #[error("Invalid pace: {0}")]
  InvalidPace(String),

  #[error("Export failed: {0}")]
  Export(String),

  #[error("Storage error: {0}")]
  Storage(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Missing configuration: {0}")]
  Config(String),
}

impl PlanError {
  /// Rejections the caller can fix by changing the input
  pub fn is_input_error(&self) -> bool {
    matches!(
      self,
      PlanError::MissingField(_) | PlanError::Validation(_) | PlanError::InvalidDuration(_)
    )
  }
}

impl Serialize for PlanError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

impl From<csv::Error> for PlanError {
  fn from(e: csv::Error) -> Self {
    PlanError::Export(e.to_string())
  }
}

impl From<serde_json::Error> for PlanError {
  fn from(e: serde_json::Error) -> Self {
    PlanError::Storage(e.to_string())
  }
}

pub type PlanResult<T> = Result<T, PlanError>;
