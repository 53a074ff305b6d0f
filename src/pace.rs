//! Duration and pace text conversion
//!
//! Race times are written "H:MM:SS" or "H:MM", paces "M:SS" per kilometre.
//! Parsing is strict: two-digit minute/second fields below 60, digits only.

use crate::error::{PlanError, PlanResult};

fn parse_field(field: &str, max: Option<u32>) -> Option<u32> {
  if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
    return None;
  }
  let value: u32 = field.parse().ok()?;
  match max {
    Some(limit) if field.len() != 2 || value >= limit => None,
    _ => Some(value),
  }
}

/// Parse "H:MM:SS" or "H:MM" into total seconds
pub fn duration_to_seconds(text: &str) -> PlanResult<u32> {
  let invalid = || PlanError::InvalidDuration(text.to_string());
  let parts: Vec<&str> = text.trim().split(':').collect();

  let (hours, minutes, seconds) = match parts.as_slice() {
    [h, m] => (parse_field(h, None), parse_field(m, Some(60)), Some(0)),
    [h, m, s] => (
      parse_field(h, None),
      parse_field(m, Some(60)),
      parse_field(s, Some(60)),
    ),
    _ => return Err(invalid()),
  };

  match (hours, minutes, seconds) {
    (Some(h), Some(m), Some(s)) => h
      .checked_mul(3600)
      .and_then(|h| h.checked_add(m * 60 + s))
      .ok_or_else(invalid),
    _ => Err(invalid()),
  }
}

/// Format seconds-per-km as "M:SS"
pub fn seconds_to_pace(seconds: f64) -> PlanResult<String> {
  if !seconds.is_finite() || seconds < 0.0 {
    return Err(PlanError::InvalidPace(format!("{} s/km", seconds)));
  }
  let total = seconds.round() as u64;
  Ok(format!("{}:{:02}", total / 60, total % 60))
}

/// Parse "M:SS" pace text back into seconds-per-km
pub fn pace_to_seconds(text: &str) -> PlanResult<u32> {
  let invalid = || PlanError::InvalidPace(text.to_string());
  match text.trim().split(':').collect::<Vec<_>>().as_slice() {
    [m, s] => match (parse_field(m, None), parse_field(s, Some(60))) {
      (Some(m), Some(s)) => Ok(m * 60 + s),
      _ => Err(invalid()),
    },
    _ => Err(invalid()),
  }
}

/// Format seconds as "H:MM", truncating seconds
pub fn seconds_to_clock(seconds: u32) -> String {
  format!("{}:{:02}", seconds / 3600, (seconds % 3600) / 60)
}
