//! CSV export of a generated plan
//!
//! One row per session: `date,training_type,distance_km,pace,week_number`,
//! with the session type written as its display label.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{PlanError, PlanResult};
use crate::models::{SessionType, TrainingPlan};
use crate::pace::pace_to_seconds;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
  pub date: NaiveDate,
  pub training_type: String,
  pub distance_km: f64,
  pub pace: String,
  pub week_number: u32,
}

impl ExportRow {
  pub fn session_type(&self) -> PlanResult<SessionType> {
    SessionType::from_label(&self.training_type)
      .ok_or_else(|| PlanError::Export(format!("Unknown training type: {}", self.training_type)))
  }
}

/// Download name for an export made on `today`
pub fn default_export_file_name(today: NaiveDate) -> String {
  format!("马拉松训练计划_{}.csv", today.format("%Y-%m-%d"))
}

pub fn export_rows(plan: &TrainingPlan) -> Vec<ExportRow> {
  plan
    .sessions()
    .map(|(week, session)| ExportRow {
      date: session.date,
      training_type: session.session_type.label().to_string(),
      distance_km: session.distance,
      pace: session.pace.clone(),
      week_number: week.number,
    })
    .collect()
}

/// Write the plan as CSV into any writer
pub fn export_csv_to<W: Write>(writer: W, plan: &TrainingPlan) -> PlanResult<()> {
  let rows = export_rows(plan);
  if rows.is_empty() {
    return Err(PlanError::Export("plan has no sessions".to_string()));
  }

  let mut csv_writer = csv::Writer::from_writer(writer);
  for row in &rows {
    csv_writer.serialize(row)?;
  }
  csv_writer
    .flush()
    .map_err(|e| PlanError::Export(e.to_string()))?;

  tracing::debug!(rows = rows.len(), "Exported plan to CSV");
  Ok(())
}

pub fn export_csv(plan: &TrainingPlan) -> PlanResult<String> {
  let mut buffer = Vec::new();
  export_csv_to(&mut buffer, plan)?;
  String::from_utf8(buffer).map_err(|e| PlanError::Export(e.to_string()))
}

/// Read an exported CSV back, checking type labels and pace text
pub fn parse_csv(data: &str) -> PlanResult<Vec<ExportRow>> {
  let mut reader = csv::Reader::from_reader(data.as_bytes());
  let mut rows = Vec::new();

  for result in reader.deserialize() {
    let row: ExportRow = result?;
    row.session_type()?;
    pace_to_seconds(&row.pace)?;
    rows.push(row);
  }

  Ok(rows)
}
