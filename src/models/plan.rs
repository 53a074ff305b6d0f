use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::level::{self, RunnerLevel};
use crate::pace::duration_to_seconds;

/// ---------------------------------------------------------------------------
/// Race Type
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceType {
  #[serde(rename = "full")]
  Full,
  #[serde(rename = "half")]
  Half,
  #[serde(rename = "10k")]
  TenK,
}

/// Per-race constants: (distance km, long-run base %, long-run peak %, PB min s, PB max s)
static RACE_TABLE: [(RaceType, f64, f64, f64, u32, u32); 3] = [
  (RaceType::Full, 42.195, 0.30, 0.40, 2 * 3600, 8 * 3600),
  (RaceType::Half, 21.0975, 0.35, 0.50, 3600, 4 * 3600),
  (RaceType::TenK, 10.0, 0.40, 0.60, 30 * 60, 2 * 3600),
];

impl RaceType {
  pub const ALL: [RaceType; 3] = [RaceType::Full, RaceType::Half, RaceType::TenK];

  fn row(&self) -> &'static (RaceType, f64, f64, f64, u32, u32) {
    match self {
      RaceType::Full => &RACE_TABLE[0],
      RaceType::Half => &RACE_TABLE[1],
      RaceType::TenK => &RACE_TABLE[2],
    }
  }

  pub fn distance_km(&self) -> f64 {
    self.row().1
  }

  /// Long-run share of weekly volume at the start of the plan
  pub fn long_run_base_pct(&self) -> f64 {
    self.row().2
  }

  /// Long-run share of weekly volume from the plan midpoint onwards
  pub fn long_run_peak_pct(&self) -> f64 {
    self.row().3
  }

  /// Plausible PB range in seconds, inclusive
  pub fn pb_bounds(&self) -> (u32, u32) {
    let row = self.row();
    (row.4, row.5)
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      RaceType::Full => "full",
      RaceType::Half => "half",
      RaceType::TenK => "10k",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      RaceType::Full => "全程马拉松",
      RaceType::Half => "半程马拉松",
      RaceType::TenK => "10公里",
    }
  }
}

impl std::fmt::Display for RaceType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for RaceType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "full" => Ok(Self::Full),
      "half" => Ok(Self::Half),
      "10k" => Ok(Self::TenK),
      _ => Err(format!("Unknown race type: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Session Type
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
  Long,
  Easy,
  Tempo,
  Interval,
  Recovery,
  Race,
}

impl SessionType {
  pub const ALL: [SessionType; 6] = [
    SessionType::Long,
    SessionType::Easy,
    SessionType::Tempo,
    SessionType::Interval,
    SessionType::Recovery,
    SessionType::Race,
  ];

  /// Multiplier applied to target race pace
  pub fn pace_multiplier(&self) -> f64 {
    match self {
      SessionType::Easy => 1.20,
      SessionType::Long => 1.15,
      SessionType::Tempo => 1.05,
      SessionType::Interval => 0.90,
      SessionType::Recovery => 1.30,
      SessionType::Race => 1.00,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      SessionType::Long => "long",
      SessionType::Easy => "easy",
      SessionType::Tempo => "tempo",
      SessionType::Interval => "interval",
      SessionType::Recovery => "recovery",
      SessionType::Race => "race",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      SessionType::Long => "长距离跑",
      SessionType::Easy => "轻松跑",
      SessionType::Tempo => "节奏跑",
      SessionType::Interval => "间歇跑",
      SessionType::Recovery => "恢复跑",
      SessionType::Race => "比赛",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      SessionType::Long => "以较慢的配速进行长距离训练，增强耐力和心肺功能",
      SessionType::Easy => "以舒适的配速进行训练，促进恢复和基础耐力建设",
      SessionType::Tempo => "以接近乳酸阈值的配速训练，提高有氧能力",
      SessionType::Interval => "高强度间歇训练，提高速度和无氧能力",
      SessionType::Recovery => "低强度恢复跑，促进身体恢复和血液循环",
      SessionType::Race => "模拟比赛强度的训练，适应比赛节奏",
    }
  }

  pub fn from_label(label: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.label() == label)
  }
}

impl std::fmt::Display for SessionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl std::str::FromStr for SessionType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| format!("Unknown session type: {}", s))
  }
}

/// ---------------------------------------------------------------------------
/// Distance Growth Mode
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceGrowthMode {
  /// Every week at the target mileage
  #[default]
  Fixed,
  /// Linear ramp from the current baseline to the target
  Progressive,
}

/// ---------------------------------------------------------------------------
/// Runner Input
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerInput {
  #[serde(rename = "raceType")]
  pub race_type: RaceType,
  /// "H:MM:SS" or "H:MM"
  #[serde(rename = "currentPB")]
  pub current_pb: String,
  #[serde(rename = "targetPB")]
  pub target_pb: String,
  #[serde(rename = "raceDate")]
  pub race_date: NaiveDate,
  #[serde(rename = "weeklyFrequency")]
  pub weekly_frequency: u8,
  /// Target weekly volume in km
  #[serde(rename = "weeklyMileage")]
  pub weekly_mileage: f64,
  /// Starting weekly volume in km
  #[serde(rename = "currentWeeklyMileage", default, skip_serializing_if = "Option::is_none")]
  pub current_weekly_mileage: Option<f64>,
  #[serde(rename = "distanceGrowthMode", default)]
  pub distance_growth_mode: DistanceGrowthMode,
}

/// ---------------------------------------------------------------------------
/// Generated Plan
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
  pub date: NaiveDate,
  #[serde(rename = "type")]
  pub session_type: SessionType,
  /// Kilometres, one decimal
  pub distance: f64,
  /// "M:SS" per km
  pub pace: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingWeek {
  pub number: u32,
  /// Rounded sum of session distances
  #[serde(rename = "totalDistance")]
  pub total_distance: u32,
  pub sessions: Vec<TrainingSession>,
}

impl TrainingWeek {
  pub fn start_date(&self) -> Option<NaiveDate> {
    self.sessions.first().map(|s| s.date)
  }

  pub fn long_run(&self) -> Option<&TrainingSession> {
    self
      .sessions
      .iter()
      .find(|s| s.session_type == SessionType::Long)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
  #[serde(flatten)]
  pub input: RunnerInput,
  pub weeks: Vec<TrainingWeek>,
}

impl TrainingPlan {
  /// Sum of the weekly totals in km
  pub fn total_distance(&self) -> u32 {
    self.weeks.iter().map(|w| w.total_distance).sum()
  }

  pub fn session_count(&self) -> usize {
    self.weeks.iter().map(|w| w.sessions.len()).sum()
  }

  pub fn sessions(&self) -> impl Iterator<Item = (&TrainingWeek, &TrainingSession)> {
    self
      .weeks
      .iter()
      .flat_map(|w| w.sessions.iter().map(move |s| (w, s)))
  }

  pub fn first_session_date(&self) -> Option<NaiveDate> {
    self.sessions().next().map(|(_, s)| s.date)
  }

  pub fn last_session_date(&self) -> Option<NaiveDate> {
    self.sessions().last().map(|(_, s)| s.date)
  }

  /// True when the minimum plan length pushed sessions beyond race day
  pub fn extends_past_race(&self) -> bool {
    self
      .last_session_date()
      .is_some_and(|d| d > self.input.race_date)
  }

  /// Level implied by the current PB, None if the PB text doesn't parse
  pub fn runner_level(&self) -> Option<RunnerLevel> {
    let seconds = duration_to_seconds(&self.input.current_pb).ok()?;
    Some(level::classify(self.input.race_type, seconds))
  }
}
