//! Runner level classification from a personal best

use serde::{Deserialize, Serialize};

use crate::models::RaceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerLevel {
  Beginner,
  Intermediate,
  Advanced,
  Elite,
}

impl RunnerLevel {
  pub fn label(&self) -> &'static str {
    match self {
      RunnerLevel::Beginner => "初学者",
      RunnerLevel::Intermediate => "中级跑者",
      RunnerLevel::Advanced => "高级跑者",
      RunnerLevel::Elite => "精英跑者",
    }
  }
}

/// Slowest PB (seconds) still counted at each level: (beginner, intermediate, advanced)
fn thresholds(race_type: RaceType) -> (u32, u32, u32) {
  match race_type {
    RaceType::Full => (16_200, 12_600, 10_800), // 4.5h, 3.5h, 3h
    RaceType::Half => (8_100, 6_300, 5_400),    // 2.25h, 1.75h, 1.5h
    RaceType::TenK => (3_600, 2_700, 2_160),    // 1h, 45min, 36min
  }
}

pub fn classify(race_type: RaceType, pb_seconds: u32) -> RunnerLevel {
  let (beginner, intermediate, advanced) = thresholds(race_type);
  match pb_seconds {
    s if s >= beginner => RunnerLevel::Beginner,
    s if s >= intermediate => RunnerLevel::Intermediate,
    s if s >= advanced => RunnerLevel::Advanced,
    _ => RunnerLevel::Elite,
  }
}
