pub mod plan;
pub mod request;

pub use plan::{
  DistanceGrowthMode, RaceType, RunnerInput, SessionType, TrainingPlan, TrainingSession,
  TrainingWeek,
};
pub use request::{PlanRequest, PlanResponse};
