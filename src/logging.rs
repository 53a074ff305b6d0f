use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{PlannerConfig, DEFAULT_LOG_FILTER};

/// Install the global fmt subscriber. Later calls are no-ops.
pub fn init(config: &PlannerConfig) {
  let filter = EnvFilter::try_new(&config.log_filter)
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer())
    .try_init();
}
