use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::logging::Logger;
use crate::metrics::SessionMetrics;

/// Configuration knobs for a fulfillment session.
#[derive(Clone)]
pub struct SessionConfig {
    /// Streak multiple at which a celebration event fires. Zero disables it.
    pub combo_threshold: u32,
    /// How long a drag may stay unresolved before the safety net clears it.
    pub drag_timeout: Duration,
    /// Optional structured logger used by the controller.
    pub logger: Option<Logger>,
    /// Metrics accumulator used for periodic snapshots.
    pub metrics: Option<Arc<Mutex<SessionMetrics>>>,
    /// Interval between metrics snapshot emissions. Zero disables snapshots.
    pub metrics_interval: Duration,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            combo_threshold: 5,
            drag_timeout: Duration::from_secs(5),
            logger: None,
            metrics: None,
            metrics_interval: Duration::from_secs(5),
            metrics_target: "packline::session.metrics".to_string(),
        }
    }
}

impl SessionConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(SessionMetrics::new())));
        }
    }

    /// Disable metrics collection and prevent further snapshots.
    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<SessionMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}
