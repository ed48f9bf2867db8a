// Path: crates/telemetry/src/time.rs
use std::time::Instant;

/// Logs the wall-clock duration of a scope at debug level when dropped.
#[must_use = "Timer must be bound to a variable to measure the enclosing scope"]
pub struct Timer {
    step: &'static str,
    start: Instant,
}

impl Timer {
    /// Starts timing `step`.
    pub fn new(step: &'static str) -> Self {
        Self {
            step,
            start: Instant::now(),
        }
    }

    /// Seconds elapsed since the timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        tracing::debug!(
            target: "telemetry",
            step = self.step,
            elapsed_secs = self.elapsed_secs(),
            "Step finished"
        );
    }
}
