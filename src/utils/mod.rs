use std::time::Instant;
use tracing::{debug, info};

/// RAII wall-clock logger for a labelled step. Logs on drop, so early
/// returns and `?` exits still get timed.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        debug!("{} started", label);
        Self {
            label,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!("{} done in {:.2?}", self.label, self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_drops_cleanly() {
        let t = Timer::start("noop");
        drop(t);
    }
}
