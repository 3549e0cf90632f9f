use std::time::{Instant, Duration};

/// Measures frame deltas and the total time since the timer started.
pub struct RenderTimer {
    start_time: Instant,
    last_render_time: Instant,
}

impl RenderTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_render_time: now,
        }
    }

    pub fn get_delta(&mut self) -> Duration {
        let now = Instant::now();
        let delta_time = now - self.last_render_time;
        self.last_render_time = now;
        delta_time
    }

    pub fn total_time(&self) -> Duration {
        self.last_render_time - self.start_time
    }
}
