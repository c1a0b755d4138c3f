//! Helpers shared by the frame loop

use std::time::{Duration, Instant};

/// Frame budget for a target rate. Zero means "as fast as possible".
pub fn frame_duration(target_fps: u64) -> Duration {
    if target_fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs_f64(1.0 / target_fps as f64)
    }
}

/// Sleep off whatever is left of the frame budget.
///
/// Call at the end of each loop iteration with the `Instant` the frame
/// began at.
pub fn limit_frame_rate(frame_start: Instant, budget: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < budget {
        std::thread::sleep(budget - elapsed);
    }
}
