use std::time::{Duration, Instant};

use crate::core::Fps;

/// Per-frame scheduling collaborator.
///
/// The engine never blocks on its own; a host drives `tick()` calls and uses a
/// clock to pace them against the display. One `wait_next_frame` call suspends
/// until the next frame boundary.
pub trait FrameClock {
    fn wait_next_frame(&mut self);
}

/// Wall-clock pacing at a fixed FPS.
///
/// Deadlines accumulate from frame duration rather than from wake-up time, so
/// small sleep overshoots do not drift. A deadline missed by more than one
/// frame resyncs to now instead of trying to catch up.
#[derive(Debug)]
pub struct WallClock {
    frame: Duration,
    next: Instant,
}

impl WallClock {
    pub fn new(fps: Fps) -> Self {
        let frame = Duration::from_secs_f64(fps.frame_duration_secs());
        Self {
            frame,
            next: Instant::now(),
        }
    }
}

impl FrameClock for WallClock {
    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        if let Some(wait) = self.next.checked_duration_since(now) {
            std::thread::sleep(wait);
        } else if now.duration_since(self.next) > self.frame {
            self.next = now;
        }
        self.next += self.frame;
    }
}

/// Zero-wait clock for tests and offline frame dumps.
#[derive(Debug, Default)]
pub struct ManualClock;

impl FrameClock for ManualClock {
    fn wait_next_frame(&mut self) {}
}
