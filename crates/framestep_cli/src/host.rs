//! Real-time pump for the manual clock
//!
//! The terminal has no refresh signal, so the CLI plays the host: it sleeps
//! for a frame interval and then runs the frame, or feeds elapsed wall-clock
//! time to the timers.

use framestep_animation::ManualClock;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

/// Timer resolution when pumping interval timers
const TIMER_POLL: Duration = Duration::from_millis(1);

pub struct RealtimeHost {
    clock: Rc<ManualClock>,
    frame_interval: Duration,
}

impl RealtimeHost {
    pub fn new(clock: Rc<ManualClock>, frame_interval: Duration) -> Self {
        Self {
            clock,
            frame_interval,
        }
    }

    /// Run frames at the frame interval until nothing requests another.
    /// Returns the number of frames run.
    pub fn pump_frames(&self) -> usize {
        let mut frames = 0;
        while self.clock.pending_frames() > 0 {
            thread::sleep(self.frame_interval);
            self.clock.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Feed wall-clock time to the timers until none are left
    pub fn pump_timers(&self) -> Duration {
        let started = Instant::now();
        let mut last = started;
        while self.clock.active_timers() > 0 {
            thread::sleep(TIMER_POLL);
            let now = Instant::now();
            self.clock.advance(now - last);
            last = now;
        }
        started.elapsed()
    }
}
