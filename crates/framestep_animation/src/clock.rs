//! Timing strategies
//!
//! Drivers never measure or wait for time themselves. The [`Scheduler`] asks a
//! [`FrameSource`] to call it back before the next frame, and the
//! [`StandaloneRunner`] registers a repeating callback with an
//! [`IntervalTimer`]. The host picks the implementation once at startup.
//!
//! [`ManualClock`] implements both on a virtual clock that the host pumps,
//! either from its own event loop (e.g. on every redraw) or from tests.
//!
//! [`Scheduler`]: crate::Scheduler
//! [`StandaloneRunner`]: crate::StandaloneRunner

use slotmap::{new_key_type, SlotMap};
use std::cell::RefCell;
use std::time::Duration;

new_key_type! {
    /// Handle of a repeating timer
    pub struct TimerId;
}

/// Callback run once on the next frame
pub type FrameCallback = Box<dyn FnOnce()>;

/// Callback run on every timer interval
pub type TimerCallback = Box<dyn FnMut()>;

/// Frame interval assumed when the host has no refresh signal (~60Hz)
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Shortest interval a [`ManualClock`] timer may repeat at
pub const MIN_TIMER_INTERVAL: Duration = Duration::from_millis(1);

/// "Call me before the next repaint"
pub trait FrameSource {
    fn request_tick(&self, callback: FrameCallback);
}

/// Fixed-interval repeating timers
pub trait IntervalTimer {
    fn set_repeating(&self, interval: Duration, callback: TimerCallback) -> TimerId;
    fn cancel(&self, id: TimerId);
}

struct RepeatingTimer {
    interval: Duration,
    next_due: Duration,
    /// Taken out while the callback runs
    callback: Option<TimerCallback>,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    frames: Vec<FrameCallback>,
    frame_count: u64,
    timers: SlotMap<TimerId, RepeatingTimer>,
}

/// Host-pumped frame source and interval timer
#[derive(Default)]
pub struct ManualClock {
    state: RefCell<ClockState>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed through [`advance`](ManualClock::advance)
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of frames pumped so far
    pub fn frame_count(&self) -> u64 {
        self.state.borrow().frame_count
    }

    /// Callbacks waiting for the next frame
    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn active_timers(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Run one frame: every callback requested before this call.
    ///
    /// Requests made while the frame runs are queued for the next one.
    /// Returns how many callbacks ran.
    pub fn advance_frame(&self) -> usize {
        let callbacks = {
            let mut state = self.state.borrow_mut();
            state.frame_count += 1;
            std::mem::take(&mut state.frames)
        };
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        count
    }

    /// Pump frames until nothing requests another one, up to `max_frames`.
    /// Returns the number of frames that ran callbacks.
    pub fn run_frames(&self, max_frames: usize) -> usize {
        let mut frames = 0;
        while frames < max_frames && self.pending_frames() > 0 {
            self.advance_frame();
            frames += 1;
        }
        frames
    }

    /// Move the clock forward by `dt`, firing due timers in due-time order.
    /// Returns how many timer callbacks ran.
    pub fn advance(&self, dt: Duration) -> usize {
        let target = self.state.borrow().now + dt;
        let mut fired = 0;

        loop {
            let due = {
                let state = self.state.borrow();
                state
                    .timers
                    .iter()
                    .filter(|(_, timer)| timer.next_due <= target)
                    .min_by_key(|(_, timer)| timer.next_due)
                    .map(|(id, _)| id)
            };
            let Some(id) = due else { break };

            let callback = {
                let mut state = self.state.borrow_mut();
                let Some(timer) = state.timers.get_mut(id) else {
                    break;
                };
                let fire_at = timer.next_due;
                timer.next_due += timer.interval;
                let callback = timer.callback.take();
                state.now = fire_at;
                callback
            };

            if let Some(mut callback) = callback {
                callback();
                fired += 1;
                // The callback may have cancelled its own timer
                if let Some(timer) = self.state.borrow_mut().timers.get_mut(id) {
                    timer.callback = Some(callback);
                }
            }
        }

        self.state.borrow_mut().now = target;
        fired
    }
}

impl FrameSource for ManualClock {
    fn request_tick(&self, callback: FrameCallback) {
        self.state.borrow_mut().frames.push(callback);
    }
}

impl IntervalTimer for ManualClock {
    fn set_repeating(&self, interval: Duration, callback: TimerCallback) -> TimerId {
        let mut state = self.state.borrow_mut();
        let interval = interval.max(MIN_TIMER_INTERVAL);
        let next_due = state.now + interval;
        state.timers.insert(RepeatingTimer {
            interval,
            next_due,
            callback: Some(callback),
        })
    }

    fn cancel(&self, id: TimerId) {
        self.state.borrow_mut().timers.remove(id);
    }
}
