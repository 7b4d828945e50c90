//! Frame-synced batch scheduler
//!
//! Holds a batch of animations and advances all of them by one step per
//! frame. The loop re-arms itself through the injected [`FrameSource`] until
//! every animation is done, then fires the batch completion callback and
//! resets the batch so it can be replayed.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::animation::SharedAnimation;
use crate::clock::FrameSource;

/// Callback fired once when a batch run completes
pub type CompletionCallback = Box<dyn FnOnce()>;

#[derive(Default)]
struct SchedulerState {
    animations: Vec<SharedAnimation>,
    running: bool,
    /// Identifies the current loop; frame callbacks from an older loop are ignored
    loop_id: u64,
    /// A frame callback for the current loop is queued
    frame_pending: bool,
    ticks: u64,
    on_complete: Option<CompletionCallback>,
}

struct SchedulerInner {
    state: RefCell<SchedulerState>,
    frames: Rc<dyn FrameSource>,
}

/// The animation scheduler that ticks a batch of animations once per frame.
///
/// Cloning gives another handle to the same scheduler. Independent
/// schedulers can coexist; each has its own batch and running flag.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<SchedulerInner>,
}

impl Scheduler {
    pub fn new(frames: Rc<dyn FrameSource>) -> Self {
        Self {
            inner: Rc::new(SchedulerInner {
                state: RefCell::new(SchedulerState::default()),
                frames,
            }),
        }
    }

    /// Append an animation to the batch
    pub fn add(&self, animation: SharedAnimation) {
        self.inner.state.borrow_mut().animations.push(animation);
    }

    /// Append several animations, keeping their order
    pub fn extend(&self, animations: impl IntoIterator<Item = SharedAnimation>) {
        self.inner
            .state
            .borrow_mut()
            .animations
            .extend(animations);
    }

    pub fn len(&self) -> usize {
        self.inner.state.borrow().animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.state.borrow().animations.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.inner.state.borrow().running
    }

    /// Number of ticks run since creation
    pub fn tick_count(&self) -> u64 {
        self.inner.state.borrow().ticks
    }

    /// Handles to the animations in the batch, in insertion order
    pub fn animations(&self) -> Vec<SharedAnimation> {
        self.inner.state.borrow().animations.clone()
    }

    /// Start the frame loop. `on_complete` fires once when the batch is done.
    ///
    /// Returns `false` without doing anything if the loop is already running.
    pub fn run<F: FnOnce() + 'static>(&self, on_complete: F) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.running {
                tracing::debug!("Scheduler already running, ignoring run request");
                return false;
            }
            state.running = true;
            state.loop_id += 1;
            state.on_complete = Some(Box::new(on_complete));
            tracing::debug!("Starting scheduler loop with {} animations", state.animations.len());
        }
        self.request_tick();
        true
    }

    /// Advance every animation in the batch by one step.
    ///
    /// Normally invoked by the frame source after [`run`](Scheduler::run).
    /// While running, re-arms for another tick if any animation is not done.
    /// Once all are done, fires the completion callback and resets the batch.
    /// A manual call while a frame is already queued does not queue another.
    pub fn tick(&self) {
        let animations = {
            let mut state = self.inner.state.borrow_mut();
            state.ticks += 1;
            state.animations.clone()
        };

        // No borrow of the scheduler is held here, so hooks may call back into it
        for animation in &animations {
            animation.borrow_mut().step();
        }

        let (work_left, rearm) = {
            let state = self.inner.state.borrow();
            let work_left = state
                .animations
                .iter()
                .any(|animation| !animation.borrow().is_finished());
            tracing::trace!(
                tick = state.ticks,
                animations = state.animations.len(),
                work_left,
                "Scheduler pass"
            );
            (work_left, state.running && !state.frame_pending)
        };

        if work_left {
            if rearm {
                self.request_tick();
            }
            return;
        }

        let on_complete = {
            let mut state = self.inner.state.borrow_mut();
            state.running = false;
            state.frame_pending = false;
            state.loop_id += 1;
            state.on_complete.take()
        };
        tracing::debug!("Scheduler batch complete");
        if let Some(on_complete) = on_complete {
            on_complete();
        }
        self.reset_all();
    }

    /// Drop every animation in the batch.
    ///
    /// During a pass the animations not yet stepped are still stepped this
    /// pass; the loop then completes at the end of it.
    pub fn clear(&self) {
        self.inner.state.borrow_mut().animations.clear();
    }

    /// Reset every animation in the batch to Idle, keeping them.
    ///
    /// When called from a hook, the animation whose hook made the call is
    /// mid-step and is left as it is.
    pub fn reset_all(&self) {
        for animation in self.animations() {
            match animation.try_borrow_mut() {
                Ok(mut animation) => animation.reset(),
                Err(_) => tracing::trace!("Skipping reset of an animation that is mid-step"),
            }
        }
    }

    fn request_tick(&self) {
        let loop_id = {
            let mut state = self.inner.state.borrow_mut();
            state.frame_pending = true;
            state.loop_id
        };
        let weak: Weak<SchedulerInner> = Rc::downgrade(&self.inner);
        self.inner.frames.request_tick(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            {
                let mut state = inner.state.borrow_mut();
                if !state.running || state.loop_id != loop_id {
                    tracing::trace!(loop_id, "Ignoring frame from a finished loop");
                    return;
                }
                state.frame_pending = false;
            }
            Scheduler { inner }.tick();
        }));
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Scheduler")
            .field("animations", &state.animations.len())
            .field("running", &state.running)
            .field("ticks", &state.ticks)
            .finish()
    }
}
