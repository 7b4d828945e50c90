//! Frame-stepped tween animations
//!
//! An [`Animation`] owns a precomputed list of frame values and a cursor into
//! it. Each call to [`Animation::step`] delivers the next value to the step
//! hook. Lifecycle hooks receive the animation's [`AnimationState`] explicitly
//! so they can inspect or adjust it, and share data through its keyed store.

use rustc_hash::FxHashMap;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::easing::{Curve, Increments};
use crate::interpolate::interpolate;
use crate::speed::Speed;

/// Lifecycle hook invoked with the animation's state
pub type Hook = Rc<dyn Fn(&mut AnimationState)>;

/// Step hook invoked with the animation's state and the value for this frame
pub type StepHook = Rc<dyn Fn(&mut AnimationState, &str)>;

/// An animation held by reference by a driver
pub type SharedAnimation = Rc<RefCell<Animation>>;

/// Derived lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Created, not stepped yet
    Idle,
    /// Started and still delivering values
    Running,
    /// All values delivered, or aborted
    Done,
}

/// What a single [`Animation::step`] call did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// A value was delivered and more remain
    Continue,
    /// This step completed the animation
    Finished,
    /// The animation was already done; nothing happened
    Inactive,
}

/// Mutable state of an animation, handed to every hook
pub struct AnimationState {
    start: f64,
    end: f64,
    curve: Curve,
    increments: Increments,
    values: Vec<String>,
    cursor: usize,
    started: bool,
    finished: bool,
    duration: Option<Speed>,
    target: Option<Rc<dyn Any>>,
    store: FxHashMap<String, Box<dyn Any>>,
}

impl AnimationState {
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Increments the values were computed from
    pub fn increments(&self) -> &[i32] {
        &self.increments
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Replace the frame values. Allowed until the first value is consumed.
    pub fn set_values(&mut self, values: Vec<String>) {
        self.values = values;
    }

    /// Recompute the frame values for new bounds using the resolved increments.
    ///
    /// Used by start hooks that only learn their real bounds at runtime.
    pub fn retarget(&mut self, start: f64, end: f64) {
        self.start = start;
        self.end = end;
        self.values = interpolate(start, end, &self.increments);
    }

    /// Index of the next value to deliver
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of steps
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn status(&self) -> AnimationStatus {
        match (self.started, self.finished) {
            (_, true) => AnimationStatus::Done,
            (true, false) => AnimationStatus::Running,
            (false, false) => AnimationStatus::Idle,
        }
    }

    /// Mark the animation done without delivering further values.
    ///
    /// The finish hook does not run for an aborted animation.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    pub fn duration(&self) -> Option<&Speed> {
        self.duration.as_ref()
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// The animated target, if one was given and it has type `T`
    pub fn target<T: 'static>(&self) -> Option<&T> {
        self.target.as_deref()?.downcast_ref::<T>()
    }

    pub fn target_rc(&self) -> Option<Rc<dyn Any>> {
        self.target.clone()
    }

    /// Read a value from the keyed store
    pub fn data<T: 'static>(&self, key: &str) -> Option<&T> {
        self.store.get(key)?.downcast_ref::<T>()
    }

    pub fn data_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.store.get_mut(key)?.downcast_mut::<T>()
    }

    /// Write a value to the keyed store, replacing any previous one
    pub fn set_data<T: 'static>(&mut self, key: impl Into<String>, value: T) {
        self.store.insert(key.into(), Box::new(value));
    }

    pub fn insert_data_boxed(&mut self, key: impl Into<String>, value: Box<dyn Any>) {
        self.store.insert(key.into(), value);
    }

    pub fn remove_data(&mut self, key: &str) -> Option<Box<dyn Any>> {
        self.store.remove(key)
    }

    pub fn has_data(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    pub fn data_len(&self) -> usize {
        self.store.len()
    }
}

impl fmt::Debug for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationState")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("curve", &self.curve)
            .field("values", &self.values)
            .field("cursor", &self.cursor)
            .field("started", &self.started)
            .field("finished", &self.finished)
            .field("duration", &self.duration)
            .field("has_target", &self.target.is_some())
            .field("store_keys", &self.store.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A single tween: frame values, a cursor and lifecycle hooks
pub struct Animation {
    state: AnimationState,
    on_start: Option<Hook>,
    on_finish: Option<Hook>,
    on_step: Option<StepHook>,
}

impl Animation {
    pub(crate) fn new(
        start: f64,
        end: f64,
        curve: Curve,
        increments: Increments,
        values: Vec<String>,
    ) -> Self {
        Self {
            state: AnimationState {
                start,
                end,
                curve,
                increments,
                values,
                cursor: 0,
                started: false,
                finished: false,
                duration: None,
                target: None,
                store: FxHashMap::default(),
            },
            on_start: None,
            on_finish: None,
            on_step: None,
        }
    }

    /// Animation over explicit increments between `start` and `end`
    pub fn from_increments(start: f64, end: f64, increments: impl IntoIterator<Item = i32>) -> Self {
        let increments: Increments = increments.into_iter().collect();
        let values = interpolate(start, end, &increments);
        Self::new(start, end, Curve::Sequence(increments.clone()), increments, values)
    }

    /// Animation that delivers exactly the given values
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::new(0.0, 0.0, Curve::Sequence(Increments::new()), Increments::new(), values)
    }

    /// Builder: hook run once before the first value is delivered
    pub fn on_start<F: Fn(&mut AnimationState) + 'static>(mut self, hook: F) -> Self {
        self.on_start = Some(Rc::new(hook));
        self
    }

    /// Builder: hook run once after the last value is delivered
    pub fn on_finish<F: Fn(&mut AnimationState) + 'static>(mut self, hook: F) -> Self {
        self.on_finish = Some(Rc::new(hook));
        self
    }

    /// Builder: hook receiving every frame value
    pub fn on_step<F: Fn(&mut AnimationState, &str) + 'static>(mut self, hook: F) -> Self {
        self.on_step = Some(Rc::new(hook));
        self
    }

    pub(crate) fn with_hooks(
        mut self,
        on_start: Option<Hook>,
        on_finish: Option<Hook>,
        on_step: Option<StepHook>,
    ) -> Self {
        self.on_start = on_start;
        self.on_finish = on_finish;
        self.on_step = on_step;
        self
    }

    /// Builder: attach the opaque thing being animated
    pub fn with_target<T: 'static>(mut self, target: T) -> Self {
        self.state.target = Some(Rc::new(target));
        self
    }

    /// Builder: duration used when run by a [`StandaloneRunner`](crate::StandaloneRunner)
    pub fn with_duration(mut self, duration: impl Into<Speed>) -> Self {
        self.state.duration = Some(duration.into());
        self
    }

    pub(crate) fn with_duration_opt(mut self, duration: Option<Speed>) -> Self {
        self.state.duration = duration;
        self
    }

    /// Builder: seed the keyed store
    pub fn with_data<T: 'static>(mut self, key: impl Into<String>, value: T) -> Self {
        self.state.set_data(key, value);
        self
    }

    pub fn into_shared(self) -> SharedAnimation {
        Rc::new(RefCell::new(self))
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AnimationState {
        &mut self.state
    }

    pub fn status(&self) -> AnimationStatus {
        self.state.status()
    }

    pub fn is_started(&self) -> bool {
        self.state.started
    }

    pub fn is_finished(&self) -> bool {
        self.state.finished
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn values(&self) -> &[String] {
        &self.state.values
    }

    /// Advance by one frame.
    ///
    /// The first call runs the start hook, which may replace the values or
    /// abort via [`AnimationState::finish`]. A value is delivered when the
    /// animation is not done; the step that delivers the last value then runs
    /// the finish hook. Once done, further calls do nothing until [`reset`].
    ///
    /// [`reset`]: Animation::reset
    pub fn step(&mut self) -> StepOutcome {
        if !self.state.started {
            if let Some(hook) = self.on_start.clone() {
                hook(&mut self.state);
            }
            self.state.started = true;
        }

        if self.state.finished {
            return StepOutcome::Inactive;
        }

        // Length is re-read every step: the start hook may have replaced values
        if let Some(value) = self.state.values.get(self.state.cursor).cloned() {
            if let Some(hook) = self.on_step.clone() {
                hook(&mut self.state, &value);
            }
            self.state.cursor += 1;
        }

        if self.state.finished {
            return StepOutcome::Finished;
        }

        if self.state.cursor >= self.state.values.len() {
            if let Some(hook) = self.on_finish.clone() {
                hook(&mut self.state);
            }
            self.state.finished = true;
            return StepOutcome::Finished;
        }

        StepOutcome::Continue
    }

    /// Return to Idle keeping values, bounds, hooks and target
    pub fn reset(&mut self) {
        self.state.cursor = 0;
        self.state.started = false;
        self.state.finished = false;
        self.state.store.clear();
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("state", &self.state)
            .field("on_start", &self.on_start.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .field("on_step", &self.on_step.is_some())
            .finish()
    }
}
