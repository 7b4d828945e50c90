//! Animation option templates
//!
//! Every field is optional. [`AnimationOptions::merged_over`] fills unset
//! fields from a base template, which is how caller options combine with the
//! engine defaults and with registered presets.

use std::fmt;
use std::rc::Rc;

use crate::animation::{AnimationState, Hook, StepHook};
use crate::easing::Curve;
use crate::speed::Speed;

/// Options for building an animation
#[derive(Clone, Default)]
pub struct AnimationOptions {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub curve: Option<Curve>,
    /// Explicit frame values, used verbatim when no curve is given
    pub values: Option<Vec<String>>,
    pub duration: Option<Speed>,
    pub on_start: Option<Hook>,
    pub on_finish: Option<Hook>,
    pub on_step: Option<StepHook>,
}

impl AnimationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: f64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: f64) -> Self {
        self.end = Some(end);
        self
    }

    /// Set both bounds
    pub fn from_to(self, start: f64, end: f64) -> Self {
        self.start(start).end(end)
    }

    pub fn curve(mut self, curve: impl Into<Curve>) -> Self {
        self.curve = Some(curve.into());
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn duration(mut self, duration: impl Into<Speed>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn on_start<F: Fn(&mut AnimationState) + 'static>(mut self, hook: F) -> Self {
        self.on_start = Some(Rc::new(hook));
        self
    }

    pub fn on_finish<F: Fn(&mut AnimationState) + 'static>(mut self, hook: F) -> Self {
        self.on_finish = Some(Rc::new(hook));
        self
    }

    pub fn on_step<F: Fn(&mut AnimationState, &str) + 'static>(mut self, hook: F) -> Self {
        self.on_step = Some(Rc::new(hook));
        self
    }

    /// Fill every unset field from `base`
    pub fn merged_over(self, base: &AnimationOptions) -> AnimationOptions {
        AnimationOptions {
            start: self.start.or(base.start),
            end: self.end.or(base.end),
            curve: self.curve.or_else(|| base.curve.clone()),
            values: self.values.or_else(|| base.values.clone()),
            duration: self.duration.or_else(|| base.duration.clone()),
            on_start: self.on_start.or_else(|| base.on_start.clone()),
            on_finish: self.on_finish.or_else(|| base.on_finish.clone()),
            on_step: self.on_step.or_else(|| base.on_step.clone()),
        }
    }

    /// Overwrite fields of `self` with every field set in `other`
    pub fn apply(&mut self, other: AnimationOptions) {
        let merged = other.merged_over(self);
        *self = merged;
    }
}

impl fmt::Debug for AnimationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationOptions")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("curve", &self.curve)
            .field("values", &self.values)
            .field("duration", &self.duration)
            .field("on_start", &self.on_start.is_some())
            .field("on_finish", &self.on_finish.is_some())
            .field("on_step", &self.on_step.is_some())
            .finish()
    }
}
