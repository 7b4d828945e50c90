//! Timed single-animation driver
//!
//! Runs one animation on a repeating timer so that it lasts a given duration,
//! independently of any [`Scheduler`](crate::Scheduler) batch.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::animation::{Animation, SharedAnimation, StepOutcome};
use crate::clock::{IntervalTimer, TimerId};
use crate::error::Result;
use crate::speed::{Speed, SpeedTable};

/// Drives a single animation with a fixed-interval timer
pub struct StandaloneRunner {
    timer: Rc<dyn IntervalTimer>,
    speeds: SpeedTable,
}

impl StandaloneRunner {
    pub fn new(timer: Rc<dyn IntervalTimer>, speeds: SpeedTable) -> Self {
        Self { timer, speeds }
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    /// Total duration for an animation: `duration` if given, else the
    /// animation's own duration, else the `normal` speed.
    pub fn duration_for(&self, animation: &Animation, duration: Option<&Speed>) -> Result<Duration> {
        self.speeds
            .resolve_or_default(duration.or(animation.state().duration()))
    }

    /// Time between steps: the total duration split evenly over the values
    pub fn interval_for(&self, animation: &Animation, duration: Option<&Speed>) -> Result<Duration> {
        let total = self.duration_for(animation, duration)?;
        let steps = animation.values().len();
        if steps == 0 {
            return Ok(total);
        }
        Ok(total / u32::try_from(steps).unwrap_or(u32::MAX))
    }

    /// Start driving `animation`. The timer cancels itself once the
    /// animation is done.
    ///
    /// The step count is read now, so a start hook that changes the number of
    /// values changes the total duration rather than the interval.
    pub fn run(&self, animation: SharedAnimation, duration: Option<Speed>) -> Result<TimerId> {
        let interval = self.interval_for(&animation.borrow(), duration.as_ref())?;
        let own_id: Rc<Cell<Option<TimerId>>> = Rc::default();
        let timer = Rc::downgrade(&self.timer);

        let slot = own_id.clone();
        let id = self.timer.set_repeating(
            interval,
            Box::new(move || {
                let outcome = animation.borrow_mut().step();
                if outcome == StepOutcome::Continue {
                    return;
                }
                if let (Some(timer), Some(id)) = (timer.upgrade(), slot.get()) {
                    tracing::debug!("Standalone animation done, cancelling timer {:?}", id);
                    timer.cancel(id);
                }
            }),
        );
        own_id.set(Some(id));

        tracing::debug!(
            "Standalone animation started: interval {:?}, timer {:?}",
            interval,
            id
        );
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::AnimationError;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    fn setup() -> (Rc<ManualClock>, StandaloneRunner) {
        let clock = Rc::new(ManualClock::new());
        let runner = StandaloneRunner::new(clock.clone(), SpeedTable::builtin());
        (clock, runner)
    }

    fn recording(values: &[&str]) -> (SharedAnimation, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let anim = Animation::from_values(values.iter().copied())
            .on_step(move |_, v| s.borrow_mut().push(v.to_string()))
            .into_shared();
        (anim, seen)
    }

    #[test]
    fn interval_splits_duration_over_steps() {
        let (_clock, runner) = setup();
        let anim = Animation::from_values(["1", "2", "3", "4"]);
        assert_eq!(
            runner.interval_for(&anim, Some(&Speed::Millis(400))).unwrap(),
            Duration::from_millis(100)
        );
        assert_eq!(
            runner.interval_for(&anim, Some(&Speed::from("slow"))).unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn duration_resolution_order() {
        let (_clock, runner) = setup();
        let own = Animation::from_values(["1"]).with_duration("fast");
        assert_eq!(
            runner.duration_for(&own, None).unwrap(),
            Duration::from_millis(400)
        );
        assert_eq!(
            runner.duration_for(&own, Some(&Speed::Millis(50))).unwrap(),
            Duration::from_millis(50)
        );
        let plain = Animation::from_values(["1"]);
        assert_eq!(
            runner.duration_for(&plain, None).unwrap(),
            Duration::from_millis(800)
        );
    }

    #[test]
    fn unknown_speed_is_rejected() {
        let (clock, runner) = setup();
        let (anim, _) = recording(&["1"]);
        let err = runner.run(anim, Some(Speed::from("ludicrous"))).unwrap_err();
        assert!(matches!(err, AnimationError::UnknownSpeed(_)));
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn runs_to_completion_and_cancels_itself() {
        let (clock, runner) = setup();
        let (anim, seen) = recording(&["1", "2", "3", "4"]);
        runner.run(anim.clone(), Some(Speed::Millis(400))).unwrap();

        assert_eq!(clock.advance(Duration::from_millis(250)), 2);
        assert_eq!(*seen.borrow(), vec!["1", "2"]);
        assert!(anim.borrow().is_started());

        clock.advance(Duration::from_millis(1000));
        assert_eq!(*seen.borrow(), vec!["1", "2", "3", "4"]);
        assert!(anim.borrow().is_finished());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn aborted_animation_cancels_timer() {
        let (clock, runner) = setup();
        let anim = Animation::from_values(["1", "2"])
            .on_start(|state| state.finish())
            .into_shared();
        runner.run(anim, None).unwrap();
        assert_eq!(clock.advance(Duration::from_secs(5)), 1);
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn empty_animation_finishes_after_whole_duration() {
        let (clock, runner) = setup();
        let finished = Rc::new(Cell::new(false));
        let f = finished.clone();
        let anim = Animation::from_values(Vec::<String>::new())
            .on_finish(move |_| f.set(true))
            .into_shared();
        runner.run(anim, Some(Speed::Millis(100))).unwrap();

        clock.advance(Duration::from_millis(99));
        assert!(!finished.get());
        clock.advance(Duration::from_millis(1));
        assert!(finished.get());
        assert_eq!(clock.active_timers(), 0);
    }
}
