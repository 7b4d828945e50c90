//! Integration tests for animator + scheduler + runner
//!
//! These tests verify that:
//! - Animations built by the animator run to completion under both drivers
//! - Lifecycle hooks fire in order for every built-in curve
//! - Batches replay after completion
//! - Start hooks can measure their target and retarget before the first frame

use framestep_animation::{
    AnimationOptions, AnimationStatus, Animator, ManualClock, Scheduler, Speed,
    StandaloneRunner,
};
use pretty_assertions::assert_eq;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

type Log = Rc<RefCell<Vec<String>>>;

fn logging_options(log: &Log) -> AnimationOptions {
    let (a, b, c) = (log.clone(), log.clone(), log.clone());
    AnimationOptions::new()
        .on_start(move |_| a.borrow_mut().push("start".into()))
        .on_step(move |_, v| b.borrow_mut().push(v.to_string()))
        .on_finish(move |_| c.borrow_mut().push("finish".into()))
}

/// Test that every built-in curve fires start once first and finish once last
#[test]
fn test_lifecycle_order_for_every_curve() {
    let animator = Animator::new();
    let names: Vec<String> = animator
        .easing()
        .names()
        .into_iter()
        .map(String::from)
        .collect();

    for name in names {
        let clock = Rc::new(ManualClock::new());
        let scheduler = Scheduler::new(clock.clone());
        let log: Log = Rc::default();

        let anim = animator
            .create(
                logging_options(&log)
                    .from_to(0.0, 100.0)
                    .curve(name.as_str()),
            )
            .unwrap();
        let steps = anim.values().len();
        scheduler.add(anim.into_shared());
        scheduler.run(|| {});
        assert_eq!(clock.run_frames(1000), steps, "curve {}", name);

        let log = log.borrow();
        assert_eq!(log.len(), steps + 2);
        assert_eq!(log.first().map(String::as_str), Some("start"));
        assert_eq!(log.last().map(String::as_str), Some("finish"));
        assert_eq!(log.iter().filter(|e| *e == "start").count(), 1);
        assert_eq!(log.iter().filter(|e| *e == "finish").count(), 1);
    }
}

/// Test that a two-step and a five-step animation share one five-tick loop
#[test]
fn test_mixed_length_batch() {
    let animator = Animator::new();
    let clock = Rc::new(ManualClock::new());
    let scheduler = Scheduler::new(clock.clone());

    let short = animator
        .create(AnimationOptions::new().from_to(0.0, 10.0).curve(vec![50, 50]))
        .unwrap()
        .into_shared();
    let long = animator
        .create(
            AnimationOptions::new()
                .from_to(0.0, 10.0)
                .curve(vec![20, 20, 20, 20, 20]),
        )
        .unwrap()
        .into_shared();
    scheduler.extend([short.clone(), long.clone()]);

    let completions = Rc::new(Cell::new(0));
    let c = completions.clone();
    assert!(scheduler.run(move || c.set(c.get() + 1)));

    for tick in 1..=4 {
        clock.advance_frame();
        assert!(scheduler.is_running(), "still running after tick {}", tick);
    }
    assert_eq!(short.borrow().status(), AnimationStatus::Done);
    assert_eq!(long.borrow().status(), AnimationStatus::Running);

    clock.advance_frame();
    assert_eq!(completions.get(), 1);
    assert!(!scheduler.is_running());
    assert_eq!(clock.pending_frames(), 0);
    for anim in [&short, &long] {
        assert!(!anim.borrow().is_started());
        assert!(!anim.borrow().is_finished());
    }
}

/// Test that a start hook can measure its target and retarget the values
#[test]
fn test_deferred_values_from_measured_target() {
    struct Panel {
        height: Cell<f64>,
        max_height: RefCell<Vec<String>>,
    }

    let animator = Animator::new();
    let clock = Rc::new(ManualClock::new());
    let scheduler = Scheduler::new(clock.clone());

    let panel = Rc::new(Panel {
        height: Cell::new(240.0),
        max_height: RefCell::new(Vec::new()),
    });

    let anim = animator
        .create(
            AnimationOptions::new()
                .curve("linear")
                .on_start(|state| {
                    let Some(height) = state.target::<Rc<Panel>>().map(|p| p.height.get()) else {
                        state.finish();
                        return;
                    };
                    state.retarget(0.0, height);
                })
                .on_step(|state, value| {
                    if let Some(panel) = state.target::<Rc<Panel>>() {
                        panel.max_height.borrow_mut().push(format!("{}px", value));
                    }
                }),
        )
        .unwrap()
        .with_target(panel.clone())
        .into_shared();

    scheduler.add(anim.clone());
    scheduler.run(|| {});
    clock.run_frames(100);

    let heights = panel.max_height.borrow();
    assert_eq!(heights.len(), 10);
    assert_eq!(heights[0], "24.0px");
    assert_eq!(heights[9], "240.0px");
}

/// Test that a missing target aborts the animation without delivering values
#[test]
fn test_missing_target_aborts() {
    let animator = Animator::new();
    let clock = Rc::new(ManualClock::new());
    let scheduler = Scheduler::new(clock.clone());
    let log: Log = Rc::default();

    let anim = animator
        .create(logging_options(&log).on_start(|state| {
            if !state.has_target() {
                state.finish();
            }
        }))
        .unwrap();
    scheduler.add(anim.into_shared());
    scheduler.run(|| {});

    assert_eq!(clock.run_frames(100), 1);
    assert!(log.borrow().is_empty());
}

/// Test that the standalone runner spreads a named speed over the values
#[test]
fn test_standalone_runner_with_named_speed() {
    let animator = Animator::new();
    let clock = Rc::new(ManualClock::new());
    let runner = StandaloneRunner::new(clock.clone(), animator.speeds().clone());
    let log: Log = Rc::default();

    let anim = animator
        .create(
            logging_options(&log)
                .from_to(0.0, 100.0)
                .curve("linear")
                .duration("fast"),
        )
        .unwrap()
        .into_shared();
    runner.run(anim.clone(), None).unwrap();

    // fast = 400ms over 10 values
    clock.advance(Duration::from_millis(40));
    assert_eq!(*log.borrow(), vec!["start", "10.0"]);

    clock.advance(Duration::from_millis(360));
    assert!(anim.borrow().is_finished());
    assert_eq!(log.borrow().last().map(String::as_str), Some("finish"));
    assert_eq!(clock.active_timers(), 0);
}

/// Test that both drivers can run side by side on one clock
#[test]
fn test_drivers_share_a_clock() {
    let animator = Animator::new();
    let clock = Rc::new(ManualClock::new());
    let scheduler = Scheduler::new(clock.clone());
    let runner = StandaloneRunner::new(clock.clone(), animator.speeds().clone());

    let batch = animator
        .create(AnimationOptions::new().from_to(0.0, 1.0).curve("zoom"))
        .unwrap()
        .into_shared();
    let timed = animator
        .create(AnimationOptions::new().from_to(0.0, 1.0).curve("linear"))
        .unwrap()
        .into_shared();

    scheduler.add(batch);
    scheduler.run(|| {});
    runner.run(timed.clone(), Some(Speed::Millis(100))).unwrap();

    for _ in 0..20 {
        clock.advance_frame();
        clock.advance(Duration::from_millis(10));
    }

    assert!(!scheduler.is_running());
    assert!(timed.borrow().is_finished());
}
