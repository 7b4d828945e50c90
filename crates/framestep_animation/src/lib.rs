//! Framestep Animation Engine
//!
//! Frame-stepped tweens driven by a shared per-frame scheduler or a
//! fixed-interval runner.
//!
//! # Features
//!
//! - **Increment Curves**: easing as per-frame percentage deltas (smooth, zoom, bounce, ...)
//! - **Precomputed Values**: every frame value is known before the animation starts
//! - **Batch Scheduling**: one frame loop advances any number of animations in lockstep
//! - **Timed Runs**: drive a single animation so it lasts a given duration
//! - **Injected Timing**: hosts supply the frame source and interval timer

pub mod animation;
pub mod clock;
pub mod config;
pub mod easing;
pub mod engine;
pub mod error;
pub mod interpolate;
pub mod options;
pub mod runner;
pub mod scheduler;
pub mod speed;

pub use animation::{
    Animation, AnimationState, AnimationStatus, Hook, SharedAnimation, StepHook, StepOutcome,
};
pub use clock::{FrameSource, IntervalTimer, ManualClock, TimerId, DEFAULT_FRAME_INTERVAL};
pub use config::{EngineConfig, OptionsConfig};
pub use easing::{Curve, EasingTable, Increments};
pub use engine::Animator;
pub use error::{AnimationError, Result};
pub use interpolate::{format_tenths, interpolate};
pub use options::AnimationOptions;
pub use runner::StandaloneRunner;
pub use scheduler::Scheduler;
pub use speed::{Speed, SpeedTable};
