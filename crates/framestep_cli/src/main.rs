//! Framestep CLI
//!
//! Inspect easing curves and play animations in the terminal.

mod config;
mod host;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use framestep_animation::{
    AnimationOptions, Animator, Curve, ManualClock, Scheduler, Speed, StandaloneRunner,
};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::host::RealtimeHost;

#[derive(Parser)]
#[command(name = "framestep")]
#[command(author, version, about = "Frame-stepped tweening engine", long_about = None)]
struct Cli {
    /// Configuration file or directory containing framestep.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available easing curves
    Curves,

    /// Print the values a curve produces between two bounds
    Values {
        #[command(flatten)]
        tween: TweenArgs,
    },

    /// Play an animation, printing each value as it is delivered
    Play {
        #[command(flatten)]
        tween: TweenArgs,

        /// Registered preset to start from
        #[arg(short, long)]
        preset: Option<String>,

        /// Total duration: a speed name (fast, normal, slow, slug) or milliseconds
        #[arg(short, long)]
        duration: Option<String>,

        /// Drive with a fixed-interval timer instead of the frame scheduler
        #[arg(long)]
        timed: bool,
    },
}

#[derive(Args)]
struct TweenArgs {
    /// Start value
    #[arg(long)]
    from: Option<f64>,

    /// End value
    #[arg(long)]
    to: Option<f64>,

    /// Named easing curve
    #[arg(long, conflicts_with = "increments")]
    curve: Option<String>,

    /// Explicit comma-separated percentage increments
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    increments: Option<Vec<i32>>,
}

impl TweenArgs {
    fn to_options(&self) -> AnimationOptions {
        let mut options = AnimationOptions::new();
        options.start = self.from;
        options.end = self.to;
        options.curve = match (&self.curve, &self.increments) {
            (_, Some(increments)) => Some(Curve::sequence(increments.iter().copied())),
            (Some(name), None) => Some(Curve::named(name.as_str())),
            (None, None) => None,
        };
        options
    }
}

fn parse_speed(text: &str) -> Speed {
    match text.parse::<u64>() {
        Ok(ms) => Speed::Millis(ms),
        Err(_) => Speed::Named(text.to_string()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let config = config::load(cli.config.as_deref())?;
    let animator = Animator::from_config(&config);

    match cli.command {
        Commands::Curves => cmd_curves(&animator),
        Commands::Values { tween } => cmd_values(&animator, &tween),
        Commands::Play {
            tween,
            preset,
            duration,
            timed,
        } => cmd_play(
            &animator,
            &tween,
            preset.as_deref(),
            duration.as_deref().map(parse_speed),
            timed,
            config.frame_interval(),
        ),
    }
}

fn cmd_curves(animator: &Animator) -> Result<()> {
    let easing = animator.easing();
    println!("{:<12} {:>6} {:>6}", "curve", "steps", "sum");
    for name in easing.names() {
        let increments = easing.get(name).unwrap_or_default();
        let sum: i32 = increments.iter().sum();
        println!("{:<12} {:>6} {:>6}", name, increments.len(), sum);
    }
    let presets = animator.preset_names();
    if !presets.is_empty() {
        println!();
        println!("presets: {}", presets.join(", "));
    }
    Ok(())
}

fn cmd_values(animator: &Animator, tween: &TweenArgs) -> Result<()> {
    let animation = animator
        .create(tween.to_options())
        .context("Failed to build animation")?;
    for (index, value) in animation.values().iter().enumerate() {
        println!("{:>4} {}", index, value);
    }
    Ok(())
}

fn cmd_play(
    animator: &Animator,
    tween: &TweenArgs,
    preset: Option<&str>,
    duration: Option<Speed>,
    timed: bool,
    frame_interval: std::time::Duration,
) -> Result<()> {
    let options = tween
        .to_options()
        .on_start(|state| info!("Animation started with {} steps", state.len()))
        .on_step(|state, value| println!("{:>4} {}", state.cursor(), value))
        .on_finish(|state| info!("Animation finished at {}", state.end()));

    let animation = match preset {
        Some(name) => animator.create_preset(name, options),
        None => animator.create(options),
    }
    .context("Failed to build animation")?
    .into_shared();

    let clock = Rc::new(ManualClock::new());
    let host = RealtimeHost::new(clock.clone(), frame_interval);

    if timed {
        let runner = StandaloneRunner::new(clock.clone(), animator.speeds().clone());
        runner
            .run(animation, duration)
            .context("Failed to start timed animation")?;
        let elapsed = host.pump_timers();
        info!("Timed run took {:?}", elapsed);
    } else {
        if duration.is_some() {
            tracing::warn!("--duration only applies to --timed runs; frames set the pace");
        }
        let scheduler = Scheduler::new(clock.clone());
        scheduler.add(animation);
        let started = Instant::now();
        scheduler.run(|| info!("Batch complete"));
        let frames = host.pump_frames();
        info!("Batch ran {} frames in {:?}", frames, started.elapsed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speeds_parse_as_millis_or_names() {
        assert_eq!(parse_speed("250"), Speed::Millis(250));
        assert_eq!(parse_speed("slow"), Speed::Named("slow".into()));
    }

    #[test]
    fn increments_win_over_curve_name() {
        let cli = Cli::parse_from(["framestep", "values", "--increments", "-5,105", "--to", "10"]);
        let Commands::Values { tween } = cli.command else {
            panic!("expected values command");
        };
        let options = tween.to_options();
        assert_eq!(options.curve, Some(Curve::sequence([-5, 105])));
        assert_eq!(options.end, Some(10.0));
        assert_eq!(options.start, None);
    }

    #[test]
    fn play_flags_parse() {
        let cli = Cli::parse_from([
            "framestep", "play", "--curve", "bounce", "--duration", "fast", "--timed",
        ]);
        let Commands::Play {
            tween,
            duration,
            timed,
            preset,
        } = cli.command
        else {
            panic!("expected play command");
        };
        assert_eq!(tween.curve.as_deref(), Some("bounce"));
        assert_eq!(duration.as_deref(), Some("fast"));
        assert!(timed);
        assert!(preset.is_none());
    }
}
