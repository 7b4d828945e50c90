//! Animation factory
//!
//! [`Animator`] owns the curve and speed tables, the default option template
//! and the preset registry, and turns [`AnimationOptions`] into ready-to-run
//! [`Animation`]s.

use rustc_hash::FxHashMap;

use crate::animation::Animation;
use crate::config::EngineConfig;
use crate::easing::{Curve, EasingTable, Increments};
use crate::error::{AnimationError, Result};
use crate::interpolate::interpolate;
use crate::options::AnimationOptions;
use crate::speed::SpeedTable;

/// Builds animations from options merged over a default template
#[derive(Clone, Debug)]
pub struct Animator {
    easing: EasingTable,
    speeds: SpeedTable,
    defaults: AnimationOptions,
    presets: FxHashMap<String, AnimationOptions>,
}

impl Animator {
    /// Built-in curves and speeds; defaults are `start = 0`, `end = 0`, `smooth`
    pub fn new() -> Self {
        Self {
            easing: EasingTable::builtin(),
            speeds: SpeedTable::builtin(),
            defaults: AnimationOptions::new().from_to(0.0, 0.0).curve(Curve::default()),
            presets: FxHashMap::default(),
        }
    }

    /// Built-ins extended with the curves, speeds, defaults and presets of `config`
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut animator = Self::new();
        for (name, increments) in &config.curves {
            animator.set_curve(name.clone(), increments.clone());
        }
        for (name, ms) in &config.speeds {
            animator.speeds.insert(name.clone(), *ms);
        }
        animator.config(config.defaults.to_options());
        for (name, preset) in &config.presets {
            animator.set_preset(name.clone(), preset.to_options());
        }
        animator
    }

    pub fn easing(&self) -> &EasingTable {
        &self.easing
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    /// The template every new animation inherits from
    pub fn defaults(&self) -> &AnimationOptions {
        &self.defaults
    }

    /// Overwrite default template fields with every field set in `options`
    pub fn config(&mut self, options: AnimationOptions) {
        self.defaults.apply(options);
    }

    pub fn set_curve(&mut self, name: impl Into<String>, increments: Increments) {
        self.easing.insert(name, increments);
    }

    pub fn set_speed(&mut self, name: impl Into<String>, ms: u64) {
        self.speeds.insert(name, ms);
    }

    /// Register or replace a named template
    pub fn set_preset(&mut self, name: impl Into<String>, options: AnimationOptions) {
        self.presets.insert(name.into(), options);
    }

    pub fn preset(&self, name: &str) -> Option<&AnimationOptions> {
        self.presets.get(name)
    }

    /// Preset names in sorted order
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build an animation from `options` merged over the defaults.
    ///
    /// Values given in `options` are used verbatim unless `options` also
    /// names a curve; otherwise they are interpolated from the merged curve
    /// and bounds. Fails if the curve name is unknown.
    pub fn create(&self, options: AnimationOptions) -> Result<Animation> {
        let explicit_values = if options.curve.is_none() {
            options.values.clone()
        } else {
            None
        };

        let merged = options.merged_over(&self.defaults);
        let start = merged.start.unwrap_or(0.0);
        let end = merged.end.unwrap_or(0.0);
        let curve = merged.curve.unwrap_or_default();

        // Caller-supplied values never consult the easing table
        let (increments, values) = match explicit_values {
            Some(values) => (Increments::new(), values),
            None => {
                let increments = self.easing.resolve(&curve)?;
                let values = interpolate(start, end, &increments);
                (increments, values)
            }
        };

        Ok(Animation::new(start, end, curve, increments, values)
            .with_hooks(merged.on_start, merged.on_finish, merged.on_step)
            .with_duration_opt(merged.duration))
    }

    /// Build an animation from a registered preset, with `overrides` on top
    pub fn create_preset(&self, name: &str, overrides: AnimationOptions) -> Result<Animation> {
        let template = self
            .presets
            .get(name)
            .ok_or_else(|| AnimationError::UnknownPreset(name.to_string()))?;
        self.create(overrides.merged_over(template))
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}
