//! Engine configuration (framestep.toml)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::clock::DEFAULT_FRAME_INTERVAL;
use crate::easing::{Curve, Increments};
use crate::error::Result;
use crate::options::AnimationOptions;
use crate::speed::Speed;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame interval for hosts without a refresh signal
    pub frame_interval_ms: Option<f64>,
    /// Default template every new animation inherits from
    pub defaults: OptionsConfig,
    /// Speed name to milliseconds, merged over the built-in speeds
    pub speeds: BTreeMap<String, u64>,
    /// Curve name to increments, merged over the built-in curves
    pub curves: BTreeMap<String, Increments>,
    /// Named animation templates
    pub presets: BTreeMap<String, OptionsConfig>,
}

/// Data-only subset of [`AnimationOptions`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub curve: Option<Curve>,
    pub values: Option<Vec<String>>,
    pub duration: Option<Speed>,
}

impl OptionsConfig {
    pub fn to_options(&self) -> AnimationOptions {
        AnimationOptions {
            start: self.start,
            end: self.end,
            curve: self.curve.clone(),
            values: self.values.clone(),
            duration: self.duration.clone(),
            ..Default::default()
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Frame interval, falling back to the default when unset or non-positive
    pub fn frame_interval(&self) -> Duration {
        match self.frame_interval_ms {
            Some(ms) if ms.is_finite() && ms > 0.0 => Duration::from_secs_f64(ms / 1000.0),
            _ => DEFAULT_FRAME_INTERVAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnimationError;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_uses_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config.frame_interval(), DEFAULT_FRAME_INTERVAL);
        assert_eq!(config.defaults, OptionsConfig::default());
        assert!(config.presets.is_empty());
    }

    #[test]
    fn parses_full_config() {
        let config = EngineConfig::from_toml_str(
            r#"
frame_interval_ms = 8.0

[defaults]
curve = "zoom"
duration = "fast"

[speeds]
blink = 120

[curves]
halves = [50, 50]

[presets.fade_in]
start = 0.0
end = 1.0
curve = [25, 25, 25, 25]
duration = 300
"#,
        )
        .unwrap();

        assert_eq!(config.frame_interval().as_micros(), 8000);
        assert_eq!(config.defaults.curve, Some(Curve::named("zoom")));
        assert_eq!(config.defaults.duration, Some(Speed::from("fast")));
        assert_eq!(config.speeds.get("blink"), Some(&120));
        assert_eq!(config.curves["halves"].as_slice(), &[50, 50]);

        let fade = &config.presets["fade_in"];
        assert_eq!(fade.end, Some(1.0));
        assert_eq!(fade.curve, Some(Curve::sequence([25, 25, 25, 25])));
        assert_eq!(fade.duration, Some(Speed::Millis(300)));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = EngineConfig::from_toml_str("frame_interval_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, AnimationError::Config(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::load(Path::new("/definitely/not/here/framestep.toml")).unwrap_err();
        assert!(matches!(err, AnimationError::Io(_)));
    }

    #[test]
    fn non_positive_frame_interval_falls_back() {
        let config = EngineConfig {
            frame_interval_ms: Some(0.0),
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), DEFAULT_FRAME_INTERVAL);
    }
}
