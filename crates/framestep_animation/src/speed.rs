//! Named animation speeds

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AnimationError, Result};

/// Speed used when neither the caller nor the animation names one
pub const DEFAULT_SPEED: &str = "normal";

/// A total animation duration, either in milliseconds or by speed name
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Speed {
    Millis(u64),
    Named(String),
}

impl From<u64> for Speed {
    fn from(ms: u64) -> Self {
        Speed::Millis(ms)
    }
}

impl From<&str> for Speed {
    fn from(name: &str) -> Self {
        Speed::Named(name.to_string())
    }
}

impl From<Duration> for Speed {
    fn from(duration: Duration) -> Self {
        Speed::Millis(duration.as_millis() as u64)
    }
}

/// Mapping from speed name to duration in milliseconds
#[derive(Clone, Debug)]
pub struct SpeedTable {
    speeds: FxHashMap<String, u64>,
}

impl SpeedTable {
    /// fast = 400ms, normal = 800ms, slow = 2000ms, slug = 3000ms
    pub fn builtin() -> Self {
        let mut speeds = FxHashMap::default();
        speeds.insert("fast".to_string(), 400);
        speeds.insert("normal".to_string(), 800);
        speeds.insert("slow".to_string(), 2000);
        speeds.insert("slug".to_string(), 3000);
        Self { speeds }
    }

    pub fn insert(&mut self, name: impl Into<String>, ms: u64) {
        self.speeds.insert(name.into(), ms);
    }

    pub fn get(&self, name: &str) -> Option<Duration> {
        self.speeds.get(name).copied().map(Duration::from_millis)
    }

    /// Turn a speed into a concrete duration
    pub fn resolve(&self, speed: &Speed) -> Result<Duration> {
        match speed {
            Speed::Millis(ms) => Ok(Duration::from_millis(*ms)),
            Speed::Named(name) => self.get(name).ok_or_else(|| {
                tracing::warn!("Unknown speed preset requested: {}", name);
                AnimationError::UnknownSpeed(name.clone())
            }),
        }
    }

    /// Resolve the first speed given, falling back to `normal`
    pub fn resolve_or_default(&self, speed: Option<&Speed>) -> Result<Duration> {
        match speed {
            Some(speed) => self.resolve(speed),
            None => self.resolve(&Speed::Named(DEFAULT_SPEED.to_string())),
        }
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self::builtin()
    }
}
