//! Easing curves as percentage increment tables
//!
//! A curve is an ordered list of signed percentages of the distance between
//! the start and end value. One increment is applied per frame, so the length
//! of a curve is also the number of frames an animation using it lasts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::error::{AnimationError, Result};
use crate::interpolate;

/// Percentage deltas applied one per frame
pub type Increments = SmallVec<[i32; 20]>;

/// Name of the curve used when nothing else is configured
pub const DEFAULT_CURVE: &str = "smooth";

/// Either a curve looked up by name or an explicit increment sequence
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Curve {
    Named(String),
    Sequence(Increments),
}

impl Curve {
    pub fn named(name: impl Into<String>) -> Self {
        Curve::Named(name.into())
    }

    pub fn sequence(increments: impl IntoIterator<Item = i32>) -> Self {
        Curve::Sequence(increments.into_iter().collect())
    }
}

impl Default for Curve {
    fn default() -> Self {
        Curve::Named(DEFAULT_CURVE.to_string())
    }
}

impl From<&str> for Curve {
    fn from(name: &str) -> Self {
        Curve::Named(name.to_string())
    }
}

impl From<Vec<i32>> for Curve {
    fn from(increments: Vec<i32>) -> Self {
        Curve::Sequence(increments.into())
    }
}

/// Named curve lookup table
#[derive(Clone, Debug)]
pub struct EasingTable {
    curves: FxHashMap<String, Increments>,
}

impl EasingTable {
    /// An empty table with no curves registered
    pub fn empty() -> Self {
        Self {
            curves: FxHashMap::default(),
        }
    }

    /// The built-in curves: smooth, accell, zoom, linear, bounce and shake.
    ///
    /// Every built-in sums to 100 except `shake`, which sums to 0 and so
    /// wobbles around the start value and settles back on it.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.insert(
            "smooth",
            smallvec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
        );
        table.insert(
            "accell",
            smallvec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 11, 12, 12],
        );
        table.insert(
            "zoom",
            smallvec![12, 12, 11, 10, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
        );
        table.insert("linear", smallvec![10; 10]);
        table.insert(
            "bounce",
            smallvec![10, 10, 10, 10, 10, 10, 10, 10, -8, 11, -6, 10, -4, 8, -3, 6, -2, 5, -1, 4],
        );
        table.insert(
            "shake",
            smallvec![
                6, 6, -6, -6, -6, -6, 6, 6, 8, 8, -8, -8, -8, -8, 8, 8, 6, 6, -6, -6, -6, -6, 6,
                6, 5, 5, -5, -5, -4, -4, 4, 4, 3, -3
            ],
        );
        table
    }

    /// Register or replace a curve
    pub fn insert(&mut self, name: impl Into<String>, increments: Increments) {
        self.curves.insert(name.into(), increments);
    }

    pub fn get(&self, name: &str) -> Option<&[i32]> {
        self.curves.get(name).map(|incs| incs.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.curves.contains_key(name)
    }

    /// Curve names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.curves.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Whether a named curve lands exactly on the end value (its increments sum to 100)
    pub fn reaches_end(&self, name: &str) -> bool {
        self.get(name).is_some_and(|incs| incs.iter().sum::<i32>() == 100)
    }

    /// Resolve a curve to its increment sequence
    pub fn resolve(&self, curve: &Curve) -> Result<Increments> {
        match curve {
            Curve::Sequence(incs) => Ok(incs.clone()),
            Curve::Named(name) => match self.curves.get(name) {
                Some(incs) => Ok(incs.clone()),
                None => {
                    tracing::warn!("Unknown easing curve requested: {}", name);
                    Err(AnimationError::UnknownCurve(name.clone()))
                }
            },
        }
    }

    /// Resolve a curve and expand it into the values between `start` and `end`
    pub fn interpolate(&self, start: f64, end: f64, curve: &Curve) -> Result<Vec<String>> {
        let increments = self.resolve(curve)?;
        Ok(interpolate::interpolate(start, end, &increments))
    }
}

impl Default for EasingTable {
    fn default() -> Self {
        Self::builtin()
    }
}
