//! Push-lap selection
//!
//! A push lap is a lap representative of race pace. For one session the
//! selector keeps laps that are
//!
//! 1. neither an out-lap nor an in-lap,
//! 2. explicitly not deleted,
//! 3. explicitly marked accurate,
//! 4. timed within `threshold` × the driver's fastest remaining lap.
//!
//! Every driver with at least one clean timed lap keeps their fastest lap,
//! since its ratio to itself is 1.0.

use std::collections::BTreeMap;

use chrono::TimeDelta;
use tyredeg_telemetry::{LapRecord, duration_ms};

pub const DEFAULT_PUSH_LAP_THRESHOLD: f64 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("push-lap threshold must be a finite ratio >= 1.0, got {threshold}")]
pub struct InvalidThresholdError {
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapSelector {
    threshold: f64,
}

impl Default for LapSelector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PUSH_LAP_THRESHOLD,
        }
    }
}

impl LapSelector {
    pub fn new(threshold: f64) -> Result<Self, InvalidThresholdError> {
        if threshold.is_finite() && threshold >= 1.0 {
            Ok(Self { threshold })
        } else {
            Err(InvalidThresholdError { threshold })
        }
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Filters 1-3: no pit involvement, not deleted, accurate timing.
    #[must_use]
    pub fn is_clean(lap: &LapRecord) -> bool {
        !lap.is_pit_lap() && lap.is_kept() && lap.is_timing_accurate()
    }

    /// Each driver's fastest lap time among clean laps.
    #[must_use]
    pub fn fastest_laps<'a, I>(laps: I) -> BTreeMap<&'a str, TimeDelta>
    where
        I: IntoIterator<Item = &'a LapRecord>,
    {
        let mut fastest = BTreeMap::new();
        for lap in laps {
            let Some(time) = lap.lap_time else {
                continue;
            };
            fastest
                .entry(lap.driver.as_str())
                .and_modify(|best: &mut TimeDelta| *best = (*best).min(time))
                .or_insert(time);
        }
        fastest
    }

    /// Returns the push laps of one session in input order.
    ///
    /// The input is left untouched; selected laps are cloned.
    #[must_use]
    pub fn select(&self, laps: &[LapRecord]) -> Vec<LapRecord> {
        let clean: Vec<&LapRecord> = laps.iter().filter(|lap| Self::is_clean(lap)).collect();
        let fastest = Self::fastest_laps(clean.iter().copied());

        let selected: Vec<LapRecord> = clean
            .into_iter()
            .filter(|lap| {
                let (Some(time), Some(best)) = (lap.lap_time, fastest.get(lap.driver.as_str()))
                else {
                    return false;
                };
                duration_ms(time) <= duration_ms(*best) * self.threshold
            })
            .cloned()
            .collect();

        tracing::debug!(
            total = laps.len(),
            selected = selected.len(),
            drivers = fastest.len(),
            threshold = self.threshold,
            "selected push laps"
        );
        selected
    }
}
