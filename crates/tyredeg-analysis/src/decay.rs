//! Per-sector decay-rate estimation
//!
//! For one driver and one sector the decay rate of a lap is the slope of the
//! line through the driver's personal-best sector lap and that lap:
//!
//! ```text
//! decay = (sector_time - pb_sector_time) / (lap_number - pb_lap_number)
//! ```
//!
//! The personal-best lap itself has decay 0. Rates are durations per lap and
//! keep nanosecond resolution.
//!
//! # Example
//!
//! ```
//! use chrono::TimeDelta;
//! use tyredeg_analysis::decay::{PersonalBest, decay_rate};
//!
//! let best = PersonalBest { lap_number: 5, time: TimeDelta::milliseconds(89_000) };
//! let decay = decay_rate(best, 3, TimeDelta::milliseconds(90_000));
//! assert_eq!(decay, Some(TimeDelta::milliseconds(-500)));
//! ```

use std::collections::BTreeMap;

use chrono::TimeDelta;
use tyredeg_telemetry::{LapRecord, Sector};

/// Fastest sector time of one driver and the lap it was set on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonalBest {
    pub lap_number: u32,
    pub time: TimeDelta,
}

/// A push lap with its decay rate for each sector, indexed by [`Sector::index`]
#[derive(Debug, Clone, PartialEq)]
pub struct DecayedLap {
    pub lap: LapRecord,
    pub decay: [Option<TimeDelta>; 3],
}

impl DecayedLap {
    #[must_use]
    pub fn decay(&self, sector: Sector) -> Option<TimeDelta> {
        self.decay[sector.index()]
    }
}

/// Finds the minimum sector time over `laps`.
///
/// Laps without a time for `sector` are skipped. When several laps share the
/// minimum, the first one in input order wins.
#[must_use]
pub fn personal_best(laps: &[LapRecord], sector: Sector) -> Option<PersonalBest> {
    laps.iter()
        .filter_map(|lap| Some((lap.lap_number, sector.time(lap)?)))
        .fold(None, |best, (lap_number, time)| match best {
            Some(best) if best.time <= time => Some(best),
            _ => Some(PersonalBest { lap_number, time }),
        })
}

/// Decay rate of one lap relative to `best`.
///
/// Returns zero when the lap numbers match and `None` only if the lap gap
/// does not fit the duration arithmetic.
#[must_use]
pub fn decay_rate(best: PersonalBest, lap_number: u32, time: TimeDelta) -> Option<TimeDelta> {
    let lap_diff = i64::from(lap_number) - i64::from(best.lap_number);
    if lap_diff == 0 {
        return Some(TimeDelta::zero());
    }
    let lap_diff = i32::try_from(lap_diff).ok()?;
    time.checked_sub(&best.time)?.checked_div(lap_diff)
}

/// Decay rates of one driver's push laps for one sector, aligned with `laps`.
///
/// `laps` must all belong to the same driver. A lap without a sector time
/// has no rate; a driver with no timed sector has no rates at all.
#[must_use]
pub fn sector_decay(laps: &[LapRecord], sector: Sector) -> Vec<Option<TimeDelta>> {
    let Some(best) = personal_best(laps, sector) else {
        return vec![None; laps.len()];
    };
    laps.iter()
        .map(|lap| decay_rate(best, lap.lap_number, sector.time(lap)?))
        .collect()
}

/// Attaches all three sector decay rates to a session's push laps.
///
/// Laps are grouped by driver; each group is estimated independently, one
/// pass per sector. The output lists drivers in code order and keeps input
/// order within each driver.
#[must_use]
pub fn estimate_session_decay(push_laps: Vec<LapRecord>) -> Vec<DecayedLap> {
    let mut groups: BTreeMap<String, Vec<LapRecord>> = BTreeMap::new();
    for lap in push_laps {
        groups.entry(lap.driver.clone()).or_default().push(lap);
    }

    groups
        .into_values()
        .flat_map(|laps| {
            let per_sector = Sector::ALL.map(|sector| sector_decay(&laps, sector));
            laps.into_iter()
                .enumerate()
                .map(move |(i, lap)| DecayedLap {
                    decay: Sector::ALL.map(|sector| per_sector[sector.index()][i]),
                    lap,
                })
        })
        .collect()
}
