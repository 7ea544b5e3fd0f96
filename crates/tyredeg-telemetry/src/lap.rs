use chrono::TimeDelta;
use serde::Deserialize;

use crate::de;

/// One timed lap of one driver in one session, as exported by the provider.
///
/// Column names follow the provider's export (`LapTime`, `Sector1Time`,
/// `SpeedFL`, ...). Any timing cell, speed trap or flag may be missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LapRecord {
    /// Three-letter driver code
    pub driver: String,
    pub team: String,
    #[serde(default, deserialize_with = "de::opt_duration")]
    pub lap_time: Option<TimeDelta>,
    #[serde(deserialize_with = "de::lap_number")]
    pub lap_number: u32,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub stint: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_duration")]
    pub pit_out_time: Option<TimeDelta>,
    #[serde(default, deserialize_with = "de::opt_duration")]
    pub pit_in_time: Option<TimeDelta>,
    #[serde(default, deserialize_with = "de::opt_duration")]
    pub sector1_time: Option<TimeDelta>,
    #[serde(default, deserialize_with = "de::opt_duration")]
    pub sector2_time: Option<TimeDelta>,
    #[serde(default, deserialize_with = "de::opt_duration")]
    pub sector3_time: Option<TimeDelta>,
    #[serde(rename = "SpeedI1", default, deserialize_with = "de::opt_f64")]
    pub speed_i1: Option<f64>,
    #[serde(rename = "SpeedI2", default, deserialize_with = "de::opt_f64")]
    pub speed_i2: Option<f64>,
    #[serde(rename = "SpeedFL", default, deserialize_with = "de::opt_f64")]
    pub speed_fl: Option<f64>,
    #[serde(rename = "SpeedST", default, deserialize_with = "de::opt_f64")]
    pub speed_st: Option<f64>,
    /// Compound name as reported; validated only when encoded
    #[serde(default, deserialize_with = "de::opt_string")]
    pub compound: Option<String>,
    /// Tire age in laps
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub tyre_life: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub deleted: Option<bool>,
    #[serde(default, deserialize_with = "de::opt_bool")]
    pub is_accurate: Option<bool>,
}

impl LapRecord {
    /// Out-laps carry a pit-out time and in-laps a pit-in time.
    #[must_use]
    pub fn is_pit_lap(&self) -> bool {
        self.pit_out_time.is_some() || self.pit_in_time.is_some()
    }

    /// Not deleted by the stewards, with an explicit `false` flag.
    #[must_use]
    pub fn is_kept(&self) -> bool {
        self.deleted == Some(false)
    }

    /// Timing marked accurate, with an explicit `true` flag.
    #[must_use]
    pub fn is_timing_accurate(&self) -> bool {
        self.is_accurate == Some(true)
    }

    /// All four speed traps in order `SpeedI1, SpeedI2, SpeedFL, SpeedST`,
    /// or `None` if any is missing.
    #[must_use]
    pub fn speed_traps(&self) -> Option<[f64; 4]> {
        Some([self.speed_i1?, self.speed_i2?, self.speed_fl?, self.speed_st?])
    }
}
