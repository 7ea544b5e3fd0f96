//! Feature table assembly
//!
//! Merges the decay-augmented push laps of every session into one table of
//! [`FeatureRow`]s with the fixed 18-column manifest. Durations become
//! floating-point milliseconds. Rows missing a speed trap, a timing value, a
//! decay rate or any other manifest field are dropped and counted in the
//! [`AssemblyReport`].

use serde::{Deserialize, Serialize};
use tyredeg_telemetry::{Sector, duration_ms};

use crate::{decay::DecayedLap, session::SessionData};

/// Column names of the assembled table, in file order.
pub const FEATURE_MANIFEST: [&str; 18] = [
    "Session",
    "LapTime_ms",
    "LapNumber",
    "Stint",
    "Sector1Time_ms",
    "Sector2Time_ms",
    "Sector3Time_ms",
    "SpeedI1",
    "SpeedI2",
    "SpeedFL",
    "SpeedST",
    "Compound",
    "TyreLife",
    "Driver",
    "Team",
    "Sector1Time_DecayRate_ms",
    "Sector2Time_DecayRate_ms",
    "Sector3Time_DecayRate_ms",
];

/// The regression targets, one decay rate per sector.
pub const DECAY_TARGET_COLUMNS: [&str; 3] = [
    "Sector1Time_DecayRate_ms",
    "Sector2Time_DecayRate_ms",
    "Sector3Time_DecayRate_ms",
];

/// One push lap in the assembled, pre-scaling feature table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    #[serde(rename = "Session")]
    pub session: String,
    #[serde(rename = "LapTime_ms")]
    pub lap_time_ms: f64,
    #[serde(rename = "LapNumber")]
    pub lap_number: u32,
    #[serde(rename = "Stint")]
    pub stint: f64,
    #[serde(rename = "Sector1Time_ms")]
    pub sector1_time_ms: f64,
    #[serde(rename = "Sector2Time_ms")]
    pub sector2_time_ms: f64,
    #[serde(rename = "Sector3Time_ms")]
    pub sector3_time_ms: f64,
    #[serde(rename = "SpeedI1")]
    pub speed_i1: f64,
    #[serde(rename = "SpeedI2")]
    pub speed_i2: f64,
    #[serde(rename = "SpeedFL")]
    pub speed_fl: f64,
    #[serde(rename = "SpeedST")]
    pub speed_st: f64,
    #[serde(rename = "Compound")]
    pub compound: String,
    #[serde(rename = "TyreLife")]
    pub tyre_life: f64,
    #[serde(rename = "Driver")]
    pub driver: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Sector1Time_DecayRate_ms")]
    pub sector1_decay_ms: f64,
    #[serde(rename = "Sector2Time_DecayRate_ms")]
    pub sector2_decay_ms: f64,
    #[serde(rename = "Sector3Time_DecayRate_ms")]
    pub sector3_decay_ms: f64,
}

/// Why a push lap did not make it into the assembled table
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MissingValue {
    #[display("speed trap")]
    SpeedTrap,
    #[display("lap or sector time")]
    Timing,
    #[display("decay rate")]
    DecayRate,
    #[display("stint, tire or team data")]
    LapInfo,
}

/// Row accounting for one assembly run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub push_laps: usize,
    pub rows: usize,
    pub dropped_speed_trap: usize,
    pub dropped_timing: usize,
    pub dropped_decay_rate: usize,
    pub dropped_lap_info: usize,
}

impl AssemblyReport {
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped_speed_trap + self.dropped_timing + self.dropped_decay_rate + self.dropped_lap_info
    }

    fn record_drop(&mut self, reason: MissingValue) {
        let counter = match reason {
            MissingValue::SpeedTrap => &mut self.dropped_speed_trap,
            MissingValue::Timing => &mut self.dropped_timing,
            MissingValue::DecayRate => &mut self.dropped_decay_rate,
            MissingValue::LapInfo => &mut self.dropped_lap_info,
        };
        *counter += 1;
    }
}

impl FeatureRow {
    /// Flattens one decayed lap into the manifest.
    ///
    /// Speed traps are checked first, so a lap missing both a speed trap and
    /// a sector time is attributed to the speed trap.
    pub fn from_decayed_lap(session: &str, decayed: &DecayedLap) -> Result<Self, MissingValue> {
        let lap = &decayed.lap;
        let [speed_i1, speed_i2, speed_fl, speed_st] =
            lap.speed_traps().ok_or(MissingValue::SpeedTrap)?;
        let timing = |t: Option<chrono::TimeDelta>| t.map(duration_ms).ok_or(MissingValue::Timing);
        let decay = |s: Sector| {
            decayed
                .decay(s)
                .map(duration_ms)
                .ok_or(MissingValue::DecayRate)
        };
        let lap_info = |v: Option<f64>| v.ok_or(MissingValue::LapInfo);

        Ok(Self {
            session: session.to_owned(),
            lap_time_ms: timing(lap.lap_time)?,
            lap_number: lap.lap_number,
            stint: lap_info(lap.stint)?,
            sector1_time_ms: timing(lap.sector1_time)?,
            sector2_time_ms: timing(lap.sector2_time)?,
            sector3_time_ms: timing(lap.sector3_time)?,
            speed_i1,
            speed_i2,
            speed_fl,
            speed_st,
            compound: lap.compound.clone().ok_or(MissingValue::LapInfo)?,
            tyre_life: lap_info(lap.tyre_life)?,
            driver: lap.driver.clone(),
            team: lap.team.clone(),
            sector1_decay_ms: decay(Sector::S1)?,
            sector2_decay_ms: decay(Sector::S2)?,
            sector3_decay_ms: decay(Sector::S3)?,
        })
    }
}

/// Concatenates all sessions, in the order given, into the feature table.
#[must_use]
pub fn assemble(sessions: &[SessionData]) -> (Vec<FeatureRow>, AssemblyReport) {
    let mut report = AssemblyReport::default();
    let mut rows = vec![];
    for session in sessions {
        for decayed in &session.laps {
            report.push_laps += 1;
            match FeatureRow::from_decayed_lap(&session.label, decayed) {
                Ok(row) => rows.push(row),
                Err(reason) => {
                    tracing::debug!(
                        session = %session.label,
                        driver = %decayed.lap.driver,
                        lap = decayed.lap.lap_number,
                        %reason,
                        "dropped lap with missing value"
                    );
                    report.record_drop(reason);
                }
            }
        }
    }
    report.rows = rows.len();
    (rows, report)
}
