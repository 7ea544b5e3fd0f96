//! Per-session processing
//!
//! Each session of the weekend is processed on its own: push laps are
//! selected against that session's personal bests, then decay rates are
//! estimated per driver. Sessions never share state.
//!
//! ```text
//! raw laps (one session)
//!     ↓  LapSelector::select
//! push laps
//!     ↓  decay::estimate_session_decay
//! SessionData { label, laps: Vec<DecayedLap> }
//! ```

use tyredeg_telemetry::LapRecord;

use crate::{
    decay::{self, DecayedLap},
    lap_selector::LapSelector,
};

/// Push laps of one session with their decay rates attached.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionData {
    /// Session label as requested from the provider, e.g. `FP2`
    pub label: String,
    /// Number of laps the provider returned before selection
    pub raw_laps: usize,
    pub laps: Vec<DecayedLap>,
}

impl SessionData {
    /// Selects push laps from `raw` and estimates their decay rates.
    #[must_use]
    pub fn from_raw_laps(label: &str, raw: &[LapRecord], selector: &LapSelector) -> Self {
        let push_laps = selector.select(raw);
        let laps = decay::estimate_session_decay(push_laps);
        tracing::info!(
            session = label,
            raw_laps = raw.len(),
            push_laps = laps.len(),
            "processed session"
        );
        Self {
            label: label.to_owned(),
            raw_laps: raw.len(),
            laps,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use tyredeg_telemetry::Sector;

    use super::*;
    use crate::test_util::lap_with_sectors;

    #[test]
    fn test_session_pipeline() {
        let mut pit = lap_with_sectors("PER", 1, [21_000, 29_000, 24_000]);
        pit.pit_out_time = Some(TimeDelta::seconds(100));
        let raw = vec![
            pit,
            lap_with_sectors("PER", 2, [22_000, 30_000, 25_000]),
            lap_with_sectors("PER", 3, [22_300, 30_100, 25_050]),
            lap_with_sectors("PER", 4, [40_000, 50_000, 40_000]),
        ];
        let session = SessionData::from_raw_laps("FP3", &raw, &LapSelector::default());
        assert_eq!(session.label, "FP3");
        assert_eq!(session.raw_laps, 4);
        assert_eq!(session.laps.len(), 2);
        assert_eq!(
            session.laps[1].decay(Sector::S1),
            Some(TimeDelta::milliseconds(300))
        );
        assert_eq!(session.laps[0].decay(Sector::S3), Some(TimeDelta::zero()));
    }
}
