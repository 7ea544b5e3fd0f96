use chrono::TimeDelta;

use crate::LapRecord;

/// One of the three timing segments of a lap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum Sector {
    #[display("Sector1")]
    S1,
    #[display("Sector2")]
    S2,
    #[display("Sector3")]
    S3,
}

impl Sector {
    pub const ALL: [Self; 3] = [Self::S1, Self::S2, Self::S3];

    /// Position in [`Sector::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::S1 => 0,
            Self::S2 => 1,
            Self::S3 => 2,
        }
    }

    #[must_use]
    pub fn time(self, lap: &LapRecord) -> Option<TimeDelta> {
        match self {
            Self::S1 => lap.sector1_time,
            Self::S2 => lap.sector2_time,
            Self::S3 => lap.sector3_time,
        }
    }
}
