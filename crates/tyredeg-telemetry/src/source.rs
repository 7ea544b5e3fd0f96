//! Access to the telemetry provider
//!
//! The provider is a black box that, given (year, event, session), returns
//! the session's lap records. [`LapSource`] is that seam. [`CsvLapSource`]
//! reads the provider's CSV exports laid out on disk as
//!
//! ```text
//! <root>/<year>/<event>/<session>.csv
//! e.g. data/2024/Spanish Grand Prix/FP1.csv
//! ```

use std::{
    fs::{self, File},
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use crate::LapRecord;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SourceError {
    #[display("no {session} data for {year} {event} (expected {})", path.display())]
    MissingSession {
        year: i32,
        event: String,
        session: String,
        path: PathBuf,
    },
    #[display("failed to read {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse lap records in {}", path.display())]
    Parse { path: PathBuf, source: csv::Error },
}

/// Provider of raw per-lap records for one session of one event.
pub trait LapSource {
    /// Loads every lap of the session, in provider order.
    fn load_session(
        &self,
        year: i32,
        event: &str,
        session: &str,
    ) -> Result<Vec<LapRecord>, SourceError>;

    /// Bytes identifying the session content, used to key cached outputs.
    fn fingerprint(&self, year: i32, event: &str, session: &str) -> Result<Vec<u8>, SourceError>;
}

/// Reads provider CSV exports from a directory tree.
#[derive(Debug, Clone)]
pub struct CsvLapSource {
    root: PathBuf,
}

impl CsvLapSource {
    pub fn new<P>(root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn session_path(&self, year: i32, event: &str, session: &str) -> PathBuf {
        self.root
            .join(year.to_string())
            .join(event)
            .join(format!("{session}.csv"))
    }

    fn existing_path(&self, year: i32, event: &str, session: &str) -> Result<PathBuf, SourceError> {
        let path = self.session_path(year, event, session);
        if path.is_file() {
            Ok(path)
        } else {
            Err(SourceError::MissingSession {
                year,
                event: event.to_owned(),
                session: session.to_owned(),
                path,
            })
        }
    }
}

impl LapSource for CsvLapSource {
    fn load_session(
        &self,
        year: i32,
        event: &str,
        session: &str,
    ) -> Result<Vec<LapRecord>, SourceError> {
        let path = self.existing_path(year, event, session)?;
        let file = File::open(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        let laps = read_laps(BufReader::new(file)).map_err(|source| SourceError::Parse {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), laps = laps.len(), "loaded session export");
        Ok(laps)
    }

    fn fingerprint(&self, year: i32, event: &str, session: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.existing_path(year, event, session)?;
        fs::read(&path).map_err(|source| SourceError::Io { path, source })
    }
}

/// Parses lap records from CSV with a header row. Unknown columns are ignored.
pub fn read_laps<R>(reader: R) -> Result<Vec<LapRecord>, csv::Error>
where
    R: Read,
{
    csv::Reader::from_reader(reader).deserialize().collect()
}

/// Reads lap records from a single CSV file.
pub fn read_laps_file<P>(path: P) -> Result<Vec<LapRecord>, SourceError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::Io {
        path: path.to_owned(),
        source,
    })?;
    read_laps(BufReader::new(file)).map_err(|source| SourceError::Parse {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    const EXPORT: &str = "\
,Time,Driver,DriverNumber,LapTime,LapNumber,Stint,PitOutTime,PitInTime,Sector1Time,Sector2Time,Sector3Time,SpeedI1,SpeedI2,SpeedFL,SpeedST,Compound,TyreLife,Team,Deleted,IsAccurate
0,0 days 01:02:03.000000,VER,1,,1.0,1.0,0 days 00:59:40.000000,,,0 days 00:00:31.100000,0 days 00:00:25.000000,,280.0,290.0,300.0,SOFT,1.0,Red Bull Racing,False,False
1,0 days 01:03:20.000000,VER,1,0 days 00:01:16.330000,2.0,1.0,,,0 days 00:00:22.010000,0 days 00:00:30.220000,0 days 00:00:24.100000,284.0,301.5,288.0,310.2,SOFT,2.0,Red Bull Racing,False,True
2,0 days 01:04:40.000000,VER,1,0 days 00:01:17.000000,3.0,1.0,,,0 days 00:00:22.500000,0 days 00:00:30.300000,0 days 00:00:24.200000,,302.0,289.0,311.0,SOFT,3.0,Red Bull Racing,,True
";

    #[test]
    fn test_read_provider_export() {
        let laps = read_laps(EXPORT.as_bytes()).unwrap();
        assert_eq!(laps.len(), 3);

        let out_lap = &laps[0];
        assert_eq!(out_lap.driver, "VER");
        assert_eq!(out_lap.lap_number, 1);
        assert_eq!(out_lap.lap_time, None);
        assert!(out_lap.is_pit_lap());
        assert!(!out_lap.is_timing_accurate());
        assert_eq!(out_lap.speed_i1, None);

        let push = &laps[1];
        assert_eq!(push.team, "Red Bull Racing");
        assert_eq!(push.lap_time, Some(TimeDelta::milliseconds(76_330)));
        assert_eq!(push.sector1_time, Some(TimeDelta::milliseconds(22_010)));
        assert_eq!(push.compound.as_deref(), Some("SOFT"));
        assert_eq!(push.tyre_life, Some(2.0));
        assert_eq!(push.speed_traps(), Some([284.0, 301.5, 288.0, 310.2]));
        assert!(push.is_kept());
        assert!(push.is_timing_accurate());
        assert!(!push.is_pit_lap());

        let sparse = &laps[2];
        assert_eq!(sparse.deleted, None);
        assert!(!sparse.is_kept());
        assert_eq!(sparse.speed_traps(), None);
    }

    #[test]
    fn test_fractional_lap_number_is_rejected() {
        let csv = "Driver,Team,LapNumber\nHAM,Mercedes,2.5\n";
        assert!(read_laps(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_session_path() {
        let source = CsvLapSource::new("does-not-exist");
        let err = source.load_session(2024, "Spanish Grand Prix", "FP1").unwrap_err();
        match err {
            SourceError::MissingSession { path, session, .. } => {
                assert_eq!(session, "FP1");
                assert_eq!(
                    path,
                    Path::new("does-not-exist/2024/Spanish Grand Prix/FP1.csv")
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
