//! End-to-end dataset build
//!
//! Loads every configured session from a [`LapSource`], processes each one
//! independently and assembles the feature table. A failure on any session
//! aborts the whole build.

use tyredeg_telemetry::{LapSource, SourceError};

use crate::{
    config::{ConfigError, PipelineConfig},
    feature::{self, AssemblyReport, FeatureRow},
    run_key::RunKey,
    session::SessionData,
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PipelineError {
    #[display("invalid configuration")]
    Config(ConfigError),
    #[display("failed to load session data")]
    Source(SourceError),
}

/// Result of one build
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub rows: Vec<FeatureRow>,
    pub report: AssemblyReport,
    pub sessions: Vec<SessionSummary>,
}

/// Lap counts of one processed session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub label: String,
    pub raw_laps: usize,
    pub push_laps: usize,
}

/// Builds the assembled feature table for `config`.
pub fn build_dataset<S>(config: &PipelineConfig, source: &S) -> Result<Dataset, PipelineError>
where
    S: LapSource + ?Sized,
{
    let selector = config.validate()?;
    let sessions = config
        .sessions
        .iter()
        .map(|label| {
            let raw = source.load_session(config.year, &config.event, label)?;
            Ok(SessionData::from_raw_laps(label, &raw, &selector))
        })
        .collect::<Result<Vec<_>, SourceError>>()?;

    let (rows, report) = feature::assemble(&sessions);
    tracing::info!(
        event = %config.event,
        year = config.year,
        rows = report.rows,
        dropped = report.dropped(),
        "assembled dataset"
    );
    let sessions = sessions
        .iter()
        .map(|s| SessionSummary {
            label: s.label.clone(),
            raw_laps: s.raw_laps,
            push_laps: s.laps.len(),
        })
        .collect();
    Ok(Dataset {
        rows,
        report,
        sessions,
    })
}

/// Computes the cache key of a build without processing any laps.
pub fn compute_run_key<S>(config: &PipelineConfig, source: &S) -> Result<RunKey, PipelineError>
where
    S: LapSource + ?Sized,
{
    config.validate()?;
    let exports = config
        .sessions
        .iter()
        .map(|label| source.fingerprint(config.year, &config.event, label))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RunKey::compute(config, &exports))
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, path::PathBuf};

    use tyredeg_telemetry::LapRecord;

    use super::*;
    use crate::test_util::lap_with_sectors;

    #[derive(Default)]
    struct MemorySource {
        sessions: BTreeMap<String, Vec<LapRecord>>,
    }

    impl LapSource for MemorySource {
        fn load_session(
            &self,
            year: i32,
            event: &str,
            session: &str,
        ) -> Result<Vec<LapRecord>, SourceError> {
            self.sessions
                .get(session)
                .cloned()
                .ok_or_else(|| SourceError::MissingSession {
                    year,
                    event: event.to_owned(),
                    session: session.to_owned(),
                    path: PathBuf::from(session),
                })
        }

        fn fingerprint(
            &self,
            year: i32,
            event: &str,
            session: &str,
        ) -> Result<Vec<u8>, SourceError> {
            let laps = self.load_session(year, event, session)?;
            Ok(format!("{laps:?}").into_bytes())
        }
    }

    fn source() -> MemorySource {
        let mut source = MemorySource::default();
        source.sessions.insert(
            "FP1".to_owned(),
            vec![
                lap_with_sectors("VER", 3, [22_000, 30_000, 25_000]),
                lap_with_sectors("VER", 4, [22_300, 30_000, 25_000]),
            ],
        );
        source.sessions.insert(
            "FP2".to_owned(),
            vec![lap_with_sectors("NOR", 6, [21_900, 29_800, 25_100])],
        );
        source
    }

    fn config(sessions: &[&str]) -> PipelineConfig {
        PipelineConfig {
            sessions: sessions.iter().map(|&s| s.to_owned()).collect(),
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_build_dataset() {
        let dataset = build_dataset(&config(&["FP1", "FP2"]), &source()).unwrap();
        assert_eq!(dataset.rows.len(), 3);
        assert_eq!(dataset.report.rows, 3);
        let labels: Vec<&str> = dataset.rows.iter().map(|r| r.session.as_str()).collect();
        assert_eq!(labels, vec!["FP1", "FP1", "FP2"]);
        assert_eq!(dataset.rows[1].sector1_decay_ms, 300.0);
        assert_eq!(
            dataset.sessions[0],
            SessionSummary {
                label: "FP1".to_owned(),
                raw_laps: 2,
                push_laps: 2
            }
        );
    }

    #[test]
    fn test_missing_session_aborts_build() {
        let err = build_dataset(&config(&["FP1", "FP3"]), &source()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Source(SourceError::MissingSession { .. })
        ));
    }

    #[test]
    fn test_invalid_config_fails_before_loading() {
        let err = build_dataset(&config(&[]), &MemorySource::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Config(ConfigError::NoSessions)));
    }

    #[test]
    fn test_run_key_follows_session_content() {
        let config = config(&["FP1", "FP2"]);
        let mut source = source();
        let before = compute_run_key(&config, &source).unwrap();
        assert_eq!(compute_run_key(&config, &source).unwrap(), before);

        source.sessions.get_mut("FP2").unwrap()[0].tyre_life = Some(9.0);
        assert_ne!(compute_run_key(&config, &source).unwrap(), before);
    }
}
