use serde::{Deserialize, Serialize};

use crate::lap_selector::{DEFAULT_PUSH_LAP_THRESHOLD, InvalidThresholdError, LapSelector};

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("invalid push-lap threshold")]
    #[from]
    Threshold(InvalidThresholdError),
    #[display("no sessions configured")]
    NoSessions,
    #[display("event name must not be empty")]
    EmptyEvent,
}

/// Parameters of one dataset build.
///
/// Passed explicitly through the pipeline; nothing here is global.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Event name as known to the telemetry provider
    pub event: String,
    pub year: i32,
    /// Sessions to load, in output order
    pub sessions: Vec<String>,
    /// Ratio to a driver's fastest lap under which a lap counts as a push lap
    pub push_lap_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            event: "Spanish Grand Prix".to_owned(),
            year: 2024,
            sessions: ["FP1", "FP2", "FP3", "Qualifying"]
                .map(str::to_owned)
                .to_vec(),
            push_lap_threshold: DEFAULT_PUSH_LAP_THRESHOLD,
        }
    }
}

impl PipelineConfig {
    /// Checks the configuration and returns the lap selector it describes.
    pub fn validate(&self) -> Result<LapSelector, ConfigError> {
        if self.event.trim().is_empty() {
            return Err(ConfigError::EmptyEvent);
        }
        if self.sessions.is_empty() {
            return Err(ConfigError::NoSessions);
        }
        Ok(LapSelector::new(self.push_lap_threshold)?)
    }

    /// File name of the assembled table, e.g. `Spanish Grand Prix 2024 pre-race data.csv`
    #[must_use]
    pub fn dataset_file_name(&self) -> String {
        format!("{} {} pre-race data.csv", self.event, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.sessions, vec!["FP1", "FP2", "FP3", "Qualifying"]);
        assert_eq!(
            config.dataset_file_name(),
            "Spanish Grand Prix 2024 pre-race data.csv"
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{ "event": "Monaco Grand Prix", "push_lap_threshold": 1.07 }"#)
                .unwrap();
        assert_eq!(config.event, "Monaco Grand Prix");
        assert_eq!(config.year, 2024);
        assert_eq!(config.sessions.len(), 4);
        assert_eq!(config.validate().unwrap().threshold(), 1.07);
    }

    #[test]
    fn test_invalid_configurations() {
        let config = PipelineConfig {
            push_lap_threshold: 0.9,
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Threshold(_))));

        let config = PipelineConfig {
            sessions: vec![],
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSessions));

        let config = PipelineConfig {
            event: "  ".to_owned(),
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyEvent));
    }
}
