use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tyredeg_analysis::config::PipelineConfig;

use crate::util;

/// Contents of a `--config` file: the pipeline parameters plus directories.
///
/// ```json
/// {
///   "event": "Spanish Grand Prix",
///   "year": 2024,
///   "sessions": ["FP1", "FP2", "FP3", "Qualifying"],
///   "push_lap_threshold": 1.15,
///   "data_dir": "data",
///   "output_dir": "."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
    /// Root of the provider exports, laid out as `<year>/<event>/<session>.csv`
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("."),
        }
    }
}

/// Configuration flags shared by `build` and `run`. Flags override the file.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ConfigArg {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding the provider's session exports
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Directory to write outputs into
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Event name, e.g. "Spanish Grand Prix"
    #[arg(long)]
    event: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    /// Session to include; repeat to list several, in order
    #[arg(long = "session")]
    sessions: Vec<String>,
    /// Push-lap threshold as a ratio to each driver's fastest lap
    #[arg(long)]
    threshold: Option<f64>,
}

impl ConfigArg {
    pub(crate) fn resolve(&self) -> anyhow::Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("configuration", path)?,
            None => CliConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.pipeline.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut CliConfig) {
        if let Some(dir) = &self.data_dir {
            config.data_dir.clone_from(dir);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(event) = &self.event {
            config.pipeline.event.clone_from(event);
        }
        if let Some(year) = self.year {
            config.pipeline.year = year;
        }
        if !self.sessions.is_empty() {
            config.pipeline.sessions.clone_from(&self.sessions);
        }
        if let Some(threshold) = self.threshold {
            config.pipeline.push_lap_threshold = threshold;
        }
    }
}
