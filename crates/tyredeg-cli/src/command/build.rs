use std::path::{Path, PathBuf};

use chrono::Utc;
use tyredeg_analysis::{
    pipeline,
    run_key::{DatasetMeta, RunKey},
};
use tyredeg_telemetry::CsvLapSource;

use crate::{
    config::{CliConfig, ConfigArg},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct BuildArg {
    #[clap(flatten)]
    pub config: ConfigArg,
    /// Rebuild even if the existing dataset matches the inputs
    #[arg(long)]
    pub force: bool,
}

pub(crate) fn run(arg: &BuildArg) -> anyhow::Result<()> {
    let config = arg.config.resolve()?;
    let path = build_dataset(&config, arg.force)?;
    eprintln!("Dataset: {}", path.display());
    Ok(())
}

/// Path of the metadata record written beside `dataset`.
pub(crate) fn meta_path(dataset: &Path) -> PathBuf {
    let mut name = dataset.as_os_str().to_owned();
    name.push(".meta.json");
    PathBuf::from(name)
}

/// Writes the assembled dataset unless an up-to-date one already exists, and
/// returns its path.
pub(crate) fn build_dataset(config: &CliConfig, force: bool) -> anyhow::Result<PathBuf> {
    let source = CsvLapSource::new(&config.data_dir);
    let run_key = pipeline::compute_run_key(&config.pipeline, &source)?;
    let dataset_path = config.output_dir.join(config.pipeline.dataset_file_name());
    let meta_path = meta_path(&dataset_path);

    if !force && is_cached(&dataset_path, &meta_path, &run_key) {
        tracing::info!(%run_key, path = %dataset_path.display(), "dataset is up to date");
        eprintln!("Reusing dataset (run key {run_key})");
        return Ok(dataset_path);
    }

    let dataset = pipeline::build_dataset(&config.pipeline, &source)?;
    for session in &dataset.sessions {
        eprintln!(
            "{}: {} laps, {} push laps",
            session.label, session.raw_laps, session.push_laps
        );
    }
    let report = &dataset.report;
    eprintln!(
        "Assembled {} rows ({} dropped: {} speed trap, {} timing, {} decay rate, {} lap info)",
        report.rows,
        report.dropped(),
        report.dropped_speed_trap,
        report.dropped_timing,
        report.dropped_decay_rate,
        report.dropped_lap_info,
    );

    util::create_dir(&config.output_dir)?;
    util::write_feature_rows(&dataset_path, &dataset.rows)?;
    let meta = DatasetMeta {
        run_key,
        created_at: Utc::now(),
        config: config.pipeline.clone(),
        rows: dataset.rows.len(),
        report: dataset.report,
    };
    Output::save_json(&meta, Some(meta_path))?;
    Ok(dataset_path)
}

fn is_cached(dataset_path: &Path, meta_path: &Path, run_key: &RunKey) -> bool {
    if !dataset_path.is_file() || !meta_path.is_file() {
        return false;
    }
    match util::read_json_file::<DatasetMeta, _>("dataset metadata", meta_path) {
        Ok(meta) => meta.is_fresh(run_key),
        Err(e) => {
            tracing::warn!("ignoring unreadable metadata: {e:#}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use tyredeg_analysis::config::PipelineConfig;

    use super::*;

    const FP1: &str = "\
Driver,Team,LapTime,LapNumber,Stint,PitOutTime,PitInTime,Sector1Time,Sector2Time,Sector3Time,SpeedI1,SpeedI2,SpeedFL,SpeedST,Compound,TyreLife,Deleted,IsAccurate
VER,Red Bull Racing,0 days 00:01:30.000000,1.0,1.0,0 days 00:10:00.000000,,0 days 00:00:31.000000,0 days 00:00:32.000000,0 days 00:00:27.000000,280,300,290,310,SOFT,1.0,False,False
VER,Red Bull Racing,0 days 00:01:17.000000,2.0,1.0,,,0 days 00:00:22.000000,0 days 00:00:30.000000,0 days 00:00:25.000000,281,301,291,311,SOFT,2.0,False,True
VER,Red Bull Racing,0 days 00:01:17.500000,3.0,1.0,,,0 days 00:00:22.300000,0 days 00:00:30.100000,0 days 00:00:25.100000,282,302,292,312,SOFT,3.0,False,True
NOR,McLaren,0 days 00:01:16.900000,4.0,1.0,,,0 days 00:00:21.900000,0 days 00:00:30.000000,0 days 00:00:25.000000,,302,292,312,MEDIUM,4.0,False,True
";

    #[test]
    fn test_build_writes_dataset_and_reuses_it() {
        let root = env::temp_dir().join(format!("tyredeg-build-{}", std::process::id()));
        let session_dir = root.join("data/2024/Spanish Grand Prix");
        fs::create_dir_all(&session_dir).unwrap();
        fs::write(session_dir.join("FP1.csv"), FP1).unwrap();

        let config = CliConfig {
            pipeline: PipelineConfig {
                sessions: vec!["FP1".to_owned()],
                ..PipelineConfig::default()
            },
            data_dir: root.join("data"),
            output_dir: root.join("out"),
        };
        let path = build_dataset(&config, false).unwrap();
        let rows = util::read_feature_rows(&path).unwrap();
        let meta: DatasetMeta = util::read_json_file("meta", meta_path(&path)).unwrap();

        // out-lap removed, NOR dropped for a missing speed trap
        assert_eq!(rows.len(), 2);
        assert_eq!(meta.rows, 2);
        assert_eq!(meta.report.dropped_speed_trap, 1);
        assert!((rows[1].sector1_decay_ms - 300.0).abs() < 1e-9);

        // an unchanged rebuild keeps the first dataset
        let created_at = meta.created_at;
        build_dataset(&config, false).unwrap();
        let again: DatasetMeta = util::read_json_file("meta", meta_path(&path)).unwrap();
        assert_eq!(again.created_at, created_at);

        // forcing recomputes
        build_dataset(&config, true).unwrap();
        let forced: DatasetMeta = util::read_json_file("meta", meta_path(&path)).unwrap();
        assert_eq!(forced.run_key, meta.run_key);
        assert!(forced.created_at >= created_at);

        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_meta_path_appends_suffix() {
        assert_eq!(
            meta_path(Path::new("out/Spanish Grand Prix 2024 pre-race data.csv")),
            PathBuf::from("out/Spanish Grand Prix 2024 pre-race data.csv.meta.json")
        );
    }
}
