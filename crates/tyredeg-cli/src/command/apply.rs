use std::path::PathBuf;

use crate::{command::normalize, util};

const INPUT_APPLIED_FILE: &str = "x-applied-data.csv";
const TARGET_APPLIED_FILE: &str = "y-applied-data.csv";

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ApplyArg {
    /// Assembled dataset CSV with the rows to scale
    #[arg(long)]
    pub input: PathBuf,
    /// Directory holding the scalers and code table written by `normalize`
    #[arg(long, default_value = ".")]
    pub artifacts_dir: PathBuf,
    /// Directory to write the scaled tables into
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

pub(crate) fn run(arg: &ApplyArg) -> anyhow::Result<()> {
    let artifacts = normalize::load_artifacts(&arg.artifacts_dir)?;
    let rows = util::read_feature_rows(&arg.input)?;
    let (inputs, targets) = artifacts.apply(&rows)?;

    util::create_dir(&arg.output_dir)?;
    util::write_numeric_table(arg.output_dir.join(INPUT_APPLIED_FILE), &inputs)?;
    util::write_numeric_table(arg.output_dir.join(TARGET_APPLIED_FILE), &targets)?;
    eprintln!(
        "Scaled {} rows with artifacts from {}",
        inputs.num_rows(),
        arg.artifacts_dir.display()
    );
    Ok(())
}
