use std::path::{Path, PathBuf};

use tyredeg_analysis::{
    encoding::EncodingOrder,
    normalization::{self, NormalizationArtifacts},
};

use crate::util::{self, Output};

pub(crate) const INPUT_DATA_FILE: &str = "x-preprocessed-data.csv";
pub(crate) const TARGET_DATA_FILE: &str = "y-preprocessed-data.csv";
pub(crate) const INPUT_SCALER_FILE: &str = "x-scaler.json";
pub(crate) const TARGET_SCALER_FILE: &str = "y-scaler.json";
pub(crate) const CODE_TABLE_FILE: &str = "codes.json";

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum EncodingArg {
    /// Codes follow the sorted names
    #[default]
    Sorted,
    /// Codes follow the order names first appear in the dataset
    FirstAppearance,
}

impl From<EncodingArg> for EncodingOrder {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Sorted => EncodingOrder::Sorted,
            EncodingArg::FirstAppearance => EncodingOrder::FirstAppearance,
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct NormalizeArg {
    /// Assembled dataset CSV written by `build`
    #[arg(long)]
    pub input: PathBuf,
    /// Directory to write scaled tables and fitted artifacts into
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
    /// How driver and team codes are assigned
    #[arg(long, value_enum, default_value_t = EncodingArg::Sorted)]
    pub encoding: EncodingArg,
}

pub(crate) fn run(arg: &NormalizeArg) -> anyhow::Result<()> {
    normalize_file(&arg.input, &arg.output_dir, arg.encoding.into())
}

pub(crate) fn normalize_file(
    input: &Path,
    output_dir: &Path,
    order: EncodingOrder,
) -> anyhow::Result<()> {
    let rows = util::read_feature_rows(input)?;
    eprintln!("Loaded {} rows from {}", rows.len(), input.display());

    let dataset = normalization::fit_normalize(&rows, order)?;
    util::create_dir(output_dir)?;
    util::write_numeric_table(output_dir.join(INPUT_DATA_FILE), &dataset.inputs)?;
    util::write_numeric_table(output_dir.join(TARGET_DATA_FILE), &dataset.targets)?;
    save_artifacts(output_dir, &dataset.artifacts)?;

    eprintln!(
        "Wrote {} inputs x {} rows and {} targets x {} rows to {}",
        dataset.inputs.num_columns(),
        dataset.inputs.num_rows(),
        dataset.targets.num_columns(),
        dataset.targets.num_rows(),
        output_dir.display()
    );
    Ok(())
}

pub(crate) fn save_artifacts(dir: &Path, artifacts: &NormalizationArtifacts) -> anyhow::Result<()> {
    Output::save_json(&artifacts.input_scaler, Some(dir.join(INPUT_SCALER_FILE)))?;
    Output::save_json(&artifacts.target_scaler, Some(dir.join(TARGET_SCALER_FILE)))?;
    Output::save_json(&artifacts.codes, Some(dir.join(CODE_TABLE_FILE)))?;
    Ok(())
}

pub(crate) fn load_artifacts(dir: &Path) -> anyhow::Result<NormalizationArtifacts> {
    Ok(NormalizationArtifacts {
        codes: util::read_json_file("code table", dir.join(CODE_TABLE_FILE))?,
        input_scaler: util::read_json_file("input scaler", dir.join(INPUT_SCALER_FILE))?,
        target_scaler: util::read_json_file("target scaler", dir.join(TARGET_SCALER_FILE))?,
    })
}
