use crate::{
    command::{build, normalize},
    config::ConfigArg,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct RunArg {
    #[clap(flatten)]
    pub config: ConfigArg,
    /// Rebuild the dataset even if it matches the inputs
    #[arg(long)]
    pub force: bool,
    /// How driver and team codes are assigned
    #[arg(long, value_enum, default_value_t = normalize::EncodingArg::Sorted)]
    pub encoding: normalize::EncodingArg,
}

pub(crate) fn run(arg: &RunArg) -> anyhow::Result<()> {
    let config = arg.config.resolve()?;
    let dataset = build::build_dataset(&config, arg.force)?;
    normalize::normalize_file(&dataset, &config.output_dir, arg.encoding.into())
}
