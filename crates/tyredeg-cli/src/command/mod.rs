use std::io;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::{
    apply::ApplyArg, build::BuildArg, describe::DescribeArg, normalize::NormalizeArg,
    run_all::RunArg,
};

mod apply;
mod build;
mod describe;
mod normalize;
mod run_all;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Select push laps, estimate decay rates and write the assembled dataset
    Build(#[clap(flatten)] BuildArg),
    /// Encode and scale an assembled dataset
    Normalize(#[clap(flatten)] NormalizeArg),
    /// Build, then normalize, with one configuration
    Run(#[clap(flatten)] RunArg),
    /// Scale new rows with persisted scalers and codes
    Apply(#[clap(flatten)] ApplyArg),
    /// Summarize the columns of a numeric CSV file
    Describe(#[clap(flatten)] DescribeArg),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::Build(arg) => build::run(&arg)?,
        Mode::Normalize(arg) => normalize::run(&arg)?,
        Mode::Run(arg) => run_all::run(&arg)?,
        Mode::Apply(arg) => apply::run(&arg)?,
        Mode::Describe(arg) => describe::run(&arg)?,
    }
    Ok(())
}
