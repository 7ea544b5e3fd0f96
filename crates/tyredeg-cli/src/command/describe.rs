use std::{io::Write as _, path::PathBuf};

use anyhow::Context as _;
use tyredeg_stats::{descriptive::DescriptiveStats, table::NumericTable};

use crate::util::{self, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// Numeric CSV file with a header row
    pub input: PathBuf,
    /// Output file path (default: stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let table = util::read_numeric_table(&arg.input)?;
    eprintln!(
        "Loaded {} values ({} rows x {} columns) from {}",
        table.num_rows() * table.num_columns(),
        table.num_rows(),
        table.num_columns(),
        arg.input.display()
    );

    let mut output = Output::from_output_path(arg.output.clone())?;
    write_report(&mut output, &table)
        .with_context(|| format!("Failed to write report to {}", output.display_path()))?;
    Ok(())
}

fn write_report<W>(out: &mut W, table: &NumericTable) -> std::io::Result<()>
where
    W: std::io::Write,
{
    writeln!(out, "rows: {}", table.num_rows())?;
    writeln!(out, "columns: {}", table.num_columns())?;
    writeln!(out)?;

    let name_width = table
        .columns()
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max("column".len());
    writeln!(
        out,
        "{:<name_width$}  {:>14}  {:>14}  {:>14}  {:>14}  {:>14}",
        "column", "min", "max", "mean", "median", "std_dev"
    )?;
    for (i, name) in table.columns().iter().enumerate() {
        match DescriptiveStats::new(table.column_at(i)) {
            Some(stats) => writeln!(
                out,
                "{name:<name_width$}  {:>14.4}  {:>14.4}  {:>14.4}  {:>14.4}  {:>14.4}",
                stats.min, stats.max, stats.mean, stats.median, stats.std_dev
            )?,
            None => writeln!(out, "{name:<name_width$}  (no values)")?,
        }
    }
    out.flush()
}
