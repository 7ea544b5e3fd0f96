use std::{
    fs::{self, File},
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use tyredeg_analysis::feature::{FEATURE_MANIFEST, FeatureRow};
use tyredeg_stats::table::NumericTable;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

pub fn create_dir<P>(dir: P) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

/// Read an assembled dataset written by `build`
pub fn read_feature_rows<P>(path: P) -> anyhow::Result<Vec<FeatureRow>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open dataset file: {}", path.display()))?;
    reader
        .deserialize()
        .collect::<Result<Vec<FeatureRow>, _>>()
        .with_context(|| format!("Failed to parse dataset file: {}", path.display()))
}

/// Write an assembled dataset; the header is written even when `rows` is empty
pub fn write_feature_rows<P>(path: P, rows: &[FeatureRow]) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let context = || format!("Failed to write dataset file: {}", path.display());
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(context)?;
    writer.write_record(FEATURE_MANIFEST).with_context(context)?;
    for row in rows {
        writer.serialize(row).with_context(context)?;
    }
    writer.flush().with_context(context)?;
    Ok(())
}

/// Read a CSV file of numbers with a header row
///
/// Every cell must parse as a float; the error names the first cell that
/// does not.
pub fn read_numeric_table<P>(path: P) -> anyhow::Result<NumericTable>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;
    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut rows = vec![];
    for (row_index, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("Failed to read row {} of {}", row_index + 1, path.display())
        })?;
        let row = record
            .iter()
            .zip(&columns)
            .map(|(cell, column)| {
                cell.trim().parse::<f64>().with_context(|| {
                    format!(
                        "{}: row {}, column '{column}': not a number: {cell:?}",
                        path.display(),
                        row_index + 1,
                    )
                })
            })
            .collect::<anyhow::Result<Vec<f64>>>()?;
        rows.push(row);
    }

    NumericTable::new(columns, rows)
        .with_context(|| format!("Malformed numeric table: {}", path.display()))
}

pub fn write_numeric_table<P>(path: P, table: &NumericTable) -> anyhow::Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let context = || format!("Failed to write CSV file: {}", path.display());
    let mut writer = csv::Writer::from_path(path).with_context(context)?;
    writer.write_record(table.columns()).with_context(context)?;
    for row in table.rows() {
        writer
            .write_record(row.iter().map(f64::to_string))
            .with_context(context)?;
    }
    writer.flush().with_context(context)?;
    Ok(())
}
