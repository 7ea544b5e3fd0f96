//! Per-column min-max scaling
//!
//! [`MinMaxScaler`] learns each column's observed minimum and maximum and maps
//! the column affinely onto `[0, 1]`. A fitted scaler is plain data and is
//! persisted as JSON so later, unseen rows can be transformed with the same
//! ranges (apply-only, no re-fit).
//!
//! A column whose minimum equals its maximum is treated as having range 1, so
//! every value in it maps to 0 instead of dividing by zero.

use std::iter;

use serde::{Deserialize, Serialize};

use crate::table::NumericTable;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ScaleError {
    #[display("cannot fit a scaler on an empty table")]
    EmptyTable,
    #[display("non-finite value in row {row}, column '{column}'")]
    NonFinite { row: usize, column: String },
    #[display("column mismatch: scaler was fitted on [{}], table has [{}]", expected.join(", "), found.join(", "))]
    ColumnMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

/// Observed range of a single column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl ColumnRange {
    fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 { 1.0 } else { span }
    }

    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    #[must_use]
    pub fn unscale(&self, value: f64) -> f64 {
        value * self.span() + self.min
    }
}

/// A fitted min-max transform, one [`ColumnRange`] per column
///
/// # Examples
///
/// ```
/// use tyredeg_stats::{scaler::MinMaxScaler, table::NumericTable};
///
/// let table = NumericTable::new(
///     vec!["lap_ms".to_owned()],
///     vec![vec![80_000.0], vec![90_000.0], vec![85_000.0]],
/// )
/// .unwrap();
/// let scaler = MinMaxScaler::fit(&table).unwrap();
/// let scaled = scaler.transform(&table).unwrap();
/// assert_eq!(scaled.rows(), &[vec![0.0], vec![1.0], vec![0.5]]);
///
/// let restored = scaler.inverse_transform(&scaled).unwrap();
/// assert_eq!(restored, table);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub columns: Vec<ColumnRange>,
}

impl MinMaxScaler {
    /// Learns per-column min/max from `table`.
    ///
    /// Every value must be finite; the table must contain at least one row.
    pub fn fit(table: &NumericTable) -> Result<Self, ScaleError> {
        if table.is_empty() {
            return Err(ScaleError::EmptyTable);
        }
        check_finite(table)?;

        let columns = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let (min, max) = table
                    .column_at(i)
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), v| {
                        (min.min(v), max.max(v))
                    });
                ColumnRange {
                    name: name.clone(),
                    min,
                    max,
                }
            })
            .collect();
        Ok(Self { columns })
    }

    /// Fits on `table` and returns the transformed table.
    pub fn fit_transform(table: &NumericTable) -> Result<(Self, NumericTable), ScaleError> {
        let scaler = Self::fit(table)?;
        let scaled = scaler.transform(table)?;
        Ok((scaler, scaled))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Maps every value onto the fitted range.
    ///
    /// Values outside the fitted range land outside `[0, 1]`; they are not clamped.
    pub fn transform(&self, table: &NumericTable) -> Result<NumericTable, ScaleError> {
        self.map_table(table, ColumnRange::scale)
    }

    /// Maps scaled values back to original units.
    pub fn inverse_transform(&self, table: &NumericTable) -> Result<NumericTable, ScaleError> {
        self.map_table(table, ColumnRange::unscale)
    }

    fn map_table(
        &self,
        table: &NumericTable,
        f: fn(&ColumnRange, f64) -> f64,
    ) -> Result<NumericTable, ScaleError> {
        self.check_columns(table)?;
        check_finite(table)?;
        let rows = table
            .rows()
            .iter()
            .map(|row| {
                iter::zip(&self.columns, row)
                    .map(|(range, value)| f(range, *value))
                    .collect()
            })
            .collect();
        Ok(table.with_rows(rows))
    }

    fn check_columns(&self, table: &NumericTable) -> Result<(), ScaleError> {
        if self.column_names().eq(table.columns().iter().map(String::as_str)) {
            Ok(())
        } else {
            Err(ScaleError::ColumnMismatch {
                expected: self.column_names().map(str::to_owned).collect(),
                found: table.columns().to_vec(),
            })
        }
    }
}

fn check_finite(table: &NumericTable) -> Result<(), ScaleError> {
    for (row, values) in table.rows().iter().enumerate() {
        if let Some(col) = values.iter().position(|v| !v.is_finite()) {
            return Err(ScaleError::NonFinite {
                row,
                column: table.columns()[col].clone(),
            });
        }
    }
    Ok(())
}
