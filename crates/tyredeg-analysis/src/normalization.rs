//! Encoding and min-max scaling of the feature table
//!
//! Turns assembled [`FeatureRow`]s into two numeric tables ready for a
//! learning stage:
//!
//! ```text
//! Vec<FeatureRow>
//!     ↓  CodeTable::fit           (Driver, Team → dense codes; Compound → fixed codes)
//!     ↓  encode_rows              (17 numeric columns, Session dropped)
//!     ↓  split_columns            (14 inputs | 3 decay targets)
//!     ↓  MinMaxScaler::fit_transform, once per side
//! NormalizedDataset { artifacts, inputs, targets }
//! ```
//!
//! The fitted [`NormalizationArtifacts`] are everything needed to scale new
//! rows identically ([`NormalizationArtifacts::apply`]) and to map scaled
//! predictions back to milliseconds per lap
//! ([`MinMaxScaler::inverse_transform`]).
//!
//! # Example
//!
//! ```
//! use tyredeg_analysis::{encoding::EncodingOrder, normalization};
//!
//! let dataset = normalization::fit_normalize(&[], EncodingOrder::Sorted);
//! assert!(dataset.is_err()); // nothing to fit on
//! ```

use serde::{Deserialize, Serialize};
use tyredeg_stats::{
    scaler::{MinMaxScaler, ScaleError},
    table::{NumericTable, TableError},
};

use crate::{
    encoding::{CodeTable, EncodeError, EncodingOrder},
    feature::{DECAY_TARGET_COLUMNS, FEATURE_MANIFEST, FeatureRow},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum NormalizeError {
    #[display("failed to encode categorical columns")]
    Encode(EncodeError),
    #[display("failed to scale table")]
    Scale(ScaleError),
    #[display("malformed numeric table")]
    Table(TableError),
    #[display("column '{name}' not found")]
    #[from(skip)]
    MissingColumn { name: String },
}

/// Fitted state of one normalization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationArtifacts {
    pub codes: CodeTable,
    pub input_scaler: MinMaxScaler,
    pub target_scaler: MinMaxScaler,
}

/// Scaled inputs and targets, row-aligned with the assembled table
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedDataset {
    pub artifacts: NormalizationArtifacts,
    pub inputs: NumericTable,
    pub targets: NumericTable,
}

/// Columns of the encoded table: the manifest without `Session`.
#[must_use]
pub fn encoded_columns() -> Vec<String> {
    FEATURE_MANIFEST[1..].iter().map(|&c| c.to_owned()).collect()
}

/// Encodes the categorical columns and drops `Session`.
///
/// Column order follows [`FEATURE_MANIFEST`].
pub fn encode_rows(rows: &[FeatureRow], codes: &CodeTable) -> Result<NumericTable, NormalizeError> {
    let encoded = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Ok(vec![
                row.lap_time_ms,
                f64::from(row.lap_number),
                row.stint,
                row.sector1_time_ms,
                row.sector2_time_ms,
                row.sector3_time_ms,
                row.speed_i1,
                row.speed_i2,
                row.speed_fl,
                row.speed_st,
                f64::from(codes.compound_code(i, &row.compound)?),
                row.tyre_life,
                f64::from(codes.driver_code(i, &row.driver)?),
                f64::from(codes.team_code(i, &row.team)?),
                row.sector1_decay_ms,
                row.sector2_decay_ms,
                row.sector3_decay_ms,
            ])
        })
        .collect::<Result<Vec<_>, EncodeError>>()?;
    Ok(NumericTable::new(encoded_columns(), encoded)?)
}

/// Splits an encoded table into (inputs, decay targets).
pub fn split_targets(table: &NumericTable) -> Result<(NumericTable, NumericTable), NormalizeError> {
    table
        .split_columns(&DECAY_TARGET_COLUMNS)
        .map_err(|name| NormalizeError::MissingColumn { name })
}

/// Fits codes and both scalers on `rows` and returns the scaled tables.
pub fn fit_normalize(
    rows: &[FeatureRow],
    order: EncodingOrder,
) -> Result<NormalizedDataset, NormalizeError> {
    let codes = CodeTable::fit(rows, order);
    let encoded = encode_rows(rows, &codes)?;
    let (inputs, targets) = split_targets(&encoded)?;
    let (input_scaler, inputs) = MinMaxScaler::fit_transform(&inputs)?;
    let (target_scaler, targets) = MinMaxScaler::fit_transform(&targets)?;
    tracing::info!(
        rows = rows.len(),
        drivers = codes.drivers.len(),
        teams = codes.teams.len(),
        "fitted normalization"
    );
    Ok(NormalizedDataset {
        artifacts: NormalizationArtifacts {
            codes,
            input_scaler,
            target_scaler,
        },
        inputs,
        targets,
    })
}

impl NormalizationArtifacts {
    /// Scales new rows with the persisted codes and ranges. Nothing is refitted.
    ///
    /// Values outside the fitted ranges map outside `[0, 1]`.
    pub fn apply(&self, rows: &[FeatureRow]) -> Result<(NumericTable, NumericTable), NormalizeError> {
        let encoded = encode_rows(rows, &self.codes)?;
        let (inputs, targets) = split_targets(&encoded)?;
        Ok((
            self.input_scaler.transform(&inputs)?,
            self.target_scaler.transform(&targets)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(driver: &str, team: &str, compound: &str, lap_number: u32, decay: [f64; 3]) -> FeatureRow {
        FeatureRow {
            session: "FP2".to_owned(),
            lap_time_ms: 77_000.0 + f64::from(lap_number) * 10.0,
            lap_number,
            stint: 1.0,
            sector1_time_ms: 22_000.0 + f64::from(lap_number),
            sector2_time_ms: 30_000.0,
            sector3_time_ms: 25_000.0 - f64::from(lap_number),
            speed_i1: 280.0 + f64::from(lap_number),
            speed_i2: 300.0,
            speed_fl: 290.0,
            speed_st: 310.0 - f64::from(lap_number),
            compound: compound.to_owned(),
            tyre_life: f64::from(lap_number),
            driver: driver.to_owned(),
            team: team.to_owned(),
            sector1_decay_ms: decay[0],
            sector2_decay_ms: decay[1],
            sector3_decay_ms: decay[2],
        }
    }

    fn sample_rows() -> Vec<FeatureRow> {
        vec![
            row("VER", "Red Bull Racing", "SOFT", 3, [-500.0, 10.0, 0.0]),
            row("VER", "Red Bull Racing", "SOFT", 4, [-2500.0, 20.0, 5.0]),
            row("VER", "Red Bull Racing", "SOFT", 5, [0.0, 0.0, 0.0]),
            row("ALO", "Aston Martin", "MEDIUM", 7, [100.0, -30.0, 12.5]),
            row("HAM", "Mercedes", "HARD", 12, [40.0, 15.0, -7.0]),
        ]
    }

    #[test]
    fn test_split_shapes() {
        let dataset = fit_normalize(&sample_rows(), EncodingOrder::Sorted).unwrap();
        assert_eq!(dataset.inputs.num_columns(), 14);
        assert_eq!(dataset.targets.num_columns(), 3);
        assert_eq!(dataset.inputs.num_rows(), 5);
        assert_eq!(dataset.targets.num_rows(), 5);
        assert_eq!(dataset.targets.columns(), DECAY_TARGET_COLUMNS);
        assert!(!dataset.inputs.columns().iter().any(|c| c == "Session"));
    }

    #[test]
    fn test_scaled_values_in_unit_interval() {
        let dataset = fit_normalize(&sample_rows(), EncodingOrder::Sorted).unwrap();
        for table in [&dataset.inputs, &dataset.targets] {
            for i in 0..table.num_columns() {
                let values: Vec<f64> = table.column_at(i).collect();
                assert!(values.iter().all(|v| (0.0..=1.0).contains(v)), "{values:?}");
                let constant = values.iter().all(|&v| v == values[0]);
                if constant {
                    assert!(values.iter().all(|&v| v == 0.0));
                } else {
                    assert!(values.contains(&0.0));
                    assert!(values.contains(&1.0));
                }
            }
        }
    }

    #[test]
    fn test_inverse_restores_decay_targets() {
        let rows = sample_rows();
        let dataset = fit_normalize(&rows, EncodingOrder::Sorted).unwrap();
        let restored = dataset
            .artifacts
            .target_scaler
            .inverse_transform(&dataset.targets)
            .unwrap();
        for (row, values) in rows.iter().zip(restored.rows()) {
            let expected = [row.sector1_decay_ms, row.sector2_decay_ms, row.sector3_decay_ms];
            for (e, v) in expected.iter().zip(values) {
                assert!((e - v).abs() < 1e-6, "{e} vs {v}");
            }
        }
    }

    #[test]
    fn test_unknown_compound_is_rejected() {
        let mut rows = sample_rows();
        rows[2].compound = "HYPERSOFT".to_owned();
        let err = fit_normalize(&rows, EncodingOrder::Sorted).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Encode(EncodeError::UnknownCompound { row: 2, .. })
        ));
    }

    #[test]
    fn test_sorted_encoding_is_independent_of_row_order() {
        let rows = sample_rows();
        let mut reversed = rows.clone();
        reversed.reverse();
        let a = fit_normalize(&rows, EncodingOrder::Sorted).unwrap();
        let b = fit_normalize(&reversed, EncodingOrder::Sorted).unwrap();
        assert_eq!(a.artifacts.codes, b.artifacts.codes);
        assert_eq!(a.artifacts.codes.drivers["ALO"], 0);
        assert_eq!(a.artifacts.codes.teams["Aston Martin"], 0);
    }

    #[test]
    fn test_first_appearance_encoding_follows_rows() {
        let dataset = fit_normalize(&sample_rows(), EncodingOrder::FirstAppearance).unwrap();
        let drivers = &dataset.artifacts.codes.drivers;
        assert_eq!(drivers["VER"], 0);
        assert_eq!(drivers["ALO"], 1);
        assert_eq!(drivers["HAM"], 2);
    }

    #[test]
    fn test_apply_reuses_fitted_ranges() {
        let rows = sample_rows();
        let dataset = fit_normalize(&rows, EncodingOrder::Sorted).unwrap();
        let (inputs, targets) = dataset.artifacts.apply(&rows).unwrap();
        assert_eq!(inputs, dataset.inputs);
        assert_eq!(targets, dataset.targets);

        // a faster lap than anything seen maps below zero
        let mut fresh = rows[0].clone();
        fresh.lap_time_ms = 70_000.0;
        let (inputs, _) = dataset.artifacts.apply(&[fresh]).unwrap();
        assert!(inputs.column("LapTime_ms").unwrap().all(|v| v < 0.0));
    }

    #[test]
    fn test_apply_rejects_unseen_driver() {
        let dataset = fit_normalize(&sample_rows(), EncodingOrder::Sorted).unwrap();
        let stranger = row("LAW", "RB", "SOFT", 2, [0.0; 3]);
        let err = dataset.artifacts.apply(&[stranger]).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::Encode(EncodeError::UnknownDriver { row: 0, .. })
        ));
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        assert!(matches!(
            fit_normalize(&[], EncodingOrder::Sorted),
            Err(NormalizeError::Scale(ScaleError::EmptyTable))
        ));
    }
}
