//! Numeric utilities for the tyre-decay dataset.
//!
//! - [`table`]: a column-named `f64` table shared by every numeric stage
//! - [`scaler`]: per-column min-max scaling with persisted, reusable ranges
//! - [`descriptive`]: summary statistics used when inspecting datasets
//!
//! # Examples
//!
//! ```
//! use tyredeg_stats::{descriptive::DescriptiveStats, scaler::MinMaxScaler, table::NumericTable};
//!
//! let table = NumericTable::new(
//!     vec!["decay_ms".to_owned()],
//!     vec![vec![-500.0], vec![-2500.0], vec![0.0]],
//! )
//! .unwrap();
//!
//! let stats = DescriptiveStats::new(table.column_at(0)).unwrap();
//! assert_eq!(stats.min, -2500.0);
//!
//! let (scaler, scaled) = MinMaxScaler::fit_transform(&table).unwrap();
//! assert_eq!(scaler.columns[0].max, 0.0);
//! assert_eq!(scaled.rows()[1], vec![0.0]);
//! ```

pub mod descriptive;
pub mod scaler;
pub mod table;
