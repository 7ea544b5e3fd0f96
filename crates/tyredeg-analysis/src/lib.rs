//! Practice-session analysis for tire degradation modelling
//!
//! This crate turns raw per-lap telemetry of one race weekend into a
//! normalized dataset whose targets are per-sector tire decay rates, in
//! milliseconds per lap.
//!
//! # Overview
//!
//! The work splits into two workflows.
//!
//! ## Dataset Build Workflow
//!
//! 1. **Configure** ([`config::PipelineConfig`]): event, year, sessions and
//!    push-lap threshold
//! 2. **Select Push Laps** ([`lap_selector::LapSelector`]): drop pit, deleted
//!    and inaccurate laps, then keep laps within the threshold of each
//!    driver's fastest lap
//! 3. **Estimate Decay** ([`decay::estimate_session_decay`]): slope from each
//!    driver's personal-best sector lap, per sector
//! 4. **Assemble** ([`feature::assemble`]): merge sessions into the fixed
//!    18-column [`feature::FeatureRow`] table
//!
//! [`pipeline::build_dataset`] runs all four steps against any
//! [`LapSource`](tyredeg_telemetry::LapSource), and [`run_key::RunKey`]
//! identifies a build so that unchanged inputs are not recomputed.
//!
//! ## Normalization Workflow
//!
//! 1. **Encode** ([`encoding::CodeTable`]): driver and team names to dense
//!    codes, compounds to their fixed codes
//! 2. **Split and Scale** ([`normalization::fit_normalize`]): 14 inputs and 3
//!    decay targets, each side min-max scaled on its own
//! 3. **Reuse** ([`normalization::NormalizationArtifacts`]): apply persisted
//!    codes and ranges to new rows, or invert scaled predictions
//!
//! # Example
//!
//! ```no_run
//! use tyredeg_analysis::{
//!     config::PipelineConfig, encoding::EncodingOrder, normalization, pipeline,
//! };
//! use tyredeg_telemetry::CsvLapSource;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let config = PipelineConfig::default();
//! let source = CsvLapSource::new("data");
//!
//! let dataset = pipeline::build_dataset(&config, &source)?;
//! println!("{} push laps kept", dataset.rows.len());
//!
//! let normalized = normalization::fit_normalize(&dataset.rows, EncodingOrder::Sorted)?;
//! println!(
//!     "{} inputs, {} targets",
//!     normalized.inputs.num_columns(),
//!     normalized.targets.num_columns()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`lap_selector`]: push-lap filtering
//! - [`decay`]: personal bests and decay rates
//! - [`session`]: per-session processing
//! - [`feature`]: the assembled table and its column manifest
//! - [`encoding`]: categorical codes
//! - [`normalization`]: encoding plus min-max scaling
//! - [`config`]: build parameters
//! - [`run_key`]: build identity and dataset metadata
//! - [`pipeline`]: the end-to-end build

pub mod config;
pub mod decay;
pub mod encoding;
pub mod feature;
pub mod lap_selector;
pub mod normalization;
pub mod pipeline;
pub mod run_key;
pub mod session;
