//! Per-lap timing telemetry for a race weekend
//!
//! The [`LapRecord`] is the only external input of the pipeline: one row per
//! (driver, lap number) within a practice, qualifying or sprint session, as
//! exported by the telemetry provider. Everything in this crate is about
//! getting those rows into memory faithfully, including the provider's habit
//! of leaving timing cells empty.
//!
//! - [`LapSource`]: the seam to the provider; [`CsvLapSource`] reads its CSV exports
//! - [`parse_duration`]: provider duration text to [`chrono::TimeDelta`]
//! - [`Compound`] and [`Sector`]: the fixed vocabularies of tire and timing data

pub use self::{compound::*, duration::*, lap::*, sector::*, source::*};

mod compound;
mod de;
mod duration;
mod lap;
mod sector;
mod source;
