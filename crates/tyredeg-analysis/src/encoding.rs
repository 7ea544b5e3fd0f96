//! Categorical encoding
//!
//! Driver and team names are turned into dense integer codes `0..k-1`. The
//! assignment order is selectable: [`EncodingOrder::Sorted`] gives codes that
//! depend only on the set of names, [`EncodingOrder::FirstAppearance`] follows
//! row order. Compounds always use the fixed table of
//! [`Compound::code`](tyredeg_telemetry::Compound::code).

use std::{collections::BTreeMap, str::FromStr as _};

use serde::{Deserialize, Serialize};
use tyredeg_telemetry::Compound;

use crate::feature::FeatureRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncodingOrder {
    /// Codes follow lexicographic order of the names
    #[default]
    Sorted,
    /// Codes follow the order names first appear in the table
    FirstAppearance,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EncodeError {
    #[display("row {row}: unknown tire compound {value:?}")]
    UnknownCompound { row: usize, value: String },
    #[display("row {row}: driver {value:?} has no code")]
    UnknownDriver { row: usize, value: String },
    #[display("row {row}: team {value:?} has no code")]
    UnknownTeam { row: usize, value: String },
}

/// Name-to-code mappings fitted on one feature table.
///
/// Persisted next to the scalers so that new rows can be encoded the same
/// way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    pub order: EncodingOrder,
    pub drivers: BTreeMap<String, u32>,
    pub teams: BTreeMap<String, u32>,
    pub compounds: BTreeMap<String, u8>,
}

impl CodeTable {
    #[must_use]
    pub fn fit(rows: &[FeatureRow], order: EncodingOrder) -> Self {
        Self {
            order,
            drivers: assign_codes(rows.iter().map(|r| r.driver.as_str()), order),
            teams: assign_codes(rows.iter().map(|r| r.team.as_str()), order),
            compounds: Compound::ALL
                .iter()
                .map(|c| (c.to_string(), c.code()))
                .collect(),
        }
    }

    pub fn driver_code(&self, row: usize, driver: &str) -> Result<u32, EncodeError> {
        self.drivers
            .get(driver)
            .copied()
            .ok_or_else(|| EncodeError::UnknownDriver {
                row,
                value: driver.to_owned(),
            })
    }

    pub fn team_code(&self, row: usize, team: &str) -> Result<u32, EncodeError> {
        self.teams
            .get(team)
            .copied()
            .ok_or_else(|| EncodeError::UnknownTeam {
                row,
                value: team.to_owned(),
            })
    }

    /// Compound names are matched exactly, upper case.
    pub fn compound_code(&self, row: usize, compound: &str) -> Result<u8, EncodeError> {
        let unknown = || EncodeError::UnknownCompound {
            row,
            value: compound.to_owned(),
        };
        if self.compounds.is_empty() {
            return Compound::from_str(compound)
                .map(Compound::code)
                .map_err(|_| unknown());
        }
        self.compounds.get(compound).copied().ok_or_else(unknown)
    }
}

fn assign_codes<'a, I>(names: I, order: EncodingOrder) -> BTreeMap<String, u32>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = vec![];
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    if order == EncodingOrder::Sorted {
        seen.sort_unstable();
    }
    (0..)
        .zip(seen)
        .map(|(code, name)| (name.to_owned(), code))
        .collect()
}
