//! Lenient cell deserializers for provider exports
//!
//! The provider writes integers as floats (`3.0`), booleans in Python case
//! (`True`), and marks gaps with empty cells or `NaN`/`NaT`.

use chrono::TimeDelta;
use serde::{Deserialize, Deserializer, de::Error as _};

use crate::duration::{is_null, parse_duration};

fn cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !is_null(s.trim())))
}

pub(crate) fn opt_duration<'de, D>(deserializer: D) -> Result<Option<TimeDelta>, D::Error>
where
    D: Deserializer<'de>,
{
    match cell(deserializer)? {
        Some(text) => parse_duration(&text).map_err(D::Error::custom),
        None => Ok(None),
    }
}

pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    cell(deserializer)?
        .map(|text| {
            text.trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid number '{text}'")))
        })
        .transpose()
}

pub(crate) fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    cell(deserializer)?
        .map(|text| match text.trim() {
            "True" | "true" | "TRUE" | "1" | "1.0" => Ok(true),
            "False" | "false" | "FALSE" | "0" | "0.0" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag '{other}'"))),
        })
        .transpose()
}

pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(cell(deserializer)?.map(|s| s.trim().to_owned()))
}

/// Lap numbers arrive as `7` or `7.0`; anything fractional or negative is rejected.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn lap_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let text = cell(deserializer)?.ok_or_else(|| D::Error::custom("missing lap number"))?;
    let text = text.trim();
    if let Ok(n) = text.parse::<u32>() {
        return Ok(n);
    }
    let invalid = || D::Error::custom(format!("invalid lap number '{text}'"));
    let value = text.parse::<f64>().map_err(|_| invalid())?;
    if value.fract() != 0.0 || !(0.0..=f64::from(u32::MAX)).contains(&value) {
        return Err(invalid());
    }
    Ok(value as u32)
}
