use chrono::TimeDelta;

const NANOS_PER_SEC: i64 = 1_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid duration '{text}'")]
pub struct ParseDurationError {
    pub text: String,
}

/// Parses a duration cell from a provider export.
///
/// Accepted forms:
///
/// - timedelta text: `0 days 00:01:16.123000`, `-1 days +23:59:59.500000`
/// - clock text: `1:16.123`, `00:01:16.123`
/// - plain seconds: `76.123`
///
/// Empty cells, `NaT` and `NaN` parse to `None`.
///
/// # Examples
///
/// ```
/// use chrono::TimeDelta;
/// use tyredeg_telemetry::parse_duration;
///
/// let lap = TimeDelta::milliseconds(76_123);
/// assert_eq!(parse_duration("0 days 00:01:16.123000").unwrap(), Some(lap));
/// assert_eq!(parse_duration("1:16.123").unwrap(), Some(lap));
/// assert_eq!(parse_duration("76.123").unwrap(), Some(lap));
/// assert_eq!(parse_duration("NaT").unwrap(), None);
/// ```
pub fn parse_duration(text: &str) -> Result<Option<TimeDelta>, ParseDurationError> {
    let trimmed = text.trim();
    if is_null(trimmed) {
        return Ok(None);
    }
    let err = || ParseDurationError {
        text: text.to_owned(),
    };

    let parsed = if let Some((days, clock)) = split_days(trimmed) {
        let days = days.trim().parse::<i64>().map_err(|_| err())?;
        let clock = parse_clock(clock.trim()).ok_or_else(err)?;
        TimeDelta::try_days(days)
            .and_then(|d| d.checked_add(&clock))
            .ok_or_else(err)?
    } else if trimmed.contains(':') {
        parse_clock(trimmed).ok_or_else(err)?
    } else {
        parse_seconds(trimmed).ok_or_else(err)?
    };
    Ok(Some(parsed))
}

/// Elapsed milliseconds, including the fractional sub-millisecond part.
///
/// Equivalent to `total_seconds() * 1000` on the provider side.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn duration_ms(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 * 1000.0 + f64::from(delta.subsec_nanos()) / 1e6
}

pub(crate) fn is_null(text: &str) -> bool {
    text.is_empty()
        || text.eq_ignore_ascii_case("nat")
        || text.eq_ignore_ascii_case("nan")
        || text.eq_ignore_ascii_case("none")
}

fn split_days(text: &str) -> Option<(&str, &str)> {
    text.split_once(" days ")
        .or_else(|| text.split_once(" day "))
}

/// `[+-][[H:]M:]S[.fraction]`
fn parse_clock(text: &str) -> Option<TimeDelta> {
    let (negative, body) = split_sign(text);
    let mut parts = body.rsplit(':');
    let seconds = parse_unsigned_seconds(parts.next()?)?;
    let minutes = parts.next().map_or(Some(0), |m| m.parse::<i64>().ok())?;
    let hours = parts.next().map_or(Some(0), |h| h.parse::<i64>().ok())?;
    if parts.next().is_some() || minutes < 0 || hours < 0 {
        return None;
    }
    let total = TimeDelta::try_hours(hours)?
        .checked_add(&TimeDelta::try_minutes(minutes)?)?
        .checked_add(&seconds)?;
    Some(if negative { -total } else { total })
}

fn parse_seconds(text: &str) -> Option<TimeDelta> {
    let (negative, body) = split_sign(text);
    let seconds = parse_unsigned_seconds(body)?;
    Some(if negative { -seconds } else { seconds })
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

/// Decimal seconds without sign, parsed exactly to nanosecond resolution.
fn parse_unsigned_seconds(text: &str) -> Option<TimeDelta> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let secs = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?
    };
    let mut nanos = 0_i64;
    let mut unit = NANOS_PER_SEC;
    for digit in fraction.bytes().take(9) {
        unit /= 10;
        nanos += i64::from(digit - b'0') * unit;
    }
    TimeDelta::try_seconds(secs)?.checked_add(&TimeDelta::nanoseconds(nanos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_cells() {
        for text in ["", "  ", "NaT", "nan", "NaN", "None"] {
            assert_eq!(parse_duration(text).unwrap(), None, "{text:?}");
        }
    }

    #[test]
    fn test_timedelta_text() {
        assert_eq!(
            parse_duration("0 days 00:00:28.456000").unwrap(),
            Some(TimeDelta::microseconds(28_456_000))
        );
        assert_eq!(
            parse_duration("0 days 01:02:03.000000001").unwrap(),
            Some(TimeDelta::nanoseconds(3_723_000_000_001))
        );
        assert_eq!(
            parse_duration("-1 days +23:59:59.500000").unwrap(),
            Some(TimeDelta::milliseconds(-500))
        );
    }

    #[test]
    fn test_clock_and_seconds() {
        assert_eq!(
            parse_duration("01:30.5").unwrap(),
            Some(TimeDelta::milliseconds(90_500))
        );
        assert_eq!(
            parse_duration("1:00:00").unwrap(),
            Some(TimeDelta::hours(1))
        );
        assert_eq!(
            parse_duration("89").unwrap(),
            Some(TimeDelta::seconds(89))
        );
        assert_eq!(
            parse_duration("-0.25").unwrap(),
            Some(TimeDelta::milliseconds(-250))
        );
        assert_eq!(
            parse_duration(".5").unwrap(),
            Some(TimeDelta::milliseconds(500))
        );
    }

    #[test]
    fn test_invalid_text() {
        for text in ["fast", "1:2:3:4", "12.3.4", "x days 00:00:01", "1e3", "-"] {
            assert!(parse_duration(text).is_err(), "{text:?}");
        }
    }

    #[test]
    fn test_duration_ms_keeps_fraction() {
        assert!((duration_ms(TimeDelta::microseconds(76_123_456)) - 76_123.456).abs() < 1e-9);
        assert_eq!(duration_ms(TimeDelta::milliseconds(-500)), -500.0);
        assert_eq!(duration_ms(TimeDelta::zero()), 0.0);
    }
}
