use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::datetime::push_fraction;
use crate::types::PgInterval;

/// Server `IntervalStyle` a catalog expects interval output to be in.
///
/// There is no live session to ask, so the style is fixed when the catalog is
/// built. Neon's HTTP endpoint runs with the server default, `postgres`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntervalStyle {
    /// `1 year 2 mons 3 days 04:05:06.5`
    #[default]
    Postgres,
    /// `P1Y2M3DT4H5M6.5S`
    Iso8601,
}

static POSTGRES_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([+-]?\d+) years? ?)?(?:([+-]?\d+) mons? ?)?(?:([+-]?\d+) days? ?)?(?:([+-])?(\d+):(\d{2}):(\d{2})(?:\.(\d{1,6}))?)?$",
    )
    .expect("interval pattern is valid")
});

static ISO_8601_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:([+-]?\d+)Y)?(?:([+-]?\d+)M)?(?:([+-]?\d+)D)?(?:T(?:([+-]?\d+)H)?(?:([+-]?\d+)M)?(?:([+-]?)(\d+)(?:\.(\d{1,6}))?S)?)?$",
    )
    .expect("interval pattern is valid")
});

/// Render an interval the way the server does under `IntervalStyle = postgres`.
pub(crate) fn format_interval(interval: &PgInterval) -> String {
    let mut out = String::new();
    let mut is_before = false;
    let mut is_zero = true;

    let parts = [
        (interval.months / 12, "year"),
        (interval.months % 12, "mon"),
        (interval.days, "day"),
    ];
    for (value, unit) in parts {
        if value == 0 {
            continue;
        }
        if !is_zero {
            out.push(' ');
        }
        if is_before && value > 0 {
            out.push('+');
        }
        let plural = if value == 1 { "" } else { "s" };
        let _ = write!(out, "{value} {unit}{plural}");
        is_zero = false;
        is_before = value < 0;
    }

    if interval.microseconds != 0 || is_zero {
        let micros = interval.microseconds.unsigned_abs();
        let per_second = PgInterval::MICROS_PER_SECOND.unsigned_abs();
        let seconds = micros / per_second;
        if !is_zero {
            out.push(' ');
        }
        if interval.microseconds < 0 {
            out.push('-');
        } else if is_before {
            out.push('+');
        }
        let _ = write!(
            out,
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            seconds / 60 % 60,
            seconds % 60
        );
        #[allow(clippy::cast_possible_truncation)]
        push_fraction(&mut out, (micros % per_second) as u32);
    }
    out
}

pub(crate) fn parse_interval(s: &str, style: IntervalStyle) -> Result<PgInterval, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty interval".to_string());
    }
    match style {
        IntervalStyle::Postgres => parse_postgres(s),
        IntervalStyle::Iso8601 => parse_iso_8601(s),
    }
}

fn int_group<T: std::str::FromStr>(caps: &Captures<'_>, idx: usize) -> Result<T, String>
where
    T: Default,
    T::Err: std::fmt::Display,
{
    caps.get(idx).map_or(Ok(T::default()), |m| {
        m.as_str()
            .trim_start_matches('+')
            .parse()
            .map_err(|e| format!("interval field {:?} out of range: {e}", m.as_str()))
    })
}

fn fraction_micros(caps: &Captures<'_>, idx: usize) -> i64 {
    caps.get(idx).map_or(0, |m| {
        let mut digits = m.as_str().to_string();
        while digits.len() < 6 {
            digits.push('0');
        }
        digits.parse().unwrap_or(0)
    })
}

fn months(years: i32, months: i32) -> Result<i32, String> {
    years
        .checked_mul(12)
        .and_then(|m| m.checked_add(months))
        .ok_or_else(|| "interval months out of range".to_string())
}

fn clock_micros(hours: i64, minutes: i64, seconds: i64, fraction: i64) -> Result<i64, String> {
    let total = || {
        hours
            .checked_mul(PgInterval::MICROS_PER_HOUR)?
            .checked_add(minutes.checked_mul(PgInterval::MICROS_PER_MINUTE)?)?
            .checked_add(seconds.checked_mul(PgInterval::MICROS_PER_SECOND)?)?
            .checked_add(fraction)
    };
    total().ok_or_else(|| "interval time out of range".to_string())
}

fn parse_postgres(s: &str) -> Result<PgInterval, String> {
    let caps = POSTGRES_STYLE
        .captures(s)
        .ok_or_else(|| format!("{s:?} is not a postgres-style interval"))?;

    let months = months(int_group(&caps, 1)?, int_group(&caps, 2)?)?;
    let days: i32 = int_group(&caps, 3)?;
    let mut micros = clock_micros(
        int_group(&caps, 5)?,
        int_group(&caps, 6)?,
        int_group(&caps, 7)?,
        fraction_micros(&caps, 8),
    )?;
    if caps.get(4).is_some_and(|m| m.as_str() == "-") {
        micros = -micros;
    }
    Ok(PgInterval::new(months, days, micros))
}

fn parse_iso_8601(s: &str) -> Result<PgInterval, String> {
    let caps = ISO_8601_STYLE
        .captures(s)
        .ok_or_else(|| format!("{s:?} is not an ISO 8601 interval"))?;

    let months = months(int_group(&caps, 1)?, int_group(&caps, 2)?)?;
    let days: i32 = int_group(&caps, 3)?;
    let hours: i64 = int_group(&caps, 4)?;
    let minutes: i64 = int_group(&caps, 5)?;
    let mut seconds = clock_micros(0, 0, int_group(&caps, 7)?, fraction_micros(&caps, 8))?;
    if caps.get(6).is_some_and(|m| m.as_str() == "-") {
        seconds = -seconds;
    }
    let micros = clock_micros(hours, minutes, 0, seconds)?;
    Ok(PgInterval::new(months, days, micros))
}
