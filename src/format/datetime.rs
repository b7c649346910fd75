use std::fmt::Write as _;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Earliest year (proleptic, so 4713 BC is -4712) the server accepts for dates.
const MIN_YEAR: i32 = -4712;

const BC_SUFFIX: &str = " BC";

/// Append `.ffffff` with trailing zeros removed; nothing for whole seconds.
pub(crate) fn push_fraction(out: &mut String, micros: u32) {
    if micros == 0 {
        return;
    }
    let digits = format!("{micros:06}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

fn split_era(s: &str) -> (&str, bool) {
    match s.strip_suffix(BC_SUFFIX) {
        Some(rest) => (rest, true),
        None => (s, false),
    }
}

fn push_era(out: &mut String, year: i32) {
    if year <= 0 {
        out.push_str(BC_SUFFIX);
    }
}

fn push_date(out: &mut String, date: NaiveDate) -> Result<(), String> {
    let year = date.year();
    if year < MIN_YEAR {
        return Err(format!("date {date} is before 4713 BC"));
    }
    let display_year = if year <= 0 { 1 - year } else { year };
    let _ = write!(out, "{display_year:04}-{:02}-{:02}", date.month(), date.day());
    Ok(())
}

fn push_time(out: &mut String, time: NaiveTime) {
    let _ = write!(
        out,
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    );
    // leap seconds are carried as nanos >= 1e9
    push_fraction(out, (time.nanosecond() % 1_000_000_000) / 1_000);
}

fn push_offset(out: &mut String, offset: FixedOffset) {
    let total = offset.local_minus_utc();
    out.push(if total < 0 { '-' } else { '+' });
    let total = total.unsigned_abs();
    let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
    let _ = write!(out, "{hours:02}");
    if minutes != 0 || seconds != 0 {
        let _ = write!(out, ":{minutes:02}");
    }
    if seconds != 0 {
        let _ = write!(out, ":{seconds:02}");
    }
}

pub(crate) fn format_date(date: NaiveDate) -> Result<String, String> {
    let mut out = String::with_capacity(13);
    push_date(&mut out, date)?;
    push_era(&mut out, date.year());
    Ok(out)
}

pub(crate) fn format_time(time: NaiveTime) -> String {
    let mut out = String::with_capacity(15);
    push_time(&mut out, time);
    out
}

pub(crate) fn format_timetz(time: NaiveTime, offset: FixedOffset) -> String {
    let mut out = format_time(time);
    push_offset(&mut out, offset);
    out
}

pub(crate) fn format_timestamp(ts: NaiveDateTime) -> Result<String, String> {
    let mut out = String::with_capacity(29);
    push_date(&mut out, ts.date())?;
    out.push(' ');
    push_time(&mut out, ts.time());
    push_era(&mut out, ts.year());
    Ok(out)
}

/// Rendered in the value's own offset, so the wall-clock time the caller built
/// is the one the server sees.
pub(crate) fn format_timestamptz(ts: &DateTime<FixedOffset>) -> Result<String, String> {
    let local = ts.naive_local();
    let mut out = String::with_capacity(35);
    push_date(&mut out, local.date())?;
    out.push(' ');
    push_time(&mut out, local.time());
    push_offset(&mut out, *ts.offset());
    push_era(&mut out, local.year());
    Ok(out)
}

fn reject_infinity(s: &str) -> Result<(), String> {
    if s.eq_ignore_ascii_case("infinity") || s.eq_ignore_ascii_case("-infinity") {
        return Err(format!("{s} is not representable"));
    }
    Ok(())
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, String> {
    reject_infinity(s)?;
    let (s, bc) = split_era(s);
    let mut parts = s.splitn(3, '-');
    let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next()) else {
        return Err("expected YYYY-MM-DD".to_string());
    };
    let year: i32 = year.parse().map_err(|e| format!("invalid year: {e}"))?;
    let month: u32 = month.parse().map_err(|e| format!("invalid month: {e}"))?;
    let day: u32 = day.parse().map_err(|e| format!("invalid day: {e}"))?;
    let year = if bc { 1 - year } else { year };
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| "date out of range".to_string())
}

/// The server accepts `24:00:00` as a time of day; chrono has no such value,
/// so it is rejected rather than moved to another instant.
pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, String> {
    if is_end_of_day(s) {
        return Err(format!("{s} is past the last representable time of day"));
    }
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f").map_err(|e| format!("invalid time: {e}"))
}

fn is_end_of_day(s: &str) -> bool {
    s.strip_prefix("24:00:00").is_some_and(|rest| {
        rest.is_empty()
            || rest
                .strip_prefix('.')
                .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b == b'0'))
    })
}

fn split_offset(s: &str) -> Result<(&str, FixedOffset), String> {
    let idx = s
        .rfind(['+', '-'])
        .ok_or_else(|| "missing UTC offset".to_string())?;
    Ok((&s[..idx], parse_offset(&s[idx..])?))
}

fn parse_offset(s: &str) -> Result<FixedOffset, String> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(format!("invalid UTC offset {s:?}")),
    };
    if rest.split(':').count() > 3 {
        return Err(format!("invalid UTC offset {s:?}"));
    }
    let mut seconds = 0i32;
    for (part, scale) in rest.split(':').zip([3600, 60, 1]) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid UTC offset {s:?}"));
        }
        seconds = part
            .parse::<i32>()
            .ok()
            .and_then(|value| value.checked_mul(scale))
            .and_then(|value| seconds.checked_add(value))
            .ok_or_else(|| format!("UTC offset {s:?} out of range"))?;
    }
    FixedOffset::east_opt(sign * seconds).ok_or_else(|| format!("UTC offset {s:?} out of range"))
}

pub(crate) fn parse_timetz(s: &str) -> Result<(NaiveTime, FixedOffset), String> {
    let (time, offset) = split_offset(s)?;
    Ok((parse_time(time)?, offset))
}

fn split_date_time(s: &str) -> Result<(&str, &str), String> {
    s.split_once([' ', 'T'])
        .ok_or_else(|| "expected a date and a time separated by a space".to_string())
}

fn with_era(date: &str, bc: bool) -> String {
    if bc {
        format!("{date}{BC_SUFFIX}")
    } else {
        date.to_string()
    }
}

pub(crate) fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    reject_infinity(s)?;
    let (s, bc) = split_era(s);
    let (date, time) = split_date_time(s)?;
    Ok(parse_date(&with_era(date, bc))?.and_time(parse_time(time)?))
}

pub(crate) fn parse_timestamptz(s: &str) -> Result<DateTime<FixedOffset>, String> {
    reject_infinity(s)?;
    let (s, bc) = split_era(s);
    let (date, rest) = split_date_time(s)?;
    let (time, offset) = parse_timetz(rest)?;
    parse_date(&with_era(date, bc))?
        .and_time(time)
        .and_local_timezone(offset)
        .single()
        .ok_or_else(|| "timestamp out of range".to_string())
}
