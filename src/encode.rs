//! Parameter encoding: native values into PostgreSQL text literals.
//!
//! The shape of the [`PgValue`] alone selects the rule. `None` in the output
//! stands for SQL NULL and is sent as a JSON `null`.

use crate::error::{NeonHttpError, Result};
use crate::format::array::push_element;
use crate::format::{bytea, datetime, interval};
use crate::types::PgValue;

/// Encode a single parameter.
///
/// # Errors
/// Returns `NeonHttpError::Encode` when the value has no text representation
/// (text containing NUL, ragged arrays, dates outside the server's range,
/// network prefixes longer than the address).
pub fn encode(value: &PgValue) -> Result<Option<String>> {
    let fail = |cause: String| NeonHttpError::encode(value.type_name(), value, cause);
    let text = match value {
        PgValue::Null => return Ok(None),
        PgValue::Bool(b) => String::from(if *b { "t" } else { "f" }),
        PgValue::Int(i) => i.to_string(),
        PgValue::Float(f) => encode_float(*f),
        PgValue::Numeric(n) => n.to_string(),
        PgValue::Text(s) => {
            if s.contains('\0') {
                return Err(fail("text cannot contain NUL characters".to_string()));
            }
            s.clone()
        }
        PgValue::Bytes(b) => bytea::format_bytea(b),
        PgValue::Json(v) => serde_json::to_string(v).map_err(|e| fail(e.to_string()))?,
        PgValue::Array(items) => encode_array(items).map_err(fail)?,
        PgValue::Date(d) => datetime::format_date(*d).map_err(fail)?,
        PgValue::Time(t) => datetime::format_time(*t),
        PgValue::TimeTz(t, offset) => datetime::format_timetz(*t, *offset),
        PgValue::Timestamp(ts) => datetime::format_timestamp(*ts).map_err(fail)?,
        PgValue::TimestampTz(ts) => datetime::format_timestamptz(ts).map_err(fail)?,
        PgValue::Interval(iv) => interval::format_interval(iv),
        PgValue::Uuid(u) => u.hyphenated().to_string(),
        PgValue::Inet(addr) => addr.to_string(),
        PgValue::Network(net) => {
            if net.prefix_len > net.max_prefix_len() {
                return Err(fail(format!("prefix length exceeds {}", net.max_prefix_len())));
            }
            net.to_string()
        }
    };
    Ok(Some(text))
}

/// Encode a parameter list, preserving order and arity.
///
/// # Errors
/// Fails on the first parameter that cannot be encoded.
pub fn encode_params(params: &[PgValue]) -> Result<Vec<Option<String>>> {
    params.iter().map(encode).collect()
}

fn encode_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        String::from(if f > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        f.to_string()
    }
}

fn encode_array(items: &[PgValue]) -> std::result::Result<String, String> {
    check_rectangular(items)?;
    let mut out = String::new();
    write_array(&mut out, items)?;
    Ok(out)
}

fn write_array(out: &mut String, items: &[PgValue]) -> std::result::Result<(), String> {
    out.push('{');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match item {
            PgValue::Null => out.push_str("NULL"),
            PgValue::Array(inner) => write_array(out, inner)?,
            other => match encode(other) {
                Ok(Some(text)) => push_element(out, &text),
                Ok(None) => out.push_str("NULL"),
                Err(NeonHttpError::Encode { type_name, cause, .. }) => {
                    return Err(format!("{type_name} element: {cause}"));
                }
                Err(e) => return Err(e.to_string()),
            },
        }
    }
    out.push('}');
    Ok(())
}

/// Multidimensional arrays must have matching sub-array lengths, and a level
/// is either all sub-arrays or all scalars (NULL counts as a scalar).
fn check_rectangular(items: &[PgValue]) -> std::result::Result<(), String> {
    let nested = items.iter().filter(|v| matches!(v, PgValue::Array(_))).count();
    if nested == 0 {
        return Ok(());
    }
    if nested != items.len() {
        return Err("array mixes sub-arrays and scalar elements".to_string());
    }
    let mut expected = None;
    for item in items {
        if let PgValue::Array(inner) = item {
            match expected {
                None => expected = Some(inner.len()),
                Some(len) if len != inner.len() => {
                    return Err(format!(
                        "multidimensional arrays must have matching extents ({len} vs {})",
                        inner.len()
                    ));
                }
                Some(_) => {}
            }
            check_rectangular(inner)?;
        }
    }
    Ok(())
}
