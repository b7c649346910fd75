//! Text-format decoding: raw column text plus type OID into a [`PgValue`].
//!
//! The per-type functions here are registered in the
//! [`TypeCatalog`](crate::catalog::TypeCatalog); [`decode`] is the entry point
//! using the shared default catalog.

use std::net::IpAddr;
use std::str::FromStr;

use uuid::Uuid;

use crate::catalog::TypeCatalog;
use crate::error::Result;
use crate::format::{bytea, datetime, interval};
use crate::types::{IpNetwork, PgNumeric, PgValue};

type RuleResult = std::result::Result<PgValue, String>;

/// Decode one raw text value of type `oid` with the default catalog.
///
/// # Errors
/// Returns `NeonHttpError::Decode` for unknown OIDs or text that is not valid
/// for the type.
pub fn decode(value: Option<&str>, oid: u32) -> Result<PgValue> {
    TypeCatalog::global().decode(value, oid)
}

pub(crate) fn decode_bool(text: &str, _: &TypeCatalog) -> RuleResult {
    match text {
        "t" | "true" => Ok(PgValue::Bool(true)),
        "f" | "false" => Ok(PgValue::Bool(false)),
        _ => Err("expected \"t\" or \"f\"".to_string()),
    }
}

/// Fixed-width character types keep their blank padding.
pub(crate) fn decode_text(text: &str, _: &TypeCatalog) -> RuleResult {
    Ok(PgValue::Text(text.to_string()))
}

fn parse_int<T>(text: &str) -> RuleResult
where
    T: FromStr + Into<i64>,
    T::Err: std::fmt::Display,
{
    text.parse::<T>()
        .map(|v| PgValue::Int(v.into()))
        .map_err(|e| format!("invalid integer: {e}"))
}

pub(crate) fn decode_int2(text: &str, _: &TypeCatalog) -> RuleResult {
    parse_int::<i16>(text)
}

pub(crate) fn decode_int4(text: &str, _: &TypeCatalog) -> RuleResult {
    parse_int::<i32>(text)
}

pub(crate) fn decode_int8(text: &str, _: &TypeCatalog) -> RuleResult {
    parse_int::<i64>(text)
}

pub(crate) fn decode_oid(text: &str, _: &TypeCatalog) -> RuleResult {
    parse_int::<u32>(text)
}

pub(crate) fn decode_float(text: &str, _: &TypeCatalog) -> RuleResult {
    text.parse::<f64>()
        .map(PgValue::Float)
        .map_err(|e| format!("invalid floating point value: {e}"))
}

/// Every digit and the scale are kept; `NaN` and the infinities map to their
/// own variants.
pub(crate) fn decode_numeric(text: &str, _: &TypeCatalog) -> RuleResult {
    text.parse::<PgNumeric>().map(PgValue::Numeric)
}

pub(crate) fn decode_bytea(text: &str, _: &TypeCatalog) -> RuleResult {
    bytea::parse_bytea(text).map(PgValue::Bytes)
}

pub(crate) fn decode_json(text: &str, _: &TypeCatalog) -> RuleResult {
    serde_json::from_str(text)
        .map(PgValue::Json)
        .map_err(|e| format!("invalid JSON: {e}"))
}

pub(crate) fn decode_date(text: &str, _: &TypeCatalog) -> RuleResult {
    datetime::parse_date(text).map(PgValue::Date)
}

pub(crate) fn decode_time(text: &str, _: &TypeCatalog) -> RuleResult {
    datetime::parse_time(text).map(PgValue::Time)
}

pub(crate) fn decode_timetz(text: &str, _: &TypeCatalog) -> RuleResult {
    datetime::parse_timetz(text).map(|(time, offset)| PgValue::TimeTz(time, offset))
}

pub(crate) fn decode_timestamp(text: &str, _: &TypeCatalog) -> RuleResult {
    datetime::parse_timestamp(text).map(PgValue::Timestamp)
}

pub(crate) fn decode_timestamptz(text: &str, _: &TypeCatalog) -> RuleResult {
    datetime::parse_timestamptz(text).map(PgValue::TimestampTz)
}

pub(crate) fn decode_interval(text: &str, catalog: &TypeCatalog) -> RuleResult {
    interval::parse_interval(text, catalog.interval_style()).map(PgValue::Interval)
}

pub(crate) fn decode_uuid(text: &str, _: &TypeCatalog) -> RuleResult {
    Uuid::parse_str(text)
        .map(PgValue::Uuid)
        .map_err(|e| format!("invalid UUID: {e}"))
}

/// `inet` prints the prefix only when it is narrower than the address.
pub(crate) fn decode_inet(text: &str, _: &TypeCatalog) -> RuleResult {
    if text.contains('/') {
        return text.parse::<IpNetwork>().map(PgValue::Network);
    }
    text.parse::<IpAddr>()
        .map(PgValue::Inet)
        .map_err(|e| format!("invalid address: {e}"))
}

pub(crate) fn decode_cidr(text: &str, _: &TypeCatalog) -> RuleResult {
    text.parse::<IpNetwork>().map(PgValue::Network)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;

    use super::*;
    use crate::catalog::oid;
    use crate::error::NeonHttpError;
    use crate::format::IntervalStyle;
    use crate::types::PgInterval;

    fn ok(text: &str, oid: u32) -> PgValue {
        decode(Some(text), oid).unwrap_or_else(|e| panic!("{text:?} as {oid}: {e}"))
    }

    #[test]
    fn scalar_values() {
        assert_eq!(ok("1", oid::INT4), PgValue::Int(1));
        assert_eq!(ok("9223372036854775807", oid::INT8), PgValue::Int(i64::MAX));
        assert_eq!(ok("-32768", oid::INT2), PgValue::Int(-32768));
        assert_eq!(ok("2.718281828459045", oid::FLOAT8), PgValue::Float(2.718_281_828_459_045));
        assert_eq!(ok("123456.78", oid::NUMERIC), PgValue::Numeric("123456.78".parse().unwrap()));
        assert_eq!(ok("NaN", oid::NUMERIC), PgValue::Numeric(PgNumeric::NaN));
        assert_eq!(ok("Infinity", oid::NUMERIC), PgValue::Numeric(PgNumeric::Infinity));
        assert_eq!(ok("t", oid::BOOL), PgValue::Bool(true));
        assert_eq!(ok("f", oid::BOOL), PgValue::Bool(false));
        assert_eq!(ok("fixed123  ", oid::BPCHAR), PgValue::Text("fixed123  ".into()));
        assert_eq!(ok("08:00:2b:01:02:03", oid::MACADDR), PgValue::Text("08:00:2b:01:02:03".into()));
        assert_eq!(ok("(1,1)", oid::POINT), PgValue::Text("(1,1)".into()));
        assert_eq!(ok("{1,1,1}", oid::LINE), PgValue::Text("{1,1,1}".into()));
    }

    #[test]
    fn numeric_beyond_28_digits() {
        let wide = "0.3333333333333333333333333333333";
        let PgValue::Numeric(value) = ok(wide, oid::NUMERIC) else {
            panic!("expected numeric");
        };
        assert_eq!(value.to_string(), wide);

        let big = "1000000000000000000000000000000";
        assert_eq!(ok(big, oid::NUMERIC).as_numeric().map(ToString::to_string).as_deref(), Some(big));
        assert_eq!(
            ok("{1.5,NaN,NULL}", oid::NUMERIC_ARRAY),
            PgValue::Array(vec![
                PgValue::Numeric("1.5".parse().unwrap()),
                PgValue::Numeric(PgNumeric::NaN),
                PgValue::Null,
            ])
        );
    }

    #[test]
    fn special_floats() {
        assert!(matches!(ok("NaN", oid::FLOAT8), PgValue::Float(f) if f.is_nan()));
        assert_eq!(ok("-Infinity", oid::FLOAT4), PgValue::Float(f64::NEG_INFINITY));
    }

    #[test]
    fn temporal_values() {
        assert_eq!(ok("2024-02-26", oid::DATE), PgValue::Date(NaiveDate::from_ymd_opt(2024, 2, 26).unwrap()));
        assert_eq!(ok("14:30:00", oid::TIME), PgValue::Time(NaiveTime::from_hms_opt(14, 30, 0).unwrap()));
        let ts = NaiveDate::from_ymd_opt(2024, 2, 26).unwrap().and_hms_opt(14, 30, 0).unwrap();
        assert_eq!(ok("2024-02-26 14:30:00", oid::TIMESTAMP), PgValue::Timestamp(ts));
        let PgValue::TimestampTz(tz) = ok("2024-02-26 14:30:00+00", oid::TIMESTAMPTZ) else {
            panic!("expected timestamptz");
        };
        assert_eq!(tz.naive_utc(), ts);
        assert_eq!(tz.offset().local_minus_utc(), 0);
        assert_eq!(
            ok("1 day 02:30:00", oid::INTERVAL),
            PgValue::Interval(PgInterval::new(0, 1, 9_000_000_000))
        );
    }

    #[test]
    fn interval_style_comes_from_the_catalog() {
        let catalog = TypeCatalog::new(IntervalStyle::Iso8601);
        assert_eq!(
            catalog.decode(Some("P1DT2H30M"), oid::INTERVAL).unwrap(),
            PgValue::Interval(PgInterval::new(0, 1, 9_000_000_000))
        );
        assert!(catalog.decode(Some("1 day 02:30:00"), oid::INTERVAL).is_err());
    }

    #[test]
    fn structured_values() {
        assert_eq!(ok("\\xdeadbeef", oid::BYTEA), PgValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
        let doc = json!({"key": "value", "array": [1, 2, 3]});
        assert_eq!(ok(r#"{"key": "value", "array": [1, 2, 3]}"#, oid::JSON), PgValue::Json(doc.clone()));
        assert_eq!(ok(r#"{"key": "value", "array": [1, 2, 3]}"#, oid::JSONB), PgValue::Json(doc));
        assert_eq!(
            ok("123e4567-e89b-12d3-a456-426614174000", oid::UUID),
            PgValue::Uuid(Uuid::parse_str("123e4567e89b12d3a456426614174000").unwrap())
        );
        assert_eq!(ok("192.168.1.1", oid::INET), PgValue::Inet("192.168.1.1".parse().unwrap()));
        assert_eq!(
            ok("192.168.1.0/24", oid::CIDR),
            PgValue::Network("192.168.1.0/24".parse().unwrap())
        );
        assert_eq!(
            ok("10.1.2.3/8", oid::INET),
            PgValue::Network("10.1.2.3/8".parse().unwrap())
        );
    }

    #[test]
    fn arrays() {
        assert_eq!(ok("{1,2,3,4,5}", oid::INT4_ARRAY), PgValue::from(vec![1i32, 2, 3, 4, 5]));
        assert_eq!(ok("{one,two,three}", oid::TEXT_ARRAY), PgValue::from(vec!["one", "two", "three"]));
        assert_eq!(ok("{}", oid::INT8_ARRAY), PgValue::Array(vec![]));
        assert_eq!(
            ok(r#"{a,NULL,"NULL","x,y"}"#, oid::VARCHAR_ARRAY),
            PgValue::Array(vec!["a".into(), PgValue::Null, "NULL".into(), "x,y".into()])
        );
        assert_eq!(
            ok("{{1,2},{3,4}}", oid::INT2_ARRAY),
            PgValue::Array(vec![PgValue::from(vec![1i32, 2]), PgValue::from(vec![3i32, 4])])
        );
        assert_eq!(
            ok(r#"{"\\x00ff"}"#, oid::BYTEA_ARRAY),
            PgValue::Array(vec![PgValue::Bytes(vec![0, 255])])
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        for (text, oid) in [
            ("abc", oid::INT4),
            ("70000", oid::INT2),
            ("yes", oid::BOOL),
            ("not-a-uuid", oid::UUID),
            ("{bad json", oid::JSONB),
            ("2024-02-30", oid::DATE),
            ("300.1.1.1", oid::INET),
            ("{1,x}", oid::INT4_ARRAY),
            ("12abc", oid::NUMERIC),
            ("9999999999999:00:00", oid::INTERVAL),
            ("12:00:00+99999999", oid::TIMETZ),
            ("24:00:00", oid::TIME),
        ] {
            let err = decode(Some(text), oid).unwrap_err();
            let NeonHttpError::Decode { value, oid: got, .. } = err else {
                panic!("expected decode error for {text:?}");
            };
            assert_eq!(value, text);
            assert_eq!(got, oid);
        }
    }
}
