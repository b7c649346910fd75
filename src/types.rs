use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use bigdecimal::BigDecimal;
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Values that can be sent as query parameters or read back from a result row.
///
/// The variant chosen by the caller decides the text form sent to the server;
/// the destination column type is never consulted:
/// ```rust
/// use neon_http::prelude::*;
///
/// let params = vec![
///     PgValue::Int(1),
///     PgValue::Text("alice".into()),
///     PgValue::Array(vec![PgValue::from("a"), PgValue::Null]),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PgValue {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (`int2`, `int4`, `int8`, `oid`)
    Int(i64),
    /// Floating point value (`float4`, `float8`)
    Float(f64),
    /// Arbitrary-precision decimal (`numeric`)
    Numeric(PgNumeric),
    /// Text value; also used for pass-through types such as `macaddr` or `point`
    Text(String),
    /// Binary data (`bytea`)
    Bytes(Vec<u8>),
    /// JSON document (`json`, `jsonb`)
    Json(JsonValue),
    /// SQL array; nested arrays form extra dimensions
    Array(Vec<PgValue>),
    /// Calendar date
    Date(NaiveDate),
    /// Time of day without zone. The server's `24:00:00` has no counterpart
    /// and fails to decode.
    Time(NaiveTime),
    /// Time of day with a fixed UTC offset (`timetz`)
    TimeTz(NaiveTime, FixedOffset),
    /// Timestamp without zone
    Timestamp(NaiveDateTime),
    /// Timestamp with an explicit UTC offset
    TimestampTz(DateTime<FixedOffset>),
    /// Duration (`interval`)
    Interval(PgInterval),
    /// UUID
    Uuid(Uuid),
    /// Single host address (`inet` without a prefix)
    Inet(IpAddr),
    /// Address with a prefix length (`cidr`, or `inet` with a netmask)
    Network(IpNetwork),
}

impl PgValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short PostgreSQL-flavoured name of the variant, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            PgValue::Null => "null",
            PgValue::Bool(_) => "bool",
            PgValue::Int(_) => "integer",
            PgValue::Float(_) => "float",
            PgValue::Numeric(_) => "numeric",
            PgValue::Text(_) => "text",
            PgValue::Bytes(_) => "bytea",
            PgValue::Json(_) => "json",
            PgValue::Array(_) => "array",
            PgValue::Date(_) => "date",
            PgValue::Time(_) => "time",
            PgValue::TimeTz(..) => "timetz",
            PgValue::Timestamp(_) => "timestamp",
            PgValue::TimestampTz(_) => "timestamptz",
            PgValue::Interval(_) => "interval",
            PgValue::Uuid(_) => "uuid",
            PgValue::Inet(_) => "inet",
            PgValue::Network(_) => "cidr",
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let PgValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PgValue::Float(value) => Some(*value),
            #[allow(clippy::cast_precision_loss)]
            PgValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_numeric(&self) -> Option<&PgNumeric> {
        if let PgValue::Numeric(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let PgValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let PgValue::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        if let PgValue::Bytes(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        if let PgValue::Json(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[PgValue]> {
        if let PgValue::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            PgValue::Timestamp(value) => Some(*value),
            PgValue::TimestampTz(value) => Some(value.naive_utc()),
            _ => None,
        }
    }
}

/// A `numeric` value. Digits and scale are kept exactly as the server sent
/// them; the special values have their own variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PgNumeric {
    Value(BigDecimal),
    NaN,
    Infinity,
    NegativeInfinity,
}

impl PgNumeric {
    #[must_use]
    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        if let PgNumeric::Value(value) = self {
            Some(value)
        } else {
            None
        }
    }
}

impl fmt::Display for PgNumeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PgNumeric::Value(value) => f.write_str(&value.to_plain_string()),
            PgNumeric::NaN => f.write_str("NaN"),
            PgNumeric::Infinity => f.write_str("Infinity"),
            PgNumeric::NegativeInfinity => f.write_str("-Infinity"),
        }
    }
}

impl FromStr for PgNumeric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("nan") {
            Ok(PgNumeric::NaN)
        } else if s.eq_ignore_ascii_case("infinity") || s.eq_ignore_ascii_case("+infinity") {
            Ok(PgNumeric::Infinity)
        } else if s.eq_ignore_ascii_case("-infinity") {
            Ok(PgNumeric::NegativeInfinity)
        } else {
            s.parse::<BigDecimal>()
                .map(PgNumeric::Value)
                .map_err(|e| format!("invalid numeric: {e}"))
        }
    }
}

impl From<BigDecimal> for PgNumeric {
    fn from(value: BigDecimal) -> Self {
        PgNumeric::Value(value)
    }
}

/// PostgreSQL interval: months, days and microseconds are kept apart because
/// the server never folds one unit into another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PgInterval {
    pub months: i32,
    pub days: i32,
    pub microseconds: i64,
}

impl PgInterval {
    pub const MICROS_PER_SECOND: i64 = 1_000_000;
    pub const MICROS_PER_MINUTE: i64 = 60 * Self::MICROS_PER_SECOND;
    pub const MICROS_PER_HOUR: i64 = 60 * Self::MICROS_PER_MINUTE;

    #[must_use]
    pub fn new(months: i32, days: i32, microseconds: i64) -> Self {
        Self {
            months,
            days,
            microseconds,
        }
    }

    /// Interval holding only a time-of-day component.
    #[must_use]
    pub fn from_duration(duration: chrono::Duration) -> Option<Self> {
        duration.num_microseconds().map(|micros| Self::new(0, 0, micros))
    }
}

/// An address plus prefix length, as carried by `cidr` and masked `inet` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpNetwork {
    pub addr: IpAddr,
    pub prefix_len: u8,
}

impl IpNetwork {
    /// Build a network, rejecting prefixes longer than the address family allows.
    ///
    /// # Errors
    /// Returns a description of the problem when `prefix_len` is out of range.
    pub fn new(addr: IpAddr, prefix_len: u8) -> Result<Self, String> {
        let max = max_prefix(addr);
        if prefix_len > max {
            return Err(format!("prefix length {prefix_len} exceeds {max} for {addr}"));
        }
        Ok(Self { addr, prefix_len })
    }

    #[must_use]
    pub fn max_prefix_len(&self) -> u8 {
        max_prefix(self.addr)
    }
}

fn max_prefix(addr: IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

impl fmt::Display for IpNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

impl FromStr for IpNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = s
            .split_once('/')
            .ok_or_else(|| format!("missing prefix length in {s:?}"))?;
        let addr: IpAddr = addr
            .parse()
            .map_err(|e| format!("invalid address {addr:?}: {e}"))?;
        let prefix_len: u8 = prefix
            .parse()
            .map_err(|e| format!("invalid prefix length {prefix:?}: {e}"))?;
        Self::new(addr, prefix_len)
    }
}

macro_rules! impl_from_for_pg_value {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$ty> for PgValue {
                fn from(value: $ty) -> Self {
                    PgValue::$variant(value $(as $cast)?)
                }
            }
        )*
    };
}

impl_from_for_pg_value!(
    bool => Bool,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float,
    PgNumeric => Numeric,
    String => Text,
    JsonValue => Json,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => Timestamp,
    DateTime<FixedOffset> => TimestampTz,
    PgInterval => Interval,
    Uuid => Uuid,
    IpAddr => Inet,
    IpNetwork => Network,
);

impl From<BigDecimal> for PgValue {
    fn from(value: BigDecimal) -> Self {
        PgValue::Numeric(PgNumeric::Value(value))
    }
}

impl From<&str> for PgValue {
    fn from(value: &str) -> Self {
        PgValue::Text(value.to_string())
    }
}

impl From<&[u8]> for PgValue {
    fn from(value: &[u8]) -> Self {
        PgValue::Bytes(value.to_vec())
    }
}

impl From<DateTime<chrono::Utc>> for PgValue {
    fn from(value: DateTime<chrono::Utc>) -> Self {
        PgValue::TimestampTz(value.fixed_offset())
    }
}

impl<T: Into<PgValue>> From<Option<T>> for PgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PgValue::Null, Into::into)
    }
}

impl<T: Into<PgValue>> From<Vec<T>> for PgValue {
    fn from(values: Vec<T>) -> Self {
        PgValue::Array(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_and_vec_conversions() {
        let value: PgValue = vec![Some("a"), None, Some("c")].into();
        assert_eq!(
            value,
            PgValue::Array(vec!["a".into(), PgValue::Null, "c".into()])
        );
        assert!(PgValue::from(None::<i32>).is_null());
    }

    #[test]
    fn numeric_keeps_digits_and_special_values() {
        let wide = "0.3333333333333333333333333333333333333333";
        let value: PgNumeric = wide.parse().unwrap();
        assert_eq!(value.to_string(), wide);
        assert_eq!("1.50".parse::<PgNumeric>().unwrap().to_string(), "1.50");
        assert_eq!("NaN".parse::<PgNumeric>().unwrap(), PgNumeric::NaN);
        assert_eq!("-Infinity".parse::<PgNumeric>().unwrap(), PgNumeric::NegativeInfinity);
        assert!("12abc".parse::<PgNumeric>().is_err());
    }

    #[test]
    fn network_prefix_is_bounded() {
        assert!("10.0.0.0/8".parse::<IpNetwork>().is_ok());
        assert!("10.0.0.0/33".parse::<IpNetwork>().is_err());
        assert!("::1".parse::<IpNetwork>().is_err());
        let net: IpNetwork = "2001:db8::/32".parse().unwrap();
        assert_eq!(net.to_string(), "2001:db8::/32");
    }
}
