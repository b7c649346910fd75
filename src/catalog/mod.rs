// Type catalog: the OID-keyed table of decode rules.
//
// Built once and read-only afterwards. The process-wide default catalog is
// shared behind an `Arc`; callers that need a different interval style build
// their own with `TypeCatalog::new`.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::decode as rules;
use crate::error::{NeonHttpError, Result};
use crate::format::IntervalStyle;
use crate::format::array::{ArrayElement, parse_array};
use crate::types::PgValue;

pub mod oid;

/// Broad family of a PostgreSQL type, mirroring `pg_type.typcategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Boolean,
    Numeric,
    String,
    DateTime,
    Timespan,
    Binary,
    Json,
    Uuid,
    Network,
    Geometric,
    Array,
    Other,
}

/// Decode function for one scalar type: raw text in, value or cause out.
pub type DecodeFn = fn(&str, &TypeCatalog) -> std::result::Result<PgValue, String>;

#[derive(Clone, Copy)]
enum RuleKind {
    Scalar(DecodeFn),
    Array { element: u32, delimiter: char },
}

/// How values of one OID are decoded.
#[derive(Clone, Copy)]
pub struct TypeRule {
    pub oid: u32,
    pub name: &'static str,
    pub category: TypeCategory,
    kind: RuleKind,
}

impl std::fmt::Debug for TypeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRule")
            .field("oid", &self.oid)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("element", &self.element_oid())
            .finish()
    }
}

impl TypeRule {
    #[must_use]
    pub fn scalar(oid: u32, name: &'static str, category: TypeCategory, decode: DecodeFn) -> Self {
        Self {
            oid,
            name,
            category,
            kind: RuleKind::Scalar(decode),
        }
    }

    /// One-dimensional array of `element`, comma delimited.
    #[must_use]
    pub fn array(oid: u32, name: &'static str, element: u32) -> Self {
        Self::array_with_delimiter(oid, name, element, ',')
    }

    #[must_use]
    pub fn array_with_delimiter(oid: u32, name: &'static str, element: u32, delimiter: char) -> Self {
        Self {
            oid,
            name,
            category: TypeCategory::Array,
            kind: RuleKind::Array { element, delimiter },
        }
    }

    /// Element OID for array rules.
    #[must_use]
    pub fn element_oid(&self) -> Option<u32> {
        match self.kind {
            RuleKind::Array { element, .. } => Some(element),
            RuleKind::Scalar(_) => None,
        }
    }

    fn apply(&self, text: &str, catalog: &TypeCatalog) -> std::result::Result<PgValue, String> {
        match self.kind {
            RuleKind::Scalar(decode) => decode(text, catalog),
            RuleKind::Array { element, delimiter } => {
                let element_rule = catalog
                    .lookup(element)
                    .ok_or_else(|| format!("no rule for array element OID {element}"))?;
                let items = parse_array(text, delimiter)?;
                decode_elements(items, element_rule, catalog).map(PgValue::Array)
            }
        }
    }
}

fn decode_elements(
    items: Vec<ArrayElement>,
    rule: &TypeRule,
    catalog: &TypeCatalog,
) -> std::result::Result<Vec<PgValue>, String> {
    items
        .into_iter()
        .map(|item| match item {
            ArrayElement::Null => Ok(PgValue::Null),
            ArrayElement::Value(text) => rule
                .apply(&text, catalog)
                .map_err(|cause| format!("element {text:?}: {cause}")),
            ArrayElement::Nested(inner) => decode_elements(inner, rule, catalog).map(PgValue::Array),
        })
        .collect()
}

static DEFAULT_CATALOG: LazyLock<Arc<TypeCatalog>> =
    LazyLock::new(|| Arc::new(TypeCatalog::new(IntervalStyle::default())));

/// OID-keyed registry of decode rules.
///
/// ```rust
/// use neon_http::catalog::{TypeCatalog, oid};
/// use neon_http::PgValue;
///
/// let catalog = TypeCatalog::global();
/// let value = catalog.decode(Some("{1,NULL,3}"), oid::INT4_ARRAY)?;
/// assert_eq!(value, PgValue::Array(vec![PgValue::Int(1), PgValue::Null, PgValue::Int(3)]));
/// # Ok::<(), neon_http::NeonHttpError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    rules: HashMap<u32, TypeRule>,
    interval_style: IntervalStyle,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new(IntervalStyle::default())
    }
}

impl TypeCatalog {
    /// Catalog with every built-in rule, reading intervals in `interval_style`.
    #[must_use]
    pub fn new(interval_style: IntervalStyle) -> Self {
        let mut catalog = Self {
            rules: HashMap::new(),
            interval_style,
        };
        for rule in builtin_rules() {
            catalog.register(rule);
        }
        catalog
    }

    /// The shared default catalog (`IntervalStyle::Postgres`).
    #[must_use]
    pub fn global() -> Arc<TypeCatalog> {
        Arc::clone(&DEFAULT_CATALOG)
    }

    /// Add or replace the rule for `rule.oid`.
    pub fn register(&mut self, rule: TypeRule) {
        self.rules.insert(rule.oid, rule);
    }

    #[must_use]
    pub fn lookup(&self, oid: u32) -> Option<&TypeRule> {
        self.rules.get(&oid)
    }

    #[must_use]
    pub fn interval_style(&self) -> IntervalStyle {
        self.interval_style
    }

    /// Decode one raw text value of type `oid`; `None` is SQL NULL.
    ///
    /// # Errors
    /// Returns `NeonHttpError::Decode` for unknown OIDs and malformed text.
    pub fn decode(&self, value: Option<&str>, oid: u32) -> Result<PgValue> {
        let Some(text) = value else {
            return Ok(PgValue::Null);
        };
        let rule = self
            .lookup(oid)
            .ok_or_else(|| NeonHttpError::decode(text, oid, format!("unknown type OID {oid}")))?;
        rule.apply(text, self)
            .map_err(|cause| NeonHttpError::decode(text, oid, cause))
    }
}

fn builtin_rules() -> Vec<TypeRule> {
    use TypeCategory as C;

    let scalars: &[(u32, &'static str, TypeCategory, DecodeFn)] = &[
        (oid::BOOL, "bool", C::Boolean, rules::decode_bool),
        (oid::BYTEA, "bytea", C::Binary, rules::decode_bytea),
        (oid::CHAR, "char", C::String, rules::decode_text),
        (oid::NAME, "name", C::String, rules::decode_text),
        (oid::TEXT, "text", C::String, rules::decode_text),
        (oid::BPCHAR, "bpchar", C::String, rules::decode_text),
        (oid::VARCHAR, "varchar", C::String, rules::decode_text),
        (oid::INT2, "int2", C::Numeric, rules::decode_int2),
        (oid::INT4, "int4", C::Numeric, rules::decode_int4),
        (oid::INT8, "int8", C::Numeric, rules::decode_int8),
        (oid::OID, "oid", C::Numeric, rules::decode_oid),
        (oid::FLOAT4, "float4", C::Numeric, rules::decode_float),
        (oid::FLOAT8, "float8", C::Numeric, rules::decode_float),
        (oid::NUMERIC, "numeric", C::Numeric, rules::decode_numeric),
        (oid::MONEY, "money", C::Numeric, rules::decode_text),
        (oid::JSON, "json", C::Json, rules::decode_json),
        (oid::JSONB, "jsonb", C::Json, rules::decode_json),
        (oid::XML, "xml", C::String, rules::decode_text),
        (oid::DATE, "date", C::DateTime, rules::decode_date),
        (oid::TIME, "time", C::DateTime, rules::decode_time),
        (oid::TIMETZ, "timetz", C::DateTime, rules::decode_timetz),
        (oid::TIMESTAMP, "timestamp", C::DateTime, rules::decode_timestamp),
        (oid::TIMESTAMPTZ, "timestamptz", C::DateTime, rules::decode_timestamptz),
        (oid::INTERVAL, "interval", C::Timespan, rules::decode_interval),
        (oid::UUID, "uuid", C::Uuid, rules::decode_uuid),
        (oid::INET, "inet", C::Network, rules::decode_inet),
        (oid::CIDR, "cidr", C::Network, rules::decode_cidr),
        (oid::MACADDR, "macaddr", C::Network, rules::decode_text),
        (oid::MACADDR8, "macaddr8", C::Network, rules::decode_text),
        (oid::POINT, "point", C::Geometric, rules::decode_text),
        (oid::LSEG, "lseg", C::Geometric, rules::decode_text),
        (oid::PATH, "path", C::Geometric, rules::decode_text),
        (oid::BOX, "box", C::Geometric, rules::decode_text),
        (oid::POLYGON, "polygon", C::Geometric, rules::decode_text),
        (oid::LINE, "line", C::Geometric, rules::decode_text),
        (oid::CIRCLE, "circle", C::Geometric, rules::decode_text),
    ];

    let arrays: &[(u32, &'static str, u32)] = &[
        (oid::BOOL_ARRAY, "_bool", oid::BOOL),
        (oid::BYTEA_ARRAY, "_bytea", oid::BYTEA),
        (oid::CHAR_ARRAY, "_char", oid::CHAR),
        (oid::NAME_ARRAY, "_name", oid::NAME),
        (oid::INT2_ARRAY, "_int2", oid::INT2),
        (oid::INT4_ARRAY, "_int4", oid::INT4),
        (oid::INT8_ARRAY, "_int8", oid::INT8),
        (oid::OID_ARRAY, "_oid", oid::OID),
        (oid::TEXT_ARRAY, "_text", oid::TEXT),
        (oid::BPCHAR_ARRAY, "_bpchar", oid::BPCHAR),
        (oid::VARCHAR_ARRAY, "_varchar", oid::VARCHAR),
        (oid::FLOAT4_ARRAY, "_float4", oid::FLOAT4),
        (oid::FLOAT8_ARRAY, "_float8", oid::FLOAT8),
        (oid::NUMERIC_ARRAY, "_numeric", oid::NUMERIC),
        (oid::MONEY_ARRAY, "_money", oid::MONEY),
        (oid::JSON_ARRAY, "_json", oid::JSON),
        (oid::JSONB_ARRAY, "_jsonb", oid::JSONB),
        (oid::XML_ARRAY, "_xml", oid::XML),
        (oid::DATE_ARRAY, "_date", oid::DATE),
        (oid::TIME_ARRAY, "_time", oid::TIME),
        (oid::TIMETZ_ARRAY, "_timetz", oid::TIMETZ),
        (oid::TIMESTAMP_ARRAY, "_timestamp", oid::TIMESTAMP),
        (oid::TIMESTAMPTZ_ARRAY, "_timestamptz", oid::TIMESTAMPTZ),
        (oid::INTERVAL_ARRAY, "_interval", oid::INTERVAL),
        (oid::UUID_ARRAY, "_uuid", oid::UUID),
        (oid::INET_ARRAY, "_inet", oid::INET),
        (oid::CIDR_ARRAY, "_cidr", oid::CIDR),
        (oid::MACADDR_ARRAY, "_macaddr", oid::MACADDR),
        (oid::MACADDR8_ARRAY, "_macaddr8", oid::MACADDR8),
        (oid::POINT_ARRAY, "_point", oid::POINT),
        (oid::BOX_ARRAY, "_box", oid::BOX),
    ];

    scalars
        .iter()
        .map(|&(oid, name, category, decode)| TypeRule::scalar(oid, name, category, decode))
        .chain(arrays.iter().map(|&(oid, name, element)| {
            // box is the only built-in whose array delimiter is not a comma
            if element == oid::BOX {
                TypeRule::array_with_delimiter(oid, name, element, ';')
            } else {
                TypeRule::array(oid, name, element)
            }
        }))
        .collect()
}
