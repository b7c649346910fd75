use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::field::FieldDef;
use super::row::{Row, RowConverter};
use crate::catalog::TypeCatalog;
use crate::error::{NeonHttpError, Result};

/// Everything the server reported for one statement, with rows decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct FullQueryResults {
    /// Decoded rows, shaped by `row_as_array`
    pub rows: Vec<Row>,
    /// Column metadata, one entry per column
    pub fields: Vec<FieldDef>,
    /// Rows returned or affected; `None` when the server omits it
    pub row_count: Option<u64>,
    /// Whether rows are positional
    pub row_as_array: bool,
    /// Command tag (`SELECT`, `INSERT`, ...)
    pub command: String,
}

impl FullQueryResults {
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// The result of one statement, in the form the caller asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Rows plus fields, row count and command tag
    Full(FullQueryResults),
    /// Rows only
    Rows(Vec<Row>),
}

impl QueryResult {
    pub(crate) fn shape(full: FullQueryResults, full_results: bool) -> Self {
        if full_results {
            QueryResult::Full(full)
        } else {
            QueryResult::Rows(full.rows)
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        match self {
            QueryResult::Full(full) => &full.rows,
            QueryResult::Rows(rows) => rows,
        }
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryResult::Full(full) => full.rows,
            QueryResult::Rows(rows) => rows,
        }
    }

    #[must_use]
    pub fn as_full(&self) -> Option<&FullQueryResults> {
        match self {
            QueryResult::Full(full) => Some(full),
            QueryResult::Rows(_) => None,
        }
    }
}

/// One statement's result as it arrives on the wire, rows still raw text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawQueryResult {
    pub rows: Vec<JsonValue>,
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub row_count: Option<u64>,
    #[serde(default)]
    pub row_as_array: Option<bool>,
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawBatchResponse {
    pub results: Vec<RawQueryResult>,
}

impl RawQueryResult {
    pub(crate) fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| NeonHttpError::MalformedResponse(e.to_string()))
    }

    /// Decode every row. `array_mode` is what the request asked for and is
    /// used when the server does not echo `rowAsArray`.
    pub(crate) fn decode(self, catalog: &TypeCatalog, array_mode: bool) -> Result<FullQueryResults> {
        let rows = {
            let converter = RowConverter::new(&self.fields, catalog);
            self.rows
                .iter()
                .map(|raw| converter.convert(raw))
                .collect::<Result<Vec<_>>>()?
        };
        Ok(FullQueryResults {
            rows,
            fields: self.fields,
            row_count: self.row_count,
            row_as_array: self.row_as_array.unwrap_or(array_mode),
            command: self.command.unwrap_or_default(),
        })
    }
}

impl RawBatchResponse {
    pub(crate) fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| NeonHttpError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PgValue;

    const BODY: &str = r#"{
        "command": "SELECT",
        "rowCount": 2,
        "rowAsArray": true,
        "fields": [{"name": "id", "dataTypeID": 23}, {"name": "tags", "dataTypeID": 1009}],
        "rows": [["1", "{a,b}"], ["2", null]]
    }"#;

    #[test]
    fn decodes_full_result() {
        let catalog = TypeCatalog::global();
        let full = RawQueryResult::parse(BODY).unwrap().decode(&catalog, true).unwrap();
        assert_eq!(full.command, "SELECT");
        assert_eq!(full.row_count, Some(2));
        assert!(full.row_as_array);
        assert_eq!(full.column_names(), ["id", "tags"]);
        assert_eq!(
            full.rows[0],
            Row::Array(vec![PgValue::Int(1), PgValue::Array(vec!["a".into(), "b".into()])])
        );
        assert_eq!(full.rows[1].values()[1], PgValue::Null);
    }

    #[test]
    fn bare_rows_drop_metadata() {
        let catalog = TypeCatalog::global();
        let full = RawQueryResult::parse(BODY).unwrap().decode(&catalog, true).unwrap();
        let rows = QueryResult::shape(full, false);
        assert!(rows.as_full().is_none());
        assert_eq!(rows.rows().len(), 2);
    }

    #[test]
    fn rejects_bodies_without_rows() {
        for body in ["not json", r#"{"fields": []}"#, r#"{"rows": []}"#] {
            assert!(matches!(
                RawQueryResult::parse(body),
                Err(NeonHttpError::MalformedResponse(_))
            ));
        }
    }
}
