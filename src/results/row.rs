use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::field::FieldDef;
use crate::catalog::TypeCatalog;
use crate::error::{NeonHttpError, Result};
use crate::types::PgValue;

/// An object-mode row: values addressed by column name.
///
/// Column names are shared by every row of a result set, as is the name to
/// index cache.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRow {
    /// The column names for this row (shared across all rows in a result set)
    pub column_names: Arc<Vec<String>>,
    /// The values for this row, in field order
    pub values: Vec<PgValue>,
    #[doc(hidden)]
    pub(crate) column_index_cache: Arc<HashMap<String, usize>>,
}

impl NamedRow {
    /// Create a row, building the column index cache.
    ///
    /// When two columns share a name the later one wins, as it does in the
    /// server's object-mode JSON.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<PgValue>) -> Self {
        let cache = Arc::new(index_columns(&column_names));
        Self {
            column_names,
            values,
            column_index_cache: cache,
        }
    }

    pub(crate) fn with_cache(
        column_names: Arc<Vec<String>>,
        column_index_cache: Arc<HashMap<String, usize>>,
        values: Vec<PgValue>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index_cache,
        }
    }

    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index_cache.get(column_name).copied()
    }

    /// Get a value by column name, or `None` if there is no such column.
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&PgValue> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&PgValue> {
        self.values.get(index)
    }

    /// Iterate `(name, value)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PgValue)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

fn index_columns(column_names: &[String]) -> HashMap<String, usize> {
    column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

/// One decoded result row, shaped by the request's array mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Array mode: values by position
    Array(Vec<PgValue>),
    /// Object mode: values by column name
    Object(NamedRow),
}

impl Row {
    /// Value at `index`, in either mode.
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&PgValue> {
        match self {
            Row::Array(values) => values.get(index),
            Row::Object(row) => row.get_by_index(index),
        }
    }

    /// Value of column `name`; always `None` for array-mode rows.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PgValue> {
        match self {
            Row::Array(_) => None,
            Row::Object(row) => row.get(name),
        }
    }

    #[must_use]
    pub fn values(&self) -> &[PgValue] {
        match self {
            Row::Array(values) => values,
            Row::Object(row) => &row.values,
        }
    }

    #[must_use]
    pub fn into_values(self) -> Vec<PgValue> {
        match self {
            Row::Array(values) => values,
            Row::Object(row) => row.values,
        }
    }
}

/// Decodes raw rows against one result set's fields.
///
/// Built once per result set so object-mode rows share their column names.
#[derive(Debug)]
pub struct RowConverter<'a> {
    fields: &'a [FieldDef],
    catalog: &'a TypeCatalog,
    column_names: Arc<Vec<String>>,
    column_index_cache: Arc<HashMap<String, usize>>,
}

impl<'a> RowConverter<'a> {
    #[must_use]
    pub fn new(fields: &'a [FieldDef], catalog: &'a TypeCatalog) -> Self {
        let column_names: Vec<String> = fields.iter().map(|f| f.name.clone()).collect();
        let column_index_cache = Arc::new(index_columns(&column_names));
        Self {
            fields,
            catalog,
            column_names: Arc::new(column_names),
            column_index_cache,
        }
    }

    /// Decode one raw row. A JSON array is positional, a JSON object is keyed
    /// by field name.
    ///
    /// # Errors
    /// `MalformedResponse` when the row is neither shape, has the wrong
    /// number of values, or lacks a field; `Decode` when a value does not
    /// parse as its field's type.
    pub fn convert(&self, raw: &JsonValue) -> Result<Row> {
        match raw {
            JsonValue::Array(cells) => {
                if cells.len() != self.fields.len() {
                    return Err(NeonHttpError::MalformedResponse(format!(
                        "row has {} values but the result has {} fields",
                        cells.len(),
                        self.fields.len()
                    )));
                }
                self.fields
                    .iter()
                    .zip(cells)
                    .map(|(field, cell)| self.decode_cell(field, cell))
                    .collect::<Result<Vec<_>>>()
                    .map(Row::Array)
            }
            JsonValue::Object(map) => {
                let values = self
                    .fields
                    .iter()
                    .map(|field| {
                        let cell = map.get(&field.name).ok_or_else(|| {
                            NeonHttpError::MalformedResponse(format!(
                                "row is missing field {:?}",
                                field.name
                            ))
                        })?;
                        self.decode_cell(field, cell)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Row::Object(NamedRow::with_cache(
                    Arc::clone(&self.column_names),
                    Arc::clone(&self.column_index_cache),
                    values,
                )))
            }
            other => Err(NeonHttpError::MalformedResponse(format!(
                "expected a row array or object, got {other}"
            ))),
        }
    }

    fn decode_cell(&self, field: &FieldDef, cell: &JsonValue) -> Result<PgValue> {
        match cell {
            JsonValue::Null => Ok(PgValue::Null),
            JsonValue::String(text) => self.catalog.decode(Some(text), field.data_type_id),
            other => Err(NeonHttpError::MalformedResponse(format!(
                "field {:?} holds {other}; raw text output sends strings or null",
                field.name
            ))),
        }
    }
}

/// Decode one raw row against `fields`.
///
/// # Errors
/// See [`RowConverter::convert`].
pub fn convert_row(raw: &JsonValue, fields: &[FieldDef], catalog: &TypeCatalog) -> Result<Row> {
    RowConverter::new(fields, catalog).convert(raw)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::oid;

    fn fields() -> Vec<FieldDef> {
        vec![FieldDef::new("id", oid::INT4), FieldDef::new("name", oid::TEXT)]
    }

    #[test]
    fn array_mode_is_positional() {
        let catalog = TypeCatalog::global();
        let row = convert_row(&json!(["1", "alice"]), &fields(), &catalog).unwrap();
        assert_eq!(row, Row::Array(vec![PgValue::Int(1), "alice".into()]));
        assert_eq!(row.get("id"), None);
    }

    #[test]
    fn object_mode_is_keyed() {
        let catalog = TypeCatalog::global();
        let row = convert_row(&json!({"name": "bob", "id": "2"}), &fields(), &catalog).unwrap();
        let Row::Object(named) = &row else {
            panic!("expected object row");
        };
        assert_eq!(named.get("id"), Some(&PgValue::Int(2)));
        assert_eq!(named.get("name").and_then(PgValue::as_text), Some("bob"));
        assert_eq!(named.get("missing"), None);
        let pairs: Vec<_> = named.iter().map(|(k, _)| k).collect();
        assert_eq!(pairs, ["id", "name"]);
    }

    #[test]
    fn nulls_pass_through() {
        let catalog = TypeCatalog::global();
        let row = convert_row(&json!([null, null]), &fields(), &catalog).unwrap();
        assert_eq!(row.values(), &[PgValue::Null, PgValue::Null]);
    }

    #[test]
    fn missing_values_are_reported() {
        let catalog = TypeCatalog::global();
        for raw in [json!(["1"]), json!({"id": "1"}), json!("1"), json!([1, "x"])] {
            let err = convert_row(&raw, &fields(), &catalog).unwrap_err();
            assert!(matches!(err, NeonHttpError::MalformedResponse(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn shared_columns_across_rows() {
        let catalog = TypeCatalog::global();
        let fields = fields();
        let converter = RowConverter::new(&fields, &catalog);
        let a = converter.convert(&json!({"id": "1", "name": "a"})).unwrap();
        let b = converter.convert(&json!({"id": "2", "name": "b"})).unwrap();
        let (Row::Object(a), Row::Object(b)) = (a, b) else {
            panic!("expected object rows");
        };
        assert!(Arc::ptr_eq(&a.column_names, &b.column_names));
    }
}
