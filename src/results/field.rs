use serde::{Deserialize, Serialize};

/// Column metadata as reported by the server.
///
/// Only `name` and `data_type_id` drive decoding; the rest is kept for
/// callers that want it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "dataTypeID")]
    pub data_type_id: u32,
    #[serde(rename = "tableID", default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<u32>,
    #[serde(rename = "columnID", default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type_modifier: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl FieldDef {
    #[must_use]
    pub fn new(name: impl Into<String>, data_type_id: u32) -> Self {
        Self {
            name: name.into(),
            data_type_id,
            table_id: None,
            column_id: None,
            data_type_size: None,
            data_type_modifier: None,
            format: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_server_metadata() {
        let field: FieldDef = serde_json::from_str(
            r#"{"name":"id","dataTypeID":23,"tableID":16385,"columnID":1,
                "dataTypeSize":4,"dataTypeModifier":-1,"format":"text"}"#,
        )
        .unwrap();
        assert_eq!(field.name, "id");
        assert_eq!(field.data_type_id, 23);
        assert_eq!(field.table_id, Some(16385));
        assert_eq!(field.data_type_modifier, Some(-1));
        assert_eq!(field.format.as_deref(), Some("text"));

        let minimal: FieldDef = serde_json::from_str(r#"{"name":"n","dataTypeID":25}"#).unwrap();
        assert_eq!(minimal, FieldDef::new("n", 25));
    }
}
