// Result shaping: field metadata, decoded rows and per-statement results.

pub mod field;
pub mod result_set;
pub mod row;

pub use field::FieldDef;
pub use result_set::{FullQueryResults, QueryResult};
pub(crate) use result_set::{RawBatchResponse, RawQueryResult};
pub use row::{NamedRow, Row, RowConverter, convert_row};
