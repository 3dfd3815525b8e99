use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One worksheet row as stored in `sheet_rows`. `row_index` is 1-based; row 1 is the header.
/// A NULL array element is a blank cell written by another client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SheetRow {
    pub row_index: i32,
    pub cells: Vec<Option<String>>,
}
