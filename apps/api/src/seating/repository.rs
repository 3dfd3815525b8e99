//! Table Repository Adapter — the boundary to the external record store.
//!
//! The store is a worksheet: row 1 holds headers, table records start at row 2.
//! Callers address rows through `RowIndex`, built from a position in the loaded table set.
//! The header offset lives only in `RowIndex::from_position`.

use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::seating::codec::TableRecord;

/// Store row of the first record, i.e. header rows + 1 (store rows are 1-based).
pub const HEADER_ROW_OFFSET: usize = 2;

pub const TABLE_HEADERS: [&str; 4] = ["id", "shape", "capacity", "seats"];

/// 1-based row number in the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RowIndex(usize);

impl RowIndex {
    /// Store row holding the record at `position` (0-based) of the loaded set.
    pub fn from_position(position: usize) -> Self {
        RowIndex(position + HEADER_ROW_OFFSET)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// Columns of a table record, in store order.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    Id,
    Shape,
    Capacity,
    Seats,
}

impl TableColumn {
    /// 1-based column number.
    pub fn index(self) -> usize {
        match self {
            TableColumn::Id => 1,
            TableColumn::Shape => 2,
            TableColumn::Capacity => 3,
            TableColumn::Seats => 4,
        }
    }
}

/// Writes `value` into `column`, extending a short row with empty cells.
pub fn set_cell(cells: &mut Vec<String>, column: TableColumn, value: String) {
    let col = column.index() - 1;
    if cells.len() <= col {
        cells.resize(col + 1, String::new());
    }
    cells[col] = value;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store call timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Row {0} is outside the stored range")]
    RowOutOfRange(usize),
}

/// The four record-store operations the seating engine needs.
///
/// Implementations perform no validation beyond fitting rows to the four-column shape
/// and never retry on behalf of the caller.
#[async_trait]
pub trait TableRepository: Send + Sync {
    /// All table records in store order, header excluded.
    async fn list_records(&self) -> Result<Vec<TableRecord>, StoreError>;

    async fn append_record(&self, record: TableRecord) -> Result<(), StoreError>;

    async fn replace_cell(
        &self,
        row: RowIndex,
        column: TableColumn,
        value: String,
    ) -> Result<(), StoreError>;

    /// Removes a row; rows below it move up by one.
    async fn delete_record(&self, row: RowIndex) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// MemorySheet — in-process worksheet
// ────────────────────────────────────────────────────────────────────────────

/// A worksheet kept in memory, header row included. Used when no database is configured
/// and as the store behind engine tests.
pub struct MemorySheet {
    rows: Mutex<Vec<Vec<String>>>,
}

impl Default for MemorySheet {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySheet {
    pub fn new() -> Self {
        let header = TABLE_HEADERS.iter().map(|h| h.to_string()).collect();
        Self {
            rows: Mutex::new(vec![header]),
        }
    }

    #[cfg(test)]
    /// Seeds the sheet with raw rows below the header, as another client might have written them.
    pub fn with_rows(rows: Vec<Vec<String>>) -> Self {
        let sheet = Self::new();
        sheet.lock().extend(rows);
        sheet
    }

    #[cfg(test)]
    /// Snapshot of every row, header first.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<String>>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Converts a 1-based store row into a vector index, rejecting the header and
    /// anything past the last row.
    fn slot(rows: &[Vec<String>], row: RowIndex) -> Result<usize, StoreError> {
        let idx = row.get().checked_sub(1).filter(|&i| i >= 1 && i < rows.len());
        idx.ok_or(StoreError::RowOutOfRange(row.get()))
    }
}

#[async_trait]
impl TableRepository for MemorySheet {
    async fn list_records(&self) -> Result<Vec<TableRecord>, StoreError> {
        Ok(self
            .lock()
            .iter()
            .skip(1)
            .cloned()
            .map(TableRecord::from_cells)
            .collect())
    }

    async fn append_record(&self, record: TableRecord) -> Result<(), StoreError> {
        self.lock().push(record.into_cells());
        Ok(())
    }

    async fn replace_cell(
        &self,
        row: RowIndex,
        column: TableColumn,
        value: String,
    ) -> Result<(), StoreError> {
        let mut rows = self.lock();
        let slot = Self::slot(&rows, row)?;
        set_cell(&mut rows[slot], column, value);
        Ok(())
    }

    async fn delete_record(&self, row: RowIndex) -> Result<(), StoreError> {
        let mut rows = self.lock();
        let slot = Self::slot(&rows, row)?;
        rows.remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str) -> TableRecord {
        TableRecord {
            id: id.to_string(),
            shape: "Round".to_string(),
            capacity: "2".to_string(),
            seats: ";".to_string(),
        }
    }

    #[test]
    fn test_row_index_applies_header_offset() {
        assert_eq!(RowIndex::from_position(0).get(), 2);
        assert_eq!(RowIndex::from_position(5).get(), 7);
    }

    #[test]
    fn test_seats_column_is_fourth() {
        assert_eq!(TableColumn::Id.index(), 1);
        assert_eq!(TableColumn::Seats.index(), 4);
    }

    #[test]
    fn test_set_cell_overwrites_in_place() {
        let mut cells: Vec<String> = vec!["A".into(), "Round".into(), "2".into(), ";".into()];
        set_cell(&mut cells, TableColumn::Seats, "Ann;".into());
        assert_eq!(cells, vec!["A", "Round", "2", "Ann;"]);
    }

    #[test]
    fn test_set_cell_pads_short_row() {
        let mut cells = vec!["A".to_string()];
        set_cell(&mut cells, TableColumn::Capacity, "4".into());
        assert_eq!(cells, vec!["A", "", "4"]);
    }

    #[tokio::test]
    async fn test_append_and_list_skip_header() {
        let sheet = MemorySheet::new();
        sheet.append_record(rec("A")).await.unwrap();
        sheet.append_record(rec("B")).await.unwrap();

        let records = sheet.list_records().await.unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(sheet.rows()[0][0], "id");
    }

    #[tokio::test]
    async fn test_replace_cell_targets_store_row() {
        let sheet = MemorySheet::new();
        sheet.append_record(rec("A")).await.unwrap();
        sheet.append_record(rec("B")).await.unwrap();

        sheet
            .replace_cell(RowIndex::from_position(1), TableColumn::Seats, "x;y".into())
            .await
            .unwrap();

        let records = sheet.list_records().await.unwrap();
        assert_eq!(records[0].seats, ";");
        assert_eq!(records[1].seats, "x;y");
    }

    #[tokio::test]
    async fn test_replace_cell_extends_short_row() {
        let sheet = MemorySheet::with_rows(vec![vec!["A".to_string()]]);
        sheet
            .replace_cell(RowIndex::from_position(0), TableColumn::Seats, "a;b".into())
            .await
            .unwrap();
        assert_eq!(sheet.rows()[1], vec!["A", "", "", "a;b"]);
    }

    #[tokio::test]
    async fn test_delete_shifts_following_rows_up() {
        let sheet = MemorySheet::new();
        for id in ["A", "B", "C"] {
            sheet.append_record(rec(id)).await.unwrap();
        }
        sheet
            .delete_record(RowIndex::from_position(1))
            .await
            .unwrap();

        let ids: Vec<_> = sheet
            .list_records()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_header_and_missing_rows_are_out_of_range() {
        let sheet = MemorySheet::new();
        sheet.append_record(rec("A")).await.unwrap();

        let err = sheet.delete_record(RowIndex(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::RowOutOfRange(1)));

        let err = sheet
            .delete_record(RowIndex::from_position(3))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::RowOutOfRange(5)));
    }
}
