//! PostgreSQL-backed worksheet.
//!
//! Rows live in `sheet_rows(sheet, row_index, cells)`, emulating a spreadsheet tab:
//! row 1 is the header, deleting a row moves every later row up by one.
//! `row_index` carries no unique constraint; the delete shift is a single UPDATE.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::models::sheet::SheetRow;
use crate::seating::codec::TableRecord;
use crate::seating::repository::{
    set_cell, RowIndex, StoreError, TableColumn, TableRepository, HEADER_ROW_OFFSET,
    TABLE_HEADERS,
};

#[derive(Clone)]
pub struct PgSheetRepository {
    pool: PgPool,
    sheet: String,
    timeout: Duration,
}

impl PgSheetRepository {
    pub fn new(pool: PgPool, sheet: impl Into<String>, timeout: Duration) -> Self {
        Self {
            pool,
            sheet: sheet.into(),
            timeout,
        }
    }

    /// Creates `sheet_rows` if needed and writes the header row for this sheet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.timed(async {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS sheet_rows (
                    sheet      TEXT    NOT NULL,
                    row_index  INTEGER NOT NULL,
                    cells      TEXT[]  NOT NULL
                )
                "#,
            )
            .execute(&self.pool)
            .await?;

            sqlx::query(
                "CREATE INDEX IF NOT EXISTS sheet_rows_sheet_row ON sheet_rows (sheet, row_index)",
            )
            .execute(&self.pool)
            .await?;

            let headers: Vec<String> = TABLE_HEADERS.iter().map(|h| h.to_string()).collect();
            sqlx::query(
                r#"
                INSERT INTO sheet_rows (sheet, row_index, cells)
                SELECT $1, 1, $2
                WHERE NOT EXISTS (SELECT 1 FROM sheet_rows WHERE sheet = $1 AND row_index = 1)
                "#,
            )
            .bind(&self.sheet)
            .bind(&headers)
            .execute(&self.pool)
            .await?;

            info!("Worksheet '{}' ready", self.sheet);
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn timed<T, F>(&self, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }
}

/// Store row as a database integer. Header and overflow rows are rejected.
fn db_row(row: RowIndex) -> Result<i32, StoreError> {
    if row.get() < HEADER_ROW_OFFSET {
        return Err(StoreError::RowOutOfRange(row.get()));
    }
    i32::try_from(row.get()).map_err(|_| StoreError::RowOutOfRange(row.get()))
}

/// NULL elements read as empty cells.
fn fill_blank_cells(cells: Vec<Option<String>>) -> Vec<String> {
    cells.into_iter().map(Option::unwrap_or_default).collect()
}

#[async_trait]
impl TableRepository for PgSheetRepository {
    async fn list_records(&self) -> Result<Vec<TableRecord>, StoreError> {
        self.timed(async {
            let rows: Vec<SheetRow> = sqlx::query_as(
                r#"
                SELECT row_index, cells
                FROM sheet_rows
                WHERE sheet = $1 AND row_index >= $2
                ORDER BY row_index
                "#,
            )
            .bind(&self.sheet)
            .bind(HEADER_ROW_OFFSET as i32)
            .fetch_all(&self.pool)
            .await?;

            debug!("Fetched {} rows from '{}'", rows.len(), self.sheet);
            Ok::<_, StoreError>(
                rows.into_iter()
                    .map(|r| TableRecord::from_cells(fill_blank_cells(r.cells)))
                    .collect(),
            )
        })
        .await
    }

    async fn append_record(&self, record: TableRecord) -> Result<(), StoreError> {
        let cells = record.into_cells();
        self.timed(async {
            sqlx::query(
                r#"
                INSERT INTO sheet_rows (sheet, row_index, cells)
                SELECT $1, COALESCE(MAX(row_index), 1) + 1, $2
                FROM sheet_rows
                WHERE sheet = $1
                "#,
            )
            .bind(&self.sheet)
            .bind(&cells)
            .execute(&self.pool)
            .await?;
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn replace_cell(
        &self,
        row: RowIndex,
        column: TableColumn,
        value: String,
    ) -> Result<(), StoreError> {
        let row_no = db_row(row)?;
        self.timed(async {
            let mut tx = self.pool.begin().await?;

            let current: Option<SheetRow> = sqlx::query_as(
                r#"
                SELECT row_index, cells
                FROM sheet_rows
                WHERE sheet = $1 AND row_index = $2
                FOR UPDATE
                "#,
            )
            .bind(&self.sheet)
            .bind(row_no)
            .fetch_optional(&mut *tx)
            .await?;

            let current = current.ok_or(StoreError::RowOutOfRange(row.get()))?;
            let mut cells = fill_blank_cells(current.cells);
            set_cell(&mut cells, column, value);

            sqlx::query("UPDATE sheet_rows SET cells = $3 WHERE sheet = $1 AND row_index = $2")
                .bind(&self.sheet)
                .bind(row_no)
                .bind(&cells)
                .execute(&mut *tx)
                .await?;

            tx.commit().await?;
            Ok::<_, StoreError>(())
        })
        .await
    }

    async fn delete_record(&self, row: RowIndex) -> Result<(), StoreError> {
        let row_no = db_row(row)?;
        self.timed(async {
            let mut tx = self.pool.begin().await?;

            let deleted = sqlx::query("DELETE FROM sheet_rows WHERE sheet = $1 AND row_index = $2")
                .bind(&self.sheet)
                .bind(row_no)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            if deleted == 0 {
                return Err(StoreError::RowOutOfRange(row.get()));
            }

            sqlx::query(
                r#"
                UPDATE sheet_rows
                SET row_index = row_index - 1
                WHERE sheet = $1 AND row_index > $2
                "#,
            )
            .bind(&self.sheet)
            .bind(row_no)
            .execute(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok::<_, StoreError>(())
        })
        .await
    }
}
