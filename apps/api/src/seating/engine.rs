//! Seating Engine — the authoritative in-memory table set.
//!
//! # Contract
//! - Validation runs before any store call; a rejected call touches nothing.
//! - The in-memory set changes only after the store call succeeded.
//! - `assign_seats` is strict about length. Padding/truncation happens only when decoding
//!   rows loaded from the store (see `codec`).
//! - Tables keep load/insertion order. Ids are compared exactly (case-sensitive, untrimmed).

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::seating::codec;
use crate::seating::models::{capacity_in_range, Table, TableShape};
use crate::seating::repository::{RowIndex, StoreError, TableColumn, TableRepository};
use crate::seating::summary::SeatingSummary;

#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("Table id '{0}' is blank or already in use")]
    DuplicateId(String),

    #[error("Capacity {0} is outside 1..=24")]
    InvalidCapacity(i64),

    #[error("Table '{0}' not found")]
    NotFound(String),

    #[error("Table '{id}' has {capacity} seats but {given} were given")]
    CapacityMismatch {
        id: String,
        capacity: u32,
        given: usize,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Owns the session's table set. Construct once, load, then route every mutation through it.
pub struct SeatingEngine {
    repo: Arc<dyn TableRepository>,
    tables: Vec<Table>,
}

impl SeatingEngine {
    pub fn new(repo: Arc<dyn TableRepository>) -> Self {
        Self {
            repo,
            tables: Vec::new(),
        }
    }

    /// Replaces the in-memory set with whatever the store currently holds.
    ///
    /// Every record decodes independently; malformed ones come back repaired, and a record
    /// with unusable capacity is kept as a zero-seat table.
    pub async fn load_all(&mut self) -> Result<&[Table], SeatingError> {
        let records = self.repo.list_records().await?;
        for r in records.iter().filter(|r| codec::capacity_clamped(r)) {
            warn!(
                "Table '{}' stored capacity '{}' exceeds the maximum; extra seats dropped",
                r.id, r.capacity
            );
        }
        let tables: Vec<Table> = records.iter().map(codec::decode).collect();

        for t in tables.iter().filter(|t| t.is_degenerate()) {
            warn!("Table '{}' loaded with zero capacity", t.id);
        }
        info!("Loaded {} tables", tables.len());

        self.tables = tables;
        Ok(&self.tables)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn summary(&self) -> SeatingSummary {
        SeatingSummary::from_tables(&self.tables)
    }

    fn position(&self, id: &str) -> Result<usize, SeatingError> {
        self.tables
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| SeatingError::NotFound(id.to_string()))
    }

    pub async fn create_table(
        &mut self,
        id: &str,
        shape: TableShape,
        capacity: i64,
    ) -> Result<&Table, SeatingError> {
        if id.trim().is_empty() || self.get(id).is_some() {
            return Err(SeatingError::DuplicateId(id.to_string()));
        }
        let capacity = u32::try_from(capacity)
            .ok()
            .filter(|&c| capacity_in_range(c))
            .ok_or(SeatingError::InvalidCapacity(capacity))?;

        let table = Table::new(id, shape, capacity);
        self.repo.append_record(codec::encode(&table)).await?;

        info!(
            "Created table '{}' ({}, {} seats)",
            table.id,
            table.shape.as_str(),
            table.capacity
        );
        self.tables.push(table);
        Ok(&self.tables[self.tables.len() - 1])
    }

    /// Replaces every seat of table `id`. `seats` must be exactly `capacity` long.
    pub async fn assign_seats(
        &mut self,
        id: &str,
        seats: Vec<String>,
    ) -> Result<&Table, SeatingError> {
        let pos = self.position(id)?;
        let capacity = self.tables[pos].capacity;
        if seats.len() != capacity as usize {
            return Err(SeatingError::CapacityMismatch {
                id: id.to_string(),
                capacity,
                given: seats.len(),
            });
        }

        let seats: Vec<String> = seats.iter().map(|s| codec::clean_seat_text(s)).collect();
        self.repo
            .replace_cell(
                RowIndex::from_position(pos),
                TableColumn::Seats,
                codec::encode_seats(&seats),
            )
            .await?;

        self.tables[pos].seats = seats;
        let table = &self.tables[pos];
        info!(
            "Assigned seats at '{}' ({}/{} occupied)",
            table.id,
            table.occupied(),
            table.capacity
        );
        Ok(table)
    }

    /// Removes table `id` from the store and the set, returning the removed table.
    pub async fn delete_table(&mut self, id: &str) -> Result<Table, SeatingError> {
        let pos = self.position(id)?;
        self.repo
            .delete_record(RowIndex::from_position(pos))
            .await?;

        let removed = self.tables.remove(pos);
        info!("Deleted table '{}'", removed.id);
        Ok(removed)
    }
}
