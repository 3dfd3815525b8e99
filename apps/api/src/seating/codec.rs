//! Table Record Codec — the only code that knows how a `Table` is flattened into a sheet row.
//!
//! # Record layout
//! `id | shape | capacity | seats`, all text. Seats are joined with `;`.
//!
//! # Decoding policy
//! Persisted rows are untrusted. Decoding never fails:
//! - capacity that is missing, negative or non-numeric becomes 0
//! - a seats field without any `;` means "no assignments yet" and yields `capacity` free seats
//! - a split seats list is padded with free seats or truncated to `capacity`
//!
//! A single-seat table is written with a trailing `;` so its one guest survives the
//! "no delimiter" rule above.

use serde::{Deserialize, Serialize};

use crate::seating::models::{Table, TableShape, MAX_CAPACITY};

pub const SEAT_DELIMITER: char = ';';
/// Stands in for the delimiter when it appears inside a guest name.
const DELIMITER_REPLACEMENT: &str = ",";

/// Flat persisted form of a table: one sheet row, four text cells.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableRecord {
    pub id: String,
    pub shape: String,
    pub capacity: String,
    pub seats: String,
}

impl TableRecord {
    /// Cells in column order.
    pub fn into_cells(self) -> Vec<String> {
        vec![self.id, self.shape, self.capacity, self.seats]
    }

    /// Conforms a raw row to the four-column shape. Missing cells read as empty.
    pub fn from_cells(cells: Vec<String>) -> Self {
        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        Self {
            id: next(),
            shape: next(),
            capacity: next(),
            seats: next(),
        }
    }
}

pub fn encode(table: &Table) -> TableRecord {
    TableRecord {
        id: table.id.clone(),
        shape: table.shape.as_str().to_string(),
        capacity: table.capacity.to_string(),
        seats: encode_seats(&table.seats),
    }
}

/// Packs seat values into the single seats cell.
pub fn encode_seats(seats: &[String]) -> String {
    let cleaned: Vec<String> = seats.iter().map(|s| clean_seat_text(s)).collect();
    let mut field = cleaned.join(&SEAT_DELIMITER.to_string());
    if cleaned.len() == 1 {
        field.push(SEAT_DELIMITER);
    }
    field
}

/// Seat text as it will read back from the store.
pub fn clean_seat_text(seat: &str) -> String {
    seat.replace(SEAT_DELIMITER, DELIMITER_REPLACEMENT)
}

pub fn decode(record: &TableRecord) -> Table {
    let capacity = decode_capacity(&record.capacity);
    let seats = if record.seats.contains(SEAT_DELIMITER) {
        let split = record
            .seats
            .split(SEAT_DELIMITER)
            .map(str::to_string)
            .collect();
        normalize_seats(split, capacity)
    } else {
        vec![String::new(); capacity as usize]
    };

    Table {
        id: record.id.clone(),
        shape: decode_shape(&record.shape),
        capacity,
        seats,
    }
}

/// Pads with free seats or truncates so that the list is exactly `capacity` long.
pub fn normalize_seats(mut seats: Vec<String>, capacity: u32) -> Vec<String> {
    seats.resize(capacity as usize, String::new());
    seats
}

/// Integer text, tolerating sheet-style floats ("8.0"). Out-of-range values are clamped
/// to `0..=MAX_CAPACITY`; garbage is 0.
fn decode_capacity(raw: &str) -> u32 {
    parse_capacity(raw)
        .map(|v| v.clamp(0, i64::from(MAX_CAPACITY)) as u32)
        .unwrap_or(0)
}

fn parse_capacity(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.fract() == 0.0)
            .map(|v| v as i64)
    })
}

/// True when the stored capacity is above `MAX_CAPACITY`, i.e. `decode` dropped seats.
pub fn capacity_clamped(record: &TableRecord) -> bool {
    parse_capacity(&record.capacity).is_some_and(|v| v > i64::from(MAX_CAPACITY))
}

/// Unknown shape text falls back to round.
fn decode_shape(raw: &str) -> TableShape {
    match raw.trim().to_lowercase().as_str() {
        "rectangular" | "rectangle" | "rect" => TableShape::Rectangular,
        _ => TableShape::Round,
    }
}
