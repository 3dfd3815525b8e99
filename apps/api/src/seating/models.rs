use serde::{Deserialize, Serialize};

/// Smallest capacity a table may be created with.
pub const MIN_CAPACITY: u32 = 1;
/// Largest capacity a table may be created with.
pub const MAX_CAPACITY: u32 = 24;

/// Physical shape of a table. Drives the seat layout geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    Round,
    Rectangular,
}

impl TableShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableShape::Round => "Round",
            TableShape::Rectangular => "Rectangular",
        }
    }
}

/// A seating unit: fixed shape and capacity, one slot per seat.
///
/// `seats[i]` is seat `i + 1` as shown to users. An empty string means the seat is free.
/// After any engine operation `seats.len() == capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub id: String,
    pub shape: TableShape,
    pub capacity: u32,
    pub seats: Vec<String>,
}

impl Table {
    /// Builds a table with every seat free.
    pub fn new(id: impl Into<String>, shape: TableShape, capacity: u32) -> Self {
        Self {
            id: id.into(),
            shape,
            capacity,
            seats: vec![String::new(); capacity as usize],
        }
    }

    /// Number of seats holding a non-blank guest name.
    pub fn occupied(&self) -> usize {
        self.seats.iter().filter(|s| !s.trim().is_empty()).count()
    }

    pub fn is_degenerate(&self) -> bool {
        self.capacity == 0
    }
}

pub fn capacity_in_range(capacity: u32) -> bool {
    (MIN_CAPACITY..=MAX_CAPACITY).contains(&capacity)
}
