use serde::{Deserialize, Serialize};

use crate::seating::models::Table;

/// Occupancy totals over a table set, as shown on the seating dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatingSummary {
    pub tables: usize,
    pub total_seats: usize,
    pub occupied_seats: usize,
    pub free_seats: usize,
    /// 0.0 – 100.0, rounded to one decimal. 0.0 when there are no seats.
    pub fill_percent: f64,
}

impl SeatingSummary {
    pub fn from_tables(tables: &[Table]) -> Self {
        let total_seats: usize = tables.iter().map(|t| t.seats.len()).sum();
        let occupied_seats: usize = tables.iter().map(Table::occupied).sum();
        let fill_percent = if total_seats == 0 {
            0.0
        } else {
            (occupied_seats as f64 / total_seats as f64 * 1000.0).round() / 10.0
        };

        Self {
            tables: tables.len(),
            total_seats,
            occupied_seats,
            free_seats: total_seats - occupied_seats,
            fill_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seating::models::TableShape;

    #[test]
    fn test_empty_set_has_zero_fill() {
        let s = SeatingSummary::from_tables(&[]);
        assert_eq!(s.tables, 0);
        assert_eq!(s.total_seats, 0);
        assert_eq!(s.fill_percent, 0.0);
    }

    #[test]
    fn test_fill_percent_is_rounded() {
        let mut t = Table::new("A", TableShape::Round, 3);
        t.seats[0] = "Alice".to_string();
        let s = SeatingSummary::from_tables(&[t]);
        assert_eq!(s.occupied_seats, 1);
        assert_eq!(s.free_seats, 2);
        assert!((s.fill_percent - 33.3).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_tables_count_but_add_no_seats() {
        let t = Table::new("Broken", TableShape::Round, 0);
        let s = SeatingSummary::from_tables(&[t]);
        assert_eq!(s.tables, 1);
        assert_eq!(s.total_seats, 0);
    }
}
