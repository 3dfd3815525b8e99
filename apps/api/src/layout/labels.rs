use serde::{Deserialize, Serialize};

use crate::layout::geometry::{compute_seat_layout, table_outline, SeatPosition, TableOutline};
use crate::seating::models::{Table, TableShape};

/// Text shown next to a seat: the guest's name, or the 1-based seat number when free.
pub fn seat_label(index: usize, guest: &str) -> String {
    let guest = guest.trim();
    if guest.is_empty() {
        (index + 1).to_string()
    } else {
        guest.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSeat {
    #[serde(flatten)]
    pub position: SeatPosition,
    pub label: String,
    pub occupied: bool,
}

/// Everything a renderer needs to draw one table diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub table_id: String,
    pub shape: TableShape,
    pub outline: TableOutline,
    pub seats: Vec<LabeledSeat>,
}

/// Combines the seat geometry for `table` with its current assignments.
pub fn layout_table(table: &Table) -> TableLayout {
    let seats = compute_seat_layout(table.shape, table.capacity)
        .into_iter()
        .zip(&table.seats)
        .enumerate()
        .map(|(i, (position, guest))| LabeledSeat {
            position,
            label: seat_label(i, guest),
            occupied: !guest.trim().is_empty(),
        })
        .collect();

    TableLayout {
        table_id: table.id.clone(),
        shape: table.shape,
        outline: table_outline(table.shape),
        seats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_seat_shows_number() {
        assert_eq!(seat_label(0, ""), "1");
        assert_eq!(seat_label(7, "   "), "8");
        assert_eq!(seat_label(2, "Alice"), "Alice");
    }

    #[test]
    fn test_layout_merges_names_and_numbers() {
        let mut t = Table::new("Head Table", TableShape::Round, 4);
        t.seats[1] = "Bob".to_string();

        let layout = layout_table(&t);
        let labels: Vec<_> = layout.seats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "Bob", "3", "4"]);
        assert!(layout.seats[1].occupied);
        assert!(!layout.seats[0].occupied);
        assert_eq!(layout.seats[1].position.seat_number, 2);
    }

    #[test]
    fn test_geometry_does_not_depend_on_occupancy() {
        let empty = Table::new("A", TableShape::Rectangular, 6);
        let mut full = empty.clone();
        full.seats = (0..6).map(|i| format!("Guest {i}")).collect();

        let a: Vec<_> = layout_table(&empty).seats.into_iter().map(|s| s.position).collect();
        let b: Vec<_> = layout_table(&full).seats.into_iter().map(|s| s.position).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_degenerate_table_has_no_seats() {
        let t = Table::new("Broken", TableShape::Rectangular, 0);
        let layout = layout_table(&t);
        assert!(layout.seats.is_empty());
        assert_eq!(layout.table_id, "Broken");
    }

    #[test]
    fn test_serialized_seat_is_flat() {
        let t = Table::new("A", TableShape::Round, 1);
        let json = serde_json::to_value(&layout_table(&t)).unwrap();
        let seat = &json["seats"][0];
        assert_eq!(seat["label"], "1");
        assert_eq!(seat["label_anchor"], "start");
        assert_eq!(json["outline"]["kind"], "circle");
    }
}
