// Seat layout for table diagrams.
// Geometry is pure and independent of persistence; labels apply the
// "guest name or seat number" display rule on top of it.

pub mod geometry;
pub mod labels;

pub use labels::{layout_table, TableLayout};
