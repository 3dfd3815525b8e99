//! Seat geometry for table diagrams.
//!
//! Pure functions, no I/O. All coordinates are in a unit space centred on the table origin,
//! x to the right, y increasing with seat order on rectangular tables.
//!
//! # Round tables
//! Seat `i` sits at angle `360·i/capacity` degrees (counter-clockwise from +x) on a circle
//! outside the table edge; its label sits further out on the same ray. Labels on the left
//! half (strictly between 90° and 270°) are turned 180° and right-aligned so they never read
//! upside down.
//!
//! # Rectangular tables
//! A long table (height > width). The first `ceil(n/2)` seats run down the left side, the
//! rest down the right side, evenly spread between the end margins. Labels are not rotated.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::seating::models::TableShape;

// ────────────────────────────────────────────────────────────────────────────
// Geometry constants
// ────────────────────────────────────────────────────────────────────────────

pub const ROUND_TABLE_RADIUS: f64 = 1.0;
pub const ROUND_SEAT_RADIUS: f64 = 1.3;
pub const ROUND_LABEL_RADIUS: f64 = 1.65;

pub const RECT_TABLE_WIDTH: f64 = 1.0;
pub const RECT_TABLE_HEIGHT: f64 = 3.0;
/// Inset of the first and last seat on a side from the table's short edges.
pub const RECT_SEAT_MARGIN: f64 = 0.3;
/// Horizontal distance of a seat from the table's centre line.
pub const RECT_SEAT_OFFSET_X: f64 = 0.8;
/// Gap between a seat marker and the start of its label.
pub const RECT_LABEL_GAP: f64 = 0.15;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Which end of the label text is pinned to `(label_x, label_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAnchor {
    /// Text runs away from the anchor point (left-aligned).
    Start,
    /// Text ends at the anchor point (right-aligned).
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatPosition {
    /// 1-based, as displayed.
    pub seat_number: u32,
    pub x: f64,
    pub y: f64,
    pub label_x: f64,
    pub label_y: f64,
    pub label_rotation_deg: f64,
    pub label_anchor: LabelAnchor,
}

/// The table boundary a renderer draws under the seats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableOutline {
    Circle { radius: f64 },
    Rect { width: f64, height: f64 },
}

pub fn table_outline(shape: TableShape) -> TableOutline {
    match shape {
        TableShape::Round => TableOutline::Circle {
            radius: ROUND_TABLE_RADIUS,
        },
        TableShape::Rectangular => TableOutline::Rect {
            width: RECT_TABLE_WIDTH,
            height: RECT_TABLE_HEIGHT,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Seat and label positions for a table, one entry per seat in seat order.
/// A zero-capacity table has no positions.
pub fn compute_seat_layout(shape: TableShape, capacity: u32) -> Vec<SeatPosition> {
    match shape {
        TableShape::Round => round_layout(capacity),
        TableShape::Rectangular => rectangular_layout(capacity),
    }
}

fn round_layout(capacity: u32) -> Vec<SeatPosition> {
    (0..capacity)
        .map(|i| {
            let angle_deg = f64::from(i) * 360.0 / f64::from(capacity);
            let theta = angle_deg * PI / 180.0;
            let (sin, cos) = theta.sin_cos();
            let (rotation, anchor) = upright_label(angle_deg);

            SeatPosition {
                seat_number: i + 1,
                x: ROUND_SEAT_RADIUS * cos,
                y: ROUND_SEAT_RADIUS * sin,
                label_x: ROUND_LABEL_RADIUS * cos,
                label_y: ROUND_LABEL_RADIUS * sin,
                label_rotation_deg: rotation,
                label_anchor: anchor,
            }
        })
        .collect()
}

/// Rotation and anchor keeping a radial label readable at `angle_deg`.
fn upright_label(angle_deg: f64) -> (f64, LabelAnchor) {
    let a = angle_deg.rem_euclid(360.0);
    if a > 90.0 && a < 270.0 {
        (a - 180.0, LabelAnchor::End)
    } else {
        (a, LabelAnchor::Start)
    }
}

fn rectangular_layout(capacity: u32) -> Vec<SeatPosition> {
    let left = capacity.div_ceil(2);
    let right = capacity / 2;

    let left_side = side_ys(left).into_iter().map(|y| (-RECT_SEAT_OFFSET_X, y));
    let right_side = side_ys(right).into_iter().map(|y| (RECT_SEAT_OFFSET_X, y));

    left_side
        .chain(right_side)
        .zip(1..)
        .map(|((x, y), seat_number)| {
            let (label_x, label_anchor) = if x < 0.0 {
                (x - RECT_LABEL_GAP, LabelAnchor::End)
            } else {
                (x + RECT_LABEL_GAP, LabelAnchor::Start)
            };
            SeatPosition {
                seat_number,
                x,
                y,
                label_x,
                label_y: y,
                label_rotation_deg: 0.0,
                label_anchor,
            }
        })
        .collect()
}

/// Evenly spaced y values for `count` seats along one long side, ascending.
/// A lone seat sits at the middle of the side.
fn side_ys(count: u32) -> Vec<f64> {
    let lo = -RECT_TABLE_HEIGHT / 2.0 + RECT_SEAT_MARGIN;
    let hi = RECT_TABLE_HEIGHT / 2.0 - RECT_SEAT_MARGIN;
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        n => {
            let step = (hi - lo) / f64::from(n - 1);
            (0..n).map(|k| lo + step * f64::from(k)).collect()
        }
    }
}
