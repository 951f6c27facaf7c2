//! Coordinate model: pixel/grid-unit conversion and derived scene geometry.
//!
//! Pixel space has its origin at the canvas top-left with Y increasing
//! downward. Grid space is integer units with its origin at the canvas
//! center and Y increasing upward. `snap_to_grid` is the single snapping
//! primitive — every pointer-driven placement passes through it.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::consts::{
    GRID_PITCH, GUIDE_RECT_HALF_X, GUIDE_RECT_HALF_Y, GUIDE_SQUARE_INNER_HALF,
    GUIDE_SQUARE_OUTER_HALF, SUBGRID_UNIT,
};

/// A point in pixel (canvas) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An integer position in grid units, origin at the canvas center, Y up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Project a grid position to pixel space. The Y axis flips: grid Y
/// increases upward, pixel Y increases downward.
#[must_use]
pub fn grid_to_pixel(pos: GridPos, center: Point) -> Point {
    Point {
        x: center.x + f64::from(pos.x) * SUBGRID_UNIT,
        y: center.y - f64::from(pos.y) * SUBGRID_UNIT,
    }
}

/// Snap a pixel point to the nearest integer grid position.
///
/// Rounds half-away-from-zero on both axes; no other rounding policy is
/// used anywhere in the crate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn snap_to_grid(point: Point, center: Point) -> GridPos {
    GridPos {
        x: ((point.x - center.x) / SUBGRID_UNIT).round() as i32,
        y: ((center.y - point.y) / SUBGRID_UNIT).round() as i32,
    }
}

/// Scene geometry derived from the live canvas size.
///
/// Recomputed on every redraw, so a canvas resize never needs separate
/// recalculation logic. All guide shapes are centered on [`Self::center`].
#[derive(Debug, Clone, Copy)]
pub struct SceneGeometry {
    pub width: f64,
    pub height: f64,
    pub center: Point,
    /// Half-width of the inner guide square.
    pub square_inner_half: f64,
    /// Half-width of the outer guide square.
    pub square_outer_half: f64,
    /// Half-extents of the bounding guide rectangle.
    pub rect_half_x: f64,
    pub rect_half_y: f64,
}

impl SceneGeometry {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: Point::new(width / 2.0, height / 2.0),
            square_inner_half: GUIDE_SQUARE_INNER_HALF,
            square_outer_half: GUIDE_SQUARE_OUTER_HALF,
            rect_half_x: GUIDE_RECT_HALF_X,
            rect_half_y: GUIDE_RECT_HALF_Y,
        }
    }

    /// Primary grid pitch in pixels.
    #[must_use]
    pub fn grid_pitch(&self) -> f64 {
        GRID_PITCH
    }

    /// Sub-grid pitch in pixels.
    #[must_use]
    pub fn subgrid_pitch(&self) -> f64 {
        SUBGRID_UNIT
    }
}
