//! Hit-testing pointer positions against placed characters.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::character::Character;
use crate::consts::HIT_RADIUS;
use crate::grid::{GridPos, Point, grid_to_pixel};

/// Return the index of the first character whose projected marker lies
/// within [`HIT_RADIUS`] pixels of `point` (boundary inclusive), in roster
/// order. The radius is fixed in pixel space, independent of geometry.
#[must_use]
pub fn hit_test(point: Point, characters: &[Character], center: Point) -> Option<usize> {
    characters.iter().position(|character| {
        let marker = grid_to_pixel(GridPos::new(character.x, character.y), center);
        (point.x - marker.x).hypot(point.y - marker.y) <= HIT_RADIUS
    })
}
