//! Input model: edit modes, key events, validated field edits, the
//! magnifier overlay state, and the hold timer that activates it.
//!
//! This module defines the types consumed by the engine. Field text is
//! validated here before it ever becomes a mutation; invalid text is simply
//! not applied, so the fields keep their last valid values and no error is
//! raised to the user.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::character::clamp_angle;
use crate::consts::MAGNIFIER_HOLD_MS;
use crate::grid::Point;

/// How an active placement session takes position/angle input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Position follows the snapped pointer (default).
    #[default]
    Pointer,
    /// Position and angle come from validated text fields.
    Manual,
}

/// A keyboard key as reported by the host (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape"
    }
}

/// A validated edit to one field of a character.
///
/// The shared edit form mixes a text field with numeric fields; each
/// variant carries an already-validated value so callers never see raw
/// text past this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Name(String),
    X(i32),
    Y(i32),
    Angle(u16),
}

impl FieldEdit {
    /// Parse a name edit. Any text is a valid name.
    #[must_use]
    pub fn name(text: &str) -> Self {
        Self::Name(text.to_owned())
    }

    /// Parse a coordinate edit from optional-sign integer text.
    #[must_use]
    pub fn x(text: &str) -> Option<Self> {
        parse_coordinate(text).map(Self::X)
    }

    /// Parse a coordinate edit from optional-sign integer text.
    #[must_use]
    pub fn y(text: &str) -> Option<Self> {
        parse_coordinate(text).map(Self::Y)
    }

    /// Parse an angle edit from non-negative integer text, clamping into
    /// `[0, 359]`.
    #[must_use]
    pub fn angle(text: &str) -> Option<Self> {
        parse_angle(text).map(Self::Angle)
    }
}

/// Validate optional-sign integer text (`-?[0-9]+`) into a coordinate.
#[must_use]
pub fn parse_coordinate(text: &str) -> Option<i32> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match text.parse() {
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

/// Validate non-negative integer text (`[0-9]+`) into a clamped angle.
#[must_use]
pub fn parse_angle(text: &str) -> Option<u16> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Saturate before clamping so arbitrarily long digit strings still
    // land on 359 instead of failing to parse.
    let value = text.parse::<i64>().map_or(i32::MAX, |v| {
        i32::try_from(v).unwrap_or(i32::MAX)
    });
    Some(clamp_angle(value))
}

/// Magnifier overlay state: where it is and whether it is showing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Magnifier {
    pub position: Point,
    pub visible: bool,
}

impl Magnifier {
    /// Show the magnifier at `position`.
    pub fn show_at(&mut self, position: Point) {
        self.position = position;
        self.visible = true;
    }

    /// Move a visible magnifier to follow the pointer. No-op while hidden.
    pub fn follow(&mut self, position: Point) {
        if self.visible {
            self.position = position;
        }
    }

    /// Hide the magnifier.
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Cancellable deferred activation for the magnifier.
///
/// Armed on pointer-down, the timer fires once the pointer has been held
/// for [`MAGNIFIER_HOLD_MS`]. It is a pure deadline polled with a
/// caller-supplied clock, so cancellation on pointer-up/leave is
/// unconditional and a stray fire after release is impossible.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldTimer {
    armed: Option<(f64, Point)>,
}

impl HoldTimer {
    /// Arm the timer at the pointer-down location.
    pub fn arm(&mut self, now_ms: f64, at: Point) {
        self.armed = Some((now_ms + MAGNIFIER_HOLD_MS, at));
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Fire if the hold duration has elapsed, returning the pointer-down
    /// location. Fires at most once per arm.
    pub fn poll(&mut self, now_ms: f64) -> Option<Point> {
        match self.armed {
            Some((deadline, at)) if now_ms >= deadline => {
                self.armed = None;
                Some(at)
            }
            _ => None,
        }
    }

    /// Whether the timer is currently armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}
