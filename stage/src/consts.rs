//! Shared numeric constants for the stage crate.

// ── Grid ────────────────────────────────────────────────────────

/// Primary grid pitch in pixels.
pub const GRID_PITCH: f64 = 20.0;

/// Sub-grid divisions per primary grid cell.
pub const SUBGRID_DIVISIONS: f64 = 12.0;

/// One grid unit in pixels — the sub-grid pitch all positions snap to.
pub const SUBGRID_UNIT: f64 = GRID_PITCH / SUBGRID_DIVISIONS;

/// Tolerance for treating a sub-grid line as coincident with a primary line.
pub const GRID_OVERLAP_EPSILON: f64 = 0.01;

// ── Guide shapes (half-extents in pixels, relative to center) ───

/// Inner guide square half-width.
pub const GUIDE_SQUARE_INNER_HALF: f64 = GRID_PITCH * (5.0 + 1.0 / 3.0);

/// Outer guide square half-width.
pub const GUIDE_SQUARE_OUTER_HALF: f64 = GRID_PITCH * (10.0 + 2.0 / 3.0);

/// Bounding rectangle half-width.
pub const GUIDE_RECT_HALF_X: f64 = GRID_PITCH * 17.0;

/// Bounding rectangle half-height.
pub const GUIDE_RECT_HALF_Y: f64 = GRID_PITCH * 13.0;

// ── Characters ──────────────────────────────────────────────────

/// Marker disk radius in pixels.
pub const MARKER_RADIUS: f64 = 5.0;

/// Pixel hit radius for selecting a placed character, zoom-independent.
pub const HIT_RADIUS: f64 = 10.0;

/// Largest storable heading in degrees.
pub const MAX_ANGLE: u16 = 359;

// ── Magnifier ───────────────────────────────────────────────────

/// Magnifier overlay radius in pixels.
pub const MAGNIFIER_RADIUS: f64 = 40.0;

/// Magnifier zoom factor.
pub const MAGNIFIER_SCALE: f64 = 3.0;

/// Hold duration before the magnifier activates, in milliseconds.
pub const MAGNIFIER_HOLD_MS: f64 = 350.0;
