//! Rendering: draws the full stage scene to a 2D context.
//!
//! This module is the only place that touches
//! [`web_sys::CanvasRenderingContext2d`]. It receives read-only views of the
//! roster, session, hover, and magnifier state and produces pixels — it does
//! not mutate any application state. Every frame is a full redraw in a fixed
//! layer order: background, grids, guide shapes, placed characters, the
//! in-progress candidate, then the magnifier on top.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::character::Character;
use crate::consts::{
    GRID_OVERLAP_EPSILON, GRID_PITCH, MAGNIFIER_RADIUS, MAGNIFIER_SCALE, MARKER_RADIUS,
    SUBGRID_UNIT,
};
use crate::grid::{GridPos, Point, SceneGeometry, grid_to_pixel};
use crate::input::Magnifier;
use crate::session::PlacementSession;

/// Background fill.
const BACKGROUND: &str = "#121212";
/// Primary grid and guide stroke color.
const GRID_COLOR: &str = "#0070ff";
/// Sub-grid stroke color (pre-faded; drawn with the grid alpha on top).
const SUBGRID_COLOR: &str = "rgba(0,112,255,0.15)";
/// Marker outline color, also used for the tooltip box fill.
const DARK_OUTLINE: &str = "#222";

/// Direction bar length in pixels.
const BAR_LENGTH: f64 = 8.0;
/// Direction bar width in pixels.
const BAR_WIDTH: f64 = 2.0;
/// How far the bar anchor sits inside the marker rim.
const BAR_INSET: f64 = 2.0;

/// Tooltip inner padding in pixels.
const TOOLTIP_PADDING: f64 = 8.0;
/// Tooltip line height in pixels.
const TOOLTIP_LINE_HEIGHT: f64 = 16.0;

/// Draw the full scene.
///
/// `canvas` is needed for the magnifier layer, which re-samples the frame
/// drawn so far.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    geometry: &SceneGeometry,
    characters: &[Character],
    session: &PlacementSession,
    hovered: Option<usize>,
    magnifier: &Magnifier,
) -> Result<(), JsValue> {
    // Layer 1: background.
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, geometry.width, geometry.height);

    // Layer 2: grids.
    draw_primary_grid(ctx, geometry)?;
    draw_subgrid(ctx, geometry)?;

    // Layer 3: guide shapes.
    draw_guides(ctx, geometry);

    // Layer 4: placed characters with labels and the hover tooltip.
    for (index, character) in characters.iter().enumerate() {
        draw_character(ctx, geometry, character, hovered == Some(index))?;
    }

    // Layer 5: the in-progress candidate.
    draw_candidate(ctx, geometry, session)?;

    // Layer 6: magnifier.
    if magnifier.visible {
        draw_magnifier(ctx, canvas, magnifier.position)?;
    }

    Ok(())
}

// =============================================================
// Grids
// =============================================================

fn draw_primary_grid(ctx: &CanvasRenderingContext2d, geometry: &SceneGeometry) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_global_alpha(0.5);
    ctx.set_line_width(1.0);
    set_line_dash(ctx, &[2.0, 4.0])?;

    for x in line_offsets(geometry.center.x, geometry.width, GRID_PITCH) {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, geometry.height);
        ctx.stroke();
    }
    for y in line_offsets(geometry.center.y, geometry.height, GRID_PITCH) {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(geometry.width, y);
        ctx.stroke();
    }

    set_line_dash(ctx, &[])?;
    ctx.restore();
    Ok(())
}

fn draw_subgrid(ctx: &CanvasRenderingContext2d, geometry: &SceneGeometry) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(SUBGRID_COLOR);
    ctx.set_global_alpha(0.5);
    ctx.set_line_width(1.0);
    set_line_dash(ctx, &[1.0, 5.0])?;

    for x in line_offsets(geometry.center.x, geometry.width, SUBGRID_UNIT) {
        if coincides_with_primary(x - geometry.center.x) {
            continue;
        }
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, geometry.height);
        ctx.stroke();
    }
    for y in line_offsets(geometry.center.y, geometry.height, SUBGRID_UNIT) {
        if coincides_with_primary(y - geometry.center.y) {
            continue;
        }
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(geometry.width, y);
        ctx.stroke();
    }

    set_line_dash(ctx, &[])?;
    ctx.restore();
    Ok(())
}

/// Line positions at `pitch` spacing, centered on `center`, covering
/// `[0, extent]`.
fn line_offsets(center: f64, extent: f64, pitch: f64) -> impl Iterator<Item = f64> {
    #[allow(clippy::cast_possible_truncation)]
    let (lo, hi) = (
        -(center / pitch).ceil() as i64,
        ((extent - center) / pitch).ceil() as i64,
    );
    (lo..=hi).map(move |n| pitch.mul_add(n as f64, center))
}

/// A sub-grid line is skipped where a primary line already sits.
fn coincides_with_primary(offset: f64) -> bool {
    (offset % GRID_PITCH).abs() < GRID_OVERLAP_EPSILON
}

// =============================================================
// Guide shapes
// =============================================================

fn draw_guides(ctx: &CanvasRenderingContext2d, geometry: &SceneGeometry) {
    let cx = geometry.center.x;
    let cy = geometry.center.y;

    ctx.save();
    ctx.set_global_alpha(1.0);
    ctx.set_line_width(1.0);

    // Concentric squares.
    ctx.set_stroke_style_str(GRID_COLOR);
    for half in [geometry.square_inner_half, geometry.square_outer_half] {
        ctx.stroke_rect(cx - half, cy - half, half * 2.0, half * 2.0);
    }

    // Bounding rectangle.
    ctx.set_stroke_style_str("#fff");
    ctx.stroke_rect(
        cx - geometry.rect_half_x,
        cy - geometry.rect_half_y,
        geometry.rect_half_x * 2.0,
        geometry.rect_half_y * 2.0,
    );

    // Full-width diagonals of slope ±1 through the center.
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.begin_path();
    ctx.move_to(0.0, cy - cx);
    ctx.line_to(geometry.width, cy + geometry.width - cx);
    ctx.stroke();
    ctx.begin_path();
    ctx.move_to(0.0, cy + cx);
    ctx.line_to(geometry.width, cy - geometry.width + cx);
    ctx.stroke();

    ctx.restore();
}

// =============================================================
// Characters
// =============================================================

fn draw_character(
    ctx: &CanvasRenderingContext2d,
    geometry: &SceneGeometry,
    character: &Character,
    hovered: bool,
) -> Result<(), JsValue> {
    let marker = grid_to_pixel(GridPos::new(character.x, character.y), geometry.center);

    ctx.save();
    draw_marker(ctx, marker, &character.color, 0.9, 1.0)?;
    draw_direction_bar(ctx, marker, character.angle, &character.color)?;

    // Name and id label above the marker.
    ctx.set_font("12px sans-serif");
    ctx.set_fill_style_str("#fff");
    ctx.set_text_align("center");
    ctx.fill_text(
        &format!("{}({})", character.name, character.id),
        marker.x,
        marker.y - 12.0,
    )?;

    if hovered {
        draw_tooltip(ctx, marker, character)?;
    }
    ctx.restore();
    Ok(())
}

/// The three tooltip text lines for a hovered character.
fn tooltip_lines(character: &Character) -> [String; 3] {
    [
        format!("name: {}", character.name),
        format!("pos: ({}, {})", character.x, character.y),
        format!("angle: {}\u{b0}", character.angle),
    ]
}

fn draw_tooltip(
    ctx: &CanvasRenderingContext2d,
    marker: Point,
    character: &Character,
) -> Result<(), JsValue> {
    let lines = tooltip_lines(character);

    ctx.save();
    ctx.set_font("13px sans-serif");
    ctx.set_text_align("left");

    let mut max_width = 0.0_f64;
    for line in &lines {
        max_width = max_width.max(measured_text_width(ctx, line));
    }
    let box_width = max_width + TOOLTIP_PADDING * 2.0;
    let box_height = TOOLTIP_LINE_HEIGHT.mul_add(lines.len() as f64, TOOLTIP_PADDING * 2.0);
    let box_x = marker.x + 12.0;
    let box_y = marker.y - 24.0;

    ctx.set_fill_style_str(DARK_OUTLINE);
    ctx.set_global_alpha(0.85);
    ctx.fill_rect(box_x, box_y, box_width, box_height);
    ctx.set_global_alpha(1.0);
    ctx.set_stroke_style_str("#fff");
    ctx.stroke_rect(box_x, box_y, box_width, box_height);

    ctx.set_fill_style_str("#fff");
    for (idx, line) in lines.iter().enumerate() {
        let y = TOOLTIP_LINE_HEIGHT.mul_add(idx as f64, marker.y - 8.0);
        ctx.fill_text(line, marker.x + 16.0, y)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_candidate(
    ctx: &CanvasRenderingContext2d,
    geometry: &SceneGeometry,
    session: &PlacementSession,
) -> Result<(), JsValue> {
    let (Some(candidate), Some(position), Some(angle)) =
        (session.candidate(), session.position(), session.angle())
    else {
        return Ok(());
    };
    let marker = grid_to_pixel(position, geometry.center);

    // The whole candidate draws at 70% opacity; only the name label is
    // fully opaque.
    ctx.save();
    draw_marker(ctx, marker, &candidate.color, 0.7, 0.7)?;
    ctx.set_global_alpha(0.7);
    draw_direction_bar(ctx, marker, angle, &candidate.color)?;

    ctx.set_font("12px sans-serif");
    ctx.set_text_align("left");
    ctx.set_fill_style_str("#fff");
    ctx.fill_text(&format!("{angle}\u{b0}"), marker.x + 10.0, marker.y - 8.0)?;
    ctx.set_global_alpha(1.0);
    ctx.fill_text(&candidate.name, marker.x + 10.0, marker.y + 4.0)?;
    ctx.restore();
    Ok(())
}

/// Filled disk with a dark outline.
fn draw_marker(
    ctx: &CanvasRenderingContext2d,
    at: Point,
    color: &str,
    fill_alpha: f64,
    outline_alpha: f64,
) -> Result<(), JsValue> {
    ctx.begin_path();
    ctx.arc(at.x, at.y, MARKER_RADIUS, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(color);
    ctx.set_global_alpha(fill_alpha);
    ctx.fill();
    ctx.set_global_alpha(outline_alpha);
    ctx.set_stroke_style_str(DARK_OUTLINE);
    ctx.set_line_width(2.0);
    ctx.stroke();
    Ok(())
}

/// Heading bar on the marker rim: anchored `BAR_INSET` inside the rim along
/// the heading, rotated a further 90° so it lies tangential and sticks out
/// pointing along the heading.
fn draw_direction_bar(
    ctx: &CanvasRenderingContext2d,
    at: Point,
    angle: u16,
    color: &str,
) -> Result<(), JsValue> {
    let rad = f64::from(angle).to_radians();
    let anchor_x = rad.cos().mul_add(MARKER_RADIUS - BAR_INSET, at.x);
    let anchor_y = rad.sin().mul_add(MARKER_RADIUS - BAR_INSET, at.y);

    ctx.save();
    ctx.translate(anchor_x, anchor_y)?;
    ctx.rotate(rad + PI / 2.0)?;
    ctx.begin_path();
    ctx.rect(-BAR_WIDTH / 2.0, -BAR_LENGTH, BAR_WIDTH, BAR_LENGTH);
    ctx.set_fill_style_str(color);
    ctx.fill();
    ctx.restore();
    Ok(())
}

// =============================================================
// Magnifier
// =============================================================

/// Circular clipped 3× zoom of the frame drawn so far, centered on the
/// pointer, outlined in white.
fn draw_magnifier(
    ctx: &CanvasRenderingContext2d,
    canvas: &HtmlCanvasElement,
    at: Point,
) -> Result<(), JsValue> {
    let r = MAGNIFIER_RADIUS;
    let src_half = r / MAGNIFIER_SCALE;

    ctx.save();
    ctx.begin_path();
    ctx.arc(at.x, at.y, r, 0.0, 2.0 * PI)?;
    ctx.clip();
    ctx.draw_image_with_html_canvas_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        canvas,
        at.x - src_half,
        at.y - src_half,
        src_half * 2.0,
        src_half * 2.0,
        at.x - r,
        at.y - r,
        r * 2.0,
        r * 2.0,
    )?;
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str("#fff");
    ctx.stroke();
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

fn set_line_dash(ctx: &CanvasRenderingContext2d, pattern: &[f64]) -> Result<(), JsValue> {
    let dash = js_sys::Array::new();
    for segment in pattern {
        dash.push(&(*segment).into());
    }
    ctx.set_line_dash(&dash)
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => 0.0,
    }
}
