//! Engine: translates host events into session transitions and roster
//! mutations.
//!
//! [`EngineCore`] holds all logic that does not depend on the canvas
//! element, so the full interaction model is tested natively against an
//! in-memory repository. [`Engine`] wraps a core around the browser canvas
//! and `localStorage`.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use uuid::Uuid;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::character::{Character, CharacterId, CharacterPatch, PALETTE};
use crate::export;
use crate::grid::{Point, SceneGeometry, snap_to_grid};
use crate::hit::hit_test;
use crate::input::{EditMode, FieldEdit, HoldTimer, Key, Magnifier, parse_angle, parse_coordinate};
use crate::manager::CharacterManager;
use crate::render;
use crate::session::PlacementSession;
use crate::store::{BrowserRepository, CharacterRepository};

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Scene state changed; the host should schedule a redraw.
    RenderNeeded,
    /// A character row should open its in-place edit fields.
    EditCharacterRequested { index: usize },
}

/// Core engine state — all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without a browser.
pub struct EngineCore<R: CharacterRepository> {
    pub manager: CharacterManager<R>,
    pub session: PlacementSession,
    pub hovered: Option<usize>,
    pub magnifier: Magnifier,
    hold_timer: HoldTimer,
    manual_x: String,
    manual_y: String,
    manual_angle: String,
    viewport_width: f64,
    viewport_height: f64,
}

impl<R: CharacterRepository> EngineCore<R> {
    /// Create a core bound to one project. Call [`load`](Self::load) to
    /// pull the roster before the first render.
    pub fn new(repository: R, project: Uuid) -> Self {
        Self {
            manager: CharacterManager::new(repository, project),
            session: PlacementSession::default(),
            hovered: None,
            magnifier: Magnifier::default(),
            hold_timer: HoldTimer::default(),
            manual_x: String::new(),
            manual_y: String::new(),
            manual_angle: String::new(),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    // --- Data inputs ---

    /// Load the roster from the repository.
    pub fn load(&mut self) -> Action {
        self.manager.load();
        Action::RenderNeeded
    }

    /// Update the canvas logical size. Geometry is derived from it on the
    /// next render, so resizing needs no separate recalculation.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Action {
        self.viewport_width = width;
        self.viewport_height = height;
        Action::RenderNeeded
    }

    /// The scene geometry for the current viewport.
    #[must_use]
    pub fn geometry(&self) -> SceneGeometry {
        SceneGeometry::new(self.viewport_width, self.viewport_height)
    }

    // --- Placement workflow ---

    /// Begin placing a new character drawn from the palette. The draft's
    /// name is seeded from the color name; its real id is assigned on
    /// confirm by the persistence layer.
    pub fn begin_add(&mut self, palette_index: usize) -> Action {
        let Some(color) = PALETTE.get(palette_index) else {
            return Action::None;
        };
        let draft = Character {
            id: CharacterId(0),
            name: color.name.to_owned(),
            color: color.value.to_owned(),
            x: 0,
            y: 0,
            angle: 0,
        };
        self.session.start_new(draft);
        self.clear_manual_fields();
        Action::RenderNeeded
    }

    /// Begin repositioning the character at `index`.
    pub fn start_reposition(&mut self, index: usize) -> Action {
        let Some(character) = self.manager.roster().get(index).cloned() else {
            return Action::None;
        };
        self.session.start_reposition(character, index);
        self.clear_manual_fields();
        Action::RenderNeeded
    }

    /// Commit the active session: add the candidate as a new character, or
    /// write the working position/angle back to the source character.
    pub fn confirm_placement(&mut self) -> Action {
        let Some(placement) = self.session.confirm() else {
            return Action::None;
        };
        if placement.is_new {
            self.manager.add(Character {
                id: placement.id,
                name: placement.name,
                color: placement.color,
                x: placement.x,
                y: placement.y,
                angle: placement.angle,
            });
        } else if let Some(index) = placement.source_index {
            let patch = CharacterPatch {
                x: Some(placement.x),
                y: Some(placement.y),
                angle: Some(placement.angle),
                ..Default::default()
            };
            self.manager.update(index, &patch);
        }
        self.end_pointer_hold();
        self.clear_manual_fields();
        Action::RenderNeeded
    }

    /// Discard the active session.
    pub fn cancel_placement(&mut self) -> Action {
        if !self.session.is_active() {
            return Action::None;
        }
        self.session.cancel();
        self.end_pointer_hold();
        self.clear_manual_fields();
        Action::RenderNeeded
    }

    // --- Pointer events ---

    /// Primary click: hit-tests hover against the placed characters, and
    /// while a session is active also moves the working position to the
    /// snapped click point. A click places even in manual-edit mode; only
    /// pointer *movement* is ignored there.
    pub fn on_primary_click(&mut self, point: Point) -> Action {
        let hit = hit_test(point, self.manager.characters(), self.geometry().center);
        let hover_changed = hit != self.hovered;
        self.hovered = hit;
        if self.session.is_active() {
            let pos = snap_to_grid(point, self.geometry().center);
            self.session.update_position(pos.x, pos.y);
            self.seed_manual_fields();
            return Action::RenderNeeded;
        }
        if hover_changed { Action::RenderNeeded } else { Action::None }
    }

    /// Pointer move: live drag-to-place while a pointer-mode session is
    /// active; a visible magnifier follows the pointer.
    pub fn on_pointer_move(&mut self, point: Point) -> Action {
        let mut changed = false;
        if self.session.is_active() && self.session.edit_mode() == Some(EditMode::Pointer) {
            let pos = snap_to_grid(point, self.geometry().center);
            self.session.update_position(pos.x, pos.y);
            // Keep the manual fields mirroring the pointer so toggling into
            // manual mode shows current values.
            self.seed_manual_fields();
            changed = true;
        }
        if self.magnifier.visible {
            self.magnifier.follow(point);
            changed = true;
        }
        if changed { Action::RenderNeeded } else { Action::None }
    }

    /// Pointer down while placing arms the magnifier hold timer.
    pub fn on_pointer_down(&mut self, point: Point, now_ms: f64) -> Action {
        if self.session.is_active() {
            self.hold_timer.arm(now_ms, point);
        }
        Action::None
    }

    /// Check the hold timer; activates the magnifier once the pointer has
    /// been held long enough. Call from the host's frame tick.
    pub fn poll_magnifier(&mut self, now_ms: f64) -> Action {
        let Some(at) = self.hold_timer.poll(now_ms) else {
            return Action::None;
        };
        self.magnifier.show_at(at);
        Action::RenderNeeded
    }

    /// Pointer up cancels the pending hold and hides the magnifier.
    pub fn on_pointer_up(&mut self) -> Action {
        let was_visible = self.magnifier.visible;
        self.end_pointer_hold();
        if was_visible { Action::RenderNeeded } else { Action::None }
    }

    /// Pointer leave: like pointer up, and also clears the hover state.
    pub fn on_pointer_leave(&mut self) -> Action {
        let changed = self.magnifier.visible || self.hovered.is_some();
        self.end_pointer_hold();
        self.hovered = None;
        if changed { Action::RenderNeeded } else { Action::None }
    }

    /// Secondary click: toggles manual-edit mode while placing, or requests
    /// the in-place edit fields for a hit character.
    pub fn on_context_menu(&mut self, point: Point) -> Action {
        if self.session.is_active() {
            self.session.toggle_edit_mode();
            if self.session.edit_mode() == Some(EditMode::Manual) {
                self.seed_manual_fields();
            }
            return Action::RenderNeeded;
        }
        match hit_test(point, self.manager.characters(), self.geometry().center) {
            Some(index) => Action::EditCharacterRequested { index },
            None => Action::None,
        }
    }

    /// Escape cancels an active session (and with it, manual-edit mode).
    pub fn on_key_down(&mut self, key: &Key) -> Action {
        if key.is_escape() {
            return self.cancel_placement();
        }
        Action::None
    }

    // --- Manual-edit fields ---

    /// Apply x-field text. Invalid text is not applied; the field keeps its
    /// last valid value.
    pub fn set_manual_x(&mut self, text: &str) -> Action {
        let Some(x) = parse_coordinate(text) else {
            return Action::None;
        };
        let Some(pos) = self.session.position() else {
            return Action::None;
        };
        self.manual_x = text.to_owned();
        self.session.update_position(x, pos.y);
        Action::RenderNeeded
    }

    /// Apply y-field text. Same validation policy as [`set_manual_x`](Self::set_manual_x).
    pub fn set_manual_y(&mut self, text: &str) -> Action {
        let Some(y) = parse_coordinate(text) else {
            return Action::None;
        };
        let Some(pos) = self.session.position() else {
            return Action::None;
        };
        self.manual_y = text.to_owned();
        self.session.update_position(pos.x, y);
        Action::RenderNeeded
    }

    /// Apply angle-field text, clamped into `[0, 359]`.
    pub fn set_manual_angle(&mut self, text: &str) -> Action {
        let Some(angle) = parse_angle(text) else {
            return Action::None;
        };
        if !self.session.is_active() {
            return Action::None;
        }
        self.session.update_angle(i32::from(angle));
        self.manual_angle = angle.to_string();
        Action::RenderNeeded
    }

    /// Current manual field texts as `(x, y, angle)`.
    #[must_use]
    pub fn manual_fields(&self) -> (&str, &str, &str) {
        (&self.manual_x, &self.manual_y, &self.manual_angle)
    }

    // --- List-row edits ---

    /// Apply a validated in-place field edit to the character at `index`.
    pub fn set_character_field(&mut self, index: usize, edit: FieldEdit) -> Action {
        let patch = match edit {
            FieldEdit::Name(name) => CharacterPatch { name: Some(name), ..Default::default() },
            FieldEdit::X(x) => CharacterPatch { x: Some(x), ..Default::default() },
            FieldEdit::Y(y) => CharacterPatch { y: Some(y), ..Default::default() },
            FieldEdit::Angle(angle) => CharacterPatch { angle: Some(angle), ..Default::default() },
        };
        if self.manager.update(index, &patch) {
            Action::RenderNeeded
        } else {
            Action::None
        }
    }

    /// Recolor the character at `index` from the palette. The name follows
    /// the color name, as it does on creation.
    pub fn set_character_color(&mut self, index: usize, palette_index: usize) -> Action {
        let Some(color) = PALETTE.get(palette_index) else {
            return Action::None;
        };
        let patch = CharacterPatch {
            color: Some(color.value.to_owned()),
            name: Some(color.name.to_owned()),
            ..Default::default()
        };
        if self.manager.update(index, &patch) {
            Action::RenderNeeded
        } else {
            Action::None
        }
    }

    /// Delete the character at `index`. Any reposition in progress is
    /// cancelled since roster indices shift under it.
    pub fn delete_character(&mut self, index: usize) -> Action {
        if index >= self.manager.characters().len() {
            return Action::None;
        }
        if self.session.source_index().is_some() {
            self.cancel_placement();
        }
        if !self.manager.delete(index) {
            // The write failed; render so the error message shows.
            return Action::RenderNeeded;
        }
        match self.hovered {
            Some(h) if h == index => self.hovered = None,
            Some(h) if h > index => self.hovered = Some(h - 1),
            _ => {}
        }
        Action::RenderNeeded
    }

    // --- Export ---

    /// Snapshot the roster as a portable scene document.
    ///
    /// # Errors
    ///
    /// Returns `Err` if JSON serialization fails.
    pub fn export_scene(&self, timestamp: &str) -> Result<String, serde_json::Error> {
        export::scene_json(self.manager.characters(), timestamp)
    }

    // --- Queries ---

    /// All characters in list order.
    #[must_use]
    pub fn characters(&self) -> &[Character] {
        self.manager.characters()
    }

    /// The message from the most recent failed repository operation.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.manager.last_error()
    }

    fn end_pointer_hold(&mut self) {
        self.hold_timer.cancel();
        self.magnifier.hide();
    }

    fn seed_manual_fields(&mut self) {
        if let (Some(pos), Some(angle)) = (self.session.position(), self.session.angle()) {
            self.manual_x = pos.x.to_string();
            self.manual_y = pos.y.to_string();
            self.manual_angle = angle.to_string();
        }
    }

    fn clear_manual_fields(&mut self) {
        self.manual_x.clear();
        self.manual_y.clear();
        self.manual_angle.clear();
    }
}

/// The full stage engine. Wraps [`EngineCore`] and owns the browser canvas
/// element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore<BrowserRepository>,
}

impl Engine {
    /// Create an engine bound to the given canvas element and project.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, project: Uuid) -> Self {
        Self {
            canvas,
            core: EngineCore::new(BrowserRepository::new(), project),
        }
    }

    /// Re-read the canvas rendered box size into the viewport, resizing the
    /// backing store to match.
    pub fn sync_viewport(&mut self) -> Action {
        let width = self.canvas.offset_width().max(0);
        let height = self.canvas.offset_height().max(0);
        #[allow(clippy::cast_sign_loss)]
        {
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
        }
        self.core.set_viewport(f64::from(width), f64::from(height))
    }

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call
    /// fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(
            &ctx,
            &self.canvas,
            &self.core.geometry(),
            self.core.manager.characters(),
            &self.core.session,
            self.core.hovered,
            &self.core.magnifier,
        )
    }

    /// Export the scene document stamped with the current wall-clock time.
    ///
    /// # Errors
    ///
    /// Returns `Err` if JSON serialization fails.
    pub fn export_scene(&self) -> Result<String, JsValue> {
        let timestamp: String = js_sys::Date::new_0().to_iso_string().into();
        self.core
            .export_scene(&timestamp)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
