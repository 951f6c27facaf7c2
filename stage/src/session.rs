//! Placement state machine: the lifecycle of placing or repositioning one
//! character.
//!
//! At most one session exists per editor. The `Active` variant carries all
//! working state, so a position and angle exist exactly while a session is
//! in progress — there is no "active but undefined" state to defend
//! against. Confirming or cancelling always returns to `Idle`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::character::{Character, CharacterId, clamp_angle};
use crate::grid::GridPos;
use crate::input::EditMode;

/// The finalized outcome of a confirmed placement.
///
/// For a new character the id is the draft's placeholder; the persistence
/// layer assigns the real id when the character is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub id: CharacterId,
    pub name: String,
    pub color: String,
    pub x: i32,
    pub y: i32,
    pub angle: u16,
    /// True if confirming should add a character rather than update one.
    pub is_new: bool,
    /// Roster index of the character being repositioned, if any.
    pub source_index: Option<usize>,
}

/// State of the one placement/reposition workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlacementSession {
    /// No placement in progress.
    #[default]
    Idle,
    /// A character is being placed or repositioned.
    Active {
        /// The character being placed (a draft for new characters).
        candidate: Character,
        /// Roster index when repositioning an existing character.
        source_index: Option<usize>,
        /// Live working position shown during placement.
        position: GridPos,
        /// Live working heading in degrees, always within `[0, 359]`.
        angle: u16,
        /// True if confirming adds instead of updates.
        is_new: bool,
        /// Whether position/angle come from the pointer or from text fields.
        edit_mode: EditMode,
    },
}

impl PlacementSession {
    /// Begin placing a brand-new character. The working position defaults
    /// to the stage origin with a zero heading.
    pub fn start_new(&mut self, draft: Character) {
        *self = Self::Active {
            candidate: draft,
            source_index: None,
            position: GridPos::new(0, 0),
            angle: 0,
            is_new: true,
            edit_mode: EditMode::Pointer,
        };
    }

    /// Begin repositioning an existing character, seeding the working
    /// values from its current position and heading.
    pub fn start_reposition(&mut self, character: Character, index: usize) {
        let position = GridPos::new(character.x, character.y);
        let angle = character.angle;
        *self = Self::Active {
            candidate: character,
            source_index: Some(index),
            position,
            angle,
            is_new: false,
            edit_mode: EditMode::Pointer,
        };
    }

    /// Update the working position. No-op while idle.
    pub fn update_position(&mut self, x: i32, y: i32) {
        if let Self::Active { position, .. } = self {
            *position = GridPos::new(x, y);
        }
    }

    /// Update the working heading, clamping into `[0, 359]`.
    ///
    /// This is the single entry point for angle changes; the pointer and
    /// manual-edit paths both land here, so they cannot diverge.
    pub fn update_angle(&mut self, value: i32) {
        if let Self::Active { angle, .. } = self {
            *angle = clamp_angle(value);
        }
    }

    /// Confirm the placement, returning the finalized values and clearing
    /// the session. Returns `None` while idle — a caller bug, treated as a
    /// no-op rather than an error.
    pub fn confirm(&mut self) -> Option<Placement> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Active { candidate, source_index, position, angle, is_new, .. } => {
                Some(Placement {
                    id: candidate.id,
                    name: candidate.name,
                    color: candidate.color,
                    x: position.x,
                    y: position.y,
                    angle,
                    is_new,
                    source_index,
                })
            }
        }
    }

    /// Discard the session unconditionally.
    pub fn cancel(&mut self) {
        *self = Self::Idle;
    }

    /// Flip between pointer-driven and manual text-field editing. Does not
    /// change whether the session is active.
    pub fn toggle_edit_mode(&mut self) {
        if let Self::Active { edit_mode, .. } = self {
            *edit_mode = match edit_mode {
                EditMode::Pointer => EditMode::Manual,
                EditMode::Manual => EditMode::Pointer,
            };
        }
    }

    /// Force a specific edit mode while active.
    pub fn set_edit_mode(&mut self, mode: EditMode) {
        if let Self::Active { edit_mode, .. } = self {
            *edit_mode = mode;
        }
    }

    /// Whether a placement is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// The working position, if a session is active.
    #[must_use]
    pub fn position(&self) -> Option<GridPos> {
        match self {
            Self::Active { position, .. } => Some(*position),
            Self::Idle => None,
        }
    }

    /// The working heading, if a session is active.
    #[must_use]
    pub fn angle(&self) -> Option<u16> {
        match self {
            Self::Active { angle, .. } => Some(*angle),
            Self::Idle => None,
        }
    }

    /// The roster index being repositioned, if a reposition is active.
    #[must_use]
    pub fn source_index(&self) -> Option<usize> {
        match self {
            Self::Active { source_index, .. } => *source_index,
            Self::Idle => None,
        }
    }

    /// The character being placed, if a session is active.
    #[must_use]
    pub fn candidate(&self) -> Option<&Character> {
        match self {
            Self::Active { candidate, .. } => Some(candidate),
            Self::Idle => None,
        }
    }

    /// The current edit mode, if a session is active.
    #[must_use]
    pub fn edit_mode(&self) -> Option<EditMode> {
        match self {
            Self::Active { edit_mode, .. } => Some(*edit_mode),
            Self::Idle => None,
        }
    }
}
