//! Character model: the performer type, sparse updates, the fixed color
//! palette, and the index-addressed roster.
//!
//! Characters are owned by a project and addressed by list index throughout
//! the editor (hover, reposition source, list-row edits), so the roster is
//! an ordered `Vec` rather than a map. Data flows into this layer from the
//! repository (JSON deserialization) and from the engine (mutations); the
//! renderer reads it in list order.

#[cfg(test)]
#[path = "character_test.rs"]
mod character_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_ANGLE;

/// Unique identifier for a character within a project.
///
/// Assigned by the persistence layer (`max + 1`); rendered and exported as
/// a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A performer placed on the stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Stable identifier, unique within the project.
    pub id: CharacterId,
    /// Short editable label; seeded from the palette color name on creation.
    pub name: String,
    /// Display color, one of [`PALETTE`].
    pub color: String,
    /// Horizontal position in grid units.
    pub x: i32,
    /// Vertical position in grid units (positive is up).
    pub y: i32,
    /// Heading in degrees, always within `[0, 359]`; `0` points along +x.
    pub angle: u16,
}

/// Sparse update for a character. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPatch {
    /// New name, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New display color, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// New x position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// New y position, if being updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    /// New heading in degrees, if being updated. Clamped into `[0, 359]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<u16>,
}

/// A named palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub value: &'static str,
}

/// The fixed 10-color character palette.
pub const PALETTE: [PaletteColor; 10] = [
    PaletteColor { name: "white", value: "#fff" },
    PaletteColor { name: "yellow", value: "#ffe600" },
    PaletteColor { name: "red", value: "#ff3b3b" },
    PaletteColor { name: "cyan", value: "#00e6ff" },
    PaletteColor { name: "magenta", value: "#ff00c8" },
    PaletteColor { name: "green", value: "#00ff6a" },
    PaletteColor { name: "tan", value: "#ffd1a4" },
    PaletteColor { name: "blue", value: "#0066ff" },
    PaletteColor { name: "purple", value: "#9900ff" },
    PaletteColor { name: "orange", value: "#ff9900" },
];

/// Clamp an arbitrary integer heading into the storable `[0, 359]` range.
#[must_use]
pub fn clamp_angle(value: i32) -> u16 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        value.clamp(0, i32::from(MAX_ANGLE)) as u16
    }
}

/// Ordered in-memory list of a project's characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all characters with a full snapshot.
    pub fn load_snapshot(&mut self, characters: Vec<Character>) {
        self.characters = characters;
    }

    /// Append a character to the end of the list.
    pub fn push(&mut self, character: Character) {
        self.characters.push(character);
    }

    /// Remove the character at `index`, returning it if the index is valid.
    pub fn remove(&mut self, index: usize) -> Option<Character> {
        if index < self.characters.len() {
            Some(self.characters.remove(index))
        } else {
            None
        }
    }

    /// Apply a sparse update to the character at `index`. Returns false if
    /// the index is out of range. The angle is clamped on the way in.
    pub fn apply_patch(&mut self, index: usize, patch: &CharacterPatch) -> bool {
        let Some(character) = self.characters.get_mut(index) else {
            return false;
        };
        if let Some(ref name) = patch.name {
            character.name = name.clone();
        }
        if let Some(ref color) = patch.color {
            character.color = color.clone();
        }
        if let Some(x) = patch.x {
            character.x = x;
        }
        if let Some(y) = patch.y {
            character.y = y;
        }
        if let Some(angle) = patch.angle {
            character.angle = clamp_angle(i32::from(angle));
        }
        true
    }

    /// Return a reference to the character at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    /// The smallest id strictly greater than every id in the roster, or `1`
    /// for an empty roster.
    #[must_use]
    pub fn next_id(&self) -> CharacterId {
        CharacterId(
            self.characters
                .iter()
                .map(|c| c.id.0)
                .max()
                .map_or(1, |max| max + 1),
        )
    }

    /// All characters in list order.
    #[must_use]
    pub fn as_slice(&self) -> &[Character] {
        &self.characters
    }

    /// Number of characters in the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns `true` if the roster contains no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
