//! Scene export: snapshots the roster into a portable JSON document.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use serde::{Deserialize, Serialize};

use crate::character::Character;

/// One exported character. Ids are stringified so consumers do not need to
/// share this crate's id type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneCharacter {
    pub id: String,
    pub name: String,
    pub color: String,
    pub x: i32,
    pub y: i32,
    pub angle: u16,
}

/// The exported formation: the full character list plus a capture time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDocument {
    pub characters: Vec<SceneCharacter>,
    /// ISO-8601 capture time, supplied by the caller.
    pub timestamp: String,
}

/// Snapshot `characters` into an export document.
#[must_use]
pub fn scene_document(characters: &[Character], timestamp: &str) -> SceneDocument {
    SceneDocument {
        characters: characters
            .iter()
            .map(|c| SceneCharacter {
                id: c.id.to_string(),
                name: c.name.clone(),
                color: c.color.clone(),
                x: c.x,
                y: c.y,
                angle: c.angle,
            })
            .collect(),
        timestamp: timestamp.to_owned(),
    }
}

/// Snapshot `characters` and serialize the document as pretty JSON.
///
/// # Errors
///
/// Returns `Err` if JSON serialization fails.
pub fn scene_json(characters: &[Character], timestamp: &str) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&scene_document(characters, timestamp))
}
