//! Character repository contract and implementations.
//!
//! The engine persists through the [`CharacterRepository`] trait so its
//! placement and roster logic can be tested natively. [`BrowserRepository`]
//! is the production implementation over `localStorage`;
//! [`MemoryRepository`] backs native tests.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::character::Character;

/// Repository failures surfaced to the manager.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The project has no stored roster yet. Loads treat this as an empty
    /// roster, not a failure.
    #[error("project not found")]
    NotFound,

    /// The backing store rejected the operation.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistent storage for a project's character roster.
///
/// Operations are synchronous: the production store is `localStorage`,
/// which blocks anyway, and a synchronous seam keeps the engine free of
/// async plumbing.
pub trait CharacterRepository {
    /// Load the full roster for `project`.
    ///
    /// Returns [`StoreError::NotFound`] when the project has never been
    /// saved.
    fn load_characters(&self, project: Uuid) -> Result<Vec<Character>, StoreError>;

    /// Replace the stored roster for `project` with `characters`.
    fn replace_characters(
        &mut self,
        project: Uuid,
        characters: &[Character],
    ) -> Result<(), StoreError>;
}

/// A stored project: identity plus its character roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub characters: Vec<Character>,
}

/// In-memory repository used by native tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    projects: HashMap<Uuid, Vec<Character>>,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository already holding `characters` for `project`.
    #[must_use]
    pub fn seeded(project: Uuid, characters: Vec<Character>) -> Self {
        let mut projects = HashMap::new();
        projects.insert(project, characters);
        Self { projects }
    }
}

impl CharacterRepository for MemoryRepository {
    fn load_characters(&self, project: Uuid) -> Result<Vec<Character>, StoreError> {
        self.projects
            .get(&project)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn replace_characters(
        &mut self,
        project: Uuid,
        characters: &[Character],
    ) -> Result<(), StoreError> {
        self.projects.insert(project, characters.to_vec());
        Ok(())
    }
}

/// `localStorage`-backed repository. Requires a browser environment.
///
/// Rosters are stored one JSON array per project under
/// `stagegrid.project.<uuid>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRepository;

impl BrowserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn storage_key(project: Uuid) -> String {
        format!("stagegrid.project.{project}")
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Storage("no window".to_owned()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Storage(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Storage("localStorage unavailable".to_owned()))
    }
}

impl CharacterRepository for BrowserRepository {
    fn load_characters(&self, project: Uuid) -> Result<Vec<Character>, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(&Self::storage_key(project))
            .map_err(|e| StoreError::Storage(format!("{e:?}")))?
            .ok_or(StoreError::NotFound)?;
        serde_json::from_str(&raw).map_err(|e| StoreError::Storage(e.to_string()))
    }

    fn replace_characters(
        &mut self,
        project: Uuid,
        characters: &[Character],
    ) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let raw =
            serde_json::to_string(characters).map_err(|e| StoreError::Storage(e.to_string()))?;
        storage
            .set_item(&Self::storage_key(project), &raw)
            .map_err(|e| StoreError::Storage(format!("{e:?}")))
    }
}
