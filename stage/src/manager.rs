//! Repository-backed roster mutations.
//!
//! The manager owns the in-memory [`Roster`] and keeps it coherent with the
//! repository. Updates are optimistic (apply locally, then write through);
//! adds and deletes write first and then reload the authoritative roster.
//! Failures never retry: the last error message is recorded for display and
//! cleared at the start of the next operation.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use uuid::Uuid;

use crate::character::{Character, CharacterPatch, Roster};
use crate::store::{CharacterRepository, StoreError};

/// Roster state bound to one project in one repository.
#[derive(Debug)]
pub struct CharacterManager<R: CharacterRepository> {
    repository: R,
    project: Uuid,
    roster: Roster,
    last_error: Option<String>,
}

impl<R: CharacterRepository> CharacterManager<R> {
    /// Create a manager with an empty roster. Call [`load`](Self::load)
    /// before use.
    pub fn new(repository: R, project: Uuid) -> Self {
        Self {
            repository,
            project,
            roster: Roster::new(),
            last_error: None,
        }
    }

    /// Load the project's roster from the repository.
    ///
    /// A missing project is a fresh one: the roster becomes empty and no
    /// error is recorded. A storage failure leaves the current roster
    /// untouched and records an error.
    pub fn load(&mut self) -> bool {
        self.last_error = None;
        match self.repository.load_characters(self.project) {
            Ok(characters) => {
                self.roster.load_snapshot(characters);
                true
            }
            Err(StoreError::NotFound) => {
                self.roster.load_snapshot(Vec::new());
                true
            }
            Err(StoreError::Storage(_)) => {
                self.last_error = Some("failed to load characters".to_owned());
                false
            }
        }
    }

    /// Add a character, assigning it the next free id. Writes the full
    /// roster and reloads it on success.
    pub fn add(&mut self, mut character: Character) -> bool {
        self.last_error = None;
        character.id = self.roster.next_id();
        let mut next: Vec<Character> = self.roster.as_slice().to_vec();
        next.push(character);
        if self.repository.replace_characters(self.project, &next).is_err() {
            self.last_error = Some("failed to add character".to_owned());
            return false;
        }
        self.reload_after_write()
    }

    /// Apply a sparse update to the character at `index`.
    ///
    /// The patch is applied locally first so the UI reflects it
    /// immediately, then written through. On a write failure the roster is
    /// reloaded so local state never drifts from storage.
    pub fn update(&mut self, index: usize, patch: &CharacterPatch) -> bool {
        self.last_error = None;
        if !self.roster.apply_patch(index, patch) {
            return false;
        }
        if self
            .repository
            .replace_characters(self.project, self.roster.as_slice())
            .is_err()
        {
            self.last_error = Some("failed to update character".to_owned());
            self.reload_after_failure();
            return false;
        }
        true
    }

    /// Delete the character at `index`. Writes the full roster and reloads
    /// it on success.
    pub fn delete(&mut self, index: usize) -> bool {
        self.last_error = None;
        let mut next: Vec<Character> = self.roster.as_slice().to_vec();
        if index >= next.len() {
            return false;
        }
        next.remove(index);
        if self.repository.replace_characters(self.project, &next).is_err() {
            self.last_error = Some("failed to delete character".to_owned());
            return false;
        }
        self.reload_after_write()
    }

    /// All characters in list order.
    #[must_use]
    pub fn characters(&self) -> &[Character] {
        self.roster.as_slice()
    }

    /// The in-memory roster.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The project this manager is bound to.
    #[must_use]
    pub fn project(&self) -> Uuid {
        self.project
    }

    /// The message from the most recent failed operation, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn reload_after_write(&mut self) -> bool {
        match self.repository.load_characters(self.project) {
            Ok(characters) => {
                self.roster.load_snapshot(characters);
                true
            }
            Err(StoreError::NotFound) => {
                self.roster.load_snapshot(Vec::new());
                true
            }
            Err(StoreError::Storage(_)) => {
                self.last_error = Some("failed to load characters".to_owned());
                false
            }
        }
    }

    // Restore the authoritative roster after a failed write-through,
    // keeping the recorded write error even if the reload also fails.
    fn reload_after_failure(&mut self) {
        match self.repository.load_characters(self.project) {
            Ok(characters) => self.roster.load_snapshot(characters),
            Err(StoreError::NotFound) => self.roster.load_snapshot(Vec::new()),
            Err(StoreError::Storage(_)) => {}
        }
    }
}
