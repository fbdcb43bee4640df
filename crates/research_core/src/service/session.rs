//! Active-user session over key-value storage.
//!
//! # Responsibility
//! - Resolve keys and load collections when the active user changes.
//! - Apply add/update use-cases to the in-memory collections and mirror
//!   every mutation to storage.
//!
//! # Invariants
//! - In-memory collections are the source of truth while a user is active;
//!   storage is rewritten in full after each successful mutation.
//! - Input is validated before any collection is touched.
//! - Records keep their `id` and `created_at` across updates.
//! - Updating an unknown id changes nothing and persists nothing.
//! - Switching users discards the previous user's in-memory state without
//!   saving it.

use crate::model::conference::{Conference, ConferenceInput};
use crate::model::journal::{Journal, JournalInput};
use crate::model::paper::{Paper, PaperInput};
use crate::model::record::{position_of, Record, ValidationError};
use crate::store::collections::{load_collections, save_collections, Collections};
use crate::store::keys::{StorageKeys, LAST_USER_KEY};
use crate::store::kv::{KeyValueStore, StoreError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    /// Operation needs a logged-in user.
    NoActiveUser,
    /// User name is empty after trimming.
    EmptyUserName,
    Validation(ValidationError),
    Store(StoreError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveUser => write!(f, "no active user; log in first"),
            Self::EmptyUserName => write!(f, "user name cannot be empty"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::NoActiveUser | Self::EmptyUserName => None,
        }
    }
}

impl From<ValidationError> for SessionError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug)]
struct ActiveUser {
    name: String,
    keys: StorageKeys,
    collections: Collections,
}

/// Research tracker session bound to one key-value store.
pub struct Session<S: KeyValueStore> {
    store: S,
    active: Option<ActiveUser>,
}

impl<S: KeyValueStore> Session<S> {
    /// Creates a session with no active user.
    pub fn new(store: S) -> Self {
        Self {
            store,
            active: None,
        }
    }

    /// Creates a session and switches to the last remembered user, if any.
    ///
    /// A failed read of the remembered name starts without a user.
    pub fn resume(store: S) -> Self {
        let mut session = Self::new(store);
        let remembered = match session.store.get_item(LAST_USER_KEY) {
            Ok(value) => value,
            Err(err) => {
                debug!("event=session_resume module=service status=skipped error={err}");
                None
            }
        };
        if let Some(name) = remembered {
            // Empty names were never remembered by `login`; ignore them.
            let _ = session.switch_user(&name);
        }
        session
    }

    /// Remembers `name` as the last user and switches to it.
    pub fn login(&mut self, name: &str) -> SessionResult<()> {
        let name = normalize_user_name(name)?;
        self.store.set_item(LAST_USER_KEY, name)?;
        self.switch_user(name)
    }

    /// Makes `name` the active user and loads its collections.
    ///
    /// Unsaved state of the previous user is dropped.
    pub fn switch_user(&mut self, name: &str) -> SessionResult<()> {
        let name = normalize_user_name(name)?;
        let keys = StorageKeys::for_user(name);
        let collections = load_collections(&self.store, &keys);
        info!(
            "event=session_switch module=service status=ok papers={} journals={} conferences={}",
            collections.papers.len(),
            collections.journals.len(),
            collections.conferences.len()
        );
        self.active = Some(ActiveUser {
            name: name.to_string(),
            keys,
            collections,
        });
        Ok(())
    }

    pub fn user_name(&self) -> Option<&str> {
        self.active.as_ref().map(|active| active.name.as_str())
    }

    pub fn keys(&self) -> Option<&StorageKeys> {
        self.active.as_ref().map(|active| &active.keys)
    }

    /// Papers in insertion order; empty without an active user.
    pub fn papers(&self) -> &[Paper] {
        match &self.active {
            Some(active) => &active.collections.papers,
            None => &[],
        }
    }

    pub fn journals(&self) -> &[Journal] {
        match &self.active {
            Some(active) => &active.collections.journals,
            None => &[],
        }
    }

    pub fn conferences(&self) -> &[Conference] {
        match &self.active {
            Some(active) => &active.collections.conferences,
            None => &[],
        }
    }

    pub fn find_paper(&self, id: &str) -> Option<&Paper> {
        find(self.papers(), id)
    }

    pub fn find_journal(&self, id: &str) -> Option<&Journal> {
        find(self.journals(), id)
    }

    pub fn find_conference(&self, id: &str) -> Option<&Conference> {
        find(self.conferences(), id)
    }

    /// Validates `input`, appends a new paper and persists.
    ///
    /// If the write fails the paper stays in memory and the error is
    /// returned.
    pub fn add_paper(&mut self, input: &PaperInput) -> SessionResult<Paper> {
        input.validate()?;
        let paper = Paper::from_input(input);
        self.mutate("paper", &paper.id, |collections| {
            collections.papers.push(paper.clone())
        })?;
        Ok(paper)
    }

    pub fn add_journal(&mut self, input: &JournalInput) -> SessionResult<Journal> {
        input.validate()?;
        let journal = Journal::from_input(input);
        self.mutate("journal", &journal.id, |collections| {
            collections.journals.push(journal.clone())
        })?;
        Ok(journal)
    }

    pub fn add_conference(&mut self, input: &ConferenceInput) -> SessionResult<Conference> {
        input.validate()?;
        let conference = Conference::from_input(input);
        self.mutate("conference", &conference.id, |collections| {
            collections.conferences.push(conference.clone())
        })?;
        Ok(conference)
    }

    /// Overwrites the paper with `id` from `input` and persists.
    ///
    /// Returns `Ok(None)` when no such paper exists.
    pub fn update_paper(&mut self, id: &str, input: &PaperInput) -> SessionResult<Option<Paper>> {
        input.validate()?;
        self.update(
            "paper",
            id,
            |collections| &mut collections.papers,
            |paper| paper.apply(input),
        )
    }

    pub fn update_journal(
        &mut self,
        id: &str,
        input: &JournalInput,
    ) -> SessionResult<Option<Journal>> {
        input.validate()?;
        self.update(
            "journal",
            id,
            |collections| &mut collections.journals,
            |journal| journal.apply(input),
        )
    }

    pub fn update_conference(
        &mut self,
        id: &str,
        input: &ConferenceInput,
    ) -> SessionResult<Option<Conference>> {
        input.validate()?;
        self.update(
            "conference",
            id,
            |collections| &mut collections.conferences,
            |conference| conference.apply(input),
        )
    }

    /// Rewrites all three collections of the active user, e.g. to retry after
    /// an `add_*`/`update_*` whose write failed.
    pub fn save(&mut self) -> SessionResult<()> {
        let active = self.active.as_ref().ok_or(SessionError::NoActiveUser)?;
        save_collections(&mut self.store, &active.keys, &active.collections)?;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn mutate(
        &mut self,
        kind: &'static str,
        id: &str,
        change: impl FnOnce(&mut Collections),
    ) -> SessionResult<()> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveUser)?;
        change(&mut active.collections);
        save_collections(&mut self.store, &active.keys, &active.collections)?;
        info!("event=record_write module=service status=ok kind={kind} id={id}");
        Ok(())
    }

    fn update<R: Record + Clone>(
        &mut self,
        kind: &'static str,
        id: &str,
        select: impl FnOnce(&mut Collections) -> &mut Vec<R>,
        apply: impl FnOnce(&mut R),
    ) -> SessionResult<Option<R>> {
        let active = self.active.as_mut().ok_or(SessionError::NoActiveUser)?;
        let records = select(&mut active.collections);
        let Some(index) = position_of(records.as_slice(), id) else {
            debug!("event=record_write module=service status=not_found kind={kind} id={id}");
            return Ok(None);
        };
        apply(&mut records[index]);
        let updated = records[index].clone();
        save_collections(&mut self.store, &active.keys, &active.collections)?;
        info!("event=record_write module=service status=ok kind={kind} id={id}");
        Ok(Some(updated))
    }
}

fn normalize_user_name(name: &str) -> SessionResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SessionError::EmptyUserName);
    }
    Ok(trimmed)
}

fn find<'a, R: Record>(records: &'a [R], id: &str) -> Option<&'a R> {
    position_of(records, id).map(|index| &records[index])
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionError};
    use crate::model::journal::JournalInput;
    use crate::model::paper::PaperInput;
    use crate::store::kv::MemoryKeyValueStore;

    #[test]
    fn mutations_require_active_user() {
        let mut session = Session::new(MemoryKeyValueStore::new());
        let err = session.add_paper(&PaperInput::titled("A")).unwrap_err();
        assert!(matches!(err, SessionError::NoActiveUser));
        assert!(session.store().is_empty());
    }

    #[test]
    fn blank_user_name_is_rejected() {
        let mut session = Session::new(MemoryKeyValueStore::new());
        assert!(matches!(
            session.switch_user("   "),
            Err(SessionError::EmptyUserName)
        ));
        assert!(session.user_name().is_none());
    }

    #[test]
    fn validation_happens_before_mutation() {
        let mut session = Session::new(MemoryKeyValueStore::new());
        session.switch_user("ada").unwrap();
        let err = session.add_journal(&JournalInput::named(" ")).unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
        assert!(session.journals().is_empty());
        assert!(session.store().is_empty());
    }
}
