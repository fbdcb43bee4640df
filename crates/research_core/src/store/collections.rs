//! Loading and saving the three record collections.
//!
//! # Responsibility
//! - Mirror in-memory collections into key-value storage as JSON arrays.
//! - Restore collections for a user at session start.
//!
//! # Invariants
//! - A missing key (or a stored JSON `null`) loads as an empty collection.
//! - Reset policy: if any one key fails to read or parse, all three
//!   collections load empty.
//! - Each save overwrites all three keys independently, with no transaction
//!   spanning them.

use super::keys::StorageKeys;
use super::kv::{KeyValueStore, StoreError, StoreResult};
use crate::model::conference::Conference;
use crate::model::journal::Journal;
use crate::model::paper::Paper;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The full record state of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collections {
    pub papers: Vec<Paper>,
    pub journals: Vec<Journal>,
    pub conferences: Vec<Conference>,
}

impl Collections {
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty() && self.journals.is_empty() && self.conferences.is_empty()
    }
}

enum LoadFailure {
    Read { key: String, source: StoreError },
    Parse { key: String, source: serde_json::Error },
}

/// Loads all three collections for `keys`.
///
/// Never fails: read or parse errors reset every collection to empty and are
/// reported as a `collections_load` warning.
pub fn load_collections<S>(store: &S, keys: &StorageKeys) -> Collections
where
    S: KeyValueStore + ?Sized,
{
    match try_load(store, keys) {
        Ok(collections) => {
            info!(
                "event=collections_load module=store status=ok papers={} journals={} conferences={}",
                collections.papers.len(),
                collections.journals.len(),
                collections.conferences.len()
            );
            collections
        }
        Err(LoadFailure::Read { key, source }) => {
            warn!(
                "event=collections_load module=store status=reset error_code=read_failed key={key} error={source}"
            );
            Collections::default()
        }
        Err(LoadFailure::Parse { key, source }) => {
            warn!(
                "event=collections_load module=store status=reset error_code=parse_failed key={key} error={source}"
            );
            Collections::default()
        }
    }
}

/// Writes all three collections under `keys`, papers first.
///
/// Stops at the first failing write; earlier keys stay written.
pub fn save_collections<S>(
    store: &mut S,
    keys: &StorageKeys,
    collections: &Collections,
) -> StoreResult<()>
where
    S: KeyValueStore + ?Sized,
{
    write_array(store, &keys.papers, &collections.papers)?;
    write_array(store, &keys.journals, &collections.journals)?;
    write_array(store, &keys.conferences, &collections.conferences)?;
    debug!(
        "event=collections_save module=store status=ok papers={} journals={} conferences={}",
        collections.papers.len(),
        collections.journals.len(),
        collections.conferences.len()
    );
    Ok(())
}

fn try_load<S>(store: &S, keys: &StorageKeys) -> Result<Collections, LoadFailure>
where
    S: KeyValueStore + ?Sized,
{
    Ok(Collections {
        papers: read_array(store, &keys.papers)?,
        journals: read_array(store, &keys.journals)?,
        conferences: read_array(store, &keys.conferences)?,
    })
}

fn read_array<S, T>(store: &S, key: &str) -> Result<Vec<T>, LoadFailure>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = store.get_item(key).map_err(|source| LoadFailure::Read {
        key: key.to_string(),
        source,
    })?;
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let parsed = serde_json::from_str::<Option<Vec<T>>>(&raw).map_err(|source| {
        LoadFailure::Parse {
            key: key.to_string(),
            source,
        }
    })?;
    Ok(parsed.unwrap_or_default())
}

fn write_array<S, T>(store: &mut S, key: &str, records: &[T]) -> StoreResult<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let encoded = serde_json::to_string(records).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set_item(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::{load_collections, save_collections, Collections};
    use crate::model::journal::{Journal, JournalInput};
    use crate::model::paper::{Paper, PaperInput};
    use crate::store::keys::StorageKeys;
    use crate::store::kv::{KeyValueStore, MemoryKeyValueStore};

    #[test]
    fn absent_keys_load_empty() {
        let store = MemoryKeyValueStore::new();
        let loaded = load_collections(&store, &StorageKeys::for_user("nobody"));
        assert!(loaded.is_empty());
    }

    #[test]
    fn stored_null_loads_empty() {
        let keys = StorageKeys::for_user("u");
        let mut store = MemoryKeyValueStore::new();
        store.set_item(&keys.papers, "null").unwrap();
        assert!(load_collections(&store, &keys).papers.is_empty());
    }

    #[test]
    fn one_corrupt_key_resets_all_three() {
        let keys = StorageKeys::for_user("u");
        let mut store = MemoryKeyValueStore::new();
        let collections = Collections {
            papers: vec![Paper::from_input(&PaperInput::titled("kept?"))],
            journals: vec![Journal::from_input(&JournalInput::named("J"))],
            conferences: Vec::new(),
        };
        save_collections(&mut store, &keys, &collections).unwrap();
        store.set_item(&keys.conferences, "{not json").unwrap();

        assert_eq!(load_collections(&store, &keys), Collections::default());
    }

    #[test]
    fn save_writes_json_arrays() {
        let keys = StorageKeys::for_user("u");
        let mut store = MemoryKeyValueStore::new();
        save_collections(&mut store, &keys, &Collections::default()).unwrap();

        for key in keys.all() {
            assert_eq!(store.get_item(key).unwrap().as_deref(), Some("[]"));
        }
    }
}
