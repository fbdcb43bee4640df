use research_core::db::DbError;
use research_core::{
    load_collections, save_collections, Collections, KeyValueStore, MemoryKeyValueStore, Paper,
    PaperInput, Session, SessionError, StorageKeys, StoreError, StoreResult,
};

/// Memory store whose writes to `fail_key` fail a set number of times.
struct FlakyStore {
    inner: MemoryKeyValueStore,
    fail_key: String,
    failures_left: usize,
}

impl FlakyStore {
    fn failing_on(key: &str, times: usize) -> Self {
        Self {
            inner: MemoryKeyValueStore::new(),
            fail_key: key.to_string(),
            failures_left: times,
        }
    }
}

impl KeyValueStore for FlakyStore {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if key == self.fail_key && self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(StoreError::Db(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        self.inner.set_item(key, value)
    }
}

#[test]
fn failed_write_keeps_record_in_memory() {
    let keys = StorageKeys::for_user("ada");
    let mut session = Session::new(FlakyStore::failing_on(&keys.papers, usize::MAX));
    session.switch_user("ada").unwrap();
    assert_eq!(session.keys(), Some(&keys));

    let err = session.add_paper(&PaperInput::titled("Unsaved")).unwrap_err();

    assert!(matches!(err, SessionError::Store(StoreError::Db(_))));
    assert_eq!(session.papers().len(), 1);
    assert_eq!(session.papers()[0].title, "Unsaved");
    assert!(session.store().inner.get_item(&keys.papers).unwrap().is_none());
}

#[test]
fn save_retries_unsaved_records() {
    let keys = StorageKeys::for_user("ada");
    let mut session = Session::new(FlakyStore::failing_on(&keys.papers, 1));
    session.switch_user("ada").unwrap();
    assert!(session.add_paper(&PaperInput::titled("Later")).is_err());

    session.save().unwrap();

    let loaded = load_collections(&session.store().inner, &keys);
    assert_eq!(loaded.papers.len(), 1);
    assert_eq!(loaded.papers[0].title, "Later");
}

#[test]
fn save_without_user_is_rejected() {
    let mut session = Session::new(MemoryKeyValueStore::new());
    assert!(matches!(session.save(), Err(SessionError::NoActiveUser)));
    assert!(session.store().is_empty());
}

#[test]
fn save_stops_at_first_failing_key() {
    let keys = StorageKeys::for_user("ada");
    let mut store = FlakyStore::failing_on(&keys.journals, usize::MAX);
    let collections = Collections {
        papers: vec![Paper::from_input(&PaperInput::titled("Written"))],
        ..Collections::default()
    };

    let err = save_collections(&mut store, &keys, &collections).unwrap_err();

    assert!(matches!(err, StoreError::Db(_)));
    let papers = store.inner.get_item(&keys.papers).unwrap().unwrap();
    assert!(papers.contains("\"Written\""));
    assert!(store.inner.get_item(&keys.journals).unwrap().is_none());
    assert!(store.inner.get_item(&keys.conferences).unwrap().is_none());
}

#[test]
fn session_write_failure_on_journals_leaves_papers_written() {
    let keys = StorageKeys::for_user("ada");
    let mut session = Session::new(FlakyStore::failing_on(&keys.journals, usize::MAX));
    session.switch_user("ada").unwrap();

    let err = session.add_paper(&PaperInput::titled("Half")).unwrap_err();

    assert!(matches!(err, SessionError::Store(_)));
    let inner = &session.store().inner;
    assert!(inner.get_item(&keys.papers).unwrap().is_some());
    assert!(inner.get_item(&keys.conferences).unwrap().is_none());
}
