use research_core::db::open_db;
use research_core::{
    load_collections, save_collections, Collections, Conference, ConferenceInput, Journal,
    JournalInput, KeyValueStore, MemoryKeyValueStore, Paper, PaperInput, SqliteKeyValueStore,
    StorageKeys,
};

fn sample_collections() -> Collections {
    let journal = Journal::from_input(&JournalInput {
        publisher: "Elsevier".to_string(),
        if_value: "9.4".to_string(),
        ..JournalInput::named("Applied Energy")
    });
    let paper = Paper::from_input(&PaperInput {
        description: "Battery aging model".to_string(),
        deadline: "2025-06-30".to_string(),
        status: "writing".to_string(),
        journal_ids: vec![journal.id.clone(), "dangling".to_string()],
        conference_link: "https://example.org/cfp".to_string(),
        ..PaperInput::titled("Aging")
    });
    let conference = Conference::from_input(&ConferenceInput {
        date: "2025-09-10".to_string(),
        ..ConferenceInput::named("EnergyCon")
    });

    Collections {
        papers: vec![paper, Paper::from_input(&PaperInput::titled("Second"))],
        journals: vec![journal],
        conferences: vec![conference],
    }
}

#[test]
fn sqlite_round_trip_reproduces_collections() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_db(dir.path().join("kv.sqlite3")).unwrap();
    let mut store = SqliteKeyValueStore::new(&conn);
    let keys = StorageKeys::for_user("ada");
    let collections = sample_collections();

    save_collections(&mut store, &keys, &collections).unwrap();

    assert_eq!(load_collections(&store, &keys), collections);
}

#[test]
fn users_do_not_see_each_other() {
    let mut store = MemoryKeyValueStore::new();
    let ada = StorageKeys::for_user("ada");
    let grace = StorageKeys::for_user("grace");

    save_collections(&mut store, &ada, &sample_collections()).unwrap();

    assert!(load_collections(&store, &grace).is_empty());
    assert_eq!(load_collections(&store, &ada).papers.len(), 2);
}

#[test]
fn invalid_payload_yields_three_empty_collections() {
    let mut store = MemoryKeyValueStore::new();
    let keys = StorageKeys::for_user("ada");
    save_collections(&mut store, &keys, &sample_collections()).unwrap();

    store.set_item(&keys.papers, "[{\"id\": 1}]").unwrap();

    assert_eq!(load_collections(&store, &keys), Collections::default());
}

#[test]
fn browser_shaped_payload_loads() {
    let mut store = MemoryKeyValueStore::new();
    let keys = StorageKeys::for_user("ada");
    store
        .set_item(
            &keys.papers,
            r#"[{"id":"1700000000001","title":"Legacy","description":"","deadline":"2025-01-10",
                "status":"planning","journalIds":[],"conferenceLink":null,"notes":null,
                "createdAt":"2023-11-14T22:13:20.001Z"}]"#,
        )
        .unwrap();
    store
        .set_item(
            &keys.journals,
            r#"[{"id":"1700000000000","name":"Nature","publisher":"","category":"",
                "link":"","ifValue":"","createdAt":"2023-11-14T22:13:20.000Z"}]"#,
        )
        .unwrap();

    let loaded = load_collections(&store, &keys);

    assert_eq!(loaded.papers[0].progress(), 25);
    assert_eq!(loaded.journals[0].name, "Nature");
    assert!(loaded.conferences.is_empty());
}

#[test]
fn null_fields_load_as_defaults() {
    let mut store = MemoryKeyValueStore::new();
    let keys = StorageKeys::for_user("ada");
    store
        .set_item(
            &keys.papers,
            r#"[{"id":"1","title":"T","description":null,"journalIds":null,"status":"idea","createdAt":"x"}]"#,
        )
        .unwrap();
    store
        .set_item(
            &keys.journals,
            r#"[{"id":"2","name":"Nature","publisher":null,"ifValue":null}]"#,
        )
        .unwrap();

    let loaded = load_collections(&store, &keys);

    assert_eq!(loaded.papers.len(), 1);
    assert_eq!(loaded.papers[0].description, "");
    assert!(loaded.papers[0].journal_ids.is_empty());
    assert_eq!(loaded.journals[0].publisher, "");
    assert_eq!(loaded.journals[0].if_value, "");
}
