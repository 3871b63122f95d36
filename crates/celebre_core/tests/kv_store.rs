use celebre_core::db::{open_db, share};
use celebre_core::{
    KeyValueStore, Person, PersonStatus, Project, SeedData, SqliteKeyValueStore, StorageKey, Theme,
};

#[test]
fn seeded_collections_survive_reopen_with_deep_equality() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kv.db");
    let seed = SeedData::default();

    {
        let store = SqliteKeyValueStore::new(share(open_db(&path).unwrap()));
        store.save(StorageKey::People.as_str(), &seed.people);
        store.save(StorageKey::Projects.as_str(), &seed.projects);
    }

    let store = SqliteKeyValueStore::new(share(open_db(&path).unwrap()));
    let people: Vec<Person> = store.load(StorageKey::People.as_str(), Vec::new());
    let projects: Vec<Project> = store.load(StorageKey::Projects.as_str(), Vec::new());
    assert_eq!(people, seed.people);
    assert_eq!(projects, seed.projects);
}

#[test]
fn stored_person_uses_camel_case_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteKeyValueStore::new(share(open_db(dir.path().join("kv.db")).unwrap()));
    let mut person = Person::new("p-x", "Teste", "teste@celebre.com").with_status(PersonStatus::Away);
    person.avatar_url = "https://img/1.png".to_string();
    person.settings.theme = Theme::Dark;

    store.save(StorageKey::CurrentUser.as_str(), &person);

    let raw = store
        .read_raw(StorageKey::CurrentUser.as_str())
        .unwrap()
        .unwrap();
    assert!(raw.contains("\"avatarUrl\":\"https://img/1.png\""));
    assert!(raw.contains("\"status\":\"away\""));
    assert!(raw.contains("\"theme\":\"dark\""));
    assert!(raw.contains("\"showPhone\":false"));
}

#[test]
fn missing_key_returns_default_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteKeyValueStore::new(share(open_db(dir.path().join("kv.db")).unwrap()));

    assert!(!store.load(StorageKey::IsDarkMode.as_str(), false));
    assert_eq!(store.read_raw(StorageKey::IsDarkMode.as_str()).unwrap(), None);
}
