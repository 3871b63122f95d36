use async_trait::async_trait;
use celebre_core::db::{open_db, open_db_in_memory, share};
use celebre_core::{
    ClockIdGenerator, Document, DocumentId, DocumentRepository, EntityStateManager, FixedClock,
    KeyValueStore, MemoryKeyValueStore, NewDocument, NewProject, NewSocialEvent, Notification,
    Person, PersonStatus, Project, ProjectStatus, RepoError, RepoResult, SeedData,
    SqliteDocumentRepository, SqliteKeyValueStore, StateError, StorageKey, Theme, MAX_PROGRESS,
};
use std::sync::{Arc, Mutex};

const NOW_MS: i64 = 1_718_000_000_000;

type MemoryManager =
    EntityStateManager<MemoryKeyValueStore, SqliteDocumentRepository, ClockIdGenerator<FixedClock>>;

fn open_with(kv: MemoryKeyValueStore) -> MemoryManager {
    EntityStateManager::open(
        kv,
        SqliteDocumentRepository::new(share(open_db_in_memory().unwrap())),
        ClockIdGenerator::new(FixedClock(NOW_MS)),
        SeedData::default(),
    )
}

fn open_empty() -> MemoryManager {
    open_with(MemoryKeyValueStore::new())
}

fn record_commits(manager: &mut MemoryManager) -> Arc<Mutex<Vec<StorageKey>>> {
    let commits = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&commits);
    manager.set_commit_listener(move |key| sink.lock().unwrap().push(key));
    commits
}

#[test]
fn empty_store_uses_defaults_and_writes_every_key() {
    let manager = open_empty();
    let seed = SeedData::default();

    assert!(!manager.is_logged_in());
    assert!(!manager.is_dark_mode());
    assert_eq!(manager.current_user(), &seed.people[5]);
    assert_eq!(manager.current_user().status, PersonStatus::Online);
    assert_eq!(manager.people(), seed.people.as_slice());
    assert_eq!(manager.projects(), seed.projects.as_slice());
    assert!(manager.documents().is_empty());
    assert!(!manager.documents_loaded());

    let store = manager.kv_store();
    let stored_keys = store.keys();
    for key in StorageKey::ALL {
        assert!(stored_keys.contains(&key.as_str().to_string()), "{key} not written");
    }
    assert!(!store.load(StorageKey::IsLoggedIn.as_str(), true));
}

#[test]
fn persisted_values_win_over_seed_defaults() {
    let kv = MemoryKeyValueStore::new();
    kv.save(StorageKey::Projects.as_str(), &Vec::<Project>::new());
    kv.save(StorageKey::IsDarkMode.as_str(), &true);

    let manager = open_with(kv);
    assert!(manager.projects().is_empty());
    assert!(manager.is_dark_mode());
    assert_eq!(manager.people(), SeedData::default().people.as_slice());
}

#[test]
fn corrupt_current_user_falls_back_to_default_identity() {
    let kv = MemoryKeyValueStore::new();
    kv.write_raw(StorageKey::CurrentUser.as_str(), "null").unwrap();
    kv.write_raw(StorageKey::People.as_str(), "[{\"broken\":").unwrap();

    let manager = open_with(kv);
    assert_eq!(manager.current_user(), &SeedData::default().people[5]);
    assert_eq!(manager.people(), SeedData::default().people.as_slice());

    let rewritten: Vec<Person> = manager
        .kv_store()
        .load(StorageKey::People.as_str(), Vec::new());
    assert_eq!(rewritten, SeedData::default().people);
}

#[test]
fn partial_persisted_settings_are_completed_on_load() {
    let kv = MemoryKeyValueStore::new();
    kv.write_raw(
        StorageKey::CurrentUser.as_str(),
        r#"{"id":"u-9","name":"Iris","email":"iris@x.org","settings":{"theme":"dark","notifications":{"email":false}}}"#,
    )
    .unwrap();

    let manager = open_with(kv);
    let settings = &manager.current_user().settings;
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.language, "pt-BR");
    assert_eq!(settings.timezone, "America/Sao_Paulo");
    assert!(!settings.notifications.email);
    assert!(settings.notifications.updates);
    assert!(!settings.privacy.show_phone);
}

#[test]
fn dark_mode_applies_when_stored_settings_have_no_theme() {
    let kv = MemoryKeyValueStore::new();
    kv.write_raw(
        StorageKey::CurrentUser.as_str(),
        r#"{"id":"u-7","name":"Lia","email":"lia@x.org","settings":{"language":"en-US"}}"#,
    )
    .unwrap();
    kv.save(StorageKey::IsDarkMode.as_str(), &true);

    let manager = open_with(kv);
    let settings = &manager.current_user().settings;
    assert!(manager.is_dark_mode());
    assert_eq!(settings.theme, Theme::Dark);
    assert_eq!(settings.language, "en-US");
    assert_eq!(settings.timezone, "America/Sao_Paulo");

    let stored: Person = manager
        .kv_store()
        .load(StorageKey::CurrentUser.as_str(), Person::new("", "", ""));
    assert_eq!(stored.settings.theme, Theme::Dark);
}

#[test]
fn stored_theme_still_wins_over_dark_mode_flag() {
    let kv = MemoryKeyValueStore::new();
    kv.write_raw(
        StorageKey::CurrentUser.as_str(),
        r#"{"id":"u-8","name":"Rui","email":"rui@x.org","settings":{"theme":"light"}}"#,
    )
    .unwrap();
    kv.save(StorageKey::IsDarkMode.as_str(), &true);

    let manager = open_with(kv);
    assert_eq!(manager.current_user().settings.theme, Theme::Light);
}

#[test]
fn project_progress_is_kept_within_range() {
    let kv = MemoryKeyValueStore::new();
    kv.write_raw(
        StorageKey::Projects.as_str(),
        r#"[{"id":1,"name":"A","status":"Planned","progress":250}]"#,
    )
    .unwrap();

    let mut manager = open_with(kv);
    assert_eq!(manager.projects()[0].progress, MAX_PROGRESS);

    let mut project = manager.projects()[0].clone();
    project.progress = 180;
    manager.update_project(&project);
    assert_eq!(manager.projects()[0].progress, MAX_PROGRESS);

    let stored: Vec<Project> = manager
        .kv_store()
        .load(StorageKey::Projects.as_str(), Vec::new());
    assert_eq!(stored[0].progress, MAX_PROGRESS);
}

#[test]
fn add_project_starts_at_zero_progress_with_generated_id() {
    let mut manager = open_empty();
    let before = manager.projects().len();

    let created = manager.add_project(NewProject::new("X", ProjectStatus::Planned));

    assert_eq!(created.id, NOW_MS);
    assert_eq!(created.progress, 0);
    assert_eq!(created.status, ProjectStatus::Planned);
    assert_eq!(manager.projects().len(), before + 1);

    let stored: Vec<Project> = manager
        .kv_store()
        .load(StorageKey::Projects.as_str(), Vec::new());
    assert_eq!(stored.last(), Some(&created));
}

#[test]
fn same_millisecond_creations_collide_and_update_hits_both() {
    let mut manager = open_empty();
    let first = manager.add_project(NewProject::new("A", ProjectStatus::Planned));
    let second = manager.add_project(NewProject::new("B", ProjectStatus::Planned));
    assert_eq!(first.id, second.id);

    manager.set_project_status(first.id, ProjectStatus::Completed);
    let completed = manager
        .projects()
        .iter()
        .filter(|project| project.id == NOW_MS && project.status == ProjectStatus::Completed)
        .count();
    assert_eq!(completed, 2);
}

#[test]
fn update_project_replaces_by_id_and_writes_through() {
    let mut manager = open_empty();
    let mut project = manager.projects()[0].clone();
    project.progress = 75;
    manager.update_project(&project);

    assert_eq!(manager.projects()[0].progress, 75);
    let stored: Vec<Project> = manager
        .kv_store()
        .load(StorageKey::Projects.as_str(), Vec::new());
    assert_eq!(stored[0].progress, 75);
}

#[test]
fn dismiss_notification_removes_entity_and_updates_unread_count() {
    let mut manager = open_empty();
    let size = manager.notifications().len();
    let unread = manager.unread_count();
    let target = manager
        .notifications()
        .iter()
        .find(|notification| !notification.read)
        .unwrap()
        .id
        .clone();

    manager.dismiss_notification(&target);

    assert_eq!(manager.notifications().len(), size - 1);
    assert!(manager.notifications().iter().all(|n| n.id != target));
    assert_eq!(manager.unread_count(), unread - 1);

    let stored: Vec<Notification> = manager
        .kv_store()
        .load(StorageKey::Notifications.as_str(), Vec::new());
    assert_eq!(stored.as_slice(), manager.notifications());

    manager.dismiss_all_notifications();
    assert!(manager.notifications().is_empty());
    assert_eq!(manager.unread_count(), 0);
    let stored: Vec<Notification> = manager
        .kv_store()
        .load(StorageKey::Notifications.as_str(), vec![Notification::new("x", "x", false)]);
    assert!(stored.is_empty());
}

#[test]
fn each_mutation_commits_only_its_own_key() {
    let mut manager = open_empty();
    let commits = record_commits(&mut manager);

    manager.dismiss_all_notifications();
    let event = manager.add_event(NewSocialEvent::new("Churrasco", "2025-08-01"));
    manager.delete_event(event.id);
    manager.toggle_sidebar();
    manager.edit_current_user();

    assert_eq!(
        *commits.lock().unwrap(),
        vec![
            StorageKey::Notifications,
            StorageKey::Events,
            StorageKey::Events
        ]
    );
}

#[test]
fn theme_toggle_flips_dark_mode_but_keeps_previous_settings_theme() {
    let kv = MemoryKeyValueStore::new();
    let mut user = SeedData::default().people[5].clone();
    user.settings.theme = Theme::Dark;
    kv.save(StorageKey::CurrentUser.as_str(), &user);
    kv.save(StorageKey::IsDarkMode.as_str(), &true);

    let mut manager = open_with(kv);
    let commits = record_commits(&mut manager);
    manager.toggle_dark_mode();

    assert!(!manager.is_dark_mode());
    assert_eq!(manager.theme(), Theme::Light);
    assert_eq!(manager.current_user().settings.theme, Theme::Dark);
    assert_eq!(
        *commits.lock().unwrap(),
        vec![StorageKey::IsDarkMode, StorageKey::CurrentUser]
    );

    let stored: Person = manager
        .kv_store()
        .load(StorageKey::CurrentUser.as_str(), Person::new("", "", ""));
    assert_eq!(stored.settings.theme, Theme::Dark);
    assert!(!manager
        .kv_store()
        .load(StorageKey::IsDarkMode.as_str(), true));
}

#[test]
fn set_theme_to_current_mode_does_not_rewrite_dark_mode() {
    let mut manager = open_empty();
    let commits = record_commits(&mut manager);

    manager.set_theme(Theme::Light);
    manager.set_theme(Theme::Dark);

    assert!(manager.is_dark_mode());
    assert_eq!(
        *commits.lock().unwrap(),
        vec![
            StorageKey::CurrentUser,
            StorageKey::IsDarkMode,
            StorageKey::CurrentUser
        ]
    );
}

#[test]
fn failed_write_keeps_memory_state_and_previous_stored_value() {
    let kv = MemoryKeyValueStore::with_capacity_bytes(64 * 1024);
    let mut manager = open_with(kv);
    let stored_before: Vec<Notification> = manager
        .kv_store()
        .load(StorageKey::Notifications.as_str(), Vec::new());

    let mut people = manager.people().to_vec();
    for index in 0..2_000 {
        people.push(Person::new(
            format!("bulk-{index}"),
            "Bulk Person",
            format!("bulk{index}@celebre.com"),
        ));
    }
    manager.set_people(people);
    assert_eq!(manager.people().len(), SeedData::default().people.len() + 2_000);

    let stored_people: Vec<Person> = manager
        .kv_store()
        .load(StorageKey::People.as_str(), Vec::new());
    assert_eq!(stored_people, SeedData::default().people);

    let stored_after: Vec<Notification> = manager
        .kv_store()
        .load(StorageKey::Notifications.as_str(), Vec::new());
    assert_eq!(stored_after, stored_before);
}

#[tokio::test]
async fn documents_stay_empty_until_loaded() {
    let conn = share(open_db_in_memory().unwrap());
    let seeded = SqliteDocumentRepository::new(conn.clone());
    seeded
        .insert_many(vec![NewDocument::new("manual.pdf", "pdf", "Bruno Lima")])
        .await
        .unwrap();

    let mut manager = EntityStateManager::open(
        MemoryKeyValueStore::new(),
        SqliteDocumentRepository::new(conn),
        ClockIdGenerator::new(FixedClock(NOW_MS)),
        SeedData::default(),
    );
    assert!(manager.documents().is_empty());

    let count = manager.load_documents().await.unwrap();
    assert_eq!(count, 1);
    assert!(manager.documents_loaded());
    assert_eq!(manager.documents()[0].name, "manual.pdf");
}

#[tokio::test]
async fn only_imported_documents_survive_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    {
        let conn = share(open_db(&path).unwrap());
        let mut manager = EntityStateManager::open(
            SqliteKeyValueStore::new(conn.clone()),
            SqliteDocumentRepository::new(conn),
            ClockIdGenerator::new(FixedClock(NOW_MS)),
            SeedData::default(),
        );
        manager.load_documents().await.unwrap();

        let imported = manager
            .import_documents(vec![NewDocument::new("imported.pdf", "pdf", "Ana Souza")])
            .await
            .unwrap();
        let added = manager.add_document(NewDocument::new("local.docx", "docx", "Ana Souza"));
        assert_eq!(added.id, NOW_MS);
        manager.append_documents(vec![NewDocument::new("batch.xlsx", "xlsx", "Ana").with_id(9)]);

        let mut renamed = imported[0].clone();
        renamed.name = "renamed.pdf".to_string();
        manager.update_document(&renamed);
        assert_eq!(manager.documents().len(), 3);
        assert_eq!(manager.documents()[0].name, "renamed.pdf");
    }

    let conn = share(open_db(&path).unwrap());
    let mut reopened = EntityStateManager::open(
        SqliteKeyValueStore::new(conn.clone()),
        SqliteDocumentRepository::new(conn),
        ClockIdGenerator::new(FixedClock(NOW_MS)),
        SeedData::default(),
    );
    reopened.load_documents().await.unwrap();

    let names = reopened
        .documents()
        .iter()
        .map(|document| document.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["imported.pdf"]);
}

#[tokio::test]
async fn delete_document_is_mirror_only() {
    let conn = share(open_db_in_memory().unwrap());
    let mut manager = EntityStateManager::open(
        MemoryKeyValueStore::new(),
        SqliteDocumentRepository::new(conn),
        ClockIdGenerator::new(FixedClock(NOW_MS)),
        SeedData::default(),
    );
    let imported = manager
        .import_documents(vec![NewDocument::new("a.pdf", "pdf", "Ana")])
        .await
        .unwrap();

    manager.delete_document(imported[0].id);

    assert!(manager.documents().is_empty());
    let persisted = manager.document_repository().fetch_all().await.unwrap();
    assert_eq!(persisted, imported);
}

struct FailingRepository;

#[async_trait]
impl DocumentRepository for FailingRepository {
    async fn fetch_all(&self) -> RepoResult<Vec<Document>> {
        Err(RepoError::InvalidData("store unavailable".to_string()))
    }

    async fn insert_many(&self, _documents: Vec<NewDocument>) -> RepoResult<Vec<Document>> {
        Err(RepoError::InvalidData("store unavailable".to_string()))
    }

    async fn update(&self, document: &Document) -> RepoResult<()> {
        Err(RepoError::NotFound(document.id))
    }

    async fn remove(&self, id: DocumentId) -> RepoResult<()> {
        Err(RepoError::NotFound(id))
    }
}

#[tokio::test]
async fn repository_failures_reject_and_leave_mirror_untouched() {
    let mut manager = EntityStateManager::open(
        MemoryKeyValueStore::new(),
        FailingRepository,
        ClockIdGenerator::new(FixedClock(NOW_MS)),
        SeedData::default(),
    );
    manager.add_document(NewDocument::new("local.pdf", "pdf", "Ana"));

    let load_err = manager.load_documents().await.unwrap_err();
    assert!(matches!(load_err, StateError::Repo(RepoError::InvalidData(_))));
    assert!(!manager.documents_loaded());

    let import_err = manager
        .import_documents(vec![NewDocument::new("x.pdf", "pdf", "Ana")])
        .await
        .unwrap_err();
    assert!(matches!(import_err, StateError::Repo(_)));
    assert_eq!(manager.documents().len(), 1);
}
