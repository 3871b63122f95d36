//! Core state and persistence layer for Celebre.
//! This crate is the single source of truth for entity state invariants.

pub mod config;
pub mod db;
pub mod ids;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use ids::{Clock, ClockIdGenerator, FixedClock, IdGenerator, SystemClock};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::document::{Document, DocumentId, NewDocument};
pub use model::event::{EventId, NewSocialEvent, SocialEvent};
pub use model::notification::{Notification, NotificationId};
pub use model::person::{Person, PersonId, PersonStatus, StoredPerson};
pub use model::project::{NewProject, Project, ProjectId, ProjectStatus, MAX_PROGRESS};
pub use model::settings::{
    NotificationPrefs, NotificationPrefsPatch, PrivacyPatch, PrivacySettings, ProfileVisibility,
    Settings, SettingsPatch, Theme,
};
pub use repo::document_repo::{
    DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository,
};
pub use seed::SeedData;
pub use service::auth_service::{AuthSessionManager, Credentials, LoginUser, SessionState};
pub use state::manager::{
    DocumentOperation, DocumentWritePath, EntityStateManager, StateError, StateResult,
    StateSnapshot,
};
pub use state::ui::{Page, UiState};
pub use store::keys::StorageKey;
pub use store::kv_store::{
    KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore,
};

/// State manager wired to the SQLite stores and the wall-clock id generator.
pub type SqliteStateManager =
    EntityStateManager<SqliteKeyValueStore, SqliteDocumentRepository, ClockIdGenerator>;

/// Opens both stores on one database file and loads the session state.
///
/// Documents are not loaded; call `load_documents` once the host's async
/// runtime is available.
pub fn open_session(config: &CoreConfig, seed: SeedData) -> db::DbResult<SqliteStateManager> {
    let conn = db::share(db::open_db(config.resolve_db_path())?);
    Ok(EntityStateManager::open(
        SqliteKeyValueStore::new(conn.clone()),
        SqliteDocumentRepository::new(conn),
        ClockIdGenerator::system(),
        seed,
    ))
}

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
