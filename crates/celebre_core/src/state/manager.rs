//! Entity state manager.
//!
//! # Responsibility
//! - Load tracked keys fail-open at startup and commit them once.
//! - Expose typed mutations for every collection and the session.
//! - Keep the document mirror in step with the repository on the paths that
//!   use it.
//!
//! # Invariants
//! - Every mutation of a tracked key ends with `commit` for that key.
//! - Documents start empty and are only filled by `load_documents`.
//! - Repository failures leave the document mirror unchanged.

use crate::ids::{ClockIdGenerator, IdGenerator};
use crate::model::document::{Document, DocumentId, NewDocument};
use crate::model::event::{EventId, NewSocialEvent, SocialEvent};
use crate::model::notification::{unread_count, Notification};
use crate::model::person::{Person, StoredPerson};
use crate::model::project::{NewProject, Project, ProjectId, ProjectStatus};
use crate::model::settings::{SettingsPatch, Theme};
use crate::repo::document_repo::{DocumentRepository, RepoError};
use crate::seed::SeedData;
use crate::service::auth_service::{AuthSessionManager, Credentials, LoginUser, SessionState};
use crate::service::settings_merge::{theme_overlay, theme_overlay_patch};
use crate::state::transitions;
use crate::state::ui::{Page, UiState};
use crate::store::keys::StorageKey;
use crate::store::kv_store::KeyValueStore;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type StateResult<T> = Result<T, StateError>;

/// Failure of a state operation that reached the document repository.
#[derive(Debug)]
pub enum StateError {
    Repo(RepoError),
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for StateError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Document entry points exposed by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOperation {
    Load,
    Import,
    Add,
    Append,
    Update,
    Delete,
}

/// Where a document entry point writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentWritePath {
    /// Goes through `DocumentRepository`; survives a reload.
    Repository,
    /// Changes the in-memory mirror only; lost on reload.
    MirrorOnly,
}

impl DocumentOperation {
    pub fn write_path(self) -> DocumentWritePath {
        match self {
            Self::Load | Self::Import => DocumentWritePath::Repository,
            Self::Add | Self::Append | Self::Update | Self::Delete => DocumentWritePath::MirrorOnly,
        }
    }
}

/// Immutable view of all entity state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    pub is_logged_in: bool,
    pub current_user: Person,
    pub is_dark_mode: bool,
    pub people: Arc<[Person]>,
    pub projects: Arc<[Project]>,
    pub notifications: Arc<[Notification]>,
    pub events: Arc<[SocialEvent]>,
    pub documents: Arc<[Document]>,
}

type CommitListener = Box<dyn FnMut(StorageKey) + Send>;

/// Owner of the in-memory model and its write-through to storage.
pub struct EntityStateManager<S, R, G = ClockIdGenerator>
where
    S: KeyValueStore,
    R: DocumentRepository,
    G: IdGenerator,
{
    kv: S,
    documents_repo: R,
    ids: G,
    auth: AuthSessionManager,
    state: StateSnapshot,
    ui: UiState,
    documents_loaded: bool,
    commit_listener: Option<CommitListener>,
}

impl<S, R, G> EntityStateManager<S, R, G>
where
    S: KeyValueStore,
    R: DocumentRepository,
    G: IdGenerator,
{
    /// Loads every tracked key (falling back to `seed`), then commits them.
    ///
    /// # Side effects
    /// - Writes all tracked keys once, replacing undecodable stored values
    ///   with their defaults.
    /// - Applies the theme overlay to the current user, using only the
    ///   settings keys that were actually stored.
    pub fn open(kv: S, documents_repo: R, ids: G, seed: SeedData) -> Self {
        let auth = AuthSessionManager::new(Credentials::from_roster(&seed.people));

        let is_logged_in = kv.load(StorageKey::IsLoggedIn.as_str(), false);
        let stored_user: Option<StoredPerson> = kv.load(StorageKey::CurrentUser.as_str(), None);
        let is_dark_mode = kv.load(StorageKey::IsDarkMode.as_str(), false);
        let people: Vec<Person> = kv.load(StorageKey::People.as_str(), seed.people);
        let projects: Vec<Project> = kv.load(StorageKey::Projects.as_str(), seed.projects);
        let notifications: Vec<Notification> =
            kv.load(StorageKey::Notifications.as_str(), seed.notifications);
        let events: Vec<SocialEvent> = kv.load(StorageKey::Events.as_str(), seed.events);

        // Only settings keys present in storage survive the overlay.
        let (mut current_user, previous_settings) = match stored_user {
            Some(stored) => (stored.person, stored.stored_settings),
            None => {
                let person = auth.login_default();
                let settings = SettingsPatch::from(&person.settings);
                (person, settings)
            }
        };
        current_user.settings =
            theme_overlay_patch(Theme::from_dark_mode(is_dark_mode), &previous_settings);

        let mut manager = Self {
            kv,
            documents_repo,
            ids,
            auth,
            state: StateSnapshot {
                is_logged_in,
                current_user,
                is_dark_mode,
                people: Arc::from(people),
                projects: Arc::from(projects),
                notifications: Arc::from(notifications),
                events: Arc::from(events),
                documents: Arc::from(Vec::new()),
            },
            ui: UiState::default(),
            documents_loaded: false,
            commit_listener: None,
        };

        for key in StorageKey::ALL {
            manager.commit(key);
        }

        info!(
            "event=state_open module=state status=ok logged_in={} people={} projects={} notifications={} events={}",
            manager.state.is_logged_in,
            manager.state.people.len(),
            manager.state.projects.len(),
            manager.state.notifications.len(),
            manager.state.events.len()
        );
        manager
    }

    /// Registers a callback invoked after every commit, with the key written.
    pub fn set_commit_listener(&mut self, listener: impl FnMut(StorageKey) + Send + 'static) {
        self.commit_listener = Some(Box::new(listener));
    }

    /// Writes the current snapshot of `key` to the key-value store.
    ///
    /// Every mutation calls this for each key it replaced. Write failures are
    /// absorbed by the store.
    pub fn commit(&mut self, key: StorageKey) {
        let name = key.as_str();
        match key {
            StorageKey::IsLoggedIn => self.kv.save(name, &self.state.is_logged_in),
            StorageKey::CurrentUser => self.kv.save(name, &self.state.current_user),
            StorageKey::IsDarkMode => self.kv.save(name, &self.state.is_dark_mode),
            StorageKey::People => self.kv.save(name, &*self.state.people),
            StorageKey::Projects => self.kv.save(name, &*self.state.projects),
            StorageKey::Notifications => self.kv.save(name, &*self.state.notifications),
            StorageKey::Events => self.kv.save(name, &*self.state.events),
        }
        debug!("event=state_commit module=state key={name}");

        if let Some(listener) = self.commit_listener.as_mut() {
            listener(key);
        }
    }

    // Read side.

    pub fn snapshot(&self) -> StateSnapshot {
        self.state.clone()
    }

    pub fn session_state(&self) -> SessionState {
        SessionState::from_flag(self.state.is_logged_in)
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in
    }

    pub fn current_user(&self) -> &Person {
        &self.state.current_user
    }

    pub fn is_dark_mode(&self) -> bool {
        self.state.is_dark_mode
    }

    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.state.is_dark_mode)
    }

    pub fn people(&self) -> &[Person] {
        &self.state.people
    }

    pub fn projects(&self) -> &[Project] {
        &self.state.projects
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    pub fn unread_count(&self) -> usize {
        unread_count(&self.state.notifications)
    }

    pub fn events(&self) -> &[SocialEvent] {
        &self.state.events
    }

    pub fn documents(&self) -> &[Document] {
        &self.state.documents
    }

    /// Whether `load_documents` has completed at least once.
    pub fn documents_loaded(&self) -> bool {
        self.documents_loaded
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn auth(&self) -> &AuthSessionManager {
        &self.auth
    }

    pub fn kv_store(&self) -> &S {
        &self.kv
    }

    pub fn document_repository(&self) -> &R {
        &self.documents_repo
    }

    // Projects.

    /// Creates a project with a generated id and zero progress.
    pub fn add_project(&mut self, input: NewProject) -> Project {
        let id = self.ids.generate();
        let next = transitions::add_project(&self.state.projects, input, id);
        let created = next[next.len() - 1].clone();
        self.state.projects = Arc::from(next);
        self.commit(StorageKey::Projects);
        created
    }

    pub fn update_project(&mut self, project: &Project) {
        self.state.projects = Arc::from(transitions::update_project(&self.state.projects, project));
        self.commit(StorageKey::Projects);
    }

    pub fn set_project_status(&mut self, id: ProjectId, status: ProjectStatus) {
        self.state.projects = Arc::from(transitions::set_project_status(
            &self.state.projects,
            id,
            status,
        ));
        self.commit(StorageKey::Projects);
    }

    // Notifications.

    pub fn dismiss_notification(&mut self, id: &str) {
        self.state.notifications = Arc::from(transitions::dismiss_notification(
            &self.state.notifications,
            id,
        ));
        self.commit(StorageKey::Notifications);
    }

    pub fn dismiss_all_notifications(&mut self) {
        self.state.notifications = Arc::from(Vec::new());
        self.commit(StorageKey::Notifications);
    }

    // Events.

    pub fn add_event(&mut self, input: NewSocialEvent) -> SocialEvent {
        let id = self.ids.generate();
        let next = transitions::add_event(&self.state.events, input, id);
        let created = next[next.len() - 1].clone();
        self.state.events = Arc::from(next);
        self.commit(StorageKey::Events);
        created
    }

    pub fn delete_event(&mut self, id: EventId) {
        self.state.events = Arc::from(transitions::delete_event(&self.state.events, id));
        self.commit(StorageKey::Events);
    }

    // People and the current user.

    /// Replaces the current user wholesale (profile editor save).
    pub fn update_user(&mut self, user: Person) {
        self.state.current_user = user;
        self.commit(StorageKey::CurrentUser);
    }

    /// Replaces the person with the same id in the roster.
    pub fn update_person(&mut self, person: &Person) {
        self.state.people = Arc::from(transitions::update_person(&self.state.people, person));
        self.commit(StorageKey::People);
    }

    pub fn set_people(&mut self, people: Vec<Person>) {
        self.state.people = Arc::from(people);
        self.commit(StorageKey::People);
    }

    // Theme.

    /// Flips dark mode and re-applies the settings overlay.
    pub fn toggle_dark_mode(&mut self) {
        self.state.is_dark_mode = !self.state.is_dark_mode;
        self.commit(StorageKey::IsDarkMode);
        self.apply_theme_overlay(self.theme());
    }

    /// Selects a theme explicitly (header theme switch).
    pub fn set_theme(&mut self, theme: Theme) {
        if self.state.is_dark_mode != theme.is_dark() {
            self.state.is_dark_mode = theme.is_dark();
            self.commit(StorageKey::IsDarkMode);
        }
        self.apply_theme_overlay(theme);
    }

    fn apply_theme_overlay(&mut self, selected: Theme) {
        self.state.current_user.settings =
            theme_overlay(selected, &self.state.current_user.settings);
        self.commit(StorageKey::CurrentUser);
    }

    // Session.

    /// Logs `user` in, preferring the canonical roster person with the same
    /// email.
    pub fn login(&mut self, user: Person) -> LoginUser {
        let resolved = self.auth.resolve(user);
        self.state.current_user = resolved.person().clone();
        self.state.is_logged_in = true;
        self.ui.reset_for_login();
        self.commit(StorageKey::IsLoggedIn);
        self.commit(StorageKey::CurrentUser);

        info!(
            "event=auth_login module=state status=ok known_user={}",
            resolved.is_known()
        );
        resolved
    }

    /// Logs out and installs the inactive default identity.
    pub fn logout(&mut self) {
        self.state.is_logged_in = false;
        self.state.current_user = self.auth.logout_default();
        self.ui.reset_for_logout();
        self.commit(StorageKey::IsLoggedIn);
        self.commit(StorageKey::CurrentUser);

        info!("event=auth_logout module=state status=ok");
    }

    // Documents.

    /// Replaces the document mirror with the repository contents.
    pub async fn load_documents(&mut self) -> StateResult<usize> {
        let documents = self.documents_repo.fetch_all().await?;
        let count = documents.len();
        self.state.documents = Arc::from(documents);
        self.documents_loaded = true;
        info!("event=documents_load module=state status=ok count={count}");
        Ok(count)
    }

    /// Persists new documents and mirrors them with their assigned ids.
    pub async fn import_documents(
        &mut self,
        documents: Vec<NewDocument>,
    ) -> StateResult<Vec<Document>> {
        let stored = self.documents_repo.insert_many(documents).await?;
        self.state.documents = Arc::from(transitions::append_documents(
            &self.state.documents,
            stored.clone(),
        ));
        Ok(stored)
    }

    /// Adds one document to the mirror with a generated id. Not persisted.
    pub fn add_document(&mut self, document: NewDocument) -> Document {
        let created = document.with_id(self.ids.generate());
        self.state.documents = Arc::from(transitions::append_documents(
            &self.state.documents,
            vec![created.clone()],
        ));
        created
    }

    /// Appends already-identified documents to the mirror. Not persisted.
    pub fn append_documents(&mut self, documents: Vec<Document>) {
        self.state.documents = Arc::from(transitions::append_documents(
            &self.state.documents,
            documents,
        ));
    }

    /// Replaces a mirrored document by id. Not persisted.
    pub fn update_document(&mut self, document: &Document) {
        self.state.documents = Arc::from(transitions::update_document(
            &self.state.documents,
            document,
        ));
    }

    /// Removes a mirrored document by id. Not persisted.
    pub fn delete_document(&mut self, id: DocumentId) {
        self.state.documents = Arc::from(transitions::delete_document(&self.state.documents, id));
    }

    // Transient UI state.

    pub fn set_active_page(&mut self, page: Page) {
        self.ui.active_page = page;
    }

    pub fn toggle_sidebar(&mut self) {
        self.ui.sidebar_open = !self.ui.sidebar_open;
    }

    pub fn close_sidebar(&mut self) {
        self.ui.sidebar_open = false;
    }

    pub fn toggle_notifications_panel(&mut self) {
        self.ui.notifications_open = !self.ui.notifications_open;
    }

    pub fn close_notifications_panel(&mut self) {
        self.ui.notifications_open = false;
    }

    pub fn edit_person(&mut self, person: Person) {
        self.ui.person_to_edit = Some(person);
    }

    pub fn edit_current_user(&mut self) {
        self.ui.person_to_edit = Some(self.state.current_user.clone());
    }

    pub fn clear_person_to_edit(&mut self) {
        self.ui.person_to_edit = None;
    }
}
