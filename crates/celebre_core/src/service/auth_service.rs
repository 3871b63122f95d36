//! Login/logout session rules.
//!
//! # Responsibility
//! - Derive the credentials roster once at startup.
//! - Resolve login input to a known roster person or an ad-hoc user.
//! - Provide the fixed default identities used at startup and on logout.
//!
//! # Invariants
//! - Login lookup matches the roster by exact email.
//! - The logout identity always carries `PersonStatus::Inactive`; the
//!   startup identity carries `PersonStatus::Online` unless the roster says
//!   otherwise.
//! - Credential verification is not performed here.

use crate::model::person::{Person, PersonStatus};
use crate::seed::{fallback_identity, DEFAULT_IDENTITY_INDEX};

/// Authentication state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

impl SessionState {
    pub fn from_flag(is_logged_in: bool) -> Self {
        if is_logged_in {
            Self::LoggedIn
        } else {
            Self::LoggedOut
        }
    }

    pub fn is_logged_in(self) -> bool {
        self == Self::LoggedIn
    }
}

/// Login input after roster lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginUser {
    /// Canonical roster person whose email matched the input.
    KnownUser(Person),
    /// Input accepted as-is because no roster email matched.
    AdHocUser(Person),
}

impl LoginUser {
    pub fn person(&self) -> &Person {
        match self {
            Self::KnownUser(person) | Self::AdHocUser(person) => person,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::KnownUser(_))
    }
}

/// Roster snapshot used for login lookup. Derived once per process.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    roster: Vec<Person>,
}

impl Credentials {
    pub fn from_roster(roster: &[Person]) -> Self {
        Self {
            roster: roster.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Finds the canonical person with exactly this email.
    pub fn find_by_email(&self, email: &str) -> Option<&Person> {
        self.roster.iter().find(|person| person.email == email)
    }

    fn default_base(&self) -> Option<&Person> {
        self.roster.get(DEFAULT_IDENTITY_INDEX)
    }
}

/// Session transition rules over a credentials roster.
#[derive(Debug, Clone, Default)]
pub struct AuthSessionManager {
    credentials: Credentials,
}

impl AuthSessionManager {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Resolves login input against the roster.
    pub fn resolve(&self, user: Person) -> LoginUser {
        match self.credentials.find_by_email(&user.email) {
            Some(known) => LoginUser::KnownUser(known.clone()),
            None => LoginUser::AdHocUser(user),
        }
    }

    /// Identity used when nothing usable is persisted.
    pub fn login_default(&self) -> Person {
        self.credentials
            .default_base()
            .cloned()
            .unwrap_or_else(|| fallback_identity(PersonStatus::Online))
    }

    /// Identity installed by logout.
    pub fn logout_default(&self) -> Person {
        match self.credentials.default_base() {
            Some(base) => base.clone().with_status(PersonStatus::Inactive),
            None => fallback_identity(PersonStatus::Inactive),
        }
    }
}
