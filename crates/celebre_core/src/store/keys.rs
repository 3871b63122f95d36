//! Keys tracked by the state layer in the key-value store.

use std::fmt::{Display, Formatter};

/// One independently persisted slot of application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    IsLoggedIn,
    CurrentUser,
    IsDarkMode,
    People,
    Projects,
    Notifications,
    Events,
}

impl StorageKey {
    /// Every tracked key, in startup load order.
    pub const ALL: [StorageKey; 7] = [
        StorageKey::IsLoggedIn,
        StorageKey::CurrentUser,
        StorageKey::IsDarkMode,
        StorageKey::People,
        StorageKey::Projects,
        StorageKey::Notifications,
        StorageKey::Events,
    ];

    /// Stored key name. These strings are part of the on-disk format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IsLoggedIn => "isLoggedIn",
            Self::CurrentUser => "currentUser",
            Self::IsDarkMode => "isDarkMode",
            Self::People => "people",
            Self::Projects => "projects",
            Self::Notifications => "notifications",
            Self::Events => "events",
        }
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
