//! Person domain model.
//!
//! # Invariants
//! - `id` is unique within the people collection.
//! - `settings` is always complete; a stored person without settings
//!   decodes with `Settings::default()`.

use crate::model::settings::{Settings, SettingsPatch};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a person. Stored as a string to match the roster source.
pub type PersonId = String;

/// Presence state shown next to a person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonStatus {
    #[default]
    Online,
    Away,
    Offline,
    Inactive,
}

/// One member of the organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub birth_date: String,
    #[serde(default)]
    pub status: PersonStatus,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub settings: Settings,
}

impl Person {
    /// Creates a person with empty profile fields and default settings.
    pub fn new(
        id: impl Into<PersonId>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: String::new(),
            phone: String::new(),
            avatar_url: String::new(),
            join_date: String::new(),
            birth_date: String::new(),
            status: PersonStatus::Online,
            department: String::new(),
            settings: Settings::default(),
        }
    }

    /// Returns a copy with `status` replaced.
    pub fn with_status(mut self, status: PersonStatus) -> Self {
        self.status = status;
        self
    }
}

/// A stored person together with the settings keys that were actually
/// persisted.
///
/// `Person` completes missing settings with defaults while decoding; theme
/// changes need to know which keys were present before that happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPerson {
    pub person: Person,
    pub stored_settings: SettingsPatch,
}

impl<'de> Deserialize<'de> for StoredPerson {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let stored_settings = match value.get("settings") {
            Some(raw) => SettingsPatch::deserialize(raw).map_err(D::Error::custom)?,
            None => SettingsPatch::default(),
        };
        let person = Person::deserialize(value).map_err(D::Error::custom)?;
        Ok(Self {
            person,
            stored_settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::StoredPerson;
    use crate::model::settings::{Theme, DEFAULT_TIMEZONE};

    #[test]
    fn stored_person_keeps_only_persisted_settings_keys() {
        let stored: StoredPerson = serde_json::from_str(
            r#"{"id":"u-1","name":"Iris","email":"iris@x.org","settings":{"language":"en-US"}}"#,
        )
        .unwrap();

        assert_eq!(stored.stored_settings.theme, None);
        assert_eq!(stored.stored_settings.language.as_deref(), Some("en-US"));
        assert_eq!(stored.person.settings.theme, Theme::Light);
        assert_eq!(stored.person.settings.timezone, DEFAULT_TIMEZONE);
    }

    #[test]
    fn person_without_settings_has_empty_stored_settings() {
        let stored: StoredPerson =
            serde_json::from_str(r#"{"id":"u-2","name":"Rui","email":"rui@x.org"}"#).unwrap();
        assert_eq!(stored.stored_settings, Default::default());
    }

    #[test]
    fn invalid_person_is_rejected() {
        assert!(serde_json::from_str::<StoredPerson>(r#"{"settings":{}}"#).is_err());
        assert!(serde_json::from_str::<StoredPerson>("null").is_err());
    }
}
