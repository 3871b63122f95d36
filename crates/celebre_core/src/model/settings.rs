//! User settings model and its partial patch shape.
//!
//! # Responsibility
//! - Define the complete `Settings` record stored on every `Person`.
//! - Define `SettingsPatch`, the all-optional shape used for merges and for
//!   decoding persisted settings.
//!
//! # Invariants
//! - `Settings` deserialization always goes through `SettingsPatch` merged
//!   over `Settings::default()`, so missing keys are never observable.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "pt-BR";
pub const DEFAULT_TIMEZONE: &str = "America/Sao_Paulo";

/// Color scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Maps the dark-mode flag to its theme.
    pub fn from_dark_mode(is_dark_mode: bool) -> Self {
        if is_dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Who may see a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    #[default]
    Public,
    Team,
    Private,
}

/// Per-channel notification switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub email: bool,
    pub push: bool,
    pub desktop: bool,
    pub mentions: bool,
    pub news: bool,
    pub updates: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            email: true,
            push: true,
            desktop: true,
            mentions: true,
            news: true,
            updates: true,
        }
    }
}

/// Profile privacy switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    pub show_email: bool,
    pub show_phone: bool,
    pub show_birthday: bool,
    pub show_activity: bool,
    pub profile_visibility: ProfileVisibility,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            show_email: true,
            show_phone: false,
            show_birthday: true,
            show_activity: true,
            profile_visibility: ProfileVisibility::Public,
        }
    }
}

/// Complete settings record attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SettingsPatch")]
pub struct Settings {
    pub theme: Theme,
    pub language: String,
    pub timezone: String,
    pub notifications: NotificationPrefs,
    pub privacy: PrivacySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            notifications: NotificationPrefs::default(),
            privacy: PrivacySettings::default(),
        }
    }
}

impl Settings {
    /// Default settings with the given theme.
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}

/// Partial notification switches; `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPrefsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desktop: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mentions: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates: Option<bool>,
}

/// Partial privacy switches; `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrivacyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_phone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_birthday: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_activity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_visibility: Option<ProfileVisibility>,
}

/// Partial settings object.
///
/// This is also the wire shape for reading persisted settings, which may have
/// been written by older builds with fewer keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationPrefsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacyPatch>,
}

impl From<&NotificationPrefs> for NotificationPrefsPatch {
    fn from(value: &NotificationPrefs) -> Self {
        Self {
            email: Some(value.email),
            push: Some(value.push),
            desktop: Some(value.desktop),
            mentions: Some(value.mentions),
            news: Some(value.news),
            updates: Some(value.updates),
        }
    }
}

impl From<&PrivacySettings> for PrivacyPatch {
    fn from(value: &PrivacySettings) -> Self {
        Self {
            show_email: Some(value.show_email),
            show_phone: Some(value.show_phone),
            show_birthday: Some(value.show_birthday),
            show_activity: Some(value.show_activity),
            profile_visibility: Some(value.profile_visibility),
        }
    }
}

/// Fully specified patch carrying every field of `value`.
impl From<&Settings> for SettingsPatch {
    fn from(value: &Settings) -> Self {
        Self {
            theme: Some(value.theme),
            language: Some(value.language.clone()),
            timezone: Some(value.timezone.clone()),
            notifications: Some(NotificationPrefsPatch::from(&value.notifications)),
            privacy: Some(PrivacyPatch::from(&value.privacy)),
        }
    }
}
