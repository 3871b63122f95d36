//! Settings merge rules.
//!
//! # Responsibility
//! - Deep-merge a partial `SettingsPatch` over a complete `Settings`.
//! - Build the settings value written by theme changes.
//!
//! # Invariants
//! - Merge results are always complete `Settings` values.
//! - Nested `notifications`/`privacy` fields absent from a patch keep the
//!   base value field by field.
//! - Theme changes overlay the previous settings on top of the freshly
//!   computed candidate, so any field the previous settings carry wins,
//!   `theme` included.

use crate::model::settings::{
    NotificationPrefs, NotificationPrefsPatch, PrivacyPatch, PrivacySettings, Settings,
    SettingsPatch, Theme,
};

/// Deep-merges `patch` over `base`.
pub fn merge(base: &Settings, patch: &SettingsPatch) -> Settings {
    Settings {
        theme: patch.theme.unwrap_or(base.theme),
        language: patch
            .language
            .clone()
            .unwrap_or_else(|| base.language.clone()),
        timezone: patch
            .timezone
            .clone()
            .unwrap_or_else(|| base.timezone.clone()),
        notifications: match &patch.notifications {
            Some(nested) => merge_notifications(&base.notifications, nested),
            None => base.notifications.clone(),
        },
        privacy: match &patch.privacy {
            Some(nested) => merge_privacy(&base.privacy, nested),
            None => base.privacy.clone(),
        },
    }
}

/// Computes the settings stored after a theme change.
///
/// The candidate carries `selected` and default values everywhere else; the
/// previous settings are then overlaid on top of it. With a complete previous
/// value the selected theme never survives the overlay.
pub fn theme_overlay(selected: Theme, previous: &Settings) -> Settings {
    let candidate = Settings::with_theme(selected);
    merge(&candidate, &SettingsPatch::from(previous))
}

/// Same overlay as `theme_overlay`, for a previous value read from storage
/// that may be partial.
pub fn theme_overlay_patch(selected: Theme, previous: &SettingsPatch) -> Settings {
    merge(&Settings::with_theme(selected), previous)
}

fn merge_notifications(
    base: &NotificationPrefs,
    patch: &NotificationPrefsPatch,
) -> NotificationPrefs {
    NotificationPrefs {
        email: patch.email.unwrap_or(base.email),
        push: patch.push.unwrap_or(base.push),
        desktop: patch.desktop.unwrap_or(base.desktop),
        mentions: patch.mentions.unwrap_or(base.mentions),
        news: patch.news.unwrap_or(base.news),
        updates: patch.updates.unwrap_or(base.updates),
    }
}

fn merge_privacy(base: &PrivacySettings, patch: &PrivacyPatch) -> PrivacySettings {
    PrivacySettings {
        show_email: patch.show_email.unwrap_or(base.show_email),
        show_phone: patch.show_phone.unwrap_or(base.show_phone),
        show_birthday: patch.show_birthday.unwrap_or(base.show_birthday),
        show_activity: patch.show_activity.unwrap_or(base.show_activity),
        profile_visibility: patch.profile_visibility.unwrap_or(base.profile_visibility),
    }
}

/// Persisted settings decode as a patch over the defaults.
impl From<SettingsPatch> for Settings {
    fn from(value: SettingsPatch) -> Self {
        merge(&Settings::default(), &value)
    }
}
