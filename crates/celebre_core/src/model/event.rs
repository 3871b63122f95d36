//! Social event domain model.

use crate::model::person::PersonId;
use serde::{Deserialize, Serialize};

pub type EventId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialEvent {
    pub id: EventId,
    pub title: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer_id: Option<PersonId>,
}

/// Event input without identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSocialEvent {
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: String,
    pub organizer_id: Option<PersonId>,
}

impl NewSocialEvent {
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            time: None,
            location: None,
            description: String::new(),
            organizer_id: None,
        }
    }

    pub fn with_id(self, id: EventId) -> SocialEvent {
        SocialEvent {
            id,
            title: self.title,
            date: self.date,
            time: self.time,
            location: self.location,
            description: self.description,
            organizer_id: self.organizer_id,
        }
    }
}
