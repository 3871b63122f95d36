//! Project domain model.
//!
//! # Invariants
//! - `progress` stays within `0..=100`.
//! - New projects always start at `progress = 0`.

use crate::model::person::PersonId;
use serde::{Deserialize, Deserializer, Serialize};

pub type ProjectId = i64;

pub const MAX_PROGRESS: u8 = 100;

/// Fixed project lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

/// Stored project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ProjectStatus,
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(default)]
    pub owner_id: PersonId,
    #[serde(default)]
    pub assignee_ids: Vec<PersonId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// Project input without identity or progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub owner_id: PersonId,
    pub assignee_ids: Vec<PersonId>,
    pub due_date: Option<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            status,
            owner_id: PersonId::new(),
            assignee_ids: Vec::new(),
            due_date: None,
        }
    }

    /// Materializes the project with the given id and zero progress.
    pub fn into_project(self, id: ProjectId) -> Project {
        Project {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            progress: 0,
            owner_id: self.owner_id,
            assignee_ids: self.assignee_ids,
            due_date: self.due_date,
        }
    }
}

impl Project {
    /// Returns a copy with `progress` clamped to `MAX_PROGRESS`.
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(MAX_PROGRESS);
        self
    }
}

/// Stored progress outside `0..=100` is clamped instead of rejecting the
/// whole collection.
fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(u8::try_from(raw.clamp(0, i64::from(MAX_PROGRESS))).unwrap_or(MAX_PROGRESS))
}

#[cfg(test)]
mod tests {
    use super::{Project, MAX_PROGRESS};

    fn decode(progress: &str) -> Project {
        serde_json::from_str(&format!(
            r#"{{"id":1,"name":"A","status":"Planned","progress":{progress}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn stored_progress_is_clamped_into_range() {
        assert_eq!(decode("250").progress, MAX_PROGRESS);
        assert_eq!(decode("1000").progress, MAX_PROGRESS);
        assert_eq!(decode("-5").progress, 0);
        assert_eq!(decode("42").progress, 42);
    }

    #[test]
    fn missing_progress_defaults_to_zero() {
        let project: Project =
            serde_json::from_str(r#"{"id":1,"name":"A","status":"On Hold"}"#).unwrap();
        assert_eq!(project.progress, 0);
    }
}
