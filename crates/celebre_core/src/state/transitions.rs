//! Pure snapshot transitions.
//!
//! Each function maps the previous collection snapshot plus one input to the
//! next snapshot. Nothing here touches storage.

use crate::model::document::{Document, DocumentId};
use crate::model::event::{EventId, NewSocialEvent, SocialEvent};
use crate::model::notification::Notification;
use crate::model::person::Person;
use crate::model::project::{NewProject, Project, ProjectId, ProjectStatus};

pub fn add_project(projects: &[Project], input: NewProject, id: ProjectId) -> Vec<Project> {
    let mut next = projects.to_vec();
    next.push(input.into_project(id));
    next
}

/// Replaces every project whose id matches. Unknown ids leave the list as is.
///
/// Progress above `MAX_PROGRESS` is clamped before it is stored.
pub fn update_project(projects: &[Project], updated: &Project) -> Vec<Project> {
    let updated = updated.clone().with_progress(updated.progress);
    replace_by(projects, &updated, |project| project.id == updated.id)
}

pub fn set_project_status(
    projects: &[Project],
    id: ProjectId,
    status: ProjectStatus,
) -> Vec<Project> {
    projects
        .iter()
        .map(|project| {
            if project.id == id {
                Project {
                    status,
                    ..project.clone()
                }
            } else {
                project.clone()
            }
        })
        .collect()
}

pub fn dismiss_notification(notifications: &[Notification], id: &str) -> Vec<Notification> {
    notifications
        .iter()
        .filter(|notification| notification.id != id)
        .cloned()
        .collect()
}

pub fn add_event(events: &[SocialEvent], input: NewSocialEvent, id: EventId) -> Vec<SocialEvent> {
    let mut next = events.to_vec();
    next.push(input.with_id(id));
    next
}

pub fn delete_event(events: &[SocialEvent], id: EventId) -> Vec<SocialEvent> {
    events.iter().filter(|event| event.id != id).cloned().collect()
}

pub fn update_person(people: &[Person], updated: &Person) -> Vec<Person> {
    replace_by(people, updated, |person| person.id == updated.id)
}

pub fn append_documents(documents: &[Document], added: Vec<Document>) -> Vec<Document> {
    let mut next = documents.to_vec();
    next.extend(added);
    next
}

pub fn update_document(documents: &[Document], updated: &Document) -> Vec<Document> {
    replace_by(documents, updated, |document| document.id == updated.id)
}

pub fn delete_document(documents: &[Document], id: DocumentId) -> Vec<Document> {
    documents
        .iter()
        .filter(|document| document.id != id)
        .cloned()
        .collect()
}

fn replace_by<T: Clone>(items: &[T], replacement: &T, matches: impl Fn(&T) -> bool) -> Vec<T> {
    items
        .iter()
        .map(|item| {
            if matches(item) {
                replacement.clone()
            } else {
                item.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        add_project, delete_document, delete_event, dismiss_notification, set_project_status,
        update_project,
    };
    use crate::model::document::NewDocument;
    use crate::model::notification::{unread_count, Notification};
    use crate::model::project::{NewProject, ProjectStatus, MAX_PROGRESS};
    use crate::seed::SeedData;

    #[test]
    fn dismiss_removes_only_matching_id() {
        let notifications = vec![
            Notification::new("a", "first", false),
            Notification::new("b", "second", false),
            Notification::new("c", "third", true),
        ];
        let next = dismiss_notification(&notifications, "b");
        assert_eq!(next.len(), notifications.len() - 1);
        assert!(next.iter().all(|n| n.id != "b"));
        assert_eq!(unread_count(&next), 1);
    }

    #[test]
    fn dismiss_unknown_id_keeps_everything() {
        let notifications = vec![Notification::new("a", "first", false)];
        assert_eq!(dismiss_notification(&notifications, "zzz"), notifications);
    }

    #[test]
    fn new_project_starts_at_zero_progress() {
        let next = add_project(&[], NewProject::new("X", ProjectStatus::Planned), 42);
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, 42);
        assert_eq!(next[0].progress, 0);
    }

    #[test]
    fn status_and_update_touch_only_the_matching_project() {
        let projects = SeedData::default().projects;
        let next = set_project_status(&projects, 2, ProjectStatus::OnHold);
        assert_eq!(next[1].status, ProjectStatus::OnHold);
        assert_eq!(next[0], projects[0]);

        let mut renamed = projects[2].clone();
        renamed.name = "Orçamento 2026".to_string();
        let next = update_project(&projects, &renamed);
        assert_eq!(next[2].name, "Orçamento 2026");
        assert_eq!(next[0], projects[0]);
    }

    #[test]
    fn update_clamps_progress_to_maximum() {
        let projects = SeedData::default().projects;
        let mut overshoot = projects[0].clone();
        overshoot.progress = 180;

        let next = update_project(&projects, &overshoot);
        assert_eq!(next[0].progress, MAX_PROGRESS);
    }

    #[test]
    fn colliding_ids_are_all_removed_together() {
        let events = vec![
            crate::model::event::NewSocialEvent::new("a", "2025-01-01").with_id(7),
            crate::model::event::NewSocialEvent::new("b", "2025-01-02").with_id(7),
        ];
        assert!(delete_event(&events, 7).is_empty());

        let documents = vec![
            NewDocument::new("a.pdf", "pdf", "ana").with_id(1),
            NewDocument::new("b.pdf", "pdf", "ana").with_id(2),
        ];
        assert_eq!(delete_document(&documents, 1).len(), 1);
    }
}
