//! Transient UI session state.
//!
//! Nothing here is persisted; it resets to `UiState::default()` on every
//! process start.

use crate::model::person::Person;

/// Top-level views the presentation layer can show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    Dashboard,
    TeamDirectory,
    Projects,
    DocumentCenter,
    NewsAndEvents,
    Resources,
    Settings,
}

impl Page {
    /// Display title used by the page header.
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::TeamDirectory => "Team Directory",
            Self::Projects => "Projects",
            Self::DocumentCenter => "Document Center",
            Self::NewsAndEvents => "News & Events",
            Self::Resources => "Resources",
            Self::Settings => "Settings",
        }
    }

    /// Parses a header title; unknown titles fall back to the landing page.
    pub fn from_title(title: &str) -> Self {
        match title {
            "Team Directory" => Self::TeamDirectory,
            "Projects" => Self::Projects,
            "Document Center" => Self::DocumentCenter,
            "News & Events" => Self::NewsAndEvents,
            "Resources" => Self::Resources,
            "Settings" => Self::Settings,
            _ => Self::Dashboard,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub active_page: Page,
    pub sidebar_open: bool,
    pub notifications_open: bool,
    /// Person currently open in the profile editor.
    pub person_to_edit: Option<Person>,
}

impl UiState {
    pub(crate) fn reset_for_login(&mut self) {
        self.active_page = Page::default();
    }

    pub(crate) fn reset_for_logout(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn titles_parse_back_and_unknown_lands_on_dashboard() {
        for page in [
            Page::Dashboard,
            Page::TeamDirectory,
            Page::Projects,
            Page::DocumentCenter,
            Page::NewsAndEvents,
            Page::Resources,
            Page::Settings,
        ] {
            assert_eq!(Page::from_title(page.title()), page);
        }
        assert_eq!(Page::from_title("Chat"), Page::Dashboard);
    }
}
