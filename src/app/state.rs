//! Application state owned by the controller.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::Session;
use crate::models::Document;

/// Screens of the directory. Only the current screen is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    CenterDetails,
    Persons,
    CenterInfo,
    Admin,
    AdminLogin,
    EditCenter,
    Settings,
}

impl Screen {
    /// Screens on which background pulls are skipped so an edit in progress is not
    /// replaced underneath the user.
    pub fn blocks_background_pull(&self) -> bool {
        matches!(self, Screen::EditCenter | Screen::Settings)
    }

    /// Screen reached by the back action.
    pub fn back(&self) -> Screen {
        match self {
            Screen::CenterDetails => Screen::Home,
            Screen::CenterInfo | Screen::Persons => Screen::CenterDetails,
            Screen::EditCenter | Screen::Settings => Screen::Admin,
            Screen::Admin | Screen::AdminLogin => Screen::Home,
            Screen::Home => Screen::Home,
        }
    }
}

/// Sync indicator state surfaced to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pub is_syncing: bool,
    /// Banner text shown while the last sync attempt failed
    pub error: Option<String>,
    /// Set by the first successful pull of this process
    pub has_initial_sync: bool,
}

/// Everything the directory shows, in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub document: Document,
    pub session: Session,
    pub screen: Screen,
    pub selected_center: Option<String>,
    pub sync: SyncStatus,
}

impl AppState {
    pub fn new(document: Document, session: Session) -> Self {
        let screen = if session.admin_logged_in {
            Screen::Admin
        } else {
            Screen::Home
        };
        Self {
            document,
            session,
            screen,
            selected_center: None,
            sync: SyncStatus::default(),
        }
    }
}

pub type SharedState = Arc<Mutex<AppState>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_navigation() {
        assert_eq!(Screen::CenterDetails.back(), Screen::Home);
        assert_eq!(Screen::Persons.back(), Screen::CenterDetails);
        assert_eq!(Screen::CenterInfo.back(), Screen::CenterDetails);
        assert_eq!(Screen::EditCenter.back(), Screen::Admin);
        assert_eq!(Screen::Settings.back(), Screen::Admin);
        assert_eq!(Screen::AdminLogin.back(), Screen::Home);
        assert_eq!(Screen::Home.back(), Screen::Home);
    }

    #[test]
    fn test_only_edit_screens_block_pulls() {
        assert!(Screen::EditCenter.blocks_background_pull());
        assert!(Screen::Settings.blocks_background_pull());
        assert!(!Screen::Admin.blocks_background_pull());
        assert!(!Screen::Home.blocks_background_pull());
    }

    #[test]
    fn test_initial_screen_follows_admin_flag() {
        let admin = Session {
            admin_logged_in: true,
            ..Session::default()
        };
        assert_eq!(AppState::new(Document::default(), admin).screen, Screen::Admin);
        assert_eq!(
            AppState::new(Document::default(), Session::default()).screen,
            Screen::Home
        );
    }
}
