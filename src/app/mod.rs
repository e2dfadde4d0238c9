//! Application controller.
//!
//! One [`AppController`] owns the application state; the sync engine and every
//! user-facing operation go through it. Cloning the controller shares the state.

mod centers;
mod settings;
mod state;
mod transfer;

pub use state::*;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::auth::{Role, Session};
use crate::config::Config;
use crate::db::{init_database, LocalStore, StoreKey};
use crate::errors::AppError;
use crate::models::{Center, DigitLocale, Document};
use crate::search::{self, DirectoryStats};
use crate::sync::{PullOutcome, RemoteClient, SyncEngine};

/// Controller for the center directory.
#[derive(Clone)]
pub struct AppController {
    store: LocalStore,
    engine: SyncEngine,
    state: SharedState,
    digits: DigitLocale,
}

impl AppController {
    /// Open the local store named by `config` and load the cached document.
    pub async fn open(config: &Config) -> Result<Self, AppError> {
        let pool = init_database(&config.db_path).await?;
        let store = LocalStore::new(pool);
        let remote = RemoteClient::new(config.remote_url.clone());
        Self::new(store, remote, config.digits).await
    }

    pub async fn new(
        store: LocalStore,
        remote: RemoteClient,
        digits: DigitLocale,
    ) -> Result<Self, AppError> {
        let snapshot = store.load().await?;
        let session = Session {
            user_logged_in: snapshot.user_logged_in,
            admin_logged_in: snapshot.admin_logged_in,
            ..Session::default()
        };
        let state = Arc::new(Mutex::new(AppState::new(snapshot.document, session)));
        let engine = SyncEngine::new(store.clone(), remote, state.clone(), digits);

        tracing::debug!(remote = engine.remote().url(), "Controller ready");

        Ok(Self {
            store,
            engine,
            state,
            digits,
        })
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    /// Copy of the whole application state.
    pub async fn snapshot(&self) -> AppState {
        self.state.lock().await.clone()
    }

    pub async fn document(&self) -> Document {
        self.engine.document().await
    }

    /// Startup pull. Failure is not surfaced in the sync banner.
    pub async fn start(&self) -> Result<PullOutcome, AppError> {
        self.engine.pull(false).await
    }

    /// Manual pull triggered from the sync banner or the admin screen.
    pub async fn refresh(&self) -> Result<PullOutcome, AppError> {
        self.engine.pull(true).await
    }

    /// Pull now and then periodically in the background.
    pub fn spawn_background_sync(&self, interval: Duration) -> JoinHandle<()> {
        self.engine.spawn_poller(interval)
    }

    // ==================== NAVIGATION ====================

    pub async fn navigate(&self, screen: Screen) {
        self.state.lock().await.screen = screen;
    }

    pub async fn go_back(&self) -> Screen {
        let mut state = self.state.lock().await;
        state.screen = state.screen.back();
        state.screen
    }

    /// Return to the home screen and clear the selection.
    pub async fn go_home(&self) {
        let mut state = self.state.lock().await;
        state.screen = Screen::Home;
        state.selected_center = None;
    }

    /// Open the details screen of a center.
    pub async fn select_center(&self, id: &str) -> Result<Center, AppError> {
        let mut state = self.state.lock().await;
        let center = state
            .document
            .centers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Center {} not found", id)))?;
        state.selected_center = Some(center.id.clone());
        state.screen = Screen::CenterDetails;
        Ok(center)
    }

    // ==================== SESSION ====================

    pub async fn login_user(&self, password: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let expected = state.document.user_password.clone();
        state.session.attempt(Role::User, password, &expected)?;
        self.store
            .save_session(state.session.user_logged_in, state.session.admin_logged_in)
            .await
    }

    pub async fn login_admin(&self, password: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let expected = state.document.admin_password.clone();
        state.session.attempt(Role::Admin, password, &expected)?;
        state.screen = Screen::Admin;
        self.store
            .save_session(state.session.user_logged_in, state.session.admin_logged_in)
            .await
    }

    /// Check the admin password for this process only. The saved session is left as
    /// it was.
    pub async fn authorize_admin(&self, password: &str) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        let expected = state.document.admin_password.clone();
        state.session.attempt(Role::Admin, password, &expected)
    }

    pub async fn logout(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;
        state.session.clear();
        state.screen = Screen::Home;
        state.selected_center = None;
        self.store.remove(StoreKey::UserLoggedIn).await?;
        self.store.remove(StoreKey::AdminLoggedIn).await
    }

    async fn require_admin(&self) -> Result<(), AppError> {
        self.state.lock().await.session.require(Role::Admin)
    }

    // ==================== SEARCH ====================

    pub async fn search(&self, query: &str) -> Vec<Center> {
        let state = self.state.lock().await;
        search::filter_centers(&state.document.centers, query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn stats(&self) -> DirectoryStats {
        search::stats(&self.state.lock().await.document.centers)
    }
}
