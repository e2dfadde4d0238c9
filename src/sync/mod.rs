//! Last-write-wins reconciliation between the local store and the remote document.
//!
//! Every mutation is pushed as a complete snapshot after it has been persisted
//! locally. Pulls adopt the remote document only when its `lastUpdated` is newer
//! than the local one, except for the first successful pull of the process, which
//! always adopts it.
//!
//! Known hazards, kept deliberately:
//! - Two devices that both push between pulls: the later push wins in full and the
//!   earlier push's other changes are lost.
//! - A push and a pull in flight at the same time race; whichever response is
//!   handled last determines the in-memory state.
//! - Background pulls are skipped on the edit screens only, so a draft held on any
//!   other screen can be overtaken by a pull.
//! - The first pull of a process adopts the remote document whatever its timestamp.
//!   A change that only reached the local store while the remote was unreachable is
//!   replaced by the next process that pulls successfully. Every CLI command is such
//!   a process.

mod remote;

pub use remote::*;

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app::{AppState, SharedState};
use crate::db::LocalStore;
use crate::errors::AppError;
use crate::models::{now_millis, renumber, DigitLocale, Document, DocumentPatch, DocumentPayload};

pub const PUSH_FAILED_MESSAGE: &str =
    "Cloud sync failed. Changes are currently saved on this device only.";
pub const PULL_FAILED_MESSAGE: &str = "Could not fetch data from the server.";

/// Result of a push whose local write succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The remote document now holds the snapshot
    Synced,
    /// The snapshot is only stored locally
    LocalOnly(AppError),
}

impl SyncOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncOutcome::Synced)
    }
}

/// Result of a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    /// The remote document was adopted
    Applied { last_updated: i64 },
    /// The remote document was not newer than the local one
    UpToDate,
}

/// Push/pull engine sharing the controller's state.
#[derive(Clone)]
pub struct SyncEngine {
    store: LocalStore,
    remote: RemoteClient,
    state: SharedState,
    digits: DigitLocale,
}

impl SyncEngine {
    pub fn new(store: LocalStore, remote: RemoteClient, state: SharedState, digits: DigitLocale) -> Self {
        Self {
            store,
            remote,
            state,
            digits,
        }
    }

    pub fn remote(&self) -> &RemoteClient {
        &self.remote
    }

    /// Merge `patch` over the current document, persist the snapshot locally, then
    /// replace the remote document with it.
    ///
    /// Only a local store failure is returned as an error; a remote failure leaves
    /// the local snapshot in place and is reported as [`SyncOutcome::LocalOnly`].
    pub async fn push(&self, patch: DocumentPatch) -> Result<SyncOutcome, AppError> {
        let snapshot = {
            let mut state = self.state.lock().await;
            let timestamp = state.document.next_timestamp(now_millis());
            let snapshot = state.document.merged(patch, timestamp);

            self.store.save_document(&snapshot).await?;
            state.document = snapshot.clone();
            state.sync.is_syncing = true;
            snapshot
        };

        let result = self.remote.replace(&snapshot).await;

        let mut state = self.state.lock().await;
        state.sync.is_syncing = false;
        match result {
            Ok(()) => {
                tracing::debug!(last_updated = snapshot.last_updated, "Pushed document");
                state.sync.error = None;
                Ok(SyncOutcome::Synced)
            }
            Err(e) => {
                tracing::warn!("Push failed, keeping local copy: {}", e);
                state.sync.error = Some(PUSH_FAILED_MESSAGE.to_string());
                Ok(SyncOutcome::LocalOnly(e))
            }
        }
    }

    /// Fetch the remote document and adopt it if it is newer, or if no pull has
    /// succeeded yet in this process.
    ///
    /// Failures only surface in the sync banner when `manual` is set.
    pub async fn pull(&self, manual: bool) -> Result<PullOutcome, AppError> {
        if manual {
            self.state.lock().await.sync.is_syncing = true;
        }

        let fetched = self.remote.fetch().await;

        let mut state = self.state.lock().await;
        if manual {
            state.sync.is_syncing = false;
        }

        let payload = match fetched {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Pull failed: {}", e);
                if manual {
                    state.sync.error = Some(PULL_FAILED_MESSAGE.to_string());
                }
                return Err(e);
            }
        };
        state.sync.error = None;

        let local = state.document.last_updated;
        if !payload.is_newer_than(local) && state.sync.has_initial_sync {
            tracing::debug!(local, remote = ?payload.last_updated, "Remote not newer");
            return Ok(PullOutcome::UpToDate);
        }

        let last_updated = payload.effective_last_updated(now_millis());
        self.apply_payload(&mut state, &payload, Some(last_updated))
            .await?;
        state.sync.has_initial_sync = true;

        tracing::info!(local, last_updated, "Adopted remote document");
        Ok(PullOutcome::Applied { last_updated })
    }

    /// Write the present fields of `payload` to the local store and to `state`.
    ///
    /// Missing fields and empty passwords are left untouched. The center list is
    /// renumbered before it is stored.
    pub async fn apply_payload(
        &self,
        state: &mut AppState,
        payload: &DocumentPayload,
        last_updated: Option<i64>,
    ) -> Result<(), AppError> {
        if let Some(centers) = &payload.centers {
            let mut centers = centers.clone();
            renumber(&mut centers, self.digits);
            self.store.save_centers(&centers).await?;
            state.document.centers = centers;
        }
        if let Some(contact) = &payload.emergency_contact {
            self.store.save_emergency_contact(contact).await?;
            state.document.emergency_contact = contact.clone();
        }
        if let Some(password) = payload.user_password() {
            self.store.save_user_password(password).await?;
            state.document.user_password = password.to_string();
        }
        if let Some(password) = payload.admin_password() {
            self.store.save_admin_password(password).await?;
            state.document.admin_password = password.to_string();
        }
        if let Some(last_updated) = last_updated {
            self.store.save_last_updated(last_updated).await?;
            state.document.last_updated = last_updated;
        }
        Ok(())
    }

    /// Pull now, then every `interval` for as long as the task runs. Ticks are
    /// skipped while the current screen blocks background pulls.
    pub fn spawn_poller(&self, interval: Duration) -> JoinHandle<()> {
        let engine = self.clone();
        tokio::spawn(async move {
            if let Err(e) = engine.pull(false).await {
                tracing::debug!("Startup pull failed: {}", e);
            }

            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let screen = engine.state.lock().await.screen;
                if screen.blocks_background_pull() {
                    tracing::debug!(?screen, "Skipping background pull");
                    continue;
                }

                if let Err(e) = engine.pull(false).await {
                    tracing::debug!("Background pull failed: {}", e);
                }
            }
        })
    }

    /// Current in-memory document.
    pub async fn document(&self) -> Document {
        self.state.lock().await.document.clone()
    }
}
