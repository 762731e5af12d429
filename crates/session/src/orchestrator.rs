//! Data orchestrator.
//!
//! Fans the five resource fetchers out in parallel with an all-settled
//! join, and reacts to session signals from the [`SessionBus`]: a room
//! change refreshes everything (only when the id actually changed), an
//! explicit refresh always refreshes, and a logout resets the store
//! unconditionally without waiting for in-flight fetches.
//!
//! There is no cancellation of superseded fetches: a late result simply
//! lands and overwrites state, which is acceptable because every slice
//! reflects "most recent successful fetch per resource".

use std::sync::{Arc, Mutex};

use futures::future::{join_all, BoxFuture, FutureExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::broadcast::Receiver;
use tokio_util::sync::CancellationToken;

use stshub_client::retry::RetryPolicy;
use stshub_client::{ApiError, TransferApi};
use stshub_core::types::Id;
use stshub_events::SessionEvent;

use crate::fetchers;
use crate::store::RoomStore;

/// Drives the five resource fetchers from session signals.
///
/// Cheaply cloneable; clones share the store, the API handle, and the
/// last-seen room id.
#[derive(Clone)]
pub struct Orchestrator {
    api: Arc<dyn TransferApi>,
    store: Arc<RoomStore>,
    policy: RetryPolicy,
    last_room: Arc<Mutex<Option<Id>>>,
}

impl Orchestrator {
    pub fn new(api: Arc<dyn TransferApi>, store: Arc<RoomStore>) -> Self {
        Self::with_policy(api, store, RetryPolicy::default())
    }

    pub fn with_policy(
        api: Arc<dyn TransferApi>,
        store: Arc<RoomStore>,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            api,
            store,
            policy,
            last_room: Arc::new(Mutex::new(None)),
        }
    }

    /// Run all five fetchers concurrently with an all-settled join.
    ///
    /// Individual rejections are logged, never propagated: one resource's
    /// failure must not block the others, and each failure is already
    /// recorded in the store's error slot by its fetcher.
    pub async fn refresh_all(&self) {
        let api = self.api.as_ref();
        let store = self.store.as_ref();
        let policy = &self.policy;

        let fetches: Vec<(&'static str, BoxFuture<'_, Result<(), ApiError>>)> = vec![
            (
                fetchers::ACTION_SUMMARY,
                fetchers::fetch_summary(api, store, policy).boxed(),
            ),
            (
                fetchers::ACTION_VESSELS,
                fetchers::fetch_vessels(api, store, policy).boxed(),
            ),
            (
                fetchers::ACTION_ACTIVITIES,
                fetchers::fetch_activities(api, store, policy).boxed(),
            ),
            (
                fetchers::ACTION_MESSAGES,
                fetchers::fetch_messages(api, store, policy).boxed(),
            ),
            (
                fetchers::ACTION_MISSING_DOCUMENTS,
                fetchers::fetch_missing_documents(api, store, policy).boxed(),
            ),
        ];

        let (actions, tasks): (Vec<_>, Vec<_>) = fetches.into_iter().unzip();
        let results = join_all(tasks).await;

        for (action, result) in actions.into_iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(action, error = %e, "Resource fetch failed");
            }
        }
    }

    /// Apply one session signal.
    pub async fn handle_event(&self, event: SessionEvent) {
        match event {
            SessionEvent::RoomChanged { room_id } => {
                {
                    let mut last = self.last_room.lock().unwrap();
                    if *last == Some(room_id) {
                        return;
                    }
                    *last = Some(room_id);
                }
                tracing::info!(room_id, "Room changed, refreshing all resources");
                self.store.set_current_room(Some(room_id));
                self.refresh_all().await;
            }
            SessionEvent::RefreshRequested => {
                tracing::debug!("Refresh requested");
                self.refresh_all().await;
            }
            SessionEvent::LoggedOut => {
                tracing::info!("Logged out, resetting session state");
                *self.last_room.lock().unwrap() = None;
                self.store.reset();
            }
        }
    }

    /// Consume session signals until cancelled.
    ///
    /// Each signal is handled on its own task so that a logout is applied
    /// immediately even while a refresh is still in flight. A lagged
    /// receiver logs the skipped signals and keeps going.
    pub async fn run(&self, mut events: Receiver<SessionEvent>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Orchestrator stopped");
                    return;
                }
                event = events.recv() => match event {
                    Ok(event) => {
                        let this = self.clone();
                        tokio::spawn(async move { this.handle_event(event).await });
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Session event receiver lagged");
                    }
                    Err(RecvError::Closed) => {
                        tracing::info!("Session bus closed, orchestrator exiting");
                        return;
                    }
                }
            }
        }
    }
}
