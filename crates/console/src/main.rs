//! Headless smoke console for the STS Clearance Hub client stack.
//!
//! Wires the HTTP API client, room store, session bus, and orchestrator
//! against a real backend, selects the room given in `STS_ROOM_ID`, and
//! keeps refreshing on signals until Ctrl-C. Useful for exercising the
//! orchestration layer end-to-end without a browser front-end.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stshub_client::{ClientConfig, HttpTransferApi, TransferApi};
use stshub_core::types::Id;
use stshub_events::{SessionBus, SessionEvent};
use stshub_session::{Orchestrator, RoomStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stshub=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Loaded client configuration");

    let room_id: Id = std::env::var("STS_ROOM_ID")
        .unwrap_or_else(|_| "1".into())
        .parse()?;

    // --- Wiring ---
    let api: Arc<dyn TransferApi> = Arc::new(HttpTransferApi::new(config.base_url.clone()));
    let store = Arc::new(RoomStore::new());
    let orchestrator = Orchestrator::with_policy(api.clone(), store.clone(), config.retry_policy());

    let bus = SessionBus::default();
    let cancel = CancellationToken::new();

    let loop_handle = tokio::spawn({
        let orchestrator = orchestrator.clone();
        let receiver = bus.subscribe();
        let cancel = cancel.clone();
        async move { orchestrator.run(receiver, cancel).await }
    });

    // --- Room listing (sanity check against the backend) ---
    match api.get_rooms().await {
        Ok(rooms) => {
            for room in &rooms {
                tracing::info!(room_id = room.id, title = %room.title, location = %room.location, "Room");
            }
        }
        Err(e) => tracing::warn!(error = %e, "Could not fetch the room list"),
    }

    bus.publish(SessionEvent::RoomChanged { room_id });
    tracing::info!(room_id, "Selected room; press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;

    // --- Snapshot on exit ---
    match store.summary() {
        Some(summary) => tracing::info!(
            room_id = summary.room_id,
            progress = ?summary.progress_percent,
            blocking_documents = summary.blocking_documents.len(),
            pending_approvals = summary.pending_approvals.len(),
            "Last cockpit snapshot"
        ),
        None => tracing::warn!("No cockpit snapshot was fetched"),
    }
    if let Some(err) = store.last_error() {
        tracing::warn!(action = err.action, error = %err.message, "Last orchestration error");
    }

    cancel.cancel();
    loop_handle.await?;
    Ok(())
}
